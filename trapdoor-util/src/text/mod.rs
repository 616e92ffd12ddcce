use colored::Colorize;
use serde::{Deserialize, Serialize};

pub mod color;

use color::{Color, NamedColor};

/// Represents a formatted chat text tree.
///
/// Children in `extra` are rendered after the parent's own text and inherit
/// any style the parent sets.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TextComponent {
    /// The actual text, empty when a node only carries style or children
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub italic: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub underlined: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub strikethrough: bool,
    /// Randomly cycling glyphs, client side only
    #[serde(default, skip_serializing_if = "is_false")]
    pub obfuscated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    /// Extra text components
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<TextComponent>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

#[derive(Clone, Default)]
struct InheritedStyle {
    bold: bool,
    italic: bool,
    underlined: bool,
    strikethrough: bool,
    color: Option<Color>,
}

impl TextComponent {
    pub fn text<P>(plain: P) -> Self
    where
        P: Into<String>,
    {
        Self {
            text: plain.into(),
            ..Default::default()
        }
    }

    pub fn add_child(mut self, child: TextComponent) -> Self {
        self.extra.push(child);
        self
    }

    pub fn add_text<P>(mut self, text: P) -> Self
    where
        P: Into<String>,
    {
        self.extra.push(Self::text(text));
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn color_named(self, color: NamedColor) -> Self {
        self.color(Color::Named(color))
    }

    /// Makes the text bold
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Makes the text italic
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Makes the text underlined
    pub fn underlined(mut self) -> Self {
        self.underlined = true;
        self
    }

    /// Makes the text strikethrough
    pub fn strikethrough(mut self) -> Self {
        self.strikethrough = true;
        self
    }

    /// Makes the text obfuscated
    pub fn obfuscated(mut self) -> Self {
        self.obfuscated = true;
        self
    }

    /// The plain text of the whole tree, parent first.
    pub fn get_text(&self) -> String {
        let mut text = self.text.clone();
        for child in &self.extra {
            text += &child.get_text();
        }
        text
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_pretty_console(&self) -> String {
        let mut out = String::new();
        self.render_console(&InheritedStyle::default(), &mut out);
        out
    }

    fn render_console(&self, inherited: &InheritedStyle, out: &mut String) {
        let style = InheritedStyle {
            bold: inherited.bold || self.bold,
            italic: inherited.italic || self.italic,
            underlined: inherited.underlined || self.underlined,
            strikethrough: inherited.strikethrough || self.strikethrough,
            color: self.color.clone().or_else(|| inherited.color.clone()),
        };

        if !self.text.is_empty() {
            let mut text = match &style.color {
                Some(color) => color.console_color(&self.text),
                None => self.text.as_str().normal(),
            };
            if style.bold {
                text = text.bold();
            }
            if style.italic {
                text = text.italic();
            }
            if style.underlined {
                text = text.underline();
            }
            if style.strikethrough {
                text = text.strikethrough();
            }
            out.push_str(&text.to_string());
        }

        for child in &self.extra {
            child.render_console(&style, out);
        }
    }
}
