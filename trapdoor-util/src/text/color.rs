use colored::{ColoredString, Colorize};
use serde::{
    de::{value::StrDeserializer, IntoDeserializer},
    Deserialize, Deserializer, Serialize, Serializer,
};

/// Text color, either one of the named chat colors or an arbitrary RGB value.
///
/// Any other identifier, such as `reset`, is kept verbatim in `Other`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Named(NamedColor),
    Rgb(RGBColor),
    Other(String),
}

impl Color {
    pub fn console_color(&self, text: &str) -> ColoredString {
        match self {
            Color::Named(color) => color.console_color(text),
            Color::Rgb(color) => text.truecolor(color.red, color.green, color.blue),
            Color::Other(_) => text.normal(),
        }
    }
}

impl From<NamedColor> for Color {
    fn from(color: NamedColor) -> Self {
        Self::Named(color)
    }
}

impl From<RGBColor> for Color {
    fn from(color: RGBColor) -> Self {
        Self::Rgb(color)
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Color::Named(color) => color.serialize(serializer),
            Color::Rgb(color) => serializer.serialize_str(&format!(
                "#{:02X}{:02X}{:02X}",
                color.red, color.green, color.blue
            )),
            Color::Other(name) => serializer.serialize_str(name),
        }
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;

        if let Some(rgb) = s.strip_prefix('#').and_then(RGBColor::from_hex) {
            return Ok(Color::Rgb(rgb));
        }

        let named: StrDeserializer<D::Error> = s.as_str().into_deserializer();
        match NamedColor::deserialize(named) {
            Ok(color) => Ok(Color::Named(color)),
            Err(_) => Ok(Color::Other(s)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RGBColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl RGBColor {
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    fn from_hex(hex: &str) -> Option<Self> {
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let rgb = u32::from_str_radix(hex, 16).ok()?;
        Some(Self::new((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8))
    }
}

/// The sixteen colors every client knows by name
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedColor {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
}

impl NamedColor {
    pub fn console_color(&self, text: &str) -> ColoredString {
        match self {
            NamedColor::Black => text.black(),
            NamedColor::DarkBlue => text.blue(),
            NamedColor::DarkGreen => text.green(),
            NamedColor::DarkAqua => text.cyan(),
            NamedColor::DarkRed => text.red(),
            NamedColor::DarkPurple => text.purple(),
            NamedColor::Gold => text.yellow(),
            NamedColor::Gray => text.white(),
            NamedColor::DarkGray => text.bright_black(),
            NamedColor::Blue => text.bright_blue(),
            NamedColor::Green => text.bright_green(),
            NamedColor::Aqua => text.bright_cyan(),
            NamedColor::Red => text.bright_red(),
            NamedColor::LightPurple => text.bright_purple(),
            NamedColor::Yellow => text.bright_yellow(),
            NamedColor::White => text.bright_white(),
        }
    }
}
