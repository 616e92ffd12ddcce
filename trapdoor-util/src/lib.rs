pub mod text;

pub use text::TextComponent;
