//! Data models shared across Cardinal services.

pub mod theme;

pub use theme::{
    CloneThemeRequest, CreateThemeRequest, Theme, ThemeColors, ThemeFonts, ThemePreview,
    ThemeRadii, ThemeShadows, ThemeSpacing,
};
