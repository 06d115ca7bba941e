//! Theme models — the design-token bundle persisted per user and the
//! request shapes accepted by the theme endpoints.
//!
//! `colors` and `shadows` are open mappings: the named roles are always
//! present, and custom theme authors may add arbitrary extra keys. The
//! extras ride along through `#[serde(flatten)]` so the wire format stays
//! a flat JSON object.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// ============================================================
// Token maps
// ============================================================

/// Named color roles plus arbitrary author-defined extras.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub foreground: String,
    pub border: String,
    pub text: String,
    pub text_secondary: String,
    pub text_on_primary: String,
    pub text_on_accent: String,

    /// Custom color roles beyond the named set.
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl ThemeColors {
    /// Iterate all entries, named roles first, wire-format key names.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        [
            ("primary", self.primary.as_str()),
            ("secondary", self.secondary.as_str()),
            ("accent", self.accent.as_str()),
            ("background", self.background.as_str()),
            ("foreground", self.foreground.as_str()),
            ("border", self.border.as_str()),
            ("text", self.text.as_str()),
            ("textSecondary", self.text_secondary.as_str()),
            ("textOnPrimary", self.text_on_primary.as_str()),
            ("textOnAccent", self.text_on_accent.as_str()),
        ]
        .into_iter()
        .chain(self.extra.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }
}

/// Primary/secondary font-family names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeFonts {
    pub primary: String,
    pub secondary: String,
}

/// Corner radii. The only structural field the service auto-defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeRadii {
    pub small: String,
    pub medium: String,
    pub large: String,
}

impl Default for ThemeRadii {
    fn default() -> Self {
        Self {
            small: "0.25rem".into(),
            medium: "0.5rem".into(),
            large: "0.75rem".into(),
        }
    }
}

/// Spacing scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeSpacing {
    pub small: String,
    pub medium: String,
    pub large: String,
}

/// Named shadow presets plus arbitrary author-defined extras.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeShadows {
    pub sm: String,
    pub md: String,
    pub lg: String,

    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl ThemeShadows {
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        [
            ("sm", self.sm.as_str()),
            ("md", self.md.as_str()),
            ("lg", self.lg.as_str()),
        ]
        .into_iter()
        .chain(self.extra.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }
}

/// Lightweight summary of a theme's colors, used for marketplace grids
/// without loading the full color set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemePreview {
    pub primary: String,
    pub secondary: String,
    pub background: String,
    pub border: String,
    pub accent: String,
    pub text: String,
    pub text_on_accent: String,
}

impl From<&ThemeColors> for ThemePreview {
    fn from(colors: &ThemeColors) -> Self {
        Self {
            primary: colors.primary.clone(),
            secondary: colors.secondary.clone(),
            background: colors.background.clone(),
            border: colors.border.clone(),
            accent: colors.accent.clone(),
            text: colors.text.clone(),
            text_on_accent: colors.text_on_accent.clone(),
        }
    }
}

// ============================================================
// Theme
// ============================================================

/// A named, versionless bundle of visual design tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    /// Generated at creation (v4), immutable thereafter.
    pub id: Uuid,

    /// Creating user; `None` for seed/system themes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<Uuid>,

    pub name: String,

    /// Governs marketplace visibility.
    pub is_public: bool,

    pub colors: ThemeColors,
    pub fonts: ThemeFonts,
    pub radii: ThemeRadii,
    pub spacing: ThemeSpacing,
    pub shadows: ThemeShadows,

    /// Derived from `colors` at save time unless explicitly overridden.
    pub preview: ThemePreview,

    /// Marketplace labels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Theme {
    /// Project the theme onto CSS custom property assignments.
    ///
    /// Pure and idempotent: applying the same theme twice yields the same
    /// assignment set; applying a different theme afterwards overwrites
    /// per variable name (last write wins). Radii are intentionally not
    /// projected — the UI consumes them through component props instead.
    pub fn css_variables(&self) -> BTreeMap<String, String> {
        let mut vars = BTreeMap::new();

        for (key, value) in self.colors.entries() {
            vars.insert(format!("--{key}"), value.to_string());
        }

        vars.insert("--font-primary".into(), self.fonts.primary.clone());
        vars.insert("--font-secondary".into(), self.fonts.secondary.clone());

        vars.insert("--spacing-small".into(), self.spacing.small.clone());
        vars.insert("--spacing-medium".into(), self.spacing.medium.clone());
        vars.insert("--spacing-large".into(), self.spacing.large.clone());

        for (key, value) in self.shadows.entries() {
            vars.insert(format!("--shadow-{key}"), value.to_string());
        }

        vars
    }

    /// The built-in light theme applied when nothing else is available.
    pub fn built_in_default() -> Self {
        let colors = ThemeColors {
            primary: "#3b82f6".into(),
            secondary: "#64748b".into(),
            accent: "#f43f5e".into(),
            background: "#ffffff".into(),
            foreground: "#020817".into(),
            border: "#e2e8f0".into(),
            text: "#020817".into(),
            text_secondary: "#64748b".into(),
            text_on_primary: "#ffffff".into(),
            text_on_accent: "#ffffff".into(),
            extra: BTreeMap::new(),
        };
        let preview = ThemePreview::from(&colors);
        let now = Utc::now();

        Self {
            id: Uuid::nil(),
            owner_id: None,
            name: "Cardinal Light".into(),
            is_public: true,
            colors,
            fonts: ThemeFonts {
                primary: "Inter".into(),
                secondary: "Inter".into(),
            },
            radii: ThemeRadii::default(),
            spacing: ThemeSpacing {
                small: "0.5rem".into(),
                medium: "1rem".into(),
                large: "1.5rem".into(),
            },
            shadows: ThemeShadows {
                sm: "0 1px 2px 0 rgb(0 0 0 / 0.05)".into(),
                md: "0 4px 6px -1px rgb(0 0 0 / 0.1), 0 2px 4px -2px rgb(0 0 0 / 0.1)".into(),
                lg: "0 10px 15px -3px rgb(0 0 0 / 0.1), 0 4px 6px -4px rgb(0 0 0 / 0.1)".into(),
                extra: BTreeMap::new(),
            },
            preview,
            tags: None,
            created_at: now,
            updated_at: now,
        }
    }
}

// ============================================================
// Request shapes
// ============================================================

/// POST /themes — create (or overwrite) a theme from the editor.
///
/// The token maps are optional at the type level so the service can report
/// exactly which required structure is missing instead of a generic
/// deserialization failure.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateThemeRequest {
    /// Present when the editor re-saves an existing theme; a fresh id is
    /// assigned when absent. Records are only ever replaced whole.
    pub id: Option<Uuid>,

    #[validate(length(min = 1, max = 100, message = "Theme name must be 1-100 characters"))]
    pub name: String,

    pub colors: Option<ThemeColors>,
    pub fonts: Option<ThemeFonts>,
    pub radii: Option<ThemeRadii>,
    pub spacing: Option<ThemeSpacing>,
    pub shadows: Option<ThemeShadows>,

    /// Explicit preview override; derived from `colors` when absent.
    pub preview: Option<ThemePreview>,

    pub tags: Option<Vec<String>>,

    #[serde(default)]
    pub is_public: bool,
}

/// PUT /themes — import (clone) a marketplace theme under a new name.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CloneThemeRequest {
    #[validate(length(min = 1, message = "Original theme ID is required"))]
    pub original_theme_id: String,

    #[validate(length(min = 1, max = 100, message = "New name must be 1-100 characters"))]
    pub new_name: String,
}
