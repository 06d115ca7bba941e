//! Theme service — business rules atop the repository.
//!
//! Validates required token maps before any write, assigns identity and
//! timestamps at creation, derives the preview summary from the color set,
//! and enforces clone-as-new-owner semantics.

use chrono::Utc;
use sqlx::AnyPool;
use uuid::Uuid;

use cardinal_common::error::{CardinalError, CardinalResult};
use cardinal_common::models::{CreateThemeRequest, Theme, ThemePreview};
use cardinal_common::validation::{validate_name, validate_request};
use cardinal_db::repository::themes;

fn missing_structure(name: &str) -> CardinalError {
    CardinalError::Validation {
        message: format!("Missing required theme properties: {name}"),
    }
}

/// Create a theme for `owner_id` from an editor payload.
///
/// All of `colors`, `fonts`, `spacing`, `shadows` must be present; `radii`
/// is the sole auto-defaulted structural field. No write happens on a
/// validation failure.
pub async fn create_theme(
    pool: &AnyPool,
    owner_id: Uuid,
    req: CreateThemeRequest,
) -> CardinalResult<Theme> {
    validate_request(&req)?;
    validate_name(&req.name)?;

    let colors = req.colors.ok_or_else(|| missing_structure("colors"))?;
    let fonts = req.fonts.ok_or_else(|| missing_structure("fonts"))?;
    let spacing = req.spacing.ok_or_else(|| missing_structure("spacing"))?;
    let shadows = req.shadows.ok_or_else(|| missing_structure("shadows"))?;

    // A re-save may only target the caller's own record; the upsert would
    // otherwise overwrite whatever theme holds that id. A foreign id reads
    // the same as a missing one.
    let id = match req.id {
        Some(id) => {
            if let Some(existing) = themes::find_by_id(pool, id).await? {
                if existing.owner_id != Some(owner_id) {
                    return Err(CardinalError::NotFound {
                        resource: "Theme".into(),
                    });
                }
            }
            id
        }
        None => Uuid::new_v4(),
    };

    let now = Utc::now();
    let preview = ThemePreview::from(&colors);
    let theme = Theme {
        id,
        owner_id: Some(owner_id),
        name: req.name,
        is_public: req.is_public,
        colors,
        fonts,
        radii: req.radii.unwrap_or_default(),
        spacing,
        shadows,
        preview,
        tags: req.tags,
        created_at: now,
        updated_at: now,
    };

    save_theme(pool, theme, req.preview).await
}

/// Persist a full theme record.
///
/// `preview` is recomputed from `colors` unless the caller supplied an
/// explicit override. `updated_at` is refreshed by the upsert; `created_at`
/// stays fixed for existing records.
pub async fn save_theme(
    pool: &AnyPool,
    mut theme: Theme,
    preview_override: Option<ThemePreview>,
) -> CardinalResult<Theme> {
    validate_name(&theme.name)?;

    theme.preview = preview_override.unwrap_or_else(|| ThemePreview::from(&theme.colors));
    theme.updated_at = Utc::now();

    themes::upsert(pool, &theme).await
}

/// Import a theme from the marketplace: a private copy under a new name.
pub async fn clone_theme(
    pool: &AnyPool,
    source_id: &str,
    owner_id: Uuid,
    new_name: &str,
) -> CardinalResult<Theme> {
    if source_id.trim().is_empty() {
        return Err(CardinalError::Validation {
            message: "Original theme ID and new name are required".into(),
        });
    }
    validate_name(new_name)?;

    let source_id = source_id
        .parse::<Uuid>()
        .map_err(|_| CardinalError::Validation {
            message: "Original theme ID must be a valid UUID".into(),
        })?;

    themes::clone_theme(pool, source_id, owner_id, new_name).await
}
