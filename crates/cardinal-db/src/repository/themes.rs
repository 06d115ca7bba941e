//! Theme repository — persistence access for theme records.
//!
//! One row per theme; token maps are JSON text columns, timestamps are
//! fixed-width RFC 3339 text so `ORDER BY` stays correct across both
//! backends.

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::any::AnyRow;
use sqlx::AnyPool;
use uuid::Uuid;

use cardinal_common::error::{CardinalError, CardinalResult};
use cardinal_common::models::Theme;

use crate::row;

fn encode_ts(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn encode_json<T: serde::Serialize>(value: &T) -> CardinalResult<String> {
    serde_json::to_string(value).map_err(|e| CardinalError::Internal(e.into()))
}

fn theme_from_row(r: &AnyRow) -> Result<Theme, sqlx::Error> {
    use sqlx::Row;
    Ok(Theme {
        id: row::get_uuid(r, "id")?,
        owner_id: row::get_opt_uuid(r, "owner_id")?,
        name: r.try_get("name")?,
        is_public: row::get_bool(r, "is_public")?,
        colors: row::get_json(r, "colors")?,
        fonts: row::get_json(r, "fonts")?,
        radii: row::get_json(r, "radii")?,
        spacing: row::get_json(r, "spacing")?,
        shadows: row::get_json(r, "shadows")?,
        preview: row::get_json(r, "preview")?,
        tags: row::get_opt_json(r, "tags")?,
        created_at: row::get_datetime(r, "created_at")?,
        updated_at: row::get_datetime(r, "updated_at")?,
    })
}

// ============================================================
// Read
// ============================================================

/// Get a theme by ID. Absence is `None`, never an error.
pub async fn find_by_id(pool: &AnyPool, id: Uuid) -> CardinalResult<Option<Theme>> {
    let row = sqlx::query("SELECT * FROM themes WHERE id = ?")
        .bind(id.to_string())
        .fetch_optional(pool)
        .await?;
    row.as_ref().map(theme_from_row).transpose().map_err(Into::into)
}

/// All themes owned by a user, public or not, most recently updated first.
pub async fn list_for_owner(pool: &AnyPool, owner_id: Uuid) -> CardinalResult<Vec<Theme>> {
    let rows = sqlx::query("SELECT * FROM themes WHERE owner_id = ? ORDER BY updated_at DESC")
        .bind(owner_id.to_string())
        .fetch_all(pool)
        .await?;
    rows.iter().map(theme_from_row).collect::<Result<_, _>>().map_err(Into::into)
}

/// The marketplace: every public theme.
pub async fn list_public(pool: &AnyPool) -> CardinalResult<Vec<Theme>> {
    let rows = sqlx::query("SELECT * FROM themes WHERE is_public = ? ORDER BY updated_at DESC")
        .bind(1_i64)
        .fetch_all(pool)
        .await?;
    rows.iter().map(theme_from_row).collect::<Result<_, _>>().map_err(Into::into)
}

/// The caller's most recently updated theme, if any.
pub async fn find_active_for_owner(pool: &AnyPool, owner_id: Uuid) -> CardinalResult<Option<Theme>> {
    let row = sqlx::query(
        "SELECT * FROM themes WHERE owner_id = ? ORDER BY updated_at DESC LIMIT 1",
    )
    .bind(owner_id.to_string())
    .fetch_optional(pool)
    .await?;
    row.as_ref().map(theme_from_row).transpose().map_err(Into::into)
}

// ============================================================
// Write
// ============================================================

/// Insert-or-update keyed on `id`. All mutable fields are overwritten and
/// `updated_at` is refreshed; `created_at` is fixed at first insert.
pub async fn upsert(pool: &AnyPool, theme: &Theme) -> CardinalResult<Theme> {
    let tags = theme.tags.as_ref().map(encode_json).transpose()?;

    let row = sqlx::query(
        r#"
        INSERT INTO themes (
            id, owner_id, name, is_public,
            colors, fonts, radii, spacing, shadows, preview, tags,
            created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT (id) DO UPDATE SET
            name       = excluded.name,
            is_public  = excluded.is_public,
            colors     = excluded.colors,
            fonts      = excluded.fonts,
            radii      = excluded.radii,
            spacing    = excluded.spacing,
            shadows    = excluded.shadows,
            preview    = excluded.preview,
            tags       = excluded.tags,
            updated_at = excluded.updated_at
        RETURNING *
        "#,
    )
    .bind(theme.id.to_string())
    .bind(theme.owner_id.map(|id| id.to_string()))
    .bind(&theme.name)
    .bind(theme.is_public as i64)
    .bind(encode_json(&theme.colors)?)
    .bind(encode_json(&theme.fonts)?)
    .bind(encode_json(&theme.radii)?)
    .bind(encode_json(&theme.spacing)?)
    .bind(encode_json(&theme.shadows)?)
    .bind(encode_json(&theme.preview)?)
    .bind(tags)
    .bind(encode_ts(theme.created_at))
    .bind(encode_ts(Utc::now()))
    .fetch_optional(pool)
    .await?;

    let row = row.ok_or(CardinalError::Persistence {
        message: "theme upsert returned no record".into(),
    })?;
    theme_from_row(&row).map_err(Into::into)
}

/// Create a private copy of an existing theme for a new owner.
///
/// The clone gets a fresh id and timestamps, `is_public = false`, and the
/// caller-supplied name; every token map is copied verbatim.
pub async fn clone_theme(
    pool: &AnyPool,
    source_id: Uuid,
    new_owner: Uuid,
    new_name: &str,
) -> CardinalResult<Theme> {
    let source = find_by_id(pool, source_id)
        .await?
        .ok_or(CardinalError::NotFound {
            resource: "Theme".into(),
        })?;

    let now = Utc::now();
    let cloned = Theme {
        id: Uuid::new_v4(),
        owner_id: Some(new_owner),
        name: new_name.to_string(),
        is_public: false,
        created_at: now,
        updated_at: now,
        ..source
    };

    upsert(pool, &cloned).await
}

/// Delete a theme owned by the caller. Idempotent: deleting an id that
/// does not exist (or is not theirs) is not an error.
pub async fn delete(pool: &AnyPool, id: Uuid, owner_id: Uuid) -> CardinalResult<()> {
    sqlx::query("DELETE FROM themes WHERE id = ? AND owner_id = ?")
        .bind(id.to_string())
        .bind(owner_id.to_string())
        .execute(pool)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    async fn test_db() -> Database {
        // In-memory SQLite: one connection, or each checkout sees a
        // different database
        let db = Database::connect_with("sqlite::memory:", 1, 1)
            .await
            .expect("connect in-memory sqlite");
        db.init_schema().await.expect("init schema");
        db
    }

    fn make_theme(owner: Uuid, name: &str) -> Theme {
        let mut theme = Theme::built_in_default();
        theme.id = Uuid::new_v4();
        theme.owner_id = Some(owner);
        theme.name = name.to_string();
        theme.is_public = false;
        theme
    }

    #[tokio::test]
    async fn upsert_inserts_then_updates() {
        let db = test_db().await;
        let owner = Uuid::new_v4();
        let theme = make_theme(owner, "Original");

        let stored = upsert(&db.pool, &theme).await.unwrap();
        assert_eq!(stored.id, theme.id);
        assert_eq!(stored.name, "Original");
        assert_eq!(stored.owner_id, Some(owner));

        std::thread::sleep(std::time::Duration::from_millis(2));

        let mut renamed = stored.clone();
        renamed.name = "Renamed".into();
        let updated = upsert(&db.pool, &renamed).await.unwrap();

        assert_eq!(updated.id, theme.id);
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.created_at, stored.created_at);
        assert!(updated.updated_at > stored.updated_at);

        // Still a single row
        let all = list_for_owner(&db.pool, owner).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn upsert_round_trips_token_maps() {
        let db = test_db().await;
        let mut theme = make_theme(Uuid::new_v4(), "Tokens");
        theme.colors.extra.insert("sidebar".into(), "#111827".into());
        theme.shadows.extra.insert("inner".into(), "inset 0 2px 4px 0 rgb(0 0 0 / 0.05)".into());
        theme.tags = Some(vec!["dark".into(), "minimal".into()]);

        let stored = upsert(&db.pool, &theme).await.unwrap();
        assert_eq!(stored.colors, theme.colors);
        assert_eq!(stored.fonts, theme.fonts);
        assert_eq!(stored.shadows, theme.shadows);
        assert_eq!(stored.tags, theme.tags);
    }

    #[tokio::test]
    async fn public_flag_decodes_on_both_values() {
        // Stored as INTEGER 0/1: SQLite over the Any driver has no bool kind
        let db = test_db().await;
        let owner = Uuid::new_v4();

        let mut shared = make_theme(owner, "Shared");
        shared.is_public = true;
        upsert(&db.pool, &shared).await.unwrap();
        upsert(&db.pool, &make_theme(owner, "Private")).await.unwrap();

        let shared = find_by_id(&db.pool, shared.id).await.unwrap().unwrap();
        assert!(shared.is_public);

        let mine = list_for_owner(&db.pool, owner).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert_eq!(mine.iter().filter(|t| t.is_public).count(), 1);
    }

    #[tokio::test]
    async fn find_by_id_absence_is_none() {
        let db = test_db().await;
        let found = find_by_id(&db.pool, Uuid::new_v4()).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn clone_resets_visibility_and_identity() {
        let db = test_db().await;
        let author = Uuid::new_v4();
        let importer = Uuid::new_v4();

        let mut source = make_theme(author, "Midnight");
        source.is_public = true;
        source.tags = Some(vec!["dark".into()]);
        let source = upsert(&db.pool, &source).await.unwrap();

        let clone = clone_theme(&db.pool, source.id, importer, "My Copy")
            .await
            .unwrap();

        assert_ne!(clone.id, source.id);
        assert_eq!(clone.name, "My Copy");
        assert_eq!(clone.owner_id, Some(importer));
        assert!(!clone.is_public);
        // Token maps copied verbatim
        assert_eq!(clone.colors, source.colors);
        assert_eq!(clone.fonts, source.fonts);
        assert_eq!(clone.radii, source.radii);
        assert_eq!(clone.spacing, source.spacing);
        assert_eq!(clone.shadows, source.shadows);
        assert_eq!(clone.tags, source.tags);

        // Source untouched
        let original = find_by_id(&db.pool, source.id).await.unwrap().unwrap();
        assert_eq!(original.owner_id, Some(author));
        assert!(original.is_public);
    }

    #[tokio::test]
    async fn clone_of_missing_source_is_not_found() {
        let db = test_db().await;
        let err = clone_theme(&db.pool, Uuid::new_v4(), Uuid::new_v4(), "Copy")
            .await
            .unwrap_err();
        assert!(matches!(err, CardinalError::NotFound { .. }));

        // No write happened
        assert!(list_public(&db.pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_is_idempotent_and_owner_scoped() {
        let db = test_db().await;
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let theme = upsert(&db.pool, &make_theme(owner, "Mine")).await.unwrap();

        // Someone else's delete is a no-op
        delete(&db.pool, theme.id, stranger).await.unwrap();
        assert!(find_by_id(&db.pool, theme.id).await.unwrap().is_some());

        delete(&db.pool, theme.id, owner).await.unwrap();
        assert!(find_by_id(&db.pool, theme.id).await.unwrap().is_none());

        // Deleting again is fine
        delete(&db.pool, theme.id, owner).await.unwrap();
    }

    #[tokio::test]
    async fn visibility_queries() {
        let db = test_db().await;
        let owner = Uuid::new_v4();

        let mut public_theme = make_theme(owner, "Shared");
        public_theme.is_public = true;
        upsert(&db.pool, &public_theme).await.unwrap();
        upsert(&db.pool, &make_theme(owner, "Private")).await.unwrap();
        upsert(&db.pool, &make_theme(Uuid::new_v4(), "Other user")).await.unwrap();

        // "My themes" includes the user's own public themes
        let mine = list_for_owner(&db.pool, owner).await.unwrap();
        assert_eq!(mine.len(), 2);

        let marketplace = list_public(&db.pool).await.unwrap();
        assert_eq!(marketplace.len(), 1);
        assert_eq!(marketplace[0].name, "Shared");
    }

    #[tokio::test]
    async fn active_theme_is_most_recently_updated() {
        let db = test_db().await;
        let owner = Uuid::new_v4();

        upsert(&db.pool, &make_theme(owner, "First")).await.unwrap();
        std::thread::sleep(std::time::Duration::from_millis(2));
        upsert(&db.pool, &make_theme(owner, "Second")).await.unwrap();

        let active = find_active_for_owner(&db.pool, owner).await.unwrap().unwrap();
        assert_eq!(active.name, "Second");

        assert!(find_active_for_owner(&db.pool, Uuid::new_v4())
            .await
            .unwrap()
            .is_none());
    }
}
