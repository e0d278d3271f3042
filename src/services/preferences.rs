use serde::Serialize;
use serde_json::Value;

use crate::{
    cached,
    db::{Cache, CacheKey, Store},
    error::{AppError, AppResult, FieldErrors},
    models::{Genre, Preference},
};

/// Outcome of a bulk create; items are inserted independently, so some may fail
#[derive(Debug, Serialize, PartialEq)]
pub struct PreferenceBatch {
    pub created: Vec<Preference>,
    pub errors: Vec<FieldErrors>,
}

impl PreferenceBatch {
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

fn parse_genre(value: &str) -> Result<Genre, FieldErrors> {
    value
        .parse::<Genre>()
        .map_err(|e| FieldErrors::single("preference", e.to_string()))
}

/// Creates one preference row per item for `user_id`
///
/// Invalid items and uniqueness conflicts are collected as per-item errors;
/// anything else (a database outage, say) aborts the batch.
pub async fn add_preferences(
    store: &dyn Store,
    user_id: i64,
    items: &[Value],
) -> AppResult<PreferenceBatch> {
    let mut batch = PreferenceBatch {
        created: Vec::new(),
        errors: Vec::new(),
    };

    for item in items {
        let Some(label) = item.as_str() else {
            batch
                .errors
                .push(FieldErrors::single("preference", "Not a valid string."));
            continue;
        };

        let genre = match parse_genre(label) {
            Ok(genre) => genre,
            Err(errors) => {
                batch.errors.push(errors);
                continue;
            }
        };

        match store.insert_preference(user_id, genre).await {
            Ok(preference) => batch.created.push(preference),
            Err(AppError::Validation(errors)) => batch.errors.push(errors),
            Err(e) => return Err(e),
        }
    }

    tracing::info!(
        user_id,
        created = batch.created.len(),
        failed = batch.errors.len(),
        "Processed preference batch"
    );

    Ok(batch)
}

/// All preferences of a user
pub async fn list_preferences(
    store: &dyn Store,
    cache: &Cache,
    ttl: u64,
    user_id: i64,
) -> AppResult<Vec<Preference>> {
    cached!(cache, CacheKey::Preferences { user_id }, ttl, async {
        store.list_preferences(user_id).await
    })
}

/// The user's preference for one genre; an unknown genre label is simply not found
pub async fn get_preference(
    store: &dyn Store,
    cache: &Cache,
    ttl: u64,
    user_id: i64,
    label: &str,
) -> AppResult<Preference> {
    let genre = label
        .parse::<Genre>()
        .map_err(|_| AppError::NotFound("no such record".to_string()))?;

    cached!(cache, CacheKey::Preference { user_id, genre }, ttl, async {
        store
            .find_preference_by_genre(user_id, genre)
            .await?
            .ok_or_else(|| AppError::NotFound("no such record".to_string()))
    })
}

/// Replaces the genre of one of the user's own preference rows
pub async fn update_preference(
    store: &dyn Store,
    user_id: i64,
    record_id: i64,
    label: &str,
) -> AppResult<Preference> {
    let existing = store
        .find_preference(user_id, record_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No such record".to_string()))?;

    let genre = parse_genre(label)?;
    let updated = store.update_preference(existing.id, genre).await?;

    tracing::info!(
        user_id,
        record_id,
        from = %existing.preference,
        to = %updated.preference,
        "Updated preference"
    );

    Ok(updated)
}
