use serde::Deserialize;
use validator::Validate;

use crate::{
    cached,
    db::{Cache, CacheKey, Store},
    error::{AppError, AppResult, FieldErrors},
    models::{Genre, NewVideo, Video},
};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateVideoRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Ensure this field has between 1 and 100 characters."
    ))]
    pub title: String,
    pub category: String,
    #[validate(
        url(message = "Enter a valid URL."),
        length(max = 200, message = "Ensure this field has no more than 200 characters.")
    )]
    pub url: String,
}

/// Validates and stores a new video
pub async fn add_video(store: &dyn Store, request: CreateVideoRequest) -> AppResult<Video> {
    let mut errors = match request.validate() {
        Ok(()) => FieldErrors::new(),
        Err(e) => FieldErrors::from(e),
    };

    let category = request.category.parse::<Genre>();
    if let Err(e) = &category {
        errors.add("category", e.to_string());
    }

    let category = match category {
        Ok(category) if errors.is_empty() => category,
        _ => return Err(errors.into()),
    };

    let video = store
        .insert_video(NewVideo {
            title: request.title,
            category,
            url: request.url,
        })
        .await?;

    tracing::info!(video_id = video.id, category = %video.category, "Added video");

    Ok(video)
}

/// Videos whose category is among the user's preferred genres
pub async fn list_videos_for_user(
    store: &dyn Store,
    cache: &Cache,
    ttl: u64,
    user_id: i64,
) -> AppResult<Vec<Video>> {
    cached!(cache, CacheKey::VideosForUser { user_id }, ttl, async {
        let genres: Vec<Genre> = store
            .list_preferences(user_id)
            .await?
            .into_iter()
            .map(|p| p.preference)
            .collect();

        let videos = store.list_videos_by_genres(&genres).await?;

        tracing::debug!(
            user_id,
            genre_count = genres.len(),
            video_count = videos.len(),
            "Matched videos to preferences"
        );

        Ok::<_, AppError>(videos)
    })
}
