use chrono::Utc;
use serde::Deserialize;

use crate::{
    cached,
    db::{Cache, CacheKey, Store},
    error::{AppResult, FieldErrors},
    models::{Interaction, InteractionKind, NewInteraction},
};

#[derive(Debug, Deserialize)]
pub struct RecordInteractionRequest {
    pub video: i64,
    pub interaction_type: String,
}

/// Appends an interaction stamped with the current time
///
/// `user_id` is `None` for anonymous interactions.
pub async fn record_interaction(
    store: &dyn Store,
    user_id: Option<i64>,
    request: RecordInteractionRequest,
) -> AppResult<Interaction> {
    let mut errors = FieldErrors::new();

    let kind = match request.interaction_type.parse::<InteractionKind>() {
        Ok(kind) => Some(kind),
        Err(e) => {
            errors.add("interaction_type", e.to_string());
            None
        }
    };

    if store.find_video(request.video).await?.is_none() {
        errors.add(
            "video",
            format!("Invalid pk \"{}\" - object does not exist.", request.video),
        );
    }

    let kind = match kind {
        Some(kind) if errors.is_empty() => kind,
        _ => return Err(errors.into()),
    };

    let interaction = store
        .insert_interaction(NewInteraction {
            video: request.video,
            user: user_id,
            kind,
            timestamp: Utc::now(),
        })
        .await?;

    tracing::info!(
        video_id = interaction.video,
        user_id = ?interaction.user,
        kind = %interaction.interaction_type,
        "Recorded interaction"
    );

    Ok(interaction)
}

/// The user's interactions with a video, optionally limited to one kind
pub async fn list_interactions(
    store: &dyn Store,
    cache: &Cache,
    ttl: u64,
    user_id: i64,
    video_id: i64,
    kind: Option<InteractionKind>,
) -> AppResult<Vec<Interaction>> {
    let key = CacheKey::Interactions {
        user_id,
        video_id,
        kind,
    };

    cached!(cache, key, ttl, async {
        store.list_interactions(user_id, video_id, kind).await
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::error::AppError;
    use crate::models::{Genre, NewVideo};

    async fn store_with_video() -> (MemoryStore, i64) {
        let store = MemoryStore::new();
        let video = store
            .insert_video(NewVideo {
                title: "Trailer".to_string(),
                category: Genre::Movies,
                url: "https://example.com/trailer".to_string(),
            })
            .await
            .unwrap();
        (store, video.id)
    }

    fn request(video: i64, kind: &str) -> RecordInteractionRequest {
        RecordInteractionRequest {
            video,
            interaction_type: kind.to_string(),
        }
    }

    #[tokio::test]
    async fn test_record_normalizes_kind_and_stamps_time() {
        let (store, video_id) = store_with_video().await;
        let before = Utc::now();

        let interaction = record_interaction(&store, Some(1), request(video_id, "view"))
            .await
            .unwrap();

        assert_eq!(interaction.interaction_type, InteractionKind::View);
        assert_eq!(interaction.user, Some(1));
        assert!(interaction.timestamp >= before);
    }

    #[tokio::test]
    async fn test_record_anonymous_interaction() {
        let (store, video_id) = store_with_video().await;
        let interaction = record_interaction(&store, None, request(video_id, "share"))
            .await
            .unwrap();
        assert_eq!(interaction.user, None);
    }

    #[tokio::test]
    async fn test_record_rejects_unknown_kind_and_video() {
        let store = MemoryStore::new();
        let err = record_interaction(&store, Some(1), request(77, "like"))
            .await
            .unwrap_err();

        match err {
            AppError::Validation(errors) => {
                assert!(errors.get("interaction_type").is_some());
                assert!(errors.get("video").is_some());
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_list_filters_by_user_and_kind() {
        let (store, video_id) = store_with_video().await;
        let cache = Cache::disabled();

        record_interaction(&store, Some(1), request(video_id, "view")).await.unwrap();
        record_interaction(&store, Some(1), request(video_id, "download")).await.unwrap();
        record_interaction(&store, Some(2), request(video_id, "view")).await.unwrap();

        let all = list_interactions(&store, &cache, 60, 1, video_id, None).await.unwrap();
        assert_eq!(all.len(), 2);

        let views = list_interactions(&store, &cache, 60, 1, video_id, Some(InteractionKind::View))
            .await
            .unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].interaction_type, InteractionKind::View);

        let shares =
            list_interactions(&store, &cache, 60, 1, video_id, Some(InteractionKind::Share))
                .await
                .unwrap();
        assert!(shares.is_empty());
    }
}
