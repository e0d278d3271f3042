use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    error::{AppResult, FieldErrors},
    models::{
        Genre, Interaction, InteractionKind, NewInteraction, NewUser, NewVideo, Preference,
        User, Video,
    },
};

use super::store::{Store, DUPLICATE_PREFERENCE};

/// In-process store used by tests and by `STORAGE_BACKEND=memory`
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<MemoryStoreInner>>,
}

/// Tables keyed by id; `BTreeMap` keeps id order for listings
#[derive(Default)]
struct MemoryStoreInner {
    users: BTreeMap<i64, User>,
    preferences: BTreeMap<i64, Preference>,
    videos: BTreeMap<i64, Video>,
    interactions: BTreeMap<i64, Interaction>,
    last_id: i64,
}

impl MemoryStoreInner {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn genre_taken(&self, genre: Genre, except: Option<i64>) -> bool {
        self.preferences
            .values()
            .any(|p| p.preference == genre && Some(p.id) != except)
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl Store for MemoryStore {
    async fn create_user(&self, user: NewUser) -> AppResult<User> {
        let mut inner = self.inner.write().await;

        let mut errors = FieldErrors::new();
        if inner.users.values().any(|u| u.username == user.username) {
            errors.add("username", "user with this username already exists.");
        }
        if inner.users.values().any(|u| u.email == user.email) {
            errors.add("email", "user with this email already exists.");
        }
        if !errors.is_empty() {
            return Err(errors.into());
        }

        let id = inner.next_id();
        let user = User {
            id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            first_name: user.first_name,
            last_name: user.last_name,
            is_admin: false,
            is_staff: false,
            is_active: true,
        };
        inner.users.insert(id, user.clone());
        Ok(user)
    }

    async fn find_user(&self, id: i64) -> AppResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.get(&id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn insert_preference(&self, user_id: i64, genre: Genre) -> AppResult<Preference> {
        let mut inner = self.inner.write().await;
        if inner.genre_taken(genre, None) {
            return Err(FieldErrors::single("preference", DUPLICATE_PREFERENCE).into());
        }

        let id = inner.next_id();
        let preference = Preference {
            id,
            user: user_id,
            preference: genre,
        };
        inner.preferences.insert(id, preference.clone());
        Ok(preference)
    }

    async fn list_preferences(&self, user_id: i64) -> AppResult<Vec<Preference>> {
        let inner = self.inner.read().await;
        Ok(inner
            .preferences
            .values()
            .filter(|p| p.user == user_id)
            .cloned()
            .collect())
    }

    async fn find_preference_by_genre(
        &self,
        user_id: i64,
        genre: Genre,
    ) -> AppResult<Option<Preference>> {
        let inner = self.inner.read().await;
        Ok(inner
            .preferences
            .values()
            .find(|p| p.user == user_id && p.preference == genre)
            .cloned())
    }

    async fn find_preference(&self, user_id: i64, id: i64) -> AppResult<Option<Preference>> {
        let inner = self.inner.read().await;
        Ok(inner
            .preferences
            .get(&id)
            .filter(|p| p.user == user_id)
            .cloned())
    }

    async fn update_preference(&self, id: i64, genre: Genre) -> AppResult<Preference> {
        let mut inner = self.inner.write().await;
        if inner.genre_taken(genre, Some(id)) {
            return Err(FieldErrors::single("preference", DUPLICATE_PREFERENCE).into());
        }

        let preference = inner
            .preferences
            .get_mut(&id)
            .ok_or_else(|| crate::error::AppError::NotFound("No such record".to_string()))?;
        preference.preference = genre;
        Ok(preference.clone())
    }

    async fn insert_video(&self, video: NewVideo) -> AppResult<Video> {
        let mut inner = self.inner.write().await;
        let id = inner.next_id();
        let video = Video {
            id,
            title: video.title,
            category: video.category,
            url: video.url,
        };
        inner.videos.insert(id, video.clone());
        Ok(video)
    }

    async fn find_video(&self, id: i64) -> AppResult<Option<Video>> {
        let inner = self.inner.read().await;
        Ok(inner.videos.get(&id).cloned())
    }

    async fn list_videos_by_genres(&self, genres: &[Genre]) -> AppResult<Vec<Video>> {
        let inner = self.inner.read().await;
        Ok(inner
            .videos
            .values()
            .filter(|v| genres.contains(&v.category))
            .cloned()
            .collect())
    }

    async fn insert_interaction(&self, interaction: NewInteraction) -> AppResult<Interaction> {
        let mut inner = self.inner.write().await;
        if !inner.videos.contains_key(&interaction.video) {
            return Err(FieldErrors::single(
                "video",
                format!(
                    "Invalid pk \"{}\" - object does not exist.",
                    interaction.video
                ),
            )
            .into());
        }

        let id = inner.next_id();
        let interaction = Interaction {
            id,
            video: interaction.video,
            user: interaction.user,
            interaction_type: interaction.kind,
            timestamp: interaction.timestamp,
        };
        inner.interactions.insert(id, interaction.clone());
        Ok(interaction)
    }

    async fn list_interactions(
        &self,
        user_id: i64,
        video_id: i64,
        kind: Option<InteractionKind>,
    ) -> AppResult<Vec<Interaction>> {
        let inner = self.inner.read().await;
        Ok(inner
            .interactions
            .values()
            .filter(|i| i.user == Some(user_id) && i.video == video_id)
            .filter(|i| kind.map_or(true, |k| i.interaction_type == k))
            .cloned()
            .collect())
    }
}
