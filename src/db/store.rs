/// Persistence abstraction
///
/// Every record the service owns (users, preferences, videos, interactions) is read
/// and written through this trait, so the HTTP layer and services never depend on a
/// concrete database. Uniqueness and foreign-key violations are reported as
/// `AppError::Validation` with the offending field, matching what the API returns.
use crate::{
    error::AppResult,
    models::{
        Genre, Interaction, InteractionKind, NewInteraction, NewUser, NewVideo, Preference,
        User, Video,
    },
};

/// Message reported when a genre label is already claimed by any preference row
pub const DUPLICATE_PREFERENCE: &str = "preferences with this preference already exists.";

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Store: Send + Sync {
    /// Creates an account; fails on a duplicate username or email
    async fn create_user(&self, user: NewUser) -> AppResult<User>;

    async fn find_user(&self, id: i64) -> AppResult<Option<User>>;

    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Inserts a preference row; a genre can only be held by one row across all users
    async fn insert_preference(&self, user_id: i64, genre: Genre) -> AppResult<Preference>;

    /// All preference rows owned by the user, ordered by id
    async fn list_preferences(&self, user_id: i64) -> AppResult<Vec<Preference>>;

    async fn find_preference_by_genre(
        &self,
        user_id: i64,
        genre: Genre,
    ) -> AppResult<Option<Preference>>;

    async fn find_preference(&self, user_id: i64, id: i64) -> AppResult<Option<Preference>>;

    /// Overwrites the genre of an existing row
    async fn update_preference(&self, id: i64, genre: Genre) -> AppResult<Preference>;

    async fn insert_video(&self, video: NewVideo) -> AppResult<Video>;

    async fn find_video(&self, id: i64) -> AppResult<Option<Video>>;

    /// Videos whose category is one of `genres`, ordered by id
    async fn list_videos_by_genres(&self, genres: &[Genre]) -> AppResult<Vec<Video>>;

    async fn insert_interaction(&self, interaction: NewInteraction) -> AppResult<Interaction>;

    /// Interactions of one user with one video, optionally restricted to a kind
    async fn list_interactions(
        &self,
        user_id: i64,
        video_id: i64,
        kind: Option<InteractionKind>,
    ) -> AppResult<Vec<Interaction>>;
}
