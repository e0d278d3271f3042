use serde::{Deserialize, Serialize};

use super::Genre;

/// A user's declared interest in one genre
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preference {
    pub id: i64,
    pub user: i64,
    pub preference: Genre,
}
