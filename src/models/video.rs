use serde::{Deserialize, Serialize};

use super::Genre;

/// A catalogued video, tagged with exactly one genre
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Video {
    pub id: i64,
    pub title: String,
    pub category: Genre,
    pub url: String,
}

/// Values needed to add a video to the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct NewVideo {
    pub title: String,
    pub category: Genre,
    pub url: String,
}
