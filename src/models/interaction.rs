use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

use super::InvalidChoice;

/// Kind of action a user performed against a video
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InteractionKind {
    View,
    Share,
    Download,
}

impl InteractionKind {
    pub const ALL: [InteractionKind; 3] = [
        InteractionKind::View,
        InteractionKind::Share,
        InteractionKind::Download,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionKind::View => "View",
            InteractionKind::Share => "Share",
            InteractionKind::Download => "Download",
        }
    }
}

impl Display for InteractionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InteractionKind {
    type Err = InvalidChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        InteractionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| InvalidChoice(s.to_string()))
    }
}

/// A single logged interaction. Rows are never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    pub id: i64,
    pub video: i64,
    /// `None` for anonymous interactions
    pub user: Option<i64>,
    pub interaction_type: InteractionKind,
    pub timestamp: DateTime<Utc>,
}

/// Values needed to append an interaction
#[derive(Debug, Clone, PartialEq)]
pub struct NewInteraction {
    pub video: i64,
    pub user: Option<i64>,
    pub kind: InteractionKind,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind_case_insensitive() {
        assert_eq!("view".parse::<InteractionKind>().unwrap(), InteractionKind::View);
        assert_eq!("SHARE".parse::<InteractionKind>().unwrap(), InteractionKind::Share);
        assert_eq!(
            "Download".parse::<InteractionKind>().unwrap(),
            InteractionKind::Download
        );
    }

    #[test]
    fn test_parse_kind_invalid() {
        let err = "like".parse::<InteractionKind>().unwrap_err();
        assert_eq!(err, InvalidChoice("like".to_string()));
    }

    #[test]
    fn test_interaction_serializes_wire_fields() {
        let interaction = Interaction {
            id: 3,
            video: 9,
            user: None,
            interaction_type: InteractionKind::Share,
            timestamp: "2024-05-22T01:57:00Z".parse().unwrap(),
        };

        let json = serde_json::to_value(&interaction).unwrap();
        assert_eq!(json["interaction_type"], "Share");
        assert_eq!(json["video"], 9);
        assert!(json["user"].is_null());
        assert_eq!(json["timestamp"], "2024-05-22T01:57:00Z");
    }
}
