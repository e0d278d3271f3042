use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// Fixed set of labels used to classify both videos and user preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Genre {
    News,
    Comedy,
    Infotainment,
    Entertainment,
    Romance,
    Tech,
    SciFi,
    Movies,
    Thriller,
}

/// Returned when a string does not name one of the choices of an enum
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("\"{0}\" is not a valid choice.")]
pub struct InvalidChoice(pub String);

impl Genre {
    pub const ALL: [Genre; 9] = [
        Genre::News,
        Genre::Comedy,
        Genre::Infotainment,
        Genre::Entertainment,
        Genre::Romance,
        Genre::Tech,
        Genre::SciFi,
        Genre::Movies,
        Genre::Thriller,
    ];

    /// Canonical label, as stored and returned over the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::News => "News",
            Genre::Comedy => "Comedy",
            Genre::Infotainment => "Infotainment",
            Genre::Entertainment => "Entertainment",
            Genre::Romance => "Romance",
            Genre::Tech => "Tech",
            Genre::SciFi => "SciFi",
            Genre::Movies => "Movies",
            Genre::Thriller => "Thriller",
        }
    }
}

impl Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive lookup; every write path parses genres through here.
impl FromStr for Genre {
    type Err = InvalidChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Genre::ALL
            .into_iter()
            .find(|genre| genre.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| InvalidChoice(s.to_string()))
    }
}
