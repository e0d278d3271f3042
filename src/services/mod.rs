pub mod accounts;
pub mod preferences;
pub mod statistics;
pub mod videos;
