//! Credentials and bearer-token authentication

pub mod extractor;
pub mod password;
pub mod tokens;

pub use extractor::AuthUser;
pub use tokens::{Claims, TokenPair, TokenService, TokenType};
