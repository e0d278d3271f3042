pub mod genre;
pub mod interaction;
pub mod preference;
pub mod user;
pub mod video;

pub use genre::{Genre, InvalidChoice};
pub use interaction::{Interaction, InteractionKind, NewInteraction};
pub use preference::Preference;
pub use user::{normalize_email, NewUser, User, UserProfile};
pub use video::{NewVideo, Video};
