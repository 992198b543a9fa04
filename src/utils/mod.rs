pub mod datetime;
pub mod jwt;
pub mod password;
pub mod slug;

pub use jwt::*;
pub use password::*;
pub use slug::{is_valid_slug, slugify};
