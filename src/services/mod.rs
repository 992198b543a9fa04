pub mod auth_service;
pub mod draw_category_service;
pub mod draw_service;

pub use auth_service::*;
pub use draw_category_service::*;
pub use draw_service::*;
