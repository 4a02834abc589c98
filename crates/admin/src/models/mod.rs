//! Domain types for the admin panel.

pub mod admin_user;
pub mod product;
pub mod session;

pub use admin_user::AdminUser;
pub use product::{Product, ProductSize, ProductWithSizes, SizeEntry};
pub use session::{CurrentAdmin, session_keys};
