//! Domain types for the storefront.

pub mod product;
pub mod session;
pub mod user;

pub use product::{Product, ProductSize, ProductWithSizes};
pub use session::{CurrentUser, session_keys};
pub use user::User;
