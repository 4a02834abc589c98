//! Shared newtype wrappers.

pub mod id;
pub mod price;
pub mod username;

pub use id::{AdminId, ProductId, ProductSizeId, UserId};
pub use price::Price;
pub use username::{Username, UsernameError};
