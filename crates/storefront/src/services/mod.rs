//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `auth` - Buyer registration and login (Argon2 password hashing)
//! - `whatsapp` - Checkout order-summary deep link builder

pub mod auth;
pub mod whatsapp;
