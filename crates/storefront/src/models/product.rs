//! Catalog domain types.
//!
//! These types represent validated domain objects separate from database
//! row types. The catalog is written by the admin binary; the storefront
//! only reads it, apart from the checkout stock decrement.

use warung_core::{Price, ProductId, ProductSizeId};

/// A catalog product.
#[derive(Debug, Clone)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Image reference, relative to the upload directory (e.g. `uploads/kaos.jpg`).
    pub image: String,
    /// Unit price in whole rupiah.
    pub price: Price,
}

/// A size row belonging to a product.
///
/// Size labels are free text; `(product_id, size)` is unique.
#[derive(Debug, Clone)]
pub struct ProductSize {
    /// Unique size row ID.
    pub id: ProductSizeId,
    /// Owning product.
    pub product_id: ProductId,
    /// Size label (e.g. "S", "M", "XL").
    pub size: String,
    /// Units in stock.
    pub stock: i32,
}

/// A product together with its size rows.
#[derive(Debug, Clone)]
pub struct ProductWithSizes {
    pub product: Product,
    pub sizes: Vec<ProductSize>,
}
