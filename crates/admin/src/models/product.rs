//! Catalog types as the admin panel sees them.

use warung_core::{Price, ProductId, ProductSizeId};

/// A product in the catalog.
#[derive(Debug, Clone)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Path under the upload directory, e.g. `uploads/kaos_polos.jpg`.
    pub image: String,
    pub price: Price,
}

/// A size row with its stock count.
#[derive(Debug, Clone)]
pub struct ProductSize {
    pub id: ProductSizeId,
    pub product_id: ProductId,
    pub size: String,
    pub stock: i32,
}

/// A product together with all of its size rows.
#[derive(Debug, Clone)]
pub struct ProductWithSizes {
    pub product: Product,
    pub sizes: Vec<ProductSize>,
}

/// A size label and stock count as submitted from the product form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeEntry {
    pub size: String,
    pub stock: i32,
}
