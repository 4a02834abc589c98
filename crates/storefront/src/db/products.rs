//! Catalog read access and the checkout stock decrement.
//!
//! Queries are bound at runtime with `sqlx::query_as` so the build does not
//! need a live database.

use sqlx::PgPool;

use warung_core::{Price, ProductId, ProductSizeId};

use super::RepositoryError;
use crate::models::product::{Product, ProductSize, ProductWithSizes};

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i32,
    name: String,
    image: String,
    price: i64,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            name: row.name,
            image: row.image,
            price: Price::new(row.price),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProductSizeRow {
    id: i32,
    product_id: i32,
    size: String,
    stock: i32,
}

impl From<ProductSizeRow> for ProductSize {
    fn from(row: ProductSizeRow) -> Self {
        Self {
            id: ProductSizeId::new(row.id),
            product_id: ProductId::new(row.product_id),
            size: row.size,
            stock: row.stock,
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for catalog reads and the checkout decrement.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all products in storage-insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, image, price FROM store.product ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a product with its size rows.
    ///
    /// Returns `None` if the product does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get_with_sizes(
        &self,
        id: ProductId,
    ) -> Result<Option<ProductWithSizes>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, image, price FROM store.product WHERE id = $1",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let sizes = sqlx::query_as::<_, ProductSizeRow>(
            "SELECT id, product_id, size, stock FROM store.product_size \
             WHERE product_id = $1 ORDER BY id",
        )
        .bind(id.as_i32())
        .fetch_all(self.pool)
        .await?;

        Ok(Some(ProductWithSizes {
            product: row.into(),
            sizes: sizes.into_iter().map(Into::into).collect(),
        }))
    }

    /// Get the size rows for every product, grouped by product id.
    ///
    /// Used by the listing page to show availability without N+1 queries.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_sizes(&self) -> Result<Vec<ProductSize>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductSizeRow>(
            "SELECT id, product_id, size, stock FROM store.product_size ORDER BY product_id, id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Atomically reserve `quantity` units of a size.
    ///
    /// Runs a single conditional update: the decrement only happens when the
    /// row exists and has at least `quantity` units, so two concurrent
    /// checkouts can never both take the last unit.
    ///
    /// Returns `true` if stock was reserved, `false` when the size is unknown
    /// or understocked (no state change either way).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn decrement_stock(
        &self,
        product_id: ProductId,
        size: &str,
        quantity: i32,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            "UPDATE store.product_size SET stock = stock - $3 \
             WHERE product_id = $1 AND size = $2 AND stock >= $3",
        )
        .bind(product_id.as_i32())
        .bind(size)
        .bind(quantity)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
