//! Catalog write access for the admin panel.
//!
//! Create and edit run inside a single transaction so a product is never
//! visible without its size rows.

use sqlx::{PgPool, Postgres, Transaction};

use warung_core::{Price, ProductId, ProductSizeId};

use super::RepositoryError;
use crate::models::{Product, ProductSize, ProductWithSizes, SizeEntry};

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

/// Repository for admin catalog operations.
pub struct AdminProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AdminProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all products with their size rows.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list_with_sizes(&self) -> Result<Vec<ProductWithSizes>, RepositoryError> {
        let products = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, image, price FROM store.product ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        let sizes = sqlx::query_as::<_, ProductSizeRow>(
            "SELECT id, product_id, size, stock FROM store.product_size ORDER BY product_id, id",
        )
        .fetch_all(self.pool)
        .await?;

        let mut result: Vec<ProductWithSizes> = products
            .into_iter()
            .map(|p| ProductWithSizes {
                product: p.into(),
                sizes: Vec::new(),
            })
            .collect();

        for size in sizes {
            let size: ProductSize = size.into();
            if let Some(entry) = result.iter_mut().find(|e| e.product.id == size.product_id) {
                entry.sizes.push(size);
            }
        }

        Ok(result)
    }

    /// Get a single product with its size rows.
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

    /// Create a product and its size rows in one transaction.
    ///
    /// Duplicate size labels in `sizes` violate the per-product uniqueness
    /// constraint and roll the whole insert back.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` on duplicate size labels and
    /// `RepositoryError::Database` for other failures.
    pub async fn create_with_sizes(
        &self,
        name: &str,
        image: &str,
        price: Price,
        sizes: &[SizeEntry],
    ) -> Result<ProductId, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let (product_id,): (i32,) = sqlx::query_as(
            "INSERT INTO store.product (name, image, price) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(name)
        .bind(image)
        .bind(price.amount())
        .fetch_one(&mut *tx)
        .await?;

        insert_sizes(&mut tx, product_id, sizes).await?;

        tx.commit().await?;

        Ok(ProductId::new(product_id))
    }

    /// Update a product and replace all of its size rows in one transaction.
    ///
    /// `image` is `None` when the admin kept the existing photo.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist and
    /// `RepositoryError::Conflict` on duplicate size labels.
    pub async fn update_with_sizes(
        &self,
        id: ProductId,
        name: &str,
        image: Option<&str>,
        price: Price,
        sizes: &[SizeEntry],
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let result = match image {
            Some(image) => {
                sqlx::query(
                    "UPDATE store.product SET name = $2, price = $3, image = $4 WHERE id = $1",
                )
                .bind(id.as_i32())
                .bind(name)
                .bind(price.amount())
                .bind(image)
                .execute(&mut *tx)
                .await?
            }
            None => {
                sqlx::query("UPDATE store.product SET name = $2, price = $3 WHERE id = $1")
                    .bind(id.as_i32())
                    .bind(name)
                    .bind(price.amount())
                    .execute(&mut *tx)
                    .await?
            }
        };

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!(
                "product {id} not found"
            )));
        }

        // Full replace keeps the form authoritative for the size list
        sqlx::query("DELETE FROM store.product_size WHERE product_id = $1")
            .bind(id.as_i32())
            .execute(&mut *tx)
            .await?;

        insert_sizes(&mut tx, id.as_i32(), sizes).await?;

        tx.commit().await?;

        Ok(())
    }

    /// Delete a product. Size rows go with it via `ON DELETE CASCADE`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist.
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM store.product WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!(
                "product {id} not found"
            )));
        }

        Ok(())
    }
}

async fn insert_sizes(
    tx: &mut Transaction<'_, Postgres>,
    product_id: i32,
    sizes: &[SizeEntry],
) -> Result<(), RepositoryError> {
    for entry in sizes {
        sqlx::query(
            "INSERT INTO store.product_size (product_id, size, stock) VALUES ($1, $2, $3)",
        )
        .bind(product_id)
        .bind(&entry.size)
        .bind(entry.stock)
        .execute(&mut **tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict(format!(
                    "duplicate size label '{}'",
                    entry.size
                ));
            }
            RepositoryError::Database(e)
        })?;
    }

    Ok(())
}
