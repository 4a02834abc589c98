//! Seed the catalog with a demo product.
//!
//! Only seeds when the catalog is empty, so re-running is safe.

use secrecy::ExposeSecret;
use sqlx::PgPool;

use warung_admin::db::AdminProductRepository;
use warung_admin::models::SizeEntry;
use warung_core::Price;

use super::CommandError;

/// Insert the demo product unless the catalog already has products.
///
/// # Errors
///
/// Returns an error if the database is unreachable or the insert fails.
pub async fn run() -> Result<(), CommandError> {
    let database_url = super::database_url()?;
    let pool = PgPool::connect(database_url.expose_secret()).await?;

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM store.product")
        .fetch_one(&pool)
        .await?;

    if count > 0 {
        tracing::info!(products = count, "Catalog already has products, skipping seed");
        return Ok(());
    }

    let sizes = [
        SizeEntry {
            size: "S".to_owned(),
            stock: 5,
        },
        SizeEntry {
            size: "M".to_owned(),
            stock: 3,
        },
        SizeEntry {
            size: "L".to_owned(),
            stock: 0,
        },
    ];

    let products = AdminProductRepository::new(&pool);
    let product_id = products
        .create_with_sizes(
            "Kaos Polos",
            "uploads/kaos_polos.jpg",
            Price::new(50_000),
            &sizes,
        )
        .await?;

    tracing::info!(%product_id, sizes = sizes.len(), "Seeded demo product");

    Ok(())
}
