//! Database-level tests for catalog editing.
//!
//! Exercises the admin repository's full-replace semantics: editing a
//! product deletes every existing size row and inserts the submitted
//! ones, so pre-edit row ids never survive an edit.
//!
//! These tests require a migrated database reachable via `DATABASE_URL`.
//!
//! Run with: cargo test -p warung-integration-tests -- --ignored

use sqlx::PgPool;

use warung_admin::db::AdminProductRepository;
use warung_admin::models::SizeEntry;
use warung_core::Price;

async fn pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    PgPool::connect(&url).await.expect("Failed to connect")
}

fn entries(pairs: &[(&str, i32)]) -> Vec<SizeEntry> {
    pairs
        .iter()
        .map(|(size, stock)| SizeEntry {
            size: (*size).to_owned(),
            stock: *stock,
        })
        .collect()
}

#[tokio::test]
#[ignore = "Requires migrated database via DATABASE_URL"]
async fn test_edit_replaces_size_rows_and_retires_old_ids() {
    let pool = pool().await;
    let repo = AdminProductRepository::new(&pool);

    let product_id = repo
        .create_with_sizes(
            "Ganti Ukuran",
            "uploads/ganti_ukuran.jpg",
            Price::new(30_000),
            &entries(&[("S", 5)]),
        )
        .await
        .expect("Failed to create product");

    let before = repo
        .get_with_sizes(product_id)
        .await
        .expect("Failed to load product")
        .expect("Product missing after create");
    assert_eq!(before.sizes.len(), 1);
    let old_s_id = before.sizes.first().expect("No size row").id;

    repo.update_with_sizes(
        product_id,
        "Ganti Ukuran",
        None,
        Price::new(30_000),
        &entries(&[("S", 2), ("M", 1)]),
    )
    .await
    .expect("Failed to update product");

    let after = repo
        .get_with_sizes(product_id)
        .await
        .expect("Failed to load product")
        .expect("Product missing after update");

    // Exactly the submitted rows, nothing else
    let mut rows: Vec<(String, i32)> = after
        .sizes
        .iter()
        .map(|s| (s.size.clone(), s.stock))
        .collect();
    rows.sort();
    assert_eq!(rows, vec![("M".to_owned(), 1), ("S".to_owned(), 2)]);

    // The pre-edit "S" row id is retired, not reused
    assert!(after.sizes.iter().all(|s| s.id != old_s_id));
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM store.product_size WHERE id = $1")
            .bind(old_s_id.as_i32())
            .fetch_one(&pool)
            .await
            .expect("Failed to count retired row");
    assert_eq!(count, 0);

    repo.delete(product_id).await.expect("Failed to delete product");
}

#[tokio::test]
#[ignore = "Requires migrated database via DATABASE_URL"]
async fn test_delete_cascades_size_rows() {
    let pool = pool().await;
    let repo = AdminProductRepository::new(&pool);

    let product_id = repo
        .create_with_sizes(
            "Hapus Kaskade",
            "uploads/hapus_kaskade.jpg",
            Price::new(20_000),
            &entries(&[("S", 1), ("M", 2)]),
        )
        .await
        .expect("Failed to create product");

    repo.delete(product_id).await.expect("Failed to delete product");

    assert!(
        repo.get_with_sizes(product_id)
            .await
            .expect("Failed to load product")
            .is_none()
    );
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM store.product_size WHERE product_id = $1")
            .bind(product_id.as_i32())
            .fetch_one(&pool)
            .await
            .expect("Failed to count size rows");
    assert_eq!(count, 0);
}
