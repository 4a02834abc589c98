//! Database-level tests for stock reservation.
//!
//! Exercises the conditional decrement the checkout handler relies on,
//! directly against `PostgreSQL`, including under concurrency.
//!
//! These tests require a migrated database reachable via `DATABASE_URL`.
//!
//! Run with: cargo test -p warung-integration-tests -- --ignored

use sqlx::PgPool;

use warung_core::Price;

async fn pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    PgPool::connect(&url).await.expect("Failed to connect")
}

async fn insert_product_with_stock(pool: &PgPool, stock: i32) -> i32 {
    let (product_id,): (i32,) = sqlx::query_as(
        "INSERT INTO store.product (name, image, price) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind("Stok Test")
    .bind("uploads/stok_test.jpg")
    .bind(Price::new(25_000).amount())
    .fetch_one(pool)
    .await
    .expect("Failed to insert product");

    sqlx::query("INSERT INTO store.product_size (product_id, size, stock) VALUES ($1, 'M', $2)")
        .bind(product_id)
        .bind(stock)
        .execute(pool)
        .await
        .expect("Failed to insert size");

    product_id
}

async fn cleanup(pool: &PgPool, product_id: i32) {
    // Size rows cascade
    let _ = sqlx::query("DELETE FROM store.product WHERE id = $1")
        .bind(product_id)
        .execute(pool)
        .await;
}

/// The decrement used at checkout: succeeds only while stock covers it.
async fn try_decrement(pool: &PgPool, product_id: i32, quantity: i32) -> bool {
    let result = sqlx::query(
        "UPDATE store.product_size SET stock = stock - $3 \
         WHERE product_id = $1 AND size = $2 AND stock >= $3",
    )
    .bind(product_id)
    .bind("M")
    .bind(quantity)
    .execute(pool)
    .await
    .expect("Decrement query failed");

    result.rows_affected() > 0
}

async fn current_stock(pool: &PgPool, product_id: i32) -> i32 {
    let (stock,): (i32,) =
        sqlx::query_as("SELECT stock FROM store.product_size WHERE product_id = $1")
            .bind(product_id)
            .fetch_one(pool)
            .await
            .expect("Failed to read stock");
    stock
}

#[tokio::test]
#[ignore = "Requires migrated database via DATABASE_URL"]
async fn test_decrement_stops_at_zero() {
    let pool = pool().await;
    let product_id = insert_product_with_stock(&pool, 2).await;

    assert!(try_decrement(&pool, product_id, 1).await);
    assert!(try_decrement(&pool, product_id, 1).await);
    assert!(!try_decrement(&pool, product_id, 1).await);
    assert_eq!(current_stock(&pool, product_id).await, 0);

    cleanup(&pool, product_id).await;
}

#[tokio::test]
#[ignore = "Requires migrated database via DATABASE_URL"]
async fn test_decrement_rejects_oversized_quantity() {
    let pool = pool().await;
    let product_id = insert_product_with_stock(&pool, 3).await;

    assert!(!try_decrement(&pool, product_id, 4).await);
    assert_eq!(current_stock(&pool, product_id).await, 3);

    cleanup(&pool, product_id).await;
}

#[tokio::test]
#[ignore = "Requires migrated database via DATABASE_URL"]
async fn test_concurrent_decrements_never_oversell() {
    let pool = pool().await;
    let product_id = insert_product_with_stock(&pool, 5).await;

    let mut handles = Vec::new();
    for _ in 0..20 {
        let pool = pool.clone();
        handles.push(tokio::spawn(async move {
            try_decrement(&pool, product_id, 1).await
        }));
    }

    let mut successes = 0;
    for handle in handles {
        if handle.await.expect("Task panicked") {
            successes += 1;
        }
    }

    assert_eq!(successes, 5);
    assert_eq!(current_stock(&pool, product_id).await, 0);

    cleanup(&pool, product_id).await;
}
