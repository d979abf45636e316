//! Integration tests for Products domain
//!
//! These tests use real PostgreSQL via testcontainers to ensure:
//! - The migration and the entity agree on the schema
//! - The unique index on serial_number is enforced
//! - Pagination and sorting run in SQL the way the in-memory repository does
//! - Concurrent inserts of one serial accumulate into a single row

use domain_products::*;
use rust_decimal::Decimal;
use test_utils::{TestDataBuilder, TestDatabase};

fn request(builder: &TestDataBuilder, suffix: &str, price: Decimal, quantity: i32) -> ProductRequest {
    ProductRequest {
        name: builder.name("product", suffix),
        serial_number: builder.serial_number(suffix),
        price,
        quantity,
    }
}

// ============================================================================
// Repository Tests
// ============================================================================

#[tokio::test]
async fn test_save_and_find_by_serial_number() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("save_and_find");

    let product = Product::from(request(&builder, "main", Decimal::new(1999, 2), 4));
    let saved = repo.save(product.clone()).await.unwrap();
    assert!(saved.id.is_some());

    let found = repo
        .find_by_serial_number(&product.serial_number)
        .await
        .unwrap()
        .expect("product should exist");

    assert_eq!(found.id, saved.id);
    assert_eq!(found.name, product.name);
    assert_eq!(found.price, Decimal::new(1999, 2));
    assert_eq!(found.quantity, 4);
}

#[tokio::test]
async fn test_duplicate_serial_number_is_rejected() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("duplicate_serial");

    let product = Product::from(request(&builder, "dup", Decimal::ONE, 1));
    repo.save(product.clone()).await.unwrap();

    let result = repo.save(product).await;
    assert!(
        matches!(result, Err(ProductError::Database(_))),
        "unique index should reject the second row"
    );
}

#[tokio::test]
async fn test_find_all_paginates_and_sorts() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("paginate");

    for (i, price) in [300, 100, 200, 500, 400].into_iter().enumerate() {
        let product = Product::from(request(&builder, &format!("p{i}"), Decimal::new(price, 2), 1));
        repo.save(product).await.unwrap();
    }

    let page = repo.find_all(PageRequest::new(1, 2)).await.unwrap();
    assert_eq!(page.total_elements, 5);
    assert_eq!(page.total_pages(), 3);
    assert_eq!(page.content.len(), 2);
    assert_eq!(page.content[0].serial_number, builder.serial_number("p2"));

    let page = repo
        .find_all(PageRequest::new(0, 2).with_sort("price,desc"))
        .await
        .unwrap();
    let prices: Vec<_> = page.content.iter().map(|p| p.price).collect();
    assert_eq!(prices, vec![Decimal::new(500, 2), Decimal::new(400, 2)]);
}

#[tokio::test]
async fn test_find_all_far_page_is_empty() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("far_page");

    repo.save(Product::from(request(&builder, "only", Decimal::ONE, 1)))
        .await
        .unwrap();

    let page = repo
        .find_all(PageRequest::new(u64::MAX, PageRequest::MAX_SIZE))
        .await
        .unwrap();
    assert!(page.content.is_empty());
    assert_eq!(page.number, PageRequest::MAX_PAGE);
    assert_eq!(page.total_elements, 1);
    assert!(page.is_last());
}

#[tokio::test]
async fn test_delete_removes_row() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("delete_row");

    let saved = repo
        .save(Product::from(request(&builder, "gone", Decimal::ONE, 1)))
        .await
        .unwrap();
    let serial = saved.serial_number.clone();

    repo.delete(saved).await.unwrap();

    assert!(repo.find_by_serial_number(&serial).await.unwrap().is_none());
}

// ============================================================================
// Service Tests
// ============================================================================

#[tokio::test]
async fn test_insert_accumulates_and_update_keeps_quantity() {
    let db = TestDatabase::new().await;
    let service = ProductService::new(PgProductRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("accumulate_update");

    let first = request(&builder, "main", Decimal::new(1000, 2), 5);
    let serial = first.serial_number.clone();
    service.insert(first).await.unwrap();

    let mut second = request(&builder, "main", Decimal::from(99), 3);
    second.name = "other name".to_string();
    let accumulated = service.insert(second).await.unwrap();
    assert_eq!(accumulated.quantity, 8);
    assert_eq!(accumulated.price, Decimal::new(1000, 2));

    let renamed = request(&builder, "renamed", Decimal::new(2500, 2), 100);
    let updated = service
        .update_by_serial_number(&serial, renamed.clone())
        .await
        .unwrap();
    assert_eq!(updated.serial_number, renamed.serial_number);
    assert_eq!(updated.quantity, 8);

    let err = service.find_by_serial_number(&serial).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_concurrent_inserts_single_row() {
    let db = TestDatabase::new().await;
    let service = ProductService::new(PgProductRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("concurrent_inserts");
    let serial = builder.serial_number("hot");

    let tasks: Vec<_> = (0..20)
        .map(|_| {
            let service = service.clone();
            let input = request(&builder, "hot", Decimal::ONE, 1);
            tokio::spawn(async move { service.insert(input).await })
        })
        .collect();

    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let stored = service.find_by_serial_number(&serial).await.unwrap();
    assert_eq!(stored.quantity, 20);

    let page = service.find_all(PageRequest::default()).await.unwrap();
    assert_eq!(page.total_records, 1);
}
