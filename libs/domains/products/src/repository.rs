use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{Page, PageRequest, Product, SortDirection, SortOrder, SortProperty};

/// Repository trait for Product persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Look up a product by its serial number
    async fn find_by_serial_number(&self, serial_number: &str) -> ProductResult<Option<Product>>;

    /// Insert when `id` is `None`, otherwise overwrite the stored row.
    /// Returns the product with `id` populated.
    async fn save(&self, product: Product) -> ProductResult<Product>;

    /// One page of products, ordered by the request's sort or by `id`
    async fn find_all(&self, page_request: PageRequest) -> ProductResult<Page<Product>>;

    /// Remove a stored product
    async fn delete(&self, product: Product) -> ProductResult<()>;
}

#[derive(Debug, Default)]
struct Store {
    products: BTreeMap<i64, Product>,
    next_id: i64,
}

/// In-memory implementation of ProductRepository (for development/testing).
///
/// Enforces serial number uniqueness the same way the database index does.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.products.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn compare(a: &Product, b: &Product, order: &SortOrder) -> Ordering {
    let ordering = match order.property {
        SortProperty::Id => a.id.cmp(&b.id),
        SortProperty::Name => a.name.cmp(&b.name),
        SortProperty::SerialNumber => a.serial_number.cmp(&b.serial_number),
        SortProperty::Price => a.price.cmp(&b.price),
        SortProperty::Quantity => a.quantity.cmp(&b.quantity),
    };

    match order.direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_serial_number(&self, serial_number: &str) -> ProductResult<Option<Product>> {
        let store = self.store.read().await;
        Ok(store
            .products
            .values()
            .find(|p| p.serial_number == serial_number)
            .cloned())
    }

    async fn save(&self, mut product: Product) -> ProductResult<Product> {
        let mut store = self.store.write().await;

        let duplicate = store
            .products
            .values()
            .any(|p| p.serial_number == product.serial_number && p.id != product.id);
        if duplicate {
            return Err(ProductError::Internal(format!(
                "duplicate key value violates unique constraint on serial_number '{}'",
                product.serial_number
            )));
        }

        let id = match product.id {
            Some(id) => id,
            None => {
                store.next_id += 1;
                store.next_id
            }
        };
        product.id = Some(id);
        store.products.insert(id, product.clone());

        Ok(product)
    }

    async fn find_all(&self, page_request: PageRequest) -> ProductResult<Page<Product>> {
        let order = page_request.sort_order()?;
        let page = page_request.page();
        let size = page_request.size();

        let store = self.store.read().await;

        // BTreeMap iteration is already id ascending; the sort is stable.
        let mut products: Vec<Product> = store.products.values().cloned().collect();
        if let Some(order) = order {
            products.sort_by(|a, b| compare(a, b, &order));
        }

        let total = products.len() as u64;
        let content = products
            .into_iter()
            .skip(page.saturating_mul(size) as usize)
            .take(size as usize)
            .collect();

        Ok(Page::new(content, page, size, total))
    }

    async fn delete(&self, product: Product) -> ProductResult<()> {
        if let Some(id) = product.id {
            self.store.write().await.products.remove(&id);
        }
        Ok(())
    }
}
