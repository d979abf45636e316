use std::sync::Arc;
use tracing::{error, info, instrument};
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::locks::SerialLocks;
use crate::models::{PageRequest, PageableResult, Product, ProductRequest, ProductResponse};
use crate::repository::ProductRepository;

/// Product lifecycle rules on top of a [`ProductRepository`].
///
/// Mutations on the same serial number are serialized in-process; the
/// unique index on `serial_number` covers writers in other processes.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
    locks: Arc<SerialLocks>,
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            locks: Arc::clone(&self.locks),
        }
    }
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
            locks: Arc::new(SerialLocks::default()),
        }
    }

    /// Insert a product, or add `request.quantity` to the stock of the
    /// product already stored under the same serial number. The stored
    /// name and price are kept in that case.
    #[instrument(skip(self, request), fields(serial_number = %request.serial_number))]
    pub async fn insert(&self, request: ProductRequest) -> ProductResult<ProductResponse> {
        request
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        let _guard = self.locks.acquire(&[request.serial_number.as_str()]).await;

        match self
            .repository
            .find_by_serial_number(&request.serial_number)
            .await?
        {
            Some(mut product) => {
                info!(
                    product = %request.name,
                    current_quantity = product.quantity,
                    "Product already stored, accumulating stock"
                );

                product.quantity = product
                    .quantity
                    .checked_add(request.quantity)
                    .ok_or_else(|| {
                        ProductError::Validation(format!(
                            "Stock for serialNumber '{}' would exceed {}",
                            request.serial_number,
                            i32::MAX
                        ))
                    })?;

                info!(
                    product = %request.name,
                    quantity = product.quantity,
                    "Product stock updated"
                );
                self.save_and_map(product).await
            }
            None => {
                let product = Product::from(request);
                info!(
                    product = %product.name,
                    quantity = product.quantity,
                    "Product units inserted"
                );
                self.save_and_map(product).await
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn find_by_serial_number(&self, serial_number: &str) -> ProductResult<ProductResponse> {
        info!("Searching product");

        let product = self.get_or_fail(serial_number).await?;

        info!(product = %product.name, "Product found");
        Ok(product.into())
    }

    #[instrument(skip(self, page_request), fields(page = page_request.page(), size = page_request.size()))]
    pub async fn find_all(&self, page_request: PageRequest) -> ProductResult<PageableResult> {
        info!("Fetching product page");

        let page = self.repository.find_all(page_request).await?;

        info!(
            total_records = page.total_elements,
            total_pages = page.total_pages(),
            "Product page fetched"
        );
        Ok(page.into())
    }

    /// Overwrite name, serial number and price. Quantity is kept as stored;
    /// stock only changes through [`insert`](Self::insert).
    #[instrument(skip(self, request), fields(new_serial_number = %request.serial_number))]
    pub async fn update_by_serial_number(
        &self,
        serial_number: &str,
        request: ProductRequest,
    ) -> ProductResult<ProductResponse> {
        request
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        let _guard = self
            .locks
            .acquire(&[serial_number, request.serial_number.as_str()])
            .await;

        info!("Searching product to update");
        let mut product = self.get_or_fail(serial_number).await?;

        product.name = request.name;
        product.serial_number = request.serial_number;
        product.price = request.price;

        let response = self.save_and_map(product).await?;
        info!(product = %response.name, "Product updated");
        Ok(response)
    }

    #[instrument(skip(self))]
    pub async fn delete_by_serial_number(&self, serial_number: &str) -> ProductResult<()> {
        let _guard = self.locks.acquire(&[serial_number]).await;

        info!("Searching product to delete");
        let product = self.get_or_fail(serial_number).await?;
        let name = product.name.clone();

        self.repository.delete(product).await?;

        info!(product = %name, "Product deleted");
        Ok(())
    }

    async fn get_or_fail(&self, serial_number: &str) -> ProductResult<Product> {
        self.repository
            .find_by_serial_number(serial_number)
            .await?
            .ok_or_else(|| {
                error!(serial_number, "Product not found");
                ProductError::not_found()
            })
    }

    async fn save_and_map(&self, product: Product) -> ProductResult<ProductResponse> {
        let saved = self.repository.save(product).await?;
        Ok(saved.into())
    }
}
