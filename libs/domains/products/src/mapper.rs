//! Conversions between stored products and the wire types.

use crate::models::{Page, PageableResult, Product, ProductRequest, ProductResponse};

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            name: product.name,
            serial_number: product.serial_number,
            price: product.price,
            quantity: product.quantity,
        }
    }
}

impl From<ProductRequest> for Product {
    fn from(request: ProductRequest) -> Self {
        Self {
            id: None,
            name: request.name,
            serial_number: request.serial_number,
            price: request.price,
            quantity: request.quantity,
        }
    }
}

impl From<ProductResponse> for ProductRequest {
    fn from(response: ProductResponse) -> Self {
        Self {
            name: response.name,
            serial_number: response.serial_number,
            price: response.price,
            quantity: response.quantity,
        }
    }
}

impl From<Page<Product>> for PageableResult {
    fn from(page: Page<Product>) -> Self {
        Self {
            page_number: page.number,
            total_pages: page.total_pages(),
            total_records: page.total_elements,
            first_page: page.is_first(),
            last_page: page.is_last(),
            content: page.content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn stored() -> Product {
        Product {
            id: Some(7),
            name: "Cable".to_string(),
            serial_number: "S1".to_string(),
            price: Decimal::new(1000, 2),
            quantity: 5,
        }
    }

    #[test]
    fn test_response_drops_id() {
        let response = ProductResponse::from(stored());
        assert_eq!(response.name, "Cable");
        assert_eq!(response.serial_number, "S1");
        assert_eq!(response.price, Decimal::new(1000, 2));
        assert_eq!(response.quantity, 5);
    }

    #[test]
    fn test_request_leaves_id_unset() {
        let product = Product::from(ProductRequest {
            name: "Cable".to_string(),
            serial_number: "S1".to_string(),
            price: Decimal::new(1000, 2),
            quantity: 5,
        });
        assert_eq!(product.id, None);
        assert_eq!(product.quantity, 5);
    }

    #[test]
    fn test_round_trip_preserves_business_fields() {
        let original = stored();
        let back = Product::from(ProductRequest::from(ProductResponse::from(original.clone())));

        assert_eq!(back.name, original.name);
        assert_eq!(back.serial_number, original.serial_number);
        assert_eq!(back.price, original.price);
        assert_eq!(back.quantity, original.quantity);
    }

    #[test]
    fn test_page_to_pageable_result() {
        let result = PageableResult::from(Page::new(vec![stored()], 1, 1, 3));
        assert_eq!(result.content, vec![stored()]);
        assert_eq!(result.page_number, 1);
        assert_eq!(result.total_pages, 3);
        assert_eq!(result.total_records, 3);
        assert!(!result.first_page);
        assert!(!result.last_page);
    }

    #[test]
    fn test_empty_page_to_pageable_result() {
        let result = PageableResult::from(Page::<Product>::new(vec![], 0, 20, 0));
        assert!(result.content.is_empty());
        assert_eq!(result.total_records, 0);
        assert_eq!(result.total_pages, 0);
        assert!(result.first_page);
        assert!(result.last_page);
    }
}
