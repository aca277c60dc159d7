use crate::models::{Product, ProductFields};
use serde::{Deserialize, Serialize};

/// Query string of `GET /products`.
#[derive(Debug, Default, Deserialize)]
pub struct ListProductsParams {
    pub seller: Option<String>,
}

impl ListProductsParams {
    /// The seller to filter on. An empty value means no filter.
    pub fn seller_filter(&self) -> Option<&str> {
        self.seller.as_deref().filter(|s| !s.is_empty())
    }
}

/// A product as returned in `data`, with its id rendered as hex.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ProductResponse {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub fields: ProductFields,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.to_hex(),
            fields: product.fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn response_renders_hex_id_and_skips_unset_fields() {
        let product = Product::new(ProductFields {
            title: Some("Pen".to_string()),
            seller: Some("Acme".to_string()),
            price: Some(Some(2.0)),
            ..Default::default()
        });
        let id = product.id.to_hex();

        let value = serde_json::to_value(ProductResponse::from(product)).unwrap();
        assert_eq!(
            value,
            json!({ "_id": id, "title": "Pen", "seller": "Acme", "price": 2.0 })
        );
    }

    #[test]
    fn blank_seller_is_no_filter() {
        let params = ListProductsParams {
            seller: Some(String::new()),
        };
        assert_eq!(params.seller_filter(), None);

        let params = ListProductsParams {
            seller: Some("Acme".to_string()),
        };
        assert_eq!(params.seller_filter(), Some("Acme"));
    }
}
