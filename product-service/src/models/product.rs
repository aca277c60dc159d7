use mongodb::bson::{self, oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

/// A product as persisted in the `products` collection.
///
/// Every attribute except the id is optional and nothing is validated;
/// unset attributes are left out of the stored document entirely.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(flatten)]
    pub fields: ProductFields,
}

/// The mutable attributes of a product, used for both create and partial update.
///
/// `None` means "not supplied", which is distinct from `Some("")`. The
/// numeric attributes have a third state, `Some(None)`: supplied but blank
/// (`price=`), which is stored as null.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProductFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "nullable_number::deserialize"
    )]
    pub price: Option<Option<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "nullable_number::deserialize"
    )]
    pub rating: Option<Option<f64>>,
}

impl Product {
    /// Creates a product with a freshly generated id.
    pub fn new(fields: ProductFields) -> Self {
        Self {
            id: ObjectId::new(),
            fields,
        }
    }
}

impl ProductFields {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overwrites the attributes that are set in `update`, leaving the rest.
    pub fn apply(&mut self, update: &ProductFields) {
        fn merge<T: Clone>(target: &mut Option<T>, value: &Option<T>) {
            if let Some(v) = value {
                *target = Some(v.clone());
            }
        }

        merge(&mut self.title, &update.title);
        merge(&mut self.description, &update.description);
        merge(&mut self.seller, &update.seller);
        merge(&mut self.price, &update.price);
        merge(&mut self.image, &update.image);
        merge(&mut self.rating, &update.rating);
    }

    /// The `$set` body for a partial update: only supplied attributes appear.
    pub fn to_set_document(&self) -> Result<Document, bson::ser::Error> {
        bson::to_document(self)
    }
}

/// Casts a supplied number the way a form post arrives: numbers and numeric
/// strings are kept, blank strings and null become `Some(None)`, anything
/// else is an error.
mod nullable_number {
    use serde::de::{self, Deserializer, Visitor};
    use std::fmt;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Option<f64>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(NullableNumberVisitor).map(Some)
    }

    struct NullableNumberVisitor;

    impl<'de> Visitor<'de> for NullableNumberVisitor {
        type Value = Option<f64>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a number, a numeric string, an empty string or null")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v as f64))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v as f64))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            match trimmed.parse::<f64>() {
                Ok(n) if n.is_finite() => Ok(Some(n)),
                _ => Err(E::invalid_value(de::Unexpected::Str(v), &self)),
            }
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(self)
        }
    }
}
