//! Catalog product types.
//!
//! These mirror the remote catalog's wire shapes. The client only ever holds
//! read-only copies; edits go back to the remote API as a [`ProductPatch`].

use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// Physical dimensions of a product.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

/// A customer review attached to a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Star rating given by the reviewer.
    pub rating: f64,
    /// Review text.
    #[serde(default)]
    pub comment: String,
    /// Review timestamp as sent by the remote API.
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub reviewer_name: String,
    #[serde(default)]
    pub reviewer_email: String,
}

/// Catalog metadata attached to a product.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductMeta {
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub barcode: String,
    #[serde(default)]
    pub qr_code: String,
}

/// A product in the remote catalog.
///
/// Fields the remote sometimes omits (e.g. `brand`) default rather than
/// failing deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product ID assigned by the remote catalog.
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    /// Unit price in the catalog's currency.
    pub price: f64,
    /// Percentage discount applied to the price (0-100).
    #[serde(default)]
    pub discount_percentage: f64,
    /// Average star rating.
    #[serde(default)]
    pub rating: f64,
    /// Units in stock.
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    #[serde(default)]
    pub warranty_information: String,
    #[serde(default)]
    pub shipping_information: String,
    #[serde(default)]
    pub availability_status: String,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub return_policy: String,
    #[serde(default)]
    pub minimum_order_quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ProductMeta>,
    /// Thumbnail image URL.
    #[serde(default)]
    pub thumbnail: String,
    /// Full-size image URLs.
    #[serde(default)]
    pub images: Vec<String>,
}

/// Partial product edit submitted back to the remote catalog.
///
/// Only the fields that are `Some` are serialized, so the same type serves
/// both `PATCH` (partial update) and `PUT` (replace with edited fields).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
}

impl ProductPatch {
    /// Whether the patch carries no edits at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.price.is_none()
            && self.discount_percentage.is_none()
            && self.stock.is_none()
    }
}
