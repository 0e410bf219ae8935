//! Cart and line-item types with pure aggregate recomputation.
//!
//! The cart's four aggregate fields (`total`, `discounted_total`,
//! `total_products`, `total_quantity`) are never patched incrementally:
//! every mutation rebuilds them from the line-item list through
//! [`Cart::from_lines`]. That single choke point is what keeps the
//! aggregates consistent with the lines after every operation.

use serde::{Deserialize, Serialize};

use super::id::{CartId, ProductId, UserId};
use super::product::Product;

/// A product-quantity pairing inside a cart, carrying its own subtotals.
///
/// `total = price * quantity` and
/// `discounted_total = total * (1 - discount_percentage / 100)`.
/// A line always has `quantity >= 1`; a quantity that would drop to zero
/// removes the line from the cart instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Product ID this line refers to.
    pub id: ProductId,
    #[serde(default)]
    pub title: String,
    /// Unit price.
    pub price: f64,
    /// Percentage discount on the unit price (0-100).
    #[serde(default)]
    pub discount_percentage: f64,
    #[serde(default)]
    pub thumbnail: String,
    /// Units of this product in the cart.
    pub quantity: u32,
    /// Line subtotal before discount.
    pub total: f64,
    /// Line subtotal after discount.
    pub discounted_total: f64,
}

impl CartLine {
    /// Create a line for `product` with the given quantity, computing both
    /// subtotals.
    #[must_use]
    pub fn new(product: &Product, quantity: u32) -> Self {
        let mut line = Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            discount_percentage: product.discount_percentage,
            thumbnail: product.thumbnail.clone(),
            quantity,
            total: 0.0,
            discounted_total: 0.0,
        };
        line.recompute();
        line
    }

    /// Set the quantity and recompute both subtotals from it.
    pub const fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
        self.recompute();
    }

    #[allow(clippy::cast_precision_loss)] // Quantities never exceed f64 precision
    const fn recompute(&mut self) {
        self.total = self.price * self.quantity as f64;
        self.discounted_total = self.total * (1.0 - self.discount_percentage / 100.0);
    }
}

/// A user's shopping cart with derived totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Cart ID assigned by the remote API.
    pub id: CartId,
    /// Owner of the cart.
    pub user_id: UserId,
    /// Line items.
    pub products: Vec<CartLine>,
    /// Sum of line totals.
    pub total: f64,
    /// Sum of line discounted totals.
    pub discounted_total: f64,
    /// Number of distinct line items.
    pub total_products: usize,
    /// Sum of line quantities.
    pub total_quantity: u32,
}

impl Cart {
    /// Default cart ID when the remote API has not assigned one yet.
    const LOCAL_CART_ID: CartId = CartId::new(1);

    /// Rebuild a cart's aggregates from its line-item list.
    ///
    /// This is the only constructor mutations go through, so the aggregate
    /// fields always agree with `products`.
    #[must_use]
    pub fn from_lines(id: CartId, user_id: UserId, products: Vec<CartLine>) -> Self {
        let total = products.iter().map(|line| line.total).sum();
        let discounted_total = products.iter().map(|line| line.discounted_total).sum();
        let total_products = products.len();
        let total_quantity = products.iter().map(|line| line.quantity).sum();

        Self {
            id,
            user_id,
            products,
            total,
            discounted_total,
            total_products,
            total_quantity,
        }
    }

    /// An empty cart for a user with no cart on the remote API yet.
    #[must_use]
    pub fn empty(user_id: UserId) -> Self {
        Self::from_lines(Self::LOCAL_CART_ID, user_id, Vec::new())
    }

    /// The line item for a product, if present.
    #[must_use]
    pub fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.products.iter().find(|line| line.id == id)
    }

    /// Whether the cart has no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: i64, price: f64, discount: f64) -> Product {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": format!("Product {id}"),
            "price": price,
            "discountPercentage": discount,
        }))
        .unwrap()
    }

    #[test]
    fn test_line_without_discount() {
        let line = CartLine::new(&product(1, 10.0, 0.0), 1);
        assert_eq!(line.quantity, 1);
        assert!((line.total - 10.0).abs() < 1e-9);
        assert!((line.discounted_total - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_line_discount_math() {
        // 20% off 50 at quantity 3: total 150, discounted 120.
        let line = CartLine::new(&product(7, 50.0, 20.0), 3);
        assert!((line.total - 150.0).abs() < 1e-9);
        assert!((line.discounted_total - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_set_quantity_recomputes_subtotals() {
        let mut line = CartLine::new(&product(2, 9.99, 10.0), 1);
        line.set_quantity(4);
        assert!((line.total - 39.96).abs() < 1e-9);
        assert!((line.discounted_total - 39.96 * 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_aggregates_are_sums_over_lines() {
        let lines = vec![
            CartLine::new(&product(1, 10.0, 0.0), 2),
            CartLine::new(&product(2, 50.0, 20.0), 3),
            CartLine::new(&product(3, 3.5, 50.0), 1),
        ];
        let cart = Cart::from_lines(CartId::new(4), UserId::new(10), lines.clone());

        let total: f64 = lines.iter().map(|l| l.total).sum();
        let discounted: f64 = lines.iter().map(|l| l.discounted_total).sum();
        let quantity: u32 = lines.iter().map(|l| l.quantity).sum();

        assert!((cart.total - total).abs() < 1e-9);
        assert!((cart.discounted_total - discounted).abs() < 1e-9);
        assert_eq!(cart.total_products, lines.len());
        assert_eq!(cart.total_quantity, quantity);
    }

    #[test]
    fn test_empty_cart_zeroes_aggregates_and_keeps_owner() {
        let cart = Cart::empty(UserId::new(5));
        assert_eq!(cart.user_id, UserId::new(5));
        assert!(cart.is_empty());
        assert!(cart.total.abs() < f64::EPSILON);
        assert!(cart.discounted_total.abs() < f64::EPSILON);
        assert_eq!(cart.total_products, 0);
        assert_eq!(cart.total_quantity, 0);
    }

    #[test]
    fn test_cart_deserializes_remote_envelope_entry() {
        // GET /carts/user/{id} carries slimmer line entries than the full
        // product shape; the aggregate constructor must accept them as-is.
        let cart: Cart = serde_json::from_value(serde_json::json!({
            "id": 19,
            "userId": 5,
            "products": [{
                "id": 144,
                "title": "Cricket Helmet",
                "price": 44.99,
                "quantity": 4,
                "total": 179.96,
                "discountPercentage": 11.47,
                "discountedTotal": 159.32,
                "thumbnail": "https://cdn.example.com/helmet.png"
            }],
            "total": 179.96,
            "discountedTotal": 159.32,
            "totalProducts": 1,
            "totalQuantity": 4
        }))
        .unwrap();

        assert_eq!(cart.id, CartId::new(19));
        let rebuilt = Cart::from_lines(cart.id, cart.user_id, cart.products.clone());
        assert!((rebuilt.total - 179.96).abs() < 1e-9);
        assert_eq!(rebuilt.total_quantity, 4);
    }

    #[test]
    fn test_line_lookup() {
        let cart = Cart::from_lines(
            CartId::new(1),
            UserId::new(1),
            vec![CartLine::new(&product(9, 2.0, 0.0), 1)],
        );
        assert!(cart.line(ProductId::new(9)).is_some());
        assert!(cart.line(ProductId::new(10)).is_none());
    }
}
