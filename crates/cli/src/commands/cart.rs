//! Cart commands.
//!
//! Each invocation restores the cached session, drives the cart state
//! machine for that user (fetching their remote cart), and then applies the
//! requested mutation. Without a session, cart commands point at `login`
//! instead of failing with an error trace.

use bazaar_core::{Cart, ProductId};

use crate::App;

const LOGIN_HINT: &str = "You are not logged in. Run `bazaar login` first.";

/// Restore the session and load the user's cart. Returns `false` (after
/// printing the login hint) when no session exists.
async fn ensure_user(app: &App) -> Result<bool, Box<dyn std::error::Error>> {
    let user = app.session.restore()?;
    let user_id = user.map(|u| u.id);
    app.cart.handle_user_change(user_id).await;

    if user_id.is_none() {
        println!("{LOGIN_HINT}");
        return Ok(false);
    }
    Ok(true)
}

/// Show the cart's line items and totals.
pub async fn show(app: &App) -> Result<(), Box<dyn std::error::Error>> {
    if !ensure_user(app).await? {
        return Ok(());
    }

    match app.cart.cart() {
        Some(cart) => print_cart(&cart),
        None => println!("Could not load your cart; try again."),
    }
    Ok(())
}

/// Add one unit of a product to the cart.
pub async fn add(app: &App, product_id: ProductId) -> Result<(), Box<dyn std::error::Error>> {
    if !ensure_user(app).await? {
        return Ok(());
    }

    let product = app.catalog.product(product_id).await?;

    if app.cart.add_to_cart(&product).await {
        println!("Added {} to your cart", product.title);
        if let Some(cart) = app.cart.cart() {
            print_cart(&cart);
        }
    } else {
        // Session vanished between restore and add.
        println!("{LOGIN_HINT}");
    }
    Ok(())
}

/// Remove a product's line item.
pub async fn remove(app: &App, product_id: ProductId) -> Result<(), Box<dyn std::error::Error>> {
    if !ensure_user(app).await? {
        return Ok(());
    }

    app.cart.remove_from_cart(product_id).await;
    if let Some(cart) = app.cart.cart() {
        print_cart(&cart);
    }
    Ok(())
}

/// Set a line item's quantity; zero removes the line.
pub async fn set_quantity(
    app: &App,
    product_id: ProductId,
    quantity: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    if !ensure_user(app).await? {
        return Ok(());
    }

    app.cart.update_quantity(product_id, quantity).await;
    if let Some(cart) = app.cart.cart() {
        print_cart(&cart);
    }
    Ok(())
}

/// Empty the cart.
pub async fn clear(app: &App) -> Result<(), Box<dyn std::error::Error>> {
    if !ensure_user(app).await? {
        return Ok(());
    }

    app.cart.clear_cart().await;
    println!("Cart cleared");
    Ok(())
}

fn print_cart(cart: &Cart) {
    if cart.is_empty() {
        println!("Your cart is empty");
        return;
    }

    for line in &cart.products {
        println!(
            "{:>5}  {:<40} x{:<3} {:>8.2}  (after discount {:>8.2})",
            line.id, line.title, line.quantity, line.total, line.discounted_total
        );
    }
    println!(
        "{} item(s), {} product line(s): total {:.2}, after discounts {:.2}",
        cart.total_quantity, cart.total_products, cart.total, cart.discounted_total
    );
}
