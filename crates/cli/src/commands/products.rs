//! Catalog browsing and product detail commands.

use bazaar_core::{Product, ProductId, ProductPatch};
use bazaar_storefront::api::ApiError;
use bazaar_storefront::services::ProductFilter;

use crate::App;

/// List products, optionally filtered by a search term or a category.
/// The two filters are mutually exclusive (clap enforces it on the flags,
/// the service enforces it by construction).
pub async fn list(app: &App, search: Option<String>, category: Option<String>) {
    let filter = match (search, category) {
        (Some(query), _) => ProductFilter::Search(query),
        (None, Some(slug)) => ProductFilter::Category(slug),
        (None, None) => ProductFilter::All,
    };

    app.catalog.fetch_products(&filter).await;

    let snapshot = app.catalog.snapshot();
    if let Some(message) = snapshot.error {
        println!("{message}");
        return;
    }

    if snapshot.products.is_empty() {
        println!("No products found");
        return;
    }

    for product in &snapshot.products {
        println!(
            "{:>5}  {:<40} {:>8.2}  {}",
            product.id, product.title, product.price, product.category
        );
    }
    println!("{} product(s)", snapshot.products.len());
}

/// Show a single product's details.
pub async fn show(app: &App, id: ProductId) -> Result<(), Box<dyn std::error::Error>> {
    let product = match app.catalog.product(id).await {
        Ok(product) => product,
        Err(ApiError::NotFound(_)) => {
            println!("Product not found");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    print_detail(&product);
    Ok(())
}

/// Submit an edit back to the remote catalog.
pub async fn edit(
    app: &App,
    id: ProductId,
    patch: ProductPatch,
    replace: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if patch.is_empty() {
        println!("Nothing to edit; pass at least one field flag");
        return Ok(());
    }

    let result = if replace {
        app.catalog.replace_product(id, &patch).await
    } else {
        app.catalog.update_product(id, &patch).await
    };

    match result {
        Ok(product) => {
            println!("Product updated successfully!");
            print_detail(&product);
            Ok(())
        }
        Err(e) => {
            println!("Failed to update product");
            Err(e.into())
        }
    }
}

/// Delete a product from the remote catalog.
pub async fn delete(app: &App, id: ProductId) -> Result<(), Box<dyn std::error::Error>> {
    match app.catalog.delete_product(id).await {
        Ok(product) => {
            println!("Product deleted successfully: {} ({})", product.title, id);
            Ok(())
        }
        Err(e) => {
            println!("Failed to delete product");
            Err(e.into())
        }
    }
}

/// List category slugs.
pub async fn categories(app: &App) {
    app.catalog.fetch_categories().await;

    let snapshot = app.catalog.snapshot();
    if let Some(message) = snapshot.error {
        println!("{message}");
        return;
    }

    for slug in &snapshot.categories {
        println!("{slug}");
    }
}

fn print_detail(product: &Product) {
    println!("{} (#{})", product.title, product.id);
    println!("  category:  {}", product.category);
    if let Some(brand) = &product.brand {
        println!("  brand:     {brand}");
    }
    println!(
        "  price:     {:.2} ({:.0}% off)",
        product.price, product.discount_percentage
    );
    println!(
        "  rating:    {:.2} ({} review(s))",
        product.rating,
        product.reviews.len()
    );
    println!("  stock:     {} ({})", product.stock, product.availability_status);
    if !product.description.is_empty() {
        println!("  {}", product.description);
    }
}
