//! Catalog browsing commands.

use fashionhub_core::ProductId;
use fashionhub_storefront::browse::{BrowsePage, BrowseState, category_stats};
use fashionhub_storefront::config::StorefrontConfig;
use fashionhub_storefront::search::PriceRange;
use fashionhub_storefront::shop::CatalogClient;
use fashionhub_storefront::shop::types::Product;

use crate::commands::CliError;

fn catalog_client() -> Result<CatalogClient, CliError> {
    let config = StorefrontConfig::from_env()?;
    Ok(CatalogClient::new(&config.api)?)
}

/// `fashionhub browse` - fetch, filter, and list products.
pub async fn browse(
    category: Option<String>,
    brand: Option<String>,
    price: Option<String>,
    search: Option<String>,
    id: Option<String>,
) -> Result<(), CliError> {
    let price = match price.as_deref() {
        None => PriceRange::Any,
        Some(raw) => PriceRange::parse(raw).ok_or_else(|| {
            CliError::InvalidArgument(format!(
                "price range '{raw}' (expected e.g. 500-1000, 5000+, or all)"
            ))
        })?,
    };

    let catalog = catalog_client()?;
    let page = BrowsePage::load(&catalog).await;

    let mut state = BrowseState::new(page.products);
    state.criteria.category = category;
    state.criteria.brand = brand;
    state.criteria.price = price;
    state.criteria.search_term = search.unwrap_or_default();
    state.criteria.product_id_query = id.unwrap_or_default();

    let results = state.apply();

    println!(
        "Showing {} of {} products",
        results.len(),
        state.all_products().len()
    );
    if !page.brands.is_empty() {
        println!("Brands: {}", page.brands.join(", "));
    }
    println!();

    if results.is_empty() {
        println!("No products found. Try adjusting your filters.");
        return Ok(());
    }

    for product in &results {
        print_product_line(product);
    }

    Ok(())
}

/// `fashionhub product <id>` - show one product in detail.
pub async fn product(product_id: &str) -> Result<(), CliError> {
    let catalog = catalog_client()?;
    let product = catalog.get_product(&ProductId::new(product_id)).await?;

    println!("{} [{}]", product.product_name, product.product_id);
    if product.discounted() {
        let original = product.original_price.unwrap_or(product.price);
        println!(
            "Price: {} (was {}, {}% off)",
            product.price, original, product.discount_percent
        );
    } else {
        println!("Price: {}", product.price);
    }

    if let Some(brand) = &product.brand {
        println!("Brand: {brand}");
    }
    if let Some(category) = &product.category_name {
        println!("Category: {category}");
    }
    if !product.sizes.is_empty() {
        println!("Sizes: {}", product.sizes.join(", "));
    }
    if product.in_stock() {
        println!("In stock: {} items", product.quantity_in_stock);
    } else {
        println!("Out of stock");
    }
    if !product.description.is_empty() {
        println!("\n{}", product.description);
    }
    for offer in &product.offers {
        println!("  * {offer}");
    }

    Ok(())
}

/// `fashionhub categories` - list categories with per-category stats.
pub async fn categories() -> Result<(), CliError> {
    let catalog = catalog_client()?;
    let page = BrowsePage::load(&catalog).await;

    if page.categories.is_empty() {
        println!("No categories available.");
        return Ok(());
    }

    let stats = category_stats(&page.products);

    for category in &page.categories {
        let stat = stats
            .iter()
            .find(|s| s.category_name == category.category_name);
        let (count, discount) =
            stat.map_or((0, 0), |s| (s.product_count, s.avg_discount_percent));
        println!(
            "{:<12} {:>3} products, avg {discount}% off  - {}",
            category.category_name, count, category.description
        );
    }

    Ok(())
}

fn print_product_line(product: &Product) {
    let brand = product.brand.as_deref().unwrap_or("-");
    let stock = if product.in_stock() { "" } else { "  [out of stock]" };
    println!(
        "{:<6} {:<30} {:<10} {:>8}{stock}",
        product.product_id.to_string(),
        product.product_name,
        brand,
        product.price
    );
}
