//! Catalog browsing commands.

use anyhow::{anyhow, Result};
use storefront_commerce::catalog::{Product, ProductFilter, SortOrder};
use storefront_commerce::ids::{CategoryId, ProductId};
use storefront_commerce::Currency;
use storefront_data::Catalog;

use super::{ProductsArgs, ProductsCommand};
use crate::context::Context;

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    match args.command {
        Some(ProductsCommand::List) | None => list_products(&args, ctx).await,
        Some(ProductsCommand::Show { id }) => show_product(id, ctx).await,
        Some(ProductsCommand::Categories) => list_categories(ctx).await,
    }
}

/// Listing query from command-line flags.
fn filter_from(args: &ProductsArgs) -> Result<ProductFilter> {
    let sort = args
        .sort
        .as_deref()
        .map(|s| SortOrder::parse(s).ok_or_else(|| anyhow!("Unknown sort order '{}'", s)))
        .transpose()?;

    Ok(ProductFilter {
        category: args.category.map(CategoryId::new),
        text: args.filter.clone(),
        sort,
        limit: Some(args.limit),
        offset: args.offset,
    })
}

async fn list_products(args: &ProductsArgs, ctx: &Context) -> Result<()> {
    let filter = filter_from(args)?;
    let backend = ctx.backend()?;

    let spinner = ctx.output.spinner("Loading products...");
    let page = backend.catalog.products(&filter).await;
    spinner.finish_and_clear();
    let page = page?;

    if ctx.output.is_json() {
        ctx.output.json(&page);
        return Ok(());
    }

    ctx.output.header("Products");
    if page.products.is_empty() {
        ctx.output.info("No products match.");
        return Ok(());
    }

    let currency = ctx.config.pricing.currency;
    let widths = [8, 40, 12, 6];
    ctx.output
        .table_row(&["ID", "NAME", "PRICE", "STOCK"], &widths);
    for product in &page.products {
        let id = product.id.to_string();
        let stock = product.stock.to_string();
        ctx.output.table_row(
            &[&id, &product.name, &price_label(product, currency), &stock],
            &widths,
        );
    }

    ctx.output.info("");
    ctx.output.info(&format!(
        "Showing {} of {} product(s)",
        page.products.len(),
        page.total
    ));
    Ok(())
}

async fn show_product(id: u64, ctx: &Context) -> Result<()> {
    let backend = ctx.backend()?;
    let spinner = ctx.output.spinner("Loading product...");
    let product = backend.catalog.product(ProductId::new(id)).await;
    spinner.finish_and_clear();
    let product = product?;

    if ctx.output.is_json() {
        ctx.output.json(&product);
        return Ok(());
    }

    let currency = ctx.config.pricing.currency;
    ctx.output.header(&product.name);
    ctx.output.kv("ID", &product.id.to_string());
    ctx.output.kv("Price", &price_label(&product, currency));
    ctx.output.kv("Stock", &product.stock.to_string());
    if let Some(category) = &product.category {
        ctx.output.kv("Category", &category.name);
    }
    if let Some(rating) = product.rating {
        ctx.output.kv("Rating", &format!("{:.1}", rating));
    }
    if let Some(description) = &product.description {
        ctx.output.info("");
        ctx.output.info(description);
    }
    Ok(())
}

async fn list_categories(ctx: &Context) -> Result<()> {
    let backend = ctx.backend()?;
    let spinner = ctx.output.spinner("Loading categories...");
    let categories = backend.catalog.categories().await;
    spinner.finish_and_clear();
    let categories = categories?;

    if ctx.output.is_json() {
        ctx.output.json(&categories);
        return Ok(());
    }

    ctx.output.header("Categories");
    let widths = [6, 24, 10];
    ctx.output.table_row(&["ID", "TITLE", "DEPT"], &widths);
    for category in &categories {
        let id = category.id.to_string();
        ctx.output.table_row(
            &[&id, &category.title, category.gender.display_name()],
            &widths,
        );
    }
    Ok(())
}

/// `₺80.00 (was ₺120.00)` for discounted products.
fn price_label(product: &Product, currency: Currency) -> String {
    if product.is_discounted() {
        format!(
            "{} (was {})",
            currency.format(product.effective_price()),
            currency.format(product.price)
        )
    } else {
        currency.format(product.price)
    }
}
