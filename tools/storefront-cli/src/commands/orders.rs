//! Order history commands.

use anyhow::Result;
use storefront_commerce::checkout::OrderSummary;
use storefront_commerce::ids::OrderId;
use storefront_commerce::Currency;
use storefront_data::OrderService;

use super::{OrdersArgs, OrdersCommand};
use crate::context::Context;
use crate::output::status_badge;

/// Run the orders command.
pub async fn run(args: OrdersArgs, ctx: &Context) -> Result<()> {
    match args.command.unwrap_or(OrdersCommand::List) {
        OrdersCommand::List => list_orders(ctx).await,
        OrdersCommand::Show { id } => show_order(id, ctx).await,
    }
}

async fn list_orders(ctx: &Context) -> Result<()> {
    let backend = ctx.backend()?;
    let spinner = ctx.output.spinner("Loading orders...");
    let orders = backend.orders.orders().await;
    spinner.finish_and_clear();
    let mut orders = orders?;

    if ctx.output.is_json() {
        ctx.output.json(&orders);
        return Ok(());
    }

    ctx.output.header("Orders");
    if orders.is_empty() {
        ctx.output.info("No orders yet.");
        return Ok(());
    }

    // Newest first
    orders.sort_by(|a, b| b.id.cmp(&a.id));

    let currency = ctx.config.pricing.currency;
    let widths = [8, 26, 6, 12, 12];
    ctx.output
        .table_row(&["ORDER", "DATE", "ITEMS", "TOTAL", "STATUS"], &widths);
    for order in &orders {
        let id = order.id.to_string();
        let items = order.item_count().to_string();
        let total = currency.format(order.price);
        let status = status_badge(order.status);
        ctx.output.table_row(
            &[&id, order.order_date.as_deref().unwrap_or("-"), &items, &total, &status],
            &widths,
        );
    }

    ctx.output.info("");
    ctx.output.info(&format!("Total: {} order(s)", orders.len()));
    Ok(())
}

async fn show_order(id: u64, ctx: &Context) -> Result<()> {
    let backend = ctx.backend()?;
    let spinner = ctx.output.spinner("Loading order...");
    let order = backend.orders.order(OrderId::new(id)).await;
    spinner.finish_and_clear();
    let order = order?;

    if ctx.output.is_json() {
        ctx.output.json(&order);
        return Ok(());
    }

    print_order(ctx, &order, ctx.config.pricing.currency);
    Ok(())
}

fn print_order(ctx: &Context, order: &OrderSummary, currency: Currency) {
    ctx.output.header(&format!("Order #{}", order.id));
    ctx.output.kv("Status", &status_badge(order.status));
    ctx.output
        .kv("Date", order.order_date.as_deref().unwrap_or("-"));
    ctx.output.kv("Total", &currency.format(order.price));
    if let Some(address_id) = order.address_id {
        ctx.output.kv("Address", &format!("#{}", address_id));
    }

    ctx.output.info("");
    for line in &order.products {
        let detail = line
            .detail
            .clone()
            .unwrap_or_else(|| format!("Product #{}", line.product_id));
        ctx.output.list_item(&format!("{} x {}", line.count, detail));
    }
}
