//! Cart commands.

use anyhow::{Context as _, Result};
use serde::Serialize;
use souq_cache::KeyValueStore;
use souq_commerce::cart::{CartPricing, CartStore, ItemSelector, LineItem, LineKey};
use souq_commerce::catalog::find_product;
use souq_commerce::{OptionId, ProductId};

use super::{CartArgs, CartCommand};
use crate::context::Context;

const COLUMN_WIDTHS: [usize; 5] = [10, 28, 5, 16, 16];

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart()?;

    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => return show_cart(&cart, ctx),
        CartCommand::Add { id, qty, option } => {
            let products = ctx.load_catalog()?;
            let product = find_product(&products, id)?;
            if let Some(option) = option {
                product.require_option(option)?;
            }
            cart.add_to_cart(product, qty, option);
            ctx.output
                .success(&format!("Added {} × {}", qty, line_label(&product.name, option)));
        }
        CartCommand::Remove {
            id,
            option,
            all_variants,
        } => {
            cart.remove_from_cart(selector(id, option, all_variants));
            ctx.output.success(&format!("Removed product {}", id));
        }
        CartCommand::Update { id, qty, option } => {
            let label = line_label(&format!("Product {}", id), option);
            if !cart.is_in_cart(id, option) {
                ctx.output.warn(&format!("{} is not in the cart", label));
            }
            cart.update_quantity(LineKey::new(id, option), qty);
            if qty > 0 {
                ctx.output.success(&format!("{} quantity set to {}", label, qty));
            } else {
                ctx.output.success(&format!("{} removed", label));
            }
        }
        CartCommand::Clear => {
            cart.clear_cart();
            ctx.output.success("Cart cleared");
        }
    }

    if ctx.output.is_json() {
        return show_cart(&cart, ctx);
    }
    ctx.output.kv(
        "cart",
        &format!("{} item(s), {}", cart.cart_items_count(), cart.cart_total()),
    );
    Ok(())
}

/// Which lines a removal targets. Without `--all-variants` only the exact
/// (product, option) line goes.
fn selector(id: ProductId, option: Option<OptionId>, all_variants: bool) -> ItemSelector {
    if all_variants {
        ItemSelector::Product(id)
    } else {
        ItemSelector::Line(LineKey::new(id, option))
    }
}

fn line_label(name: &str, option: Option<OptionId>) -> String {
    match option {
        Some(option) => format!("{} (option {})", name, option),
        None => name.to_string(),
    }
}

#[derive(Serialize)]
struct CartSummary<'a> {
    key: &'a str,
    items: &'a [LineItem],
    item_count: i64,
    pricing: CartPricing,
}

fn show_cart<S: KeyValueStore>(cart: &CartStore<S>, ctx: &Context) -> Result<()> {
    let pricing = cart.pricing().context("Failed to price cart")?;

    if ctx.output.is_json() {
        ctx.output.json(&CartSummary {
            key: cart.key(),
            items: cart.items(),
            item_count: cart.cart_items_count(),
            pricing,
        });
        return Ok(());
    }

    ctx.output.header("Cart");
    if cart.is_empty() {
        ctx.output.info("Your cart is empty");
        return Ok(());
    }

    ctx.output
        .table_row(&["ID", "Name", "Qty", "Unit", "Total"], &COLUMN_WIDTHS);
    for (item, line) in cart.items().iter().zip(&pricing.line_items) {
        let id = match item.option_id {
            Some(option) => format!("{}/{}", item.product_id, option),
            None => item.product_id.to_string(),
        };
        let quantity = item.quantity.to_string();
        let unit = line.unit_price.display();
        let total = line.total.display();
        ctx.output.table_row(
            &[
                id.as_str(),
                item.name.as_str(),
                quantity.as_str(),
                unit.as_str(),
                total.as_str(),
            ],
            &COLUMN_WIDTHS,
        );
    }

    println!();
    ctx.output.kv("items", &cart.cart_items_count().to_string());
    if pricing.has_savings() {
        ctx.output.kv("you save", &pricing.savings.display());
    }
    ctx.output.kv("total", &pricing.grand_total.display());

    Ok(())
}
