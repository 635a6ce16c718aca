//! Category and brand listing.

use anyhow::Result;
use serde::Serialize;
use souq_commerce::catalog::{unique_brands, unique_categories};

use crate::context::Context;

#[derive(Serialize)]
struct Facets {
    categories: Vec<String>,
    brands: Vec<String>,
}

/// Run the facets command.
pub async fn run(ctx: &Context) -> Result<()> {
    let products = ctx.load_catalog()?;
    let facets = Facets {
        categories: unique_categories(&products),
        brands: unique_brands(&products),
    };

    if ctx.output.is_json() {
        ctx.output.json(&facets);
        return Ok(());
    }

    ctx.output.header("Categories");
    for category in &facets.categories {
        ctx.output.list_item(category);
    }

    ctx.output.header("Brands");
    for brand in &facets.brands {
        ctx.output.list_item(brand);
    }

    Ok(())
}
