//! Catalog listing command.

use anyhow::Result;
use souq_commerce::catalog::Product;
use souq_commerce::search::{filter_products, paginate_products, FilterSpec, Page};
use tracing::debug;

use super::ProductsArgs;
use crate::context::Context;
use crate::output::price_cell;

const COLUMN_WIDTHS: [usize; 5] = [6, 28, 14, 16, 12];

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let products = ctx.load_catalog()?;
    let spec = filter_spec(args, ctx.config.catalog.page_size);
    debug!(?spec, "querying catalog");

    let page = query(&products, &spec);

    if ctx.output.is_json() {
        ctx.output.json(&page);
        return Ok(());
    }

    ctx.output.header("Products");
    if let Some(sort) = spec.sort {
        ctx.output.kv("sorted by", sort.display_name());
    }

    if page.is_empty() {
        ctx.output.info("No products match these filters");
        return Ok(());
    }

    ctx.output
        .table_row(&["ID", "Name", "Brand", "Price", ""], &COLUMN_WIDTHS);
    for product in &page.data {
        let id = product.id.to_string();
        let price = price_cell(product.representative_price());
        let badges = badges(product);
        ctx.output.table_row(
            &[
                id.as_str(),
                product.name.as_str(),
                product.brand.as_str(),
                price.as_str(),
                badges.as_str(),
            ],
            &COLUMN_WIDTHS,
        );
    }
    ctx.output.pagination(&page.pagination);

    Ok(())
}

/// Build the filter from command-line flags.
fn filter_spec(args: ProductsArgs, default_page_size: usize) -> FilterSpec {
    let mut spec = FilterSpec::new()
        .with_price_range(args.min, args.max)
        .with_featured_only(args.featured)
        .with_sort(args.sort)
        .with_pagination(args.page, args.per_page.unwrap_or(default_page_size));

    if let Some(search) = args.search {
        spec = spec.with_search(search);
    }
    for category in args.categories {
        spec = spec.with_category(category);
    }
    for brand in args.brands {
        spec = spec.with_brand(brand);
    }
    spec
}

/// The whole catalog file is local, so it is filtered and paged in one go.
fn query(products: &[Product], spec: &FilterSpec) -> Page<Product> {
    paginate_products(filter_products(products, spec), spec.page, spec.page_size)
}

fn badges(product: &Product) -> String {
    let mut badges = Vec::new();
    if product.featured {
        badges.push("★".to_string());
    }
    if let Some(percent) = product.discount_percentage() {
        badges.push(format!("-{}%", percent));
    }
    if product.has_options() {
        badges.push(format!("{} options", product.options().len()));
    }
    badges.join(" ")
}
