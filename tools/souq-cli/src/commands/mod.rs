//! CLI command implementations.

pub mod cart;
pub mod checkout;
pub mod config;
pub mod facets;
pub mod products;

use clap::{Args, Subcommand};
use souq_commerce::search::{SortOption, PAGE_SIZE_CHOICES};
use souq_commerce::{OptionId, ProductId};

/// Arguments for the products command.
#[derive(Args, Debug, Default)]
pub struct ProductsArgs {
    /// Match against names and descriptions.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only products in this category (repeatable).
    #[arg(long = "category")]
    pub categories: Vec<String>,

    /// Only products of this brand (repeatable).
    #[arg(short, long = "brand")]
    pub brands: Vec<String>,

    /// Lowest price, as typed (e.g. "12,500").
    #[arg(long)]
    pub min: Option<String>,

    /// Highest price, as typed.
    #[arg(long)]
    pub max: Option<String>,

    /// Only featured products.
    #[arg(long)]
    pub featured: bool,

    /// Sort order: price_asc, price_desc, name_asc, name_desc, newest, featured.
    #[arg(long)]
    pub sort: Option<SortOption>,

    /// Page to show (1-indexed).
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Products per page: 8, 12, 16 or 24 (default: catalog.page_size).
    #[arg(long, value_parser = parse_page_size)]
    pub per_page: Option<usize>,
}

fn parse_page_size(value: &str) -> Result<usize, String> {
    let size: usize = value.parse().map_err(|e| format!("{e}"))?;
    if PAGE_SIZE_CHOICES.contains(&size) {
        Ok(size)
    } else {
        Err(format!("page size must be one of {:?}", PAGE_SIZE_CHOICES))
    }
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart contents and totals.
    Show,
    /// Add a catalog product to the cart.
    Add {
        /// Product ID.
        id: ProductId,
        /// Quantity to add.
        #[arg(short, long, default_value = "1", allow_negative_numbers = true)]
        qty: i64,
        /// Option ID, for products sold in several options.
        #[arg(short, long)]
        option: Option<OptionId>,
    },
    /// Remove a line from the cart.
    Remove {
        /// Product ID.
        id: ProductId,
        /// Option ID of the line to remove.
        #[arg(short, long)]
        option: Option<OptionId>,
        /// Remove every line of the product, whatever its option.
        #[arg(long, conflicts_with = "option")]
        all_variants: bool,
    },
    /// Set the quantity of a line. Zero or less removes it.
    Update {
        /// Product ID.
        id: ProductId,
        /// New quantity.
        #[arg(allow_negative_numbers = true)]
        qty: i64,
        /// Option ID of the line to update.
        #[arg(short, long)]
        option: Option<OptionId>,
    },
    /// Empty the cart.
    Clear,
}

/// Arguments for the checkout command.
///
/// Every field defaults to empty so missing ones are reported together by
/// validation instead of one at a time.
#[derive(Args, Debug, Default)]
pub struct CheckoutArgs {
    /// Customer first name.
    #[arg(long, default_value = "")]
    pub first_name: String,

    /// Customer father's name.
    #[arg(long, default_value = "")]
    pub father_name: String,

    /// Customer last name.
    #[arg(long, default_value = "")]
    pub last_name: String,

    /// Contact phone.
    #[arg(long, default_value = "")]
    pub phone: String,

    /// Delivery city.
    #[arg(long, default_value = "")]
    pub city: String,

    /// Street.
    #[arg(long, default_value = "")]
    pub street: String,

    /// Building, floor and other address details.
    #[arg(long, default_value = "")]
    pub address: String,

    /// Delivery notes.
    #[arg(long, default_value = "")]
    pub notes: String,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
