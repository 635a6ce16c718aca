//! Checkout dry run.
//!
//! Builds the order request the storefront would submit, without sending it.

use anyhow::Result;
use souq_commerce::checkout::{CustomerDetails, OrderRequest, SYRIAN_CITIES};

use super::CheckoutArgs;
use crate::context::Context;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let cart = ctx.open_cart()?;
    let customer = customer_details(args);

    if !customer.city.trim().is_empty() && !SYRIAN_CITIES.contains(&customer.city.trim()) {
        ctx.output
            .warn(&format!("{} is not in the delivery city list", customer.city));
    }

    customer.validate()?;
    let request = OrderRequest::from_cart(customer, cart.cart())?;

    if !ctx.output.is_json() {
        ctx.output.header("Order request");
        ctx.output.kv("customer", &request.customer.full_name());
        ctx.output.kv("lines", &request.items.len().to_string());
        ctx.output.kv("total", &cart.cart_total().display());
        println!();
    }
    ctx.output.json(&request);

    Ok(())
}

fn customer_details(args: CheckoutArgs) -> CustomerDetails {
    CustomerDetails {
        customer_first_name: args.first_name,
        customer_father_name: args.father_name,
        customer_last_name: args.last_name,
        customer_phone: args.phone,
        city: args.city,
        street: args.street,
        address: args.address,
        notes: args.notes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use souq_commerce::checkout::FieldProblem;

    #[test]
    fn test_missing_flags_are_reported_together() {
        let customer = customer_details(CheckoutArgs {
            first_name: "Rami".into(),
            phone: "0944".into(),
            ..CheckoutArgs::default()
        });

        let errors = customer.field_errors();
        assert!(errors.len() >= 5);
        assert!(errors
            .iter()
            .any(|e| e.field == "customer_phone" && e.problem == FieldProblem::InvalidPhone));
        assert!(!errors.iter().any(|e| e.field == "customer_first_name"));
    }

    #[test]
    fn test_complete_details_validate() {
        let customer = customer_details(CheckoutArgs {
            first_name: "Rami".into(),
            father_name: "Khaled".into(),
            last_name: "Haddad".into(),
            phone: "0944 123 456".into(),
            city: SYRIAN_CITIES[0].into(),
            street: "Hamra St".into(),
            address: "Building 4".into(),
            notes: String::new(),
        });
        assert!(customer.validate().is_ok());
    }
}
