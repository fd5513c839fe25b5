//! # Rendering
//!
//! Text formatting for the catalog, cart, payment outcomes, and receipts.
//! Money formatting (two decimal places) is this adapter's concern; the
//! core only deals in cents.

use storefront_core::{Cart, Catalog, PaymentOutcome, Receipt};

/// Renders the product catalog as a listing.
pub fn render_catalog(catalog: &Catalog) -> String {
    let mut out = String::from("Products:\n");
    for product in catalog.iter() {
        out.push_str(&format!(
            "  [{}] {} - {}\n",
            product.id,
            product.name,
            product.unit_price()
        ));
    }
    out.pop(); // trailing newline
    out
}

/// Renders the cart with line totals and the cart total.
pub fn render_cart(cart: &Cart) -> String {
    if cart.is_empty() {
        return "Cart is empty.".to_string();
    }

    let mut out = String::from("Cart:\n");
    for line in cart.lines() {
        out.push_str(&format!(
            "  {} - {} x {} = {}\n",
            line.name,
            line.unit_price(),
            line.quantity,
            line.line_total()
        ));
    }
    out.push_str(&format!("Total: {}", cart.total()));
    out
}

/// Renders a payment outcome as a shopper-facing message.
pub fn render_outcome(outcome: &PaymentOutcome) -> String {
    match outcome {
        PaymentOutcome::Settled { receipt } if receipt.change_cents > 0 => {
            format!("Payment successful! Change due: {}", receipt.change())
        }
        PaymentOutcome::Settled { .. } => "Payment successful! No change due.".to_string(),
        PaymentOutcome::Balance { remaining_cents, .. } => {
            format!(
                "Remaining balance: {}",
                storefront_core::Money::from_cents(*remaining_cents)
            )
        }
    }
}

/// Renders a settled receipt.
pub fn render_receipt(receipt: &Receipt) -> String {
    let mut out = format!("Receipt {}\n", receipt.id);
    for line in &receipt.lines {
        out.push_str(&format!(
            "  {} x {} = {}\n",
            line.name,
            line.quantity,
            storefront_core::Money::from_cents(line.line_total_cents)
        ));
    }
    out.push_str(&format!(
        "Total: {}  Tendered: {}  Change: {}",
        receipt.total(),
        storefront_core::Money::from_cents(receipt.tendered_cents),
        receipt.change()
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::{Money, Store};

    #[test]
    fn test_render_catalog() {
        let rendered = render_catalog(&Catalog::sample());
        assert!(rendered.contains("[1] Cherry - $2.00"));
        assert!(rendered.contains("[3] Strawberry - $4.00"));
    }

    #[test]
    fn test_render_empty_cart() {
        assert_eq!(render_cart(&Cart::new()), "Cart is empty.");
    }

    #[test]
    fn test_render_cart_lines_and_total() {
        let mut store = Store::with_sample_catalog();
        store.add_product(1).unwrap();
        store.add_product(1).unwrap();
        store.add_product(2).unwrap();

        let rendered = render_cart(store.cart());
        assert!(rendered.contains("Cherry - $2.00 x 2 = $4.00"));
        assert!(rendered.contains("Orange - $3.00 x 1 = $3.00"));
        assert!(rendered.contains("Total: $7.00"));
    }

    #[test]
    fn test_render_outcomes() {
        let mut store = Store::with_sample_catalog();
        store.add_product(2).unwrap();

        let balance = store.pay(Money::from_cents(100)).unwrap();
        assert_eq!(render_outcome(&balance), "Remaining balance: $2.00");

        let settled = store.pay(Money::from_cents(500)).unwrap();
        assert_eq!(
            render_outcome(&settled),
            "Payment successful! Change due: $3.00"
        );
    }

    #[test]
    fn test_render_exact_payment() {
        let mut store = Store::with_sample_catalog();
        store.add_product(1).unwrap();

        let settled = store.pay(Money::from_cents(200)).unwrap();
        assert_eq!(render_outcome(&settled), "Payment successful! No change due.");
    }

    #[test]
    fn test_render_receipt() {
        let mut store = Store::with_sample_catalog();
        store.add_product(1).unwrap();

        let outcome = store.pay(Money::from_cents(500)).unwrap();
        let receipt = match outcome {
            PaymentOutcome::Settled { receipt } => receipt,
            other => panic!("expected settlement, got {:?}", other),
        };

        let rendered = render_receipt(&receipt);
        assert!(rendered.contains("Cherry x 1 = $2.00"));
        assert!(rendered.contains("Total: $2.00  Tendered: $5.00  Change: $3.00"));
    }
}
