//! Text rendering of the checkout page.

use std::fmt::Write;

use crate::checkout::{Checkout, LoadStatus};

mod row;
pub use row::ProductRow;

pub const TITLE: &str = "Electro World";
pub const LOADING: &str = "Loading...";

const HEADER: [&str; 6] = [
    "Product ID",
    "Product Name",
    "# Available",
    "Price",
    "Quantity",
    "Total",
];

/// Render the whole page for the checkout's current state.
pub fn page(checkout: &Checkout) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = write_page(&mut out, checkout);
    out
}

fn write_page(out: &mut String, checkout: &Checkout) -> std::fmt::Result {
    writeln!(out, "{TITLE}")?;
    writeln!(out, "{}", "=".repeat(TITLE.len()))?;

    match checkout.status() {
        LoadStatus::Idle => Ok(()),
        LoadStatus::Loading => writeln!(out, "{LOADING}"),
        LoadStatus::Failed(e) => writeln!(out, "Error: {e}"),
        LoadStatus::Ready => {
            write_table(out, checkout)?;
            write_summary(out, checkout)
        }
    }
}

fn write_table(out: &mut String, checkout: &Checkout) -> std::fmt::Result {
    let [id, name, available, price, quantity, total] = HEADER;
    let header = format!(
        "{id:<10} {name:<22} {available:>11} {price:>12} {quantity:>8} {total:>12}"
    );
    writeln!(out, "{header}")?;
    writeln!(out, "{}", "-".repeat(header.len() + 9))?;
    for record in checkout.products() {
        writeln!(out, "{}", ProductRow::new(record))?;
    }
    Ok(())
}

fn write_summary(out: &mut String, checkout: &Checkout) -> std::fmt::Result {
    let summary = checkout.summary();
    writeln!(out)?;
    writeln!(out, "Order summary")?;
    if summary.has_discount() {
        writeln!(out, "Discount: ${}", summary.discount)?;
    }
    writeln!(out, "Total: ${}", summary.payable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::LoadError;
    use crate::{Amount, Command, Product};

    fn loaded(products: Vec<Product>) -> Checkout {
        let mut checkout = Checkout::default();
        checkout.begin_load();
        checkout.finish_load(Ok(products));
        checkout
    }

    #[test]
    fn idle_page_shows_title_only() {
        let text = page(&Checkout::default());
        assert_eq!(text, "Electro World\n=============\n");
    }

    #[test]
    fn loading_page_shows_indicator_only() {
        let mut checkout = Checkout::default();
        checkout.begin_load();

        let text = page(&checkout);
        assert!(text.contains(LOADING));
        assert!(!text.contains("Product ID"));
        assert!(!text.contains("Order summary"));
    }

    #[test]
    fn failed_page_shows_error_without_table() {
        let mut checkout = Checkout::default();
        checkout.begin_load();
        checkout.finish_load(Err(LoadError::Unavailable("timeout".into())));

        let text = page(&checkout);
        assert!(text.contains("Error: product service unavailable: timeout"));
        assert!(!text.contains(LOADING));
        assert!(!text.contains("Product ID"));
    }

    #[test]
    fn initial_page() {
        let checkout = loaded(vec![Product::new(1, "A", 5, Amount::from_units(100))]);

        let text = page(&checkout);
        for column in HEADER {
            assert!(text.contains(column));
        }
        assert!(text.contains("$100.00"));
        assert!(text.contains("$0.00"));
        assert!(text.contains("Total: $0.00"));
        assert!(!text.contains("Discount"));
    }

    #[test]
    fn page_after_three_adds() {
        let mut checkout = loaded(vec![Product::new(1, "A", 5, Amount::from_units(100))]);
        for _ in 0..3 {
            checkout.apply(Command::add(1)).unwrap();
        }

        let text = page(&checkout);
        let row = text.lines().find(|l| l.starts_with('1')).unwrap();
        assert!(row.contains("$300.00"));
        assert!(row.ends_with("[+] [-]"));
        assert!(text.contains("Total: $300.00"));
        assert!(!text.contains("Discount"));
    }

    #[test]
    fn page_with_discount() {
        let mut checkout = loaded(vec![Product::new(1, "TV", 1, Amount::from_units(2000))]);
        checkout.apply(Command::add(1)).unwrap();

        let text = page(&checkout);
        assert!(text.contains("Discount: $200.00"));
        assert!(text.contains("Total: $1800.00"));
    }
}
