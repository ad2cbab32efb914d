use std::collections::HashSet;
use std::io;

use serde::Deserialize;
use thiserror::Error;

use crate::{Amount, Product, ProductId};

/// Errors that can occur when parsing catalog rows
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("line {line}: failed to parse row: {source}")]
    Parse { line: usize, source: csv::Error },

    #[error("line {line}: product id must be positive")]
    InvalidId { line: usize },

    #[error("line {line}: invalid price {price} (must be between 0 and {max})", max = Amount::MAX_PRICE)]
    InvalidPrice { line: usize, price: f64 },

    #[error("line {line}: duplicate product id {id}")]
    DuplicateId { line: usize, id: ProductId },
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    id: ProductId,
    name: String,
    #[serde(alias = "availableCount")]
    available_count: u32,
    price: f64,
}

/// Read a product catalog in csv format.
///
/// Expects a `id,name,available_count,price` header. The first bad row fails
/// the whole catalog.
pub fn read_products(reader: impl io::Read) -> Result<Vec<Product>, CsvError> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut seen = HashSet::new();
    reader
        .into_deserialize::<CatalogRow>()
        .enumerate()
        .map(|(idx, result)| {
            let line = idx + 2; // 1-indexed, skip header
            let row = result.map_err(|source| CsvError::Parse { line, source })?;
            if row.id == 0 {
                return Err(CsvError::InvalidId { line });
            }
            let price = Amount::from_float(row.price);
            if !row.price.is_finite() || price.is_negative() || price > Amount::MAX_PRICE {
                return Err(CsvError::InvalidPrice {
                    line,
                    price: row.price,
                });
            }
            if !seen.insert(row.id) {
                return Err(CsvError::DuplicateId { line, id: row.id });
            }
            Ok(Product::new(
                row.id,
                row.name,
                row.available_count,
                price,
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(content: &str) -> Result<Vec<Product>, CsvError> {
        read_products(content.as_bytes())
    }

    #[test]
    fn read_catalog() {
        let products = read("id,name,available_count,price\n1,Laptop,5,999.99\n2,Mouse,0,19.5\n")
            .unwrap();
        assert_eq!(
            products,
            vec![
                Product::new(1, "Laptop", 5, Amount::from_float(999.99)),
                Product::new(2, "Mouse", 0, Amount::from_float(19.5)),
            ]
        );
    }

    #[test]
    fn read_with_whitespace_and_camel_case_header() {
        let products = read("id, name, availableCount, price\n 7 , Phone , 3 , 100\n").unwrap();
        assert_eq!(products, vec![Product::new(7, "Phone", 3, Amount::from_units(100))]);
    }

    #[test]
    fn read_header_only_is_empty() {
        assert!(read("id,name,available_count,price\n").unwrap().is_empty());
    }

    #[test]
    fn read_returns_error_for_negative_count() {
        let err = read("id,name,available_count,price\n1,A,-1,10\n").unwrap_err();
        assert!(matches!(err, CsvError::Parse { line: 2, .. }));
    }

    #[test]
    fn read_returns_error_for_zero_id() {
        let err = read("id,name,available_count,price\n1,A,1,10\n0,B,1,10\n").unwrap_err();
        assert!(matches!(err, CsvError::InvalidId { line: 3 }));
    }

    #[test]
    fn read_returns_error_for_negative_price() {
        let err = read("id,name,available_count,price\n1,A,1,-10\n").unwrap_err();
        assert!(matches!(err, CsvError::InvalidPrice { line: 2, .. }));
    }

    #[test]
    fn read_returns_error_for_price_above_max() {
        let err = read("id,name,available_count,price\n1,Jet,3,100000000000000\n").unwrap_err();
        assert!(matches!(err, CsvError::InvalidPrice { line: 2, .. }));
        assert!(err.to_string().contains("between 0 and 100000.00"));
    }

    #[test]
    fn read_accepts_max_price() {
        let products = read("id,name,available_count,price\n1,Yacht,1,100000\n").unwrap();
        assert_eq!(products[0].price, Amount::MAX_PRICE);
    }

    #[test]
    fn read_returns_error_for_duplicate_id() {
        let err = read("id,name,available_count,price\n4,A,1,1\n4,B,1,1\n").unwrap_err();
        assert!(matches!(err, CsvError::DuplicateId { line: 3, id: 4 }));
    }
}
