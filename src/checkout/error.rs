//! Error types for loading and updating the checkout.

use std::path::PathBuf;

use thiserror::Error;

use crate::csv::CsvError;
use crate::model::ProductId;

/// Why the product list could not be loaded. Shown to the user in place of
/// the product table.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("product service unavailable: {0}")]
    Unavailable(String),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid catalog: {0}")]
    Csv(#[from] CsvError),

    #[error("no products available")]
    Empty,

    #[error("product id {0} appears more than once")]
    DuplicateProduct(ProductId),

    #[error("product load aborted: {0}")]
    Aborted(String),
}

/// Why a command left the checkout unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("products are not loaded")]
    NotReady,

    #[error("product {0} not found")]
    UnknownProduct(ProductId),

    #[error("product {0} is out of stock")]
    OutOfStock(ProductId),

    #[error("product {0} has nothing ordered")]
    NothingToRemove(ProductId),
}
