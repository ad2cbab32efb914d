//! Product sources: where the checkout's catalog comes from.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::checkout::LoadError;
use crate::csv::read_products;
use crate::{Amount, Product};

/// Fetches the product list. The only I/O boundary of the checkout.
#[async_trait]
pub trait ProductSource: Send + Sync {
    async fn fetch_products(&self) -> Result<Vec<Product>, LoadError>;
}

/// Catalog stored in a csv file.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ProductSource for CsvSource {
    #[instrument(skip_all)]
    async fn fetch_products(&self) -> Result<Vec<Product>, LoadError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| LoadError::Io {
                path: self.path.clone(),
                source,
            })?;
        let products = read_products(bytes.as_slice())?;
        debug!(path = %self.path.display(), count = products.len(), "catalog read");
        Ok(products)
    }
}

/// In-memory catalog standing in for a remote product service, with
/// optional latency and failure.
#[derive(Debug, Clone, Default)]
pub struct DemoSource {
    products: Vec<Product>,
    latency: Duration,
    failure: Option<String>,
}

impl DemoSource {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            ..Self::default()
        }
    }

    /// A source whose every fetch fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// The Electro World demo catalog.
    pub fn electro_world() -> Self {
        Self::new(vec![
            Product::new(1, "Laptop", 5, Amount::from_units(1200)),
            Product::new(2, "Smartphone", 10, Amount::from_float(799.99)),
            Product::new(3, "Wireless Headphones", 15, Amount::from_float(149.5)),
            Product::new(4, "4K Monitor", 4, Amount::from_float(329.0)),
            Product::new(5, "Mechanical Keyboard", 8, Amount::from_float(89.95)),
            Product::new(6, "USB-C Charger", 0, Amount::from_float(24.99)),
        ])
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }
}

#[async_trait]
impl ProductSource for DemoSource {
    #[instrument(skip_all)]
    async fn fetch_products(&self) -> Result<Vec<Product>, LoadError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        match &self.failure {
            Some(message) => Err(LoadError::Unavailable(message.clone())),
            None => Ok(self.products.clone()),
        }
    }
}
