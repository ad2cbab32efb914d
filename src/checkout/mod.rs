//! The order container.
//!
//! A [`Checkout`] loads the product list once, owns the only copy of the
//! product records, and applies add/remove commands to exactly one record at
//! a time. Order totals and the discount are derived from the records on
//! demand and never stored.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::model::{Action, Command, Product, ProductId};
use crate::source::ProductSource;

mod state;
pub use state::ProductRecord;

mod summary;
pub use summary::{DiscountPolicy, OrderSummary};

mod error;
pub use error::{CheckoutError, LoadError};

/// Where the checkout is in its one-time load.
#[derive(Debug)]
pub enum LoadStatus {
    /// Not mounted yet.
    Idle,
    Loading,
    Ready,
    Failed(LoadError),
}

/// The checkout container.
#[derive(Debug)]
pub struct Checkout {
    status: LoadStatus,
    /// In load order
    products: Vec<ProductRecord>,
    policy: DiscountPolicy,
    /// Cleared on unmount; late loads are dropped
    mounted: bool,
}

/// Public API
impl Checkout {
    pub fn new(policy: DiscountPolicy) -> Self {
        Self {
            status: LoadStatus::Idle,
            products: Vec::new(),
            policy,
            mounted: true,
        }
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, LoadStatus::Loading)
    }

    pub fn load_error(&self) -> Option<&LoadError> {
        match &self.status {
            LoadStatus::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Product records in load order. Empty until the load succeeds.
    pub fn products(&self) -> &[ProductRecord] {
        &self.products
    }

    pub fn get_product(&self, id: ProductId) -> Option<&ProductRecord> {
        self.products.iter().find(|p| p.id() == id)
    }

    pub fn policy(&self) -> &DiscountPolicy {
        &self.policy
    }

    /// Order total, discount and payable total for the current records.
    pub fn summary(&self) -> OrderSummary {
        OrderSummary::of(&self.products, &self.policy)
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Enter the loading state. Returns `false` if a load was already started
    /// or the checkout is unmounted, in which case nothing must be fetched.
    pub fn begin_load(&mut self) -> bool {
        if !self.is_mounted() || !matches!(self.status, LoadStatus::Idle) {
            debug!(status = ?self.status, "load already started");
            return false;
        }
        self.status = LoadStatus::Loading;
        true
    }

    /// Store the outcome of the fetch started by [`begin_load`](Self::begin_load).
    ///
    /// Results arriving after unmount, or without a pending load, are dropped.
    pub fn finish_load(&mut self, result: Result<Vec<Product>, LoadError>) {
        if !self.is_mounted() {
            debug!("checkout unmounted, discarding product load");
            return;
        }
        if !self.is_loading() {
            warn!(status = ?self.status, "no load pending, discarding product load");
            return;
        }

        match result.and_then(Self::validate) {
            Ok(products) => {
                info!(count = products.len(), "products loaded");
                self.products = products.into_iter().map(ProductRecord::from_product).collect();
                self.status = LoadStatus::Ready;
            }
            Err(e) => {
                warn!(reason = %e, "product load failed");
                self.status = LoadStatus::Failed(e);
            }
        }
    }

    /// Begin, fetch and finish the load in one go.
    pub async fn load<S: ProductSource + ?Sized>(&mut self, source: &S) {
        if self.begin_load() {
            let result = source.fetch_products().await;
            self.finish_load(result);
        }
    }

    /// Tear the checkout down; any load still in flight is discarded.
    pub fn unmount(&mut self) {
        self.mounted = false;
    }

    /// Apply a single command on top of the current records.
    ///
    /// An `Err` means the command was a no-op; the records are unchanged.
    pub fn apply(&mut self, command: Command) -> Result<(), CheckoutError> {
        let result = match command.action {
            Action::Add => self.apply_add(command.product_id),
            Action::Remove => self.apply_remove(command.product_id),
        };
        self.log_result(command, &result);
        result
    }
}

/// Private API
impl Checkout {
    fn log_result(&self, command: Command, result: &Result<(), CheckoutError>) {
        let action = command.action;
        match result {
            Ok(()) => {
                let quantity = self
                    .get_product(command.product_id)
                    .map(ProductRecord::ordered_quantity);
                info!(
                    product = %command.product_id,
                    quantity = ?quantity,
                    "{action} applied"
                );
            }
            Err(e) => {
                info!(
                    product = %command.product_id,
                    reason = %e,
                    "{action} skipped"
                );
            }
        }
    }

    fn validate(products: Vec<Product>) -> Result<Vec<Product>, LoadError> {
        if products.is_empty() {
            return Err(LoadError::Empty);
        }
        let mut seen = HashSet::with_capacity(products.len());
        if let Some(dup) = products.iter().find(|p| !seen.insert(p.id)) {
            return Err(LoadError::DuplicateProduct(dup.id));
        }
        Ok(products)
    }

    /// Position of the record with this id, wherever it sits in the list.
    fn position(&self, id: ProductId) -> Result<usize, CheckoutError> {
        if !matches!(self.status, LoadStatus::Ready) {
            return Err(CheckoutError::NotReady);
        }
        self.products
            .iter()
            .position(|p| p.id() == id)
            .ok_or(CheckoutError::UnknownProduct(id))
    }

    /// Apply `Action::Add`:
    /// - Find the record by id
    /// - Ensure a unit is available
    /// - Replace the record in place with its successor
    fn apply_add(&mut self, id: ProductId) -> Result<(), CheckoutError> {
        let index = self.position(id)?;
        let updated = self.products[index]
            .with_added()
            .ok_or(CheckoutError::OutOfStock(id))?;
        self.products[index] = updated;
        Ok(())
    }

    /// Apply `Action::Remove`:
    /// - Find the record by id
    /// - Ensure a unit is ordered
    /// - Replace the record in place with its successor
    fn apply_remove(&mut self, id: ProductId) -> Result<(), CheckoutError> {
        let index = self.position(id)?;
        let updated = self.products[index]
            .with_removed()
            .ok_or(CheckoutError::NothingToRemove(id))?;
        self.products[index] = updated;
        Ok(())
    }
}

impl Default for Checkout {
    fn default() -> Self {
        Self::new(DiscountPolicy::default())
    }
}
