use crate::model::{Product, ProductId};
use crate::Amount;

/// One product's catalog data together with its order state.
///
/// Records are never mutated in place: [`with_added`](Self::with_added) and
/// [`with_removed`](Self::with_removed) derive the next value, and `total` is
/// recomputed from `price * ordered_quantity` every time.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    id: ProductId,
    name: String,
    available_count: u32,
    price: Amount,
    ordered_quantity: u32,
    total: Amount,
}

impl ProductRecord {
    /// A freshly loaded record, nothing ordered yet.
    pub fn from_product(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            available_count: product.available_count,
            price: product.price,
            ordered_quantity: 0,
            total: Amount::ZERO,
        }
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn available_count(&self) -> u32 {
        self.available_count
    }

    pub fn price(&self) -> Amount {
        self.price
    }

    pub fn ordered_quantity(&self) -> u32 {
        self.ordered_quantity
    }

    pub fn total(&self) -> Amount {
        self.total
    }

    /// Units held by this record, ordered or not. Constant after load.
    pub fn stock(&self) -> u32 {
        self.available_count + self.ordered_quantity
    }

    pub fn can_add(&self) -> bool {
        self.available_count > 0
    }

    pub fn can_remove(&self) -> bool {
        self.ordered_quantity > 0
    }

    /// One more unit ordered, or `None` when nothing is left in stock.
    pub fn with_added(&self) -> Option<Self> {
        if !self.can_add() {
            return None;
        }
        Some(self.with_quantity(self.ordered_quantity + 1, self.available_count - 1))
    }

    /// One unit fewer ordered, or `None` when nothing is ordered.
    pub fn with_removed(&self) -> Option<Self> {
        if !self.can_remove() {
            return None;
        }
        Some(self.with_quantity(self.ordered_quantity - 1, self.available_count + 1))
    }

    fn with_quantity(&self, ordered_quantity: u32, available_count: u32) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            available_count,
            price: self.price,
            ordered_quantity,
            total: self.price * ordered_quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(available: u32, price: f64) -> ProductRecord {
        ProductRecord::from_product(Product::new(1, "A", available, Amount::from_float(price)))
    }

    #[test]
    fn loaded_record_has_nothing_ordered() {
        let r = record(5, 100.0);
        assert_eq!(r.ordered_quantity(), 0);
        assert_eq!(r.total(), Amount::ZERO);
        assert_eq!(r.available_count(), 5);
        assert!(r.can_add());
        assert!(!r.can_remove());
    }

    #[test]
    fn add_moves_one_unit_and_recomputes_total() {
        let r = record(5, 19.99).with_added().unwrap().with_added().unwrap();
        assert_eq!(r.ordered_quantity(), 2);
        assert_eq!(r.available_count(), 3);
        assert_eq!(r.total(), Amount::from_float(39.98));
        assert_eq!(r.stock(), 5);
    }

    #[test]
    fn add_without_stock_is_refused() {
        let r = record(1, 10.0).with_added().unwrap();
        assert!(!r.can_add());
        assert_eq!(r.with_added(), None);
    }

    #[test]
    fn remove_returns_unit_to_stock() {
        let r = record(2, 10.0).with_added().unwrap().with_removed().unwrap();
        assert_eq!(r.ordered_quantity(), 0);
        assert_eq!(r.available_count(), 2);
        assert_eq!(r.total(), Amount::ZERO);
    }

    #[test]
    fn remove_with_nothing_ordered_is_refused() {
        assert_eq!(record(3, 10.0).with_removed(), None);
    }

    #[test]
    fn total_tracks_price_times_quantity_over_many_steps() {
        let mut r = record(50, 0.1);
        for _ in 0..30 {
            r = r.with_added().unwrap();
        }
        for _ in 0..7 {
            r = r.with_removed().unwrap();
        }
        assert_eq!(r.ordered_quantity(), 23);
        assert_eq!(r.total(), r.price() * 23);
        assert_eq!(r.total().to_string(), "2.30");
        assert_eq!(r.stock(), 50);
    }
}
