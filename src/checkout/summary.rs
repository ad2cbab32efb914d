use crate::Amount;

use super::ProductRecord;

/// Discount applied to orders whose total exceeds a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscountPolicy {
    /// Totals strictly above this get the discount.
    pub threshold: Amount,
    pub rate_percent: u32,
}

impl DiscountPolicy {
    pub fn new(threshold: Amount, rate_percent: u32) -> Self {
        Self {
            threshold,
            rate_percent,
        }
    }

    pub fn discount_for(&self, total: Amount) -> Amount {
        if total > self.threshold {
            total.percent(self.rate_percent)
        } else {
            Amount::ZERO
        }
    }
}

/// 10% off orders over $1000.
impl Default for DiscountPolicy {
    fn default() -> Self {
        Self::new(Amount::from_units(1000), 10)
    }
}

/// Order-level values derived from the record list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderSummary {
    pub total: Amount,
    pub discount: Amount,
    pub payable: Amount,
}

impl OrderSummary {
    pub fn of(records: &[ProductRecord], policy: &DiscountPolicy) -> Self {
        let total: Amount = records.iter().map(ProductRecord::total).sum();
        let discount = policy.discount_for(total);
        Self {
            total,
            discount,
            payable: total - discount,
        }
    }

    pub fn has_discount(&self) -> bool {
        !self.discount.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Product;

    fn ordered(id: u32, price: f64, quantity: u32) -> ProductRecord {
        let mut record =
            ProductRecord::from_product(Product::new(id, "p", quantity, Amount::from_float(price)));
        for _ in 0..quantity {
            record = record.with_added().unwrap();
        }
        record
    }

    #[test]
    fn empty_order_is_zero() {
        let summary = OrderSummary::of(&[], &DiscountPolicy::default());
        assert_eq!(summary.total, Amount::ZERO);
        assert!(!summary.has_discount());
        assert_eq!(summary.payable, Amount::ZERO);
    }

    #[test]
    fn total_sums_record_totals() {
        let records = [ordered(1, 100.0, 3), ordered(2, 19.99, 2)];
        let summary = OrderSummary::of(&records, &DiscountPolicy::default());
        assert_eq!(summary.total, Amount::from_float(339.98));
        assert_eq!(summary.discount, Amount::ZERO);
        assert_eq!(summary.payable, summary.total);
    }

    #[test]
    fn exactly_threshold_gets_no_discount() {
        let summary = OrderSummary::of(&[ordered(1, 500.0, 2)], &DiscountPolicy::default());
        assert_eq!(summary.total, Amount::from_units(1000));
        assert!(!summary.has_discount());
        assert_eq!(summary.payable, Amount::from_units(1000));
    }

    #[test]
    fn over_threshold_gets_ten_percent() {
        let summary = OrderSummary::of(&[ordered(1, 2000.0, 1)], &DiscountPolicy::default());
        assert_eq!(summary.discount, Amount::from_units(200));
        assert_eq!(summary.payable, Amount::from_units(1800));
        assert_eq!(summary.discount.to_string(), "200.00");
        assert_eq!(summary.payable.to_string(), "1800.00");
    }

    #[test]
    fn just_over_threshold() {
        let summary = OrderSummary::of(&[ordered(1, 1000.01, 1)], &DiscountPolicy::default());
        assert_eq!(summary.discount, Amount::from_float(100.001));
        assert_eq!(summary.payable, summary.total - summary.discount);
    }

    #[test]
    fn custom_policy() {
        let policy = DiscountPolicy::new(Amount::from_units(50), 25);
        assert_eq!(policy.discount_for(Amount::from_units(50)), Amount::ZERO);
        assert_eq!(policy.discount_for(Amount::from_units(100)), Amount::from_units(25));
    }
}
