pub mod amount;
pub mod checkout;
pub mod csv;
pub mod model;
pub mod render;
pub mod session;
pub mod source;

pub use amount::Amount;
pub use checkout::{Checkout, DiscountPolicy, OrderSummary, ProductRecord};
pub use model::{Action, Command, Product, ProductId};
pub use session::Session;
