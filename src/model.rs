//! Core domain types for the checkout.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::Amount;

/// Product identifier, assigned by the product source.
pub type ProductId = u32;

/// A catalog entry as delivered by a product source, before any ordering.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Units in stock.
    pub available_count: u32,
    /// Unit price.
    pub price: Amount,
}

impl Product {
    pub fn new(id: ProductId, name: impl Into<String>, available_count: u32, price: Amount) -> Self {
        Self {
            id,
            name: name.into(),
            available_count,
            price,
        }
    }
}

/// What a row control asks the container to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move one unit from available to ordered.
    Add,
    /// Move one unit from ordered back to available.
    Remove,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Add => f.write_str("add"),
            Action::Remove => f.write_str("remove"),
        }
    }
}

/// An intent emitted by a product row and handled by the checkout container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    pub action: Action,
    pub product_id: ProductId,
}

impl Command {
    pub fn add(product_id: ProductId) -> Self {
        Self {
            action: Action::Add,
            product_id,
        }
    }

    pub fn remove(product_id: ProductId) -> Self {
        Self {
            action: Action::Remove,
            product_id,
        }
    }
}

/// Errors when reading a command typed by the user
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandParseError {
    #[error("empty command")]
    Empty,

    #[error("unrecognized action '{0}'")]
    UnknownAction(String),

    #[error("{0} requires a product id")]
    MissingId(Action),

    #[error("invalid product id '{0}'")]
    InvalidId(String),
}

/// Parses `+ 1`, `add 1`, `- 1` or `remove 1`.
impl FromStr for Command {
    type Err = CommandParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let action = match parts.next() {
            None => return Err(CommandParseError::Empty),
            Some("+" | "add") => Action::Add,
            Some("-" | "remove") => Action::Remove,
            Some(other) => return Err(CommandParseError::UnknownAction(other.to_string())),
        };
        let id = parts.next().ok_or(CommandParseError::MissingId(action))?;
        let product_id = id
            .parse::<ProductId>()
            .map_err(|_| CommandParseError::InvalidId(id.to_string()))?;
        Ok(Command { action, product_id })
    }
}
