use std::fmt;

use crate::checkout::ProductRecord;
use crate::model::{Action, Command};

/// One table row: a record's fields plus its add and remove controls.
#[derive(Debug, Clone, Copy)]
pub struct ProductRow<'a> {
    record: &'a ProductRecord,
}

impl<'a> ProductRow<'a> {
    pub fn new(record: &'a ProductRecord) -> Self {
        Self { record }
    }

    pub fn is_enabled(&self, action: Action) -> bool {
        match action {
            Action::Add => self.record.can_add(),
            Action::Remove => self.record.can_remove(),
        }
    }

    /// Press a control. A disabled control emits nothing.
    pub fn press(&self, action: Action) -> Option<Command> {
        self.is_enabled(action).then_some(Command {
            action,
            product_id: self.record.id(),
        })
    }

    fn control(&self, action: Action) -> &'static str {
        match (action, self.is_enabled(action)) {
            (Action::Add, true) => "[+]",
            (Action::Remove, true) => "[-]",
            (_, false) => "[ ]",
        }
    }
}

impl fmt::Display for ProductRow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.record;
        write!(
            f,
            "{:<10} {:<22} {:>11} {:>12} {:>8} {:>12}  {} {}",
            r.id(),
            r.name(),
            r.available_count(),
            format!("${}", r.price()),
            r.ordered_quantity(),
            format!("${}", r.total()),
            self.control(Action::Add),
            self.control(Action::Remove),
        )
    }
}
