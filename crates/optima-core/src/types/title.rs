//! Receivables (titles) offered for advance.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::date::{lenient_date, Date};

/// A receivable: one invoice with a face value and a due date.
///
/// Titles are held only for the duration of a simulation. A title with a
/// missing due date or a non-positive value is kept, but it is not yet
/// computable.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Title {
    /// Identifier within the simulation.
    pub id: String,
    /// Payer (sacado) name.
    pub payer: String,
    /// Invoice number.
    pub invoice_number: String,
    /// Face value.
    pub value: Decimal,
    /// Due date, `None` when blank or malformed.
    #[serde(with = "lenient_date")]
    pub due_date: Option<Date>,
}

impl Title {
    /// Creates a title with the given value and due date.
    pub fn new(id: impl Into<String>, value: Decimal, due_date: Option<Date>) -> Self {
        Self {
            id: id.into(),
            value,
            due_date,
            ..Self::default()
        }
    }

    /// Sets the payer name.
    pub fn with_payer(mut self, payer: impl Into<String>) -> Self {
        self.payer = payer.into();
        self
    }

    /// Sets the invoice number.
    pub fn with_invoice(mut self, invoice_number: impl Into<String>) -> Self {
        self.invoice_number = invoice_number.into();
        self
    }

    /// Returns the due date when the title has one and a positive value.
    #[must_use]
    pub fn computable_due_date(&self) -> Option<Date> {
        if self.value > Decimal::ZERO {
            self.due_date
        } else {
            None
        }
    }
}
