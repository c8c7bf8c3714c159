//! Invoices and their line items

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{lenient_date, Id};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum InvoiceType {
    #[default]
    Sales,
    Purchase,
}

impl fmt::Display for InvoiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvoiceType::Sales => f.write_str("Sales"),
            InvoiceType::Purchase => f.write_str("Purchase"),
        }
    }
}

/// One row of an invoice
///
/// `amount` is derived from `quantity * unit_price` whenever either input
/// changes. Setting `amount` directly stores it as given and leaves the
/// inputs alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub amount: Decimal,
}

impl Default for LineItem {
    fn default() -> Self {
        Self {
            description: String::new(),
            quantity: Decimal::ONE,
            unit_price: Decimal::ZERO,
            amount: Decimal::ZERO,
        }
    }
}

impl LineItem {
    /// `None` when `quantity * unit_price` does not fit a `Decimal`
    pub fn new(
        description: impl Into<String>,
        quantity: Decimal,
        unit_price: Decimal,
    ) -> Option<Self> {
        Some(Self {
            description: description.into(),
            quantity,
            unit_price,
            amount: quantity.checked_mul(unit_price)?,
        })
    }

    /// Returns false, leaving the line untouched, if the amount would overflow
    pub fn set_quantity(&mut self, quantity: Decimal) -> bool {
        let Some(amount) = quantity.checked_mul(self.unit_price) else {
            return false;
        };
        self.quantity = quantity;
        self.amount = amount;
        true
    }

    /// Returns false, leaving the line untouched, if the amount would overflow
    pub fn set_unit_price(&mut self, unit_price: Decimal) -> bool {
        let Some(amount) = self.quantity.checked_mul(unit_price) else {
            return false;
        };
        self.unit_price = unit_price;
        self.amount = amount;
        true
    }

    /// Override the amount; quantity and unit price are not re-derived
    pub fn set_amount(&mut self, amount: Decimal) {
        self.amount = amount;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: Id,
    pub invoice_number: String,
    pub invoice_type: InvoiceType,
    #[serde(default)]
    pub customer_id: Option<Id>,
    #[serde(default)]
    pub vendor_id: Option<Id>,
    #[serde(deserialize_with = "lenient_date::deserialize")]
    pub invoice_date: NaiveDate,
    #[serde(default, deserialize_with = "lenient_date::option::deserialize")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub tax_amount: Decimal,
    /// Computed by the backend; never derived client-side
    #[serde(default)]
    pub total_amount: Decimal,
    pub status: String,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

/// Body of `POST /invoices`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewInvoice {
    pub invoice_type: InvoiceType,
    pub customer_id: Option<Id>,
    pub vendor_id: Option<Id>,
    pub invoice_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub items: Vec<LineItem>,
    pub tax_amount: Decimal,
    pub currency: String,
    pub description: String,
}

impl NewInvoice {
    /// Fresh draft dated `today` with a single empty line
    pub fn new(today: NaiveDate) -> Self {
        Self {
            invoice_type: InvoiceType::Sales,
            customer_id: None,
            vendor_id: None,
            invoice_date: today,
            due_date: None,
            items: vec![LineItem::default()],
            tax_amount: Decimal::ZERO,
            currency: default_currency(),
            description: String::new(),
        }
    }

    /// Sum of line amounts, before tax
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(|item| item.amount).sum()
    }

    /// Copy with the counterparty that doesn't match the invoice type cleared
    pub fn normalized(&self) -> Self {
        let mut draft = self.clone();
        match draft.invoice_type {
            InvoiceType::Sales => draft.vendor_id = None,
            InvoiceType::Purchase => draft.customer_id = None,
        }
        draft
    }
}

/// Body of `PUT /invoices/:id/status`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceStatusUpdate {
    pub status: String,
}

/// Body of `POST /invoices/:id/payments`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentRecord {
    pub amount: Decimal,
    pub payment_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}
