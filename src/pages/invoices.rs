//! Invoices Page
//!
//! Invoice list plus the "Create Invoice" form. Customers and vendors are
//! fetched alongside the invoices to populate the counterparty picker.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{
    fetch_logged, submit_logged, FormPage, LoadScope, Outcome, Page, PageState, Slice, Submission,
};
use crate::api::{invoices, parties};
use crate::client::HttpClient;
use crate::models::{Customer, Id, Invoice, InvoiceType, LineItem, NewInvoice, Party, Vendor};
use crate::router::Route;

/// A single field edit on a draft line item
#[derive(Debug, Clone, PartialEq)]
pub enum ItemEdit {
    Description(String),
    Quantity(Decimal),
    UnitPrice(Decimal),
    /// Stored as given; quantity and unit price are untouched
    Amount(Decimal),
}

pub struct InvoicesPage {
    client: HttpClient,
    scope: LoadScope,
    state: PageState,
    invoices: Slice<Vec<Invoice>>,
    customers: Slice<Vec<Customer>>,
    vendors: Slice<Vec<Vendor>>,
    today: NaiveDate,
    draft: NewInvoice,
}

impl InvoicesPage {
    pub fn new(client: HttpClient) -> Self {
        Self::with_today(client, chrono::Local::now().date_naive())
    }

    /// Page whose drafts are dated `today`
    pub fn with_today(client: HttpClient, today: NaiveDate) -> Self {
        Self {
            client,
            scope: LoadScope::new(),
            state: PageState::Loading,
            invoices: Slice::default(),
            customers: Slice::default(),
            vendors: Slice::default(),
            today,
            draft: NewInvoice::new(today),
        }
    }

    pub fn invoices(&self) -> &Slice<Vec<Invoice>> {
        &self.invoices
    }

    pub fn customers(&self) -> &Slice<Vec<Customer>> {
        &self.customers
    }

    pub fn vendors(&self) -> &Slice<Vec<Vendor>> {
        &self.vendors
    }

    pub fn draft(&self) -> &NewInvoice {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut NewInvoice {
        &mut self.draft
    }

    pub fn set_invoice_type(&mut self, invoice_type: InvoiceType) {
        self.draft.invoice_type = invoice_type;
    }

    /// Parties the picker offers for the drafted invoice type
    pub fn counterparties(&self) -> &[Party] {
        match self.draft.invoice_type {
            InvoiceType::Sales => self.customers.items(),
            InvoiceType::Purchase => self.vendors.items(),
        }
    }

    /// Pick the customer (sales) or vendor (purchase)
    pub fn select_counterparty(&mut self, id: Option<Id>) {
        match self.draft.invoice_type {
            InvoiceType::Sales => self.draft.customer_id = id,
            InvoiceType::Purchase => self.draft.vendor_id = id,
        }
    }

    pub fn add_item(&mut self) {
        self.draft.items.push(LineItem::default());
    }

    /// Remove a line; the last remaining line stays
    pub fn remove_item(&mut self, index: usize) -> bool {
        if self.draft.items.len() <= 1 || index >= self.draft.items.len() {
            return false;
        }
        self.draft.items.remove(index);
        true
    }

    /// Apply an edit to one line
    ///
    /// Returns false for an unknown index, or when a quantity or price edit
    /// would overflow the line amount (the line is then left as it was).
    pub fn edit_item(&mut self, index: usize, edit: ItemEdit) -> bool {
        let Some(item) = self.draft.items.get_mut(index) else {
            return false;
        };
        match edit {
            ItemEdit::Description(description) => item.description = description,
            ItemEdit::Quantity(quantity) => return item.set_quantity(quantity),
            ItemEdit::UnitPrice(unit_price) => return item.set_unit_price(unit_price),
            ItemEdit::Amount(amount) => item.set_amount(amount),
        }
        true
    }

    /// Create the drafted invoice, then refetch
    pub async fn submit(&mut self) -> Submission {
        let request = invoices::create(&self.draft.normalized());
        let created = match self
            .scope
            .run(submit_logged(&self.client, request, "creating invoice"))
            .await
        {
            Some(result) => result,
            None => return Submission::Cancelled,
        };

        if let Err(e) = created {
            return Submission::Failed(e);
        }

        tracing::info!(invoice_type = %self.draft.invoice_type, "Invoice created");
        self.draft = NewInvoice::new(self.today);
        self.state = PageState::Ready;

        // the record exists either way; a cancelled refetch only leaves the list stale
        if self.refresh().await == Outcome::Cancelled {
            tracing::debug!("Refetch after create cancelled");
        }
        Submission::Completed
    }

    async fn refresh(&mut self) -> Outcome {
        let client = &self.client;
        let fetches = async {
            tokio::join!(
                fetch_logged::<Vec<Invoice>>(client, invoices::list(), "invoices"),
                fetch_logged::<Vec<Customer>>(client, parties::list_customers(), "customers"),
                fetch_logged::<Vec<Vendor>>(client, parties::list_vendors(), "vendors"),
            )
        };

        let Some((invoices, customers, vendors)) = self.scope.run(fetches).await else {
            return Outcome::Cancelled;
        };

        self.invoices.apply(invoices);
        self.customers.apply(customers);
        self.vendors.apply(vendors);
        Outcome::Settled
    }
}

#[async_trait]
impl Page for InvoicesPage {
    fn route(&self) -> Route {
        Route::Invoices
    }

    fn state(&self) -> PageState {
        self.state
    }

    fn scope(&self) -> &LoadScope {
        &self.scope
    }

    async fn load(&mut self) -> Outcome {
        let outcome = self.refresh().await;
        if outcome == Outcome::Settled && self.state == PageState::Loading {
            self.state = PageState::Ready;
        }
        outcome
    }
}

impl FormPage for InvoicesPage {
    fn state_mut(&mut self) -> &mut PageState {
        &mut self.state
    }
}
