//! `/invoices`

use crate::client::{segment, ApiRequest, ClientResult};
use crate::models::{Id, InvoiceStatusUpdate, NewInvoice, PaymentRecord};

pub fn list() -> ApiRequest {
    ApiRequest::get("/invoices")
}

pub fn get(id: Id) -> ApiRequest {
    ApiRequest::get(format!("/invoices/{}", segment(id)))
}

pub fn create(invoice: &NewInvoice) -> ClientResult<ApiRequest> {
    ApiRequest::post("/invoices").json(invoice)
}

pub fn update_status(id: Id, update: &InvoiceStatusUpdate) -> ClientResult<ApiRequest> {
    ApiRequest::put(format!("/invoices/{}/status", segment(id))).json(update)
}

pub fn record_payment(id: Id, payment: &PaymentRecord) -> ClientResult<ApiRequest> {
    ApiRequest::post(format!("/invoices/{}/payments", segment(id))).json(payment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Method;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    #[test]
    fn test_paths() {
        let status = update_status(3, &InvoiceStatusUpdate { status: "Paid".to_string() }).unwrap();
        assert_eq!(status.method, Method::Put);
        assert_eq!(status.path, "/invoices/3/status");

        let payment = record_payment(
            3,
            &PaymentRecord {
                amount: Decimal::from(100),
                payment_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                payment_method: None,
                reference: None,
            },
        )
        .unwrap();
        assert_eq!(payment.path, "/invoices/3/payments");
        assert_eq!(payment.body.as_ref().unwrap()["payment_date"], "2024-06-01");
        assert!(payment.body.as_ref().unwrap().get("reference").is_none());

        let draft = NewInvoice::new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(create(&draft).unwrap().path, "/invoices");
        assert_eq!(get(3).path, "/invoices/3");
        assert_eq!(list().path, "/invoices");
    }
}
