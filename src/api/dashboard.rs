//! `/dashboard`

use crate::client::ApiRequest;

pub fn kpis() -> ApiRequest {
    ApiRequest::get("/dashboard/kpis")
}

pub fn alerts() -> ApiRequest {
    ApiRequest::get("/dashboard/alerts")
}

pub fn cash_flow() -> ApiRequest {
    ApiRequest::get("/dashboard/cashflow")
}
