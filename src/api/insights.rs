//! `/insights`

use crate::client::{segment, ApiRequest};
use crate::models::Id;

pub fn project_risk(project_id: Id) -> ApiRequest {
    ApiRequest::get(format!("/insights/risk/{}", segment(project_id)))
}

pub fn cash_flow_forecast() -> ApiRequest {
    ApiRequest::get("/insights/forecast/cashflow")
}

pub fn project_health(project_id: Id) -> ApiRequest {
    ApiRequest::get(format!("/insights/health/{}", segment(project_id)))
}
