//! `/vendors-customers`

use crate::client::{ApiRequest, ClientResult};
use crate::models::NewParty;

pub fn list_vendors() -> ApiRequest {
    ApiRequest::get("/vendors-customers/vendors")
}

pub fn create_vendor(vendor: &NewParty) -> ClientResult<ApiRequest> {
    ApiRequest::post("/vendors-customers/vendors").json(vendor)
}

pub fn list_customers() -> ApiRequest {
    ApiRequest::get("/vendors-customers/customers")
}

pub fn create_customer(customer: &NewParty) -> ClientResult<ApiRequest> {
    ApiRequest::post("/vendors-customers/customers").json(customer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_paths() {
        assert_eq!(list_vendors().path, "/vendors-customers/vendors");
        assert_eq!(list_customers().path, "/vendors-customers/customers");

        let vendor = create_vendor(&NewParty {
            name: "Acme".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(vendor.body, Some(json!({"name": "Acme"})));
        assert_eq!(
            create_customer(&NewParty::default()).unwrap().path,
            "/vendors-customers/customers"
        );
    }
}
