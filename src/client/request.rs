//! Request and response descriptions
//!
//! Resource modules describe a call as an [`ApiRequest`]; the HTTP client
//! turns it into a wire request. Keeping the description as plain data means
//! the endpoint table can be tested without a network.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

use super::error::{ClientError, ClientResult};

/// HTTP verb used by the backend contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// One backend call: verb, path relative to the base URL, query and body
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Add a query parameter
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Attach a JSON body
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> ClientResult<Self> {
        let value = serde_json::to_value(body)
            .map_err(|e| ClientError::InvalidRequest(format!("Body serialization failed: {}", e)))?;
        self.body = Some(value);
        Ok(self)
    }
}

impl fmt::Display for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)?;
        for (i, (key, value)) in self.query.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{}{}={}", sep, key, value)?;
        }
        Ok(())
    }
}

/// Percent-encode a value for use as a single path segment
pub fn segment(value: impl ToString) -> String {
    urlencoding::encode(&value.to_string()).into_owned()
}

/// A settled backend response: status plus decoded JSON body
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    /// Decode the body into a typed value
    pub fn json<T: DeserializeOwned>(self) -> ClientResult<T> {
        serde_json::from_value(self.body).map_err(ClientError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_with_query() {
        let request = ApiRequest::get("/admin/audit-logs")
            .query("limit", 50)
            .query("offset", 100);
        assert_eq!(request.to_string(), "GET /admin/audit-logs?limit=50&offset=100");
    }

    #[test]
    fn test_json_body() {
        #[derive(Serialize)]
        struct Body {
            name: &'static str,
        }

        let request = ApiRequest::post("/projects").json(&Body { name: "Bridge" }).unwrap();
        assert_eq!(request.body, Some(json!({"name": "Bridge"})));
    }

    #[test]
    fn test_segment_encoding() {
        assert_eq!(segment(42), "42");
        assert_eq!(segment("a/b c"), "a%2Fb%20c");
    }

    #[test]
    fn test_response_decode_mismatch() {
        let response = ApiResponse {
            status: 200,
            body: json!({"unexpected": true}),
        };
        let result: ClientResult<Vec<u32>> = response.json();
        assert!(matches!(result, Err(ClientError::Decode(_))));
    }
}
