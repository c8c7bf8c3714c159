//! Backend Client
//!
//! The HTTP layer every resource module goes through.
//!
//! - [`ApiRequest`]: plain description of one call (verb, path, query, body)
//! - [`HttpClient`]: sends descriptions against the configured base URL,
//!   attaching the session's bearer token
//! - [`ClientError`]: network vs. HTTP status failures

mod error;
mod http;
mod request;

pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use request::{segment, ApiRequest, ApiResponse, Method};
