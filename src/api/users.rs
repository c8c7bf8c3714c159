//! `/users`

use crate::client::{segment, ApiRequest, ClientResult};
use crate::models::{Credentials, Id, UserUpdate};
use serde::Serialize;

/// Accepts either a [`Registration`](crate::models::Registration) or a
/// [`NewUser`](crate::models::NewUser)
pub fn register<T: Serialize>(body: &T) -> ClientResult<ApiRequest> {
    ApiRequest::post("/users/register").json(body)
}

pub fn login(credentials: &Credentials) -> ClientResult<ApiRequest> {
    ApiRequest::post("/users/login").json(credentials)
}

pub fn list() -> ApiRequest {
    ApiRequest::get("/users")
}

pub fn get(id: Id) -> ApiRequest {
    ApiRequest::get(format!("/users/{}", segment(id)))
}

pub fn update(id: Id, update: &UserUpdate) -> ClientResult<ApiRequest> {
    ApiRequest::put(format!("/users/{}", segment(id))).json(update)
}

pub fn delete(id: Id) -> ApiRequest {
    ApiRequest::delete(format!("/users/{}", segment(id)))
}
