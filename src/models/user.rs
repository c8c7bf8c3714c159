//! Users and credentials

use serde::{Deserialize, Serialize};

use super::Id;
use crate::access::Role;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Id,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub is_active: bool,
}

impl User {
    pub fn status_label(&self) -> &'static str {
        if self.is_active {
            "Active"
        } else {
            "Inactive"
        }
    }
}

/// Body of `POST /users/login`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Body of `POST /users/register` from the sign-up page
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Body of `POST /users/register` from user management, with a role
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Body of `PUT /users/:id`; unset fields are left alone
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_user_default_role() {
        let body = serde_json::to_value(NewUser::default()).unwrap();
        assert_eq!(body["role"], "user");
    }

    #[test]
    fn test_update_skips_unset() {
        let update = UserUpdate {
            is_active: Some(false),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(update).unwrap(), json!({"is_active": false}));
    }

    #[test]
    fn test_status_label() {
        let user: User = serde_json::from_value(json!({
            "id": 2, "name": "Bo", "email": "bo@example.com", "role": "Admin", "is_active": true
        }))
        .unwrap();
        assert_eq!(user.status_label(), "Active");
    }
}
