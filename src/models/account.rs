//! Chart of accounts entries

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AccountType {
    #[default]
    Asset,
    Liability,
    Income,
    Expense,
}

impl AccountType {
    pub const ALL: [AccountType; 4] = [
        AccountType::Asset,
        AccountType::Liability,
        AccountType::Income,
        AccountType::Expense,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Asset => "Asset",
            AccountType::Liability => "Liability",
            AccountType::Income => "Income",
            AccountType::Expense => "Expense",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Unknown account type: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: Id,
    pub account_code: String,
    pub account_name: String,
    pub account_type: AccountType,
    #[serde(default)]
    pub balance: Decimal,
    pub currency: String,
}

/// Body of `POST /finance/accounts` and `PUT /finance/accounts/:id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAccount {
    pub account_code: String,
    pub account_name: String,
    pub account_type: AccountType,
    pub balance: Decimal,
    pub currency: String,
}

impl Default for NewAccount {
    fn default() -> Self {
        Self {
            account_code: String::new(),
            account_name: String::new(),
            account_type: AccountType::Asset,
            balance: Decimal::ZERO,
            currency: "USD".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_account_type_parse() {
        assert_eq!(AccountType::from_str("Liability"), Ok(AccountType::Liability));
        assert!(AccountType::from_str("liability").is_err());
    }

    #[test]
    fn test_decode_account() {
        let account: Account = serde_json::from_str(
            r#"{"id":3,"account_code":"1000","account_name":"Cash","account_type":"Asset","balance":1250.5,"currency":"USD"}"#,
        )
        .unwrap();
        assert_eq!(account.balance, Decimal::from_str("1250.5").unwrap());
    }
}
