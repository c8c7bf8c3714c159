//! Dashboard aggregates

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Precomputed figures for the KPI cards; absent values read as zero
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Kpis {
    pub total_projects: u64,
    pub total_invoices: u64,
    pub pending_payments: Decimal,
    pub cash_balance: Decimal,
    pub total_expenses: Decimal,
    pub high_risk_projects: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub message: String,
}

impl Alert {
    /// Headline shown above the message, e.g. `overdue_invoice` -> `OVERDUE INVOICE`
    pub fn title(&self) -> String {
        self.kind.replace('_', " ").to_uppercase()
    }
}

/// One bar of the cash-flow chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowPoint {
    pub date: String,
    #[serde(default)]
    pub inflow: Decimal,
    #[serde(default)]
    pub outflow: Decimal,
}

impl CashFlowPoint {
    pub fn net(&self) -> Decimal {
        self.inflow - self.outflow
    }
}

/// Insight payloads (risk, forecast, health) are passed through as-is
pub type Insight = serde_json::Value;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_kpis() {
        let kpis: Kpis = serde_json::from_str(r#"{"total_projects":4}"#).unwrap();
        assert_eq!(kpis.total_projects, 4);
        assert_eq!(kpis.cash_balance, Decimal::ZERO);
    }

    #[test]
    fn test_alert_title() {
        let alert = Alert {
            kind: "budget_over_run".to_string(),
            severity: "high".to_string(),
            message: "Project X is over budget".to_string(),
        };
        assert_eq!(alert.title(), "BUDGET OVER RUN");
    }
}
