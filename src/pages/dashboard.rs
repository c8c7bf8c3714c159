//! Dashboard Page
//!
//! KPI cards, alerts and the 30-day cash-flow chart. The three fetches run
//! concurrently and each slice fills in independently.

use async_trait::async_trait;

use super::{fetch_logged, LoadScope, Outcome, Page, PageState, Slice};
use crate::api::dashboard;
use crate::client::{ClientError, HttpClient};
use crate::models::{Alert, CashFlowPoint, Kpis};
use crate::router::Route;

pub struct DashboardPage {
    client: HttpClient,
    scope: LoadScope,
    state: PageState,
    kpis: Slice<Kpis>,
    alerts: Slice<Vec<Alert>>,
    cash_flow: Slice<Vec<CashFlowPoint>>,
}

impl DashboardPage {
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            scope: LoadScope::new(),
            state: PageState::Loading,
            kpis: Slice::default(),
            alerts: Slice::default(),
            cash_flow: Slice::default(),
        }
    }

    pub fn kpis(&self) -> &Slice<Kpis> {
        &self.kpis
    }

    /// KPI figures, zeroed when the fetch never succeeded
    pub fn kpi_values(&self) -> Kpis {
        self.kpis.value().cloned().unwrap_or_default()
    }

    pub fn alerts(&self) -> &Slice<Vec<Alert>> {
        &self.alerts
    }

    pub fn cash_flow(&self) -> &Slice<Vec<CashFlowPoint>> {
        &self.cash_flow
    }

    /// Errors from the last load, labelled by section
    pub fn failures(&self) -> Vec<(&'static str, &ClientError)> {
        [
            ("kpis", self.kpis.error()),
            ("alerts", self.alerts.error()),
            ("cash_flow", self.cash_flow.error()),
        ]
        .into_iter()
        .filter_map(|(name, err)| err.map(|e| (name, e)))
        .collect()
    }
}

#[async_trait]
impl Page for DashboardPage {
    fn route(&self) -> Route {
        Route::Dashboard
    }

    fn state(&self) -> PageState {
        self.state
    }

    fn scope(&self) -> &LoadScope {
        &self.scope
    }

    async fn load(&mut self) -> Outcome {
        let client = &self.client;
        let fetches = async {
            tokio::join!(
                fetch_logged::<Kpis>(client, dashboard::kpis(), "dashboard KPIs"),
                fetch_logged::<Vec<Alert>>(client, dashboard::alerts(), "dashboard alerts"),
                fetch_logged::<Vec<CashFlowPoint>>(client, dashboard::cash_flow(), "cash flow"),
            )
        };

        let Some((kpis, alerts, cash_flow)) = self.scope.run(fetches).await else {
            return Outcome::Cancelled;
        };

        self.kpis.apply(kpis);
        self.alerts.apply(alerts);
        self.cash_flow.apply(cash_flow);
        self.state = PageState::Ready;
        Outcome::Settled
    }
}
