//! KPI cards

use serde::Serialize;

use crate::format;
use crate::models::KpiSummary;

/// Text of the KPI cards
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiPanel {
    pub total_revenue: String,
    pub revenue_at_risk: String,
    /// Backend percentage, verbatim with a `%` suffix
    pub churn_rate: String,
    pub high_risk: Option<String>,
    pub customers: Option<String>,
}

impl From<&KpiSummary> for KpiPanel {
    fn from(kpis: &KpiSummary) -> Self {
        Self {
            total_revenue: format::currency(kpis.total_revenue),
            revenue_at_risk: format::currency(kpis.revenue_at_risk),
            churn_rate: format::verbatim_percent(kpis.churn_rate_pct),
            high_risk: kpis.high_risk_pct.map(format::verbatim_percent),
            customers: kpis.total_customers.map(format::count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(churn_rate_pct: f64) -> KpiSummary {
        KpiSummary {
            total_revenue: 1_254_300.0,
            revenue_at_risk: 182_505.75,
            churn_rate_pct,
            high_risk_pct: Some(12.4),
            total_customers: None,
            high_risk_customers: None,
        }
    }

    #[test]
    fn test_churn_rate_is_verbatim() {
        assert_eq!(KpiPanel::from(&summary(26.54)).churn_rate, "26.54%");
        assert_eq!(KpiPanel::from(&summary(27.0)).churn_rate, "27%");
    }

    #[test]
    fn test_revenue_uses_currency_format() {
        let panel = KpiPanel::from(&summary(26.5));
        assert_eq!(panel.total_revenue, "$1,254,300");
        assert_eq!(panel.revenue_at_risk, "$182,506");
        assert_eq!(panel.high_risk.as_deref(), Some("12.4%"));
        assert_eq!(panel.customers, None);
    }
}
