//! Customer risk table

use serde::Serialize;

use crate::format;
use crate::models::Customer;
use crate::theme;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerRow {
    pub customer_id: String,
    pub risk_label: String,
    pub badge_class: &'static str,
    pub probability: String,
    pub expected_loss: String,
    pub loss_color: &'static str,
    pub revenue: String,
}

impl From<&Customer> for CustomerRow {
    fn from(customer: &Customer) -> Self {
        Self {
            customer_id: customer.customer_id.clone(),
            risk_label: customer.risk_bucket.label().to_string(),
            badge_class: customer.risk_bucket.badge_class(),
            probability: format::percent(customer.churn_probability),
            expected_loss: format::currency(customer.expected_revenue_loss),
            loss_color: theme::LOSS,
            revenue: format::currency(customer.revenue),
        }
    }
}

/// Table body, rebuilt from scratch on every fetch
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CustomerTable {
    pub rows: Vec<CustomerRow>,
}

impl CustomerTable {
    pub const HEADERS: [&'static str; 5] =
        ["Customer", "Risk", "Churn Probability", "Expected Loss", "Revenue"];

    /// One row per customer in backend order; `limit` caps the row count when set
    pub fn build(customers: &[Customer], limit: Option<usize>) -> Self {
        let take = limit.unwrap_or(customers.len());
        Self {
            rows: customers.iter().take(take).map(CustomerRow::from).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RiskBucket;

    fn customer(id: &str, bucket: RiskBucket, probability: f64) -> Customer {
        Customer {
            customer_id: id.to_string(),
            risk_bucket: bucket,
            churn_probability: probability,
            expected_revenue_loss: 1450.4,
            revenue: 2100.0,
            priority_score: None,
            model_version: None,
            prediction_timestamp: None,
        }
    }

    #[test]
    fn test_one_row_per_customer_in_order() {
        let customers = vec![
            customer("A-1", RiskBucket::High, 0.912),
            customer("B-2", RiskBucket::Medium, 0.455),
            customer("C-3", RiskBucket::Low, 0.1),
        ];

        let table = CustomerTable::build(&customers, None);

        assert_eq!(table.len(), 3);
        let ids: Vec<_> = table.rows.iter().map(|r| r.customer_id.as_str()).collect();
        assert_eq!(ids, vec!["A-1", "B-2", "C-3"]);
    }

    #[test]
    fn test_row_cells_follow_formatting_rules() {
        let row = CustomerRow::from(&customer("A-1", RiskBucket::High, 0.912));

        assert_eq!(row.risk_label, "HIGH");
        assert_eq!(row.badge_class, "badge badge-high");
        assert_eq!(row.probability, "91.2%");
        assert_eq!(row.expected_loss, "$1,450");
        assert_eq!(row.loss_color, theme::RISK_HIGH);
        assert_eq!(row.revenue, "$2,100");
    }

    #[test]
    fn test_unknown_bucket_renders_safely() {
        let row = CustomerRow::from(&customer("Z-9", RiskBucket::from("n/a"), 0.5));
        assert_eq!(row.risk_label, "n/a");
        assert_eq!(row.badge_class, "badge badge-low");
    }

    #[test]
    fn test_limit_caps_rows() {
        let customers = vec![
            customer("A-1", RiskBucket::High, 0.9),
            customer("B-2", RiskBucket::High, 0.8),
        ];
        assert_eq!(CustomerTable::build(&customers, Some(1)).len(), 1);
        assert!(CustomerTable::build(&[], None).is_empty());
    }
}
