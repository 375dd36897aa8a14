//! Terminal rendering of the dashboard widgets

use std::fmt::Write;

use crate::view::{ChartSpec, CustomerTable, DashboardView, PredictionPanel};

/// Width of the longest bar in a text chart
const BAR_WIDTH: usize = 30;

pub fn render_dashboard(view: &DashboardView) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Churn Intelligence Dashboard");
    let _ = writeln!(output);
    let _ = writeln!(output, "## Key Metrics");
    match &view.kpis {
        Some(kpis) => {
            let _ = writeln!(output, "- Total Revenue: {}", kpis.total_revenue);
            let _ = writeln!(output, "- Revenue at Risk: {}", kpis.revenue_at_risk);
            let _ = writeln!(output, "- Churn Rate: {}", kpis.churn_rate);
            if let Some(high_risk) = &kpis.high_risk {
                let _ = writeln!(output, "- High Risk Share: {}", high_risk);
            }
            if let Some(customers) = &kpis.customers {
                let _ = writeln!(output, "- Customers: {}", customers);
            }
        }
        None => {
            let _ = writeln!(output, "Not loaded.");
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Risk Distribution");
    match &view.risk_distribution {
        Some(chart) => output.push_str(&render_bars(&chart.spec, "")),
        None => {
            let _ = writeln!(output, "Not loaded.");
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Churn by Segment");
    match &view.segments {
        Some(chart) => output.push_str(&render_bars(&chart.spec, "%")),
        None => {
            let _ = writeln!(output, "Not loaded.");
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## High-Risk Customers");
    match &view.customers {
        Some(table) => output.push_str(&render_customers(table)),
        None => {
            let _ = writeln!(output, "Not loaded.");
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Model Performance");
    match &view.model_metrics {
        Some(metrics) => {
            let _ = write!(output, "- Model: {}", metrics.model_version);
            if let Some(selected) = &metrics.selected_model {
                let _ = write!(output, " ({})", selected);
            }
            let _ = writeln!(output);
            let _ = writeln!(output, "- Training rows: {}", metrics.training_rows);
            let _ = writeln!(
                output,
                "- ROC AUC {} | Precision {} | Recall {} | F1 {}",
                metrics.roc_auc, metrics.precision, metrics.recall, metrics.f1
            );
        }
        None => {
            let _ = writeln!(output, "Not loaded.");
        }
    }

    if let Some(prediction) = &view.prediction {
        let _ = writeln!(output);
        let _ = writeln!(output, "## Live Prediction");
        output.push_str(&render_prediction(prediction));
    }

    let _ = writeln!(output);
    match view.last_refresh() {
        Some(at) => {
            let _ = writeln!(output, "Last refresh: {}", at.format("%Y-%m-%d %H:%M:%S UTC"));
        }
        None => {
            let _ = writeln!(output, "Last refresh: never");
        }
    }

    output
}

/// Customer table as aligned text columns
pub fn render_customers(table: &CustomerTable) -> String {
    let mut output = String::new();

    if table.is_empty() {
        let _ = writeln!(output, "No customers.");
        return output;
    }

    let id_width = table
        .rows
        .iter()
        .map(|r| r.customer_id.chars().count())
        .chain(std::iter::once(CustomerTable::HEADERS[0].len()))
        .max()
        .unwrap_or(0);

    let [customer, risk, probability, loss, revenue] = CustomerTable::HEADERS;
    let _ = writeln!(
        output,
        "{:<id_width$}  {:<6}  {:>17}  {:>13}  {:>12}",
        customer, risk, probability, loss, revenue
    );

    for row in &table.rows {
        let _ = writeln!(
            output,
            "{:<id_width$}  {:<6}  {:>17}  {:>13}  {:>12}",
            row.customer_id, row.risk_label, row.probability, row.expected_loss, row.revenue
        );
    }

    output
}

pub fn render_prediction(panel: &PredictionPanel) -> String {
    let mut output = String::new();

    if let Some(customer_id) = &panel.customer_id {
        let _ = writeln!(output, "- Customer: {}", customer_id);
    }
    let _ = writeln!(output, "- Risk: {}", panel.risk_label);
    let _ = writeln!(
        output,
        "- Churn probability: {} {}",
        panel.probability,
        bar(panel.gauge_percent, 100.0)
    );
    let _ = writeln!(output, "- Expected loss: {}", panel.expected_loss);
    let _ = writeln!(output, "- Priority score: {}", panel.priority);

    output
}

/// One labelled bar per point of the chart's first series
fn render_bars(spec: &ChartSpec, unit: &str) -> String {
    let mut output = String::new();

    let values = match spec.datasets.first() {
        Some(dataset) if !dataset.values.is_empty() => &dataset.values,
        _ => {
            let _ = writeln!(output, "No data.");
            return output;
        }
    };

    let max = values.iter().copied().fold(0.0_f64, f64::max);
    let label_width = spec
        .labels
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0);

    for (label, value) in spec.labels.iter().zip(values) {
        let _ = writeln!(
            output,
            "{:<label_width$}  {:<BAR_WIDTH$}  {}{}",
            label,
            bar(*value, max),
            crate::format::raw_number(*value),
            unit
        );
    }

    output
}

fn bar(value: f64, max: f64) -> String {
    if !(value.is_finite() && max.is_finite()) || max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let filled = ((value / max).min(1.0) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(filled)
}
