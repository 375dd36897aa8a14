//! Model metrics panel

use serde::Serialize;

use super::chart::ChartSpec;
use crate::format;
use crate::models::ModelMetrics;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsPanel {
    pub model_version: String,
    pub selected_model: Option<String>,
    pub training_rows: String,
    pub roc_auc: String,
    pub precision: String,
    pub recall: String,
    pub f1: String,
    pub radar: ChartSpec,
}

impl From<&ModelMetrics> for MetricsPanel {
    fn from(metrics: &ModelMetrics) -> Self {
        Self {
            model_version: metrics.model_version.clone(),
            selected_model: metrics.selected_model.clone(),
            training_rows: format::count(metrics.training_rows),
            roc_auc: score(metrics.roc_auc),
            precision: score(metrics.precision_score),
            recall: score(metrics.recall_score),
            f1: score(metrics.f1()),
            radar: ChartSpec::model_radar(metrics),
        }
    }
}

fn score(value: f64) -> String {
    format!("{:.3}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::chart::ChartKind;

    #[test]
    fn test_panel_from_metrics() {
        let metrics = ModelMetrics {
            model_version: "v2.0-unified".to_string(),
            roc_auc: 0.8412,
            precision_score: 0.5231,
            recall_score: 0.7805,
            training_rows: 5634,
            f1_score: None,
            selected_model: Some("random_forest".to_string()),
            run_timestamp: None,
        };

        let panel = MetricsPanel::from(&metrics);

        assert_eq!(panel.training_rows, "5,634");
        assert_eq!(panel.roc_auc, "0.841");
        assert_eq!(panel.precision, "0.523");
        assert_eq!(panel.radar.kind, ChartKind::Radar);
        assert_eq!(panel.radar.labels, vec!["Precision", "Recall", "F1", "AUC"]);
        assert_eq!(panel.radar.datasets[0].values[3], 0.8412);
    }
}
