//! UI Components
//!
//! Leptos components for the dashboard widgets.

pub mod chart;
pub mod customer_table;
pub mod kpi_cards;
pub mod model_panel;
pub mod nav;
pub mod predict_form;
pub mod toast;

pub use chart::Chart;
pub use customer_table::CustomerTable;
pub use kpi_cards::KpiCards;
pub use model_panel::ModelPanel;
pub use nav::Nav;
pub use predict_form::PredictForm;
pub use toast::Toast;
