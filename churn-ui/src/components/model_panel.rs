//! Model Performance Component

use leptos::*;

use crate::components::Chart;
use crate::state::GlobalState;

/// Model metrics with the quality radar
#[component]
pub fn ModelPanel() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let metrics = state.model_metrics;

    view! {
        <div class="card">
            <h3>"Model Performance"</h3>
            {move || {
                metrics.get().map(|m| view! {
                    <div class="metric-list">
                        <div>"Version: " <strong>{m.model_version}</strong></div>
                        {m.selected_model.map(|s| view! { <div>"Algorithm: " <strong>{s}</strong></div> })}
                        <div>"Training rows: " <strong>{m.training_rows}</strong></div>
                        <div>"ROC AUC: " <strong>{m.roc_auc}</strong></div>
                        <div>"Precision: " <strong>{m.precision}</strong></div>
                        <div>"Recall: " <strong>{m.recall}</strong></div>
                        <div>"F1: " <strong>{m.f1}</strong></div>
                    </div>
                })
            }}
            <Chart instance=state.model_radar width=420 height=320 />
        </div>
    }
}
