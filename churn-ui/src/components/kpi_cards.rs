//! KPI Card Components

use leptos::*;

use crate::state::GlobalState;

/// The three headline KPI cards
#[component]
pub fn KpiCards() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let kpis = state.kpis;

    view! {
        <div class="kpi-grid">
            <KpiCard
                title="Total Revenue"
                value=Signal::derive(move || kpis.with(|k| k.as_ref().map(|k| k.total_revenue.clone())))
            />
            <KpiCard
                title="Revenue at Risk"
                value=Signal::derive(move || kpis.with(|k| k.as_ref().map(|k| k.revenue_at_risk.clone())))
                accent="text-danger"
            />
            <KpiCard
                title="Churn Rate"
                value=Signal::derive(move || kpis.with(|k| k.as_ref().map(|k| k.churn_rate.clone())))
            />
        </div>
    }
}

#[component]
fn KpiCard(
    title: &'static str,
    #[prop(into)]
    value: Signal<Option<String>>,
    #[prop(default = "")]
    accent: &'static str,
) -> impl IntoView {
    view! {
        <div class="card kpi-card">
            <span class="kpi-title">{title}</span>
            <div class=format!("kpi-value {}", accent)>
                {move || value.get().unwrap_or_else(|| "—".to_string())}
            </div>
        </div>
    }
}
