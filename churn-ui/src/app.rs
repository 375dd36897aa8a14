//! App Root Component
//!
//! Sidebar layout, the four dashboard views and global providers. The shared
//! dashboard controller is created here and provided to the components.

use churn_dashboard::client::ApiClient;
use churn_dashboard::dashboard::Dashboard;
use churn_dashboard::nav::View;
use leptos::*;

use crate::api::GlooTransport;
use crate::components::{Chart, CustomerTable, KpiCards, ModelPanel, Nav, PredictForm, Toast};
use crate::state::{provide_global_state, GlobalState};

/// Controller wired to the browser transport and the signal state
pub type ChurnDashboard = Dashboard<GlooTransport, GlobalState>;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    let state = provide_global_state();

    let transport = GlooTransport::from_location();
    let dashboard: ChurnDashboard = Dashboard::new(ApiClient::new(transport), state);
    provide_context(dashboard.clone());

    // Initial load, all widgets concurrently
    spawn_local(async move {
        state.loading.set(true);
        let report = dashboard.load_all().await;
        for (widget, err) in &report.failed {
            web_sys::console::error_1(&format!("{}: {}", widget.title(), err).into());
        }
        state.loading.set(false);
    });

    view! {
        <div class="app-shell">
            <Nav />

            <main class="main-content">
                <ViewSection section=View::Overview title="Executive Overview">
                    <KpiCards />
                    <div class="chart-grid">
                        <div class="card">
                            <h3>"Risk Distribution"</h3>
                            <Chart instance=state.risk_distribution />
                        </div>
                        <div class="card">
                            <h3>"Churn by Segment"</h3>
                            <Chart instance=state.segments />
                        </div>
                    </div>
                </ViewSection>

                <ViewSection section=View::Customers title="Customer Risk">
                    <CustomerTable />
                </ViewSection>

                <ViewSection section=View::Predict title="Live Prediction">
                    <PredictForm />
                </ViewSection>

                <ViewSection section=View::Model title="Model Intelligence">
                    <ModelPanel />
                </ViewSection>
            </main>

            <Footer />

            <Toast />
        </div>
    }
}

/// One switchable view container
#[component]
fn ViewSection(section: View, title: &'static str, children: Children) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <section
            id=section.container_id()
            class="view-section"
            class:hidden=move || state.nav.with(|nav| !nav.is_visible(section))
        >
            <h2>{title}</h2>
            {children()}
        </section>
    }
}

/// Footer with refresh time and loading indicator
#[component]
fn Footer() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <footer class="footer">
            <div class="text-muted">
                {move || {
                    state.last_refresh.get()
                        .map(|dt| format!("Last refresh: {}", dt.format("%H:%M:%S")))
                        .unwrap_or_else(|| "Not loaded".to_string())
                }}
            </div>

            {move || {
                if state.loading.get() {
                    view! {
                        <div class="loading">
                            <div class="loading-spinner" />
                            <span>"Loading..."</span>
                        </div>
                    }.into_view()
                } else {
                    view! {}.into_view()
                }
            }}
        </footer>
    }
}
