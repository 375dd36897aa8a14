//! Live Prediction Component
//!
//! Form for scoring a customer, and the result card with the score gauge.

use churn_dashboard::dashboard::SubmitError;
use churn_dashboard::predict::{PredictionForm, CONTRACT_OPTIONS, GENDER_OPTIONS, SENIOR_OPTIONS};
use leptos::*;

use crate::app::ChurnDashboard;
use crate::state::{ButtonSignals, GlobalState};

/// Names of the submitted form controls, in form order
const FIELD_NAMES: [&str; 7] = [
    "customer_id",
    "gender",
    "seniorcitizen",
    "tenure",
    "contract",
    "monthly_charges",
    "revenue",
];

/// Prediction form and result card
#[component]
pub fn PredictForm() -> impl IntoView {
    let dashboard = use_context::<ChurnDashboard>().expect("Dashboard not found");
    let form_ref = create_node_ref::<html::Form>();
    let button = ButtonSignals::new();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let Some(form_el) = form_ref.get() else {
            return;
        };
        let data = match web_sys::FormData::new_with_form(&form_el) {
            Ok(data) => data,
            Err(e) => {
                web_sys::console::error_1(&e);
                return;
            }
        };

        let mut form = PredictionForm::new();
        for name in FIELD_NAMES {
            if let Some(value) = data.get(name).as_string() {
                form.set(name, value);
            }
        }

        let dashboard = dashboard.clone();
        spawn_local(async move {
            match dashboard.submit_prediction(&form, &button).await {
                Ok(_) | Err(SubmitError::Request(_)) => {}
                Err(SubmitError::InFlight) => {
                    web_sys::console::warn_1(&"Prediction already in flight".into());
                }
            }
        });
    };

    view! {
        <div class="predict-layout">
            <form id="predict-form" class="card" node_ref=form_ref on:submit=on_submit>
                <h3>"Customer Profile"</h3>

                <TextField name="customer_id" label="Customer ID" value="NEW-001" />
                <SelectField name="gender" label="Gender" options=&GENDER_OPTIONS />
                <SelectField name="seniorcitizen" label="Senior Citizen" options=&SENIOR_OPTIONS />
                <NumberField name="tenure" label="Tenure (months)" value="12" step="1" />
                <SelectField name="contract" label="Contract" options=&CONTRACT_OPTIONS />
                <NumberField name="monthly_charges" label="Monthly Charges" value="70.0" step="0.01" />
                <NumberField name="revenue" label="Annual Revenue" value="840.0" step="0.01" />

                <button
                    type="submit"
                    class="btn-primary"
                    disabled=move || button.disabled.get()
                >
                    {move || button.label.get()}
                </button>
            </form>

            <PredictionResult />
        </div>
    }
}

#[component]
fn TextField(name: &'static str, label: &'static str, value: &'static str) -> impl IntoView {
    view! {
        <label class="field">
            <span>{label}</span>
            <input type="text" name=name value=value required=true />
        </label>
    }
}

#[component]
fn NumberField(
    name: &'static str,
    label: &'static str,
    value: &'static str,
    step: &'static str,
) -> impl IntoView {
    view! {
        <label class="field">
            <span>{label}</span>
            <input type="number" name=name value=value step=step min="0" required=true />
        </label>
    }
}

#[component]
fn SelectField(
    name: &'static str,
    label: &'static str,
    options: &'static [&'static str],
) -> impl IntoView {
    view! {
        <label class="field">
            <span>{label}</span>
            <select name=name>
                {options
                    .iter()
                    .map(|option| view! { <option value=*option>{*option}</option> })
                    .collect_view()}
            </select>
        </label>
    }
}

/// Result card, hidden until the first successful prediction
#[component]
fn PredictionResult() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let prediction = state.prediction;

    view! {
        <div id="prediction-result" class="card" class:hidden=move || prediction.with(Option::is_none)>
            {move || {
                prediction.get().map(|p| view! {
                    <div class="gauge">
                        <svg viewBox="0 0 36 36" class="gauge-svg">
                            <path
                                class="gauge-track"
                                d="M18 2.0845 a 15.9155 15.9155 0 0 1 0 31.831 a 15.9155 15.9155 0 0 1 0 -31.831"
                            />
                            <path
                                id="score-circle"
                                class="gauge-fill"
                                stroke=p.risk_color
                                stroke-dasharray=p.gauge_dasharray
                                d="M18 2.0845 a 15.9155 15.9155 0 0 1 0 31.831 a 15.9155 15.9155 0 0 1 0 -31.831"
                            />
                        </svg>
                        <div id="pred-prob" class="gauge-label">{p.probability}</div>
                    </div>

                    <div id="pred-risk" class="risk-label" style=format!("color:{}", p.risk_color)>
                        {p.risk_label}
                    </div>
                    <div class="metric-list">
                        {p.customer_id.map(|id| view! { <div>"Customer: " <strong>{id}</strong></div> })}
                        <div>"Expected loss: " <strong id="pred-loss">{p.expected_loss}</strong></div>
                        <div>"Priority score: " <strong id="pred-priority">{p.priority}</strong></div>
                    </div>
                })
            }}
        </div>
    }
}
