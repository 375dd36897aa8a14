//! High-Risk Customer Table Component

use churn_dashboard::view::CustomerTable as Table;
use leptos::*;

use crate::state::GlobalState;

/// Customer table, rebuilt from the latest fetch
#[component]
pub fn CustomerTable() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let customers = state.customers;

    view! {
        <div class="card">
            <h3>"High-Risk Customers"</h3>
            <table class="data-table">
                <thead>
                    <tr>
                        {Table::HEADERS.iter().map(|h| view! { <th>{*h}</th> }).collect_view()}
                    </tr>
                </thead>
                <tbody id="customer-table-body">
                    {move || {
                        customers.with(|table| {
                            table
                                .iter()
                                .flat_map(|t| t.rows.iter())
                                .map(|row| {
                                    view! {
                                        <tr>
                                            <td>{row.customer_id.clone()}</td>
                                            <td>
                                                <span class=row.badge_class>{row.risk_label.clone()}</span>
                                            </td>
                                            <td>{row.probability.clone()}</td>
                                            <td style=format!("color:{}", row.loss_color)>
                                                {row.expected_loss.clone()}
                                            </td>
                                            <td>{row.revenue.clone()}</td>
                                        </tr>
                                    }
                                })
                                .collect_view()
                        })
                    }}
                </tbody>
            </table>
        </div>
    }
}
