//! Navigation Component
//!
//! Sidebar with brand and view tabs. Each item passes its own index as the
//! activated item, so keyboard activation behaves like a click.

use leptos::*;

use crate::state::GlobalState;

/// Sidebar navigation component
#[component]
pub fn Nav() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let items = state.nav.with_untracked(|nav| nav.items().to_vec());

    view! {
        <nav class="sidebar">
            <div class="brand">
                <span class="brand-icon">"📉"</span>
                <span class="brand-name">"Churn Intelligence"</span>
            </div>

            <ul class="nav-links">
                {items
                    .into_iter()
                    .enumerate()
                    .map(|(idx, item)| {
                        let view_name = item.view.name();
                        view! {
                            <li
                                class:active=move || state.nav.with(|nav| nav.is_active(idx))
                                tabindex="0"
                                on:click=move |_| state.switch_tab(view_name, idx)
                                on:keydown=move |ev: web_sys::KeyboardEvent| {
                                    if ev.key() == "Enter" || ev.key() == " " {
                                        ev.prevent_default();
                                        state.switch_tab(view_name, idx);
                                    }
                                }
                            >
                                <span class="nav-icon">{item.icon}</span>
                                <span>{item.label}</span>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </nav>
    }
}
