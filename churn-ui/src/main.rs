//! Churn Dashboard
//!
//! Churn intelligence dashboard built with Leptos (WASM).
//!
//! # Features
//!
//! - KPI cards, risk distribution and segment charts
//! - High-risk customer table
//! - Live churn prediction with score gauge
//! - Model performance radar
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. Fetching, formatting and the submit flow come from the
//! `churn-dashboard` core crate; this crate supplies the `fetch` transport,
//! signal-backed widget state and canvas rendering.

use leptos::*;

mod api;
mod app;
mod components;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
