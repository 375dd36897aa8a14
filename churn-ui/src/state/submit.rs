//! Submit button state for the prediction form

use churn_dashboard::predict::{SubmitControl, SUBMIT_LABEL};
use leptos::*;

/// Label and disabled flag of the prediction submit button
#[derive(Clone, Copy)]
pub struct ButtonSignals {
    pub label: RwSignal<String>,
    pub disabled: RwSignal<bool>,
}

impl ButtonSignals {
    pub fn new() -> Self {
        Self {
            label: create_rw_signal(SUBMIT_LABEL.to_string()),
            disabled: create_rw_signal(false),
        }
    }
}

impl SubmitControl for ButtonSignals {
    fn label(&self) -> String {
        self.label.get_untracked()
    }

    fn set_label(&self, label: &str) {
        self.label.set(label.to_string());
    }

    fn is_disabled(&self) -> bool {
        self.disabled.get_untracked()
    }

    fn set_disabled(&self, disabled: bool) {
        self.disabled.set(disabled);
    }
}
