//! Tab Navigation
//!
//! Single-page view switching. Callers pass both the target view and the nav
//! item that was activated; nothing is read from ambient event state, so
//! keyboard and programmatic navigation behave like clicks.

use serde::Serialize;
use thiserror::Error;

/// A switchable view container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Overview,
    Customers,
    Predict,
    Model,
}

impl View {
    pub const ALL: [View; 4] = [View::Overview, View::Customers, View::Predict, View::Model];

    pub fn name(self) -> &'static str {
        match self {
            View::Overview => "overview",
            View::Customers => "customers",
            View::Predict => "predict",
            View::Model => "model",
        }
    }

    /// Element id of the view container
    pub fn container_id(self) -> String {
        format!("view-{}", self.name())
    }

    pub fn from_name(name: &str) -> Option<View> {
        View::ALL.iter().copied().find(|v| v.name() == name)
    }
}

/// One sidebar entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub icon: &'static str,
    pub view: View,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavError {
    #[error("No view named '{0}'")]
    UnknownView(String),

    #[error("No navigation item at index {0}")]
    UnknownItem(usize),
}

/// Visibility of every view and active state of every nav item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavState {
    items: Vec<NavItem>,
    visible: View,
    active_item: usize,
}

impl Default for NavState {
    fn default() -> Self {
        Self::new()
    }
}

impl NavState {
    /// The dashboard sidebar, starting on the overview
    pub fn new() -> Self {
        let items = vec![
            NavItem { label: "Overview", icon: "📊", view: View::Overview },
            NavItem { label: "Customers", icon: "👥", view: View::Customers },
            NavItem { label: "Live Prediction", icon: "🔮", view: View::Predict },
            NavItem { label: "Model", icon: "🧠", view: View::Model },
        ];

        Self {
            items,
            visible: View::Overview,
            active_item: 0,
        }
    }

    /// Show the view named `tab_name` and mark the item at `activated` active.
    ///
    /// Every other view is hidden and every other item deactivated. On error
    /// nothing changes.
    pub fn switch_tab(&mut self, tab_name: &str, activated: usize) -> Result<View, NavError> {
        let view =
            View::from_name(tab_name).ok_or_else(|| NavError::UnknownView(tab_name.to_string()))?;
        if activated >= self.items.len() {
            return Err(NavError::UnknownItem(activated));
        }

        self.visible = view;
        self.active_item = activated;
        tracing::debug!(view = view.name(), item = activated, "Switched tab");
        Ok(view)
    }

    /// Activate a nav item and show its own view
    pub fn activate(&mut self, activated: usize) -> Result<View, NavError> {
        let view = self
            .items
            .get(activated)
            .map(|item| item.view)
            .ok_or(NavError::UnknownItem(activated))?;
        self.switch_tab(view.name(), activated)
    }

    pub fn items(&self) -> &[NavItem] {
        &self.items
    }

    pub fn visible(&self) -> View {
        self.visible
    }

    pub fn is_visible(&self, view: View) -> bool {
        self.visible == view
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active_item == index
    }
}
