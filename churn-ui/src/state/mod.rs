//! Application State
//!
//! Global reactive state and form control state.

pub mod global;
pub mod submit;

pub use global::{provide_global_state, GlobalState};
pub use submit::ButtonSignals;
