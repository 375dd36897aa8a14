//! Live Prediction Form
//!
//! Collects the prediction form fields, coerces the numeric ones the same way
//! a browser form handler does, and guards the submit control while a request
//! is in flight.

use serde::Serialize;
use serde_json::{Map, Value};
use std::cell::{Cell, RefCell};

/// Fields sent as floating point numbers
pub const FLOAT_FIELDS: [&str; 2] = ["revenue", "monthly_charges"];
/// Fields sent as integers
pub const INT_FIELDS: [&str; 1] = ["tenure"];

/// Label shown on the submit control while a prediction is running
pub const BUSY_LABEL: &str = "⏳ Analyzing...";
/// Default submit label
pub const SUBMIT_LABEL: &str = "Predict Churn Risk";

/// Choices offered by the form for the categorical model inputs
pub const GENDER_OPTIONS: [&str; 2] = ["Male", "Female"];
pub const SENIOR_OPTIONS: [&str; 2] = ["No", "Yes"];
pub const CONTRACT_OPTIONS: [&str; 3] = ["Month-to-month", "One year", "Two year"];

/// Submitted form fields, in form order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredictionForm {
    fields: Vec<(String, String)>,
}

impl PredictionForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`set`](Self::set)
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Set a field; a repeated name replaces the earlier value
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Build the POST body.
    ///
    /// `revenue` and `monthly_charges` become floats, `tenure` an integer, and
    /// every other field passes through as text. The coerced keys are always
    /// present; a missing or unparsable value is sent as `null`, which is what
    /// a not-a-number serialises to in JSON.
    pub fn payload(&self) -> PredictionPayload {
        let mut body: Map<String, Value> = self
            .fields
            .iter()
            .map(|(name, value)| (name.clone(), Value::String(value.clone())))
            .collect();

        for name in FLOAT_FIELDS {
            let parsed = self.get(name).map(parse_float).unwrap_or(f64::NAN);
            body.insert(name.to_string(), Value::from(parsed));
        }

        for name in INT_FIELDS {
            let parsed = self.get(name).map(parse_int).unwrap_or(f64::NAN);
            body.insert(name.to_string(), integer_value(parsed));
        }

        PredictionPayload(body)
    }
}

/// JSON object sent to `POST /api/predict`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PredictionPayload(Map<String, Value>);

impl PredictionPayload {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn to_json(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

// ============================================
// Numeric coercion
// ============================================

/// Lenient float parse: the longest leading decimal literal wins
/// (`"1200.50 USD"` -> `1200.5`), nothing numeric gives NaN.
pub fn parse_float(input: &str) -> f64 {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    if s[end..].starts_with("Infinity") {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let int_digits = end - int_start;

    let mut frac_digits = 0;
    if end < bytes.len() && bytes[end] == b'.' {
        let mut j = end + 1;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        frac_digits = j - end - 1;
        if int_digits > 0 || frac_digits > 0 {
            end = j;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return f64::NAN;
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut j = end + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            end = j;
        }
    }

    s[..end].parse::<f64>().unwrap_or(f64::NAN)
}

/// Lenient integer parse: leading base-10 digits (or `0x` hex digits),
/// truncating at the first other character (`"14.7"` -> `14`); NaN if none.
pub fn parse_int(input: &str) -> f64 {
    let s = input.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, digits) = match rest.get(..2) {
        Some("0x") | Some("0X") => (16, &rest[2..]),
        _ => (10, rest),
    };

    let mut value = 0.0_f64;
    let mut seen = false;
    for ch in digits.chars() {
        match ch.to_digit(radix) {
            Some(d) => {
                value = value * radix as f64 + d as f64;
                seen = true;
            }
            None => break,
        }
    }

    if !seen {
        return f64::NAN;
    }

    if negative {
        -value
    } else {
        value
    }
}

/// Integral values that fit exactly are sent as JSON integers
fn integer_value(value: f64) -> Value {
    const MAX_SAFE: f64 = 9_007_199_254_740_991.0;
    if value.is_finite() && value.abs() <= MAX_SAFE {
        Value::from(value as i64)
    } else {
        Value::from(value)
    }
}

// ============================================
// Submit control
// ============================================

/// The form's submit button, as seen by the submission flow
pub trait SubmitControl {
    fn label(&self) -> String;

    fn set_label(&self, label: &str);

    fn is_disabled(&self) -> bool;

    fn set_disabled(&self, disabled: bool);
}

/// Holds the submit control disabled with the busy label.
///
/// Dropping the guard restores the original label and re-enables the control,
/// so every exit path of a submission (success, error, early return, panic)
/// releases it.
#[must_use = "the control is released as soon as the guard is dropped"]
pub struct SubmitGuard<'a, C: SubmitControl + ?Sized> {
    control: &'a C,
    original_label: String,
}

impl<'a, C: SubmitControl + ?Sized> SubmitGuard<'a, C> {
    /// Disable the control, or `None` if a submission already holds it
    pub fn acquire(control: &'a C) -> Option<Self> {
        if control.is_disabled() {
            return None;
        }

        let original_label = control.label();
        control.set_disabled(true);
        control.set_label(BUSY_LABEL);

        Some(Self {
            control,
            original_label,
        })
    }
}

impl<C: SubmitControl + ?Sized> Drop for SubmitGuard<'_, C> {
    fn drop(&mut self) {
        self.control.set_label(&self.original_label);
        self.control.set_disabled(false);
    }
}

/// In-memory submit control for terminal use and tests
#[derive(Debug)]
pub struct SubmitButton {
    label: RefCell<String>,
    disabled: Cell<bool>,
}

impl SubmitButton {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: RefCell::new(label.into()),
            disabled: Cell::new(false),
        }
    }
}

impl Default for SubmitButton {
    fn default() -> Self {
        Self::new(SUBMIT_LABEL)
    }
}

impl SubmitControl for SubmitButton {
    fn label(&self) -> String {
        self.label.borrow().clone()
    }

    fn set_label(&self, label: &str) {
        *self.label.borrow_mut() = label.to_string();
    }

    fn is_disabled(&self) -> bool {
        self.disabled.get()
    }

    fn set_disabled(&self, disabled: bool) {
        self.disabled.set(disabled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_coerces_numeric_fields() {
        let payload = PredictionForm::new()
            .field("customer_id", "7590-VHVEG")
            .field("revenue", "1200.50")
            .field("monthly_charges", "89.99")
            .field("tenure", "14")
            .field("gender", "Female")
            .payload();

        assert_eq!(payload.get("revenue"), Some(&json!(1200.5)));
        assert_eq!(payload.get("monthly_charges"), Some(&json!(89.99)));
        assert_eq!(payload.get("tenure"), Some(&json!(14)));
        assert!(payload.get("tenure").unwrap().is_i64());
        assert_eq!(payload.get("customer_id"), Some(&json!("7590-VHVEG")));
        assert_eq!(payload.get("gender"), Some(&json!("Female")));
    }

    #[test]
    fn test_non_numeric_input_is_sent_as_null() {
        let payload = PredictionForm::new()
            .field("revenue", "lots")
            .field("tenure", "")
            .payload();

        assert_eq!(payload.get("revenue"), Some(&Value::Null));
        assert_eq!(payload.get("tenure"), Some(&Value::Null));
        // Absent coerced fields still appear
        assert_eq!(payload.get("monthly_charges"), Some(&Value::Null));
    }

    #[test]
    fn test_repeated_field_replaces_value() {
        let form = PredictionForm::new().field("contract", "One year").field("contract", "Two year");
        assert_eq!(form.get("contract"), Some("Two year"));
        assert_eq!(form.fields().count(), 1);
    }

    #[test]
    fn test_parse_float_prefix() {
        assert_eq!(parse_float("1200.50"), 1200.5);
        assert_eq!(parse_float("  89.99"), 89.99);
        assert_eq!(parse_float("12abc"), 12.0);
        assert_eq!(parse_float(".5"), 0.5);
        assert_eq!(parse_float("-3."), -3.0);
        assert_eq!(parse_float("1e3x"), 1000.0);
        assert_eq!(parse_float("1e"), 1.0);
        assert_eq!(parse_float("Infinity"), f64::INFINITY);
        assert!(parse_float("").is_nan());
        assert!(parse_float(".").is_nan());
        assert!(parse_float("abc").is_nan());
    }

    #[test]
    fn test_parse_int_truncates() {
        assert_eq!(parse_int("14"), 14.0);
        assert_eq!(parse_int("14.7"), 14.0);
        assert_eq!(parse_int(" -3 months"), -3.0);
        assert_eq!(parse_int("0x1A"), 26.0);
        assert!(parse_int("twelve").is_nan());
        assert!(parse_int("-").is_nan());
    }

    #[test]
    fn test_guard_restores_on_drop() {
        let button = SubmitButton::default();
        {
            let _guard = SubmitGuard::acquire(&button).unwrap();
            assert!(button.is_disabled());
            assert_eq!(button.label(), BUSY_LABEL);
        }
        assert!(!button.is_disabled());
        assert_eq!(button.label(), SUBMIT_LABEL);
    }

    #[test]
    fn test_guard_rejects_second_acquire() {
        let button = SubmitButton::new("Go");
        let first = SubmitGuard::acquire(&button);
        assert!(first.is_some());
        assert!(SubmitGuard::acquire(&button).is_none());

        drop(first);
        assert!(SubmitGuard::acquire(&button).is_some());
    }

    #[test]
    fn test_guard_restores_on_panic() {
        let button = SubmitButton::new("Go");
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = SubmitGuard::acquire(&button).unwrap();
            panic!("render failed");
        }));

        assert!(result.is_err());
        assert!(!button.is_disabled());
        assert_eq!(button.label(), "Go");
    }
}
