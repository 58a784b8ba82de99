//! Caller-supplied form fields and the typed views the gateway works with.
//!
//! `FormInput` is the raw, string-keyed submission. Mutations never read it
//! directly: `PostForm` and `PostId` are extracted at the boundary so that a
//! missing title or body is rejected before any upstream call is made.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Number;
use tracing::warn;

use crate::errors::GatewayError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct FormInput(HashMap<String, String>);

impl FormInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// The present and non-empty value of `name`.
    fn non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|v| !v.is_empty())
    }

    pub fn post_id(&self) -> PostId {
        PostId::from_form(self)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormInput {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Title and body of a post, both guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostForm {
    pub title: String,
    pub body: String,
}

impl TryFrom<&FormInput> for PostForm {
    type Error = GatewayError;

    fn try_from(form: &FormInput) -> Result<Self, Self::Error> {
        match (form.non_empty("title"), form.non_empty("body")) {
            (Some(title), Some(body)) => Ok(Self { title: title.to_string(), body: body.to_string() }),
            _ => Err(GatewayError::title_and_body_required()),
        }
    }
}

/// The `id` field exactly as submitted, or nothing when the form had none.
///
/// It addresses `/posts/{id}` verbatim. A missing id is not rejected: it
/// becomes an empty path segment and the upstream decides what that means.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostId(Option<String>);

impl PostId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(Some(raw.into()))
    }

    fn from_form(form: &FormInput) -> Self {
        match form.get("id") {
            Some(id) => Self::new(id),
            None => {
                warn!("form submitted without id; forwarding an empty path segment");
                Self::default()
            }
        }
    }

    pub fn is_missing(&self) -> bool {
        self.0.is_none()
    }

    /// Path segment form of the id; empty when missing.
    pub fn as_str(&self) -> &str {
        self.0.as_deref().unwrap_or_default()
    }

    /// Numeric reading of the id with JavaScript `Number()` rules: surrounding
    /// whitespace is trimmed, blank or missing reads as `0`, decimals,
    /// exponents and `0x`/`0o`/`0b` literals are accepted. Anything else, and
    /// any non-finite value, has no numeric value (serialised as `null`).
    /// Integral values come back as JSON integers.
    pub fn as_number(&self) -> Option<Number> {
        js_number(self.as_str()).and_then(json_number)
    }
}

fn js_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    let lower = trimmed.to_ascii_lowercase();
    for (prefix, radix) in [("0x", 16), ("0o", 8), ("0b", 2)] {
        if let Some(digits) = lower.strip_prefix(prefix) {
            return radix_literal(digits, radix);
        }
    }
    match lower.trim_start_matches(['+', '-']) {
        "infinity" => {
            return Some(if lower.starts_with('-') { f64::NEG_INFINITY } else { f64::INFINITY });
        }
        // Rust also accepts "inf" and "nan"; JavaScript does not.
        "inf" | "nan" => return None,
        rest if rest.contains('_') => return None,
        _ => {}
    }
    trimmed.parse::<f64>().ok()
}

fn radix_literal(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
    })
}

/// `Number.MAX_SAFE_INTEGER`.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

fn json_number(n: f64) -> Option<Number> {
    if !n.is_finite() {
        return None;
    }
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        return Some(Number::from(n as i64));
    }
    Number::from_f64(n)
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Written as a JSON number when the id is an integer, as the raw string
/// otherwise, and as `null` when the form carried no id.
impl Serialize for PostId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let Some(raw) = &self.0 else {
            return serializer.serialize_none();
        };
        match raw.trim().parse::<i64>() {
            Ok(n) => serializer.serialize_i64(n),
            Err(_) => serializer.serialize_str(raw),
        }
    }
}
