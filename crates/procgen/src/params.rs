//! Schema-driven sanitizing of loosely-typed generator parameters.
//!
//! Parameters arrive as an untrusted JSON object. Every read goes through a
//! [`Field`] that names the key, the default and the inclusive bounds, so a
//! read can never fail and never leaves the declared range.

use glam::Vec3;
use scene_core::{LineStyle, MAX_LINE_WIDTH, MIN_LINE_WIDTH};
use serde_json::{Map, Value};
use std::str::FromStr;

/// Raw parameter mapping of one algorithm invocation.
pub type ParamMap = Map<String, Value>;

/// Largest absolute coordinate accepted from a vector parameter.
pub const COORD_LIMIT: f32 = 100.0;

/// One schema entry: key, default and inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field<T> {
    pub key: &'static str,
    pub default: T,
    pub min: T,
    pub max: T,
}

impl<T> Field<T> {
    pub const fn new(key: &'static str, default: T, min: T, max: T) -> Self {
        Self {
            key,
            default,
            min,
            max,
        }
    }
}

/// Real-valued schema entry.
pub type NumberField = Field<f32>;
/// Integer count schema entry.
pub type CountField = Field<usize>;

impl Field<f32> {
    /// Bring any value back into range; non-finite values become the default.
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_finite() {
            value.clamp(self.min, self.max)
        } else {
            self.default
        }
    }
}

impl Field<usize> {
    pub fn clamp(&self, value: usize) -> usize {
        value.clamp(self.min, self.max)
    }
}

pub const OPACITY: NumberField = NumberField::new("opacity", 0.8, 0.0, 1.0);
pub const LINE_WIDTH: NumberField = NumberField::new("line_width", 1.0, MIN_LINE_WIDTH, MAX_LINE_WIDTH);

/// Coerce a JSON value to a finite number. Numeric strings are accepted.
pub fn coerce_number(value: &Value) -> Option<f64> {
    let v = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    v.is_finite().then_some(v)
}

/// Coerce a JSON value to a boolean.
pub fn coerce_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|v| v != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Coerce a 2- or 3-element numeric array to a point (2 elements → z = 0).
pub fn coerce_vec3(value: &Value) -> Option<Vec3> {
    let items = value.as_array()?;
    if !(2..=3).contains(&items.len()) {
        return None;
    }
    let mut out = [0.0f32; 3];
    for (slot, item) in out.iter_mut().zip(items) {
        let v = coerce_number(item)?;
        *slot = (v.clamp(-(COORD_LIMIT as f64), COORD_LIMIT as f64)) as f32;
    }
    Some(Vec3::from_array(out))
}

/// Keys compare case-insensitively, ignoring `_` and `-`.
fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '_' && *c != '-')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Read-only view over a raw parameter mapping.
#[derive(Debug, Clone, Copy)]
pub struct ParamReader<'a> {
    raw: &'a ParamMap,
}

impl<'a> ParamReader<'a> {
    pub fn new(raw: &'a ParamMap) -> Self {
        Self { raw }
    }

    fn lookup(&self, key: &str) -> Option<&'a Value> {
        if let Some(v) = self.raw.get(key) {
            return Some(v);
        }
        let wanted = normalize_key(key);
        self.raw
            .iter()
            .find(|(k, _)| normalize_key(k) == wanted)
            .map(|(_, v)| v)
    }

    /// Real value clamped into the field's range.
    pub fn number(&self, field: &NumberField) -> f32 {
        match self.lookup(field.key).and_then(coerce_number) {
            Some(v) => (v.clamp(field.min as f64, field.max as f64)) as f32,
            None => field.default,
        }
    }

    /// Rounded integer clamped into the field's range.
    pub fn count(&self, field: &CountField) -> usize {
        match self.lookup(field.key).and_then(coerce_number) {
            Some(v) => {
                let v = v.round().clamp(field.min as f64, field.max as f64);
                v as usize
            }
            None => field.default,
        }
    }

    /// Point-valued parameter; wrong arity or non-numeric entries give `default`.
    pub fn vec3(&self, key: &str, default: Vec3) -> Vec3 {
        self.lookup(key).and_then(coerce_vec3).unwrap_or(default)
    }

    pub fn flag(&self, key: &str, default: bool) -> bool {
        self.lookup(key).and_then(coerce_flag).unwrap_or(default)
    }

    /// Enum-like string parameter restricted to the values `T` can parse.
    pub fn choice<T: FromStr>(&self, key: &str, default: T) -> T {
        self.lookup(key)
            .and_then(Value::as_str)
            .and_then(|s| s.trim().to_ascii_lowercase().parse().ok())
            .unwrap_or(default)
    }

    /// Common style parameters with per-algorithm defaults.
    pub fn style(&self, opacity: f32, line_width: f32) -> LineStyle {
        LineStyle {
            opacity: self.number(&NumberField { default: opacity, ..OPACITY }),
            line_width: self.number(&NumberField {
                default: line_width,
                ..LINE_WIDTH
            }),
            dashed: self.flag("dashed", false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SIZE: NumberField = NumberField::new("size", 10.0, 1.0, 20.0);
    const COUNT: CountField = CountField::new("count", 8, 1, 50);

    fn params(value: Value) -> ParamMap {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn number_clamps_and_coerces() {
        let raw = params(json!({ "size": 500, "other": "3.5" }));
        let r = ParamReader::new(&raw);
        assert_eq!(r.number(&SIZE), 20.0);
        assert_eq!(r.number(&NumberField::new("other", 0.0, 0.0, 10.0)), 3.5);

        let raw = params(json!({ "size": -4 }));
        assert_eq!(ParamReader::new(&raw).number(&SIZE), 1.0);
    }

    #[test]
    fn number_defaults_on_garbage() {
        for bad in [json!("wide"), json!(null), json!([1, 2]), json!({}), json!(true)] {
            let raw = params(json!({ "size": bad }));
            assert_eq!(ParamReader::new(&raw).number(&SIZE), 10.0);
        }
        let raw = ParamMap::new();
        assert_eq!(ParamReader::new(&raw).number(&SIZE), 10.0);
    }

    #[test]
    fn count_rounds_then_clamps() {
        let raw = params(json!({ "count": 4.6 }));
        assert_eq!(ParamReader::new(&raw).count(&COUNT), 5);
        let raw = params(json!({ "count": 1e12 }));
        assert_eq!(ParamReader::new(&raw).count(&COUNT), 50);
        let raw = params(json!({ "count": -3 }));
        assert_eq!(ParamReader::new(&raw).count(&COUNT), 1);
    }

    #[test]
    fn keys_match_loosely() {
        let raw = params(json!({ "minRadius": 2, "LINE-WIDTH": 3 }));
        let r = ParamReader::new(&raw);
        assert_eq!(r.number(&NumberField::new("min_radius", 0.5, 0.1, 20.0)), 2.0);
        assert_eq!(r.style(0.5, 1.0).line_width, 3.0);
    }

    #[test]
    fn vec3_requires_two_or_three_numbers() {
        let raw = params(json!({
            "a": [1, 2],
            "b": [1, 2, 3],
            "c": [1],
            "d": [1, 2, 3, 4],
            "e": [1, "x", 3],
            "f": [1e9, 0, 0],
        }));
        let r = ParamReader::new(&raw);
        assert_eq!(r.vec3("a", Vec3::ONE), Vec3::new(1.0, 2.0, 0.0));
        assert_eq!(r.vec3("b", Vec3::ONE), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(r.vec3("c", Vec3::ONE), Vec3::ONE);
        assert_eq!(r.vec3("d", Vec3::ONE), Vec3::ONE);
        assert_eq!(r.vec3("e", Vec3::ONE), Vec3::ONE);
        assert_eq!(r.vec3("f", Vec3::ONE).x, COORD_LIMIT);
    }

    #[test]
    fn flags_accept_loose_spellings() {
        let raw = params(json!({ "a": "yes", "b": 0, "c": "maybe", "d": true }));
        let r = ParamReader::new(&raw);
        assert!(r.flag("a", false));
        assert!(!r.flag("b", true));
        assert!(r.flag("c", true));
        assert!(r.flag("d", false));
    }

    #[test]
    fn field_clamp_handles_non_finite() {
        assert_eq!(SIZE.clamp(f32::NAN), 10.0);
        assert_eq!(SIZE.clamp(f32::INFINITY), 10.0);
        assert_eq!(SIZE.clamp(0.0), 1.0);
        assert_eq!(COUNT.clamp(0), 1);
    }
}
