//! Scalar cell values for record tables.
//!
//! Cells are carried as `Option<Value>`; `None` is a missing field. Values are
//! inferred per cell when a table is loaded so that numeric columns compare the
//! way they would in a dataframe (`1` equals `1.0`) while identifiers with
//! leading zeros stay textual. Every value renders back to the exact text it
//! was loaded from.

use std::fmt;

#[derive(Debug, Clone)]
pub enum Value {
    /// Only inferred for canonical integer text, so it renders verbatim.
    Integer(i64),
    /// Keeps the source text (`2.50`, `1e3`, `+5`) next to the parsed number.
    Float { value: f64, raw: String },
    Text(String),
}

pub type Cell = Option<Value>;

impl Value {
    /// The text this value was loaded from.
    pub fn as_display(&self) -> String {
        match self {
            Value::Text(s) => s.clone(),
            Value::Integer(i) => i.to_string(),
            Value::Float { raw, .. } => raw.clone(),
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float { value, .. } => Some(*value),
            Value::Text(_) => None,
        }
    }

    /// Formatting-independent numeric form, so `1e3`, `1000.0` and `1000`
    /// share a join bucket.
    fn canonical_number(&self) -> Option<String> {
        match self {
            Value::Integer(i) => Some(i.to_string()),
            Value::Float { value, .. } if value.fract() == 0.0 && value.abs() < i64::MAX as f64 => {
                Some((*value as i64).to_string())
            }
            Value::Float { value, .. } => Some(value.to_string()),
            Value::Text(_) => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Text(_), _) | (_, Value::Text(_)) => false,
            (left, right) => match (left.as_f64(), right.as_f64()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_display())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float {
            value,
            raw: value.to_string(),
        }
    }
}

/// Infers a cell from a raw field. Empty fields are missing.
pub fn parse_cell(raw: &str) -> Cell {
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = raw.parse::<i64>()
        && parsed.to_string() == raw
    {
        return Some(Value::Integer(parsed));
    }
    if looks_like_decimal(raw)
        && let Ok(value) = raw.parse::<f64>()
    {
        return Some(Value::Float {
            value,
            raw: raw.to_string(),
        });
    }
    Some(Value::Text(raw.to_string()))
}

/// Renders a cell for CSV output; missing cells become empty fields.
pub fn display_cell(cell: &Cell) -> String {
    cell.as_ref().map(Value::as_display).unwrap_or_default()
}

/// Key used to bucket rows for the join and the new-entrant lookup.
///
/// Numeric keys bucket by value, so `1` and `1.0` land together.
/// Missing keys share one bucket.
pub fn key_of(cell: &Cell) -> Option<String> {
    cell.as_ref().map(|value| match value.canonical_number() {
        Some(number) => format!("n:{number}"),
        None => format!("s:{}", value.as_display()),
    })
}

fn looks_like_decimal(raw: &str) -> bool {
    let unsigned = raw.strip_prefix(['-', '+']).unwrap_or(raw);
    let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
        Some((m, e)) => (m, Some(e)),
        None => (unsigned, None),
    };
    if let Some(exp) = exponent {
        let digits = exp.strip_prefix(['-', '+']).unwrap_or(exp);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
    }
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return false;
    }
    if int_part.len() > 1 && int_part.starts_with('0') {
        return false;
    }
    int_part.bytes().all(|b| b.is_ascii_digit()) && frac_part.bytes().all(|b| b.is_ascii_digit())
}
