//! Coercion of dynamic [`Value`]s into concrete scalar types.
//!
//! Numeric conversions are permissive: any integer or float converts to any
//! numeric target by truncation, bools map to 1/0, and strings are parsed.
//! Bool conversion is strict and only accepts 0/1 (as numbers or strings).

use crate::error::ConvertError;
use crate::value::Value;

/// Convert a value to `i64`.
///
/// Floats truncate toward zero (saturating at the `i64` bounds). Unsigned
/// values above `i64::MAX` wrap.
pub fn convert_to_int(val: &Value) -> Result<i64, ConvertError> {
    match val {
        Value::Int(i) => Ok(*i),
        Value::UInt(u) => Ok(*u as i64),
        Value::Float32(x) => Ok(*x as i64),
        Value::Float(x) => Ok(*x as i64),
        Value::Bool(b) => Ok(i64::from(*b)),
        Value::String(s) => Ok(s.parse::<i64>()?),
        Value::Null | Value::Seq(_) | Value::StringSeq(_) | Value::Map(_) => {
            Err(ConvertError::UnknownType(val.kind()))
        }
    }
}

/// Convert a value to `f64`. `f32` input is widened, not rounded.
pub fn convert_to_float(val: &Value) -> Result<f64, ConvertError> {
    match val {
        Value::Int(i) => Ok(*i as f64),
        Value::UInt(u) => Ok(*u as f64),
        Value::Float32(x) => Ok(f64::from(*x)),
        Value::Float(x) => Ok(*x),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => Ok(s.parse::<f64>()?),
        Value::Null | Value::Seq(_) | Value::StringSeq(_) | Value::Map(_) => {
            Err(ConvertError::UnknownType(val.kind()))
        }
    }
}

/// Convert a value to `bool`.
///
/// Numbers must be exactly 0 or 1 and strings exactly `"0"` or `"1"`.
pub fn convert_to_bool(val: &Value) -> Result<bool, ConvertError> {
    match val {
        Value::Bool(b) => Ok(*b),
        Value::Int(i) => numeric_to_bool(*i as f64, val),
        Value::UInt(u) => numeric_to_bool(*u as f64, val),
        Value::Float32(x) => numeric_to_bool(f64::from(*x), val),
        Value::Float(x) => numeric_to_bool(*x, val),
        Value::String(s) => match s.as_str() {
            "0" => Ok(false),
            "1" => Ok(true),
            _ => Err(ConvertError::UnknownValue(s.clone())),
        },
        Value::Null | Value::Seq(_) | Value::StringSeq(_) | Value::Map(_) => {
            Err(ConvertError::UnknownType(val.kind()))
        }
    }
}

fn numeric_to_bool(n: f64, original: &Value) -> Result<bool, ConvertError> {
    if n == 0.0 {
        Ok(false)
    } else if n == 1.0 {
        Ok(true)
    } else {
        Err(ConvertError::UnknownValue(original.to_string()))
    }
}

/// Render any value as text. Never fails.
pub fn convert_to_string(val: &Value) -> String {
    val.to_string()
}
