//! C renderings of defaults, sizes and option enums.

use serde::Serialize;
use serde_json::Value;

use crate::{
    data::{Setting, SettingKind, node::value_text},
    error::{Result, SchemaError},
};

use super::{default_value_as_byte_literal, max_dict_entry_size, resolve_id, sanitize_identifier};

/// Largest value a `GColor` accepts, as `0xRRGGBB`.
const MAX_COLOR: u32 = 0x00FF_FFFF;

/// Scaling beyond this would overflow the `int32_t` a slider is read as.
const MAX_SLIDER_PRECISION: u32 = 9;

/// One constant of a generated option enum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumEntry {
    pub name: String,
    pub value: i64,
}

/// Upper-cased, sanitized identifier used to prefix generated names.
pub fn enum_prefix(setting: &Setting) -> Result<String> {
    Ok(sanitize_identifier(resolve_id(setting)?).to_uppercase())
}

/// Whether every option value is an integer, either as a number or as a
/// numeric string.
pub fn has_numeric_options(setting: &Setting) -> bool {
    let options = setting.options();
    !options.is_empty() && options.iter().all(|option| as_integer(&option.value).is_some())
}

/// Enum constants for an option based setting.
///
/// Numeric selects and radiogroups map each label to its value. A
/// checkboxgroup maps each label to its position. Everything else has no
/// enum.
pub fn enum_entries(setting: &Setting) -> Result<Vec<EnumEntry>> {
    let is_checkboxes = setting.kind == SettingKind::Checkboxgroup;
    let is_numeric = setting.kind.is_single_choice() && has_numeric_options(setting);
    if !is_checkboxes && !is_numeric {
        return Ok(Vec::new());
    }

    let prefix = enum_prefix(setting)?;
    let entries = setting
        .options()
        .iter()
        .enumerate()
        .map(|(index, option)| EnumEntry {
            name: format!("{prefix}_{}", sanitize_identifier(&option.label_text()).to_uppercase()),
            value: if is_checkboxes {
                index as i64
            } else {
                as_integer(&option.value).unwrap_or_default()
            },
        })
        .collect();
    Ok(entries)
}

/// C expression for the payload size of the setting's dictionary tuple.
pub fn tuple_size_expr(setting: &Setting) -> String {
    match setting.kind {
        SettingKind::Select | SettingKind::Radiogroup | SettingKind::Checkboxgroup => {
            max_dict_entry_size(setting).to_string()
        }
        SettingKind::Input => "ENAMEL_MAX_STRING_LENGTH".to_string(),
        _ => "sizeof(int32_t)".to_string(),
    }
}

/// C expression for the inbox bytes one setting can take, tuple header
/// included.
///
/// A checkboxgroup arrives either as one byte array or as one integer flag
/// per option, so it reserves the larger of the two.
pub fn inbox_size_expr(setting: &Setting) -> String {
    let stored = format!("ENAMEL_TUPLE_HEADER + {}", tuple_size_expr(setting));
    match setting.kind {
        SettingKind::Checkboxgroup => format!(
            "ENAMEL_MAX({stored}, {} * (ENAMEL_TUPLE_HEADER + sizeof(int32_t)))",
            setting.options().len()
        ),
        _ => stored,
    }
}

/// Decimal places of a slider's `step`.
///
/// A slider sends its value multiplied by `10^precision` so that it fits an
/// integer, and its default is scaled the same way. The step is read as a
/// number, so exponent forms such as `1e-5` count too.
pub fn slider_precision(setting: &Setting) -> u32 {
    let Some(step) = setting.extra.get("step").and_then(as_float) else {
        return 0;
    };
    let mut scaled = step.abs();
    let mut places = 0;
    while places < MAX_SLIDER_PRECISION && (scaled - scaled.round()).abs() > 1e-9 * scaled.max(1.0) {
        scaled *= 10.0;
        places += 1;
    }
    places
}

/// C literal for the value a getter returns when nothing is stored.
pub fn default_value_expr(setting: &Setting) -> Result<String> {
    let default = setting.default_value.as_ref().filter(|v| !v.is_null());

    match setting.kind {
        SettingKind::Toggle => toggle_default(setting, default),
        SettingKind::Slider => slider_default(setting, default),
        SettingKind::Color => color_default(setting, default),
        SettingKind::Input => Ok(c_string_literal(&default.map(value_text).unwrap_or_default())),
        SettingKind::Select | SettingKind::Radiogroup if has_numeric_options(setting) => {
            integer_default(setting, default)
        }
        SettingKind::Select | SettingKind::Radiogroup => {
            let text = default
                .map(value_text)
                .or_else(|| setting.options().first().map(|o| o.value_text()))
                .unwrap_or_default();
            Ok(c_string_literal(&text))
        }
        SettingKind::Checkboxgroup => Ok(default_value_as_byte_literal(setting)),
        _ => Ok(String::new()),
    }
}

/// Quoted C string literal with quotes, backslashes and control
/// characters escaped. Non-ASCII text is kept as UTF-8.
pub fn c_string_literal(text: &str) -> String {
    let mut literal = String::with_capacity(text.len() + 2);
    literal.push('"');
    for c in text.chars() {
        match c {
            '"' => literal.push_str("\\\""),
            '\\' => literal.push_str("\\\\"),
            '\n' => literal.push_str("\\n"),
            '\r' => literal.push_str("\\r"),
            '\t' => literal.push_str("\\t"),
            // `??x` would be read as a trigraph by older compilers
            '?' if literal.ends_with('?') => literal.push_str("\\?"),
            c if c.is_ascii_control() => literal.push_str(&format!("\\{:03o}", c as u32)),
            c => literal.push(c),
        }
    }
    literal.push('"');
    literal
}

fn toggle_default(setting: &Setting, default: Option<&Value>) -> Result<String> {
    let value = match default {
        None => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => match s.trim() {
            "true" | "1" => true,
            "false" | "0" | "" => false,
            _ => return Err(invalid(setting, "boolean", default)),
        },
        Some(_) => return Err(invalid(setting, "boolean", default)),
    };
    Ok(value.to_string())
}

fn integer_default(setting: &Setting, default: Option<&Value>) -> Result<String> {
    match default {
        None => Ok("0".to_string()),
        Some(value) => as_integer(value)
            .or_else(|| as_float(value).map(|f| f.trunc() as i64))
            .map(|n| n.to_string())
            .ok_or_else(|| invalid(setting, "integer", default)),
    }
}

fn slider_default(setting: &Setting, default: Option<&Value>) -> Result<String> {
    let scale = 10_f64.powi(slider_precision(setting) as i32);
    match default {
        None => Ok("0".to_string()),
        Some(value) => as_float(value)
            .map(|n| ((n * scale).round() as i64).to_string())
            .ok_or_else(|| invalid(setting, "number", default)),
    }
}

fn color_default(setting: &Setting, default: Option<&Value>) -> Result<String> {
    let color = match default {
        None => Some(0),
        Some(Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Some(Value::String(s)) => parse_hex_color(s),
        Some(_) => None,
    };
    match color {
        Some(color) if color <= MAX_COLOR => Ok(format!("0x{color:06X}")),
        _ => Err(invalid(setting, "color as RRGGBB", default)),
    }
}

fn parse_hex_color(text: &str) -> Option<u32> {
    let text = text.trim();
    let digits = text
        .strip_prefix('#')
        .or_else(|| text.strip_prefix("0x"))
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    if digits.is_empty() || digits.len() > 6 {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn invalid(setting: &Setting, expected: &'static str, actual: Option<&Value>) -> SchemaError {
    SchemaError::InvalidDefault {
        key: setting
            .identifier()
            .unwrap_or(setting.kind.as_str())
            .to_string(),
        expected,
        actual: actual.map(Value::to_string).unwrap_or_default(),
    }
}
