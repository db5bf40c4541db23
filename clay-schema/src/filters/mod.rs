//! Derivation functions over schema descriptors.
//!
//! Every function here is pure: it looks at one [`Setting`] (or a whole
//! schema) and returns a value a code generator substitutes into its
//! templates. Nothing is cached and nothing touches the filesystem.
//!
//! - identifiers: [`sanitize_identifier`], [`resolve_id`],
//!   [`resolve_message_key_expr`]
//! - storage sizing: [`max_dict_entry_size`], [`tuple_size_expr`],
//!   [`inbox_size_expr`]
//! - defaults: [`default_value_as_byte_literal`], [`has_default_values`],
//!   [`default_value_expr`]
//! - guards: [`capability_guard_expression`]
//! - schema wide: [`settings_count`], [`validate`]
//! - tagging: [`stable_hash`]

use std::{fmt::Write, sync::LazyLock};

use regex::Regex;
use serde_json::Value;

use crate::{
    data::{Node, SelectOption, Setting, SettingKind, node::value_text},
    error::{Result, SchemaError},
};

mod capability;
mod codegen;
mod hash;

pub use capability::{ALWAYS_TRUE, CAPABILITY_GUARDS, capability_guard, capability_guard_expression};
pub use codegen::{
    EnumEntry, c_string_literal, default_value_expr, enum_entries, enum_prefix,
    has_numeric_options, inbox_size_expr, slider_precision, tuple_size_expr,
};
pub use hash::{HASH_ALGORITHM, fnv1a_32, hash_key, stable_hash};

static NON_IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]| ").expect("identifier pattern"));

static INDEXED_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+)\[(\d+)\]$").expect("indexed key pattern"));

/// Replace everything that cannot appear in a C identifier with `_`.
///
/// Word characters and non-space whitespace are kept; a plain space is
/// replaced. Applying it twice gives the same result as applying it once.
pub fn sanitize_identifier(name: &str) -> String {
    NON_IDENTIFIER.replace_all(name, "_").into_owned()
}

/// Identifier of a setting: `id`, else `messageKey`, else `appKey`.
pub fn resolve_id(setting: &Setting) -> Result<&str> {
    setting
        .identifier()
        .ok_or_else(|| SchemaError::MissingIdentifier {
            kind: setting.kind.to_string(),
        })
}

/// Message key of a setting, falling back to [`resolve_id`] for schemas
/// that predate `messageKey`.
pub fn message_key(setting: &Setting) -> Result<&str> {
    match setting.message_key.as_deref() {
        Some(key) => Ok(key),
        None => resolve_id(setting),
    }
}

/// C expression for the generated message key constant.
///
/// `NAME[K]` addresses element `K` of an array key and becomes
/// `MESSAGE_KEY_NAME + K`.
pub fn resolve_message_key_expr(setting: &Setting) -> Result<String> {
    let key = message_key(setting)?;
    Ok(match INDEXED_KEY.captures(key) {
        Some(caps) => format!("MESSAGE_KEY_{} + {}", &caps[1], &caps[2]),
        None => format!("MESSAGE_KEY_{key}"),
    })
}

/// Bytes needed to store the serialized value of an option based setting.
///
/// Each option needs its value text plus a terminating zero. A select or
/// radiogroup stores one value, a checkboxgroup may store all of them.
/// Other kinds return 0.
pub fn max_dict_entry_size(setting: &Setting) -> usize {
    let sizes = setting
        .options()
        .iter()
        .map(|option| option.value_text().len() + 1);

    match setting.kind {
        SettingKind::Select | SettingKind::Radiogroup => sizes.max().unwrap_or(0),
        SettingKind::Checkboxgroup => sizes.sum(),
        _ => 0,
    }
}

/// Brace enclosed byte list of a checkboxgroup's default values.
///
/// `["ab", "c"]` becomes `{97,98,0,99,0,}`. Other kinds return an empty
/// string.
pub fn default_value_as_byte_literal(setting: &Setting) -> String {
    if setting.kind != SettingKind::Checkboxgroup {
        return String::new();
    }

    let mut literal = String::from("{");
    for value in default_texts(setting) {
        for byte in value.bytes() {
            let _ = write!(literal, "{byte},");
        }
        literal.push_str("0,");
    }
    literal.push('}');
    literal
}

/// Number of leaves that get an accessor, sections excluded.
pub fn settings_count(nodes: &[Node]) -> usize {
    nodes
        .iter()
        .map(|node| match node {
            Node::Section(section) => settings_count(&section.items),
            Node::Setting(setting) => usize::from(setting.is_stored()),
        })
        .sum()
}

/// Run every fallible derivation over the schema.
///
/// A schema that passes renders without derivation errors.
pub fn validate(nodes: &[Node]) -> Result<()> {
    for node in nodes {
        match node {
            Node::Section(section) => {
                capability_guard_expression(section.capabilities())?;
                validate(&section.items)?;
            }
            Node::Setting(setting) if setting.is_stored() => {
                capability_guard_expression(setting.capabilities())?;
                resolve_message_key_expr(setting)?;
                if setting.kind == SettingKind::Checkboxgroup && setting.options().is_empty() {
                    return Err(SchemaError::MissingOptions {
                        key: resolve_id(setting)?.to_string(),
                    });
                }
                default_value_expr(setting)?;
                enum_entries(setting)?;
                stable_hash(setting)?;
            }
            Node::Setting(setting) => {
                trace!("skipping `{}` entry without identifier", setting.kind);
            }
        }
    }
    Ok(())
}

/// Whether a checkboxgroup selects anything by default.
pub fn has_default_values(setting: &Setting) -> bool {
    setting.kind == SettingKind::Checkboxgroup && !default_texts(setting).is_empty()
}

/// Default values as text, in order. A scalar default counts as a
/// single value. A list of booleans selects options by position.
pub(crate) fn default_texts(setting: &Setting) -> Vec<String> {
    match &setting.default_value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(values)) => values
            .iter()
            .enumerate()
            .filter_map(|(index, value)| match value {
                Value::Bool(true) => setting.options().get(index).map(SelectOption::value_text),
                Value::Bool(false) => None,
                other => Some(value_text(other)),
            })
            .collect(),
        Some(value) => vec![value_text(value)],
    }
}
