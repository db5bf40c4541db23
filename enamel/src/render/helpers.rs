//! Template helpers backed by the schema derivation filters.
//!
//! Helpers return JSON values instead of writing text, so they also work in
//! subexpressions such as `{{cvarname (getid this)}}`.

use clay_schema::{Node, SchemaError, Setting, filters};
use handlebars::{
    Context, Handlebars, Helper, HelperDef, RenderContext, RenderError, RenderErrorReason,
    ScopedJson,
};
use serde::Deserialize;
use serde_json::{Value, json};

type SettingFn = fn(&Setting) -> Result<Value, SchemaError>;
type ValueFn = fn(&Value) -> Result<Value, SchemaError>;

/// Register every helper on `registry`.
pub fn register(registry: &mut Handlebars<'static>) {
    setting(registry, "getid", |s| filters::resolve_id(s).map(Value::from));
    setting(registry, "message_key", |s| {
        filters::resolve_message_key_expr(s).map(Value::from)
    });
    setting(registry, "max_dict_size", |s| {
        Ok(filters::max_dict_entry_size(s).into())
    });
    setting(registry, "default_bytes", |s| {
        Ok(filters::default_value_as_byte_literal(s).into())
    });
    setting(registry, "hash", |s| filters::stable_hash(s).map(Value::from));
    setting(registry, "has_numeric_options", |s| {
        Ok(filters::has_numeric_options(s).into())
    });
    setting(registry, "enum_entries", |s| {
        Ok(json!(filters::enum_entries(s)?))
    });
    setting(registry, "tuple_size", |s| Ok(filters::tuple_size_expr(s).into()));
    setting(registry, "inbox_size", |s| Ok(filters::inbox_size_expr(s).into()));
    setting(registry, "has_default_values", |s| {
        Ok(filters::has_default_values(s).into())
    });
    setting(registry, "default_value", |s| {
        filters::default_value_expr(s).map(Value::from)
    });

    value(registry, "cvarname", |v| {
        Ok(filters::sanitize_identifier(&text(v)).into())
    });
    value(registry, "upper", |v| Ok(text(v).to_uppercase().into()));
    value(registry, "c_string", |v| Ok(filters::c_string_literal(&text(v)).into()));
    value(registry, "capabilities", |v| {
        let tags = Option::<Vec<String>>::deserialize(v)?.unwrap_or_default();
        filters::capability_guard_expression(&tags).map(Value::from)
    });
    value(registry, "settings_count", |v| {
        let nodes = Vec::<Node>::deserialize(v)?;
        Ok(filters::settings_count(&nodes).into())
    });
    value(registry, "is_setting", |v| {
        let node = Node::deserialize(v)?;
        Ok(matches!(node, Node::Setting(ref s) if s.is_stored()).into())
    });
}

fn setting(registry: &mut Handlebars<'static>, name: &'static str, derive: SettingFn) {
    registry.register_helper(name, Box::new(SettingHelper { name, derive }));
}

fn value(registry: &mut Handlebars<'static>, name: &'static str, derive: ValueFn) {
    registry.register_helper(name, Box::new(ValueHelper { name, derive }));
}

fn text(value: &Value) -> String {
    clay_schema::data::node::value_text(value)
}

/// Helper taking one setting descriptor.
struct SettingHelper {
    name: &'static str,
    derive: SettingFn,
}

/// Helper taking one arbitrary JSON value.
struct ValueHelper {
    name: &'static str,
    derive: ValueFn,
}

impl HelperDef for SettingHelper {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'rc>, RenderError> {
        let param = first_param(h, self.name)?;
        let setting = Setting::deserialize(param)
            .map_err(|e| failure(self.name, &SchemaError::Json(e)))?;
        let result = (self.derive)(&setting).map_err(|e| failure(self.name, &e))?;
        Ok(ScopedJson::Derived(result))
    }
}

impl HelperDef for ValueHelper {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'rc>, RenderError> {
        let param = first_param(h, self.name)?;
        let result = (self.derive)(param).map_err(|e| failure(self.name, &e))?;
        Ok(ScopedJson::Derived(result))
    }
}

fn first_param<'a>(h: &'a Helper<'_>, name: &'static str) -> Result<&'a Value, RenderError> {
    h.param(0)
        .map(|p| p.value())
        .ok_or_else(|| RenderErrorReason::ParamNotFoundForIndex(name, 0).into())
}

fn failure(name: &str, err: &SchemaError) -> RenderError {
    RenderErrorReason::Other(format!("helper `{name}`: {err}")).into()
}
