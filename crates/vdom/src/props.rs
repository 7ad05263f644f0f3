//! Element property maps: plain attributes plus the reserved `style` group.

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Name of the reserved property group holding style declarations.
pub const STYLE_KEY: &str = "style";

/// Attributes and style declarations of one element.
///
/// The `style` group is always present (possibly empty), so callers never have
/// to special-case a missing map. Attribute maps never contain [`STYLE_KEY`];
/// an inline `style` attribute is split into the style group on insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Props {
    #[serde(default)]
    style: BTreeMap<String, String>,
    #[serde(flatten, deserialize_with = "scalar_attrs")]
    attrs: BTreeMap<String, String>,
}

/// Attribute values may be given as JSON strings, numbers or booleans; they are
/// stored in their string form.
fn scalar_attrs<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<String, String>, D::Error> {
    BTreeMap::<String, Value>::deserialize(deserializer)?
        .into_iter()
        .map(|(name, value)| {
            let rendered = match value {
                Value::String(text) => text,
                Value::Number(number) => number.to_string(),
                Value::Bool(flag) => flag.to_string(),
                Value::Null | Value::Array(_) | Value::Object(_) => {
                    return Err(D::Error::custom(format!(
                        "attribute `{name}` must be a string, number or boolean, got {value}"
                    )));
                }
            };
            Ok((name, rendered))
        })
        .collect()
}

impl Props {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert_attr(name, value);
        self
    }

    #[must_use]
    pub fn with_style(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert_style(name, value);
        self
    }

    /// Sets an attribute. `style` is parsed as `prop: value; ...` declarations.
    pub fn insert_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if name == STYLE_KEY {
            for (prop, prop_value) in parse_declarations(&value) {
                self.style.insert(prop, prop_value);
            }
        } else {
            self.attrs.insert(name, value);
        }
    }

    pub fn insert_style(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.style.insert(name.into(), value.into());
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn style(&self, name: &str) -> Option<&str> {
        self.style.get(name).map(String::as_str)
    }

    #[inline]
    pub const fn attrs(&self) -> &BTreeMap<String, String> {
        &self.attrs
    }

    #[inline]
    pub const fn styles(&self) -> &BTreeMap<String, String> {
        &self.style
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty() && self.style.is_empty()
    }
}

fn parse_declarations(source: &str) -> impl Iterator<Item = (String, String)> + '_ {
    source.split(';').filter_map(|decl| {
        let (prop, value) = decl.split_once(':')?;
        let prop = prop.trim();
        let value = value.trim();
        (!prop.is_empty() && !value.is_empty()).then(|| (prop.to_owned(), value.to_owned()))
    })
}
