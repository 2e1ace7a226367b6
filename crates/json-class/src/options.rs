//! Per-call options.
//!
//! Each options bundle is split in two:
//!
//! - [`FirstObjectOptions`] applies to the outermost call only (include and
//!   exclude lists, hook bypass) and is never threaded into recursion.
//! - [`ToJsonSettings`] / [`FromJsonOptions`] reach every recursive call.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

use crate::error::JsonClassError;
use crate::instantiator::Instantiator;
use crate::value::Value;

/// Serialize-direction converter: populates the tagged tree of a value.
pub type ToJsonConverter = Arc<dyn Fn(&Value, &mut Map<String, JsonValue>) + Send + Sync>;

/// Build-direction converter: produces a value from a tagged tree.
pub type FromJsonConverter =
    Arc<dyn Fn(&Map<String, JsonValue>, &FromJsonOptions) -> Value + Send + Sync>;

/// Serialize-direction converter keyed by emitted property name.
pub type PropertyConverter = Arc<dyn Fn(&Value) -> JsonValue + Send + Sync>;

/// Options consumed by the outermost object of a call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FirstObjectOptions {
    /// When set, only these property names are processed.
    pub include: Option<Vec<String>>,
    /// Property names that are never processed.
    pub exclude: Option<Vec<String>>,
    /// Ignore the object's own serialize/fill hooks.
    pub skip_custom_method: bool,
}

impl FirstObjectOptions {
    /// Whether a property name passes the include/exclude lists.
    pub fn admits(&self, name: &str) -> bool {
        if let Some(include) = &self.include {
            if !include.iter().any(|n| n == name) {
                return false;
            }
        }
        if let Some(exclude) = &self.exclude {
            if exclude.iter().any(|n| n == name) {
                return false;
            }
        }
        true
    }
}

// ── Serialize ─────────────────────────────────────────────────────────────

/// Serialize options shared by every recursive call.
#[derive(Clone, Default)]
pub struct ToJsonSettings {
    pub converters: HashMap<String, ToJsonConverter>,
    pub property_converters: HashMap<String, PropertyConverter>,
    /// Skip properties whose name starts with `_`.
    pub omit_private_properties: bool,
    /// Emit `_name` properties as `name`, read through the `name` accessor.
    pub omit_private_properties_and_use_getters: bool,
    pub omit_empty_arrays: bool,
    pub omit_empty_objects: bool,
    pub omit_class_property: bool,
}

impl ToJsonSettings {
    pub(crate) fn treats_private_as_hidden(&self) -> bool {
        self.omit_private_properties || self.omit_private_properties_and_use_getters
    }
}

#[derive(Clone, Default)]
pub struct ToJsonOptions {
    pub first: FirstObjectOptions,
    pub settings: ToJsonSettings,
}

impl ToJsonOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses flag and list options from a JSON document.
    pub fn from_config_json(text: &str) -> Result<Self, JsonClassError> {
        let config: ToJsonConfig = serde_json::from_str(text).map_err(JsonClassError::Config)?;
        Ok(config.into())
    }

    pub fn include<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.first.include = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.first.exclude = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn skip_custom_method(mut self, yes: bool) -> Self {
        self.first.skip_custom_method = yes;
        self
    }

    pub fn omit_private_properties(mut self, yes: bool) -> Self {
        self.settings.omit_private_properties = yes;
        self
    }

    pub fn omit_private_properties_and_use_getters(mut self, yes: bool) -> Self {
        self.settings.omit_private_properties_and_use_getters = yes;
        self
    }

    pub fn omit_empty_arrays(mut self, yes: bool) -> Self {
        self.settings.omit_empty_arrays = yes;
        self
    }

    pub fn omit_empty_objects(mut self, yes: bool) -> Self {
        self.settings.omit_empty_objects = yes;
        self
    }

    pub fn omit_class_property(mut self, yes: bool) -> Self {
        self.settings.omit_class_property = yes;
        self
    }

    /// Registers a converter for values tagged `class_name`.
    pub fn converter<F>(mut self, class_name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Value, &mut Map<String, JsonValue>) + Send + Sync + 'static,
    {
        self.settings.converters.insert(class_name.into(), Arc::new(f));
        self
    }

    /// Registers a converter for every property emitted as `name`.
    pub fn property_converter<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Value) -> JsonValue + Send + Sync + 'static,
    {
        self.settings.property_converters.insert(name.into(), Arc::new(f));
        self
    }
}

impl From<ToJsonSettings> for ToJsonOptions {
    fn from(settings: ToJsonSettings) -> Self {
        Self {
            first: FirstObjectOptions::default(),
            settings,
        }
    }
}

/// Document form of the serialize flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ToJsonConfig {
    pub include: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    pub omit_private_properties: bool,
    #[serde(rename = "omitPrivatePropertiesAndUseGetMethodsInstead")]
    pub omit_private_properties_and_use_getters: bool,
    pub omit_empty_arrays: bool,
    pub omit_empty_objects: bool,
    pub omit_class_property: bool,
    #[serde(rename = "doNotUseCustomToJsonMethodOfFirstObject")]
    pub skip_custom_method: bool,
}

impl From<ToJsonConfig> for ToJsonOptions {
    fn from(c: ToJsonConfig) -> Self {
        Self {
            first: FirstObjectOptions {
                include: c.include,
                exclude: c.exclude,
                skip_custom_method: c.skip_custom_method,
            },
            settings: ToJsonSettings {
                omit_private_properties: c.omit_private_properties,
                omit_private_properties_and_use_getters: c.omit_private_properties_and_use_getters,
                omit_empty_arrays: c.omit_empty_arrays,
                omit_empty_objects: c.omit_empty_objects,
                omit_class_property: c.omit_class_property,
                ..ToJsonSettings::default()
            },
        }
    }
}

// ── Build / fill ──────────────────────────────────────────────────────────

/// Build options shared by every recursive call.
#[derive(Clone, Default)]
pub struct FromJsonOptions {
    pub instantiator: Instantiator,
    pub converters: HashMap<String, FromJsonConverter>,
}

impl FromJsonOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_instantiator(instantiator: Instantiator) -> Self {
        Self {
            instantiator,
            converters: HashMap::new(),
        }
    }

    /// Registers a converter for trees tagged `class_name`.
    pub fn converter<F>(mut self, class_name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Map<String, JsonValue>, &FromJsonOptions) -> Value + Send + Sync + 'static,
    {
        self.converters.insert(class_name.into(), Arc::new(f));
        self
    }
}

impl From<Instantiator> for FromJsonOptions {
    fn from(instantiator: Instantiator) -> Self {
        Self::with_instantiator(instantiator)
    }
}

#[derive(Clone, Default)]
pub struct FillOptions {
    pub first: FirstObjectOptions,
    pub settings: FromJsonOptions,
}

impl FillOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses flag and list options from a JSON document.
    pub fn from_config_json(text: &str) -> Result<Self, JsonClassError> {
        let config: FillConfig = serde_json::from_str(text).map_err(JsonClassError::Config)?;
        Ok(config.into())
    }

    pub fn include<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.first.include = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.first.exclude = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn skip_custom_method(mut self, yes: bool) -> Self {
        self.first.skip_custom_method = yes;
        self
    }

    pub fn instantiator(mut self, instantiator: Instantiator) -> Self {
        self.settings.instantiator = instantiator;
        self
    }

    pub fn converter<F>(mut self, class_name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Map<String, JsonValue>, &FromJsonOptions) -> Value + Send + Sync + 'static,
    {
        self.settings = self.settings.converter(class_name, f);
        self
    }
}

impl From<FromJsonOptions> for FillOptions {
    fn from(settings: FromJsonOptions) -> Self {
        Self {
            first: FirstObjectOptions::default(),
            settings,
        }
    }
}

impl From<Instantiator> for FillOptions {
    fn from(instantiator: Instantiator) -> Self {
        FromJsonOptions::from(instantiator).into()
    }
}

/// Document form of the fill flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FillConfig {
    pub include: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    #[serde(rename = "doNotUseCustomToJsonMethodOfFirstObject")]
    pub skip_custom_method: bool,
}

impl From<FillConfig> for FillOptions {
    fn from(c: FillConfig) -> Self {
        Self {
            first: FirstObjectOptions {
                include: c.include,
                exclude: c.exclude,
                skip_custom_method: c.skip_custom_method,
            },
            settings: FromJsonOptions::default(),
        }
    }
}
