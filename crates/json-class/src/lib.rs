//! json-class - maps object graphs to JSON trees and back.
//!
//! Three operations make up the engine:
//!
//! - [`to_json_obj`] walks an object graph and produces a JSON-safe tree,
//!   tagging typed objects with their class name under `@class`.
//! - [`from_json_obj`] builds a graph from a tree, creating typed instances
//!   through an [`Instantiator`] or a converter table.
//! - [`fill_json_obj`] merges a tree into objects that already exist.
//!
//! Objects take part by implementing [`JsonClass`] (or through the
//! [`json_class!`] macro). They may override either direction with the
//! optional hook methods of that trait.
//!
//! ```
//! use json_class::{from_json_obj, json_class, to_json_obj, FromJsonOptions, Instantiator,
//!     ToJsonOptions, Value};
//! use serde_json::json;
//!
//! #[derive(Default)]
//! struct User {
//!     name: Value,
//!     joined: Value,
//! }
//!
//! json_class!(User { name, joined });
//!
//! let options = FromJsonOptions::from(Instantiator::new().with::<User>());
//! let tree = json!({
//!     "@class": "User",
//!     "name": "ada",
//!     "joined": {"@class": "Date", "date": "2020-01-01T00:00:00.000Z"}
//! });
//! let user = from_json_obj(&tree, &options);
//! assert!(user.is_instance_of::<User>());
//! assert!(user.get("joined").as_date().is_some());
//! assert_eq!(to_json_obj(&user, &ToJsonOptions::default()), tree);
//! ```

mod constants;
mod converters;
mod decode;
mod encode;
mod error;
mod fill;
mod hooks;
mod instantiator;
mod macros;
mod options;
mod value;

pub use constants::{BIG_INT_CLASS, CLASS_KEY, DATE_CLASS, PLAIN_CLASS, PRIVATE_PREFIX};
pub use converters::format_date;
pub use decode::{from_json, from_json_obj};
pub use encode::{to_json, to_json_obj};
pub use error::{decode_tree, JsonClassError};
pub use fill::{fill_json, fill_json_obj, fill_with_json_obj};
pub use instantiator::{Factory, Instantiator};
pub use options::{
    FillConfig, FillOptions, FirstObjectOptions, FromJsonConverter, FromJsonOptions,
    PropertyConverter, ToJsonConfig, ToJsonConverter, ToJsonOptions, ToJsonSettings,
};
pub use value::{class_ref, ClassRef, JsonClass, Record, Value};

#[doc(hidden)]
pub use macros::__dropped_key;
