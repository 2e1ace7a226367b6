/// Implements [`JsonClass`](crate::JsonClass) for a struct whose listed
/// fields are [`Value`](crate::Value)s.
///
/// The struct name is the type tag; the fields are the own properties in
/// the listed order. Keys outside the list read as `Undefined` and are
/// dropped on write.
///
/// ```
/// use json_class::{json_class, to_json_obj, ToJsonOptions, Value};
///
/// #[derive(Default)]
/// struct Point {
///     x: Value,
///     y: Value,
/// }
///
/// json_class!(Point { x, y });
///
/// let p = Value::object(Point { x: 1.into(), y: 2.into() });
/// let tree = to_json_obj(&p, &ToJsonOptions::default());
/// assert_eq!(tree, serde_json::json!({"@class": "Point", "x": 1, "y": 2}));
/// ```
#[macro_export]
macro_rules! json_class {
    ($ty:ident { $($field:ident),* $(,)? }) => {
        impl $crate::JsonClass for $ty {
            fn class_name(&self) -> &str {
                stringify!($ty)
            }

            fn own_keys(&self) -> ::std::vec::Vec<::std::string::String> {
                ::std::vec![$(::std::string::String::from(stringify!($field))),*]
            }

            fn get(&self, key: &str) -> $crate::Value {
                match key {
                    $(stringify!($field) => ::std::clone::Clone::clone(&self.$field),)*
                    _ => $crate::Value::Undefined,
                }
            }

            fn set(&mut self, key: &str, value: $crate::Value) {
                match key {
                    $(stringify!($field) => self.$field = value,)*
                    _ => $crate::__dropped_key(stringify!($ty), key),
                }
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
                self
            }
        }
    };
}

#[doc(hidden)]
pub fn __dropped_key(class_name: &str, key: &str) {
    tracing::trace!(class = class_name, key, "class has no such property; value dropped");
}
