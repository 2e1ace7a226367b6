//! Reserved keys and well-known type tags.

/// Reserved tree key carrying the type tag of a composite value.
pub const CLASS_KEY: &str = "@class";

/// Type tag of the plain untyped record. Never emitted into a tree.
pub const PLAIN_CLASS: &str = "Object";

/// Type tag of the date-time extended primitive.
pub const DATE_CLASS: &str = "Date";

/// Type tag of the extended-precision integer primitive.
pub const BIG_INT_CLASS: &str = "BigInt";

/// Property name prefix marking a private backing field.
pub const PRIVATE_PREFIX: char = '_';
