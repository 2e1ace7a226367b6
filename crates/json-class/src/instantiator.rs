//! Type registry: tag → blank-instance factory.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::value::{class_ref, ClassRef, JsonClass};

/// Produces a blank instance. Must not fail.
pub type Factory = Arc<dyn Fn() -> ClassRef + Send + Sync>;

/// Maps type tags to factories used while building objects from trees.
#[derive(Clone, Default)]
pub struct Instantiator {
    factories: HashMap<String, Factory>,
}

impl Instantiator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Combines registries. On tag collisions the later registry wins.
    pub fn merged<'a, I>(instantiators: I) -> Self
    where
        I: IntoIterator<Item = &'a Instantiator>,
    {
        let mut out = Self::new();
        for instantiator in instantiators {
            out.extend(instantiator);
        }
        out
    }

    /// Copies every entry of `other`, overriding existing tags.
    pub fn extend(&mut self, other: &Instantiator) {
        for (tag, factory) in &other.factories {
            self.factories.insert(tag.clone(), factory.clone());
        }
    }

    /// Registers `T` under the tag reported by a blank `T`.
    pub fn register<T: JsonClass + Default>(&mut self) -> &mut Self {
        let tag = T::default().class_name().to_owned();
        self.insert(tag, || class_ref(T::default()))
    }

    /// Builder form of [`Instantiator::register`].
    pub fn with<T: JsonClass + Default>(mut self) -> Self {
        self.register::<T>();
        self
    }

    pub fn insert<F>(&mut self, tag: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn() -> ClassRef + Send + Sync + 'static,
    {
        self.factories.insert(tag.into(), Arc::new(factory));
        self
    }

    pub fn remove(&mut self, tag: &str) -> Option<Factory> {
        self.factories.remove(tag)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.factories.contains_key(tag)
    }

    /// Creates a blank instance for `tag`, if registered.
    pub fn instantiate(&self, tag: &str) -> Option<ClassRef> {
        self.factories.get(tag).map(|factory| factory())
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for Instantiator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<&str> = self.tags().collect();
        tags.sort_unstable();
        f.debug_struct("Instantiator").field("tags", &tags).finish()
    }
}
