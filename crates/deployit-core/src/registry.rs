//! String-keyed type registries.
//!
//! Configuration documents select stage, service and messenger types by name.
//! A `Registry` maps each recognized name to a constructor, resolved once at
//! startup; looking up an unregistered name yields a typed error.

use crate::{Error, Result};
use std::collections::HashMap;

/// Maps type names to constructors for one kind of target object.
pub struct Registry<T> {
    kind: &'static str,
    ctors: HashMap<&'static str, fn() -> T>,
}

impl<T> Registry<T> {
    /// Creates an empty registry for the given kind label ("stage",
    /// "service", ...). The label only appears in error messages.
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            ctors: HashMap::new(),
        }
    }

    /// Registers a constructor under a type name.
    pub fn register(&mut self, name: &'static str, ctor: fn() -> T) {
        self.ctors.insert(name, ctor);
    }

    /// Constructs a fresh instance of the named type.
    pub fn create(&self, name: &str) -> Result<T> {
        match self.ctors.get(name) {
            Some(ctor) => Ok(ctor()),
            None => Err(Error::UnknownType {
                kind: self.kind,
                name: name.to_string(),
            }),
        }
    }

    /// Whether a type name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.ctors.contains_key(name)
    }

    /// The registered type names, in no particular order.
    pub fn names(&self) -> Vec<&'static str> {
        self.ctors.keys().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_registered() {
        let mut registry = Registry::new("widget");
        registry.register("answer", || 42u32);

        assert!(registry.contains("answer"));
        assert_eq!(registry.create("answer").unwrap(), 42);
    }

    #[test]
    fn test_create_unknown() {
        let registry: Registry<u32> = Registry::new("widget");

        let err = registry.create("missing").unwrap_err();
        assert_eq!(err.to_string(), "unknown widget type: missing");
    }

    #[test]
    fn test_each_create_is_fresh() {
        let mut registry = Registry::new("widget");
        registry.register("list", Vec::<String>::new);

        let mut first = registry.create("list").unwrap();
        first.push("entry".to_string());
        let second = registry.create("list").unwrap();
        assert!(second.is_empty());
    }
}
