use std::collections::BTreeMap;

use crate::backends::{BackendDescriptor, git, github};
use crate::error::{QuarryError, Result};

/// Built-in backend descriptors. A backend exists for the launcher exactly
/// when it is listed here.
pub fn builtin_backends() -> Vec<BackendDescriptor> {
    vec![git::descriptor(), github::descriptor()]
}

/// Immutable name → descriptor mapping, built once per process at startup.
pub struct Registry {
    backends: BTreeMap<&'static str, BackendDescriptor>,
}

impl Registry {
    /// Build the registry from the built-in table. Duplicate names are a
    /// fatal startup error, never silent shadowing.
    pub fn discover() -> Result<Self> {
        Self::from_descriptors(builtin_backends())
    }

    pub(crate) fn from_descriptors(descriptors: Vec<BackendDescriptor>) -> Result<Self> {
        let mut backends = BTreeMap::new();
        for descriptor in descriptors {
            let name = descriptor.name;
            if backends.insert(name, descriptor).is_some() {
                return Err(QuarryError::DuplicateBackend { name });
            }
        }
        Ok(Self { backends })
    }

    pub fn lookup(&self, name: &str) -> Option<&BackendDescriptor> {
        self.backends.get(name)
    }

    /// Descriptors in canonical name order.
    pub fn descriptors(&self) -> impl Iterator<Item = &BackendDescriptor> {
        self.backends.values()
    }

    /// Registered names in canonical order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        self.backends.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }
}
