use std::sync::Arc;

/// A successfully resolved name and the destinations it resolved to.
///
/// Only constructed for non-empty resolutions; an empty answer is a valid
/// query outcome but never becomes a `Resolution`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub name: Arc<str>,
    pub destinations: Vec<String>,
}

impl Resolution {
    pub fn new(name: impl Into<Arc<str>>, destinations: Vec<String>) -> Self {
        Self {
            name: name.into(),
            destinations,
        }
    }
}
