// Provider namespaces and construct resolution

use crate::object::Obj;
use std::collections::HashMap;

/// A named attribute store, one of the two overlapping sources that define
/// annotation-system constructs. Populated by the embedder; an absent name
/// is simply "not found", never an error.
#[derive(Debug, Clone, Default)]
pub struct Namespace {
    name: String,
    attrs: HashMap<String, Obj>,
}

impl Namespace {
    pub fn new(name: &str) -> Self {
        Namespace {
            name: name.to_string(),
            attrs: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn insert(&mut self, attr: &str, obj: Obj) {
        self.attrs.insert(attr.to_string(), obj);
    }

    pub fn get(&self, attr: &str) -> Option<&Obj> {
        self.attrs.get(attr)
    }

    pub fn contains(&self, attr: &str) -> bool {
        self.attrs.contains_key(attr)
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }
}

/// The primary and extension provider namespaces, probed together.
#[derive(Debug, Clone)]
pub struct ProviderPair {
    primary: Namespace,
    extension: Namespace,
}

impl ProviderPair {
    pub fn new(primary: Namespace, extension: Namespace) -> Self {
        ProviderPair { primary, extension }
    }

    pub fn primary(&self) -> &Namespace {
        &self.primary
    }

    pub fn extension(&self) -> &Namespace {
        &self.extension
    }

    /// Looks a construct name up in both namespaces. Pure lookup: no
    /// classification or version reasoning happens here.
    pub fn resolve(&self, name: &str) -> DefiningSet {
        DefiningSet {
            primary: self.primary.get(name).cloned(),
            extension: self.extension.get(name).cloned(),
        }
    }
}

/// The objects a construct name resolved to across both providers.
///
/// Cardinality of the distinct set is 0, 1, or 2: both providers may define
/// the same object (one entry), different objects (two entries), or neither
/// (empty, a legitimate degraded-capability state).
#[derive(Debug, Clone)]
pub struct DefiningSet {
    primary: Option<Obj>,
    extension: Option<Obj>,
}

impl DefiningSet {
    pub fn primary(&self) -> Option<&Obj> {
        self.primary.as_ref()
    }

    pub fn extension(&self) -> Option<&Obj> {
        self.extension.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_none() && self.extension.is_none()
    }

    /// The identity-distinct defining objects, primary first. An extension
    /// object identical to the primary one collapses into a single entry.
    pub fn distinct(&self) -> Vec<Obj> {
        let mut out = Vec::with_capacity(2);
        if let Some(p) = &self.primary {
            out.push(p.clone());
        }
        if let Some(e) = &self.extension {
            if !self.primary.as_ref().is_some_and(|p| p.is(e)) {
                out.push(e.clone());
            }
        }
        out
    }

    /// Like `distinct`, labeled with the providing slot for diagnostics.
    pub fn labeled(&self) -> Vec<(&'static str, Obj)> {
        let mut out = Vec::with_capacity(2);
        if let Some(p) = &self.primary {
            out.push(("primary namespace", p.clone()));
        }
        if let Some(e) = &self.extension {
            if !self.primary.as_ref().is_some_and(|p| p.is(e)) {
                out.push(("extension namespace", e.clone()));
            }
        }
        out
    }
}
