// Deprecated generic-container aliases and their canonical replacements

use crate::error::{BuildError, BuildResult};
use crate::namespace::{Namespace, ProviderPair};
use crate::object::{Obj, ObjId};
use log::debug;
use std::collections::HashMap;

/// One curated (legacy alias name, canonical type name) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AliasSpec {
    pub alias: &'static str,
    pub canonical: &'static str,
}

const fn pair(alias: &'static str, canonical: &'static str) -> AliasSpec {
    AliasSpec { alias, canonical }
}

/// Every known deprecated generic container alias, mapped to the name of
/// the modern runtime type that replaced it. Names on the right resolve in
/// the canonical namespace; names on the left in the provider namespaces.
pub const DEPRECATED_ALIASES: &[AliasSpec] = &[
    pair("Hashable", "Hashable"),
    pair("Awaitable", "Awaitable"),
    pair("Coroutine", "Coroutine"),
    pair("AsyncIterable", "AsyncIterable"),
    pair("AsyncIterator", "AsyncIterator"),
    pair("Iterable", "Iterable"),
    pair("Iterator", "Iterator"),
    pair("Reversible", "Reversible"),
    pair("Sized", "Sized"),
    pair("Container", "Container"),
    pair("Collection", "Collection"),
    pair("Callable", "Callable"),
    pair("AbstractSet", "Set"),
    pair("MutableSet", "MutableSet"),
    pair("Mapping", "Mapping"),
    pair("MutableMapping", "MutableMapping"),
    pair("Sequence", "Sequence"),
    pair("MutableSequence", "MutableSequence"),
    pair("Tuple", "tuple"),
    pair("List", "list"),
    pair("Deque", "deque"),
    pair("Set", "set"),
    pair("FrozenSet", "frozenset"),
    pair("MappingView", "MappingView"),
    pair("KeysView", "KeysView"),
    pair("ItemsView", "ItemsView"),
    pair("ValuesView", "ValuesView"),
    pair("Dict", "dict"),
    pair("DefaultDict", "defaultdict"),
    pair("OrderedDict", "OrderedDict"),
    pair("Counter", "Counter"),
    pair("ChainMap", "ChainMap"),
    pair("Generator", "Generator"),
    pair("AsyncGenerator", "AsyncGenerator"),
    pair("Type", "type"),
    pair("Pattern", "Pattern"),
    pair("Match", "Match"),
    pair("ContextManager", "AbstractContextManager"),
    pair("AsyncContextManager", "AbstractAsyncContextManager"),
    // ByteString is skipped: removed from the host runtime.
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasEntry {
    pub alias: Obj,
    pub canonical: Obj,
}

/// The merged alias table: any legacy alias object, from either provider,
/// maps to its single modern replacement type in one lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasRegistry {
    entries: HashMap<ObjId, AliasEntry>,
}

impl AliasRegistry {
    pub(crate) fn build(providers: &ProviderPair, canonical: &Namespace) -> BuildResult<Self> {
        let mut entries = HashMap::new();
        for spec in DEPRECATED_ALIASES {
            let target = canonical
                .get(spec.canonical)
                .ok_or_else(|| BuildError::MissingCanonical {
                    name: spec.canonical.to_string(),
                })?;
            // Values must be concrete runtime types; the no-chain invariant
            // is enforced here rather than assumed.
            if !target.is_class() {
                return Err(BuildError::CanonicalNotType {
                    name: spec.canonical.to_string(),
                    found: target.type_name(),
                });
            }

            let Some(primary_alias) = providers.primary().get(spec.alias) else {
                debug!(
                    "legacy alias {} absent from the primary namespace, skipped",
                    spec.alias
                );
                continue;
            };
            entries.insert(
                primary_alias.id(),
                AliasEntry {
                    alias: primary_alias.clone(),
                    canonical: target.clone(),
                },
            );

            // A distinct extension variant resolves to the same replacement.
            if let Some(extension_alias) = providers.extension().get(spec.alias) {
                if !extension_alias.is(primary_alias) {
                    entries.insert(
                        extension_alias.id(),
                        AliasEntry {
                            alias: extension_alias.clone(),
                            canonical: target.clone(),
                        },
                    );
                }
            }
        }
        Ok(AliasRegistry { entries })
    }

    /// The modern replacement type for a legacy alias object, from whichever
    /// provider supplied it.
    pub fn canonical_for(&self, alias: &Obj) -> Option<&Obj> {
        self.entries.get(&alias.id()).map(|entry| &entry.canonical)
    }

    pub fn contains(&self, alias: &Obj) -> bool {
        self.entries.contains_key(&alias.id())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AliasEntry> {
        self.entries.values()
    }
}
