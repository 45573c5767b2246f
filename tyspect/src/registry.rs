// The frozen classification surface
// Built once from the provider pair and the host description; read-only and
// lock-free afterward.

use crate::aliases::AliasRegistry;
use crate::catalog::CATALOG;
use crate::error::{BuildError, BuildResult};
use crate::namespace::{Namespace, ProviderPair};
use crate::object::Obj;
use crate::predicate::{build_check, Check, Predicate};
use crate::version::RuntimeVersion;
use indexmap::IndexMap;
use log::debug;
use std::fmt;

/// Name of the structural named-tuple predicate in the table.
const NAMEDTUPLE: &str = "namedtuple";

/// Canonical-namespace names the build itself depends on.
const TUPLE_TYPE: &str = "tuple";
const NONE_TYPE: &str = "NoneType";

/// The embedder's description of the running host: its version tuple and
/// the canonical namespace holding the modern runtime types (builtins and
/// abstract container classes).
#[derive(Debug, Clone)]
pub struct Host {
    pub version: RuntimeVersion,
    pub canonical: Namespace,
}

impl Host {
    pub fn new(version: RuntimeVersion, canonical: Namespace) -> Self {
        Host { version, canonical }
    }
}

/// The process-wide classification artifact: one predicate per cataloged
/// construct, the merged deprecated-alias table, and the host's none type.
///
/// Build it once at startup and share it by reference; nothing is mutated
/// after construction, so concurrent readers need no locking.
#[derive(Clone, PartialEq)]
pub struct Introspection {
    predicates: IndexMap<&'static str, Predicate>,
    aliases: AliasRegistry,
    none_type: Obj,
    version: RuntimeVersion,
}

impl fmt::Debug for Introspection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Introspection")
            .field("predicates", &format!("{} predicates", self.predicates.len()))
            .field("aliases", &format!("{} aliases", self.aliases.len()))
            .field("version", &self.version)
            .finish()
    }
}

impl Introspection {
    /// Resolves every cataloged construct against the providers and freezes
    /// the result. Degraded constructs (absent from both providers) get
    /// never-matching predicates; catalog/namespace inconsistencies fail
    /// here and nowhere else.
    pub fn build(providers: &ProviderPair, host: &Host) -> BuildResult<Self> {
        let tuple_type = match host.canonical.get(TUPLE_TYPE) {
            Some(obj) if obj.is_class() => obj.clone(),
            Some(obj) => {
                return Err(BuildError::CanonicalNotType {
                    name: TUPLE_TYPE.to_string(),
                    found: obj.type_name(),
                })
            }
            None => return Err(BuildError::MissingTupleType),
        };
        let none_type = match host.canonical.get(NONE_TYPE) {
            Some(obj) if obj.is_class() => obj.clone(),
            Some(obj) => {
                return Err(BuildError::CanonicalNotType {
                    name: NONE_TYPE.to_string(),
                    found: obj.type_name(),
                })
            }
            None => return Err(BuildError::MissingNoneType),
        };

        let mut predicates = IndexMap::with_capacity(CATALOG.len() + 1);
        for spec in CATALOG {
            let set = providers.resolve(spec.name);
            let check = build_check(spec, &set, host.version)?;
            predicates.insert(spec.predicate, Predicate::new(spec.predicate, check));
        }
        // Host-native mechanism, no provider or version dependency.
        predicates.insert(
            NAMEDTUPLE,
            Predicate::new(NAMEDTUPLE, Check::NamedTuple { tuple_type }),
        );
        debug!(
            "built {} predicates for host {}",
            predicates.len(),
            host.version
        );

        let aliases = AliasRegistry::build(providers, &host.canonical)?;
        Ok(Introspection {
            predicates,
            aliases,
            none_type,
            version: host.version,
        })
    }

    /// The predicate for a construct, by public name (e.g. `union`).
    pub fn predicate(&self, name: &str) -> Option<&Predicate> {
        self.predicates.get(name)
    }

    /// All predicates, in catalog order (named-tuple last).
    pub fn predicates(&self) -> impl Iterator<Item = &Predicate> {
        self.predicates.values()
    }

    /// Probes `obj` against a named predicate; an unknown name matches
    /// nothing.
    pub fn probe(&self, name: &str, obj: &Obj) -> bool {
        self.predicates
            .get(name)
            .map(|p| p.matches(obj))
            .unwrap_or(false)
    }

    /// The merged legacy-alias table.
    pub fn deprecated_aliases(&self) -> &AliasRegistry {
        &self.aliases
    }

    /// The host's native no-value type, for version-portable comparisons.
    pub fn none_type(&self) -> &Obj {
        &self.none_type
    }

    pub fn version(&self) -> RuntimeVersion {
        self.version
    }

    /// Whether the argument is the annotated-wrapper special form itself
    /// (not a parameterized use of it).
    pub fn is_annotated(&self, obj: &Obj) -> bool {
        self.probe("annotated", obj)
    }

    /// Whether the argument is the any-type special form.
    pub fn is_any(&self, obj: &Obj) -> bool {
        self.probe("any", obj)
    }

    pub fn is_classvar(&self, obj: &Obj) -> bool {
        self.probe("classvar", obj)
    }

    pub fn is_concatenate(&self, obj: &Obj) -> bool {
        self.probe("concatenate", obj)
    }

    pub fn is_final(&self, obj: &Obj) -> bool {
        self.probe("final", obj)
    }

    pub fn is_generic(&self, obj: &Obj) -> bool {
        self.probe("generic", obj)
    }

    pub fn is_literal(&self, obj: &Obj) -> bool {
        self.probe("literal", obj)
    }

    pub fn is_literalstring(&self, obj: &Obj) -> bool {
        self.probe("literalstring", obj)
    }

    /// Whether the argument is a named-tuple class: a class deriving the
    /// builtin tuple type and carrying the field-names attribute. The bare
    /// named-tuple construct itself does not qualify.
    pub fn is_namedtuple(&self, obj: &Obj) -> bool {
        self.probe(NAMEDTUPLE, obj)
    }

    pub fn is_never(&self, obj: &Obj) -> bool {
        self.probe("never", obj)
    }

    /// Whether the argument is a distinct-type wrapper. On hosts where the
    /// wrapper is still a plain factory, this recognizes the factory's
    /// outputs by their link attribute instead.
    pub fn is_newtype(&self, obj: &Obj) -> bool {
        self.probe("newtype", obj)
    }

    pub fn is_nodefault(&self, obj: &Obj) -> bool {
        self.probe("nodefault", obj)
    }

    /// Whether the argument is the no-return marker. The never marker is a
    /// different object and does not match.
    pub fn is_noreturn(&self, obj: &Obj) -> bool {
        self.probe("noreturn", obj)
    }

    pub fn is_notrequired(&self, obj: &Obj) -> bool {
        self.probe("notrequired", obj)
    }

    pub fn is_paramspec(&self, obj: &Obj) -> bool {
        self.probe("paramspec", obj)
    }

    pub fn is_paramspecargs(&self, obj: &Obj) -> bool {
        self.probe("paramspecargs", obj)
    }

    pub fn is_paramspeckwargs(&self, obj: &Obj) -> bool {
        self.probe("paramspeckwargs", obj)
    }

    pub fn is_readonly(&self, obj: &Obj) -> bool {
        self.probe("readonly", obj)
    }

    pub fn is_required(&self, obj: &Obj) -> bool {
        self.probe("required", obj)
    }

    pub fn is_self(&self, obj: &Obj) -> bool {
        self.probe("self", obj)
    }

    pub fn is_typealias(&self, obj: &Obj) -> bool {
        self.probe("typealias", obj)
    }

    /// Whether the argument is a named alias value. Parameterized alias
    /// instances never match, on every host version.
    pub fn is_typealiastype(&self, obj: &Obj) -> bool {
        self.probe("typealiastype", obj)
    }

    pub fn is_typeguard(&self, obj: &Obj) -> bool {
        self.probe("typeguard", obj)
    }

    pub fn is_typeis(&self, obj: &Obj) -> bool {
        self.probe("typeis", obj)
    }

    /// Whether the argument is a type variable, from either provider.
    pub fn is_typevar(&self, obj: &Obj) -> bool {
        self.probe("typevar", obj)
    }

    pub fn is_typevartuple(&self, obj: &Obj) -> bool {
        self.probe("typevartuple", obj)
    }

    /// Whether the argument is the union special form. A parameterized
    /// union is a different object and does not match.
    pub fn is_union(&self, obj: &Obj) -> bool {
        self.probe("union", obj)
    }

    pub fn is_unpack(&self, obj: &Obj) -> bool {
        self.probe("unpack", obj)
    }
}
