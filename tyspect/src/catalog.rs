// The fixed catalog of classified constructs

use serde::{Deserialize, Serialize};

/// How a construct is recognized once its defining objects are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    /// The construct is a sentinel marker; arguments must be the marker
    /// object itself.
    Identity,
    /// The construct is a class; arguments must be instances of it.
    InstanceOf,
}

/// One logical member of the annotation system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstructSpec {
    /// Attribute name under which providers define the construct.
    pub name: &'static str,
    /// Public predicate name (`is_<predicate>`).
    pub predicate: &'static str,
    pub kind: CheckKind,
}

const fn identity(name: &'static str, predicate: &'static str) -> ConstructSpec {
    ConstructSpec {
        name,
        predicate,
        kind: CheckKind::Identity,
    }
}

const fn instance(name: &'static str, predicate: &'static str) -> ConstructSpec {
    ConstructSpec {
        name,
        predicate,
        kind: CheckKind::InstanceOf,
    }
}

// Keep this ordered as the primary provider lists its members. The
// named-tuple predicate is structural rather than namespace-resolved and so
// is not cataloged here; see the registry.
pub const CATALOG: &[ConstructSpec] = &[
    identity("Annotated", "annotated"),
    identity("Any", "any"),
    identity("ClassVar", "classvar"),
    identity("Concatenate", "concatenate"),
    identity("Final", "final"),
    identity("Generic", "generic"),
    identity("Literal", "literal"),
    instance("ParamSpec", "paramspec"),
    instance("TypeVar", "typevar"),
    instance("TypeVarTuple", "typevartuple"),
    identity("Union", "union"),
    identity("LiteralString", "literalstring"),
    identity("Never", "never"),
    instance("NewType", "newtype"),
    identity("NoDefault", "nodefault"),
    identity("NoReturn", "noreturn"),
    identity("NotRequired", "notrequired"),
    instance("ParamSpecArgs", "paramspecargs"),
    instance("ParamSpecKwargs", "paramspeckwargs"),
    identity("ReadOnly", "readonly"),
    identity("Required", "required"),
    identity("Self", "self"),
    identity("TypeAlias", "typealias"),
    identity("TypeGuard", "typeguard"),
    identity("TypeIs", "typeis"),
    instance("TypeAliasType", "typealiastype"),
    identity("Unpack", "unpack"),
];

/// Looks a construct up by its provider attribute name.
pub fn construct(name: &str) -> Option<&'static ConstructSpec> {
    CATALOG.iter().find(|spec| spec.name == name)
}
