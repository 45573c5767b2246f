// Shared model of a host runtime for the integration suites.
//
// The primary namespace defines most cataloged constructs; the extension
// namespace re-exports some of them identically, ships its own distinct
// copies of others, leads on one, and both lag on a couple. Canonical
// modern types live in a separate canonical namespace.

use tyspect::{
    CheckKind, Host, Namespace, Obj, ProviderPair, RuntimeVersion, CATALOG, DEPRECATED_ALIASES,
};

/// Constructs the extension namespace defines as its own distinct objects.
pub const DISTINCT_IN_EXTENSION: &[&str] = &["Literal", "TypeGuard", "Required", "TypeVar"];

/// Constructs defined only by the extension namespace.
pub const EXTENSION_ONLY: &[&str] = &["TypeIs"];

/// Constructs absent from both namespaces (degraded on this host).
pub const MISSING_EVERYWHERE: &[&str] = &["ReadOnly", "NoDefault"];

/// Legacy aliases the extension namespace ships as distinct objects.
pub const DISTINCT_ALIASES: &[&str] = &["Deque", "Hashable", "ContextManager"];

pub struct ModeledRuntime {
    pub providers: ProviderPair,
    pub host: Host,
}

pub fn modern() -> ModeledRuntime {
    modeled(RuntimeVersion::new(3, 12))
}

/// The one minor version where subscripted alias values leak through the
/// alias-class instance check.
pub fn quirk_band() -> ModeledRuntime {
    modeled(RuntimeVersion::new(3, 10))
}

/// A host old enough that the distinct-type wrapper is still a factory.
pub fn legacy_band() -> ModeledRuntime {
    modeled(RuntimeVersion::new(3, 9))
}

pub fn modeled(version: RuntimeVersion) -> ModeledRuntime {
    let mut primary = Namespace::new("primary");
    let mut extension = Namespace::new("extension");

    for spec in CATALOG {
        if MISSING_EVERYWHERE.contains(&spec.name) {
            continue;
        }
        if EXTENSION_ONLY.contains(&spec.name) {
            extension.insert(spec.name, provider_object(spec.name, spec.kind, version));
            continue;
        }
        let obj = provider_object(spec.name, spec.kind, version);
        primary.insert(spec.name, obj.clone());
        if DISTINCT_IN_EXTENSION.contains(&spec.name) {
            extension.insert(spec.name, provider_object(spec.name, spec.kind, version));
        } else {
            extension.insert(spec.name, obj);
        }
    }

    for spec in DEPRECATED_ALIASES {
        let alias = Obj::special_form(spec.alias);
        primary.insert(spec.alias, alias.clone());
        if DISTINCT_ALIASES.contains(&spec.alias) {
            extension.insert(spec.alias, Obj::special_form(spec.alias));
        } else {
            extension.insert(spec.alias, alias);
        }
    }

    ModeledRuntime {
        providers: ProviderPair::new(primary, extension),
        host: Host::new(version, canonical_namespace()),
    }
}

fn provider_object(name: &str, kind: CheckKind, version: RuntimeVersion) -> Obj {
    // Before 3.10 the distinct-type wrapper is a plain factory with no
    // recognizable output class.
    if name == "NewType" && !version.at_least(3, 10) {
        return Obj::callable(name);
    }
    match kind {
        CheckKind::Identity => Obj::special_form(name),
        CheckKind::InstanceOf => Obj::class(name),
    }
}

pub fn canonical_namespace() -> Namespace {
    let mut ns = Namespace::new("canonical");
    ns.insert("NoneType", Obj::class("NoneType"));
    for spec in DEPRECATED_ALIASES {
        if ns.get(spec.canonical).is_none() {
            ns.insert(spec.canonical, Obj::class(spec.canonical));
        }
    }
    // `tuple` is already present via the fixed-size sequence alias, but the
    // build must not depend on that table coincidence.
    if ns.get("tuple").is_none() {
        ns.insert("tuple", Obj::class("tuple"));
    }
    ns
}
