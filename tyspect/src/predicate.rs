// Predicates over runtime objects
// Each predicate closes over its equivalence data at build time; probing an
// object is a handful of pointer comparisons with no namespace lookup.

use crate::catalog::{CheckKind, ConstructSpec};
use crate::error::{BuildError, BuildResult};
use crate::namespace::DefiningSet;
use crate::object::Obj;
use crate::version::{self, RuntimeVersion, VersionRule};
use log::debug;

/// Attribute conventionally holding a named-tuple class's field names.
pub const FIELD_NAMES_ATTR: &str = "_fields";

/// The check a predicate performs, resolved once from the defining objects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Check {
    /// Construct absent from both providers; matches nothing.
    Never,
    /// Identity against any of the closed-over marker objects.
    Is(Vec<Obj>),
    /// Instance of any of the closed-over classes.
    InstanceOf(Vec<Obj>),
    /// Instance check with subscript wrappers excluded by exact
    /// representation first.
    InstanceOfNotSubscript(Vec<Obj>),
    /// Presence of a link attribute, for factory-produced objects.
    HasAttr(&'static str),
    /// Named-tuple shape: a class deriving the builtin tuple type and
    /// exposing the field-names attribute.
    NamedTuple { tuple_type: Obj },
}

/// A pure `(object) -> bool` classifier. Total over all inputs: any object,
/// of any kind, yields true or false and never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    name: &'static str,
    check: Check,
}

impl Predicate {
    pub(crate) fn new(name: &'static str, check: Check) -> Self {
        Predicate { name, check }
    }

    /// Public predicate name, e.g. `union` for `is_union`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn check(&self) -> &Check {
        &self.check
    }

    pub fn matches(&self, obj: &Obj) -> bool {
        match &self.check {
            Check::Never => false,
            Check::Is(members) => members.iter().any(|member| obj.is(member)),
            Check::InstanceOf(classes) => classes.iter().any(|class| obj.is_instance_of(class)),
            Check::InstanceOfNotSubscript(classes) => {
                !obj.is_subscript() && classes.iter().any(|class| obj.is_instance_of(class))
            }
            Check::HasAttr(attr) => obj.has_attr(attr),
            Check::NamedTuple { tuple_type } => {
                obj.is_class() && obj.is_subclass_of(tuple_type) && obj.has_attr(FIELD_NAMES_ATTR)
            }
        }
    }
}

/// Resolves the check for a cataloged construct: version overrides first,
/// then the generic identity/instance rules over the defining set.
pub(crate) fn build_check(
    spec: &ConstructSpec,
    set: &DefiningSet,
    host_version: RuntimeVersion,
) -> BuildResult<Check> {
    match version::rule_for(spec.name) {
        Some(VersionRule::FactoryBelow { below, link_attr }) if host_version < below => {
            return Ok(Check::HasAttr(link_attr));
        }
        Some(VersionRule::SubscriptQuirkAt { major, minor })
            if host_version.is_exactly(major, minor) =>
        {
            let classes = instance_targets(spec, set)?;
            return Ok(if classes.is_empty() {
                Check::Never
            } else {
                Check::InstanceOfNotSubscript(classes)
            });
        }
        _ => {}
    }

    if set.is_empty() {
        debug!(
            "construct {} absent from both providers, predicate degrades to never-match",
            spec.name
        );
        return Ok(Check::Never);
    }
    match spec.kind {
        CheckKind::Identity => Ok(Check::Is(set.distinct())),
        CheckKind::InstanceOf => Ok(Check::InstanceOf(instance_targets(spec, set)?)),
    }
}

/// The distinct defining objects validated as classes. A non-class where an
/// instance check was cataloged is a build-time inconsistency.
fn instance_targets(spec: &ConstructSpec, set: &DefiningSet) -> BuildResult<Vec<Obj>> {
    let labeled = set.labeled();
    for (provider, obj) in &labeled {
        if !obj.is_class() {
            return Err(BuildError::NotInstantiable {
                construct: spec.name.to_string(),
                provider: provider.to_string(),
                found: obj.type_name(),
            });
        }
    }
    Ok(labeled.into_iter().map(|(_, obj)| obj).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::construct;
    use crate::namespace::{Namespace, ProviderPair};

    const MODERN: RuntimeVersion = RuntimeVersion::new(3, 12);

    fn providers(primary: &[(&str, Obj)], extension: &[(&str, Obj)]) -> ProviderPair {
        let mut p = Namespace::new("primary");
        for (name, obj) in primary {
            p.insert(name, obj.clone());
        }
        let mut e = Namespace::new("extension");
        for (name, obj) in extension {
            e.insert(name, obj.clone());
        }
        ProviderPair::new(p, e)
    }

    #[test]
    fn test_empty_set_degrades_to_never() {
        let spec = construct("ReadOnly").unwrap();
        let pair = providers(&[], &[]);
        let check = build_check(spec, &pair.resolve("ReadOnly"), MODERN).unwrap();
        assert_eq!(check, Check::Never);
        assert!(!Predicate::new("readonly", check).matches(&Obj::int(1)));
    }

    #[test]
    fn test_identity_over_one_and_two_members() {
        let spec = construct("Literal").unwrap();
        let primary_form = Obj::special_form("Literal");
        let extension_form = Obj::special_form("Literal");

        let single = providers(&[("Literal", primary_form.clone())], &[]);
        let p = Predicate::new(
            "literal",
            build_check(spec, &single.resolve("Literal"), MODERN).unwrap(),
        );
        assert!(p.matches(&primary_form));
        assert!(!p.matches(&extension_form));

        let both = providers(
            &[("Literal", primary_form.clone())],
            &[("Literal", extension_form.clone())],
        );
        let p = Predicate::new(
            "literal",
            build_check(spec, &both.resolve("Literal"), MODERN).unwrap(),
        );
        assert!(p.matches(&primary_form));
        assert!(p.matches(&extension_form));
        assert!(!p.matches(&primary_form.subscript(vec![Obj::int(1)])));
    }

    #[test]
    fn test_instance_check_union_semantics() {
        let spec = construct("TypeVar").unwrap();
        let primary_class = Obj::class("TypeVar");
        let extension_class = Obj::class("TypeVar");
        let pair = providers(
            &[("TypeVar", primary_class.clone())],
            &[("TypeVar", extension_class.clone())],
        );
        let p = Predicate::new(
            "typevar",
            build_check(spec, &pair.resolve("TypeVar"), MODERN).unwrap(),
        );
        assert!(p.matches(&Obj::instance(&primary_class, "T")));
        assert!(p.matches(&Obj::instance(&extension_class, "U")));
        assert!(!p.matches(&Obj::str("T")));
    }

    #[test]
    fn test_instance_check_rejects_non_class_provider_object() {
        let spec = construct("TypeVar").unwrap();
        let pair = providers(&[("TypeVar", Obj::callable("TypeVar"))], &[]);
        let err = build_check(spec, &pair.resolve("TypeVar"), MODERN).unwrap_err();
        assert_eq!(
            err,
            BuildError::NotInstantiable {
                construct: "TypeVar".to_string(),
                provider: "primary namespace".to_string(),
                found: "callable",
            }
        );
    }

    #[test]
    fn test_factory_band_switches_to_attr_probe() {
        let spec = construct("NewType").unwrap();
        let pair = providers(&[("NewType", Obj::callable("NewType"))], &[]);
        let old = RuntimeVersion::new(3, 9);
        let check = build_check(spec, &pair.resolve("NewType"), old).unwrap();
        assert_eq!(check, Check::HasAttr("__supertype__"));

        let p = Predicate::new("newtype", check);
        let user_id = crate::object::ObjBuilder::instance("UserId", &Obj::class("object"))
            .with_attr("__supertype__", Obj::class("int"))
            .build();
        assert!(p.matches(&user_id));
        assert!(!p.matches(&Obj::class("int")));
    }

    #[test]
    fn test_subscript_quirk_band_adds_exclusion_guard() {
        let spec = construct("TypeAliasType").unwrap();
        let alias_class = Obj::class("TypeAliasType");
        let pair = providers(&[("TypeAliasType", alias_class.clone())], &[]);

        let quirky = build_check(spec, &pair.resolve("TypeAliasType"), RuntimeVersion::new(3, 10))
            .unwrap();
        assert!(matches!(quirky, Check::InstanceOfNotSubscript(_)));

        let plain = build_check(spec, &pair.resolve("TypeAliasType"), MODERN).unwrap();
        assert!(matches!(plain, Check::InstanceOf(_)));
    }
}
