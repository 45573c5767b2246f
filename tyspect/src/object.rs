// Runtime object model for the host annotation system
// Represents the objects being classified (different from the predicates that classify them)

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Stable identity of an object handle, usable as a map key.
pub type ObjId = usize;

/// A shared, immutable handle to a host runtime object.
///
/// Two handles are the same object exactly when they share an allocation;
/// `is` (and `==`) compare identity, never contents. Objects are frozen at
/// construction, so a handle can be cloned and probed from any thread.
#[derive(Clone)]
pub struct Obj(Arc<ObjData>);

#[derive(Debug)]
struct ObjData {
    name: String,
    kind: ObjKind,
    class: Option<Obj>,
    attrs: HashMap<String, Obj>,
}

/// The runtime representation of an object.
#[derive(Debug, Clone)]
pub enum ObjKind {
    /// A sentinel type-level marker, recognized by identity.
    SpecialForm,
    /// An instantiable class with base classes.
    Class { bases: Vec<Obj> },
    /// A plain callable, e.g. a factory with no recognizable output class.
    Callable,
    /// An instance of some class.
    Instance,
    /// A parameterized (subscripted) form wrapping an origin object.
    Subscript { origin: Obj, args: Vec<Obj> },
    Int(i64),
    Str(String),
    Bool(bool),
    Nil,
}

impl Obj {
    pub fn special_form(name: &str) -> Obj {
        ObjBuilder::special_form(name).build()
    }

    pub fn class(name: &str) -> Obj {
        ObjBuilder::class(name).build()
    }

    pub fn class_with_bases(name: &str, bases: Vec<Obj>) -> Obj {
        ObjBuilder::class_with_bases(name, bases).build()
    }

    pub fn callable(name: &str) -> Obj {
        ObjBuilder::callable(name).build()
    }

    pub fn instance(class: &Obj, name: &str) -> Obj {
        ObjBuilder::instance(name, class).build()
    }

    pub fn int(value: i64) -> Obj {
        ObjBuilder::new(value.to_string(), ObjKind::Int(value)).build()
    }

    pub fn str(value: &str) -> Obj {
        ObjBuilder::new(value.to_string(), ObjKind::Str(value.to_string())).build()
    }

    pub fn boolean(value: bool) -> Obj {
        ObjBuilder::new(value.to_string(), ObjKind::Bool(value)).build()
    }

    pub fn nil() -> Obj {
        ObjBuilder::new("nil".to_string(), ObjKind::Nil).build()
    }

    /// Creates the parameterized form of this object. The result is a new
    /// object, distinct in identity from its origin, with no runtime class.
    pub fn subscript(&self, args: Vec<Obj>) -> Obj {
        ObjBuilder::subscript(self, args).build()
    }

    pub fn id(&self) -> ObjId {
        Arc::as_ptr(&self.0) as ObjId
    }

    /// Identity comparison: same object, not merely equal contents.
    pub fn is(&self, other: &Obj) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn kind(&self) -> &ObjKind {
        &self.0.kind
    }

    /// The object's runtime class, if it has one.
    pub fn runtime_class(&self) -> Option<&Obj> {
        self.0.class.as_ref()
    }

    pub fn is_class(&self) -> bool {
        matches!(self.0.kind, ObjKind::Class { .. })
    }

    /// Whether the object's exact representation is a subscript wrapper.
    pub fn is_subscript(&self) -> bool {
        matches!(self.0.kind, ObjKind::Subscript { .. })
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.0.attrs.contains_key(name)
    }

    pub fn attr(&self, name: &str) -> Option<&Obj> {
        self.0.attrs.get(name)
    }

    /// Whether this object is an instance of `class` (directly or through
    /// the class's transitive bases). Never errors: a non-class argument or
    /// a classless object simply does not match.
    pub fn is_instance_of(&self, class: &Obj) -> bool {
        match self.runtime_class() {
            Some(own) => own.is_subclass_of(class),
            None => false,
        }
    }

    /// Reflexive, transitive subclass relation. False whenever either side
    /// is not a class.
    pub fn is_subclass_of(&self, other: &Obj) -> bool {
        if !other.is_class() {
            return false;
        }
        match &self.0.kind {
            ObjKind::Class { bases } => {
                self.is(other) || bases.iter().any(|base| base.is_subclass_of(other))
            }
            _ => false,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match &self.0.kind {
            ObjKind::SpecialForm => "special-form",
            ObjKind::Class { .. } => "class",
            ObjKind::Callable => "callable",
            ObjKind::Instance => "instance",
            ObjKind::Subscript { .. } => "subscript",
            ObjKind::Int(_) => "int",
            ObjKind::Str(_) => "str",
            ObjKind::Bool(_) => "bool",
            ObjKind::Nil => "nil",
        }
    }
}

/// Identity equality, matching `Obj::is`. Contents never participate.
impl PartialEq for Obj {
    fn eq(&self, other: &Self) -> bool {
        self.is(other)
    }
}

impl Eq for Obj {}

impl fmt::Debug for Obj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Obj")
            .field("name", &self.0.name)
            .field("kind", &self.type_name())
            .finish()
    }
}

impl fmt::Display for Obj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.kind {
            ObjKind::SpecialForm | ObjKind::Class { .. } | ObjKind::Callable => {
                write!(f, "{}", self.0.name)
            }
            ObjKind::Instance => write!(f, "#<instance {}>", self.0.name),
            ObjKind::Subscript { origin, args } => {
                let rendered: Vec<String> = args.iter().map(|a| a.to_string()).collect();
                write!(f, "{}[{}]", origin, rendered.join(", "))
            }
            ObjKind::Int(i) => write!(f, "{}", i),
            ObjKind::Str(s) => write!(f, "\"{}\"", s),
            ObjKind::Bool(b) => write!(f, "{}", b),
            ObjKind::Nil => write!(f, "nil"),
        }
    }
}

/// Fluent construction of runtime objects.
///
/// The shorthand constructors on [`Obj`] cover the common shapes; the
/// builder is for objects that also need attributes or an explicit class
/// (e.g. factory outputs carrying a link attribute).
pub struct ObjBuilder {
    name: String,
    kind: ObjKind,
    class: Option<Obj>,
    attrs: HashMap<String, Obj>,
}

impl ObjBuilder {
    fn new(name: String, kind: ObjKind) -> Self {
        ObjBuilder {
            name,
            kind,
            class: None,
            attrs: HashMap::new(),
        }
    }

    pub fn special_form(name: &str) -> Self {
        Self::new(name.to_string(), ObjKind::SpecialForm)
    }

    pub fn class(name: &str) -> Self {
        Self::new(name.to_string(), ObjKind::Class { bases: Vec::new() })
    }

    pub fn class_with_bases(name: &str, bases: Vec<Obj>) -> Self {
        Self::new(name.to_string(), ObjKind::Class { bases })
    }

    pub fn callable(name: &str) -> Self {
        Self::new(name.to_string(), ObjKind::Callable)
    }

    pub fn instance(name: &str, class: &Obj) -> Self {
        Self::new(name.to_string(), ObjKind::Instance).with_class(class)
    }

    pub fn subscript(origin: &Obj, args: Vec<Obj>) -> Self {
        let name = format!("{}[...]", origin.name());
        Self::new(
            name,
            ObjKind::Subscript {
                origin: origin.clone(),
                args,
            },
        )
    }

    pub fn with_class(mut self, class: &Obj) -> Self {
        self.class = Some(class.clone());
        self
    }

    pub fn with_attr(mut self, name: &str, value: Obj) -> Self {
        self.attrs.insert(name.to_string(), value);
        self
    }

    pub fn build(self) -> Obj {
        Obj(Arc::new(ObjData {
            name: self.name,
            kind: self.kind,
            class: self.class,
            attrs: self.attrs,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_per_allocation() {
        let a = Obj::special_form("Any");
        let b = Obj::special_form("Any");
        assert!(a.is(&a));
        assert!(!a.is(&b));
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn test_subscript_is_a_distinct_object() {
        let union = Obj::special_form("Union");
        let sub = union.subscript(vec![Obj::class("int"), Obj::class("str")]);
        assert!(!sub.is(&union));
        assert!(sub.is_subscript());
        assert!(!union.is_subscript());
        assert_eq!(sub.to_string(), "Union[int, str]");
    }

    #[test]
    fn test_instance_and_subclass_relations() {
        let base = Obj::class("tuple");
        let derived = Obj::class_with_bases("Point", vec![base.clone()]);
        let deeper = Obj::class_with_bases("Point3", vec![derived.clone()]);
        let point = Obj::instance(&derived, "p");

        assert!(derived.is_subclass_of(&base));
        assert!(deeper.is_subclass_of(&base));
        assert!(base.is_subclass_of(&base));
        assert!(!base.is_subclass_of(&derived));

        assert!(point.is_instance_of(&derived));
        assert!(point.is_instance_of(&base));
        assert!(!point.is_instance_of(&deeper));
        // Non-class right-hand sides never match.
        assert!(!point.is_instance_of(&Obj::int(3)));
        assert!(!Obj::int(3).is_instance_of(&base));
    }

    #[test]
    fn test_attr_probing() {
        let user_id = ObjBuilder::instance("UserId", &Obj::class("object"))
            .with_attr("__supertype__", Obj::class("int"))
            .build();
        assert!(user_id.has_attr("__supertype__"));
        assert!(!user_id.has_attr("_fields"));
        assert_eq!(user_id.attr("__supertype__").unwrap().name(), "int");
    }
}
