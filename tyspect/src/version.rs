// Host runtime version and per-construct version policy

use serde::{Deserialize, Serialize};
use std::fmt;

/// The running host's version tuple. Ordering is lexicographic on
/// (major, minor), matching how the host itself orders releases.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct RuntimeVersion {
    pub major: u16,
    pub minor: u16,
}

impl RuntimeVersion {
    pub const fn new(major: u16, minor: u16) -> Self {
        RuntimeVersion { major, minor }
    }

    pub fn at_least(&self, major: u16, minor: u16) -> bool {
        *self >= RuntimeVersion::new(major, minor)
    }

    pub fn is_exactly(&self, major: u16, minor: u16) -> bool {
        *self == RuntimeVersion::new(major, minor)
    }
}

impl fmt::Display for RuntimeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// A per-construct deviation from the plain identity/instance machinery,
/// selected once at build time from the host version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionRule {
    /// Below `below`, the construct is a plain callable factory. Its outputs
    /// carry `link_attr` and have no recognizable class, so the predicate
    /// becomes an attribute probe on that band.
    FactoryBelow {
        below: RuntimeVersion,
        link_attr: &'static str,
    },
    /// On exactly `major.minor`, parameterized forms of the construct leak
    /// through the instance check and must be excluded by their exact
    /// subscript representation.
    SubscriptQuirkAt { major: u16, minor: u16 },
}

// Keyed by construct name so a future band is a data change, not a code
// change. The 3.10 entries mirror the host's own history: NewType grew a
// class representation in 3.10, and 3.10 is the one release where a
// subscripted alias still answers the alias-class instance check.
const VERSION_RULES: &[(&str, VersionRule)] = &[
    (
        "NewType",
        VersionRule::FactoryBelow {
            below: RuntimeVersion::new(3, 10),
            link_attr: "__supertype__",
        },
    ),
    (
        "TypeAliasType",
        VersionRule::SubscriptQuirkAt {
            major: 3,
            minor: 10,
        },
    ),
];

/// The version rule for a construct, if it has one.
pub fn rule_for(construct: &str) -> Option<VersionRule> {
    VERSION_RULES
        .iter()
        .find(|(name, _)| *name == construct)
        .map(|(_, rule)| *rule)
}
