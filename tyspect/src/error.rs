// Error handling for table construction

use thiserror::Error;

pub type BuildResult<T> = Result<T, BuildError>;

/// Failures while building the predicate table or alias registry.
///
/// These are programming-time inconsistencies between the catalog and what a
/// namespace actually provides, surfaced loudly during the one-time build.
/// Classification calls themselves never fail: an unsupported construct is a
/// degraded always-false predicate, not an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("construct `{construct}` from the {provider} is not an instantiable class (found {found})")]
    NotInstantiable {
        construct: String,
        provider: String,
        found: &'static str,
    },
    #[error("canonical type `{name}` is missing from the canonical namespace")]
    MissingCanonical { name: String },
    #[error("canonical entry `{name}` is not a concrete runtime type (found {found})")]
    CanonicalNotType { name: String, found: &'static str },
    #[error("canonical namespace does not define the builtin tuple type")]
    MissingTupleType,
    #[error("canonical namespace does not define the none type")]
    MissingNoneType,
}
