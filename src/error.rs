//! The closed error taxonomy surfaced by `render`. Every error aborts
//! the whole render call; no partial output is returned.

use kstring::KString;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The captured tree violates a structural invariant: a call head
    /// or named-argument name that is not a plain identifier.
    #[error("malformed expression at {name:?}: {detail}")]
    MalformedExpression { name: KString, detail: KString },

    /// A renderer was invoked with arguments its shape cannot accept:
    /// positional children on a void element, or a template arity
    /// mismatch.
    #[error("{name} {detail}")]
    StructuralError { name: KString, detail: KString },

    /// A named-argument value cannot be used as a single attribute
    /// value.
    #[error("invalid attribute value for {name:?}: {detail}")]
    InvalidAttributeValue { name: KString, detail: KString },

    /// Expression nesting exceeded the defensive limit.
    #[error("expression nesting deeper than {limit} levels")]
    TooDeep { limit: usize },
}
