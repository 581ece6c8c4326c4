//! Shared datatypes for the metadata databases.

use kstring::KString;
use serde::{Deserialize, Serialize};

/// Whether an element may hold child content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Container,
    Leaf,
}

/// Metadata for one markup element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementMeta {
    pub tag_name: KString,
    pub has_closing_tag: bool,
}

impl ElementMeta {
    /// Void elements have no closing tag and hence no child position.
    pub fn kind(&self) -> ElementKind {
        if self.has_closing_tag {
            ElementKind::Container
        } else {
            ElementKind::Leaf
        }
    }
}

impl PartialEq for ElementMeta {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || self.tag_name == other.tag_name
    }
}

impl Eq for ElementMeta {}

/// The argument shape of a math operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpKind {
    /// One slot, wrapped in `pre`..`post`.
    Unary,
    /// Two slots, `pre` a `sep` b `post`.
    Binary,
    /// Any number of slots, joined with `sep`, wrapped in `pre`..`post`.
    Variadic,
}

/// The fixed output template of a math operator. `sep` is unused for
/// `OpKind::Unary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpTemplate {
    pub pre: KString,
    pub sep: KString,
    pub post: KString,
}

/// Metadata for one math operator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatorMeta {
    pub name: KString,
    pub kind: OpKind,
    pub template: OpTemplate,
}
