//! Embedding of a code-generation DSL in host expressions: capture an
//! expression tree unevaluated, resolve every identifier and call
//! head through a layered, precedence-ordered lookup, and render the
//! result as a safely-escaped string in the target notation (HTML
//! markup or TeX math).
//!
//! ```
//! use aquote::{expr, html, math};
//!
//! let page = expr!(p("Fish & chips", b("today"), class = "menu"));
//! assert_eq!(html::render(&page).unwrap(),
//!            "<p class='menu'>Fish &amp; chips<b>today</b></p>");
//!
//! let formula = expr!(sin(add(x, pi)));
//! assert_eq!(math::render(&formula).unwrap(), "\\sin(x + \\pi)");
//! ```

pub mod attribute;
pub mod error;
pub mod expr;
pub mod fragment;
pub mod generator;
pub mod html;
pub mod interp;
pub mod math;
pub mod scope;

pub use error::RenderError;
pub use expr::{Call, Expr, Literal};
pub use fragment::{Notation, SafeFragment, Text};
pub use scope::{Binding, Layer, LayerKind, ScopeChain};
