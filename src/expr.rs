//! The captured expression tree: literals, bare symbols, and calls
//! with positional and named arguments. Capture is structural only,
//! nothing is evaluated until the interpreter walks the tree.

use std::collections::BTreeSet;
use std::fmt;

use kstring::KString;

/// An opaque scalar value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Str(KString),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Literal {
    /// The text form handed to the escaper.
    pub fn to_text(&self) -> KString {
        match self {
            Literal::Str(s) => s.clone(),
            Literal::Int(i) => KString::from_string(i.to_string()),
            Literal::Float(x) => KString::from_string(x.to_string()),
            Literal::Bool(b) => KString::from_static(if *b { "true" } else { "false" }),
        }
    }
}

/// One node of a captured expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Symbol(KString),
    Call(Call),
}

/// A compound form: a plain-identifier head applied to arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    head: KString,
    positional: Vec<Expr>,
    named: Vec<(KString, Expr)>,
}

impl Call {
    pub fn new<S: AsRef<str>>(head: S) -> Self {
        Call {
            head: KString::from_ref(head.as_ref()),
            positional: Vec::new(),
            named: Vec::new(),
        }
    }

    /// Append a positional argument.
    pub fn arg<E: Into<Expr>>(mut self, value: E) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Add a named argument. A repeated name keeps its first position
    /// but takes the new value.
    pub fn named<S: AsRef<str>, E: Into<Expr>>(mut self, name: S, value: E) -> Self {
        let name = name.as_ref();
        let value = value.into();
        if let Some(slot) = self.named.iter_mut().find(|(n, _)| n.as_str() == name) {
            slot.1 = value;
        } else {
            self.named.push((KString::from_ref(name), value));
        }
        self
    }

    pub fn head(&self) -> &str {
        self.head.as_str()
    }

    pub fn positional(&self) -> &[Expr] {
        &self.positional
    }

    pub fn named_args(&self) -> &[(KString, Expr)] {
        &self.named
    }
}

impl Expr {
    pub fn symbol<S: AsRef<str>>(name: S) -> Self {
        Expr::Symbol(KString::from_ref(name.as_ref()))
    }

    /// Collect the distinct symbol names appearing anywhere in the
    /// tree, pre-order. Call heads are not symbols; they resolve
    /// through the function layers instead.
    pub fn collect_symbols(&self, out: &mut BTreeSet<KString>) {
        match self {
            Expr::Literal(_) => {}
            Expr::Symbol(name) => {
                let _ = out.insert(name.clone());
            }
            Expr::Call(call) => {
                for child in call.positional() {
                    child.collect_symbols(out);
                }
                for (_, value) in call.named_args() {
                    value.collect_symbols(out);
                }
            }
        }
    }
}

/// Plain identifiers: what call heads and argument names must be.
pub(crate) fn is_identifier(s: &str) -> bool {
    let mut cs = s.chars();
    match cs.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    cs.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

impl From<Call> for Expr {
    fn from(call: Call) -> Self {
        Expr::Call(call)
    }
}

impl From<Literal> for Expr {
    fn from(lit: Literal) -> Self {
        Expr::Literal(lit)
    }
}

impl From<&str> for Expr {
    fn from(s: &str) -> Self {
        Expr::Literal(Literal::Str(KString::from_ref(s)))
    }
}

impl From<i64> for Expr {
    fn from(i: i64) -> Self {
        Expr::Literal(Literal::Int(i))
    }
}

impl From<f64> for Expr {
    fn from(x: f64) -> Self {
        Expr::Literal(Literal::Float(x))
    }
}

impl From<bool> for Expr {
    fn from(b: bool) -> Self {
        Expr::Literal(Literal::Bool(b))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(Literal::Str(s)) => write!(f, "{:?}", s.as_str()),
            Expr::Literal(Literal::Int(i)) => write!(f, "{i}"),
            Expr::Literal(Literal::Float(x)) => write!(f, "{x}"),
            Expr::Literal(Literal::Bool(b)) => write!(f, "{b}"),
            Expr::Symbol(name) => write!(f, "{name}"),
            Expr::Call(call) => {
                write!(f, "{}(", call.head())?;
                let mut first = true;
                for child in call.positional() {
                    if !first {
                        write!(f, ", ")?;
                    }
                    first = false;
                    write!(f, "{child}")?;
                }
                for (name, value) in call.named_args() {
                    if !first {
                        write!(f, ", ")?;
                    }
                    first = false;
                    write!(f, "{name} = {value}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Capture a host expression, unevaluated, as an [`Expr`].
///
/// A bare identifier becomes a symbol, a literal a literal, and
/// `head(args...)` a call; `name = value` arguments become named
/// arguments.
///
/// ```
/// use aquote::expr;
/// let e = expr!(sin(add(x, pi)));
/// ```
#[macro_export]
macro_rules! expr {
    ($head:ident ( $($args:tt)* )) => {{
        let call = $crate::expr::Call::new(stringify!($head));
        $crate::expr::Expr::from($crate::expr_args!(call; $($args)*))
    }};
    ($name:ident) => {
        $crate::expr::Expr::symbol(stringify!($name))
    };
    ($lit:literal) => {
        $crate::expr::Expr::from($lit)
    };
}

/// Argument muncher for [`expr!`].
#[doc(hidden)]
#[macro_export]
macro_rules! expr_args {
    ($call:expr; ) => { $call };
    // named argument whose value is a call
    ($call:expr; $name:ident = $h:ident ( $($inner:tt)* ) , $($rest:tt)*) => {
        $crate::expr_args!($call.named(stringify!($name), $crate::expr!($h($($inner)*))); $($rest)*)
    };
    ($call:expr; $name:ident = $h:ident ( $($inner:tt)* )) => {
        $call.named(stringify!($name), $crate::expr!($h($($inner)*)))
    };
    // named argument with a symbol or literal value
    ($call:expr; $name:ident = $v:ident , $($rest:tt)*) => {
        $crate::expr_args!($call.named(stringify!($name), $crate::expr!($v)); $($rest)*)
    };
    ($call:expr; $name:ident = $v:ident) => {
        $call.named(stringify!($name), $crate::expr!($v))
    };
    ($call:expr; $name:ident = $v:literal , $($rest:tt)*) => {
        $crate::expr_args!($call.named(stringify!($name), $crate::expr!($v)); $($rest)*)
    };
    ($call:expr; $name:ident = $v:literal) => {
        $call.named(stringify!($name), $crate::expr!($v))
    };
    // positional call
    ($call:expr; $h:ident ( $($inner:tt)* ) , $($rest:tt)*) => {
        $crate::expr_args!($call.arg($crate::expr!($h($($inner)*))); $($rest)*)
    };
    ($call:expr; $h:ident ( $($inner:tt)* )) => {
        $call.arg($crate::expr!($h($($inner)*)))
    };
    // positional symbol or literal
    ($call:expr; $v:ident , $($rest:tt)*) => {
        $crate::expr_args!($call.arg($crate::expr!($v)); $($rest)*)
    };
    ($call:expr; $v:ident) => {
        $call.arg($crate::expr!($v))
    };
    ($call:expr; $v:literal , $($rest:tt)*) => {
        $crate::expr_args!($call.arg($crate::expr!($v)); $($rest)*)
    };
    ($call:expr; $v:literal) => {
        $call.arg($crate::expr!($v))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_macro_capture() {
        let e = expr!(sin(add(x, pi)));
        let sin = match &e {
            Expr::Call(call) => call,
            _ => panic!("expected a call"),
        };
        assert_eq!(sin.head(), "sin");
        assert_eq!(sin.positional().len(), 1);
        let add = match &sin.positional()[0] {
            Expr::Call(call) => call,
            _ => panic!("expected a call"),
        };
        assert_eq!(add.head(), "add");
        assert_eq!(add.positional(), &[Expr::symbol("x"), Expr::symbol("pi")]);
    }

    #[test]
    fn t_macro_named_and_literals() {
        let e = expr!(p("hi", 5, wide = true, id = x));
        let call = match &e {
            Expr::Call(call) => call,
            _ => panic!("expected a call"),
        };
        assert_eq!(call.positional(), &[Expr::from("hi"), Expr::from(5)]);
        assert_eq!(
            call.named_args(),
            &[
                (KString::from_static("wide"), Expr::from(true)),
                (KString::from_static("id"), Expr::symbol("x")),
            ]
        );
    }

    #[test]
    fn t_named_last_write_wins_keeps_order() {
        let call = Call::new("p")
            .named("class", "a")
            .named("id", "b")
            .named("class", "c");
        let names: Vec<&str> = call.named_args().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, &["class", "id"]);
        assert_eq!(call.named_args()[0].1, Expr::from("c"));
    }

    #[test]
    fn t_display() {
        let e = expr!(frac(add(a, 1), b, style = "plain"));
        assert_eq!(e.to_string(), "frac(add(a, 1), b, style = \"plain\")");
    }

    #[test]
    fn t_is_identifier() {
        assert!(is_identifier("sin"));
        assert!(is_identifier("data-id"));
        assert!(is_identifier("_x1"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("1x"));
        assert!(!is_identifier("a b"));
    }
}
