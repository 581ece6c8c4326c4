//! The math notation registry: operator templates and the fixed
//! symbol translation table (Greek letters and friends).

use std::collections::HashMap;

use anyhow::{bail, Context, Result};
use kstring::KString;

use crate::types::{OpKind, OperatorMeta, OpTemplate};

// (name, kind, pre, sep, post); sep is "" for unary operators.

const OPERATORS: &[(&str, OpKind, &str, &str, &str)] = &[
    // Unary wraps
    ("sin", OpKind::Unary, "\\sin(", "", ")"),
    ("cos", OpKind::Unary, "\\cos(", "", ")"),
    ("tan", OpKind::Unary, "\\tan(", "", ")"),
    ("log", OpKind::Unary, "\\log(", "", ")"),
    ("ln", OpKind::Unary, "\\ln(", "", ")"),
    ("exp", OpKind::Unary, "\\exp(", "", ")"),
    ("sqrt", OpKind::Unary, "\\sqrt{", "", "}"),
    ("abs", OpKind::Unary, "\\left|", "", "\\right|"),
    ("paren", OpKind::Unary, "\\left(", "", "\\right)"),
    ("neg", OpKind::Unary, "-", "", ""),
    ("hat", OpKind::Unary, "\\hat{", "", "}"),
    ("bar", OpKind::Unary, "\\bar{", "", "}"),
    ("vec", OpKind::Unary, "\\vec{", "", "}"),
    // Binary joins and two-slot templates
    ("add", OpKind::Binary, "", " + ", ""),
    ("sub", OpKind::Binary, "", " - ", ""),
    ("mul", OpKind::Binary, "", " \\cdot ", ""),
    ("div", OpKind::Binary, "", " / ", ""),
    ("pow", OpKind::Binary, "", "^{", "}"),
    ("eq", OpKind::Binary, "", " = ", ""),
    ("neq", OpKind::Binary, "", " \\ne ", ""),
    ("lt", OpKind::Binary, "", " < ", ""),
    ("leq", OpKind::Binary, "", " \\le ", ""),
    ("gt", OpKind::Binary, "", " > ", ""),
    ("geq", OpKind::Binary, "", " \\ge ", ""),
    ("frac", OpKind::Binary, "\\frac{", "}{", "}"),
    ("binom", OpKind::Binary, "\\binom{", "}{", "}"),
    // Variadic joins
    ("list", OpKind::Variadic, "", ", ", ""),
    ("set", OpKind::Variadic, "\\{", ", ", "\\}"),
];

// Letters whose TeX command is a backslash followed by the name
// itself. omicron has no TeX command and is left to the identity
// fallback.

const GREEK_LETTER_NAMES: &[&str] = &[
    "alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta", "iota", "kappa",
    "lambda", "mu", "nu", "xi", "pi", "rho", "sigma", "tau", "upsilon", "phi", "chi", "psi",
    "omega", "Gamma", "Delta", "Theta", "Lambda", "Xi", "Pi", "Sigma", "Upsilon", "Phi", "Psi",
    "Omega", "varepsilon", "vartheta", "varpi", "varrho", "varsigma", "varphi",
];

// Symbols whose TeX command differs from the identifier.

const KNOWN_SYMBOLS: &[(&str, &str)] = &[
    ("infinity", "\\infty"),
    ("dots", "\\dots"),
    ("ell", "\\ell"),
    ("aleph", "\\aleph"),
    ("partial", "\\partial"),
    ("nabla", "\\nabla"),
    ("emptyset", "\\emptyset"),
    ("pm", "\\pm"),
    ("to", "\\to"),
];

/// The indexed math registry.
#[derive(Debug)]
pub struct MathDb {
    pub operators: HashMap<KString, OperatorMeta>,
    pub symbols: HashMap<KString, KString>,
}

impl MathDb {
    pub fn get_operator(&self, name: &str) -> Option<&OperatorMeta> {
        self.operators.get(name)
    }
}

/// Build the registry from the static tables, verifying that no name
/// appears twice.
pub fn read_math_db() -> Result<MathDb> {
    (|| -> Result<MathDb> {
        let mut operators = HashMap::new();
        for (name, kind, pre, sep, post) in OPERATORS {
            let old = operators.insert(
                KString::from_static(name),
                OperatorMeta {
                    name: KString::from_static(name),
                    kind: *kind,
                    template: OpTemplate {
                        pre: KString::from_static(pre),
                        sep: KString::from_static(sep),
                        post: KString::from_static(post),
                    },
                },
            );
            if old.is_some() {
                bail!("duplicate operator name {name:?}");
            }
        }
        let mut symbols = HashMap::new();
        for name in GREEK_LETTER_NAMES {
            let old = symbols.insert(
                KString::from_static(name),
                KString::from_string(format!("\\{name}")),
            );
            if old.is_some() {
                bail!("duplicate symbol name {name:?}");
            }
        }
        for (name, replacement) in KNOWN_SYMBOLS {
            let old = symbols.insert(KString::from_static(name), KString::from_static(replacement));
            if old.is_some() {
                bail!("duplicate symbol name {name:?}");
            }
        }
        Ok(MathDb { operators, symbols })
    })()
    .context("building the math db")
}
