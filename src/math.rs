//! The math notation back end: the standard operator registry and
//! symbol translation table wired into the engine.

use lazy_static::lazy_static;

use aquote_meta::math::read_math_db;

use crate::error::RenderError;
use crate::expr::Expr;
use crate::fragment::{Notation, SafeFragment};
use crate::generator;
use crate::interp;
use crate::scope::{Binding, Layer};

lazy_static! {
    static ref LAYERS: Vec<Layer> = standard_layers();
}

fn standard_layers() -> Vec<Layer> {
    let db = read_math_db().unwrap();
    let mut functions = Layer::functions();
    for meta in db.operators.values() {
        functions.bind(
            meta.name.clone(),
            Binding::Renderer(generator::operator(meta.clone())),
        );
    }
    let mut symbols = Layer::symbols();
    for (name, replacement) in &db.symbols {
        symbols.bind(
            name.clone(),
            Binding::Text(SafeFragment::from_trusted(replacement.as_str())),
        );
    }
    vec![functions, symbols]
}

/// Render a captured expression as TeX math notation.
pub fn render(expr: &Expr) -> Result<String, RenderError> {
    render_with(expr, &LAYERS)
}

/// Render against caller-supplied configuration layers instead of the
/// standard registry.
pub fn render_with(expr: &Expr, config: &[Layer]) -> Result<String, RenderError> {
    interp::render_to_string(Notation::Math, config, expr)
}
