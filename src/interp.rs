//! Recursive structural evaluation of a captured expression against a
//! scope chain.

use kstring::KString;
use log::debug;

use crate::error::RenderError;
use crate::expr::{is_identifier, Call, Expr};
use crate::fragment::{Notation, SafeFragment, Text};
use crate::generator::RenderedArgs;
use crate::scope::{Binding, Layer, ScopeChain};

/// Trees are acyclic by construction; this bounds programmatically
/// built pathological input.
pub const MAX_DEPTH: usize = 500;

/// Evaluate the tree against the chain, producing one safe fragment.
pub fn render(expr: &Expr, chain: &ScopeChain<'_>) -> Result<SafeFragment, RenderError> {
    debug!("render {expr}");
    validate(expr, 0)?;
    render_at(expr, chain, 0)
}

/// Build the chain for `expr` over `config`, render, and reduce to
/// the final output string. The single entry point both back ends
/// wrap.
pub fn render_to_string(
    notation: Notation,
    config: &[Layer],
    expr: &Expr,
) -> Result<String, RenderError> {
    let chain = ScopeChain::for_expr(notation, config, expr);
    Ok(render(expr, &chain)?.into_string())
}

/// Check the structural invariants the renderers rely on: plain
/// identifiers for call heads and named-argument names, bounded
/// nesting.
fn validate(expr: &Expr, depth: usize) -> Result<(), RenderError> {
    if depth > MAX_DEPTH {
        return Err(RenderError::TooDeep { limit: MAX_DEPTH });
    }
    match expr {
        Expr::Literal(_) | Expr::Symbol(_) => Ok(()),
        Expr::Call(call) => {
            if !is_identifier(call.head()) {
                return Err(RenderError::MalformedExpression {
                    name: KString::from_ref(call.head()),
                    detail: KString::from_static("call head is not a plain identifier"),
                });
            }
            for (name, _) in call.named_args() {
                if !is_identifier(name.as_str()) {
                    return Err(RenderError::MalformedExpression {
                        name: name.clone(),
                        detail: KString::from_static(
                            "named-argument name is not a plain identifier",
                        ),
                    });
                }
            }
            for child in call.positional() {
                validate(child, depth + 1)?;
            }
            for (_, value) in call.named_args() {
                validate(value, depth + 1)?;
            }
            Ok(())
        }
    }
}

fn render_at(
    expr: &Expr,
    chain: &ScopeChain<'_>,
    depth: usize,
) -> Result<SafeFragment, RenderError> {
    if depth > MAX_DEPTH {
        return Err(RenderError::TooDeep { limit: MAX_DEPTH });
    }
    match expr {
        Expr::Literal(lit) => Ok(chain.notation().escape(Text::Raw(lit.to_text()))),
        Expr::Symbol(name) => match chain.resolve_symbol(name.as_str()) {
            Some(Binding::Text(fragment)) => Ok(fragment.clone()),
            Some(Binding::Renderer(_)) => {
                unreachable!("symbol layers hold only text bindings")
            }
            None => panic!(
                "ambient layer should cover every symbol in the expression: {:?}",
                name.as_str()
            ),
        },
        Expr::Call(call) => match chain.resolve_head(call.head()) {
            Some(Binding::Renderer(renderer)) => {
                let args = eval_args(call, chain, depth)?;
                renderer.as_ref()(&args)
            }
            Some(Binding::Text(_)) => {
                unreachable!("functions layers hold only renderer bindings")
            }
            None => {
                let args = eval_args(call, chain, depth)?;
                render_fallback(chain, call.head(), &args)
            }
        },
    }
}

/// Evaluate a call's children left to right, positional before named,
/// in source order.
fn eval_args(
    call: &Call,
    chain: &ScopeChain<'_>,
    depth: usize,
) -> Result<RenderedArgs, RenderError> {
    let mut positional = Vec::with_capacity(call.positional().len());
    for child in call.positional() {
        positional.push(render_at(child, chain, depth + 1)?);
    }
    let mut named = Vec::with_capacity(call.named_args().len());
    for (name, value) in call.named_args() {
        if chain.notation() == Notation::Markup {
            if let Expr::Call(_) = value {
                // attribute values must be single text values
                return Err(RenderError::InvalidAttributeValue {
                    name: name.clone(),
                    detail: KString::from_static("nested markup cannot be an attribute value"),
                });
            }
        }
        named.push((name.clone(), render_at(value, chain, depth + 1)?));
    }
    Ok(RenderedArgs { positional, named })
}

/// The open-world default for call heads absent from the registry:
/// children joined with a fixed separator, wrapped in the notation's
/// unknown-name template.
fn render_fallback(
    chain: &ScopeChain<'_>,
    head: &str,
    args: &RenderedArgs,
) -> Result<SafeFragment, RenderError> {
    use itertools::Itertools;
    let joined = args.positional.iter().map(|f| f.as_str()).join(", ");
    match chain.notation() {
        Notation::Math => Ok(SafeFragment::from_trusted(format!(
            "\\mathrm{{{head}}}({joined})"
        ))),
        Notation::Markup => {
            let atts = crate::attribute::serialize_attributes(&args.named);
            Ok(SafeFragment::from_trusted(format!(
                "<{head}{}>{joined}</{head}>",
                atts.as_str()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr;
    use crate::expr::Call;

    #[test]
    fn t_malformed_head() {
        let e = Expr::from(Call::new("not a name").arg("x"));
        let err = render_to_string(Notation::Math, &[], &e).unwrap_err();
        assert!(matches!(err, RenderError::MalformedExpression { .. }));
        assert_eq!(
            err.to_string(),
            "malformed expression at \"not a name\": call head is not a plain identifier"
        );
    }

    #[test]
    fn t_malformed_named_argument_name() {
        let e = Expr::from(Call::new("p").named("1bad", "x"));
        let err = render_to_string(Notation::Markup, &[], &e).unwrap_err();
        assert!(matches!(err, RenderError::MalformedExpression { .. }));
    }

    #[test]
    fn t_fallback_math() -> anyhow::Result<()> {
        let e = expr!(g(a, b));
        assert_eq!(render_to_string(Notation::Math, &[], &e)?, "\\mathrm{g}(a, b)");
        Ok(())
    }

    #[test]
    fn t_fallback_markup() -> anyhow::Result<()> {
        let e = expr!(widget(a, b, class = "w"));
        assert_eq!(
            render_to_string(Notation::Markup, &[], &e)?,
            "<widget class='w'>a, b</widget>"
        );
        Ok(())
    }

    #[test]
    fn t_literal_escaping_at_leaves() -> anyhow::Result<()> {
        let e = expr!(g("a & b"));
        assert_eq!(
            render_to_string(Notation::Markup, &[], &e)?,
            "<g>a &amp; b</g>"
        );
        Ok(())
    }

    #[test]
    fn t_attribute_value_must_be_single() {
        let e = expr!(p(class = b("x")));
        let err = render_to_string(Notation::Markup, &[], &e).unwrap_err();
        assert!(matches!(err, RenderError::InvalidAttributeValue { .. }));
    }

    #[test]
    fn t_too_deep() {
        let mut e = Expr::symbol("x");
        for _ in 0..(MAX_DEPTH + 2) {
            e = Expr::from(Call::new("f").arg(e));
        }
        let err = render_to_string(Notation::Math, &[], &e).unwrap_err();
        assert!(matches!(err, RenderError::TooDeep { .. }));
    }
}
