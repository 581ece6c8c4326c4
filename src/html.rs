//! The markup back end: the standard HTML tag registry and entity
//! table wired into the engine.

use lazy_static::lazy_static;

use aquote_meta::html::read_tag_db;
use aquote_meta::types::ElementKind;

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
    let db = read_tag_db().unwrap();
    let mut functions = Layer::functions();
    for meta in db.elementmeta.values() {
        let renderer = match meta.kind() {
            ElementKind::Container => generator::container(meta.clone()),
            ElementKind::Leaf => generator::leaf(meta.clone()),
        };
        functions.bind(meta.tag_name.clone(), Binding::Renderer(renderer));
    }
    let mut symbols = Layer::symbols();
    for (name, replacement) in &db.entities {
        symbols.bind(
            name.clone(),
            Binding::Text(SafeFragment::from_trusted(replacement.as_str())),
        );
    }
    vec![functions, symbols]
}

/// Render a captured expression as an HTML fragment.
pub fn render(expr: &Expr) -> Result<String, RenderError> {
    render_with(expr, &LAYERS)
}

/// Render against caller-supplied configuration layers instead of the
/// standard registry.
pub fn render_with(expr: &Expr, config: &[Layer]) -> Result<String, RenderError> {
    interp::render_to_string(Notation::Markup, config, expr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr;
    use aquote_meta::types::ElementMeta;
    use kstring::KString;

    #[test]
    fn t_element_with_attributes_and_children() -> anyhow::Result<()> {
        let e = expr!(p("hi ", b("there"), class = "x"));
        assert_eq!(render(&e)?, "<p class='x'>hi <b>there</b></p>");
        Ok(())
    }

    #[test]
    fn t_text_is_escaped_once() -> anyhow::Result<()> {
        let e = expr!(p("a < b & 'c'"));
        assert_eq!(render(&e)?, "<p>a &lt; b &amp; &#39;c&#39;</p>");
        Ok(())
    }

    #[test]
    fn t_void_element() -> anyhow::Result<()> {
        let e = expr!(img(src = "x.png", alt = "an x"));
        assert_eq!(render(&e)?, "<img src='x.png' alt='an x'>");
        Ok(())
    }

    #[test]
    fn t_void_element_rejects_children() {
        let e = expr!(br("nope"));
        let err = render(&e).unwrap_err();
        assert_eq!(err.to_string(), "br cannot have children");
    }

    #[test]
    fn t_void_element_with_named_arguments_only() -> anyhow::Result<()> {
        let e = expr!(br(class = "sep"));
        assert_eq!(render(&e)?, "<br class='sep'>");
        Ok(())
    }

    #[test]
    fn t_entity_symbols() -> anyhow::Result<()> {
        let e = expr!(p(nbsp, "x"));
        assert_eq!(render(&e)?, "<p>&#160;x</p>");
        Ok(())
    }

    #[test]
    fn t_attribute_order_is_source_order() -> anyhow::Result<()> {
        let e = expr!(div(class = "a", id = "b"));
        assert_eq!(render(&e)?, "<div class='a' id='b'></div>");
        Ok(())
    }

    #[test]
    fn t_boolean_attribute() -> anyhow::Result<()> {
        let e = expr!(input(disabled = true, value = ""));
        assert_eq!(render(&e)?, "<input disabled='true' value>");
        Ok(())
    }

    #[test]
    fn t_unknown_tag_fallback() -> anyhow::Result<()> {
        let e = expr!(widget("a", "b"));
        assert_eq!(render(&e)?, "<widget>a, b</widget>");
        Ok(())
    }

    // The registry name and the emitted tag are decoupled; a custom
    // registry can bind any name to any tag.
    #[test]
    fn t_custom_registry_end_to_end() -> anyhow::Result<()> {
        let mut functions = Layer::functions();
        functions.bind(
            KString::from_static("paragraph"),
            Binding::Renderer(generator::container(ElementMeta {
                tag_name: KString::from_static("p"),
                has_closing_tag: true,
            })),
        );
        functions.bind(
            KString::from_static("bold"),
            Binding::Renderer(generator::container(ElementMeta {
                tag_name: KString::from_static("b"),
                has_closing_tag: true,
            })),
        );
        let config = vec![functions];
        let e = expr!(paragraph("Some text &", bold("inner")));
        assert_eq!(
            render_with(&e, &config)?,
            "<p>Some text &amp;<b>inner</b></p>"
        );
        Ok(())
    }
}
