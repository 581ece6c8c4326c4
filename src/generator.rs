//! Renderer factories: reusable node-rendering closures bound to
//! their construction parameters (tag metadata, operator template)
//! and stored in the registry layers by name.

use std::sync::Arc;

use itertools::Itertools;
use kstring::KString;

use aquote_meta::types::{ElementMeta, OpKind, OperatorMeta};

use crate::attribute::serialize_attributes;
use crate::error::RenderError;
use crate::fragment::SafeFragment;

/// Arguments to a renderer: the already-rendered child fragments and
/// the rendered named-argument values, both in source order.
#[derive(Debug)]
pub struct RenderedArgs {
    pub positional: Vec<SafeFragment>,
    pub named: Vec<(KString, SafeFragment)>,
}

/// A pure node renderer. Same inputs, same output fragment.
pub type Renderer =
    dyn Fn(&RenderedArgs) -> Result<SafeFragment, RenderError> + Send + Sync;

/// Renderer for an element with a child position:
/// `<tag attrs>children</tag>`.
pub fn container(meta: ElementMeta) -> Arc<Renderer> {
    Arc::new(move |args: &RenderedArgs| {
        let mut out = String::new();
        out.push('<');
        out.push_str(meta.tag_name.as_str());
        out.push_str(serialize_attributes(&args.named).as_str());
        out.push('>');
        for child in &args.positional {
            out.push_str(child.as_str());
        }
        out.push_str("</");
        out.push_str(meta.tag_name.as_str());
        out.push('>');
        Ok(SafeFragment::from_trusted(out))
    })
}

/// Renderer for a void element: `<tag attrs>`, no child position.
pub fn leaf(meta: ElementMeta) -> Arc<Renderer> {
    Arc::new(move |args: &RenderedArgs| {
        if !args.positional.is_empty() {
            return Err(RenderError::StructuralError {
                name: meta.tag_name.clone(),
                detail: KString::from_static("cannot have children"),
            });
        }
        let mut out = String::new();
        out.push('<');
        out.push_str(meta.tag_name.as_str());
        out.push_str(serialize_attributes(&args.named).as_str());
        out.push('>');
        Ok(SafeFragment::from_trusted(out))
    })
}

/// Renderer for a math operator with a fixed template. Named-argument
/// values fill slots positionally, after the positional arguments;
/// the notation has no attribute position.
pub fn operator(meta: OperatorMeta) -> Arc<Renderer> {
    Arc::new(move |args: &RenderedArgs| {
        let mut slots: Vec<&str> = args.positional.iter().map(|f| f.as_str()).collect();
        slots.extend(args.named.iter().map(|(_, v)| v.as_str()));
        let tpl = &meta.template;
        let out = match meta.kind {
            OpKind::Unary => {
                let [slot] = require_arity::<1>(&meta.name, &slots)?;
                format!("{}{}{}", tpl.pre, slot, tpl.post)
            }
            OpKind::Binary => {
                let [a, b] = require_arity::<2>(&meta.name, &slots)?;
                format!("{}{}{}{}{}", tpl.pre, a, tpl.sep, b, tpl.post)
            }
            OpKind::Variadic => {
                format!("{}{}{}", tpl.pre, slots.iter().join(tpl.sep.as_str()), tpl.post)
            }
        };
        Ok(SafeFragment::from_trusted(out))
    })
}

fn require_arity<'s, const N: usize>(
    name: &KString,
    slots: &[&'s str],
) -> Result<[&'s str; N], RenderError> {
    if slots.len() != N {
        return Err(RenderError::StructuralError {
            name: name.clone(),
            detail: KString::from_string(format!(
                "takes {N} argument(s), got {}",
                slots.len()
            )),
        });
    }
    Ok(std::array::from_fn(|i| slots[i]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use aquote_meta::types::OpTemplate;

    fn meta(tag_name: &'static str, has_closing_tag: bool) -> ElementMeta {
        ElementMeta {
            tag_name: KString::from_static(tag_name),
            has_closing_tag,
        }
    }

    fn frag(s: &str) -> SafeFragment {
        SafeFragment::from_trusted(s)
    }

    #[test]
    fn t_container() -> anyhow::Result<()> {
        let p = container(meta("p", true));
        let out = p.as_ref()(&RenderedArgs {
            positional: vec![frag("one"), frag("<b>two</b>")],
            named: vec![(KString::from_static("class"), frag("x"))],
        })?;
        assert_eq!(out.as_str(), "<p class='x'>one<b>two</b></p>");
        Ok(())
    }

    #[test]
    fn t_leaf_rejects_children() {
        let br = leaf(meta("br", false));
        let err = br.as_ref()(&RenderedArgs {
            positional: vec![frag("nope")],
            named: vec![],
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "br cannot have children");

        let ok = br.as_ref()(&RenderedArgs {
            positional: vec![],
            named: vec![(KString::from_static("class"), frag("x"))],
        })
        .unwrap();
        assert_eq!(ok.as_str(), "<br class='x'>");
    }

    fn op(name: &'static str, kind: OpKind, pre: &'static str, sep: &'static str, post: &'static str) -> OperatorMeta {
        OperatorMeta {
            name: KString::from_static(name),
            kind,
            template: OpTemplate {
                pre: KString::from_static(pre),
                sep: KString::from_static(sep),
                post: KString::from_static(post),
            },
        }
    }

    #[test]
    fn t_operator_templates() -> anyhow::Result<()> {
        let sin = operator(op("sin", OpKind::Unary, "\\sin(", "", ")"));
        let out = sin.as_ref()(&RenderedArgs { positional: vec![frag("x")], named: vec![] })?;
        assert_eq!(out.as_str(), "\\sin(x)");

        let frac = operator(op("frac", OpKind::Binary, "\\frac{", "}{", "}"));
        let out = frac.as_ref()(&RenderedArgs {
            positional: vec![frag("1"), frag("2")],
            named: vec![],
        })?;
        assert_eq!(out.as_str(), "\\frac{1}{2}");

        let set = operator(op("set", OpKind::Variadic, "\\{", ", ", "\\}"));
        let out = set.as_ref()(&RenderedArgs {
            positional: vec![frag("a"), frag("b"), frag("c")],
            named: vec![],
        })?;
        assert_eq!(out.as_str(), "\\{a, b, c\\}");
        Ok(())
    }

    #[test]
    fn t_operator_arity() {
        let add = operator(op("add", OpKind::Binary, "", " + ", ""));
        let err = add.as_ref()(&RenderedArgs { positional: vec![frag("x")], named: vec![] }).unwrap_err();
        assert_eq!(err.to_string(), "add takes 2 argument(s), got 1");
    }

    #[test]
    fn t_operator_named_fill_slots_positionally() -> anyhow::Result<()> {
        let frac = operator(op("frac", OpKind::Binary, "\\frac{", "}{", "}"));
        let out = frac.as_ref()(&RenderedArgs {
            positional: vec![frag("1")],
            named: vec![(KString::from_static("den"), frag("n"))],
        })?;
        assert_eq!(out.as_str(), "\\frac{1}{n}");
        Ok(())
    }
}
