//! The markup tag registry: tag names with their container/void
//! classification, and the known character entity names.

use std::collections::HashMap;

use anyhow::{bail, Context, Result};
use kstring::KString;

use crate::types::ElementMeta;

// https://html.spec.whatwg.org/multipage/indices.html#elements-3
// Elements with a child position and a closing tag.

const CONTAINER_TAG_NAMES: &[&str] = &[
    // Document and metadata
    "html",
    "head",
    "title",
    "style",
    "script",
    "noscript",
    "template",
    "slot",
    // Sections
    "body",
    "article",
    "section",
    "nav",
    "aside",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "hgroup",
    "header",
    "footer",
    "address",
    "main",
    // Grouping content
    "p",
    "pre",
    "blockquote",
    "ol",
    "ul",
    "menu",
    "li",
    "dl",
    "dt",
    "dd",
    "figure",
    "figcaption",
    "div",
    // Text-level semantics
    "a",
    "em",
    "strong",
    "small",
    "s",
    "cite",
    "q",
    "dfn",
    "abbr",
    "ruby",
    "rt",
    "rp",
    "data",
    "time",
    "code",
    "var",
    "samp",
    "kbd",
    "sub",
    "sup",
    "i",
    "b",
    "u",
    "mark",
    "bdi",
    "bdo",
    "span",
    // Edits
    "ins",
    "del",
    // Embedded content with a child position
    "picture",
    "iframe",
    "object",
    "video",
    "audio",
    "map",
    "canvas",
    // Tables
    "table",
    "caption",
    "colgroup",
    "tbody",
    "thead",
    "tfoot",
    "tr",
    "td",
    "th",
    // Forms
    "form",
    "label",
    "button",
    "select",
    "datalist",
    "optgroup",
    "option",
    "textarea",
    "output",
    "progress",
    "meter",
    "fieldset",
    "legend",
    // Interactive elements
    "details",
    "summary",
    "dialog",
];

// https://html.spec.whatwg.org/multipage/syntax.html#void-elements
// No closing tag, structurally cannot contain children.

const VOID_TAG_NAMES: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

// Character entities recognized as bare identifiers. The replacement
// text is already in final markup form.

const ENTITY_NAMES: &[(&str, &str)] = &[
    ("nbsp", "&#160;"),
    ("copy", "&#169;"),
    ("laquo", "&#171;"),
    ("middot", "&#183;"),
    ("raquo", "&#187;"),
    ("times", "&#215;"),
    ("ndash", "&#8211;"),
    ("mdash", "&#8212;"),
    ("hellip", "&#8230;"),
    ("amp", "&amp;"),
    ("lt", "&lt;"),
    ("gt", "&gt;"),
];

/// The indexed markup registry.
#[derive(Debug)]
pub struct TagDb {
    pub elementmeta: HashMap<KString, ElementMeta>,
    pub entities: HashMap<KString, KString>,
}

impl TagDb {
    pub fn get(&self, tag_name: &str) -> Option<&ElementMeta> {
        self.elementmeta.get(tag_name)
    }
}

/// Build the registry from the static tables, verifying that no name
/// appears twice.
pub fn read_tag_db() -> Result<TagDb> {
    (|| -> Result<TagDb> {
        let mut elementmeta = HashMap::new();
        for (names, has_closing_tag) in [(CONTAINER_TAG_NAMES, true), (VOID_TAG_NAMES, false)] {
            for name in names {
                let old = elementmeta.insert(
                    KString::from_static(name),
                    ElementMeta {
                        tag_name: KString::from_static(name),
                        has_closing_tag,
                    },
                );
                if old.is_some() {
                    bail!("duplicate tag name {name:?}");
                }
            }
        }
        let mut entities = HashMap::new();
        for (name, replacement) in ENTITY_NAMES {
            let old = entities.insert(KString::from_static(name), KString::from_static(replacement));
            if old.is_some() {
                bail!("duplicate entity name {name:?}");
            }
        }
        Ok(TagDb {
            elementmeta,
            entities,
        })
    })()
    .context("building the markup tag db")
}
