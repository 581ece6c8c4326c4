//! Safe output fragments, with runtime tracking of what has already
//! been escaped for the target notation.
//!
//! Text enters the pipeline as `Text::Raw`; escaping turns it into a
//! `SafeFragment`. Escaping a fragment that is already safe is the
//! identity, which is what protects nested safe output from being
//! processed twice.

use kstring::KString;

/// Already-escaped text for some target notation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeFragment(KString);

impl SafeFragment {
    /// Wrap text that is known to already be in final notation form:
    /// renderer templates, escape output, registry replacement text.
    pub fn from_trusted<T: AsRef<str>>(s: T) -> Self {
        SafeFragment(KString::from_ref(s.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn into_string(self) -> String {
        String::from(self.0.as_str())
    }

    /// Concatenate safe fragments into one safe fragment. The parts
    /// are joined verbatim, never re-escaped.
    pub fn concat<I>(parts: I) -> SafeFragment
    where
        I: IntoIterator<Item = SafeFragment>,
    {
        let mut s = String::new();
        for part in parts {
            s.push_str(part.as_str());
        }
        SafeFragment(KString::from_string(s))
    }
}

/// Text on its way into the pipeline: either raw (still needing
/// escaping) or already safe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Text {
    Raw(KString),
    Safe(SafeFragment),
}

/// The target notation, which determines the escape rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notation {
    Markup,
    Math,
}

impl Notation {
    /// Escape `Raw` text for this notation; `Safe` input is returned
    /// unchanged.
    pub fn escape(self, text: Text) -> SafeFragment {
        match text {
            Text::Safe(fragment) => fragment,
            Text::Raw(s) => SafeFragment(KString::from_string(self.escape_str(s.as_str()))),
        }
    }

    /// Escape each element of a sequence independently.
    pub fn escape_all<I>(self, texts: I) -> Vec<SafeFragment>
    where
        I: IntoIterator<Item = Text>,
    {
        texts.into_iter().map(|t| self.escape(t)).collect()
    }

    /// Replace every notation-significant character in `raw` with its
    /// escape sequence.
    pub fn escape_str(self, raw: &str) -> String {
        let mut out = String::with_capacity(raw.len());
        match self {
            Notation::Markup => {
                for c in raw.chars() {
                    match c {
                        '&' => out.push_str("&amp;"),
                        '<' => out.push_str("&lt;"),
                        '>' => out.push_str("&gt;"),
                        '"' => out.push_str("&quot;"),
                        '\'' => out.push_str("&#39;"),
                        _ => out.push(c),
                    }
                }
            }
            Notation::Math => {
                for c in raw.chars() {
                    match c {
                        '\\' => out.push_str("\\textbackslash{}"),
                        '$' => out.push_str("\\$"),
                        '%' => out.push_str("\\%"),
                        '&' => out.push_str("\\&"),
                        '#' => out.push_str("\\#"),
                        '_' => out.push_str("\\_"),
                        '{' => out.push_str("\\{"),
                        '}' => out.push_str("\\}"),
                        '~' => out.push_str("\\textasciitilde{}"),
                        '^' => out.push_str("\\textasciicircum{}"),
                        _ => out.push(c),
                    }
                }
            }
        }
        out
    }
}
