//! Conversion of named arguments into markup attribute syntax.

use kstring::KString;

use crate::fragment::SafeFragment;

/// Serialize named arguments as ` name='value'` pairs, in
/// first-occurrence order. An empty value renders as the bare name
/// (boolean-attribute shorthand). Values are already notation-escaped;
/// what remains here is single-quote/newline safety inside the
/// attribute quoting.
pub fn serialize_attributes(named: &[(KString, SafeFragment)]) -> SafeFragment {
    let mut out = String::new();
    for (name, value) in named {
        out.push(' ');
        out.push_str(name.as_str());
        if value.as_str().is_empty() {
            continue;
        }
        out.push_str("='");
        attribute_escape(&mut out, value.as_str());
        out.push('\'');
    }
    SafeFragment::from_trusted(out)
}

fn attribute_escape(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '\'' => out.push_str("&#39;"),
            '\r' => out.push_str("&#13;"),
            '\n' => out.push_str("&#10;"),
            _ => out.push(c),
        }
    }
}
