//! The layered name lookup built for each render call: configuration
//! layers (operators/tags, known symbols) on top, the per-expression
//! ambient identity layer at the bottom.

use std::{collections::{BTreeSet, HashMap},
          iter::once,
          sync::Arc};

use kstring::KString;
use log::trace;

use crate::expr::Expr;
use crate::fragment::{Notation, SafeFragment};
use crate::generator::Renderer;

/// What a name resolves to.
#[derive(Clone)]
pub enum Binding {
    /// A callable generator: a tag renderer or an operator.
    Renderer(Arc<Renderer>),
    /// Fixed replacement text, already safe for the notation.
    Text(SafeFragment),
}

impl std::fmt::Debug for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Binding::Renderer(_) => write!(f, "Binding::Renderer(..)"),
            Binding::Text(t) => write!(f, "Binding::Text({:?})", t.as_str()),
        }
    }
}

/// Which syntactic position a layer serves. Call heads resolve only
/// against `Functions` layers, bare symbols only against `Symbols`
/// layers; the same name can carry both meanings at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Functions,
    Symbols,
}

/// One lookup layer: a mapping from name to binding.
#[derive(Debug)]
pub struct Layer {
    kind: LayerKind,
    bindings: HashMap<KString, Binding>,
}

impl Layer {
    pub fn functions() -> Self {
        Layer {
            kind: LayerKind::Functions,
            bindings: HashMap::new(),
        }
    }

    pub fn symbols() -> Self {
        Layer {
            kind: LayerKind::Symbols,
            bindings: HashMap::new(),
        }
    }

    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    /// Insert a binding; a later binding for the same name replaces
    /// the earlier one. A layer holds one meaning only: renderers in
    /// `Functions` layers, text in `Symbols` layers.
    pub fn bind(&mut self, name: KString, binding: Binding) {
        match (self.kind, &binding) {
            (LayerKind::Functions, Binding::Text(_)) => {
                panic!("functions layer {:?} given a text binding", name.as_str())
            }
            (LayerKind::Symbols, Binding::Renderer(_)) => {
                panic!("symbols layer {:?} given a renderer binding", name.as_str())
            }
            _ => {}
        }
        let _ = self.bindings.insert(name, binding);
    }

    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }
}

/// The per-render lookup chain. The configuration layers are shared,
/// process-wide and immutable; the ambient layer is derived from the
/// expression being rendered and sits below all of them.
pub struct ScopeChain<'a> {
    notation: Notation,
    config: &'a [Layer],
    ambient: Layer,
}

impl<'a> ScopeChain<'a> {
    /// Build the chain for one expression: collect every distinct
    /// symbol in the tree into the ambient layer, each mapping to its
    /// own (escaped) name.
    pub fn for_expr(notation: Notation, config: &'a [Layer], expr: &Expr) -> Self {
        let mut names = BTreeSet::new();
        expr.collect_symbols(&mut names);
        let mut ambient = Layer::symbols();
        for name in names {
            let text = SafeFragment::from_trusted(notation.escape_str(name.as_str()));
            ambient.bind(name, Binding::Text(text));
        }
        ScopeChain {
            notation,
            config,
            ambient,
        }
    }

    pub fn notation(&self) -> Notation {
        self.notation
    }

    /// Resolve a name in call-head position: functions layers only,
    /// top to bottom.
    pub fn resolve_head(&self, name: &str) -> Option<&Binding> {
        let found = self
            .config
            .iter()
            .filter(|layer| layer.kind() == LayerKind::Functions)
            .find_map(|layer| layer.get(name));
        trace!("resolve_head {name:?}: {}", if found.is_some() { "hit" } else { "miss" });
        found
    }

    /// Resolve a name in symbol position: symbols layers top to
    /// bottom, the ambient layer last.
    pub fn resolve_symbol(&self, name: &str) -> Option<&Binding> {
        let found = self
            .config
            .iter()
            .chain(once(&self.ambient))
            .filter(|layer| layer.kind() == LayerKind::Symbols)
            .find_map(|layer| layer.get(name));
        trace!("resolve_symbol {name:?}: {}", if found.is_some() { "hit" } else { "miss" });
        found
    }
}
