//! Lexical scope chain with allocation-region depths.
//!
//! Every binding records the region depth at which it was declared;
//! the escape checker compares those depths at assignment time.

use crate::ast::Type;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Local,
    Param,
}

#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub ty: Type,
    pub kind: SymbolKind,
    /// Region depth at declaration; 0 is the module-level region
    pub region_depth: u32,
}

#[derive(Debug, Default)]
struct Scope {
    symbols: Vec<Symbol>,
    parent: Option<Box<Scope>>,
}

/// The scope chain the analyzer threads through a module.
///
/// Scopes nest per block; the region depth only moves on `private`
/// boundaries, so most scopes share their parent's depth.
#[derive(Debug)]
pub struct SymbolTable {
    current: Scope,
    region_depth: u32,
}

impl SymbolTable {
    pub fn new() -> SymbolTable {
        SymbolTable { current: Scope::default(), region_depth: 0 }
    }

    pub fn push_scope(&mut self) {
        let parent = std::mem::take(&mut self.current);
        self.current.parent = Some(Box::new(parent));
    }

    pub fn pop_scope(&mut self) {
        if let Some(parent) = self.current.parent.take() {
            self.current = *parent;
        }
    }

    pub fn enter_region(&mut self) {
        self.region_depth += 1;
    }

    pub fn exit_region(&mut self) {
        self.region_depth = self.region_depth.saturating_sub(1);
    }

    pub fn region_depth(&self) -> u32 {
        self.region_depth
    }

    /// Bind a name in the innermost scope at the current region depth.
    /// Redefinition shadows: lookup always finds the newest binding.
    pub fn define(&mut self, name: impl Into<String>, ty: Type, kind: SymbolKind) {
        self.current.symbols.push(Symbol {
            name: name.into(),
            ty,
            kind,
            region_depth: self.region_depth,
        });
    }

    /// Innermost-first lookup through the scope chain
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        let mut scope = Some(&self.current);
        while let Some(s) = scope {
            if let Some(sym) = s.symbols.iter().rev().find(|sym| sym.name == name) {
                return Some(sym);
            }
            scope = s.parent.as_deref();
        }
        None
    }

    /// Every name visible from the current scope, innermost first.
    /// Used for did-you-mean candidate collection.
    pub fn visible_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        let mut scope = Some(&self.current);
        while let Some(s) = scope {
            for sym in s.symbols.iter().rev() {
                names.push(sym.name.as_str());
            }
            scope = s.parent.as_deref();
        }
        names
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        SymbolTable::new()
    }
}
