use crate::{
    ast::{ast::NodeId, types::DataType},
    Position,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Formal,
    Function,
}

#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub data_type: DataType,
    pub kind: SymbolKind,
    /// Where the symbol was declared
    pub position: Position,
}

/// Every symbol of a program, plus the identifier-to-symbol bindings.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    bindings: Vec<Option<SymbolId>>,
}

impl SymbolTable {
    pub fn new(node_count: u32) -> Self {
        SymbolTable {
            symbols: vec![],
            bindings: vec![None; node_count as usize],
        }
    }

    pub fn add_symbol(&mut self, symbol: Symbol) -> SymbolId {
        self.symbols.push(symbol);
        SymbolId(self.symbols.len() as u32 - 1)
    }

    pub fn bind(&mut self, node: NodeId, symbol: SymbolId) {
        if node.index() >= self.bindings.len() {
            self.bindings.resize(node.index() + 1, None);
        }
        self.bindings[node.index()] = Some(symbol);
    }

    pub fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.0 as usize)
    }

    /// The symbol an identifier node is bound to, if any.
    pub fn symbol_of(&self, node: NodeId) -> Option<&Symbol> {
        let id = (*self.bindings.get(node.index())?)?;
        self.symbol(id)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Symbol> {
        self.symbols.iter()
    }
}
