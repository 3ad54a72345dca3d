use crate::ast::{ast::NodeId, types::DataType};

use super::diagnostics::TypeCheckFault;

/// Node-to-type map, stored densely by `NodeId`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotations {
    types: Vec<Option<DataType>>,
}

impl Annotations {
    pub fn new(node_count: u32) -> Self {
        Annotations {
            types: vec![None; node_count as usize],
        }
    }

    /// Records the type of `node`, replacing any earlier entry.
    pub fn assign(&mut self, node: NodeId, data_type: DataType) {
        if node.index() >= self.types.len() {
            self.types.resize(node.index() + 1, None);
        }
        self.types[node.index()] = Some(data_type);
    }

    /// Type of a node the pass has already visited.
    pub fn lookup(&self, node: NodeId) -> Result<&DataType, TypeCheckFault> {
        self.get(node).ok_or(TypeCheckFault::UnvisitedNode(node))
    }

    pub fn get(&self, node: NodeId) -> Option<&DataType> {
        self.types.get(node.index())?.as_ref()
    }

    /// Number of annotated nodes.
    pub fn len(&self) -> usize {
        self.types.iter().filter(|entry| entry.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Annotated nodes in id order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &DataType)> {
        self.types
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| entry.as_ref().map(|data_type| (NodeId(index as u32), data_type)))
    }
}
