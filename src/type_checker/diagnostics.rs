use thiserror::Error as ThisError;
use tracing::trace;

use crate::{
    ast::ast::NodeId,
    errors::errors::{Error, ErrorImpl},
    Position,
};

/// Faults in the pass itself. User programs never cause these; they stop
/// the pass instead of being reported as diagnostics.
#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum TypeCheckFault {
    #[error("node {0} was read before it was annotated")]
    UnvisitedNode(NodeId),
    #[error("identifier {name:?} has no resolved symbol")]
    UnboundIdentifier { name: String },
}

/// Ordered sink for type diagnostics.
#[derive(Debug, Default)]
pub struct Diagnostics {
    errors: Vec<Error>,
    failed: bool,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics {
            errors: vec![],
            failed: false,
        }
    }

    /// Appends a diagnostic and marks the pass as failed.
    pub fn record(&mut self, kind: ErrorImpl, position: Position) {
        trace!(error = %kind, position = position.0, "type diagnostic");
        self.errors.push(Error::new(kind, position));
        self.failed = true;
    }

    pub fn failed(&self) -> bool {
        self.failed
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Error> {
        self.errors.iter()
    }

    pub fn into_errors(self) -> Vec<Error> {
        self.errors
    }
}
