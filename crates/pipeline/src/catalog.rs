//! The step data store.
//!
//! A [`StepCatalog`] is loaded once from a step document and never changes
//! afterwards. It keeps the document tree as given and an index from every
//! [`StepId`] to the step's position in that tree.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{CatalogError, Step, StepId};

/// The wire shape of a step document: `{ "steps": [Step, ...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepDocument {
    /// Root steps, in chain order.
    pub steps: Vec<Step>,
}

/// Where a step sits in the tree.
#[derive(Debug, Clone)]
struct StepEntry {
    /// Child indices from the root list down to the step.
    path: Vec<usize>,
    parent: Option<StepId>,
}

/// Immutable, validated collection of steps.
#[derive(Debug, Clone, Default)]
pub struct StepCatalog {
    document: StepDocument,
    index: HashMap<StepId, StepEntry>,
}

impl StepCatalog {
    /// Parses and validates a step document.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let document: StepDocument = serde_json::from_str(json)?;
        Self::from_document(document)
    }

    /// Validates an already-deserialised document.
    ///
    /// Fails if any two steps in the tree share an id.
    pub fn from_document(document: StepDocument) -> Result<Self, CatalogError> {
        let mut index = HashMap::new();
        let mut path = Vec::new();
        index_level(&document.steps, None, &mut path, &mut index)?;

        tracing::debug!(
            roots = document.steps.len(),
            steps = index.len(),
            "Step catalog loaded"
        );

        Ok(Self { document, index })
    }

    /// Builds a catalog from root steps.
    pub fn from_steps(steps: Vec<Step>) -> Result<Self, CatalogError> {
        Self::from_document(StepDocument { steps })
    }

    /// Returns the document the catalog was loaded from.
    pub fn document(&self) -> &StepDocument {
        &self.document
    }

    /// Returns the root steps in chain order.
    pub fn roots(&self) -> &[Step] {
        &self.document.steps
    }

    /// Looks up any step in the tree.
    pub fn get(&self, id: StepId) -> Option<&Step> {
        let entry = self.index.get(&id)?;
        let (first, rest) = entry.path.split_first()?;
        let mut step = self.document.steps.get(*first)?;
        for &i in rest {
            step = step.children().get(i)?;
        }
        Some(step)
    }

    /// Returns the parent of a step, `None` for roots and unknown ids.
    pub fn parent(&self, id: StepId) -> Option<StepId> {
        self.index.get(&id).and_then(|e| e.parent)
    }

    /// Returns `true` if `ancestor` is a strict ancestor of `id`.
    pub fn is_descendant_of(&self, id: StepId, ancestor: StepId) -> bool {
        let mut current = self.parent(id);
        while let Some(p) = current {
            if p == ancestor {
                return true;
            }
            current = self.parent(p);
        }
        false
    }

    /// Total number of steps in the tree.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if the document has no steps.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

fn index_level(
    steps: &[Step],
    parent: Option<StepId>,
    path: &mut Vec<usize>,
    index: &mut HashMap<StepId, StepEntry>,
) -> Result<(), CatalogError> {
    for (i, step) in steps.iter().enumerate() {
        path.push(i);
        let entry = StepEntry {
            path: path.clone(),
            parent,
        };
        if index.insert(step.id, entry).is_some() {
            return Err(CatalogError::DuplicateStepId { id: step.id });
        }
        index_level(step.children(), Some(step.id), path, index)?;
        path.pop();
    }
    Ok(())
}
