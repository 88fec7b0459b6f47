//! Step records as they appear in the step document.
//!
//! A [`Step`] is immutable once loaded. Field names follow the document
//! format: the markdown body is stored under `desc` (with `description`
//! accepted on input) and the palette hint under `colorIndex`.

use serde::{Deserialize, Serialize};

use crate::StepId;

// ---------------------------------------------------------------------------
// Links
// ---------------------------------------------------------------------------

/// A related article shown in a step's sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepLink {
    /// Target of the link.
    pub url: String,
    /// Display text of the link.
    pub text: String,
}

impl StepLink {
    /// Creates a link from its target and display text.
    pub fn new(url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            text: text.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

/// One stage of the documented pipeline.
///
/// Root steps form the linear chain of the diagram; `children` are revealed
/// under their parent on expansion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// Unique identifier across the whole step tree.
    pub id: StepId,

    /// Display text for the node and the sidebar title.
    #[serde(default)]
    pub label: String,

    /// Markdown body shown in the sidebar.
    #[serde(
        rename = "desc",
        alias = "description",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    /// Presentation hint: index into the node palette.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_index: Option<u32>,

    /// Optional code snippet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Related articles, in display order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<StepLink>,

    /// Sub-steps revealed when this step is expanded.
    ///
    /// `None` and `Some(vec![])` both mean the step is a leaf.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Step>>,
}

impl Step {
    /// Creates a leaf step with only an id and a label.
    pub fn new(id: StepId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            description: None,
            color_index: None,
            code: None,
            links: Vec::new(),
            children: None,
        }
    }

    /// Sets the markdown description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the code snippet.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Appends a related link.
    #[must_use]
    pub fn with_link(mut self, link: StepLink) -> Self {
        self.links.push(link);
        self
    }

    /// Sets the palette hint.
    #[must_use]
    pub fn with_color_index(mut self, index: u32) -> Self {
        self.color_index = Some(index);
        self
    }

    /// Sets the sub-steps.
    #[must_use]
    pub fn with_children(mut self, children: Vec<Step>) -> Self {
        self.children = Some(children);
        self
    }

    /// Returns the sub-steps, empty for a leaf.
    pub fn children(&self) -> &[Step] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Returns `true` if expanding this step would reveal anything.
    pub fn has_children(&self) -> bool {
        !self.children().is_empty()
    }
}
