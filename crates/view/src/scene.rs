//! The render adapter.
//!
//! The drawing library in the browser owns layout and SVG. What it needs from
//! us is a [`Scene`]: the nodes to draw with their labels and fills, the links
//! with stable data-join keys, and the force settings. A scene is a pure
//! function of a [`GraphState`], so a redraw is just building a new one.

use serde::Serialize;

use pipeline::{GraphState, Step, StepId};

/// Node fills by depth: roots, children, grandchildren. Deeper levels cycle.
pub const DEPTH_PALETTE: [&str; 3] = ["#3b82f6", "#9333ea", "#ec4899"];

/// How node fills are chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneStyle {
    /// `palette[depth % len]`.
    ByDepth(Vec<String>),
    /// `palette[colorIndex % len]`, falling back to depth for steps without
    /// a `colorIndex`.
    ByColorIndex(Vec<String>),
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self::by_depth()
    }
}

impl SceneStyle {
    /// Depth colouring with [`DEPTH_PALETTE`].
    pub fn by_depth() -> Self {
        Self::ByDepth(DEPTH_PALETTE.iter().map(|c| c.to_string()).collect())
    }

    /// Colour-index colouring with a caller palette.
    pub fn by_color_index<I, S>(palette: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::ByColorIndex(palette.into_iter().map(Into::into).collect())
    }

    fn fill(&self, step: &Step, depth: u32) -> String {
        let (palette, index) = match self {
            Self::ByDepth(p) => (p.as_slice(), depth),
            Self::ByColorIndex(p) => (p.as_slice(), step.color_index.unwrap_or(depth)),
        };
        if palette.is_empty() {
            return DEPTH_PALETTE[depth as usize % DEPTH_PALETTE.len()].to_string();
        }
        palette[index as usize % palette.len()].clone()
    }
}

/// Parses a comma-separated colour list such as the value of a CSS custom
/// property (`"#111, #222 ,#333"`). Empty entries are dropped.
pub fn parse_palette(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}

/// Force-layout parameters handed to the drawing library.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForceSettings {
    /// Target length of every link.
    pub link_distance: f64,
    /// Many-body strength; negative repels.
    pub charge_strength: f64,
    /// Node circle radius.
    pub node_radius: f64,
}

impl Default for ForceSettings {
    fn default() -> Self {
        Self {
            link_distance: 200.0,
            charge_strength: -400.0,
            node_radius: 24.0,
        }
    }
}

/// A node as drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SceneNode {
    /// The step this node draws.
    pub id: StepId,
    /// Text shown inside the node.
    pub label: String,
    /// 0 for roots, parent depth + 1 otherwise.
    pub depth: u32,
    /// Whether the node's children are currently shown.
    pub expanded: bool,
    /// Whether clicking this node would reveal or hide anything.
    pub expandable: bool,
    /// CSS colour for the node circle.
    pub fill: String,
}

/// A link as drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SceneLink {
    /// Data-join key, `"<source>-<target>"`.
    pub key: String,
    /// Upstream end of the link.
    pub source: StepId,
    /// Downstream end of the link.
    pub target: StepId,
}

/// Everything the drawing library needs for one redraw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    /// Visible nodes, in graph order.
    pub nodes: Vec<SceneNode>,
    /// Visible links, in graph order.
    pub links: Vec<SceneLink>,
    /// Layout parameters for the simulation.
    pub force: ForceSettings,
}

impl Scene {
    /// Derives the scene for a graph state.
    pub fn build(state: &GraphState, style: &SceneStyle) -> Self {
        let catalog = state.catalog();

        let nodes = state
            .nodes()
            .iter()
            .filter_map(|node| {
                let step = catalog.get(node.step_id)?;
                Some(SceneNode {
                    id: node.step_id,
                    label: step.label.clone(),
                    depth: node.depth,
                    expanded: node.expanded,
                    expandable: step.has_children(),
                    fill: style.fill(step, node.depth),
                })
            })
            .collect();

        let links = state
            .edges()
            .iter()
            .map(|edge| SceneLink {
                key: format!("{}-{}", edge.source, edge.target),
                source: edge.source,
                target: edge.target,
            })
            .collect();

        Self {
            nodes,
            links,
            force: ForceSettings::default(),
        }
    }
}
