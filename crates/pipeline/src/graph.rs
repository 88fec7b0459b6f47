//! The expandable graph state behind the diagram.
//!
//! A [`GraphState`] is an immutable snapshot: the visible nodes, the edges
//! between them, and which nodes are expanded. [`GraphState::toggle`] returns
//! a new snapshot and leaves the receiver untouched.
//!
//! Snapshots are rebuilt from the catalog and the ordered list of expanded
//! steps on every transition, never patched. That keeps the invariant trivial
//! to uphold: every edge endpoint is a visible node, and collapsing a step
//! removes exactly what its expansion (and any nested expansion under it)
//! introduced.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{StepCatalog, StepId};

// ---------------------------------------------------------------------------
// Snapshot contents
// ---------------------------------------------------------------------------

/// A step currently shown in the diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleNode {
    /// The step this node shows.
    pub step_id: StepId,
    /// 0 for root steps, parent depth + 1 for revealed children.
    pub depth: u32,
    /// Whether this node's children are currently revealed.
    pub expanded: bool,
}

/// A directed connection between two visible nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Upstream step: the previous root, or the expanded parent.
    pub source: StepId,
    /// Downstream step: the next root, or a revealed child.
    pub target: StepId,
}

impl Edge {
    /// Creates an edge from `source` to `target`.
    pub fn new(source: StepId, target: StepId) -> Self {
        Self { source, target }
    }
}

/// What a call to [`GraphState::toggle`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleOutcome {
    /// Children were revealed.
    Expanded,
    /// Children (and everything under them) were hidden.
    Collapsed,
    /// The step has no children; nothing changed.
    Leaf,
    /// The step exists but is not on screen; nothing changed.
    NotVisible,
    /// No step has this id; nothing changed.
    UnknownStep,
}

impl ToggleOutcome {
    /// Returns `true` if the node or edge sets changed.
    pub fn changed(self) -> bool {
        matches!(self, Self::Expanded | Self::Collapsed)
    }
}

// ---------------------------------------------------------------------------
// Graph state
// ---------------------------------------------------------------------------

/// Visible nodes and edges derived from a [`StepCatalog`].
///
/// Cloning is cheap relative to the data it describes: the catalog is shared.
#[derive(Debug, Clone)]
pub struct GraphState {
    catalog: Arc<StepCatalog>,
    /// Expanded steps in expansion order. A parent always precedes its
    /// expanded descendants.
    expanded: Vec<StepId>,
    nodes: Vec<VisibleNode>,
    edges: Vec<Edge>,
}

impl GraphState {
    /// Shows every root step at depth 0, chained in document order.
    pub fn initialize(catalog: Arc<StepCatalog>) -> Self {
        Self::rebuild(catalog, Vec::new())
    }

    /// Initializes, then toggles each id in order.
    ///
    /// Ids that cannot be toggled are skipped the same way [`Self::toggle`]
    /// skips them.
    pub fn with_expanded<I>(catalog: Arc<StepCatalog>, ids: I) -> Self
    where
        I: IntoIterator<Item = StepId>,
    {
        ids.into_iter()
            .fold(Self::initialize(catalog), |state, id| state.toggle(id).0)
    }

    /// Expands or collapses `step_id` and returns the resulting snapshot.
    ///
    /// Unknown, hidden, and childless steps leave the state unchanged; the
    /// returned [`ToggleOutcome`] says which case applied.
    pub fn toggle(&self, step_id: StepId) -> (Self, ToggleOutcome) {
        let Some(step) = self.catalog.get(step_id) else {
            tracing::debug!(step = %step_id, "Toggle ignored: unknown step");
            return (self.clone(), ToggleOutcome::UnknownStep);
        };

        if !self.is_visible(step_id) {
            tracing::debug!(step = %step_id, "Toggle ignored: step not visible");
            return (self.clone(), ToggleOutcome::NotVisible);
        }

        if !step.has_children() {
            return (self.clone(), ToggleOutcome::Leaf);
        }

        if self.is_expanded(step_id) {
            let catalog = &self.catalog;
            let expanded = self
                .expanded
                .iter()
                .copied()
                .filter(|&id| id != step_id && !catalog.is_descendant_of(id, step_id))
                .collect();
            let next = Self::rebuild(Arc::clone(&self.catalog), expanded);
            tracing::debug!(
                step = %step_id,
                nodes = next.nodes.len(),
                edges = next.edges.len(),
                "Step collapsed"
            );
            (next, ToggleOutcome::Collapsed)
        } else {
            let mut expanded = self.expanded.clone();
            expanded.push(step_id);
            let next = Self::rebuild(Arc::clone(&self.catalog), expanded);
            tracing::debug!(
                step = %step_id,
                nodes = next.nodes.len(),
                edges = next.edges.len(),
                "Step expanded"
            );
            (next, ToggleOutcome::Expanded)
        }
    }

    /// Visible nodes: roots in document order, then revealed children in
    /// expansion order.
    pub fn nodes(&self) -> &[VisibleNode] {
        &self.nodes
    }

    /// Edges: the root chain, then expansion edges in expansion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns the visible node for a step, if it is on screen.
    pub fn node(&self, step_id: StepId) -> Option<&VisibleNode> {
        self.nodes.iter().find(|n| n.step_id == step_id)
    }

    /// Returns `true` if the step is on screen.
    pub fn is_visible(&self, step_id: StepId) -> bool {
        self.node(step_id).is_some()
    }

    /// Returns `true` if the step is on screen with its children revealed.
    pub fn is_expanded(&self, step_id: StepId) -> bool {
        self.expanded.contains(&step_id)
    }

    /// Expanded steps in the order they were expanded.
    pub fn expanded_steps(&self) -> &[StepId] {
        &self.expanded
    }

    /// The catalog this state was derived from.
    pub fn catalog(&self) -> &Arc<StepCatalog> {
        &self.catalog
    }

    fn rebuild(catalog: Arc<StepCatalog>, expanded: Vec<StepId>) -> Self {
        let roots = catalog.roots();

        let mut nodes: Vec<VisibleNode> = roots
            .iter()
            .map(|s| VisibleNode {
                step_id: s.id,
                depth: 0,
                expanded: expanded.contains(&s.id),
            })
            .collect();

        let mut edges: Vec<Edge> = roots
            .windows(2)
            .map(|pair| Edge::new(pair[0].id, pair[1].id))
            .collect();

        let mut position: HashMap<StepId, usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.step_id, i))
            .collect();

        for &parent_id in &expanded {
            let (Some(&at), Some(parent)) = (position.get(&parent_id), catalog.get(parent_id))
            else {
                continue;
            };
            let depth = nodes[at].depth + 1;
            for child in parent.children() {
                position.insert(child.id, nodes.len());
                nodes.push(VisibleNode {
                    step_id: child.id,
                    depth,
                    expanded: expanded.contains(&child.id),
                });
                edges.push(Edge::new(parent_id, child.id));
            }
        }

        Self {
            catalog,
            expanded,
            nodes,
            edges,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rstest::rstest;

    use super::*;
    use crate::Step;

    fn id(n: u64) -> StepId {
        StepId::new(n)
    }

    fn leaf(n: u64) -> Step {
        Step::new(id(n), format!("step {n}"))
    }

    fn parent(n: u64, children: Vec<Step>) -> Step {
        leaf(n).with_children(children)
    }

    fn catalog(steps: Vec<Step>) -> Arc<StepCatalog> {
        Arc::new(StepCatalog::from_steps(steps).unwrap())
    }

    /// `[{1, children: []}, {2, children: [21, 22]}]`
    fn two_roots() -> Arc<StepCatalog> {
        catalog(vec![
            parent(1, vec![]),
            parent(2, vec![leaf(21), leaf(22)]),
        ])
    }

    /// Root 1 → 2 → 3; 2 has 21 (with 211, 212) and 22; 3 has 31.
    fn nested() -> Arc<StepCatalog> {
        catalog(vec![
            leaf(1),
            parent(2, vec![parent(21, vec![leaf(211), leaf(212)]), leaf(22)]),
            parent(3, vec![leaf(31)]),
        ])
    }

    fn node_ids(state: &GraphState) -> HashSet<u64> {
        state.nodes().iter().map(|n| n.step_id.as_u64()).collect()
    }

    fn edge_pairs(state: &GraphState) -> Vec<(u64, u64)> {
        state
            .edges()
            .iter()
            .map(|e| (e.source.as_u64(), e.target.as_u64()))
            .collect()
    }

    fn assert_edges_reference_visible_nodes(state: &GraphState) {
        let nodes = node_ids(state);
        for (s, t) in edge_pairs(state) {
            assert!(nodes.contains(&s), "edge source {s} is not visible");
            assert!(nodes.contains(&t), "edge target {t} is not visible");
        }
    }

    #[test]
    fn expand_then_collapse_scenario() {
        let state = GraphState::initialize(two_roots());
        assert_eq!(edge_pairs(&state), vec![(1, 2)]);

        let (expanded, outcome) = state.toggle(id(2));
        assert_eq!(outcome, ToggleOutcome::Expanded);
        assert_eq!(node_ids(&expanded), HashSet::from([1, 2, 21, 22]));
        assert_eq!(edge_pairs(&expanded), vec![(1, 2), (2, 21), (2, 22)]);
        assert!(expanded.node(id(2)).unwrap().expanded);
        assert_eq!(expanded.node(id(21)).unwrap().depth, 1);

        let (collapsed, outcome) = expanded.toggle(id(2));
        assert_eq!(outcome, ToggleOutcome::Collapsed);
        assert_eq!(node_ids(&collapsed), HashSet::from([1, 2]));
        assert_eq!(edge_pairs(&collapsed), vec![(1, 2)]);
        assert!(!collapsed.node(id(2)).unwrap().expanded);
    }

    #[rstest]
    #[case::no_roots(vec![], 0)]
    #[case::single_root(vec![leaf(1)], 0)]
    #[case::three_roots(vec![leaf(1), leaf(2), leaf(3)], 2)]
    fn initialize_chains_roots(#[case] steps: Vec<Step>, #[case] expected_edges: usize) {
        let roots = steps.len();
        let state = GraphState::initialize(catalog(steps));

        assert_eq!(state.nodes().len(), roots);
        assert_eq!(state.edges().len(), expected_edges);
        assert!(state.nodes().iter().all(|n| n.depth == 0 && !n.expanded));
        assert_edges_reference_visible_nodes(&state);
    }

    #[test]
    fn chain_follows_document_order_not_id_order() {
        let state = GraphState::initialize(catalog(vec![leaf(5), leaf(1), leaf(3)]));
        assert_eq!(edge_pairs(&state), vec![(5, 1), (1, 3)]);
    }

    #[rstest]
    #[case::empty_children(1)]
    #[case::no_children_field(3)]
    fn toggling_a_leaf_changes_nothing(#[case] step: u64) {
        let cat = catalog(vec![parent(1, vec![]), leaf(2), leaf(3)]);
        let state = GraphState::initialize(cat);

        let (next, outcome) = state.toggle(id(step));

        assert_eq!(outcome, ToggleOutcome::Leaf);
        assert!(!outcome.changed());
        assert_eq!(next.nodes(), state.nodes());
        assert_eq!(next.edges(), state.edges());
    }

    #[test]
    fn unknown_step_is_ignored() {
        let state = GraphState::initialize(two_roots());
        let (next, outcome) = state.toggle(id(404));

        assert_eq!(outcome, ToggleOutcome::UnknownStep);
        assert_eq!(next.nodes(), state.nodes());
        assert_eq!(next.edges(), state.edges());
    }

    #[test]
    fn hidden_step_is_ignored() {
        let state = GraphState::initialize(nested());
        let (next, outcome) = state.toggle(id(21));

        assert_eq!(outcome, ToggleOutcome::NotVisible);
        assert_eq!(node_ids(&next), node_ids(&state));
    }

    #[rstest]
    #[case(2, 2)]
    #[case(3, 1)]
    fn expansion_adds_one_node_and_edge_per_child(#[case] step: u64, #[case] children: usize) {
        let state = GraphState::initialize(nested());
        let (expanded, _) = state.toggle(id(step));

        assert_eq!(expanded.nodes().len(), state.nodes().len() + children);
        assert_eq!(expanded.edges().len(), state.edges().len() + children);
        assert_edges_reference_visible_nodes(&expanded);

        let (collapsed, _) = expanded.toggle(id(step));
        assert_eq!(collapsed.nodes(), state.nodes());
        assert_eq!(collapsed.edges(), state.edges());
    }

    #[test]
    fn collapsing_removes_nested_expansions() {
        let state = GraphState::initialize(nested());
        let (state, _) = state.toggle(id(2));
        let (state, outcome) = state.toggle(id(21));
        assert_eq!(outcome, ToggleOutcome::Expanded);
        assert_eq!(state.node(id(211)).unwrap().depth, 2);
        assert_eq!(node_ids(&state), HashSet::from([1, 2, 3, 21, 22, 211, 212]));

        let (state, outcome) = state.toggle(id(2));
        assert_eq!(outcome, ToggleOutcome::Collapsed);
        assert_eq!(node_ids(&state), HashSet::from([1, 2, 3]));
        assert_eq!(edge_pairs(&state), vec![(1, 2), (2, 3)]);
        assert!(state.expanded_steps().is_empty());
        assert_edges_reference_visible_nodes(&state);
    }

    #[test]
    fn reexpanded_parent_shows_children_collapsed() {
        let state = GraphState::with_expanded(nested(), [id(2), id(21), id(2)]);
        let (state, _) = state.toggle(id(2));

        assert!(state.is_visible(id(21)));
        assert!(!state.is_expanded(id(21)));
        assert!(!state.is_visible(id(211)));
    }

    #[test]
    fn collapsing_one_parent_keeps_sibling_expansion() {
        let state = GraphState::with_expanded(nested(), [id(2), id(3)]);
        assert_eq!(
            edge_pairs(&state),
            vec![(1, 2), (2, 3), (2, 21), (2, 22), (3, 31)]
        );

        let (state, _) = state.toggle(id(2));
        assert_eq!(edge_pairs(&state), vec![(1, 2), (2, 3), (3, 31)]);
        assert_eq!(state.expanded_steps(), &[id(3)]);
    }

    #[test]
    fn toggle_leaves_receiver_untouched() {
        let state = GraphState::initialize(two_roots());
        let _ = state.toggle(id(2));

        assert_eq!(node_ids(&state), HashSet::from([1, 2]));
        assert!(!state.is_expanded(id(2)));
    }

    #[test]
    fn with_expanded_skips_ids_it_cannot_toggle() {
        let state = GraphState::with_expanded(nested(), [id(404), id(211), id(3)]);
        assert_eq!(state.expanded_steps(), &[id(3)]);
    }
}
