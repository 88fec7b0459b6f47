//! One reader's session with the diagram.
//!
//! [`Explorer`] owns the current [`GraphState`] and turns UI events into
//! transitions: a click toggles an expandable node and opens its sidebar, a
//! `#step<N>` fragment opens the sidebar for step N.

use std::sync::Arc;

use pipeline::{GraphState, StepCatalog, StepId, ToggleOutcome};

use crate::{Scene, SceneStyle, SidebarPanel};

/// Result of clicking a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickResult {
    /// What the click did to the graph.
    pub outcome: ToggleOutcome,
    /// The panel to show for the clicked step.
    pub panel: SidebarPanel,
    /// Whether the scene must be rebuilt.
    pub redraw: bool,
}

/// Current graph state plus the event handlers that move it.
#[derive(Debug, Clone)]
pub struct Explorer {
    state: GraphState,
}

impl Explorer {
    /// Starts a session with only the root chain visible.
    pub fn new(catalog: Arc<StepCatalog>) -> Self {
        Self {
            state: GraphState::initialize(catalog),
        }
    }

    /// The current snapshot.
    pub fn state(&self) -> &GraphState {
        &self.state
    }

    /// Handles a click on a node.
    ///
    /// Returns `None` for unknown ids. Otherwise toggles the step if it has
    /// children and presents its sidebar. A step that is off screen keeps the
    /// graph as it is (`NotVisible`) but still gets its panel.
    pub fn click(&mut self, step_id: StepId) -> Option<ClickResult> {
        let catalog = Arc::clone(self.state.catalog());
        let step = catalog.get(step_id)?;

        let (next, outcome) = self.state.toggle(step_id);
        self.state = next;
        tracing::debug!(step = %step_id, ?outcome, "Click handled");

        Some(ClickResult {
            outcome,
            panel: SidebarPanel::present(step),
            redraw: outcome.changed(),
        })
    }

    /// Handles a location fragment such as `#step3`.
    ///
    /// Any step in the catalog can be deep-linked, visible or not. Malformed
    /// fragments and unknown ids yield `None`.
    pub fn navigate(&self, fragment: &str) -> Option<SidebarPanel> {
        let step_id = parse_step_fragment(fragment)?;
        let step = self.state.catalog().get(step_id)?;
        Some(SidebarPanel::present(step))
    }

    /// Builds the scene for the current state.
    pub fn scene(&self, style: &SceneStyle) -> Scene {
        Scene::build(&self.state, style)
    }
}

/// Parses `#step<N>` (the `#` is optional) into a step id.
pub fn parse_step_fragment(fragment: &str) -> Option<StepId> {
    let fragment = fragment.trim();
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
    let digits = fragment.strip_prefix("step")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use pipeline::Step;

    use super::*;

    fn explorer() -> Explorer {
        let steps = vec![
            Step::new(StepId::new(1), "Ingest").with_description("Load data"),
            Step::new(StepId::new(2), "Train").with_children(vec![
                Step::new(StepId::new(21), "Tune"),
                Step::new(StepId::new(22), "Validate"),
            ]),
        ];
        Explorer::new(Arc::new(StepCatalog::from_steps(steps).unwrap()))
    }

    #[test]
    fn clicking_a_parent_toggles_and_opens_sidebar() {
        let mut explorer = explorer();

        let first = explorer.click(StepId::new(2)).unwrap();
        assert_eq!(first.outcome, ToggleOutcome::Expanded);
        assert!(first.redraw);
        assert_eq!(first.panel.title, "Train");
        assert_eq!(explorer.state().nodes().len(), 4);

        let second = explorer.click(StepId::new(2)).unwrap();
        assert_eq!(second.outcome, ToggleOutcome::Collapsed);
        assert_eq!(explorer.state().nodes().len(), 2);
    }

    #[test]
    fn clicking_a_leaf_opens_sidebar_without_redraw() {
        let mut explorer = explorer();
        let result = explorer.click(StepId::new(1)).unwrap();

        assert_eq!(result.outcome, ToggleOutcome::Leaf);
        assert!(!result.redraw);
        assert_eq!(result.panel.description_html, "<p>Load data</p>\n");
    }

    #[test]
    fn clicks_on_unknown_steps_are_ignored() {
        let mut explorer = explorer();

        assert!(explorer.click(StepId::new(99)).is_none());
        assert_eq!(explorer.state().nodes().len(), 2);
    }

    #[test]
    fn clicking_a_hidden_step_opens_sidebar_without_redraw() {
        let mut explorer = explorer();

        let result = explorer.click(StepId::new(21)).unwrap();
        assert_eq!(result.outcome, ToggleOutcome::NotVisible);
        assert!(!result.redraw);
        assert_eq!(result.panel.title, "Tune");
        assert_eq!(explorer.state().nodes().len(), 2);
        assert!(!explorer.state().is_visible(StepId::new(21)));
    }

    #[test]
    fn navigation_reaches_hidden_children() {
        let explorer = explorer();

        let panel = explorer.navigate("#step22").unwrap();
        assert_eq!(panel.title, "Validate");
        assert!(explorer.navigate("#step404").is_none());
    }

    #[test]
    fn scene_tracks_the_current_state() {
        let mut explorer = explorer();
        explorer.click(StepId::new(2));

        let scene = explorer.scene(&SceneStyle::default());
        assert_eq!(scene.nodes.len(), 4);
        assert_eq!(scene.links.len(), 3);
    }

    #[rstest]
    #[case("#step3", Some(3))]
    #[case("step21", Some(21))]
    #[case("  #step7 ", Some(7))]
    #[case("#step", None)]
    #[case("#step-1", None)]
    #[case("#step3abc", None)]
    #[case("#stage3", None)]
    #[case("", None)]
    fn parses_step_fragments(#[case] fragment: &str, #[case] expected: Option<u64>) {
        assert_eq!(parse_step_fragment(fragment), expected.map(StepId::new));
    }
}
