//! Read-only step routes and the health probe.
//!
//! These serve the step document the page loads at start-up, the sidebar
//! panel for a step, and the scene for a described set of expansions. They
//! hold no per-client state: a client names its expanded steps in the query
//! and gets back the scene for that view.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use pipeline::{GraphState, StepCatalog, StepDocument, StepId};
use view::{parse_palette, Scene, SceneStyle, SidebarPanel};

use crate::{RelayError, RelayState};

/// Query of `GET /scene`.
#[derive(Debug, Default, Deserialize)]
pub struct SceneQuery {
    /// Comma-separated step ids, toggled in order.
    #[serde(default)]
    pub expanded: Option<String>,
    /// Comma-separated colours; switches to colour-index styling.
    #[serde(default)]
    pub palette: Option<String>,
}

fn catalog(state: &RelayState) -> Result<Arc<StepCatalog>, RelayError> {
    state.catalog.clone().ok_or(RelayError::NoCatalog)
}

/// `GET /data/pipeline.json`
pub async fn step_document(
    State(state): State<RelayState>,
) -> Result<Json<StepDocument>, RelayError> {
    Ok(Json(catalog(&state)?.document().clone()))
}

/// `GET /steps/{id}`
pub async fn step_panel(
    State(state): State<RelayState>,
    Path(raw_id): Path<String>,
) -> Result<Json<SidebarPanel>, RelayError> {
    let catalog = catalog(&state)?;
    let step_id: StepId = raw_id
        .parse()
        .map_err(|_| RelayError::UnknownStep(raw_id.clone()))?;
    let step = catalog
        .get(step_id)
        .ok_or_else(|| RelayError::unknown_step(step_id))?;
    Ok(Json(SidebarPanel::present(step)))
}

/// `GET /scene?expanded=2,21&palette=#111,#222`
pub async fn scene(
    State(state): State<RelayState>,
    Query(query): Query<SceneQuery>,
) -> Result<Json<Scene>, RelayError> {
    let catalog = catalog(&state)?;
    let expanded = parse_expanded(query.expanded.as_deref().unwrap_or_default())?;

    let style = match query.palette.as_deref().map(parse_palette) {
        Some(palette) if !palette.is_empty() => SceneStyle::ByColorIndex(palette),
        _ => SceneStyle::by_depth(),
    };

    let graph = GraphState::with_expanded(catalog, expanded);
    Ok(Json(Scene::build(&graph, &style)))
}

/// `GET /health`
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

fn parse_expanded(list: &str) -> Result<Vec<StepId>, RelayError> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<StepId>()
                .map_err(|_| RelayError::InvalidExpanded(s.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_expanded_lists() {
        assert_eq!(
            parse_expanded("2, 21,,").unwrap(),
            vec![StepId::new(2), StepId::new(21)]
        );
        assert!(parse_expanded("").unwrap().is_empty());
        assert!(matches!(
            parse_expanded("2,x"),
            Err(RelayError::InvalidExpanded(s)) if s == "x"
        ));
    }
}
