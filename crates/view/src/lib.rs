//! stepmap presentation layer.
//!
//! Turns domain state into what a page shows:
//!
//! - [`sidebar`]: the side panel for one step ([`SidebarPanel`]).
//! - [`scene`]: the drawable form of a [`pipeline::GraphState`] ([`Scene`]).
//! - [`explorer`]: a reader's session: clicks, deep links, redraws ([`Explorer`]).
//!
//! ## Architectural Layer
//!
//! **Presentation.** Everything here is a pure function of domain values,
//! apart from [`Explorer`], which holds one graph snapshot on behalf of a
//! single UI. No I/O.

pub mod explorer;
pub mod scene;
pub mod sidebar;

pub use explorer::{parse_step_fragment, ClickResult, Explorer};
pub use scene::{
    parse_palette, ForceSettings, Scene, SceneLink, SceneNode, SceneStyle, DEPTH_PALETTE,
};
pub use sidebar::{render_markdown, SidebarPanel, PLACEHOLDER_DESCRIPTION};
