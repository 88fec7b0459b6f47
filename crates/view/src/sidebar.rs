//! The sidebar presenter: one step in, one display payload out.

use pulldown_cmark::{html, Options, Parser};
use serde::Serialize;

use pipeline::{Step, StepId, StepLink};

/// Markdown shown when a step has no description.
pub const PLACEHOLDER_DESCRIPTION: &str = "*Coming soon*";

/// Everything the side panel shows for a step.
///
/// Serialises with camelCase keys, like the step document and the scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarPanel {
    /// The step being shown.
    pub step_id: StepId,
    /// Panel heading (the step label).
    pub title: String,
    /// The description rendered to HTML.
    pub description_html: String,
    /// Code snippet, when the step has a non-empty one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Related articles, in order.
    pub links: Vec<StepLink>,
}

impl SidebarPanel {
    /// Builds the panel for a step. Pure: depends only on `step`.
    pub fn present(step: &Step) -> Self {
        let description = step
            .description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(PLACEHOLDER_DESCRIPTION);

        Self {
            step_id: step.id,
            title: step.label.clone(),
            description_html: render_markdown(description),
            code: step.code.clone().filter(|c| !c.is_empty()),
            links: step.links.clone(),
        }
    }

    /// Renders the panel as the HTML fragment injected into the side panel.
    ///
    /// Title, code and links are escaped; the rendered description is
    /// inserted as produced by the markdown renderer.
    pub fn to_html(&self) -> String {
        let mut out = format!("<h2>{}</h2>\n", escape_html(&self.title));
        out.push_str(&self.description_html);

        if let Some(code) = &self.code {
            out.push_str("<h3>Code Snippet</h3><pre><code>");
            out.push_str(&escape_html(code));
            out.push_str("</code></pre>\n");
        }

        if !self.links.is_empty() {
            out.push_str("<h3>Articles</h3><ul>");
            for link in &self.links {
                out.push_str(&format!(
                    "<li><a href=\"{}\" target=\"_blank\">{}</a></li>",
                    escape_html(&link.url),
                    escape_html(&link.text)
                ));
            }
            out.push_str("</ul>\n");
        }

        out
    }
}

/// Renders CommonMark (plus tables and strikethrough) to HTML.
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
