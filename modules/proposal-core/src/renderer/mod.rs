//! Printable HTML for a proposal. Rendering is pure: same inputs, same bytes.

mod document;
mod style;

use std::path::{Path, PathBuf};

use dioxus::prelude::VirtualDom;
use tracing::info;

use proposal_common::{
    Config, Letterhead, ProposalContent, ProposalDocument, ProposalError, PLACEHOLDER_IMAGE_URL,
};

use document::{ProposalSheet, ProposalSheetProps};

#[derive(Debug, Clone, Default)]
pub struct DocumentRenderer {
    letterhead: Option<Letterhead>,
}

impl DocumentRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            letterhead: config.letterhead(),
        }
    }

    pub fn with_letterhead(mut self, letterhead: Letterhead) -> Self {
        self.letterhead = Some(letterhead);
        self
    }

    /// Fill the A4 template. The file name follows `product_name` as the
    /// operator typed it, whatever the copy says. An empty `image_url` shows
    /// the placeholder image.
    pub fn render(
        &self,
        product_name: &str,
        content: &ProposalContent,
        image_url: &str,
    ) -> ProposalDocument {
        let mut dom = VirtualDom::new_with_props(
            ProposalSheet,
            ProposalSheetProps {
                content: content.clone(),
                image_url: resolve_image_url(image_url).to_string(),
                letterhead: self.letterhead.clone(),
            },
        );
        dom.rebuild_in_place();
        let html = render_to_html(&dom);

        info!(product = product_name, bytes = html.len(), "Proposal rendered");
        ProposalDocument::new(document_file_name(product_name), html)
    }
}

/// Render a VirtualDom into a complete Japanese-language HTML document.
fn render_to_html(dom: &VirtualDom) -> String {
    format!(
        "<!DOCTYPE html><html lang=\"ja\">{}</html>",
        dioxus::ssr::render(dom)
    )
}

pub fn resolve_image_url(image_url: &str) -> &str {
    let trimmed = image_url.trim();
    if trimmed.is_empty() {
        PLACEHOLDER_IMAGE_URL
    } else {
        trimmed
    }
}

/// `proposal_<name>.html`, with whitespace and path-unsafe characters
/// replaced by `_`.
pub fn document_file_name(product_name: &str) -> String {
    let name: String = product_name
        .trim()
        .chars()
        .map(|c| {
            if c.is_whitespace()
                || c.is_control()
                || matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|')
            {
                '_'
            } else {
                c
            }
        })
        .collect();

    if name.is_empty() {
        "proposal_untitled.html".to_string()
    } else {
        format!("proposal_{name}.html")
    }
}

/// Write `doc` into `dir` (created if missing) and return the file path.
pub fn write_document(doc: &ProposalDocument, dir: &Path) -> Result<PathBuf, ProposalError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(doc.file_name());
    std::fs::write(&path, doc.html())?;
    info!(path = %path.display(), "Proposal saved");
    Ok(path)
}
