//! HTML output for rendered answers.
//!
//! Prose goes through pulldown-cmark. Math and failure markers become
//! `span`/`div` elements; when a whole answer is rendered they are spliced
//! into the markdown source as raw HTML so inline expressions stay inside
//! their paragraph.

use pulldown_cmark::{Options, Parser, html};

use super::{FailureMarker, RenderNode};
use crate::typeset::MathMode;

fn markdown_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}

fn markdown_to_html(source: &str) -> String {
    let parser = Parser::new_ext(source, markdown_options());
    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Renders a single node on its own.
pub fn to_html(node: &RenderNode) -> String {
    match node {
        RenderNode::Markdown(text) => markdown_to_html(text),
        other => fragment(other, false),
    }
}

/// Renders a whole answer as one HTML document body.
///
/// Expects the nodes of [`SegmentRenderer::render_answer`], which keep the
/// whitespace between segments.
///
/// [`SegmentRenderer::render_answer`]: super::SegmentRenderer::render_answer
pub fn answer_to_html(nodes: &[RenderNode]) -> String {
    let mut source = String::new();
    for node in nodes {
        match node {
            RenderNode::Markdown(text) => source.push_str(text),
            RenderNode::Math {
                mode: MathMode::Block,
                ..
            }
            | RenderNode::Failed(FailureMarker {
                mode: MathMode::Block,
                ..
            }) => {
                // An HTML block has to start on its own line and end at a
                // blank one
                source.push_str("\n\n");
                source.push_str(&fragment(node, true));
                source.push_str("\n\n");
            }
            _ => source.push_str(&fragment(node, true)),
        }
    }
    markdown_to_html(&source)
}

/// The raw HTML for a math or failure node. `in_markdown` marks inline
/// fragments that will be re-read by the markdown parser.
fn fragment(node: &RenderNode, in_markdown: bool) -> String {
    match node {
        RenderNode::Markdown(text) => markdown_to_html(text),
        RenderNode::Math { mode, output } => match mode {
            MathMode::Inline => format!(
                r#"<span class="math math-inline" style="white-space: nowrap">{}</span>"#,
                inline_text(&output.text, in_markdown)
            ),
            MathMode::Block => format!(
                r#"<div class="math math-block" style="text-align: center">{}</div>"#,
                block_text(&output.text)
            ),
        },
        RenderNode::Failed(marker) => {
            let title = html_escape::encode_double_quoted_attribute(&marker.label);
            let style = format!(
                "color: {}; background-color: {}; border: 1px solid {}; border-radius: 4px; padding: 0 2px",
                marker.palette.foreground, marker.palette.background, marker.palette.border
            );
            match marker.mode {
                MathMode::Inline => format!(
                    r#"<span class="math-error" title="{title}" style="{style}">{}</span>"#,
                    inline_text(&marker.original, in_markdown)
                ),
                MathMode::Block => format!(
                    r#"<div class="math-error" title="{title}" style="{style}">{}</div>"#,
                    block_text(&marker.original)
                ),
            }
        }
    }
}

fn inline_text(text: &str, in_markdown: bool) -> String {
    if in_markdown {
        html_escape::encode_text(&escape_markdown(text)).into_owned()
    } else {
        html_escape::encode_text(text).into_owned()
    }
}

/// HTML block bodies are passed through untouched by the markdown parser,
/// so only HTML escaping applies. Line breaks become `<br>` so the block
/// never contains a blank line.
fn block_text(text: &str) -> String {
    html_escape::encode_text(text)
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("<br>")
}

/// Backslash-escapes characters the markdown parser would treat as inline
/// syntax. `<`, `>` and `&` are left for HTML escaping.
fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '*' | '_' | '`' | '[' | ']' | '~' | '|' | '!' | '#') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
