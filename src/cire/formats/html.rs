//! HTML listing embedded in Markdown
//!
//! Each code block becomes one `<pre><code>` listing. Definitions turn into anchors,
//! references into links to those anchors, so symbols are navigable within the page.
//! This format keeps comments as part of the code listing.

use super::escape::escape_html;
use super::registry::{FormatError, Formatter};
use crate::cire::ast::{AnnotatedRun, Block, Document, Markup, Run};

pub const DEFAULT_CODE_WRAPPER_START: &str = "<pre><code class='cire'>";
pub const DEFAULT_CODE_WRAPPER_END: &str = "</code></pre>";

#[derive(Debug, Clone)]
pub struct HtmlFormatter {
    pub code_wrapper_start: String,
    pub code_wrapper_end: String,
    pub show_doc_hovers: bool,
}

impl Default for HtmlFormatter {
    fn default() -> Self {
        Self {
            code_wrapper_start: DEFAULT_CODE_WRAPPER_START.to_string(),
            code_wrapper_end: DEFAULT_CODE_WRAPPER_END.to_string(),
            show_doc_hovers: true,
        }
    }
}

impl HtmlFormatter {
    pub fn render(&self, doc: &Document) -> String {
        doc.blocks
            .iter()
            .map(|block| match block {
                Block::Code(code) => {
                    let mut out = self.code_wrapper_start.clone();
                    for run in &code.runs {
                        out.push_str(&self.render_run(run));
                    }
                    out.push('\n');
                    out.push_str(&self.code_wrapper_end);
                    out
                }
                Block::Prose(prose) => prose.content.clone(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_run(&self, run: &Run) -> String {
        match run {
            Run::Text(text) => escape_html(text),
            Run::Annotated(run) => self.render_annotated(run),
        }
    }

    fn render_annotated(&self, run: &AnnotatedRun) -> String {
        let content = escape_html(&run.text);
        let rendered = match run.markup() {
            Markup::Definition { symbol, class } => format!(
                r#"<span id="{}" class="{}">{}</span>"#,
                escape_html(symbol),
                escape_html(class),
                content
            ),
            Markup::Reference { symbol, class } => format!(
                r##"<a href="#{}" class="{}">{}</a>"##,
                escape_html(symbol),
                escape_html(class),
                content
            ),
            Markup::Classed { class } => {
                format!(r#"<span class="{}">{}</span>"#, escape_html(class), content)
            }
            Markup::Plain => content,
        };

        match run.hover() {
            Some(doc) if self.show_doc_hovers => format!(
                r#"<span class="cire_hover" title="{}">{}</span>"#,
                escape_html(&doc),
                rendered
            ),
            _ => rendered,
        }
    }
}

impl Formatter for HtmlFormatter {
    fn name(&self) -> &str {
        "markdown"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(self.render(doc))
    }

    fn file_extension(&self) -> &str {
        "md"
    }

    fn interleaves_prose(&self) -> bool {
        false
    }

    fn description(&self) -> &str {
        "HTML code listing inside Markdown, with anchors and links for symbols"
    }
}
