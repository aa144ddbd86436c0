//! MDX output: prose between JSX code listings
//!
//! Comments become plain Markdown paragraphs; code blocks become JSX listings. Every
//! piece of source text goes into a template literal (`` {`...`} ``) so that braces,
//! angle brackets and backticks in code cannot break the JSX parser.

use super::escape::{escape_mdx_attribute, escape_mdx_template};
use super::registry::{FormatError, Formatter};
use crate::cire::ast::{AnnotatedRun, Block, Document, Markup, Run};

pub const DEFAULT_CODE_WRAPPER_START: &str = "<pre><code className=\"cire\">";
pub const DEFAULT_CODE_WRAPPER_END: &str = "</code></pre>";

#[derive(Debug, Clone)]
pub struct MdxFormatter {
    pub code_wrapper_start: String,
    pub code_wrapper_end: String,
    pub show_doc_hovers: bool,
}

impl Default for MdxFormatter {
    fn default() -> Self {
        Self {
            code_wrapper_start: DEFAULT_CODE_WRAPPER_START.to_string(),
            code_wrapper_end: DEFAULT_CODE_WRAPPER_END.to_string(),
            show_doc_hovers: true,
        }
    }
}

impl MdxFormatter {
    pub fn render(&self, doc: &Document) -> String {
        let mut out = String::new();

        for block in &doc.blocks {
            match block {
                Block::Code(code) => {
                    out.push_str(&self.code_wrapper_start);
                    out.push('\n');
                    for run in &code.runs {
                        out.push_str(&self.render_run(run));
                    }
                    out.push_str(&self.code_wrapper_end);
                    out.push('\n');
                }
                Block::Prose(prose) => {
                    out.push_str(&prose.content);
                    out.push('\n');
                }
            }
        }

        out
    }

    fn render_run(&self, run: &Run) -> String {
        match run {
            Run::Text(text) => plain(text),
            Run::Annotated(run) => self.render_annotated(run),
        }
    }

    fn render_annotated(&self, run: &AnnotatedRun) -> String {
        let content = template(&run.text);
        let rendered = match run.markup() {
            Markup::Definition { symbol, class } => format!(
                r#"<span id="{}" className="{}">{}</span>"#,
                escape_mdx_attribute(symbol),
                escape_mdx_attribute(class),
                content
            ),
            Markup::Reference { symbol, class } => format!(
                r##"<a href="#{}" className="{}">{}</a>"##,
                escape_mdx_attribute(symbol),
                escape_mdx_attribute(class),
                content
            ),
            Markup::Classed { class } => format!(
                r#"<span className="{}">{}</span>"#,
                escape_mdx_attribute(class),
                content
            ),
            Markup::Plain => plain(&run.text),
        };

        match run.hover() {
            Some(doc) if self.show_doc_hovers => format!(
                r#"<span className="cire_hover" title={}>{}</span>"#,
                template(&doc),
                rendered
            ),
            _ => rendered,
        }
    }
}

fn template(text: &str) -> String {
    format!("{{`{}`}}", escape_mdx_template(text))
}

fn plain(text: &str) -> String {
    format!(r#"<span className="cire_text">{}</span>"#, template(text))
}

impl Formatter for MdxFormatter {
    fn name(&self) -> &str {
        "mdx"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(self.render(doc))
    }

    fn file_extension(&self) -> &str {
        "mdx"
    }

    fn description(&self) -> &str {
        "MDX with comments as prose and JSX code listings"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cire::ast::{Annotation, CodeBlock, ProseBlock, Segment, Span};

    fn annotated(text: &str, annotation: Annotation) -> Run {
        Run::Annotated(AnnotatedRun::new(
            text,
            Segment::new(Span::default(), annotation),
        ))
    }

    #[test]
    fn test_prose_and_code_blocks() {
        let doc = Document::new(vec![
            Block::Prose(ProseBlock {
                content: "Entry point.".into(),
            }),
            Block::Code(CodeBlock {
                runs: vec![
                    Run::Text("fn ".into()),
                    annotated(
                        "main",
                        Annotation::default()
                            .with_symbol("crate/main().")
                            .with_highlight("function")
                            .definition(),
                    ),
                    Run::Text("() { `${x}` }".into()),
                ],
            }),
            Block::Prose(ProseBlock {
                content: "Done.".into(),
            }),
        ]);

        let output = MdxFormatter::default().render(&doc);
        insta::assert_snapshot!(output, @r#"
        Entry point.
        <pre><code className="cire">
        <span className="cire_text">{`fn `}</span><span id="crate/main()." className="function">{`main`}</span><span className="cire_text">{`() { \`\${x}\` }`}</span></code></pre>
        Done.
        "#);
    }

    #[test]
    fn test_reference_and_classed_runs() {
        let formatter = MdxFormatter::default();
        let reference = annotated(
            "v",
            Annotation::default().with_symbol("{v}").reference(),
        );
        let classed = annotated("if", Annotation::default().with_highlight("keyword"));
        let plain_run = annotated("<x>", Annotation::default());

        assert_eq!(
            formatter.render_run(&reference),
            r##"<a href="#\{v\}" className="">{`v`}</a>"##
        );
        assert_eq!(
            formatter.render_run(&classed),
            r#"<span className="keyword">{`if`}</span>"#
        );
        assert_eq!(
            formatter.render_run(&plain_run),
            r#"<span className="cire_text">{`&lt;x&gt;`}</span>"#
        );
    }

    #[test]
    fn test_doc_hover_uses_template_title() {
        let run = annotated(
            "n",
            Annotation::default()
                .with_highlight("variable")
                .with_doc("`n`: usize"),
        );
        assert_eq!(
            MdxFormatter::default().render_run(&run),
            r#"<span className="cire_hover" title={`\`n\`: usize`}><span className="variable">{`n`}</span></span>"#
        );
    }

    #[test]
    fn test_custom_wrappers() {
        let formatter = MdxFormatter {
            code_wrapper_start: "<details>\n<pre><code>".into(),
            code_wrapper_end: "</code></pre>\n</details>".into(),
            show_doc_hovers: true,
        };
        let doc = Document::new(vec![Block::Code(CodeBlock {
            runs: vec![Run::Text("x".into())],
        })]);
        assert_eq!(
            formatter.render(&doc),
            "<details>\n<pre><code>\n<span className=\"cire_text\">{`x`}</span></code></pre>\n</details>\n"
        );
    }
}
