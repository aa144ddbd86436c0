//! Output formats for assembled documents
//!
//! The assembler hands over literal source text; everything target-specific (escaping,
//! markup, wrappers around code blocks) happens here.
//!
//! - `markdown`: HTML code listing embedded in Markdown, comments stay in the code
//! - `mdx`: JSX-safe listing with comments lifted out as prose
//! - `json`: the raw document structure, for debugging and external renderers

pub mod escape;
pub mod html;
pub mod json;
pub mod mdx;
pub mod registry;

pub use html::HtmlFormatter;
pub use json::JsonFormatter;
pub use mdx::MdxFormatter;
pub use registry::{FormatError, FormatRegistry, Formatter};
