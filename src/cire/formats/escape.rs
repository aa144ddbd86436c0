//! Escaping for the supported output syntaxes

/// Escape HTML special characters
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Escape text placed inside a JSX template literal (`` {`...`} ``)
pub fn escape_mdx_template(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
        .replace('\t', "\\t")
        .replace('\r', "\\r")
}

/// Escape a JSX attribute value
pub fn escape_mdx_attribute(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\'', "&#39;")
        .replace('\t', "\\t")
        .replace('{', "\\{")
        .replace('}', "\\}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"if a < b && c > "d" || 'e'"#),
            "if a &lt; b &amp;&amp; c &gt; &quot;d&quot; || &#39;e&#39;"
        );
        assert_eq!(escape_html(""), "");
    }

    #[test]
    fn test_escape_mdx_template() {
        assert_eq!(
            escape_mdx_template("let s = `${x}\\n`;\t<tag>\r"),
            "let s = \\`\\${x}\\\\n\\`;\\t&lt;tag&gt;\\r"
        );
    }

    #[test]
    fn test_escape_mdx_attribute() {
        assert_eq!(
            escape_mdx_attribute("rust . main().{impl}<T>'"),
            "rust . main().\\{impl\\}&lt;T&gt;&#39;"
        );
    }
}
