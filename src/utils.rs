/// Escapes text for use in HTML element content and double-quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Builds an HTML id from arbitrary parts: ASCII alphanumerics are kept, every other
/// character becomes `-`.
pub fn element_id(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|part| {
            part.chars()
                .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<script>alert('x&y')</script>"),
            "&lt;script&gt;alert(&#39;x&amp;y&#39;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("Kraków \"Nowa Huta\""), "Kraków &quot;Nowa Huta&quot;");
    }

    #[test]
    fn test_element_id() {
        assert_eq!(element_id(&["series", "Cd(PM10)", "MpKrakBujaka"]), "series-Cd-PM10--MpKrakBujaka");
        assert_eq!(element_id(&["climatology", "PM2.5"]), "climatology-PM2-5");
    }
}
