//! Directory listing page

use crate::resolver::{EntryKind, Listing, LogicalPath};
use std::fmt::Write;

/// Link to `target` through the `query_param` query parameter.
/// Directory links carry a trailing `/`.
pub fn listing_href(query_param: &str, target: &LogicalPath, kind: EntryKind) -> String {
    let suffix = match kind {
        EntryKind::Directory if !target.is_root() => "/",
        _ => "",
    };
    format!("/?{query_param}={}{suffix}", target.encode())
}

/// Render a listing as a standalone HTML page
pub fn render_listing(listing: &Listing, query_param: &str) -> String {
    let title = format!("Index of /{}", escape_html(listing.path.as_str()));
    let mut rows = String::new();

    if let Some(parent) = &listing.parent {
        let _ = writeln!(
            rows,
            r#"    <li class="parent"><a href="{}">&#11013; Back</a></li>"#,
            escape_html(&listing_href(query_param, parent, EntryKind::Directory))
        );
    }

    for item in &listing.items {
        let (class, icon, suffix) = match item.kind {
            EntryKind::Directory => ("dir", "&#128193;", "/"),
            EntryKind::File => ("file", "&#128196;", ""),
        };
        let _ = writeln!(
            rows,
            r#"    <li class="{class}"><a href="{}">{icon} {}{suffix}</a></li>"#,
            escape_html(&listing_href(query_param, &item.target, item.kind)),
            escape_html(&item.name),
        );
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>{title}</title>
  <style>
    body {{ font-family: monospace; padding: 30px; }}
    li {{ margin: 6px 0; list-style: none; }}
    a {{ text-decoration: none; }}
  </style>
</head>
<body>
  <h2>{title}</h2>
  <ul>
{rows}  </ul>
</body>
</html>
"#
    )
}

/// Escape text for HTML element content and quoted attributes
pub fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::{build_listing, DirectoryEntry};

    fn listing(path: &str, entries: Vec<DirectoryEntry>) -> Listing {
        build_listing(&LogicalPath::new(path), entries)
    }

    #[test]
    fn test_listing_completeness() {
        let html = render_listing(
            &listing(
                "",
                vec![
                    DirectoryEntry::new("a.txt", EntryKind::File),
                    DirectoryEntry::new("sub", EntryKind::Directory),
                ],
            ),
            "path",
        );
        assert!(html.contains(r#"<li class="file"><a href="/?path=a.txt">&#128196; a.txt</a></li>"#));
        assert!(html.contains(r#"<li class="dir"><a href="/?path=sub/">&#128193; sub/</a></li>"#));
    }

    #[test]
    fn test_root_has_no_parent_link() {
        let html = render_listing(&listing("", Vec::new()), "path");
        assert!(html.contains("<title>Index of /</title>"));
        assert!(!html.contains("Back"));
    }

    #[test]
    fn test_parent_link() {
        let html = render_listing(&listing("a/b", Vec::new()), "path");
        assert!(html.contains("Index of /a/b"));
        assert!(html.contains(r#"<li class="parent"><a href="/?path=a/">"#));

        let html = render_listing(&listing("a", Vec::new()), "path");
        assert!(html.contains(r#"<li class="parent"><a href="/?path=">"#));
    }

    #[test]
    fn test_links_are_encoded_and_names_escaped() {
        let html = render_listing(
            &listing(
                "my docs",
                vec![DirectoryEntry::new("<b>&co #1.txt", EntryKind::File)],
            ),
            "path",
        );
        assert!(html.contains(r#"href="/?path=my%20docs/%3Cb%3E%26co%20%231.txt""#));
        assert!(html.contains("&lt;b&gt;&amp;co #1.txt"));
        assert!(!html.contains("<b>&co"));
    }

    #[test]
    fn test_custom_query_param() {
        let href = listing_href("p", &LogicalPath::new("x/y"), EntryKind::File);
        assert_eq!(href, "/?p=x/y");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"a<b>"c"&'d'"#), "a&lt;b&gt;&quot;c&quot;&amp;&#39;d&#39;");
        assert_eq!(escape_html("plain"), "plain");
    }
}
