//! Directory index generation
//!
//! Renders an HTML listing of directory entries as links when a
//! requested directory has no index file.

use std::io;
use std::path::Path;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use tokio::fs;

/// Characters escaped inside listing hrefs, on top of controls
const HREF_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'\'')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?');

/// A single listing row: entry name plus its type suffix
/// (`/` for directories, `@` for symlinks)
type Entry = (String, &'static str);

/// Render an HTML index for `dir`, displayed under the URL `display_path`
pub async fn render(dir: &Path, display_path: &str) -> io::Result<String> {
    let mut entries: Vec<Entry> = Vec::new();
    let mut read_dir = fs::read_dir(dir).await?;

    while let Some(entry) = read_dir.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        let file_type = entry.file_type().await?;
        let suffix = if file_type.is_dir() {
            "/"
        } else if file_type.is_symlink() {
            "@"
        } else {
            ""
        };
        entries.push((name, suffix));
    }

    entries.sort_by(|a, b| a.0.to_lowercase().cmp(&b.0.to_lowercase()));

    Ok(render_entries(display_path, &entries))
}

/// Render the listing page for a sorted set of entries
fn render_entries(display_path: &str, entries: &[Entry]) -> String {
    let title = format!("Directory listing for {display_path}");
    let escaped_title = escape_html(&title);

    let mut html = String::new();
    html.push_str("<!DOCTYPE HTML>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{escaped_title}</title>\n"));
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!("<h1>{escaped_title}</h1>\n<hr>\n<ul>\n"));

    for (name, suffix) in entries {
        let link = format!("{name}{suffix}");
        html.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            utf8_percent_encode(&link, HREF_ESCAPE),
            escape_html(&link),
        ));
    }

    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    html
}

/// Escape HTML special characters in entry names
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_become_links() {
        let entries = vec![
            ("demos".to_string(), "/"),
            ("index.js".to_string(), ""),
            ("link".to_string(), "@"),
        ];
        let html = render_entries("/pkg/", &entries);

        assert!(html.contains("<title>Directory listing for /pkg/</title>"));
        assert!(html.contains("<a href=\"demos/\">demos/</a>"));
        assert!(html.contains("<a href=\"index.js\">index.js</a>"));
        assert!(html.contains("<a href=\"link@\">link@</a>"));
    }

    #[test]
    fn test_names_are_html_escaped() {
        let entries = vec![("<script>.js".to_string(), "")];
        let html = render_entries("/", &entries);
        assert!(html.contains("&lt;script&gt;.js"));
        assert!(!html.contains("<script>.js"));
    }

    #[test]
    fn test_hrefs_are_percent_encoded() {
        let entries = vec![("my docs".to_string(), "/")];
        let html = render_entries("/", &entries);
        assert!(html.contains("href=\"my%20docs/\""));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a&b"), "a&amp;b");
        assert_eq!(escape_html("<i>\"x\"</i>"), "&lt;i&gt;&quot;x&quot;&lt;/i&gt;");
    }

    #[tokio::test]
    async fn test_render_reads_directory() {
        let dir = std::env::temp_dir().join(format!("devserve-listing-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(dir.join("Sub")).unwrap();
        std::fs::write(dir.join("b.txt"), b"b").unwrap();
        std::fs::write(dir.join("a.txt"), b"a").unwrap();

        let html = render(&dir, "/").await.unwrap();

        // Sorted case-insensitively: a.txt, b.txt, Sub/
        let a = html.find("a.txt").unwrap();
        let b = html.find("b.txt").unwrap();
        let sub = html.find("Sub/").unwrap();
        assert!(a < b && b < sub);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
