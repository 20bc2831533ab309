use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::{
    fmt::Write,
    path::{Component, PathBuf},
    sync::Arc,
};

pub type Root = Arc<PathBuf>;

pub async fn list_root(State(root): State<Root>) -> Response {
    list(&root, "").await
}

pub async fn list_path(State(root): State<Root>, Path(path): Path<String>) -> Response {
    list(&root, &path).await
}

async fn list(root: &std::path::Path, rel: &str) -> Response {
    let Some(dir) = resolve(root, rel) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if !tokio::fs::metadata(&dir).await.is_ok_and(|m| m.is_dir()) {
        return StatusCode::NOT_FOUND.into_response();
    }

    match read_entries(&dir).await {
        Ok(entries) => Html(render(&format!("/{rel}"), &entries)).into_response(),
        Err(e) => {
            log::warn!("Failed to list {}: {}", dir.display(), e);
            (StatusCode::NOT_FOUND, "No permission to list directory").into_response()
        }
    }
}

/// Map a decoded url path onto the served root, refusing to leave it.
pub(crate) fn resolve(root: &std::path::Path, rel: &str) -> Option<PathBuf> {
    let mut path = root.to_path_buf();
    for component in std::path::Path::new(rel).components() {
        match component {
            Component::Normal(part) => path.push(part),
            Component::CurDir => {}
            _ => return None,
        }
    }
    Some(path)
}

struct Entry {
    name: String,
    is_dir: bool,
}

async fn read_entries(dir: &std::path::Path) -> std::io::Result<Vec<Entry>> {
    let mut entries = Vec::new();
    let mut read_dir = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = read_dir.next_entry().await? {
        // Follows symlinks, a link to a directory is listed as one
        let is_dir = tokio::fs::metadata(entry.path())
            .await
            .is_ok_and(|m| m.is_dir());
        entries.push(Entry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir,
        });
    }
    entries.sort_by_cached_key(|e| e.name.to_lowercase());
    Ok(entries)
}

fn render(display_path: &str, entries: &[Entry]) -> String {
    let title = format!("Directory listing for {}", escape_html(display_path));
    let mut page = String::new();
    let _ = write!(
        page,
        "<!DOCTYPE HTML>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n</head>\n<body>\n<h1>{title}</h1>\n<hr>\n<ul>\n"
    );
    for entry in entries {
        let suffix = if entry.is_dir { "/" } else { "" };
        let _ = writeln!(
            page,
            "<li><a href=\"{}{suffix}\">{}{suffix}</a></li>",
            encode_href(&entry.name),
            escape_html(&entry.name),
        );
    }
    page.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    page
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}

fn encode_href(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for &b in name.as_bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~') {
            out.push(b as char);
        } else {
            let _ = write!(out, "%{b:02X}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_stays_in_root() {
        let root = std::path::Path::new("/srv/www");
        assert_eq!(
            resolve(root, "shaders/basic.frag"),
            Some(PathBuf::from("/srv/www/shaders/basic.frag"))
        );
        assert_eq!(resolve(root, "./a/"), Some(PathBuf::from("/srv/www/a")));
        assert_eq!(resolve(root, ""), Some(PathBuf::from("/srv/www")));
        assert_eq!(resolve(root, "../etc"), None);
        assert_eq!(resolve(root, "a/../../etc"), None);
        assert_eq!(resolve(root, "/etc"), None);
    }

    #[test]
    fn test_encode_href() {
        assert_eq!(encode_href("basic.frag"), "basic.frag");
        assert_eq!(encode_href("my shaders"), "my%20shaders");
        assert_eq!(encode_href("a#b?c"), "a%23b%3Fc");
        assert_eq!(encode_href("é"), "%C3%A9");
    }

    #[test]
    fn test_render() {
        let entries = [
            Entry {
                name: "lib".into(),
                is_dir: true,
            },
            Entry {
                name: "<x>.js".into(),
                is_dir: false,
            },
        ];
        let page = render("/samples/", &entries);
        assert!(page.contains("<title>Directory listing for /samples/</title>"));
        assert!(page.contains("<li><a href=\"lib/\">lib/</a></li>"));
        assert!(page.contains("<li><a href=\"%3Cx%3E.js\">&lt;x&gt;.js</a></li>"));
    }
}
