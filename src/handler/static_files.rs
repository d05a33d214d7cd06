//! Static file fallback module
//!
//! Serves GET/HEAD requests from the configured root directory, the default
//! behavior for everything the relay route does not claim.

use std::path::{Path, PathBuf};

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use tokio::fs;

use crate::config::StaticFilesConfig;
use crate::handler::router::RequestContext;
use crate::http::{self, mime};
use crate::logger;

enum Resolved {
    File(PathBuf),
    Directory(PathBuf),
}

/// Serve a request path from the static root
pub async fn serve(ctx: &RequestContext<'_>, cfg: &StaticFilesConfig) -> Response<Full<Bytes>> {
    match resolve(cfg, ctx.path).await {
        Some(Resolved::File(file_path)) => match fs::read(&file_path).await {
            Ok(content) => {
                let content_type =
                    mime::get_content_type(file_path.extension().and_then(|e| e.to_str()));
                http::build_file_response(Bytes::from(content), content_type, ctx.is_head)
            }
            Err(e) => {
                logger::log_error(&format!(
                    "Failed to read file '{}': {e}",
                    file_path.display()
                ));
                http::build_404_response()
            }
        },
        Some(Resolved::Directory(dir_path)) if cfg.directory_listing => {
            match render_listing(&dir_path, ctx.path).await {
                Some(html) => http::build_listing_response(html, ctx.is_head),
                None => http::build_404_response(),
            }
        }
        _ => http::build_404_response(),
    }
}

/// Map a request path onto the serving root.
///
/// Directories resolve through the configured index files first; the
/// canonicalized result must stay inside the root.
async fn resolve(cfg: &StaticFilesConfig, request_path: &str) -> Option<Resolved> {
    let relative = sanitize_path(request_path);
    let root = Path::new(&cfg.root);
    let mut target = root.join(relative);

    let root_canonical = match root.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!("Serving root '{}' not accessible: {e}", cfg.root));
            return None;
        }
    };

    if target.is_dir() {
        for index in &cfg.index_files {
            let candidate = target.join(index);
            if candidate.is_file() {
                target = candidate;
                break;
            }
        }
    }

    // Not found is common, no warning needed
    let canonical = target.canonicalize().ok()?;
    if !canonical.starts_with(&root_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {request_path} -> {}",
            canonical.display()
        ));
        return None;
    }

    if canonical.is_dir() {
        Some(Resolved::Directory(canonical))
    } else {
        Some(Resolved::File(canonical))
    }
}

/// Strip the leading slash and drop empty, `.`, and `..` segments
fn sanitize_path(path: &str) -> String {
    path.split('/')
        .filter(|segment| !segment.is_empty() && *segment != "." && *segment != "..")
        .collect::<Vec<_>>()
        .join("/")
}

/// Render an HTML listing of a directory: entries sorted, subdirectories
/// suffixed with `/`, names escaped
async fn render_listing(dir: &Path, request_path: &str) -> Option<String> {
    let mut reader = fs::read_dir(dir).await.ok()?;
    let mut entries: Vec<String> = Vec::new();
    while let Ok(Some(entry)) = reader.next_entry().await {
        let mut name = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type().await.map(|t| t.is_dir()).unwrap_or(false) {
            name.push('/');
        }
        entries.push(name);
    }
    entries.sort();

    let title = format!("Directory listing for {}", escape_html(request_path));
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    html.push_str(&format!("<title>{title}</title>\n</head>\n<body>\n"));
    html.push_str(&format!("<h1>{title}</h1>\n<hr>\n<ul>\n"));
    for name in &entries {
        let escaped = escape_html(name);
        html.push_str(&format!("<li><a href=\"{escaped}\">{escaped}</a></li>\n"));
    }
    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    Some(html)
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
