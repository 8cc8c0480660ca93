//! Static file serving
//!
//! Maps request paths to files under the document root and builds the
//! response for each resource kind: regular files, directory indexes,
//! generated listings, and redirects for slash-less directory paths.

use std::path::{Path, PathBuf};

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use percent_encoding::percent_decode_str;
use tokio::fs;

use crate::config::ServerConfig;
use crate::handler::listing;
use crate::http::{self, date, mime};
use crate::logger;

/// Index files tried, in order, when a directory is requested.
const INDEX_FILES: [&str; 2] = ["index.html", "index.htm"];

/// Outcome of resolving a request path against the document root.
#[derive(Debug, PartialEq, Eq)]
pub enum Resolved {
    /// A regular file to serve.
    File(PathBuf),
    /// A directory with no index file; a listing is generated.
    Directory(PathBuf),
    /// A directory requested without its trailing slash.
    Redirect(String),
    /// Nothing under the root matches, or the path tried to escape it.
    NotFound,
}

/// Serve the resource a request path resolves to.
pub async fn serve(
    config: &ServerConfig,
    request_path: &str,
    is_head: bool,
    if_modified_since: Option<&str>,
) -> Response<Full<Bytes>> {
    match resolve(config.document_root(), request_path).await {
        Resolved::File(path) => serve_file(&path, is_head, if_modified_since).await,
        Resolved::Directory(path) => serve_listing(&path, request_path, is_head).await,
        Resolved::Redirect(location) => http::build_301_response(&location),
        Resolved::NotFound => http::build_404_response(),
    }
}

/// Resolve a percent-encoded request path to a resource under `root`.
///
/// `..` segments are rejected outright, and the surviving candidate must
/// canonicalize to a path under the (already canonical) root, so symlinks
/// cannot lead outside it either.
pub async fn resolve(root: &Path, request_path: &str) -> Resolved {
    let Ok(decoded) = percent_decode_str(request_path).decode_utf8() else {
        return Resolved::NotFound;
    };
    if decoded.contains('\0') {
        return Resolved::NotFound;
    }

    let mut candidate = root.to_path_buf();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => return Resolved::NotFound,
            name => candidate.push(name),
        }
    }

    let Ok(meta) = fs::metadata(&candidate).await else {
        return Resolved::NotFound;
    };

    if !is_under_root(root, &candidate) {
        logger::log_warning(&format!(
            "Path escapes document root, rejected: {request_path}"
        ));
        return Resolved::NotFound;
    }

    if meta.is_dir() {
        if !request_path.ends_with('/') {
            return Resolved::Redirect(format!("{request_path}/"));
        }
        for index in INDEX_FILES {
            let index_path = candidate.join(index);
            if fs::metadata(&index_path).await.is_ok_and(|m| m.is_file()) {
                return Resolved::File(index_path);
            }
        }
        return Resolved::Directory(candidate);
    }

    if meta.is_file() {
        Resolved::File(candidate)
    } else {
        Resolved::NotFound
    }
}

fn is_under_root(root: &Path, candidate: &Path) -> bool {
    match candidate.canonicalize() {
        Ok(canonical) => canonical.starts_with(root),
        Err(_) => false,
    }
}

async fn serve_file(
    path: &Path,
    is_head: bool,
    if_modified_since: Option<&str>,
) -> Response<Full<Bytes>> {
    let mtime = fs::metadata(path).await.ok().and_then(|m| m.modified().ok());

    if let Some(mtime) = mtime {
        if date::not_modified(if_modified_since, mtime) {
            return http::build_304_response();
        }
    }

    let content = match fs::read(path).await {
        Ok(content) => content,
        Err(e) => {
            logger::log_error(&format!("Failed to read file '{}': {e}", path.display()));
            return http::build_404_response();
        }
    };

    let content_type = mime::content_type(path.extension().and_then(|e| e.to_str()));
    let last_modified = mtime.map(date::format_http_date);
    http::build_file_response(content, content_type, last_modified, is_head)
}

async fn serve_listing(dir: &Path, request_path: &str, is_head: bool) -> Response<Full<Bytes>> {
    match listing::collect_entries(dir).await {
        Ok(entries) => http::build_html_response(listing::render(request_path, &entries), is_head),
        Err(e) => {
            logger::log_error(&format!(
                "Failed to list directory '{}': {e}",
                dir.display()
            ));
            http::build_404_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as stdfs;

    /// Build a throwaway document root with a couple of assets in it.
    fn fixture_root(name: &str) -> PathBuf {
        let root = std::env::temp_dir().join(format!("freshd-{}-{name}", std::process::id()));
        let _ = stdfs::remove_dir_all(&root);
        stdfs::create_dir_all(root.join("assets")).unwrap();
        stdfs::write(root.join("app.js"), b"console.log('hi');").unwrap();
        stdfs::write(root.join("assets").join("logo.svg"), b"<svg/>").unwrap();
        root.canonicalize().unwrap()
    }

    #[tokio::test]
    async fn resolves_existing_file() {
        let root = fixture_root("file");
        assert_eq!(
            resolve(&root, "/app.js").await,
            Resolved::File(root.join("app.js"))
        );
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let root = fixture_root("missing");
        assert_eq!(resolve(&root, "/nope.css").await, Resolved::NotFound);
    }

    #[tokio::test]
    async fn traversal_segments_are_rejected() {
        let root = fixture_root("traversal");
        // A real file one level above the root must stay unreachable.
        stdfs::write(root.parent().unwrap().join("secret.txt"), b"top secret").unwrap();

        assert_eq!(resolve(&root, "/../secret.txt").await, Resolved::NotFound);
        assert_eq!(
            resolve(&root, "/assets/../../secret.txt").await,
            Resolved::NotFound
        );
        assert_eq!(
            resolve(&root, "/%2e%2e/secret.txt").await,
            Resolved::NotFound
        );
    }

    #[tokio::test]
    async fn directory_without_slash_redirects() {
        let root = fixture_root("redirect");
        assert_eq!(
            resolve(&root, "/assets").await,
            Resolved::Redirect("/assets/".to_string())
        );
    }

    #[tokio::test]
    async fn directory_with_index_serves_it() {
        let root = fixture_root("index");
        stdfs::write(root.join("index.html"), b"<html></html>").unwrap();
        assert_eq!(
            resolve(&root, "/").await,
            Resolved::File(root.join("index.html"))
        );
    }

    #[tokio::test]
    async fn directory_without_index_lists() {
        let root = fixture_root("listing");
        assert_eq!(
            resolve(&root, "/assets/").await,
            Resolved::Directory(root.join("assets"))
        );
    }

    #[tokio::test]
    async fn percent_encoded_names_are_decoded() {
        let root = fixture_root("decode");
        stdfs::write(root.join("hello world.txt"), b"hi").unwrap();
        assert_eq!(
            resolve(&root, "/hello%20world.txt").await,
            Resolved::File(root.join("hello world.txt"))
        );
    }

    #[tokio::test]
    async fn served_file_body_matches_disk() {
        use hyper::body::Body as _;

        let root = fixture_root("body");
        let config = ServerConfig::with_root(&root).unwrap();
        let response = serve(&config, "/app.js", false, None).await;

        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers().get("Content-Type").unwrap(),
            "application/javascript"
        );
        assert_eq!(
            response.body().size_hint().exact(),
            Some(b"console.log('hi');".len() as u64)
        );
        assert!(response.headers().contains_key("Last-Modified"));
    }

    #[tokio::test]
    async fn fresh_if_modified_since_yields_304() {
        let root = fixture_root("conditional");
        let config = ServerConfig::with_root(&root).unwrap();

        let mtime = stdfs::metadata(root.join("app.js"))
            .unwrap()
            .modified()
            .unwrap();
        let header = date::format_http_date(mtime);

        let response = serve(&config, "/app.js", false, Some(&header)).await;
        assert_eq!(response.status(), 304);
    }
}
