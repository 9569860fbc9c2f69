//! Static file fallback collaborator.
//!
//! Consulted by the service only when the router reports no match: given a
//! request path, serve a matching file under the base directory or decline
//! with an error. URL paths are mapped defensively — any parent-directory
//! component declines the request, so the served tree cannot be escaped.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// The welcome file served for the bare `/` path.
pub const WELCOME_FILE: &str = "index.html";

#[derive(Debug, Clone)]
pub struct StaticFiles {
    base_dir: PathBuf,
}

impl StaticFiles {
    pub fn new<P: Into<PathBuf>>(base: P) -> Self {
        Self {
            base_dir: base.into(),
        }
    }

    fn map_path(&self, url_path: &str) -> Option<PathBuf> {
        let mut pb = self.base_dir.clone();
        for comp in Path::new(url_path.trim_start_matches('/')).components() {
            match comp {
                Component::Normal(s) => pb.push(s),
                Component::CurDir => {}
                _ => return None,
            }
        }
        Some(pb)
    }

    fn content_type(path: &Path) -> &'static str {
        match path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_lowercase()
            .as_str()
        {
            "html" => "text/html",
            "css" => "text/css",
            "js" => "application/javascript",
            "json" => "application/json",
            "xml" => "text/xml",
            "txt" => "text/plain",
            "svg" => "image/svg+xml",
            "png" => "image/png",
            "ico" => "image/x-icon",
            _ => "application/octet-stream",
        }
    }

    /// Load a file for the given URL path. An empty path resolves to the
    /// welcome file.
    pub fn load(&self, url_path: &str) -> io::Result<(Vec<u8>, &'static str)> {
        let url_path = if url_path.trim_start_matches('/').is_empty() {
            WELCOME_FILE
        } else {
            url_path
        };
        let path = self
            .map_path(url_path)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "invalid path"))?;
        if !path.is_file() {
            return Err(io::Error::new(io::ErrorKind::NotFound, "file not found"));
        }
        let bytes = fs::read(&path)?;
        Ok((bytes, Self::content_type(&path)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn fixture() -> (tempfile::TempDir, StaticFiles) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("hello.txt"), "Hello\n").unwrap();
        fs::write(dir.path().join("index.html"), "<h1>Welcome</h1>").unwrap();
        let sf = StaticFiles::new(dir.path());
        (dir, sf)
    }

    #[test]
    fn test_map_path_prevents_traversal() {
        let (_dir, sf) = fixture();
        assert!(sf.map_path("../Cargo.toml").is_none());
        assert!(sf.map_path("a/../../Cargo.toml").is_none());
    }

    #[test]
    fn test_load_plain_file() {
        let (_dir, sf) = fixture();
        let (bytes, ct) = sf.load("hello.txt").unwrap();
        assert_eq!(ct, "text/plain");
        assert_eq!(String::from_utf8(bytes).unwrap(), "Hello\n");
    }

    #[test]
    fn test_empty_path_serves_welcome_file() {
        let (_dir, sf) = fixture();
        let (bytes, ct) = sf.load("/").unwrap();
        assert_eq!(ct, "text/html");
        assert_eq!(String::from_utf8(bytes).unwrap(), "<h1>Welcome</h1>");
    }

    #[test]
    fn test_missing_file_declines() {
        let (_dir, sf) = fixture();
        assert!(sf.load("nope.txt").is_err());
    }
}
