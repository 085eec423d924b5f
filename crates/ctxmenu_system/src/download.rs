//! HTTP downloads for "Save Image".
//!
//! By default downloads run on a background thread so the menu handler
//! returns immediately and failures are only logged. Short-lived processes
//! use [`HttpDownloader::foreground`] instead.

use std::fs::{self, OpenOptions};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::thread;

use ureq::tls::{RootCerts, TlsConfig, TlsProvider};
use ureq::Agent;

use ctxmenu_core::host::{Downloader, HostWindow};
use ctxmenu_core::CtxMenuError;

const USER_AGENT: &str = concat!("ctxmenu/", env!("CARGO_PKG_VERSION"));

/// File name used when the URL has no usable last path segment.
pub const FALLBACK_FILE_NAME: &str = "download";

/// Downloads resources into a directory over HTTP.
#[derive(Debug, Clone)]
pub struct HttpDownloader {
    dir: PathBuf,
    background: bool,
}

impl Default for HttpDownloader {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpDownloader {
    /// Download into the user's download directory (or the temp directory).
    pub fn new() -> Self {
        Self::with_dir(dirs::download_dir().unwrap_or_else(std::env::temp_dir))
    }

    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), background: true }
    }

    /// Builder: download on the calling thread and report failures.
    pub fn foreground(mut self) -> Self {
        self.background = false;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Fetch `url` and stream it into the download directory.
    ///
    /// Returns the path written. Existing files are never overwritten.
    pub fn fetch(&self, url: &str) -> Result<PathBuf, CtxMenuError> {
        let mut body = agent()
            .get(url)
            .header("User-Agent", USER_AGENT)
            .call()
            .map_err(|e| CtxMenuError::download_with_source("Request failed", url, e))?
            .into_body();

        fs::create_dir_all(&self.dir)?;
        let path = unique_path(&self.dir, &file_name_for(url));
        let bytes = save_stream(&mut body.as_reader(), &path)
            .map_err(|e| CtxMenuError::download_with_source("Failed to save body", url, e))?;

        tracing::info!(url, path = %path.display(), bytes, "Download complete");
        Ok(path)
    }
}

/// Copy `reader` into a new file at `path`, removing it if the copy fails.
fn save_stream(reader: &mut impl Read, path: &Path) -> io::Result<u64> {
    let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
    match io::copy(reader, &mut file) {
        Ok(bytes) => Ok(bytes),
        Err(e) => {
            drop(file);
            let _ = fs::remove_file(path);
            Err(e)
        }
    }
}

impl Downloader for HttpDownloader {
    fn download(&self, window: &dyn HostWindow, url: &str) -> Result<(), CtxMenuError> {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(CtxMenuError::download("Only http(s) URLs can be downloaded", url));
        }

        tracing::debug!(window = %window.id(), url, "Starting download");
        if !self.background {
            return self.fetch(url).map(|_| ());
        }

        let downloader = self.clone();
        let target = url.to_string();
        thread::Builder::new()
            .name("ctxmenu-download".into())
            .spawn(move || {
                if let Err(e) = downloader.fetch(&target) {
                    tracing::warn!(url = %target, error = %e, "Download failed");
                }
            })
            .map_err(|e| CtxMenuError::download_with_source("Failed to start download", url, e))?;
        Ok(())
    }
}

/// HTTP agent using the platform TLS stack and root certificates.
fn agent() -> Agent {
    let tls_config = TlsConfig::builder()
        .provider(TlsProvider::NativeTls)
        .root_certs(RootCerts::PlatformVerifier)
        .build();

    Agent::config_builder().tls_config(tls_config).build().into()
}

/// Last path segment of `url`, without query or fragment.
pub fn file_name_for(url: &str) -> String {
    let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    let path = without_scheme.split(['?', '#']).next().unwrap_or_default();

    // The first segment is the host.
    let name = path
        .split('/')
        .skip(1)
        .filter(|segment| !segment.is_empty())
        .last()
        .map(|segment| urlencoding::decode(segment).map_or(segment.into(), |d| d.into_owned()))
        .map(|segment| segment.replace(['/', '\\', ':'], "_"))
        .filter(|segment| segment != "." && segment != "..");

    name.unwrap_or_else(|| FALLBACK_FILE_NAME.to_string())
}

/// `dir/name`, or `dir/stem (n).ext` if that already exists.
fn unique_path(dir: &Path, name: &str) -> PathBuf {
    let candidate = dir.join(name);
    if !candidate.exists() {
        return candidate;
    }

    let (stem, ext) = match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (name, None),
    };

    (1..)
        .map(|n| match ext {
            Some(ext) => dir.join(format!("{stem} ({n}).{ext}")),
            None => dir.join(format!("{stem} ({n})")),
        })
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_name_from_last_segment() {
        assert_eq!(file_name_for("https://example.com/img/cat.png"), "cat.png");
        assert_eq!(file_name_for("https://example.com/img/cat.png?size=large#top"), "cat.png");
        assert_eq!(file_name_for("https://example.com/img/"), "img");
        assert_eq!(file_name_for("https://example.com/a%20b.jpg"), "a b.jpg");
    }

    #[test]
    fn test_file_name_fallback() {
        assert_eq!(file_name_for("https://example.com"), FALLBACK_FILE_NAME);
        assert_eq!(file_name_for("https://example.com/"), FALLBACK_FILE_NAME);
        assert_eq!(file_name_for("https://example.com/.."), FALLBACK_FILE_NAME);
    }

    #[test]
    fn test_unique_path_does_not_overwrite() {
        let dir = TempDir::new().unwrap();
        assert_eq!(unique_path(dir.path(), "cat.png"), dir.path().join("cat.png"));

        fs::write(dir.path().join("cat.png"), b"1").unwrap();
        assert_eq!(unique_path(dir.path(), "cat.png"), dir.path().join("cat (1).png"));

        fs::write(dir.path().join("cat (1).png"), b"2").unwrap();
        assert_eq!(unique_path(dir.path(), "cat.png"), dir.path().join("cat (2).png"));

        fs::write(dir.path().join("README"), b"3").unwrap();
        assert_eq!(unique_path(dir.path(), "README"), dir.path().join("README (1)"));
    }

    struct FailingReader {
        sent: bool,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.sent {
                return Err(io::Error::new(io::ErrorKind::ConnectionReset, "connection reset"));
            }
            self.sent = true;
            buf[..4].copy_from_slice(b"part");
            Ok(4)
        }
    }

    #[test]
    fn test_save_stream_writes_body() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cat.png");

        let written = save_stream(&mut io::Cursor::new(b"image bytes".to_vec()), &path).unwrap();

        assert_eq!(written, 11);
        assert_eq!(fs::read(&path).unwrap(), b"image bytes");
    }

    #[test]
    fn test_save_stream_removes_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cat.png");

        let err = save_stream(&mut FailingReader { sent: false }, &path).unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::ConnectionReset);
        assert!(!path.exists());
    }

    #[test]
    fn test_save_stream_never_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cat.png");
        fs::write(&path, b"original").unwrap();

        let err = save_stream(&mut io::Cursor::new(b"new".to_vec()), &path).unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert_eq!(fs::read(&path).unwrap(), b"original");
    }

    #[test]
    fn test_with_dir() {
        let dir = TempDir::new().unwrap();
        let downloader = HttpDownloader::with_dir(dir.path());
        assert_eq!(downloader.dir(), dir.path());
        assert!(downloader.background);
        assert!(!downloader.foreground().background);
    }
}
