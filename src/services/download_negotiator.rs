//! Download negotiation: decides where an engine download is written.
//!
//! The engine moves the bytes; this module only picks the destination.

use std::path::PathBuf;

use tracing::debug;

/// Picks destinations inside a fixed downloads directory.
#[derive(Debug, Clone)]
pub struct DownloadNegotiator {
    directory: PathBuf,
}

impl DownloadNegotiator {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Destination for a download the engine suggests saving as `suggested`.
    ///
    /// Returns `None` when no usable file name remains; the caller then
    /// cancels the download. Existing files are never overwritten.
    pub fn destination_for(&self, suggested: &str) -> Option<PathBuf> {
        let Some(name) = sanitize_file_name(suggested) else {
            debug!("rejecting download with unusable name {:?}", suggested);
            return None;
        };

        let candidate = self.directory.join(&name);
        if !candidate.exists() {
            return Some(candidate);
        }

        let (stem, extension) = split_extension(&name);
        (1..)
            .map(|n| match extension {
                Some(ext) => self.directory.join(format!("{} ({}).{}", stem, n, ext)),
                None => self.directory.join(format!("{} ({})", stem, n)),
            })
            .find(|path| !path.exists())
    }
}

/// Keeps only the final path component of `suggested` and strips characters
/// that are not allowed in file names.
pub fn sanitize_file_name(suggested: &str) -> Option<String> {
    let last = suggested
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or_default();

    let cleaned: String = last
        .chars()
        .filter(|c| !c.is_control() && !matches!(c, ':' | '*' | '?' | '"' | '<' | '>' | '|'))
        .collect();
    let cleaned = cleaned.trim().trim_start_matches('.').trim().to_string();

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Splits `archive.tar.gz` into `("archive.tar", Some("gz"))`.
fn split_extension(name: &str) -> (&str, Option<&str>) {
    match name.rfind('.') {
        Some(dot) if dot > 0 && dot + 1 < name.len() => (&name[..dot], Some(&name[dot + 1..])),
        _ => (name, None),
    }
}
