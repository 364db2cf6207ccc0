//! Saving downloaded transaction pages.

use std::path::{Path, PathBuf};

use encoding_rs::Encoding;

/// Creates `dir` (and its parents) if it does not exist.
pub async fn ensure_output_dir(dir: &Path) -> std::io::Result<()> {
    tokio::fs::create_dir_all(dir).await
}

/// `<dir>/<issuer_id>.html`
pub fn output_path(dir: &Path, issuer_id: &str) -> PathBuf {
    dir.join(format!("{issuer_id}.html"))
}

/// Writes `html` to `path` in the given encoding.
///
/// Characters the encoding cannot represent are written as HTML numeric
/// character references.
pub async fn write_html(html: &str, encoding: &'static Encoding, path: &Path) -> std::io::Result<()> {
    let (bytes, _, unmappable) = encoding.encode(html);
    if unmappable {
        log::warn!(
            "{} has characters outside {}; wrote them as character references",
            path.display(),
            encoding.name()
        );
    }
    tokio::fs::write(path, &bytes).await
}
