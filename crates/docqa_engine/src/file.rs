use std::path::Path;

use crate::{BackendError, FailureKind, UploadedFile};

const FALLBACK_MIME: &str = "application/octet-stream";

/// Content type sent with the multipart `file` part.
pub fn mime_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("txt") => "text/plain",
        Some("pdf") => "application/pdf",
        _ => FALLBACK_MIME,
    }
}

impl UploadedFile {
    /// Reads `path` into memory for upload.
    pub async fn read(path: &Path) -> Result<Self, BackendError> {
        let bytes = tokio::fs::read(path).await.map_err(|err| {
            BackendError::new(FailureKind::Io, format!("{}: {err}", path.display()))
        })?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                BackendError::new(
                    FailureKind::Io,
                    format!("{} has no file name", path.display()),
                )
            })?;
        Ok(Self {
            file_name,
            mime_type: mime_type_for(path).to_string(),
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_type_follows_extension() {
        assert_eq!(mime_type_for(Path::new("a.txt")), "text/plain");
        assert_eq!(mime_type_for(Path::new("b.PDF")), "application/pdf");
        assert_eq!(mime_type_for(Path::new("c.docx")), FALLBACK_MIME);
        assert_eq!(mime_type_for(Path::new("noext")), FALLBACK_MIME);
    }
}
