use std::path::Path;

/// Extensions offered by the file picker. The backend has the final say.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["txt", "pdf"];

/// Returns true if the picker should offer `path` for upload.
pub fn is_accepted_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ACCEPTED_EXTENSIONS
                .iter()
                .any(|accepted| accepted.eq_ignore_ascii_case(ext))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_txt_and_pdf_in_any_case() {
        assert!(is_accepted_file(Path::new("notes.txt")));
        assert!(is_accepted_file(Path::new("/tmp/Report.PDF")));
    }

    #[test]
    fn rejects_other_or_missing_extensions() {
        assert!(!is_accepted_file(Path::new("slides.pptx")));
        assert!(!is_accepted_file(Path::new("README")));
        assert!(!is_accepted_file(Path::new("archive.txt.gz")));
    }
}
