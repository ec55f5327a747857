use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked a file to upload.
    FileSelected { path: PathBuf },
    /// User dismissed the file picker without choosing a file.
    FileSelectionCancelled,
    /// User edited the question input.
    QuestionChanged(String),
    /// User clicked Ask.
    AskClicked,
    /// Backend accepted the upload and returned the extracted text.
    UploadSucceeded {
        request_id: crate::RequestId,
        context: String,
    },
    /// Upload failed (transport, HTTP status, local read or malformed reply).
    UploadFailed { request_id: crate::RequestId },
    /// Backend answered the question.
    AskSucceeded {
        request_id: crate::RequestId,
        answer: String,
    },
    /// Ask failed (transport, HTTP status or malformed reply).
    AskFailed { request_id: crate::RequestId },
    /// Fallback for placeholder wiring.
    NoOp,
}
