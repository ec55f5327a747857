use std::path::PathBuf;

/// IO requested by `update`; executed outside the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    UploadFile {
        request_id: crate::RequestId,
        path: PathBuf,
    },
    Ask {
        request_id: crate::RequestId,
        context: String,
        question: String,
    },
}
