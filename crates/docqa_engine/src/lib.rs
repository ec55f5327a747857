//! DocQA engine: backend client and request execution.
mod backend;
mod engine;
mod file;
mod types;

pub use backend::{
    Backend, BackendSettings, ReqwestBackend, ASK_ENDPOINT, DEFAULT_BASE_URL, UPLOAD_ENDPOINT,
};
pub use engine::{EngineError, EngineEvents, EngineHandle};
pub use file::mime_type_for;
pub use types::{BackendError, EngineEvent, FailureKind, RequestId, UploadedFile};
