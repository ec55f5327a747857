use std::io;
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use docqa_logging::{docqa_debug, docqa_info};
use thiserror::Error;

use crate::backend::{Backend, BackendSettings, ReqwestBackend};
use crate::{BackendError, EngineEvent, RequestId, UploadedFile};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] io::Error),
    #[error("failed to build backend client: {0}")]
    Client(BackendError),
}

enum EngineCommand {
    Upload { request_id: RequestId, path: PathBuf },
    Ask {
        request_id: RequestId,
        context: String,
        question: String,
    },
}

/// Submits requests to the background runtime. Cheap to clone.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

/// Receiving side for request completions.
pub struct EngineEvents {
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: BackendSettings) -> Result<(Self, EngineEvents), EngineError> {
        docqa_info!("Backend base url: {}", settings.base_url);
        let backend = ReqwestBackend::new(settings).map_err(EngineError::Client)?;
        Self::with_backend(Arc::new(backend))
    }

    /// Runs requests against `backend`; every request gets its own task.
    pub fn with_backend(
        backend: Arc<dyn Backend>,
    ) -> Result<(Self, EngineEvents), EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let backend = backend.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(backend.as_ref(), command, event_tx).await;
                });
            }
            docqa_debug!("Engine command channel closed");
        });

        Ok((Self { cmd_tx }, EngineEvents { event_rx }))
    }

    pub fn upload(&self, request_id: RequestId, path: impl Into<PathBuf>) {
        let _ = self.cmd_tx.send(EngineCommand::Upload {
            request_id,
            path: path.into(),
        });
    }

    pub fn ask(
        &self,
        request_id: RequestId,
        context: impl Into<String>,
        question: impl Into<String>,
    ) {
        let _ = self.cmd_tx.send(EngineCommand::Ask {
            request_id,
            context: context.into(),
            question: question.into(),
        });
    }
}

impl EngineEvents {
    /// Blocks until the next completion; `None` once the engine has shut down.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

async fn handle_command(
    backend: &dyn Backend,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::Upload { request_id, path } => {
            docqa_debug!("Upload #{} path={}", request_id, path.display());
            let result = match UploadedFile::read(&path).await {
                Ok(file) => backend.upload(file).await,
                Err(err) => Err(err),
            };
            EngineEvent::UploadCompleted { request_id, result }
        }
        EngineCommand::Ask {
            request_id,
            context,
            question,
        } => {
            docqa_debug!("Ask #{}", request_id);
            let result = backend.ask(&context, &question).await;
            EngineEvent::AskCompleted { request_id, result }
        }
    };
    let _ = event_tx.send(event);
}
