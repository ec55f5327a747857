use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use docqa_engine::{
    Backend, BackendError, EngineEvent, EngineHandle, FailureKind, UploadedFile,
};

const WAIT: Duration = Duration::from_secs(5);

#[derive(Default)]
struct FakeBackend {
    uploads: Mutex<Vec<UploadedFile>>,
    questions: Mutex<Vec<(String, String)>>,
    fail_asks: bool,
}

#[async_trait::async_trait]
impl Backend for FakeBackend {
    async fn upload(&self, file: UploadedFile) -> Result<String, BackendError> {
        let context = String::from_utf8_lossy(&file.bytes).to_uppercase();
        self.uploads.lock().unwrap().push(file);
        Ok(context)
    }

    async fn ask(&self, context: &str, question: &str) -> Result<String, BackendError> {
        self.questions
            .lock()
            .unwrap()
            .push((context.to_string(), question.to_string()));
        if self.fail_asks {
            return Err(BackendError {
                kind: FailureKind::HttpStatus(503),
                message: "unavailable".to_string(),
            });
        }
        Ok(format!("{question} -> {context}"))
    }
}

fn write_temp(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn upload_reads_file_and_reports_context() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = write_temp(&temp, "doc.txt", "hello world");
    let backend = Arc::new(FakeBackend::default());
    let (engine, events) = EngineHandle::with_backend(backend.clone()).unwrap();

    engine.upload(1, path);

    let event = events.recv_timeout(WAIT).expect("upload event");
    assert_eq!(
        event,
        EngineEvent::UploadCompleted {
            request_id: 1,
            result: Ok("HELLO WORLD".to_string()),
        }
    );
    let uploads = backend.uploads.lock().unwrap();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].file_name, "doc.txt");
    assert_eq!(uploads[0].mime_type, "text/plain");
}

#[test]
fn unreadable_file_fails_without_calling_backend() {
    let temp = tempfile::TempDir::new().unwrap();
    let backend = Arc::new(FakeBackend::default());
    let (engine, events) = EngineHandle::with_backend(backend.clone()).unwrap();

    engine.upload(4, temp.path().join("gone.pdf"));

    match events.recv_timeout(WAIT).expect("upload event") {
        EngineEvent::UploadCompleted { request_id, result } => {
            assert_eq!(request_id, 4);
            assert_eq!(result.unwrap_err().kind, FailureKind::Io);
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert!(backend.uploads.lock().unwrap().is_empty());
}

#[test]
fn ask_forwards_context_and_question() {
    let backend = Arc::new(FakeBackend::default());
    let (engine, events) = EngineHandle::with_backend(backend.clone()).unwrap();

    engine.ask(2, "Doc text", "What is this?");

    let event = events.recv_timeout(WAIT).expect("ask event");
    assert_eq!(
        event,
        EngineEvent::AskCompleted {
            request_id: 2,
            result: Ok("What is this? -> Doc text".to_string()),
        }
    );
    assert_eq!(
        backend.questions.lock().unwrap().as_slice(),
        &[("Doc text".to_string(), "What is this?".to_string())]
    );
}

#[test]
fn ask_failure_is_delivered_as_event() {
    let backend = Arc::new(FakeBackend {
        fail_asks: true,
        ..FakeBackend::default()
    });
    let (engine, events) = EngineHandle::with_backend(backend).unwrap();

    engine.ask(3, "Doc text", "Why?");

    match events.recv_timeout(WAIT).expect("ask event") {
        EngineEvent::AskCompleted { request_id, result } => {
            assert_eq!(request_id, 3);
            assert_eq!(result.unwrap_err().kind, FailureKind::HttpStatus(503));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn every_request_completes_once() {
    let backend = Arc::new(FakeBackend::default());
    let (engine, events) = EngineHandle::with_backend(backend).unwrap();

    for request_id in 1..=5 {
        engine.ask(request_id, "ctx", format!("q{request_id}"));
    }

    let mut ids: Vec<_> = (0..5)
        .map(|_| match events.recv_timeout(WAIT).expect("ask event") {
            EngineEvent::AskCompleted { request_id, .. } => request_id,
            other => panic!("unexpected event {other:?}"),
        })
        .collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    assert!(events.try_recv().is_none());
}
