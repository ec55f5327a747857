use std::sync::mpsc;
use std::thread;

use docqa_core::{Effect, Msg};
use docqa_engine::{BackendSettings, EngineError, EngineEvent, EngineEvents, EngineHandle};
use docqa_logging::{docqa_info, docqa_warn};

use super::app::AppEvent;

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: BackendSettings, tx: mpsc::Sender<AppEvent>) -> Result<Self, EngineError> {
        let (engine, events) = EngineHandle::new(settings)?;
        spawn_event_loop(events, tx);
        Ok(Self { engine })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::UploadFile { request_id, path } => {
                    docqa_info!("UploadFile request_id={} path={}", request_id, path.display());
                    self.engine.upload(request_id, path);
                }
                Effect::Ask {
                    request_id,
                    context,
                    question,
                } => {
                    docqa_info!(
                        "Ask request_id={} context_len={} question_len={}",
                        request_id,
                        context.len(),
                        question.len()
                    );
                    self.engine.ask(request_id, context, question);
                }
            }
        }
    }
}

fn spawn_event_loop(events: EngineEvents, tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        while let Some(event) = events.recv() {
            if tx.send(AppEvent::Core(map_event(event))).is_err() {
                break;
            }
        }
    });
}

/// Folds backend failures into the core's per-operation failure messages.
/// The detail only goes to the log.
pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::UploadCompleted { request_id, result } => match result {
            Ok(context) => Msg::UploadSucceeded {
                request_id,
                context,
            },
            Err(err) => {
                docqa_warn!("Upload {} failed: {}", request_id, err);
                Msg::UploadFailed { request_id }
            }
        },
        EngineEvent::AskCompleted { request_id, result } => match result {
            Ok(answer) => Msg::AskSucceeded { request_id, answer },
            Err(err) => {
                docqa_warn!("Ask {} failed: {}", request_id, err);
                Msg::AskFailed { request_id }
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use docqa_engine::{BackendError, FailureKind};

    use super::*;

    #[test]
    fn successful_events_carry_payload() {
        let msg = map_event(EngineEvent::UploadCompleted {
            request_id: 1,
            result: Ok("Hello world".to_string()),
        });
        assert_eq!(
            msg,
            Msg::UploadSucceeded {
                request_id: 1,
                context: "Hello world".to_string(),
            }
        );

        let msg = map_event(EngineEvent::AskCompleted {
            request_id: 2,
            result: Ok("A test document.".to_string()),
        });
        assert_eq!(
            msg,
            Msg::AskSucceeded {
                request_id: 2,
                answer: "A test document.".to_string(),
            }
        );
    }

    #[test]
    fn every_failure_kind_folds_into_one_message() {
        for kind in [
            FailureKind::Network,
            FailureKind::HttpStatus(500),
            FailureKind::InvalidResponse,
            FailureKind::Io,
        ] {
            let err = BackendError {
                kind,
                message: "detail".to_string(),
            };
            assert_eq!(
                map_event(EngineEvent::UploadCompleted {
                    request_id: 3,
                    result: Err(err.clone()),
                }),
                Msg::UploadFailed { request_id: 3 }
            );
            assert_eq!(
                map_event(EngineEvent::AskCompleted {
                    request_id: 4,
                    result: Err(err),
                }),
                Msg::AskFailed { request_id: 4 }
            );
        }
    }
}
