use std::path::Path;

use crate::{
    AppState, Effect, Msg, ASK_FAILED_MESSAGE, ASK_VALIDATION_MESSAGE, UPLOAD_FAILED_MESSAGE,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FileSelected { path } => {
            // The label follows the selection even if the upload later fails.
            state.set_file_name(Some(display_name(&path)));
            let request_id = state.begin_upload();
            vec![Effect::UploadFile { request_id, path }]
        }
        Msg::FileSelectionCancelled => {
            state.set_file_name(None);
            Vec::new()
        }
        Msg::QuestionChanged(question) => {
            state.set_question(question);
            Vec::new()
        }
        Msg::AskClicked => {
            if state.context().is_empty() || state.question().is_empty() {
                state.set_error(ASK_VALIDATION_MESSAGE);
                return (state, Vec::new());
            }
            let request_id = state.begin_ask();
            vec![Effect::Ask {
                request_id,
                context: state.context().to_string(),
                question: state.question().to_string(),
            }]
        }
        Msg::UploadSucceeded {
            request_id,
            context,
        } => {
            if state.settle_upload(request_id) {
                state.set_context(context);
                state.clear_error();
            }
            Vec::new()
        }
        Msg::UploadFailed { request_id } => {
            if state.settle_upload(request_id) {
                state.set_error(UPLOAD_FAILED_MESSAGE);
            }
            Vec::new()
        }
        Msg::AskSucceeded { request_id, answer } => {
            if state.settle_ask(request_id) {
                state.set_answer(answer);
                state.clear_error();
            }
            Vec::new()
        }
        Msg::AskFailed { request_id } => {
            if state.settle_ask(request_id) {
                state.set_error(ASK_FAILED_MESSAGE);
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
