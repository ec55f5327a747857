use crate::view_model::{AppViewModel, FILE_PLACEHOLDER};

/// Tags each upload/ask request so superseded replies can be dropped.
pub type RequestId = u64;

pub const UPLOAD_FAILED_MESSAGE: &str = "Failed to upload file";
pub const ASK_FAILED_MESSAGE: &str = "Failed to get answer";
pub const ASK_VALIDATION_MESSAGE: &str = "Please upload a file and enter a question";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    file_name: Option<String>,
    context: String,
    question: String,
    answer: String,
    error: String,
    last_request_id: RequestId,
    pending_upload: Option<RequestId>,
    pending_ask: Option<RequestId>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            file_label: self
                .file_name
                .clone()
                .unwrap_or_else(|| FILE_PLACEHOLDER.to_string()),
            context: self.context.clone(),
            question: self.question.clone(),
            answer: self.answer.clone(),
            error: self.error.clone(),
            upload_pending: self.pending_upload.is_some(),
            ask_pending: self.pending_ask.is_some(),
            dirty: self.dirty,
        }
    }

    /// Returns whether the state changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_file_name(&mut self, name: Option<String>) {
        self.file_name = name;
        self.mark_dirty();
    }

    pub(crate) fn set_question(&mut self, question: String) {
        self.question = question;
        self.mark_dirty();
    }

    pub(crate) fn set_context(&mut self, context: String) {
        self.context = context;
        self.mark_dirty();
    }

    pub(crate) fn set_answer(&mut self, answer: String) {
        self.answer = answer;
        self.mark_dirty();
    }

    pub(crate) fn set_error(&mut self, message: &str) {
        self.error = message.to_string();
        self.mark_dirty();
    }

    pub(crate) fn clear_error(&mut self) {
        self.error.clear();
        self.mark_dirty();
    }

    pub(crate) fn begin_upload(&mut self) -> RequestId {
        let request_id = self.next_request_id();
        self.pending_upload = Some(request_id);
        self.mark_dirty();
        request_id
    }

    pub(crate) fn begin_ask(&mut self) -> RequestId {
        let request_id = self.next_request_id();
        self.pending_ask = Some(request_id);
        self.mark_dirty();
        request_id
    }

    /// Settles the outstanding upload if `request_id` is the latest one issued.
    /// Returns false for superseded or unknown replies.
    pub(crate) fn settle_upload(&mut self, request_id: RequestId) -> bool {
        settle(&mut self.pending_upload, request_id)
    }

    /// Settles the outstanding ask if `request_id` is the latest one issued.
    pub(crate) fn settle_ask(&mut self, request_id: RequestId) -> bool {
        settle(&mut self.pending_ask, request_id)
    }

    fn next_request_id(&mut self) -> RequestId {
        self.last_request_id += 1;
        self.last_request_id
    }
}

fn settle(pending: &mut Option<RequestId>, request_id: RequestId) -> bool {
    if *pending == Some(request_id) {
        *pending = None;
        true
    } else {
        false
    }
}
