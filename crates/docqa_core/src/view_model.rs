/// Label shown on the upload control before any file is picked.
pub const FILE_PLACEHOLDER: &str = "Upload TXT/PDF File";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub file_label: String,
    pub context: String,
    pub question: String,
    pub answer: String,
    pub error: String,
    pub upload_pending: bool,
    pub ask_pending: bool,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn shows_context(&self) -> bool {
        !self.context.is_empty()
    }

    pub fn shows_error(&self) -> bool {
        !self.error.is_empty()
    }

    pub fn shows_answer(&self) -> bool {
        !self.answer.is_empty()
    }
}
