pub const TITLE: &str = "Q&A Chatbot";
pub const RULE: &str = "----------------------------------------------------------------";
pub const QUESTION_PLACEHOLDER: &str = "Ask a question about the document";
pub const CONTEXT_PREVIEW_LINES: usize = 6;
pub const PREVIEW_LINE_WIDTH: usize = 96;

pub const HELP_LINES: &[&str] = &[
    "/open <path>   upload a .txt or .pdf file",
    "/open          clear the file selection",
    "/ask [text]    ask the current question (or set it first)",
    "/help          show this help",
    "/quit          exit",
    "any other line replaces the question",
];
