//! DocQA core: pure state machine and view-model helpers.
mod effect;
mod file_filter;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use file_filter::{is_accepted_file, ACCEPTED_EXTENSIONS};
pub use msg::Msg;
pub use state::{
    AppState, RequestId, ASK_FAILED_MESSAGE, ASK_VALIDATION_MESSAGE, UPLOAD_FAILED_MESSAGE,
};
pub use update::update;
pub use view_model::{AppViewModel, FILE_PLACEHOLDER};
