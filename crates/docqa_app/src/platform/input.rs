use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use docqa_core::{is_accepted_file, Msg, ACCEPTED_EXTENSIONS};
use docqa_logging::docqa_warn;

use super::app::AppEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Open(Option<PathBuf>),
    Ask(Option<String>),
    Question(String),
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(rest) = line.strip_prefix('/') else {
        return Command::Question(line.to_string());
    };
    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };
    let arg = (!arg.is_empty()).then(|| arg.to_string());

    match name {
        "open" => Command::Open(arg.map(PathBuf::from)),
        "ask" => Command::Ask(arg),
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::Question(line.to_string()),
    }
}

/// Maps a command to the events the main loop consumes.
pub fn events_for(command: Command) -> Vec<AppEvent> {
    match command {
        Command::Open(Some(path)) if is_accepted_file(&path) => {
            vec![AppEvent::Core(Msg::FileSelected { path })]
        }
        Command::Open(Some(path)) => vec![AppEvent::Notice(format!(
            "{} is not a .{} file",
            path.display(),
            ACCEPTED_EXTENSIONS.join("/.")
        ))],
        Command::Open(None) => vec![AppEvent::Core(Msg::FileSelectionCancelled)],
        Command::Ask(Some(question)) => vec![
            AppEvent::Core(Msg::QuestionChanged(question)),
            AppEvent::Core(Msg::AskClicked),
        ],
        Command::Ask(None) => vec![AppEvent::Core(Msg::AskClicked)],
        Command::Question(question) => vec![AppEvent::Core(Msg::QuestionChanged(question))],
        Command::Help => vec![AppEvent::Help],
        Command::Quit => vec![AppEvent::Quit],
    }
}

/// Reads stdin line by line on a background thread. EOF quits.
pub fn spawn_stdin_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    docqa_warn!("Failed to read stdin: {}", err);
                    break;
                }
            };
            for event in events_for(parse_command(&line)) {
                if tx.send(event).is_err() {
                    return;
                }
            }
        }
        let _ = tx.send(AppEvent::Quit);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_lines_become_questions() {
        assert_eq!(
            parse_command("What is this?\r"),
            Command::Question("What is this?".to_string())
        );
        assert_eq!(parse_command(""), Command::Question(String::new()));
    }

    #[test]
    fn slash_commands_parse_arguments() {
        assert_eq!(
            parse_command("/open  docs/report.pdf "),
            Command::Open(Some(PathBuf::from("docs/report.pdf")))
        );
        assert_eq!(parse_command("/open"), Command::Open(None));
        assert_eq!(parse_command("/ask"), Command::Ask(None));
        assert_eq!(
            parse_command("/ask Who signed it?"),
            Command::Ask(Some("Who signed it?".to_string()))
        );
        assert_eq!(parse_command("/help"), Command::Help);
        assert_eq!(parse_command("/quit"), Command::Quit);
    }

    #[test]
    fn unknown_command_is_kept_as_question() {
        assert_eq!(
            parse_command("/usr/bin is a path"),
            Command::Question("/usr/bin is a path".to_string())
        );
    }

    #[test]
    fn picker_only_offers_txt_and_pdf() {
        let events = events_for(Command::Open(Some(PathBuf::from("notes.TXT"))));
        assert_eq!(
            events,
            vec![AppEvent::Core(Msg::FileSelected {
                path: PathBuf::from("notes.TXT")
            })]
        );

        let events = events_for(Command::Open(Some(PathBuf::from("slides.pptx"))));
        assert!(matches!(events.as_slice(), [AppEvent::Notice(_)]));
    }

    #[test]
    fn ask_with_text_sets_question_first() {
        let events = events_for(Command::Ask(Some("Why?".to_string())));
        assert_eq!(
            events,
            vec![
                AppEvent::Core(Msg::QuestionChanged("Why?".to_string())),
                AppEvent::Core(Msg::AskClicked),
            ]
        );
    }
}
