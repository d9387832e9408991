use crate::view::state::{Phase, ViewState};

pub const HELP: &str = "\
Commands:
  <text> | /search <text>   search the catalog
  /open <n>                 show details for card n
  /close                    close the detail view
  /retry                    repeat the request that failed
  /dismiss                  hide the error banner
  /help                     show this help
  /quit                     exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    /// One-based card number as shown on screen.
    Open(usize),
    Close,
    Retry,
    Dismiss,
    Help,
    Quit,
    Empty,
    Invalid(String),
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }
    if !line.starts_with('/') {
        return Command::Search(line.to_string());
    }

    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };

    match name {
        "/search" | "/s" => Command::Search(rest.to_string()),
        "/open" | "/o" => match rest.parse::<usize>() {
            Ok(number) if number > 0 => Command::Open(number),
            _ => Command::Invalid(format!("'/open' needs a card number, got '{}'", rest)),
        },
        "/close" | "/c" => Command::Close,
        "/retry" | "/r" => Command::Retry,
        "/dismiss" => Command::Dismiss,
        "/help" | "/h" | "/?" => Command::Help,
        "/quit" | "/q" | "/exit" => Command::Quit,
        other => Command::Invalid(format!("Unknown command '{}'", other)),
    }
}

/// Why `/open <number>` cannot act on the current view, if it cannot.
pub fn open_rejection(state: &ViewState, number: usize) -> Option<String> {
    match state.phase() {
        Phase::Idle => Some("Nothing to open yet; search first".to_string()),
        Phase::Searching => Some("A search is still loading".to_string()),
        Phase::DetailShown => Some("Close the open book first (/close)".to_string()),
        Phase::ResultsShown if number == 0 || number > state.results.len() => {
            Some(format!("No card numbered {}", number))
        }
        Phase::ResultsShown => None,
    }
}
