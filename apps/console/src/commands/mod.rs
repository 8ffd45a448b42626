//! # Console Commands
//!
//! One input line is one command. Parsing and execution are separate so the
//! parser can be tested without a session.
//!
//! ## Command Reference
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Command                          Widget      Effect                    │
//! │  ───────────────────────────────  ──────────  ───────────────────────── │
//! │  calc <tokens...>                 calculator  feed keys, e.g. 12 + 3 =  │
//! │  key <name>                       calculator  one key: Enter, Escape... │
//! │  add <title> | <desc> | <value>   list        new record at the head    │
//! │  remove <id>                      list        delete one record         │
//! │  clear-list                       list        delete every record       │
//! │  list                             list        show records              │
//! │  theme [toggle|light|dark|reset]  theme       show or change the theme  │
//! │  help                             -           this table                │
//! │  quit | exit                      -           leave                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod calculator;
pub mod list;
pub mod theme;

use std::str::FromStr;
use tracing::debug;
use widgetry_core::{CalculatorEvent, NewItem, Theme};

use crate::error::{AppError, AppResult};
use crate::state::Session;

/// Printed by `help`.
pub const HELP: &str = "\
Commands:
  calc <tokens...>                  e.g. calc 12 + 3 =  or  calc 12+3=
  key <name>                        0-9 . + - * / Enter = Backspace Escape Delete
  add <title> | <desc> | <value>    every part optional
  remove <id>
  clear-list
  list
  theme [toggle|light|dark|reset]
  help
  quit";

/// What `theme` should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeAction {
    Show,
    Toggle,
    Set(Theme),
    Reset,
}

/// A parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Calc(Vec<CalculatorEvent>),
    Add(NewItem),
    Remove(u64),
    ClearList,
    List,
    Theme(ThemeAction),
    Help,
    Quit,
}

/// Result of running a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Text to print.
    Output(String),
    /// Leave the input loop.
    Quit,
}

impl FromStr for Command {
    type Err = AppError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        match name {
            "calc" => {
                if rest.is_empty() {
                    return Err(AppError::usage("calc needs at least one key"));
                }
                let mut events = Vec::new();
                for token in rest.split_whitespace() {
                    events.extend(calculator::parse_token(token)?);
                }
                Ok(Command::Calc(events))
            }
            "key" => Ok(Command::Calc(vec![calculator::parse_key(rest)?])),
            "add" => Ok(Command::Add(list::parse_fields(rest))),
            "remove" => rest
                .parse()
                .map(Command::Remove)
                .map_err(|_| AppError::usage(format!("remove needs a numeric id, got '{}'", rest))),
            "clear-list" => Ok(Command::ClearList),
            "list" => Ok(Command::List),
            "theme" => {
                let action = match rest {
                    "" => ThemeAction::Show,
                    "toggle" => ThemeAction::Toggle,
                    "reset" => ThemeAction::Reset,
                    other => ThemeAction::Set(other.parse()?),
                };
                Ok(Command::Theme(action))
            }
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(AppError::usage(format!(
                "Unknown command '{}'. Type `help` for a list.",
                other
            ))),
        }
    }
}

impl Command {
    /// Runs the command against the session.
    ///
    /// A failed write is reported as an error, but the widget keeps the
    /// change in memory.
    pub fn execute(self, session: &mut Session) -> AppResult<Outcome> {
        debug!(command = ?self, "Executing command");

        let output = match self {
            Command::Calc(events) => {
                calculator::apply(&mut session.calculator, &events);
                calculator::render(&session.calculator.display())
            }
            Command::Add(fields) => {
                session.list.add_item(fields)?;
                list::render(&session.list.render())
            }
            Command::Remove(id) => {
                if !session.list.remove_item(id)? {
                    return Err(AppError::not_found("Item", &id.to_string()));
                }
                list::render(&session.list.render())
            }
            Command::ClearList => {
                session.list.clear_all()?;
                list::render(&session.list.render())
            }
            Command::List => list::render(&session.list.render()),
            Command::Theme(action) => {
                match action {
                    ThemeAction::Show => {}
                    ThemeAction::Toggle => {
                        session.theme.toggle()?;
                    }
                    ThemeAction::Set(theme) => {
                        session.theme.set(theme)?;
                    }
                    ThemeAction::Reset => {
                        session.theme.reset()?;
                    }
                }
                theme::render(session.theme.theme())
            }
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(Outcome::Quit),
        };

        Ok(Outcome::Output(output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::{Storage, WidgetryConfig};
    use widgetry_core::{Operator, ITEMS_KEY, THEME_KEY};
    use widgetry_store::{KeyValueStore, MemoryStore};

    fn session_on(backing: &MemoryStore) -> Session {
        Session::with_storage(Storage::Memory(backing.clone()), &WidgetryConfig::default()).unwrap()
    }

    fn run(session: &mut Session, line: &str) -> AppResult<Outcome> {
        line.parse::<Command>()?.execute(session)
    }

    fn output(session: &mut Session, line: &str) -> String {
        match run(session, line).unwrap() {
            Outcome::Output(text) => text,
            Outcome::Quit => panic!("unexpected quit for {line}"),
        }
    }

    #[test]
    fn test_parse_calc_tokens() {
        let cmd: Command = "calc 12 + 3 Enter".parse().unwrap();
        assert_eq!(
            cmd,
            Command::Calc(vec![
                CalculatorEvent::Digit('1'),
                CalculatorEvent::Digit('2'),
                CalculatorEvent::Operator(Operator::Add),
                CalculatorEvent::Digit('3'),
                CalculatorEvent::Equals,
            ])
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("calc".parse::<Command>().unwrap_err().code, ErrorCode::Usage);
        assert_eq!("remove abc".parse::<Command>().unwrap_err().code, ErrorCode::Usage);
        assert_eq!("dance".parse::<Command>().unwrap_err().code, ErrorCode::Usage);
        assert_eq!(
            "theme neon".parse::<Command>().unwrap_err().code,
            ErrorCode::ValidationError
        );
    }

    #[test]
    fn test_parse_theme_actions() {
        assert_eq!("theme".parse::<Command>().unwrap(), Command::Theme(ThemeAction::Show));
        assert_eq!(
            "theme DARK".parse::<Command>().unwrap(),
            Command::Theme(ThemeAction::Set(Theme::Dark))
        );
        assert_eq!("exit".parse::<Command>().unwrap(), Command::Quit);
    }

    #[test]
    fn test_calculator_session() {
        let mut session = session_on(&MemoryStore::new());
        assert!(output(&mut session, "calc 1 + 2 + 3 =").ends_with('6'));
        assert!(output(&mut session, "key 7").ends_with('7'));
        assert!(output(&mut session, "calc 6 / 0 =").ends_with("Error: Div/0"));
        assert!(output(&mut session, "key Escape").ends_with('0'));
    }

    #[test]
    fn test_list_session_persists() {
        let backing = MemoryStore::new();
        let mut session = session_on(&backing);

        let text = output(&mut session, "add Buy milk | Two litres | 2.50");
        assert!(text.contains("Buy milk"));
        assert!(text.contains("Value: 2.50"));
        assert!(backing.get(ITEMS_KEY).unwrap().unwrap().contains("Buy milk"));

        let id = session.list.items()[0].id;
        assert_eq!(output(&mut session, &format!("remove {id}")), list::EMPTY_LIST);
    }

    #[test]
    fn test_remove_unknown_id_is_not_found() {
        let mut session = session_on(&MemoryStore::new());
        let err = run(&mut session, "remove 42").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_add_without_fields_uses_placeholders() {
        let mut session = session_on(&MemoryStore::new());
        let text = output(&mut session, "add");
        assert!(text.contains("Untitled"));
        assert!(text.contains("No description"));
    }

    #[test]
    fn test_clear_list() {
        let backing = MemoryStore::new();
        let mut session = session_on(&backing);
        output(&mut session, "add a");
        output(&mut session, "add b");

        assert_eq!(output(&mut session, "clear-list"), list::EMPTY_LIST);
        assert_eq!(backing.get(ITEMS_KEY).unwrap(), Some("[]".to_string()));
    }

    #[test]
    fn test_theme_session() {
        let backing = MemoryStore::new();
        let mut session = session_on(&backing);

        assert!(output(&mut session, "theme toggle").contains("dark-mode"));
        assert_eq!(backing.get(THEME_KEY).unwrap(), Some("dark".to_string()));

        assert!(output(&mut session, "theme reset").starts_with("Theme: light"));
        assert_eq!(backing.get(THEME_KEY).unwrap(), None);
    }

    #[test]
    fn test_quit() {
        let mut session = session_on(&MemoryStore::new());
        assert_eq!(run(&mut session, "quit").unwrap(), Outcome::Quit);
    }
}
