//! Line commands typed into the console.

use shared::domain::{OrderId, OrderStatus};
use thiserror::Error;

pub const HELP: &str = "\
commands:
  item <text>      set the draft item
  price <text>     set the draft price (blank or invalid means 0)
  add [item]       create an order from the draft (optionally setting the item first)
  confirm <id>     mark an order CONFIRMED
  delete <id>      delete an order
  show <id>        fetch one order from the server
  status <STATUS>  list orders with a status, straight from the server
  search <text>    server-side search by item
  filter [text]    filter by item or id; no text clears the filter
  refresh          reload orders
  counts           server-side status counts
  dismiss          clear the error banner
  help             this text
  quit             exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    SetItem(String),
    SetPrice(String),
    Add(Option<String>),
    Confirm(OrderId),
    Delete(OrderId),
    Show(OrderId),
    ByStatus(OrderStatus),
    Search(String),
    Filter(String),
    Refresh,
    Counts,
    Dismiss,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command '{0}'; type 'help' for a list")]
    Unknown(String),
    #[error("'{0}' needs an order id")]
    MissingId(&'static str),
    #[error("'{0}' is not an order id")]
    InvalidId(String),
    #[error("'{0}' needs a value")]
    MissingValue(&'static str),
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<ConsoleCommand>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "item" => ConsoleCommand::SetItem(rest.to_string()),
        "price" => ConsoleCommand::SetPrice(rest.to_string()),
        "add" | "create" => {
            ConsoleCommand::Add((!rest.is_empty()).then(|| rest.to_string()))
        }
        "confirm" => ConsoleCommand::Confirm(parse_id("confirm", rest)?),
        "delete" | "rm" => ConsoleCommand::Delete(parse_id("delete", rest)?),
        "show" | "get" => ConsoleCommand::Show(parse_id("show", rest)?),
        "status" => ConsoleCommand::ByStatus(OrderStatus::from(
            required("status", rest)?.to_ascii_uppercase(),
        )),
        "search" | "find" => ConsoleCommand::Search(required("search", rest)?.to_string()),
        "filter" => ConsoleCommand::Filter(rest.to_string()),
        "refresh" | "reload" => ConsoleCommand::Refresh,
        "counts" | "stats" => ConsoleCommand::Counts,
        "dismiss" => ConsoleCommand::Dismiss,
        "help" | "?" => ConsoleCommand::Help,
        "quit" | "exit" | "q" => ConsoleCommand::Quit,
        _ => return Err(CommandError::Unknown(verb.to_string())),
    };
    Ok(Some(command))
}

fn required<'a>(command: &'static str, raw: &'a str) -> Result<&'a str, CommandError> {
    if raw.is_empty() {
        return Err(CommandError::MissingValue(command));
    }
    Ok(raw)
}

fn parse_id(command: &'static str, raw: &str) -> Result<OrderId, CommandError> {
    let raw = raw.trim().trim_start_matches('#');
    if raw.is_empty() {
        return Err(CommandError::MissingId(command));
    }
    raw.parse::<i64>()
        .map(OrderId)
        .map_err(|_| CommandError::InvalidId(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_line_is_not_a_command() {
        assert_eq!(parse_command("   "), Ok(None));
    }

    #[test]
    fn keeps_item_text_with_spaces() {
        assert_eq!(
            parse_command("item  Blue widget  "),
            Ok(Some(ConsoleCommand::SetItem("Blue widget".into())))
        );
        assert_eq!(
            parse_command("add Red bolt"),
            Ok(Some(ConsoleCommand::Add(Some("Red bolt".into()))))
        );
        assert_eq!(parse_command("ADD"), Ok(Some(ConsoleCommand::Add(None))));
    }

    #[test]
    fn parses_ids_with_optional_hash() {
        assert_eq!(
            parse_command("confirm 12"),
            Ok(Some(ConsoleCommand::Confirm(OrderId(12))))
        );
        assert_eq!(
            parse_command("delete #3"),
            Ok(Some(ConsoleCommand::Delete(OrderId(3))))
        );
    }

    #[test]
    fn id_errors_are_reported() {
        assert_eq!(
            parse_command("confirm"),
            Err(CommandError::MissingId("confirm"))
        );
        assert_eq!(
            parse_command("show abc"),
            Err(CommandError::InvalidId("abc".into()))
        );
    }

    #[test]
    fn status_and_search_take_a_value() {
        assert_eq!(
            parse_command("status confirmed"),
            Ok(Some(ConsoleCommand::ByStatus(OrderStatus::Confirmed)))
        );
        assert_eq!(
            parse_command("status on_hold"),
            Ok(Some(ConsoleCommand::ByStatus(OrderStatus::Other(
                "ON_HOLD".into()
            ))))
        );
        assert_eq!(
            parse_command("search blue widget"),
            Ok(Some(ConsoleCommand::Search("blue widget".into())))
        );
        assert_eq!(
            parse_command("search"),
            Err(CommandError::MissingValue("search"))
        );
        assert_eq!(
            parse_command("status"),
            Err(CommandError::MissingValue("status"))
        );
    }

    #[test]
    fn filter_without_text_clears() {
        assert_eq!(
            parse_command("filter"),
            Ok(Some(ConsoleCommand::Filter(String::new())))
        );
    }

    #[test]
    fn unknown_verb_is_rejected() {
        assert_eq!(
            parse_command("launch rockets"),
            Err(CommandError::Unknown("launch".into()))
        );
    }
}
