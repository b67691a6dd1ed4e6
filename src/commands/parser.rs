//! Parser for bot commands in comment text.
//!
//! Extracts structured commands from unstructured GitHub comment text. The
//! parser is pure: it never fails, and malformed input simply produces
//! fewer (or no) commands.

use std::sync::LazyLock;

use regex::Regex;

use super::types::{Command, ParsedCommands};

/// The easter-egg trigger: "barrel roll", "barrel-roll", "barrelroll", any case.
static BARREL_ROLL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)barrel(?:-|\s+)?roll").expect("valid barrel-roll regex"));

/// Extracts commands addressed to one bot handle.
///
/// # Parsing Rules
///
/// - Every line containing `@{handle}` followed by whitespace yields one
///   command. The mention is case-insensitive (like GitHub mentions); the
///   rest of the line is split on whitespace into the command name and its
///   arguments.
/// - Commands keep the order in which their lines appear.
/// - Text without a mention yields no commands, even if it contains the
///   barrel-roll trigger.
/// - If the text mentions the bot and the barrel-roll trigger appears
///   anywhere in it, the result is exactly one `barrel-roll` command.
///
/// # Examples
///
/// ```
/// use nodeschool_bot::commands::{Command, CommandParser, ParsedCommands};
///
/// let parser = CommandParser::new("nodeschoolbot").unwrap();
///
/// assert_eq!(
///     parser.parse(Some("please\n@nodeschoolbot create-repo nyc")),
///     ParsedCommands::Commands(vec![Command::new("create-repo", ["nyc"])])
/// );
/// assert_eq!(parser.parse(Some("no mention here")), ParsedCommands::NoneRecognized);
/// assert_eq!(parser.parse(None), ParsedCommands::NoText);
/// ```
#[derive(Debug, Clone)]
pub struct CommandParser {
    handle: String,
    mention: Regex,
}

impl CommandParser {
    /// Creates a parser for the given bot handle (without the `@`).
    pub fn new(handle: &str) -> Result<Self, regex::Error> {
        // `[^\S\n]` is whitespace other than a newline, so a bare mention at
        // the end of a line never swallows the following line.
        let pattern = format!(r"(?i)@{}[^\S\n]([^\n]*)", regex::escape(handle));
        Ok(CommandParser {
            handle: handle.to_string(),
            mention: Regex::new(&pattern)?,
        })
    }

    /// The bot handle this parser looks for.
    pub fn handle(&self) -> &str {
        &self.handle
    }

    /// Parses all commands in a comment body.
    pub fn parse(&self, text: Option<&str>) -> ParsedCommands {
        let text = match text {
            Some(text) if !text.is_empty() => text,
            _ => return ParsedCommands::NoText,
        };

        let commands: Vec<Command> = self
            .mention
            .captures_iter(text)
            .map(|caps| split_command(caps.get(1).map_or("", |m| m.as_str())))
            .collect();

        if commands.is_empty() {
            ParsedCommands::NoneRecognized
        } else if BARREL_ROLL.is_match(text) {
            ParsedCommands::Commands(vec![Command::barrel_roll()])
        } else {
            ParsedCommands::Commands(commands)
        }
    }
}

/// Splits the remainder of a mention line into a command name and arguments.
fn split_command(rest: &str) -> Command {
    let mut tokens = rest.split_whitespace();
    let name = tokens.next().unwrap_or_default();
    Command::new(name, tokens)
}
