//! User command parsing

/// A command name and its arguments, borrowed from the user's message.
#[derive(Debug, PartialEq, Eq)]
pub struct ParsedCommand<'a> {
    /// The command name following the prefix.
    pub name: &'a str,
    /// Whitespace-separated arguments.
    pub args: Vec<&'a str>,
}

/// Prefix command parser.
///
/// Extracts a command name and its arguments from a user's message.
///
/// # Example
///
/// ```rust
/// use quotebot::command::CommandParser;
/// let parser = CommandParser::new("!");
/// let command = parser.parse("!quote 1234 no way").unwrap();
/// assert_eq!(command.name, "quote");
/// assert_eq!(command.args, vec!["1234", "no", "way"]);
/// assert_eq!(parser.parse("quote 1234"), None);
/// assert_eq!(parser.parse("! quote"), None);
/// ```
#[derive(Debug, Clone)]
pub struct CommandParser {
    /// The prefix to match against.
    prefix: String,
}

impl CommandParser {
    /// Creates a new parser that expects the given prefix.
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
        }
    }

    /// Checks if the supplied input starts with the prefix immediately followed by a command
    /// name, and if so, returns the name and the arguments.
    #[must_use]
    pub fn parse<'a>(&self, input: &'a str) -> Option<ParsedCommand<'a>> {
        let suffix = input.strip_prefix(&self.prefix)?;

        // The command name must directly follow the prefix.
        if suffix.starts_with(char::is_whitespace) {
            return None;
        }

        let mut tokens = suffix.split_whitespace();
        let name = tokens.next()?;

        Some(ParsedCommand {
            name,
            args: tokens.collect(),
        })
    }
}
