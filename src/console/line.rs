//! Line parser: `@target` expansion and verb/argument splitting.

/// Verb that `@target` lines are routed to.
pub const ROUTED_VERB: &str = "atssh";

/// Target used when the line starts with a bare `@`.
pub const WILDCARD_TARGET: &str = "*";

/// Verb dispatched when input ends (Ctrl-D).
pub const END_OF_INPUT_VERB: &str = "EOF";

/// One input line split into verb and arguments.
///
/// `line` is the text after target expansion, untouched otherwise. `args` is
/// everything after the verb with leading and trailing whitespace trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub verb: String,
    pub args: String,
    pub line: String,
}

impl ParsedCommand {
    /// Command produced when the line editor reports end of input.
    pub fn end_of_input() -> Self {
        Self {
            verb: END_OF_INPUT_VERB.to_string(),
            args: String::new(),
            line: END_OF_INPUT_VERB.to_string(),
        }
    }

    /// Empty or whitespace-only input: nothing to dispatch.
    pub fn is_empty(&self) -> bool {
        self.verb.is_empty()
    }
}

/// Parse a raw line. Never fails; unknown verbs are the dispatcher's concern.
pub fn parse(raw_line: &str) -> ParsedCommand {
    let line = expand_target(raw_line);
    let trimmed = line.trim();

    if let Some(rest) = trimmed.strip_prefix('?') {
        return ParsedCommand {
            verb: "help".to_string(),
            args: rest.trim().to_string(),
            line,
        };
    }

    let (verb, args) = match trimmed.split_once(char::is_whitespace) {
        Some((verb, args)) => (verb, args.trim()),
        None => (trimmed, ""),
    };

    ParsedCommand {
        verb: verb.to_string(),
        args: args.to_string(),
        line,
    }
}

/// Rewrite `@target rest` into `atssh target rest`.
///
/// A first token of exactly `@` routes to the wildcard target. The single
/// separator after the first token is consumed; any further whitespace in the
/// remainder is kept as typed. Lines not starting with `@` come back unchanged.
pub fn expand_target(raw_line: &str) -> String {
    let trimmed = raw_line.trim_start();
    if !trimmed.starts_with('@') {
        return raw_line.to_string();
    }

    let first = trimmed.split_whitespace().next().unwrap_or("@");
    let remainder = &trimmed[first.len()..];
    let remainder = remainder
        .strip_prefix(|c: char| c.is_whitespace())
        .unwrap_or(remainder);

    if first.len() == 1 {
        format!("{} {} {}", ROUTED_VERB, WILDCARD_TARGET, remainder)
    } else {
        format!("{} {} {} ", ROUTED_VERB, &first[1..], remainder)
    }
}
