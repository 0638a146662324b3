//! Statically declared built-in verbs and their help texts.

use crate::console::line::END_OF_INPUT_VERB;

/// One row of the built-in table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinVerb {
    pub builtin: Builtin,
    pub name: &'static str,
    pub help: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    EndOfInput,
    Exit,
    Help,
}

/// Built-in verbs in help-summary order.
pub const BUILTINS: &[BuiltinVerb] = &[
    BuiltinVerb {
        builtin: Builtin::EndOfInput,
        name: END_OF_INPUT_VERB,
        help: "EOF/Ctrl D - exit dust shell",
    },
    BuiltinVerb {
        builtin: Builtin::Exit,
        name: "exit",
        help: "exit - exit dust shell",
    },
    BuiltinVerb {
        builtin: Builtin::Help,
        name: "help",
        help: "help [cmd] - Show help on command cmd.\n\
               Without an argument, lists built-in commands followed by the\n\
               commands contributed by each loaded command module.",
    },
];

impl Builtin {
    pub fn from_verb(verb: &str) -> Option<Builtin> {
        BUILTINS
            .iter()
            .find(|entry| entry.name == verb)
            .map(|entry| entry.builtin)
    }
}
