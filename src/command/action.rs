//! Action-list grammar.
//!
//! A body such as `reload(ls -la)+change-prompt[> ]+first` is a `+`-separated
//! list of actions. Each action is a name optionally followed by an argument in
//! `()`, `[]` or `{}`, or by `:` which takes the rest of the input.

use crate::command::{CommandParser, GrammarError};

const KNOWN_ACTIONS: &[&str] = &[
    "abort",
    "accept",
    "accept-non-empty",
    "backward-char",
    "backward-delete-char",
    "backward-kill-word",
    "backward-word",
    "beginning-of-line",
    "change-header",
    "change-preview",
    "change-preview-window",
    "change-prompt",
    "change-query",
    "clear-query",
    "clear-screen",
    "clear-selection",
    "delete-char",
    "deselect",
    "deselect-all",
    "disable-search",
    "down",
    "enable-search",
    "end-of-line",
    "execute",
    "execute-silent",
    "first",
    "forward-char",
    "forward-word",
    "hide-preview",
    "ignore",
    "jump",
    "kill-line",
    "kill-word",
    "last",
    "next-history",
    "page-down",
    "page-up",
    "pos",
    "prev-history",
    "preview",
    "preview-down",
    "preview-up",
    "put",
    "refresh-preview",
    "reload",
    "select",
    "select-all",
    "show-preview",
    "toggle",
    "toggle-all",
    "toggle-preview",
    "toggle-search",
    "toggle-sort",
    "transform-query",
    "unix-line-discard",
    "up",
];

/// A single parsed action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// Lowercased action name.
    pub name: String,
    pub argument: Option<String>,
}

impl Action {
    pub fn new(name: impl Into<String>, argument: Option<&str>) -> Self {
        Self {
            name: name.into(),
            argument: argument.map(str::to_string),
        }
    }
}

/// Parser for `+`-separated action lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionParser;

impl ActionParser {
    pub fn new() -> Self {
        Self
    }

    pub fn is_known(name: &str) -> bool {
        KNOWN_ACTIONS.binary_search(&name).is_ok()
    }
}

fn closing_delimiter(open: char) -> Option<char> {
    match open {
        '(' => Some(')'),
        '[' => Some(']'),
        '{' => Some('}'),
        _ => None,
    }
}

impl CommandParser for ActionParser {
    type Command = Action;

    fn parse(&self, input: &str) -> Result<Vec<Action>, GrammarError> {
        let mut actions = Vec::new();
        let mut rest = input;

        while !rest.is_empty() {
            let name_end = rest
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
                .unwrap_or(rest.len());
            if name_end == 0 {
                return Err(GrammarError(format!("invalid action: {rest}")));
            }

            let name = rest[..name_end].to_ascii_lowercase();
            if !Self::is_known(&name) {
                return Err(GrammarError(format!("unknown action: {name}")));
            }
            rest = &rest[name_end..];

            let argument = match rest.chars().next() {
                None | Some('+') => None,
                Some(':') => {
                    let argument = &rest[1..];
                    rest = "";
                    Some(argument)
                }
                Some(open) => {
                    let Some(close) = closing_delimiter(open) else {
                        return Err(GrammarError(format!("invalid action: {name}{rest}")));
                    };
                    let inner = &rest[open.len_utf8()..];
                    let Some(end) = inner.find(close) else {
                        return Err(GrammarError(format!("unterminated argument for {name}")));
                    };
                    rest = &inner[end + close.len_utf8()..];
                    Some(&inner[..end])
                }
            };

            actions.push(Action::new(name, argument));

            if let Some(next) = rest.strip_prefix('+') {
                if next.is_empty() {
                    return Err(GrammarError::new("empty action"));
                }
                rest = next;
            } else if !rest.is_empty() {
                return Err(GrammarError(format!("invalid action: {rest}")));
            }
        }

        Ok(actions)
    }
}
