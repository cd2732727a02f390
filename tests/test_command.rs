use cmdport::command::{
    Action, ActionParser, CommandList, CommandParser, GrammarError, commands_from_body, trim_body,
};
use cmdport::error::Rejection;

struct Words;

impl CommandParser for Words {
    type Command = String;

    fn parse(&self, input: &str) -> Result<Vec<String>, GrammarError> {
        if input.contains('!') {
            return Err(GrammarError::new("bang not allowed"));
        }
        Ok(input.split_whitespace().map(str::to_string).collect())
    }
}

struct NonEmpty;

impl CommandParser for NonEmpty {
    type Command = String;

    fn parse(&self, input: &str) -> Result<Vec<String>, GrammarError> {
        if input.is_empty() {
            return Err(GrammarError::new("empty input"));
        }
        Ok(vec![input.to_string()])
    }
}

#[test]
fn test_trim_body_strips_framing_bytes() {
    assert_eq!(trim_body(b"\r\n\r\nup\r\n"), b"up");
    assert_eq!(trim_body(b"\nup down\r"), b"up down");
    assert_eq!(trim_body(b"up\r\ndown"), b"up\r\ndown");
    assert_eq!(trim_body(b"\r\n\r\n"), b"");
    assert_eq!(trim_body(b""), b"");
}

#[test]
fn test_trim_body_keeps_other_whitespace() {
    assert_eq!(trim_body(b" up \r\n"), b" up ");
}

#[test]
fn test_bridge_success_preserves_order() {
    let commands = commands_from_body(&Words, b"\r\nc b a\r\n").unwrap();

    assert_eq!(commands.into_inner(), vec!["c", "b", "a"]);
}

#[test]
fn test_bridge_grammar_error_passes_message() {
    let err = commands_from_body(&Words, b"up!").unwrap_err();

    assert_eq!(err, Rejection::Grammar(GrammarError::new("bang not allowed")));
    assert_eq!(err.to_string(), "bang not allowed");
}

#[test]
fn test_bridge_empty_body_is_no_action() {
    assert_eq!(commands_from_body(&Words, b"").unwrap_err(), Rejection::NoAction);
    assert_eq!(commands_from_body(&Words, b"\r\n").unwrap_err(), Rejection::NoAction);
}

#[test]
fn test_bridge_empty_body_still_reaches_grammar() {
    let err = commands_from_body(&NonEmpty, b"\r\n").unwrap_err();

    assert_eq!(err, Rejection::Grammar(GrammarError::new("empty input")));
    assert_eq!(err.to_string(), "empty input");
}

#[test]
fn test_bridge_empty_parse_is_no_action() {
    let err = commands_from_body(&Words, b"   ").unwrap_err();

    assert_eq!(err, Rejection::NoAction);
    assert_eq!(err.to_string(), "no action specified");
}

#[test]
fn test_command_list_rejects_empty() {
    assert!(CommandList::<u8>::new(vec![]).is_none());

    let list = CommandList::new(vec![1, 2, 3]).unwrap();
    assert_eq!(list.len(), 3);
    assert!(!list.is_empty());
    assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
}

#[test]
fn test_action_single() {
    let actions = ActionParser.parse("up").unwrap();

    assert_eq!(actions, vec![Action::new("up", None)]);
}

#[test]
fn test_action_chain_with_arguments() {
    let actions = ActionParser
        .parse("reload(ls -la)+change-prompt[> ]+put{a+b}+first")
        .unwrap();

    assert_eq!(
        actions,
        vec![
            Action::new("reload", Some("ls -la")),
            Action::new("change-prompt", Some("> ")),
            Action::new("put", Some("a+b")),
            Action::new("first", None),
        ]
    );
}

#[test]
fn test_action_colon_takes_rest() {
    let actions = ActionParser.parse("down+change-query:foo+bar(baz)").unwrap();

    assert_eq!(
        actions,
        vec![
            Action::new("down", None),
            Action::new("change-query", Some("foo+bar(baz)")),
        ]
    );
}

#[test]
fn test_action_names_case_insensitive() {
    let actions = ActionParser.parse("Toggle-Preview").unwrap();

    assert_eq!(actions[0].name, "toggle-preview");
}

#[test]
fn test_action_errors() {
    let cases = [
        ("launch-missiles", "unknown action: launch-missiles"),
        ("reload(ls", "unterminated argument for reload"),
        ("up+", "empty action"),
        ("+up", "invalid action: +up"),
        ("up<x>", "invalid action: up<x>"),
        ("reload(ls)x", "invalid action: x"),
    ];

    for (input, message) in cases {
        let err = ActionParser.parse(input).unwrap_err();
        assert_eq!(err.to_string(), message, "input {input:?}");
    }
}

#[test]
fn test_action_empty_input() {
    assert!(ActionParser.parse("").unwrap().is_empty());
}

#[test]
fn test_action_parser_through_bridge() {
    let commands = commands_from_body(&ActionParser, b"accept\r\n").unwrap();

    assert_eq!(commands.len(), 1);

    let err = commands_from_body(&ActionParser, b"nope").unwrap_err();
    assert_eq!(err.to_string(), "unknown action: nope");
}
