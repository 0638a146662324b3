//! Property-based tests for line parsing and `@target` expansion

use dust::console::line::{expand_target, parse, ROUTED_VERB};
use proptest::prelude::*;

/// Lines that do not start with `@` pass through expansion untouched
#[test]
fn test_plain_lines_unchanged_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&"[^@]\\PC{0,40}", |line| {
            prop_assume!(!line.trim_start().starts_with('@'));
            assert_eq!(expand_target(&line), line);
            assert_eq!(parse(&line).line, line);
            Ok(())
        })
        .unwrap();
}

/// `@target cmd` routes to the target with the command kept as typed,
/// embedded runs of spaces included
#[test]
fn test_named_target_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &("[a-z0-9][a-z0-9.-]{0,11}", "[a-z]{1,8}( {1,3}[a-z0-9-]{1,8}){0,3}"),
            |(target, command)| {
                let parsed = parse(&format!("@{} {}", target, command));
                assert_eq!(parsed.verb, ROUTED_VERB);
                assert_eq!(parsed.args, format!("{} {}", target, command));
                assert_eq!(parsed.line, format!("{} {} {} ", ROUTED_VERB, target, command));
                Ok(())
            },
        )
        .unwrap();
}

/// A bare `@` routes to every host
#[test]
fn test_wildcard_target_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&"[a-z]{1,8}( [a-z0-9/-]{1,8}){0,3}", |command| {
            let parsed = parse(&format!("@ {}", command));
            assert_eq!(parsed.line, format!("{} * {}", ROUTED_VERB, command));
            assert_eq!(parsed.args, format!("* {}", command));
            Ok(())
        })
        .unwrap();
}

proptest! {
    /// Parsing never panics and never leaves whitespace in the verb
    #[test]
    fn test_parse_total(line in "\\PC{0,64}") {
        let parsed = parse(&line);
        prop_assert!(!parsed.verb.chars().any(char::is_whitespace));
        prop_assert_eq!(parsed.is_empty(), line.trim().is_empty());
        prop_assert_eq!(parsed.args.trim(), parsed.args.as_str());
    }
}
