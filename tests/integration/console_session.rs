//! End-to-end tests driving a console through scripted input.

use super::test_utils::{harness, harness_with, ScriptedEditor};
use dust::console::help::banner;
use dust::console::terminal::CaptureBuffer;
use dust::console::{parse, Dispatch};
use dust::ports::ReadOutcome;

#[test]
fn test_banner_printed_on_start() {
    let h = harness(vec![], &[]);
    assert_eq!(h.output.contents(), format!("{}\n", banner()));
}

#[test]
fn test_routed_target_reaches_cluster_executor() {
    assert_eq!(parse("@web1 uptime").line, "atssh web1 uptime ");

    let mut h = harness(vec!["atssh"], &["@web1 uptime", "exit"]);
    h.console.run();
    let entries = h.log.entries();
    assert!(entries.contains(&"cluster:atssh|web1 uptime".to_string()));
    assert!(!entries.iter().any(|e| e.starts_with("shell:")));
}

#[test]
fn test_wildcard_target_reaches_cluster_executor() {
    let mut h = harness(vec!["atssh"], &["@ df -h", "exit"]);
    h.console.run();
    assert!(h
        .log
        .entries()
        .contains(&"cluster:atssh|* df -h".to_string()));
}

#[test]
fn test_help_exit_prints_usage_line() {
    let mut h = harness(vec![], &["help exit", "exit"]);
    h.console.run();
    let out = h.output.contents();
    assert!(out.ends_with("exit - exit dust shell\n"), "got: {:?}", out);
}

#[test]
fn test_help_summary_includes_dynamic_group() {
    let mut h = harness(vec!["atssh", "show"], &["help", "exit"]);
    h.console.run();
    let out = h.output.contents();
    assert!(out.contains("Available commands:"));
    assert!(out.contains("== From cluster:"));
    let atssh = out.find("cmd [target]").unwrap();
    let builtin = out.find("help [cmd]").unwrap();
    assert!(builtin < atssh, "built-ins come before dynamic groups");
}

#[test]
fn test_unknown_command_falls_back_to_host_shell_with_notice() {
    let logs = CaptureBuffer::new();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .without_time()
        .with_writer(move || writer.clone())
        .finish();

    let mut h = harness(vec!["atssh"], &["lsxyz", "exit"]);
    tracing::subscriber::with_default(subscriber, || h.console.run());

    let entries = h.log.entries();
    let cluster = entries.iter().position(|e| e == "cluster:lsxyz|").unwrap();
    let shell = entries.iter().position(|e| e == "shell:lsxyz").unwrap();
    assert!(cluster < shell, "cluster executor is tried before the shell");
    assert!(logs
        .contents()
        .contains("dust: [lsxyz] unrecognized, trying system shell..."));
}

#[test]
fn test_cluster_result_wins_over_host_shell() {
    let mut h = harness(vec!["ls"], &["ls -l", "exit"]);
    h.console.run();
    let entries = h.log.entries();
    assert!(entries.contains(&"cluster:ls|-l".to_string()));
    assert!(!entries.iter().any(|e| e.starts_with("shell:")));
}

#[test]
fn test_empty_line_produces_no_output_and_no_fallback() {
    let mut h = harness(vec![], &["", "   "]);
    let before = h.output.contents();
    assert_eq!(h.console.run_line(""), Dispatch::Handled);
    assert_eq!(h.output.contents(), before);
    assert!(h.log.entries().is_empty());
}

#[test]
fn test_end_of_input_exits_and_logs_out() {
    let mut h = harness(vec![], &["show"]);
    h.console.run();
    assert!(h.console.is_exiting());
    let entries = h.log.entries();
    assert_eq!(entries.last().unwrap(), "cluster:logout");
    assert_eq!(
        entries.iter().filter(|e| *e == "cluster:logout").count(),
        1
    );
}

#[test]
fn test_loop_stops_reading_after_exit() {
    let mut h = harness(vec![], &["exit", "never-read"]);
    h.console.run();
    let entries = h.log.entries();
    assert_eq!(
        entries.iter().filter(|e| e.starts_with("prompt:")).count(),
        1
    );
    assert!(!entries.iter().any(|e| e.contains("never-read")));
}

#[test]
fn test_interrupt_discards_line_and_reprompts() {
    let mut h = harness_with(
        vec![],
        |log| {
            ScriptedEditor::with_outcomes(
                vec![
                    ReadOutcome::Interrupted,
                    ReadOutcome::Line("exit".to_string()),
                ],
                log,
            )
        },
        true,
    );
    h.console.run();
    let prompts = h
        .log
        .entries()
        .iter()
        .filter(|e| e.starts_with("prompt:"))
        .count();
    assert_eq!(prompts, 2);
}

#[test]
fn test_prompt_tracks_routing_context() {
    let mut h = harness(vec![], &["exit"]);
    h.routing.set_region(Some("us-east-1".to_string()));
    h.console.run();
    assert_eq!(h.log.entries()[0], "prompt:[us-east-1]$ ");
}

#[test]
fn test_history_records_non_empty_lines_and_is_saved() {
    let mut h = harness(vec![], &["", "uptime", "exit"]);
    h.console.run();
    h.console.finish();
    let entries = h.log.entries();
    let history: Vec<&String> = entries
        .iter()
        .filter(|e| e.starts_with("history:"))
        .collect();
    assert_eq!(
        history,
        vec!["history:uptime", "history:exit", "history:saved"]
    );
}

#[test]
fn test_fallback_disabled_leaves_line_unhandled() {
    let mut h = harness_with(vec![], |log| ScriptedEditor::new(&[], log), false);
    assert_eq!(h.console.run_line("rm -rf /tmp/x"), Dispatch::Unhandled);
    assert!(!h.log.entries().iter().any(|e| e.starts_with("shell:")));
}
