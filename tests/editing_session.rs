//! End-to-end editing through the prompt loop on a mock terminal

mod common;

use common::PromptHarness;
use promptline::{
    InputMode, InputSpec, MockByteStream, MockRenderStream, RenderCommand, RenderStream,
    SessionResult, TerminalSession,
};

#[test]
fn default_should_be_used_when_enter_is_pressed_on_empty_line() {
    let spec = InputSpec::new("Host: ", InputMode::Text).with_default("localhost");
    let harness = PromptHarness::run(&spec, b"\r");

    assert_eq!(harness.accepted(), "localhost");
    assert_eq!(harness.output.screen_lines()[0], "Host: [localhost] localhost");
}

#[test]
fn prefill_should_be_editable_and_hide_default() {
    let spec = InputSpec::new("Config: ", InputMode::Text)
        .with_default("/tmp/ignored")
        .with_prefill("/etc/config.conf");
    let harness = PromptHarness::run(&spec, b"\x1b[H#\r");

    let value = harness.accepted();
    assert_eq!(value.chars().count(), "/etc/config.conf".len() + 1);
    assert!(value.starts_with('#'));
    assert_eq!(harness.output.screen_lines()[0], "Config: #/etc/config.conf");
}

#[test]
fn ctrl_c_should_interrupt_and_release_terminal() {
    let spec = InputSpec::new("Name: ", InputMode::Text);
    let harness = PromptHarness::run(&spec, b"half\x1b[D\x03");

    assert!(matches!(harness.result, Ok(SessionResult::Interrupted)));
    assert!(!harness.output.is_raw_mode());
    assert_eq!(harness.input.restore_count(), harness.input.capture_count());
    assert!(!harness.input.is_capturing());
}

#[test]
fn signal_during_second_attempt_should_interrupt() {
    let spec = InputSpec::new("Port: ", InputMode::Numeric);
    let mut input = MockByteStream::new(b"\r12");
    input.push_interrupt();
    let harness = PromptHarness::run_with(&spec, input);

    assert!(matches!(harness.result, Ok(SessionResult::Interrupted)));
    assert!(!harness.output.is_raw_mode());
    assert_eq!(harness.input.capture_count(), 2);
    assert_eq!(harness.input.restore_count(), 2);
}

#[test]
fn password_should_never_be_written_to_the_terminal() {
    let spec = InputSpec::new("Password: ", InputMode::Password).with_min_length(8);
    // too short first, then a longer one with some editing
    let harness = PromptHarness::run(&spec, b"hunter2\rcorrect\x7fthorse\x01\x1b[3~C\r");

    assert_eq!(harness.accepted(), "Correcthorse");
    let written = harness.output.get_output_string();
    for secret in ["hunter", "orrec", "thorse", "C"] {
        assert!(!written.contains(secret), "{secret:?} leaked into {written:?}");
    }
    assert_eq!(harness.output.screen_lines()[0], "Password: ************");
}

#[test]
fn unknown_escape_sequences_should_not_reach_the_answer() {
    let spec = InputSpec::new("Name: ", InputMode::Text);
    // F1, PageDown, Insert, Shift-Up, then ESC with two arbitrary bytes
    let keys = b"a\x1bOP\x1b[6~\x1b[2~\x1b[1;2A\x1bxyb\r";
    let harness = PromptHarness::run(&spec, keys);

    assert_eq!(harness.accepted(), "ab");
    assert_eq!(harness.output.screen_lines()[0], "Name: ab");
}

#[test]
fn numeric_mode_should_filter_keystrokes_before_the_buffer() {
    let spec = InputSpec::new("Port: ", InputMode::Numeric).with_max_length(4);
    let harness = PromptHarness::run(&spec, b"8x0-8y0123\r");

    assert_eq!(harness.accepted(), "8080");
    assert_eq!(harness.output.screen_lines()[0], "Port: 8080");
}

#[test]
fn yes_no_should_echo_normalized_answer() {
    let spec = InputSpec::new("Overwrite? ", InputMode::YesNo).with_default("y");
    let harness = PromptHarness::run(&spec, b"q\r");

    assert_eq!(harness.accepted(), "Y");
    assert_eq!(harness.output.screen_lines()[0], "Overwrite? [Y/n] Y");
}

#[test]
fn terminal_session_should_restore_mode_after_many_cycles() {
    let mut input = MockByteStream::default();
    let mut output = MockRenderStream::new();
    let terminal = output.clone();

    for _ in 0..10 {
        let guard = TerminalSession::acquire(&mut input, &mut output).unwrap();
        drop(guard);
        assert!(!terminal.is_raw_mode());
    }

    let enables = terminal
        .get_commands()
        .iter()
        .filter(|c| **c == RenderCommand::EnableRawMode)
        .count();
    let disables = terminal
        .get_commands()
        .iter()
        .filter(|c| **c == RenderCommand::DisableRawMode)
        .count();
    assert_eq!(enables, 10);
    assert_eq!(disables, 10);
    assert_eq!(input.capture_count(), input.restore_count());
}

#[test]
fn spec_should_load_from_json() {
    let spec: InputSpec = serde_json::from_str(
        r#"{"prompt":"Host: ","mode":"ipv4","default":"127.0.0.1"}"#,
    )
    .unwrap();
    let harness = PromptHarness::run(&spec, b"\r");
    assert_eq!(harness.accepted(), "127.0.0.1");
}
