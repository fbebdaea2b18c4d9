//! Re-prompt behaviour: rejected answers are explained and asked again

mod common;

use common::PromptHarness;
use promptline::{InputMode, InputSpec, MockByteStream};

fn valid_answer(mode: InputMode) -> &'static str {
    match mode {
        InputMode::Text | InputMode::Password => "x",
        InputMode::Numeric => "1",
        InputMode::YesNo => "y",
        InputMode::Email => "a@b.io",
        InputMode::Phone => "5551234567",
        InputMode::IPv4 => "10.0.0.1",
        InputMode::IPv6 => "::1",
    }
}

#[test]
fn empty_answer_should_be_rejected_for_every_mode() {
    for mode in InputMode::ALL {
        if mode == InputMode::YesNo {
            continue;
        }
        let keys = format!("\r{}\r", valid_answer(mode));
        let harness = PromptHarness::run(&InputSpec::new("? ", mode), keys.as_bytes());

        assert_eq!(harness.accepted(), valid_answer(mode));
        assert_eq!(
            harness.rejections("Input cannot be empty"),
            1,
            "mode {mode} should reject the empty answer"
        );
    }
}

#[test]
fn yes_no_should_ignore_enter_without_default() {
    let harness = PromptHarness::run(&InputSpec::new("Proceed? ", InputMode::YesNo), b"\r\rn");
    assert_eq!(harness.accepted(), "N");
    assert_eq!(harness.rejections("Input cannot be empty"), 0);
}

#[test]
fn allow_empty_should_accept_empty_answer() {
    let spec = InputSpec::new("Note: ", InputMode::Text).allowing_empty();
    let harness = PromptHarness::run(&spec, b"\r");
    assert_eq!(harness.accepted(), "");
    assert_eq!(harness.rejections("Input cannot be empty"), 0);
}

#[test]
fn port_range_should_reject_until_value_fits() {
    let spec = InputSpec::new("Port: ", InputMode::Numeric)
        .with_value_range(Some(1024), Some(65535));
    // "abc" never reaches the buffer, so that attempt submits an empty line
    let harness = PromptHarness::run(&spec, b"0\r70000\rabc\r8080\r");

    assert_eq!(harness.accepted(), "8080");
    assert_eq!(harness.rejections("Value must be between 1024 and 65535"), 2);
    assert_eq!(harness.rejections("Input cannot be empty"), 1);
    assert_eq!(harness.output.raw_mode_enable_count(), 4);
    assert_eq!(harness.output.screen_lines(), vec!["Port: 8080", ""]);
}

#[test]
fn ipv4_should_reject_bad_addresses() {
    let spec = InputSpec::new("Address: ", InputMode::IPv4);
    let harness = PromptHarness::run(&spec, b"256.1.1.1\r1.2.3\r192.168.1.1\r");
    assert_eq!(harness.accepted(), "192.168.1.1");
    assert_eq!(harness.rejections("Invalid IPv4 address"), 2);
}

#[test]
fn ipv6_should_reject_double_compression_and_long_prefix() {
    let spec = InputSpec::new("Address: ", InputMode::IPv6);
    let harness = PromptHarness::run(&spec, b"2001::db8::1\r2001:db8::1/129\r2001:db8::1\r");
    assert_eq!(harness.accepted(), "2001:db8::1");
    assert_eq!(harness.rejections("Invalid IPv6 address"), 2);
}

#[test]
fn ipv6_unspecified_address_should_be_accepted() {
    let spec = InputSpec::new("Address: ", InputMode::IPv6);
    assert_eq!(PromptHarness::run(&spec, b"::\r").accepted(), "::");
    assert_eq!(PromptHarness::run(&spec, b"::/0\r").accepted(), "::/0");
}

#[test]
fn email_and_phone_shapes_should_be_enforced() {
    let spec = InputSpec::new("Email: ", InputMode::Email);
    let harness = PromptHarness::run(&spec, b"me@host\rme@example.org\r");
    assert_eq!(harness.accepted(), "me@example.org");
    assert_eq!(harness.rejections("Invalid email address format"), 1);

    let spec = InputSpec::new("Phone: ", InputMode::Phone);
    let harness = PromptHarness::run(&spec, b"555-1234\r555-123-4567\r");
    assert_eq!(harness.accepted(), "555-123-4567");
    assert_eq!(harness.rejections("exactly 10 digits"), 1);
}

#[test]
fn custom_error_message_should_be_shown_instead() {
    let spec = InputSpec::new("Port: ", InputMode::Numeric)
        .with_value_range(Some(1), Some(10))
        .with_error_message("Pick 1-10");
    let harness = PromptHarness::run(&spec, b"99\r7\r");
    assert_eq!(harness.accepted(), "7");
    assert_eq!(harness.rejections("Pick 1-10"), 1);
    assert_eq!(harness.rejections("Value must be"), 0);
}

#[test]
fn every_attempt_should_start_from_the_prefill() {
    let spec = InputSpec::new("Name: ", InputMode::Text)
        .with_prefill("ab")
        .with_min_length(3);
    // first attempt submits the prefill unchanged, second appends one char
    let harness = PromptHarness::run(&spec, b"\rc\r");
    assert_eq!(harness.accepted(), "abc");
    assert_eq!(harness.rejections("at least 3 characters"), 1);
}

#[test]
fn type_ahead_during_error_display_should_not_become_the_answer() {
    let mut keys = MockByteStream::new(b"70000\r");
    keys.push_typeahead(b"2222\r");
    keys.push_bytes(b"8080\r");
    let spec =
        InputSpec::new("Port: ", InputMode::Numeric).with_value_range(Some(1024), Some(65535));

    let harness = PromptHarness::run_with(&spec, keys);

    assert_eq!(harness.accepted(), "8080");
    assert_eq!(harness.input.discard_count(), 1);
    assert_eq!(harness.input.pending_count(), 0);
}
