//! Shared harness for headless prompt tests
//!
//! Drives a real [`InputSession`] with scripted bytes and keeps a handle on the
//! mock terminal so tests can inspect what the user would have seen.

#![allow(dead_code)]

use promptline::{
    InputError, InputSession, InputSpec, MockByteStream, MockRenderStream, SessionConfig,
    SessionResult,
};
use std::time::Duration;

pub struct PromptHarness {
    pub output: MockRenderStream,
    pub input: MockByteStream,
    pub result: Result<SessionResult, InputError>,
}

impl PromptHarness {
    /// Run `spec` against `keys` with colors off and no error delay
    pub fn run(spec: &InputSpec, keys: &[u8]) -> Self {
        Self::run_with(spec, MockByteStream::new(keys))
    }

    pub fn run_with(spec: &InputSpec, input: MockByteStream) -> Self {
        let output = MockRenderStream::new();
        let config = SessionConfig::default()
            .with_color(false)
            .with_error_display_duration(Duration::ZERO);
        let mut session = InputSession::new(input, output.clone()).with_config(config);
        let result = session.prompt(spec);
        let (input, _) = session.into_parts();
        Self {
            output,
            input,
            result,
        }
    }

    pub fn accepted(&self) -> &str {
        match &self.result {
            Ok(SessionResult::Accepted(value)) => value,
            other => panic!("expected an accepted value, got {other:?}"),
        }
    }

    /// How many times the prompt was shown with an error underneath
    pub fn rejections(&self, reason: &str) -> usize {
        self.output.get_output_string().matches(reason).count()
    }
}
