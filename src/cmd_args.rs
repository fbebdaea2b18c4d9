use crate::config::{SessionConfig, DEFAULT_ERROR_DISPLAY_DURATION, DEFAULT_MASK_GLYPH};
use crate::input::{InputError, InputMode, InputSpec};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    #[clap(short = 'p', long, default_value = "> ", help = "prompt text")]
    prompt: String,

    #[clap(
        short = 'm',
        long,
        default_value = "text",
        help = "input mode: text, numeric, password, yesno, email, phone, ipv4, ipv6"
    )]
    mode: String,

    #[clap(long, default_value_t = 0, help = "minimum number of characters")]
    min_length: usize,

    #[clap(long, help = "maximum number of characters (also caps typing)")]
    max_length: Option<usize>,

    #[clap(long, help = "lowest accepted value (numeric mode)")]
    min_value: Option<u64>,

    #[clap(long, help = "highest accepted value (numeric mode)")]
    max_value: Option<u64>,

    #[clap(short = 'd', long, help = "value used when Enter is pressed on an empty line")]
    default: Option<String>,

    #[clap(long, help = "editable initial text")]
    prefill: Option<String>,

    #[clap(long, help = "message shown instead of the validation reason")]
    error_message: Option<String>,

    #[clap(long, help = "accept an empty answer")]
    allow_empty: bool,

    #[clap(long, default_value_t = DEFAULT_MASK_GLYPH, help = "glyph echoed in password mode")]
    mask: char,

    #[clap(long, help = "disable colored hint and error output")]
    no_color: bool,

    #[clap(long, help = "how long a validation error stays visible, in milliseconds")]
    error_display_ms: Option<u64>,

    #[clap(long, help = "print the result as JSON")]
    json: bool,

    // Logging is off unless PROMPTLINE_LOG_LEVEL is set
    #[clap(long, help = "write logs to this file instead of stderr")]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    prompt: String,
    mode: String,
    min_length: usize,
    max_length: Option<usize>,
    min_value: Option<u64>,
    max_value: Option<u64>,
    default: Option<String>,
    prefill: Option<String>,
    error_message: Option<String>,
    allow_empty: bool,
    mask: char,
    no_color: bool,
    error_display_ms: Option<u64>,
    json: bool,
    log_file: Option<PathBuf>,
}

impl From<ClapArgs> for CommandLineArgs {
    fn from(args: ClapArgs) -> Self {
        Self {
            prompt: args.prompt,
            mode: args.mode,
            min_length: args.min_length,
            max_length: args.max_length,
            min_value: args.min_value,
            max_value: args.max_value,
            default: args.default,
            prefill: args.prefill,
            error_message: args.error_message,
            allow_empty: args.allow_empty,
            mask: args.mask,
            no_color: args.no_color,
            error_display_ms: args.error_display_ms,
            json: args.json,
            log_file: args.log_file,
        }
    }
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        ClapArgs::parse().into()
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        ClapArgs::parse_from(itr).into()
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn json(&self) -> bool {
        self.json
    }

    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    /// Build the input spec; an unknown mode is an invalid-parameter error
    pub fn input_spec(&self) -> Result<InputSpec, InputError> {
        let mode: InputMode = self.mode.parse()?;
        let mut spec = InputSpec::new(self.prompt.clone(), mode)
            .with_min_length(self.min_length)
            .with_value_range(self.min_value, self.max_value);
        spec.max_length = self.max_length;
        spec.default = self.default.clone();
        spec.prefill = self.prefill.clone();
        spec.error_message = self.error_message.clone();
        spec.allow_empty = self.allow_empty;
        Ok(spec)
    }

    pub fn session_config(&self) -> SessionConfig {
        let error_display_duration = self
            .error_display_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_ERROR_DISPLAY_DURATION);
        SessionConfig::default()
            .with_mask_glyph(self.mask)
            .with_color(!self.no_color)
            .with_error_display_duration(error_display_duration)
    }
}
