//! # Validator
//!
//! Pure checks applied to a submitted candidate. Rules run in a fixed order
//! and the first failure wins: emptiness, then length, then the mode's shape.

use crate::input::models::{InputMode, InputSpec};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@(?:[A-Za-z0-9-]+\.)+[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

const IPV6_GROUPS: usize = 8;
const IPV6_MAX_PREFIX: u8 = 128;

/// Why a candidate was turned down
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Input cannot be empty")]
    Empty,
    #[error("Input must be at least {min} characters")]
    TooShort { min: usize },
    #[error("Input must be at most {max} characters")]
    TooLong { max: usize },
    #[error("Input must contain digits only")]
    NotNumeric,
    #[error("{}", range_message(.min, .max))]
    OutOfRange { min: Option<u64>, max: Option<u64> },
    #[error("Invalid email address format")]
    InvalidEmail,
    #[error("Phone number must contain exactly 10 digits")]
    InvalidPhone,
    #[error("Invalid IPv4 address (expected four numbers 0-255, e.g. 192.168.1.1)")]
    InvalidIpv4,
    #[error("Invalid IPv6 address")]
    InvalidIpv6,
}

fn range_message(min: &Option<u64>, max: &Option<u64>) -> String {
    match (*min, *max) {
        (Some(min), Some(max)) => format!("Value must be between {min} and {max}"),
        (Some(min), None) => format!("Value must be at least {min}"),
        (None, Some(max)) => format!("Value must be at most {max}"),
        (None, None) => "Value is out of range".to_string(),
    }
}

/// Check `candidate` against every rule in `spec`
pub fn validate(candidate: &str, spec: &InputSpec) -> Result<(), Rejection> {
    if candidate.is_empty() {
        return if spec.allow_empty {
            Ok(())
        } else {
            Err(Rejection::Empty)
        };
    }

    if spec.mode.uses_length_bounds() {
        let length = candidate.chars().count();
        if length < spec.min_length {
            return Err(Rejection::TooShort {
                min: spec.min_length,
            });
        }
        if let Some(max) = spec.max_length {
            if length > max {
                return Err(Rejection::TooLong { max });
            }
        }
    }

    check_shape(candidate, spec)
}

/// Mode-specific shape rule
pub fn check_shape(candidate: &str, spec: &InputSpec) -> Result<(), Rejection> {
    match spec.mode {
        InputMode::Text | InputMode::Password | InputMode::YesNo => Ok(()),
        InputMode::Numeric => check_numeric(candidate, spec.min_value, spec.max_value),
        InputMode::Email => is_valid_email(candidate)
            .then_some(())
            .ok_or(Rejection::InvalidEmail),
        InputMode::Phone => is_valid_phone(candidate)
            .then_some(())
            .ok_or(Rejection::InvalidPhone),
        InputMode::IPv4 => is_valid_ipv4(candidate)
            .then_some(())
            .ok_or(Rejection::InvalidIpv4),
        InputMode::IPv6 => is_valid_ipv6(candidate)
            .then_some(())
            .ok_or(Rejection::InvalidIpv6),
    }
}

fn check_numeric(candidate: &str, min: Option<u64>, max: Option<u64>) -> Result<(), Rejection> {
    if candidate.is_empty() || !candidate.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Rejection::NotNumeric);
    }
    if min.is_none() && max.is_none() {
        return Ok(());
    }

    let out_of_range = Rejection::OutOfRange { min, max };
    // all digits, so a parse failure can only mean overflow
    let Ok(value) = candidate.parse::<u64>() else {
        return if max.is_some() { Err(out_of_range) } else { Ok(()) };
    };

    if min.is_some_and(|min| value < min) || max.is_some_and(|max| value > max) {
        return Err(out_of_range);
    }
    Ok(())
}

pub fn is_valid_email(candidate: &str) -> bool {
    EMAIL_PATTERN.is_match(candidate)
}

/// Exactly 10 digits once dashes are removed
pub fn is_valid_phone(candidate: &str) -> bool {
    let digits: Vec<char> = candidate.chars().filter(|ch| *ch != '-').collect();
    digits.len() == 10 && digits.iter().all(char::is_ascii_digit)
}

/// Four dot-separated decimal groups, each in `[0, 255]`
pub fn is_valid_ipv4(candidate: &str) -> bool {
    let groups: Vec<&str> = candidate.split('.').collect();
    groups.len() == 4
        && groups.iter().all(|group| {
            (1..=3).contains(&group.len())
                && group.bytes().all(|b| b.is_ascii_digit())
                && group.parse::<u16>().is_ok_and(|value| value <= 255)
        })
}

/// IPv6 address with an optional `/0`-`/128` CIDR suffix
pub fn is_valid_ipv6(candidate: &str) -> bool {
    let (address, prefix) = match candidate.split_once('/') {
        Some((address, prefix)) => (address, Some(prefix)),
        None => (candidate, None),
    };

    if let Some(prefix) = prefix {
        if !is_valid_ipv6_prefix(prefix) {
            return false;
        }
    }

    is_valid_ipv6_address(address)
}

fn is_valid_ipv6_prefix(prefix: &str) -> bool {
    !prefix.is_empty()
        && prefix.len() <= 3
        && prefix.bytes().all(|b| b.is_ascii_digit())
        && prefix.parse::<u8>().is_ok_and(|bits| bits <= IPV6_MAX_PREFIX)
}

fn is_valid_ipv6_address(address: &str) -> bool {
    if address.is_empty() || address.contains(":::") {
        return false;
    }

    let compressions = address.matches("::").count();
    if compressions > 1 {
        return false;
    }
    // a lone leading/trailing colon is only legal as part of "::"
    if (address.starts_with(':') && !address.starts_with("::"))
        || (address.ends_with(':') && !address.ends_with("::"))
    {
        return false;
    }

    if compressions == 1 {
        let (head, tail) = address.split_once("::").unwrap_or((address, ""));
        let mut explicit = 0;
        for group in [head, tail]
            .into_iter()
            .filter(|part| !part.is_empty())
            .flat_map(|part| part.split(':'))
        {
            if !is_hex_group(group) {
                return false;
            }
            explicit += 1;
        }
        // "::" stands for at least one zero group
        explicit < IPV6_GROUPS
    } else {
        let groups: Vec<&str> = address.split(':').collect();
        groups.len() == IPV6_GROUPS && groups.iter().all(|group| is_hex_group(group))
    }
}

fn is_hex_group(group: &str) -> bool {
    (1..=4).contains(&group.len()) && group.bytes().all(|b| b.is_ascii_hexdigit())
}
