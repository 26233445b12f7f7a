//! Entry rules for the login form.
//!
//! A username is either an email address or a CPF (Brazilian national
//! identifier). CPFs are accepted as 11 bare digits or in the usual
//! `ddd.ddd.ddd-dd` mask and are never rewritten before submission.

use regex::Regex;
use std::sync::OnceLock;

use crate::models::{Credentials, ValidationOutcome};

/// Minimum number of characters in a password.
pub const PASSWORD_MIN_LEN: usize = 3;

/// Characters that count as "special" for the password rule.
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*()-_=+[]{};:'\",.<>/?\\|`~";

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static CPF_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"^[\w.%+-]+@[\w.-]+\.[A-Za-z]{2,}$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn cpf_regex() -> &'static Regex {
    CPF_RE.get_or_init(|| {
        let pattern = r"^(?:[0-9]{11}|[0-9]{3}\.[0-9]{3}\.[0-9]{3}-[0-9]{2})$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("cpf regex failed to compile: {error}"))
    })
}

/// Validation knobs loaded from configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Also verify the two CPF check digits
    pub require_cpf_check_digits: bool,
}

pub fn is_valid_email(s: &str) -> bool {
    email_regex().is_match(s)
}

pub fn is_valid_cpf(s: &str) -> bool {
    cpf_regex().is_match(s)
}

/// True for an email address or a CPF.
pub fn is_valid_username(s: &str) -> bool {
    is_valid_email(s) || is_valid_cpf(s)
}

/// True when the password has at least [`PASSWORD_MIN_LEN`] characters, an
/// uppercase letter and one of [`SPECIAL_CHARACTERS`].
pub fn is_valid_password(s: &str) -> bool {
    s.chars().count() >= PASSWORD_MIN_LEN
        && s.chars().any(char::is_uppercase)
        && s.chars().any(|c| SPECIAL_CHARACTERS.contains(c))
}

pub fn is_valid_form(username: &str, password: &str) -> bool {
    let username_valid = is_valid_username(username);
    let password_valid = is_valid_password(password);
    username_valid && password_valid
}

/// Check both fields of an attempt.
pub fn validate(credentials: &Credentials) -> ValidationOutcome {
    ValidationOutcome {
        username_valid: is_valid_username(&credentials.username),
        password_valid: is_valid_password(&credentials.password),
    }
}

/// Same as [`validate`], with the optional CPF check-digit rule applied.
pub fn validate_with(config: &ValidatorConfig, credentials: &Credentials) -> ValidationOutcome {
    let mut outcome = validate(credentials);
    if config.require_cpf_check_digits
        && outcome.username_valid
        && is_valid_cpf(&credentials.username)
    {
        outcome.username_valid = has_valid_cpf_check_digits(&credentials.username);
    }
    outcome
}

/// Verifies the mod-11 check digits of a CPF. Separators are ignored.
/// Sequences of one repeated digit are rejected.
pub fn has_valid_cpf_check_digits(s: &str) -> bool {
    let digits: Vec<u32> = s.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() != 11 || digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    let check_digit = |len: usize| -> u32 {
        let sum: u32 = digits[..len]
            .iter()
            .zip((2..=len as u32 + 1).rev())
            .map(|(d, w)| d * w)
            .sum();
        match sum % 11 {
            0 | 1 => 0,
            r => 11 - r,
        }
    };

    check_digit(9) == digits[9] && check_digit(10) == digits[10]
}
