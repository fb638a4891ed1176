use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use site_logging::site_debug;

use crate::payload::{Field, FormPayload};

pub const MAX_NAME_CHARS: usize = 100;
pub const MAX_SUBJECT_CHARS: usize = 200;
pub const MAX_MESSAGE_CHARS: usize = 2000;
/// More than this many links in the screened text is treated as spam.
pub const MAX_LINKS: usize = 1;
/// A run of this many identical characters is treated as spam.
pub const REPEAT_RUN_LIMIT: usize = 11;

pub const SPAM_KEYWORDS: [&str; 7] = [
    "viagra",
    "casino",
    "lottery",
    "winner",
    "congratulations",
    "click here",
    "free money",
];

/// Whitespace as browsers' form scripts see it. Unlike Unicode `White_Space`
/// it includes U+FEFF and leaves out U+0085.
const SPACE_CLASS: &str =
    r"\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}";
/// ASCII word characters; keyword boundaries ignore letters outside ASCII.
const WORD_CLASS: &str = "0-9A-Za-z_";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    let part = format!("[^{SPACE_CLASS}@]+");
    Regex::new(&format!(r"^{part}@{part}\.{part}$")).expect("email pattern")
});
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i:https?)://[^{SPACE_CLASS}]+")).expect("link pattern")
});
static KEYWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    let alternatives = SPAM_KEYWORDS.join("|");
    Regex::new(&format!(
        r"(?:^|[^{WORD_CLASS}])((?i:{alternatives}))(?:[^{WORD_CLASS}]|$)"
    ))
    .expect("keyword pattern")
});
static SUSPICIOUS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"[^{WORD_CLASS}{SPACE_CLASS}@.-]")).expect("suspicious pattern")
});

/// Why a payload was turned away. Users only ever see a single generic message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MissingField(Field),
    InvalidEmail,
    TooLong { field: Field, max: usize },
    TooManyLinks { found: usize },
    SpamKeyword(String),
    RepeatedCharacters,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingField(field) => write!(f, "missing {field}"),
            ValidationError::InvalidEmail => write!(f, "invalid email address"),
            ValidationError::TooLong { field, max } => {
                write!(f, "{field} longer than {max} characters")
            }
            ValidationError::TooManyLinks { found } => write!(f, "{found} links"),
            ValidationError::SpamKeyword(word) => write!(f, "spam keyword {word:?}"),
            ValidationError::RepeatedCharacters => write!(f, "repeated characters"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Checks required fields, email shape, length bounds and the spam heuristics,
/// in that order. The first failing rule is reported.
pub fn validate(payload: &FormPayload) -> Result<(), ValidationError> {
    for field in Field::ALL {
        if payload.get(field).is_empty() {
            return Err(ValidationError::MissingField(field));
        }
    }

    if !is_valid_email(&payload.email) {
        return Err(ValidationError::InvalidEmail);
    }

    for (field, max) in [
        (Field::Name, MAX_NAME_CHARS),
        (Field::Subject, MAX_SUBJECT_CHARS),
        (Field::Message, MAX_MESSAGE_CHARS),
    ] {
        if utf16_len(payload.get(field)) > max {
            return Err(ValidationError::TooLong { field, max });
        }
    }

    screen_for_spam(&payload.screening_text())
}

/// Length the way a browser form measures it: UTF-16 code units, so
/// characters outside the Basic Multilingual Plane count twice.
fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

fn screen_for_spam(text: &str) -> Result<(), ValidationError> {
    let links = LINK_RE.find_iter(text).count();
    if links > MAX_LINKS {
        return Err(ValidationError::TooManyLinks { found: links });
    }

    if let Some(word) = KEYWORD_RE.captures(text).and_then(|caps| caps.get(1)) {
        return Err(ValidationError::SpamKeyword(word.as_str().to_lowercase()));
    }

    if longest_run(text) >= REPEAT_RUN_LIMIT {
        return Err(ValidationError::RepeatedCharacters);
    }

    // Reported only. This rule has never been part of the accept decision.
    if has_suspicious_characters(text) {
        site_debug!("suspicious characters present; not enforced");
    }

    Ok(())
}

/// Whether the text holds anything outside ASCII word characters, whitespace and `@.-`.
pub fn has_suspicious_characters(text: &str) -> bool {
    SUSPICIOUS_RE.is_match(text)
}

/// Length of the longest run of one repeated character. Line terminators
/// break a run and never start one.
fn longest_run(text: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    let mut previous: Option<char> = None;
    for c in text.chars() {
        if is_line_terminator(c) {
            previous = None;
            current = 0;
            continue;
        }
        if previous == Some(c) {
            current += 1;
        } else {
            previous = Some(c);
            current = 1;
        }
        longest = longest.max(current);
    }
    longest
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}
