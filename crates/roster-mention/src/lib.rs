//! Email-mention extraction from free text.
//!
//! A broadcast message may name extra recipients inline ("Hello
//! kate@example.com"); [`mentions`] scans a text for every email-shaped
//! substring so those addresses can be merged into the recipient list.
//! [`is_valid_email`] anchors the same pattern for field validation at the
//! transport boundary.

use std::sync::LazyLock;

use regex::Regex;

/// An email-shaped substring: a local part of unreserved characters
/// (letters, digits, `_`, `-`, `+`, dot-separated), `@`, and a
/// dot-separated domain whose final label is two or more letters.
///
/// Deliberately narrower than RFC 5322 — quoted local parts and the like
/// are not worth matching inside chat text.
const EMAIL_PATTERN: &str =
  r"[_A-Za-z0-9+-]+(\.[_A-Za-z0-9-]+)*@[A-Za-z0-9-]+(\.[A-Za-z0-9]+)*(\.[A-Za-z]{2,})";

static EMAIL_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"));

static ANCHORED_EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(&format!("^(?:{EMAIL_PATTERN})$"))
    .expect("anchored email pattern compiles")
});

/// Iterate over the email addresses mentioned in `text`.
///
/// Matches are leftmost and non-overlapping, yielded in order of first
/// appearance exactly as written in the source (no case normalisation,
/// duplicates included). A text with no addresses yields nothing; this
/// never fails.
pub fn mentions(text: &str) -> impl Iterator<Item = &str> {
  EMAIL_RE.find_iter(text).map(|m| m.as_str())
}

/// Whether `candidate` is, in its entirety, a single well-formed address.
///
/// Unlike [`mentions`] this is anchored: surrounding text disqualifies the
/// candidate.
pub fn is_valid_email(candidate: &str) -> bool {
  ANCHORED_EMAIL_RE.is_match(candidate)
}
