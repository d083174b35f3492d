//! Request-body validation.
//!
//! Field-syntax checks happen here, before any resolver call; the resolver
//! assumes well-formed addresses and reports only relationship-level
//! failures.

use crate::error::ApiError;

/// Check a single email field for presence and syntax.
pub fn email(field: &str, value: &str) -> Result<(), ApiError> {
  if value.is_empty() {
    return Err(ApiError::BadRequest(format!("{field} must not be empty")));
  }
  if !roster_mention::is_valid_email(value) {
    return Err(ApiError::BadRequest(format!(
      "{field} {value:?} is not a valid email address (ex: \"andy@example.com\")"
    )));
  }
  Ok(())
}

/// Check a `friends` array: exactly two distinct, well-formed addresses.
pub fn email_pair(emails: &[String]) -> Result<(&str, &str), ApiError> {
  let [first, second] = emails else {
    return Err(ApiError::BadRequest(
      "exactly two email addresses are required".to_owned(),
    ));
  };
  if first == second {
    return Err(ApiError::BadRequest(
      "the two email addresses must be different".to_owned(),
    ));
  }
  email("friends[0]", first)?;
  email("friends[1]", second)?;
  Ok((first, second))
}

/// Check a requestor/target body: both present, well-formed, distinct.
pub fn requestor_target(requestor: &str, target: &str) -> Result<(), ApiError> {
  email("requestor", requestor)?;
  email("target", target)?;
  if requestor == target {
    return Err(ApiError::BadRequest(
      "requestor and target must be different".to_owned(),
    ));
  }
  Ok(())
}
