// Bounded-retry prompt engine.
//
// Every field the user fills in goes through `prompt`: show the prompt,
// read a line, trim it, hand it to a `Validator`. A valid answer returns
// immediately. An invalid one costs one attempt and the user is asked again
// with the validator's message and the number of attempts left. Running out
// of attempts is fatal for the whole session.

use crate::error::{Rejection, SessionError};
use crate::ui::Console;

/// Failed attempts tolerated per prompt.
pub const MAX_ATTEMPTS: u32 = 3;

/// Acceptance policy for one kind of field.
pub trait Validator {
    type Output;

    /// Name of the field kind, used when the attempts run out.
    fn kind(&self) -> &str;

    fn validate(&self, input: &str) -> Result<Self::Output, Rejection>;
}

/// Ask until `validator` accepts or `max_attempts` rejections have been seen.
///
/// The attempt counter lives only for this call; acceptance never consumes
/// an attempt.
pub fn prompt<C, V>(
    console: &mut C,
    text: &str,
    validator: &V,
    max_attempts: u32,
) -> Result<V::Output, SessionError>
where
    C: Console + ?Sized,
    V: Validator + ?Sized,
{
    let mut remaining = max_attempts;
    loop {
        let raw = console.read_line(text)?;
        match validator.validate(raw.trim()) {
            Ok(value) => return Ok(value),
            Err(rejection) => {
                remaining = remaining.saturating_sub(1);
                tracing::debug!(field = validator.kind(), remaining, "input rejected");
                console.error(&format!(
                    "{} Attempts remaining: {}",
                    rejection, remaining
                ));
                if remaining == 0 {
                    return Err(SessionError::ExhaustedAttempts {
                        field: validator.kind().to_string(),
                    });
                }
            }
        }
    }
}
