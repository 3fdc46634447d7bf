use validator::{Validate, ValidationErrors};

use claimdesk_core::error::AppError;

/// Run derive-based validation, mapping failures to a `Validation` error.
pub(crate) fn check<T: Validate>(input: &T) -> Result<(), AppError> {
    input.validate().map_err(|e| AppError::validation(describe(&e)))
}

/// Flatten field errors into `field: message` pairs.
fn describe(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| match &err.message {
                Some(message) => format!("{field}: {message}"),
                None => format!("{field}: invalid ({})", err.code),
            })
        })
        .collect();
    parts.sort();
    parts.join("; ")
}
