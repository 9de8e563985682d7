//! Input checks shared by the consumers (CLI, HTTP API) and the services.
//!
//! Callers validate before dispatch so the user sees a message right away;
//! the services run the same checks again because they cannot trust callers.

use thiserror::Error;

use crate::model::{PrescriptionImage, SearchRequest};

/// Missing or unacceptable user input. Display strings are user-facing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please describe your medical problem and specify a location.")]
    MissingSymptomAndLocation,

    #[error("Please describe the medical problem or symptom.")]
    MissingSymptom,

    #[error("Please enter a city or select 'Near Me'.")]
    MissingLocation,

    #[error("Please choose a prescription image to analyze.")]
    EmptyImage,

    #[error("Unsupported file type '{0}'; please upload an image.")]
    UnsupportedImageType(String),

    #[error("Image is {size} bytes; the maximum accepted size is {max} bytes.")]
    ImageTooLarge { size: usize, max: usize },
}

/// Check that a search has a symptom and some way to place it.
///
/// "Near me" counts as a location even without resolved coordinates; the
/// service falls back to its configured place name in that case.
///
/// # Errors
///
/// Returns the [`ValidationError`] variant naming whichever inputs are missing.
pub fn validate_search_request(request: &SearchRequest) -> Result<(), ValidationError> {
    let symptom_missing = request.symptom_or_specialty.trim().is_empty();
    let location_missing = request.location_text.trim().is_empty() && !request.use_device_location;

    match (symptom_missing, location_missing) {
        (true, true) => Err(ValidationError::MissingSymptomAndLocation),
        (true, false) => Err(ValidationError::MissingSymptom),
        (false, true) => Err(ValidationError::MissingLocation),
        (false, false) => Ok(()),
    }
}

/// Check an upload before it is sent anywhere.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyImage`], [`ValidationError::UnsupportedImageType`]
/// or [`ValidationError::ImageTooLarge`].
pub fn validate_image(image: &PrescriptionImage, max_bytes: usize) -> Result<(), ValidationError> {
    if image.bytes.is_empty() {
        return Err(ValidationError::EmptyImage);
    }
    let mime = image.mime_type.trim().to_ascii_lowercase();
    if !mime.starts_with("image/") {
        return Err(ValidationError::UnsupportedImageType(
            image.mime_type.clone(),
        ));
    }
    if image.bytes.len() > max_bytes {
        return Err(ValidationError::ImageTooLarge {
            size: image.bytes.len(),
            max: max_bytes,
        });
    }
    Ok(())
}
