//! Constraint validation for uploads and family options.
//!
//! Validation is short-circuiting: the first applicable violation is returned
//! and no further checks run. All checks complete before any backend call.

use crate::error::AppError;
use crate::models::{FamilyOptions, UploadedImage};

/// Declared content types accepted for uploaded portraits.
pub const ALLOWED_IMAGE_CONTENT_TYPES: &[&str] =
    &["image/jpeg", "image/jpg", "image/png", "image/webp"];

const MIN_CHILDREN: i64 = 1;
const MAX_CHILDREN: i64 = 6;
const MIN_AGE_GAP: i64 = 1;
const MAX_AGE_GAP: i64 = 5;
const MIN_YOUNGEST_AGE: i64 = 1;
const MAX_YOUNGEST_AGE: i64 = 12;
const MAX_OLDEST_AGE: i64 = 18;

/// Normalize a MIME type by stripping parameters
/// (e.g. "image/jpeg; charset=utf-8" -> "image/jpeg").
fn normalize_mime_type(content_type: &str) -> &str {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
}

/// Structural check of a single image: non-empty payload, allowed content type.
/// Returns the human-readable rejection reason, or `None` when the image is fine.
pub fn image_rejection(image: &UploadedImage) -> Option<&'static str> {
    if image.is_empty() {
        return Some("Uploaded file is empty");
    }

    let normalized = normalize_mime_type(&image.content_type).to_lowercase();
    if !ALLOWED_IMAGE_CONTENT_TYPES
        .iter()
        .any(|ct| normalized == *ct)
    {
        return Some("Invalid file type. Only JPEG, PNG, and WebP images are allowed");
    }

    None
}

/// Validate the single upload of portrait mode.
pub fn validate_single_image(image: &UploadedImage) -> Result<(), AppError> {
    match image_rejection(image) {
        Some(reason) => Err(AppError::InvalidImage(reason.to_string())),
        None => Ok(()),
    }
}

/// Validate both parent uploads, reporting which parent slot failed.
pub fn validate_parent_images(
    parent1: &UploadedImage,
    parent2: &UploadedImage,
) -> Result<(), AppError> {
    if let Some(reason) = image_rejection(parent1) {
        return Err(AppError::InvalidImage(format!(
            "Parent 1 ({}): {}",
            parent1.original_filename, reason
        )));
    }
    if let Some(reason) = image_rejection(parent2) {
        return Err(AppError::InvalidImage(format!(
            "Parent 2 ({}): {}",
            parent2.original_filename, reason
        )));
    }
    Ok(())
}

/// Validate resolved family options against the composition constraints.
///
/// Check order: children range, age-gap range, youngest-age range, derived
/// oldest age. The first failing check wins.
pub fn validate_family_options(options: &FamilyOptions) -> Result<(), AppError> {
    if options.number_of_children < MIN_CHILDREN || options.number_of_children > MAX_CHILDREN {
        return Err(AppError::InvalidOptions(
            "Number of children must be between 1 and 6".to_string(),
        ));
    }

    if options.age_gap < MIN_AGE_GAP || options.age_gap > MAX_AGE_GAP {
        return Err(AppError::InvalidOptions(
            "Age gap must be between 1 and 5 years".to_string(),
        ));
    }

    if options.youngest_age < MIN_YOUNGEST_AGE || options.youngest_age > MAX_YOUNGEST_AGE {
        return Err(AppError::InvalidOptions(
            "Youngest age must be between 1 and 12 years".to_string(),
        ));
    }

    if options.oldest_age() > MAX_OLDEST_AGE {
        return Err(AppError::InvalidOptions(
            "With these settings, the oldest child would be over 18 years old. \
             Please adjust the parameters."
                .to_string(),
        ));
    }

    Ok(())
}

/// Full family-mode validation in contract order: parent images first, then
/// the option constraints.
pub fn validate_family_request(
    parent1: &UploadedImage,
    parent2: &UploadedImage,
    options: &FamilyOptions,
) -> Result<(), AppError> {
    validate_parent_images(parent1, parent2)?;
    validate_family_options(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn image(content_type: &str, data: &[u8]) -> UploadedImage {
        UploadedImage::new(
            Bytes::copy_from_slice(data),
            "portrait.jpg",
            content_type,
        )
    }

    #[test]
    fn test_valid_image_types() {
        for ct in ["image/jpeg", "image/jpg", "image/png", "image/webp"] {
            assert!(image_rejection(&image(ct, b"pixels")).is_none(), "{}", ct);
        }
    }

    #[test]
    fn test_empty_payload_rejected_before_type() {
        let img = image("text/plain", b"");
        assert_eq!(image_rejection(&img), Some("Uploaded file is empty"));
    }

    #[test]
    fn test_unsupported_type_rejected_regardless_of_content() {
        let img = image("text/plain", b"\xFF\xD8\xFF\xE0 actual jpeg bytes");
        assert_eq!(
            image_rejection(&img),
            Some("Invalid file type. Only JPEG, PNG, and WebP images are allowed")
        );
    }

    #[test]
    fn test_content_type_parameters_are_ignored() {
        let img = image("image/PNG; charset=utf-8", b"pixels");
        assert!(image_rejection(&img).is_none());
    }

    #[test]
    fn test_parent_slot_named_in_message() {
        let good = image("image/jpeg", b"pixels");
        let bad = UploadedImage::new(Bytes::new(), "mom.png", "image/png");

        let err = validate_parent_images(&good, &bad).unwrap_err();
        let msg = crate::error::ErrorMetadata::client_message(&err);
        assert!(msg.starts_with("Parent 2 (mom.png):"), "{}", msg);

        let err = validate_parent_images(&bad, &good).unwrap_err();
        let msg = crate::error::ErrorMetadata::client_message(&err);
        assert!(msg.starts_with("Parent 1 (mom.png):"), "{}", msg);
    }

    fn family(n: i64, gap: i64, youngest: i64) -> FamilyOptions {
        FamilyOptions {
            number_of_children: n,
            age_gap: gap,
            youngest_age: youngest,
            ..FamilyOptions::default()
        }
    }

    #[test]
    fn test_family_options_pass_iff_oldest_at_most_18() {
        // Exhaustive over the documented ranges: validation passes exactly when
        // youngest + (n-1)*gap <= 18.
        for n in 1..=6 {
            for gap in 1..=5 {
                for youngest in 1..=12 {
                    let options = family(n, gap, youngest);
                    let expected_ok = youngest + (n - 1) * gap <= 18;
                    assert_eq!(
                        validate_family_options(&options).is_ok(),
                        expected_ok,
                        "n={} gap={} youngest={}",
                        n,
                        gap,
                        youngest
                    );
                }
            }
        }
    }

    #[test]
    fn test_family_options_examples() {
        assert!(validate_family_options(&family(3, 2, 5)).is_ok());

        let err = validate_family_options(&family(6, 5, 12)).unwrap_err();
        let msg = crate::error::ErrorMetadata::client_message(&err);
        assert!(msg.contains("oldest child"), "{}", msg);
    }

    #[test]
    fn test_first_violation_wins() {
        // Both children count and age gap are out of range; children is
        // checked first.
        let err = validate_family_options(&family(9, 9, 4)).unwrap_err();
        let msg = crate::error::ErrorMetadata::client_message(&err);
        assert_eq!(msg, "Number of children must be between 1 and 6");
    }

    #[test]
    fn test_range_messages() {
        let msg = |o: FamilyOptions| {
            crate::error::ErrorMetadata::client_message(&validate_family_options(&o).unwrap_err())
        };
        assert_eq!(msg(family(7, 2, 4)), "Number of children must be between 1 and 6");
        assert_eq!(msg(family(2, 6, 4)), "Age gap must be between 1 and 5 years");
        assert_eq!(msg(family(2, 2, 13)), "Youngest age must be between 1 and 12 years");
        assert_eq!(msg(family(2, 2, -1)), "Youngest age must be between 1 and 12 years");
    }

    #[test]
    fn test_family_request_checks_images_before_options() {
        let bad_image = UploadedImage::new(Bytes::new(), "dad.jpg", "image/jpeg");
        let good_image = image("image/jpeg", b"pixels");
        let bad_options = family(9, 9, 99);

        let err = validate_family_request(&bad_image, &good_image, &bad_options).unwrap_err();
        assert!(matches!(err, AppError::InvalidImage(_)));
    }
}
