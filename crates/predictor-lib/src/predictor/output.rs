//! Human-readable result formatting

pub const DISEASE_DETECTED: &str = "Heart Disease Detected";
pub const NO_DISEASE_DETECTED: &str = "No Heart Disease Detected";

/// Text rendering of a class label
pub fn result_text(label: u8) -> &'static str {
    if label == 1 {
        DISEASE_DETECTED
    } else {
        NO_DISEASE_DETECTED
    }
}
