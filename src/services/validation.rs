use regex::Regex;
use std::sync::OnceLock;

/// Extensions accepted for uploaded photos
pub const ALLOWED_IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

static EMAIL_PATTERN: OnceLock<Regex> = OnceLock::new();

fn extension(filename: &str) -> Option<String> {
    filename.rsplit_once('.')
        .map(|(_, ext)| ext.trim().to_lowercase())
        .filter(|ext| !ext.is_empty())
}

/// Whether the filename carries an allowed image extension
pub fn is_allowed_image(filename: &str) -> bool {
    extension(filename).is_some_and(|ext| ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// MIME type for an allowed image filename
pub fn image_mime_type(filename: &str) -> Option<&'static str> {
    match extension(filename)?.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

pub fn is_valid_email(email: &str) -> bool {
    let pattern = EMAIL_PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
    });
    pattern.is_match(email.trim())
}
