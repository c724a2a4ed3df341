//! Genre tags attached to venues and artists
//!
//! Tags are stored as a JSON array in a single text column. Rows written by
//! the old schema hold a comma-joined string instead; those are still read
//! back as a list.

/// Encode a tag list for storage
pub fn to_column(genres: &[String]) -> String {
    serde_json::to_string(genres).unwrap_or_else(|_| "[]".to_string())
}

/// Decode a stored tag list, accepting the legacy comma-joined form
pub fn from_column(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    if trimmed.starts_with('[') {
        if let Ok(list) = serde_json::from_str::<Vec<String>>(trimmed) {
            return list;
        }
    }

    split_legacy(trimmed)
}

/// Split a legacy comma-joined value
pub fn split_legacy(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(String::from)
        .collect()
}

/// Whether a stored value is in the legacy comma-joined form
pub fn is_legacy(raw: &str) -> bool {
    let trimmed = raw.trim();
    !trimmed.is_empty() && serde_json::from_str::<Vec<String>>(trimmed).is_err()
}

/// Genre choices offered by the venue and artist forms
pub const GENRE_CHOICES: [&str; 19] = [
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];
