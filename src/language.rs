//! Language codes and script classification
//!
//! The engine only ever reasons about two languages: the primary language of
//! a record (French by default) and Arabic for the localized slot. Providers
//! may still report any ISO 639-1 code, so everything here works on plain
//! lowercase code strings.

use crate::error::{SyncError, SyncResult};

/// Code for the localized (Arabic) slot
pub const ARABIC: &str = "ar";

/// Default code for the primary slot
pub const FRENCH: &str = "fr";

/// Code the script heuristic reports for Latin-dominated text
pub const ENGLISH: &str = "en";

/// Undetermined-language code returned by some providers
pub const UNDETERMINED: &str = "und";

/// Normalize a language code by stripping region information
///
/// - `fr-FR` → `fr`
/// - `ar_EG` → `ar`
/// - `EN` → `en`
pub fn normalize_language(code: &str) -> String {
    code.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or(code)
        .to_lowercase()
}

/// Validate that a language code only contains alphanumerics, hyphens and underscores
pub fn validate_language(code: &str) -> SyncResult<()> {
    if code.is_empty() {
        return Err(SyncError::InvalidLanguage(
            "Language code is empty".to_string(),
        ));
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(SyncError::InvalidLanguage(format!(
            "Invalid characters in language code: {}",
            code
        )));
    }

    Ok(())
}

/// Whether a detected language code means Arabic
///
/// Accepts region-tagged codes (`ar-SA`) and the spelled-out name some
/// detectors return.
pub fn is_arabic(code: &str) -> bool {
    let normalized = normalize_language(code);
    normalized == ARABIC || normalized == "arabic"
}

fn is_arabic_char(c: char) -> bool {
    ('\u{0600}'..='\u{06FF}').contains(&c)
}

fn is_basic_latin_char(c: char) -> bool {
    ('\u{0020}'..='\u{007F}').contains(&c)
}

/// Classify text by counting characters per script
///
/// Characters in the Arabic block (U+0600–U+06FF) are compared with those in
/// basic Latin (U+0020–U+007F, spaces included). Arabic wins only with a
/// strict majority; ties and everything else report English.
pub fn detect_by_script(text: &str) -> &'static str {
    let (arabic, latin) = text.chars().fold((0usize, 0usize), |(ar, la), c| {
        if is_arabic_char(c) {
            (ar + 1, la)
        } else if is_basic_latin_char(c) {
            (ar, la + 1)
        } else {
            (ar, la)
        }
    });

    if arabic > latin { ARABIC } else { ENGLISH }
}
