//! Postal code normalization.
//!
//! Valid codes for the extract's region start with `94`. Extended
//! `ZIP+4` forms are truncated to the 5-digit code; everything else
//! falls back to a one-off table or a lossy 5-character prefix.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// 5-digit regional code with an optional 4-digit extension.
static ZIP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(94\d{3})(-\d{4})?$").unwrap());

/// Known-erroneous codes and their corrections. A structurally valid code
/// that appears as a key here is still treated as erroneous.
static ONE_OFFS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("14123", "94123"),
        ("41907", "94107"),
        ("90214", "94109"),
        ("95115", "94115"),
        ("CA", "94133"),
        ("94113", "94133"),
        ("94087", "94107"),
        ("94013", "94103"),
    ])
});

/// Clean a raw postal code into a 5-digit regional code.
///
/// The fallback for unmatched input is the first 5 characters of the raw
/// value; that may be semantically invalid and is accepted as lossy.
pub fn normalize_zip(raw: &str) -> String {
    if let Some(caps) = ZIP_RE.captures(raw) {
        let code = &caps[1];
        if !ONE_OFFS.contains_key(code) {
            return code.to_string();
        }
    }
    if let Some(fixed) = ONE_OFFS.get(raw) {
        return (*fixed).to_string();
    }
    raw.chars().take(5).collect()
}
