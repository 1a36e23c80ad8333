//! Street name normalization.
//!
//! Cleans `addr:street`-style values into full street names: strips house
//! and suite numbers, title-cases, applies exact-match correction tables,
//! and expands abbreviated street suffixes (`St` → `Street`).

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Route and pier designations that do not follow street suffix
/// conventions. Returned unchanged.
const SPECIAL_STREETS: [&str; 4] = [
    "San Francisco Bicycle Route 2",
    "Pier 39",
    "SF 80 PM 4.5",
    "Broadway",
];

/// Leading house number: `123 Main St`, `#4 Embarcadero Center`.
static LEADING_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#?\d+)\s(.*)").unwrap());

/// Trailing suite or unit number: `Market St #301`, `Townsend Suite 100`.
static TRAILING_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*?)(?:\sSte|\sSuite)?\s#?\d+$").unwrap());

/// Trailing whitespace-delimited token, optionally ending in a period.
static STREET_TYPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\S+\.?$").unwrap());

/// Abbreviated street suffixes and their expansions.
static SUFFIX_EXPANSIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("St", "Street"),
        ("St.", "Street"),
        ("street", "Street"),
        ("st", "Street"),
        ("AVE", "Avenue"),
        ("Ave", "Avenue"),
        ("Ave.", "Avenue"),
        ("Blvd", "Boulevard"),
        ("Blvd.", "Boulevard"),
        ("Cresc", "Crescent"),
        ("Hwy", "Highway"),
        ("Dr", "Drive"),
        ("Ln.", "Lane"),
        ("Rd", "Road"),
        ("Rd.", "Road"),
        ("Pl", "Plaza"),
        ("Bldg", "Building"),
    ])
});

/// Bare names missing their suffix, mapped to the full designation.
static MISSING_SUFFIXES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("15th", "15th Street"),
        ("Vallejo", "Vallejo Street"),
        ("Mason", "Mason Street"),
        ("Pollard", "Pollard Street"),
        ("South Park", "South Park Street"),
        ("Van Ness", "Van Ness Avenue"),
        ("Wedemeyer", "Wedemeyer Street"),
        ("Hyde", "Hyde Street"),
        ("Gough", "Gough Street"),
        ("Post", "Post Street"),
        ("Pier", "Pier 40 A"),
        ("New Montgomery", "New Montgomery Street"),
        ("Mission Rock", "Mission Rock Street"),
        ("Pacific Avenue Mall", "Pacific Avenue"),
        ("Broadway Street", "Broadway"),
        ("California", "California Street"),
        ("King", "King Street"),
    ])
});

/// One-off fixes for names no rule can repair.
static ONE_OFFS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Cesar Chavez St St", "Cesar Chavez Street"),
        ("19th & Linda San Francisco", "Linda Street"),
        ("Bay And Powell", "Bay Street"),
        ("Multi Use Building", "Phelan Avenue"),
        ("Murray Street And Justin Drive", "Justin Drive"),
        ("Willard North", "North Willard Street"),
        ("14th St, San Francisco ", "14th Street"),
        ("Broadway Street; Mason Street", "Mason Street"),
        ("One Letterman Drive", "Letterman Drive"),
    ])
});

/// Clean a raw street name into its full canonical form.
///
/// Rules apply in order, first match wins: special-case exemptions, house
/// and suite number stripping, title-casing, the missing-suffix table, the
/// one-off table, and finally trailing suffix expansion. Unrecognized
/// names are returned unchanged.
pub fn normalize_street(raw: &str) -> String {
    if SPECIAL_STREETS.contains(&raw) {
        return raw.to_string();
    }

    let mut name = raw.to_string();
    if let Some(caps) = LEADING_NUMBER.captures(&name) {
        name = caps[2].to_string();
    }
    if let Some(caps) = TRAILING_NUMBER.captures(&name) {
        name = caps[1].to_string();
    }

    let starts_numeric = name
        .split_whitespace()
        .next()
        .and_then(|token| token.chars().next())
        .map(|c| c.is_ascii_digit())
        .unwrap_or(false);
    if !starts_numeric {
        name = title_case(&name);
    }

    if let Some(fixed) = MISSING_SUFFIXES.get(name.as_str()) {
        return (*fixed).to_string();
    }
    if let Some(fixed) = ONE_OFFS.get(name.as_str()) {
        return (*fixed).to_string();
    }

    if let Some(m) = STREET_TYPE.find(&name) {
        if let Some(expansion) = SUFFIX_EXPANSIONS.get(m.as_str()) {
            let mut expanded = name[..m.start()].to_string();
            expanded.push_str(expansion);
            return expanded;
        }
    }
    name
}

/// Uppercase the first letter of each alphabetic run, lowercase the rest.
fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_alphabetic = false;
    for c in name.chars() {
        if c.is_alphabetic() {
            if prev_alphabetic {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alphabetic = true;
        } else {
            out.push(c);
            prev_alphabetic = false;
        }
    }
    out
}
