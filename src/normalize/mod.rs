//! Field normalization for semi-structured address data.
//!
//! Street names, phone numbers, and postal codes in a map extract are
//! free-form and inconsistently formatted. Each normalizer here is a pure
//! function over a single raw value: it applies a fixed sequence of
//! heuristic rules, first match wins, and degrades to a best-effort (or
//! empty) result instead of failing.
//!
//! The one-off correction tables were assembled by auditing a real
//! San Francisco extract; they are exact-match lookups that override the
//! algorithmic rules for known bad inputs.

pub mod phone;
pub mod street;
pub mod zipcode;

pub use phone::normalize_phone;
pub use street::normalize_street;
pub use zipcode::normalize_zip;
