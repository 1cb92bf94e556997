//! Canned content the demo flows run against.

/// Paragraphs the emulated document starts with. The default `--select`
/// needle matches the start of the first one.
pub const SEED_PARAGRAPHS: &[&str] = &[
    "Office 365 subscriptions receive monthly feature updates.",
    "Office 2016 and Office 2019 are one-time purchases.",
];

/// A 1x1 PNG, standing in for a bundled logo asset.
pub const BASE64_IMAGE: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";
