//! ID prefix constants.
//!
//! IDs are `{prefix}-{8 hex chars}`, generated by the store (see `venture-db`).

pub const PREFIX_SESSION: &str = "ses";
pub const PREFIX_EVENT: &str = "evt";

/// Every prefix issued by the store.
pub const ALL_PREFIXES: &[&str] = &[PREFIX_SESSION, PREFIX_EVENT];

/// Format an ID from a prefix and a hex suffix.
#[must_use]
pub fn format_id(prefix: &str, hex: &str) -> String {
    format!("{prefix}-{hex}")
}

/// Check whether `id` carries the given prefix followed by 8 hex chars.
#[must_use]
pub fn has_prefix(id: &str, prefix: &str) -> bool {
    id.split_once('-').is_some_and(|(p, rest)| {
        p == prefix && rest.len() == 8 && rest.chars().all(|c| c.is_ascii_hexdigit())
    })
}
