use crate::remote::User;

/// Normalize a raw search term: surrounding whitespace dropped, lowercased.
pub fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Case-insensitive substring match on the user's name.
///
/// `query` must already be normalized; an empty query matches everyone.
pub fn matches_name(user: &User, query: &str) -> bool {
    query.is_empty() || user.name.to_lowercase().contains(query)
}
