//! Case-insensitive search over the member list.

use crate::Member;

/// Lowercases and trims a raw search box value.
pub fn normalize_term(term: &str) -> String {
    term.to_lowercase().trim().to_owned()
}

/// Members matching `term` on id, name, email or role, in their original order.
///
/// An empty (or whitespace-only) term keeps everyone.
pub fn filter_members<'a>(members: &'a [Member], term: &str) -> Vec<&'a Member> {
    let needle = normalize_term(term);
    if needle.is_empty() {
        return members.iter().collect();
    }
    members
        .iter()
        .filter(|member| member.matches(&needle))
        .collect()
}
