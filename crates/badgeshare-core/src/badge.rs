//! Badge counting.
//!
//! A badge configuration is a newline-delimited list. Every non-empty line
//! that does not start with `#` is one badge; `#` lines are comments.

/// Iterate over the badge lines of a configuration.
pub fn badge_lines(content: &str) -> impl Iterator<Item = &str> {
    content
        .split('\n')
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

/// Count the badges in a configuration.
pub fn count_badges(content: &str) -> usize {
    badge_lines(content).count()
}
