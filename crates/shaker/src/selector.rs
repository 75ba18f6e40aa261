//! Selector canonicalization.

use indexmap::IndexSet;
use shaker_config::SELECTOR_SEPARATOR;

fn segments(selector: &str) -> usize {
    selector.split(SELECTOR_SEPARATOR).count()
}

/// `prefix` followed by a separator starts `selector`.
fn is_boundary_prefix(prefix: &str, selector: &str) -> bool {
    selector.len() > prefix.len()
        && selector.starts_with(prefix)
        && selector[prefix.len()..].starts_with(SELECTOR_SEPARATOR)
}

/// Reduce produced selectors to the minimal, most specific set.
///
/// Duplicates are dropped, the rest is stable-sorted by segment count and
/// any selector that another one extends (`common-login` next to
/// `common-login-mobile`) is removed.
pub fn canonicalize<I, S>(selectors: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let unique: IndexSet<String> = selectors.into_iter().map(Into::into).collect();
    let mut sorted: Vec<String> = unique.into_iter().collect();
    sorted.sort_by_key(|selector| segments(selector));

    sorted
        .iter()
        .filter(|selector| {
            !sorted
                .iter()
                .any(|other| is_boundary_prefix(selector, other))
        })
        .cloned()
        .collect()
}
