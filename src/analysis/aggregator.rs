//! Language statistics aggregation.
//!
//! Turns a user's repositories into a percentage breakdown of their
//! languages. Percentages use truncating integer division, so the
//! values of a non-empty breakdown may add up to less than 100.

use crate::models::{Repo, Stats, UNKNOWN_CATEGORY};
use std::collections::HashMap;

/// Compute the language breakdown of a set of repositories.
///
/// Repositories without a language count as `unknown`. An empty slice
/// yields empty stats.
pub fn compute_stats(repos: &[Repo]) -> Stats {
    percentage_breakdown(repos.iter().map(Repo::category))
}

/// Tally categories and convert each count to `count * 100 / total`.
pub fn percentage_breakdown<'a, I>(categories: I) -> Stats
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<&str, u32> = HashMap::new();
    let mut total: u32 = 0;

    for category in categories {
        let category = if category.is_empty() {
            UNKNOWN_CATEGORY
        } else {
            category
        };
        *counts.entry(category).or_default() += 1;
        total += 1;
    }

    let mut stats = Stats::new();
    if total == 0 {
        return stats;
    }

    for (category, count) in counts {
        stats.insert(category, count * 100 / total);
    }

    stats
}
