//! Choosing which open issues one run of the issue job works on.

use crate::Issue;

/// Upper bound on issues analysed per run.
pub const MAX_ISSUES_PER_RUN: usize = 5;

/// Drops pull requests, then keeps the first [`MAX_ISSUES_PER_RUN`] issues in
/// listing order. No other prioritisation is applied.
pub fn select_issues(issues: Vec<Issue>) -> Vec<Issue> {
    issues
        .into_iter()
        .filter(|issue| !issue.is_pull_request)
        .take(MAX_ISSUES_PER_RUN)
        .collect()
}
