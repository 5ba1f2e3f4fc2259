use crate::core::{Issue, IssueFilter};
use std::cmp::Ordering;

/// Newest first: descending year, then descending issue number.
fn newest_first(a: &Issue, b: &Issue) -> Ordering {
    b.year
        .cmp(&a.year)
        .then_with(|| b.issue_number.cmp(&a.issue_number))
}

pub fn filter_and_sort(issues: Vec<Issue>, filter: &IssueFilter) -> Vec<Issue> {
    let mut selected: Vec<Issue> = issues
        .into_iter()
        .filter(|issue| filter.year.map_or(true, |year| issue.year == year))
        .filter(|issue| {
            filter
                .issue_number
                .map_or(true, |number| issue.issue_number == number)
        })
        .collect();

    // sort_by 為穩定排序，相同 (year, issue_number) 保留來源順序
    selected.sort_by(newest_first);

    if let Some(first) = filter.first {
        selected.truncate(first);
    }

    selected
}

pub fn latest(issues: Vec<Issue>) -> Option<Issue> {
    filter_and_sort(issues, &IssueFilter::default())
        .into_iter()
        .next()
}
