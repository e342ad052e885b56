//! Markdown renderers for the three documents this workspace writes.
//!
//! All renderers are pure: every wall-clock value is passed in, so identical
//! inputs always produce identical output.

use crate::{ContributionDate, Timestamp};

/// The daily log document for `date`.
///
/// `prior_count` is the number of records persisted before this run; the
/// document reports itself as contribution `prior_count + 1`.
pub fn daily_log(
    date: ContributionDate,
    content: &str,
    prior_count: usize,
    generated_at: Timestamp,
) -> String {
    format!(
        "# Daily Contribution - {date}

Date: {long_date}
Day: {weekday}

## Content

{content}

## Statistics

- Contribution #{sequence}
- Generated at: {time} UTC

---
*This contribution was generated automatically to maintain consistent GitHub activity.*
",
        long_date = date.long_form(),
        weekday = date.weekday_name(),
        sequence = prior_count + 1,
        time = generated_at.clock_time(),
    )
}

/// The repository README summarising all contributions so far.
pub fn summary(total: usize, date: ContributionDate, updated_at: Timestamp) -> String {
    format!(
        "# Auto-Contribution Repository

This repository maintains daily GitHub contributions automatically.

## Statistics

- Total Contributions: {total}
- Last Updated: {date}
- Current Streak: Active

## Recent Activity

Check the [daily logs](./contributions/daily_logs/) for detailed contribution history.

## Features

- 🔄 Daily automated contributions
- 🤖 AI-powered content generation
- 📊 Contribution tracking
- 🐛 Automatic issue solving
- 📈 GitHub profile optimization

---
*Last updated: {updated_date} {updated_time} UTC*
",
        updated_date = updated_at.date(),
        updated_time = updated_at.clock_time(),
    )
}

/// The comment body posted on an issue around a generated `analysis`.
pub fn issue_comment(analysis: &str, generated_at: Timestamp) -> String {
    format!(
        "## AI Analysis & Suggestions

{analysis}

---
*This analysis was generated automatically by an AI assistant. Please review and adapt the suggestions as needed.*

*Generated on: {date} {time} UTC*
",
        date = generated_at.date(),
        time = generated_at.clock_time(),
    )
}
