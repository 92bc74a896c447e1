// crates/core/src/stats.rs
//! Derived task statistics.
//!
//! Everything here is recomputed from the task list on demand — nothing is
//! stored. Functions take "now"/"today" explicitly so tests never depend on
//! the wall clock.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::types::Task;

/// Forward window for the urgent-task set.
pub const URGENT_WINDOW_DAYS: i64 = 3;

/// Bucket label for tasks without a subject.
pub const UNSPECIFIED_SUBJECT: &str = "Unspecified";

/// Completed tasks per calendar day, for the weekly productivity series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCompletion {
    pub date: NaiveDate,
    pub completed: usize,
}

/// Task count per subject label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectCount {
    pub subject: String,
    pub count: usize,
}

/// Completed/total as a rounded integer percentage. 0 for an empty list.
pub fn completion_rate(tasks: &[Task]) -> u8 {
    if tasks.is_empty() {
        return 0;
    }
    let completed = tasks.iter().filter(|t| t.is_completed).count();
    ((completed as f64 / tasks.len() as f64) * 100.0).round() as u8
}

/// Incomplete tasks whose deadline falls at or before `now + 3 days`.
/// Overdue tasks count as urgent.
pub fn urgent_tasks<'a>(tasks: &'a [Task], now: DateTime<Utc>) -> Vec<&'a Task> {
    let cutoff = now + Duration::days(URGENT_WINDOW_DAYS);
    tasks
        .iter()
        .filter(|t| !t.is_completed)
        .filter(|t| t.deadline_at.is_some_and(|d| d <= cutoff))
        .collect()
}

/// Consecutive calendar days, walking backward from `today`, with at least
/// one completed task. A completion-free today does not break the streak;
/// the first gap before that does.
pub fn day_streak(tasks: &[Task], today: NaiveDate) -> u32 {
    let completion_days: HashSet<NaiveDate> = tasks
        .iter()
        .filter(|t| t.is_completed)
        .map(|t| t.updated_at.date_naive())
        .collect();

    let mut streak = 0;
    for offset in 0i64.. {
        let day = today - Duration::days(offset);
        if completion_days.contains(&day) {
            streak += 1;
        } else if offset > 0 {
            break;
        }
    }
    streak
}

/// Completed-task counts for the trailing 7 days including `today`,
/// bucketed by the day the task was last updated.
pub fn weekly_productivity(tasks: &[Task], today: NaiveDate) -> Vec<DailyCompletion> {
    (0..7)
        .rev()
        .map(|back| {
            let date = today - Duration::days(back);
            let completed = tasks
                .iter()
                .filter(|t| t.is_completed && t.updated_at.date_naive() == date)
                .count();
            DailyCompletion { date, completed }
        })
        .collect()
}

/// Task counts grouped by subject label, subjectless tasks under a single
/// "Unspecified" bucket. Sorted by count descending, then name.
pub fn subject_distribution(tasks: &[Task]) -> Vec<SubjectCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for task in tasks {
        let subject = task.subject.as_deref().unwrap_or(UNSPECIFIED_SUBJECT);
        *counts.entry(subject).or_default() += 1;
    }
    let mut out: Vec<SubjectCount> = counts
        .into_iter()
        .map(|(subject, count)| SubjectCount {
            subject: subject.to_string(),
            count,
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.subject.cmp(&b.subject)));
    out
}
