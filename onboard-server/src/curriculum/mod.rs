//! Curriculum Definition
//!
//! The static, process-wide catalog of onboarding training days and
//! access-control checklist items. Loaded once, never mutated, shared
//! read-only by all callers.
//!
//! The onboarding and offboarding access-control tables overlap in item
//! names but carry different semantics (granting vs. revoking), so they
//! are two independent tables and are never merged.

use serde::Serialize;

use crate::db::models::TaskMap;

/// Ordered training days, each an ordered sequence of task names
pub const TRAINING_DAYS: &[(&str, &[&str])] = &[
    ("Day 1", &["FERPA Training", "Color Code Personality"]),
    ("Day 2", &["TeamDynamix", "FERPA Restrictions", "Meet with KM Team"]),
    (
        "Day 3",
        &["Call Rubric w/ Auditor", "ZOHO quiz", "Day 3 Call Shadowing"],
    ),
    (
        "Day 4",
        &[
            "Chat Rubric w/ Auditor",
            "Day 4 Chat Shadowing",
            "Ticket Definitions Quiz",
        ],
    ),
    (
        "Day 5",
        &[
            "Ticket Rubric w/ Auditor",
            "Meet with Ticketing Team",
            "Password Reset Scenario (Call)",
            "Password Reset Scenario (Chat)",
            "Day 5 Shadowing",
        ],
    ),
    (
        "Day 6",
        &[
            "Classroom Emergency Ticket",
            "DUO Scenario",
            "Zoom/Kaltura Scenario",
        ],
    ),
    ("Day 7", &["Common Troubleshooting", "Supervised Chats"]),
    (
        "Day 8",
        &[
            "Account Issues",
            "Adobe Creative Cloud",
            "Supervised Phone Calls",
            "Supervised Chats",
        ],
    ),
    (
        "Day 9",
        &[
            "Pathway Students",
            "Day 9 Shadowing",
            "Supervised Calls",
            "Supervised Chats",
        ],
    ),
    ("Day 10", &["Daily 4", "Final Exam", "Exit One-on-One"]),
];

/// Access-control checklist item; some items carry a reference URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AccessControlItem {
    pub name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_url: Option<&'static str>,
}

/// Checklist worked through when a hire is granted access
pub const ONBOARDING_ACCESS_CONTROLS: &[AccessControlItem] = &[
    AccessControlItem {
        name: "KB Catalog",
        reference_url: Some("https://kb.byui.edu"),
    },
    AccessControlItem {
        name: "Teams",
        reference_url: None,
    },
    AccessControlItem {
        name: "Proxy Card",
        reference_url: None,
    },
    AccessControlItem {
        name: "Proxy Card Access",
        reference_url: None,
    },
    AccessControlItem {
        name: "Onboarding with Governance",
        reference_url: Some("https://td.byui.edu/onboarding"),
    },
    AccessControlItem {
        name: "Name Tags",
        reference_url: None,
    },
];

/// Checklist worked through when a leaver's access is revoked
pub const OFFBOARDING_ACCESS_CONTROLS: &[AccessControlItem] = &[
    AccessControlItem {
        name: "Proxy Card Access",
        reference_url: None,
    },
    AccessControlItem {
        name: "Teams",
        reference_url: None,
    },
    AccessControlItem {
        name: "KB Catalog",
        reference_url: Some("https://kb.byui.edu"),
    },
    AccessControlItem {
        name: "TeamDynamix",
        reference_url: Some("https://td.byui.edu"),
    },
    AccessControlItem {
        name: "ZOHO Desk",
        reference_url: Some("https://desk.zoho.com"),
    },
    AccessControlItem {
        name: "Name Tags",
        reference_url: None,
    },
];

/// Ordered mapping of training day to its task names
pub fn training_days() -> &'static [(&'static str, &'static [&'static str])] {
    TRAINING_DAYS
}

/// Tasks for a single day, if the day exists in the curriculum
pub fn tasks_for_day(day: &str) -> Option<&'static [&'static str]> {
    TRAINING_DAYS
        .iter()
        .find(|(d, _)| *d == day)
        .map(|(_, tasks)| *tasks)
}

pub fn onboarding_access_controls() -> &'static [AccessControlItem] {
    ONBOARDING_ACCESS_CONTROLS
}

pub fn offboarding_access_controls() -> &'static [AccessControlItem] {
    OFFBOARDING_ACCESS_CONTROLS
}

/// Total number of tasks across all training days
pub fn total_task_count() -> usize {
    TRAINING_DAYS.iter().map(|(_, tasks)| tasks.len()).sum()
}

/// Fraction of curriculum tasks marked done in the given completion map.
///
/// Only keys defined by the curriculum count toward the ratio; an empty
/// map yields 0.0, never a division error.
pub fn completion_ratio(tasks: &TaskMap) -> f64 {
    let total = total_task_count();
    if total == 0 {
        return 0.0;
    }

    let mut done = 0usize;
    for (day, day_tasks) in TRAINING_DAYS {
        if let Some(recorded) = tasks.get(*day) {
            done += day_tasks
                .iter()
                .filter(|task| recorded.get(**task).copied().unwrap_or(false))
                .count();
        }
    }

    done as f64 / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn ten_days_in_order() {
        assert_eq!(TRAINING_DAYS.len(), 10);
        assert_eq!(TRAINING_DAYS[0].0, "Day 1");
        assert_eq!(TRAINING_DAYS[9].0, "Day 10");
    }

    #[test]
    fn day_lookup() {
        let day1 = tasks_for_day("Day 1").unwrap();
        assert_eq!(day1, &["FERPA Training", "Color Code Personality"]);
        assert!(tasks_for_day("Day 11").is_none());
    }

    #[test]
    fn completion_ratio_empty_map_is_zero() {
        let tasks = TaskMap::new();
        assert_eq!(completion_ratio(&tasks), 0.0);
    }

    #[test]
    fn completion_ratio_counts_only_done_curriculum_tasks() {
        let mut day1 = BTreeMap::new();
        day1.insert("FERPA Training".to_string(), true);
        day1.insert("Color Code Personality".to_string(), false);
        // Key outside the curriculum must not inflate the ratio
        day1.insert("Invented Task".to_string(), true);

        let mut tasks = TaskMap::new();
        tasks.insert("Day 1".to_string(), day1);

        let ratio = completion_ratio(&tasks);
        assert!(ratio > 0.0 && ratio < 1.0);
        assert_eq!(ratio, 1.0 / total_task_count() as f64);
    }

    #[test]
    fn completion_ratio_full_curriculum_is_one() {
        let mut tasks = TaskMap::new();
        for (day, day_tasks) in TRAINING_DAYS {
            let done: BTreeMap<String, bool> =
                day_tasks.iter().map(|t| (t.to_string(), true)).collect();
            tasks.insert(day.to_string(), done);
        }
        assert_eq!(completion_ratio(&tasks), 1.0);
    }

    #[test]
    fn access_control_tables_are_independent() {
        // Overlapping names exist, but the tables are separate values
        let on: Vec<_> = ONBOARDING_ACCESS_CONTROLS.iter().map(|i| i.name).collect();
        let off: Vec<_> = OFFBOARDING_ACCESS_CONTROLS.iter().map(|i| i.name).collect();
        assert!(on.contains(&"Teams") && off.contains(&"Teams"));
        assert_ne!(on, off);
    }
}
