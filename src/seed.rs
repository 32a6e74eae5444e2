//! First-run board contents.

use chrono::{DateTime, Utc};

use crate::{
    task::{Task, TaskId},
    task_priority::TaskPriority,
    task_status::TaskStatus,
};

// (id, title, description, status, priority, created_at)
const SEED: [(&str, &str, &str, TaskStatus, TaskPriority, &str); 13] = [
    (
        "task-001",
        "#4: Daily Email Triage",
        "Morning digest of unread emails with AI-powered priority classification.",
        TaskStatus::Done,
        TaskPriority::High,
        "2026-02-01T12:00:00Z",
    ),
    (
        "task-002",
        "#5: Inbox Zero Maintainer",
        "Auto-filters and cleanup rules for newsletters, promotions.",
        TaskStatus::Done,
        TaskPriority::High,
        "2026-02-01T12:00:00Z",
    ),
    (
        "task-003",
        "#10: Daily Briefing Generator",
        "Morning briefing combining email summary, calendar, priorities.",
        TaskStatus::Done,
        TaskPriority::High,
        "2026-02-01T12:00:00Z",
    ),
    (
        "task-004",
        "Kanban Board",
        "Built and deployed Kanban board.",
        TaskStatus::Done,
        TaskPriority::Medium,
        "2026-02-01T15:30:00Z",
    ),
    (
        "task-005",
        "VERCEL_TOKEN Setup",
        "Set up VERCEL_TOKEN for direct Kanban deploys",
        TaskStatus::Done,
        TaskPriority::Medium,
        "2026-02-01T16:00:00Z",
    ),
    (
        "task-006",
        "QMD Installation",
        "Install QMD for better memory search",
        TaskStatus::Done,
        TaskPriority::Medium,
        "2026-02-01T17:00:00Z",
    ),
    (
        "task-007",
        "Email Automation Crons",
        "Set up triage/briefing/cleanup cron cycle",
        TaskStatus::Done,
        TaskPriority::High,
        "2026-02-01T18:00:00Z",
    ),
    (
        "task-008",
        "Maintenance Engagement Scheduler",
        "Prevents behavioral cliff detection on posting accounts",
        TaskStatus::InProgress,
        TaskPriority::High,
        "2026-02-02T08:00:00Z",
    ),
    (
        "task-009",
        "Posting Time Shift",
        "Shift posting window to 7-9 PM EST (peak usage hours)",
        TaskStatus::InProgress,
        TaskPriority::High,
        "2026-02-02T08:00:00Z",
    ),
    (
        "task-010",
        "Calendar OAuth Scope",
        "Fix daily briefing to use correct OAuth token with calendar scope",
        TaskStatus::Done,
        TaskPriority::Medium,
        "2026-02-02T16:55:00Z",
    ),
    (
        "task-011",
        "#7: Team Velocity Tracker",
        "Track team productivity metrics.",
        TaskStatus::Backlog,
        TaskPriority::Medium,
        "2026-01-31T18:24:00Z",
    ),
    (
        "task-012",
        "#8: Prompt Library Manager",
        "Searchable collection of prompts used across the business.",
        TaskStatus::Backlog,
        TaskPriority::Medium,
        "2026-01-31T18:24:00Z",
    ),
    (
        "task-013",
        "Distribution Context",
        "Waiting for context about posting, analyzing, software.",
        TaskStatus::Backlog,
        TaskPriority::High,
        "2026-02-01T15:18:00Z",
    ),
];

/// The fixed seed set, in board order.
pub fn seed_tasks() -> Vec<Task> {
    SEED.iter()
        .map(|&(id, title, description, status, priority, created_at)| Task {
            id: TaskId::from(id),
            title: title.to_string(),
            description: description.to_string(),
            priority,
            status,
            due_date: None,
            created_at: parse_timestamp(created_at),
        })
        .collect()
}

fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .unwrap_or(DateTime::UNIX_EPOCH)
}
