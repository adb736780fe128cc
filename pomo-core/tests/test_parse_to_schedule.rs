//! End-to-end: free text through the parser, classification, block
//! generation and greedy scheduling.

use chrono::{NaiveDate, NaiveDateTime};
use pomo_core::{
    generate_time_blocks, parse, schedule_tasks, CognitiveTask, EnergyLevel, Priority, Task,
};

fn now() -> NaiveDateTime {
    // Wednesday.
    NaiveDate::from_ymd_opt(2026, 3, 4)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

fn task_from_text(id: &str, text: &str) -> Task {
    let parsed = parse(text, now());
    let mut task = Task::new(id, parsed.title.clone());
    if let Some(p) = parsed.priority {
        task = task.with_priority(p);
    }
    if let Some(n) = parsed.estimated_pomodoros {
        task = task.with_pomodoros(n);
    }
    task
}

#[test]
fn test_parsed_tasks_schedule_in_priority_order() {
    let tasks: Vec<CognitiveTask> = [
        ("inbox", "Organize inbox #low ~1"),
        ("analysis", "Analyze churn numbers #important ~5 pomodoros"),
        ("reading", "Study the onboarding guide ~2"),
    ]
    .into_iter()
    .map(|(id, text)| CognitiveTask::derive(task_from_text(id, text)))
    .collect();

    let blocks = generate_time_blocks(now().date(), None, &[]);
    let scheduled = schedule_tasks(&tasks, &blocks);

    assert_eq!(scheduled.len(), 3);
    let ids: Vec<&str> = scheduled.iter().map(|s| s.task.task.id.as_str()).collect();
    assert_eq!(ids, vec!["analysis", "reading", "inbox"]);

    // The high-priority analysis lands on a peak block, the low-priority
    // routine work on a low-energy block.
    assert_eq!(scheduled[0].task.task.priority, Priority::High);
    assert_eq!(scheduled[0].time_block.energy_level, EnergyLevel::High);
    assert_eq!(scheduled[2].time_block.energy_level, EnergyLevel::Low);
}

#[test]
fn test_parser_attributes_survive_the_round_trip() {
    let parsed = parse(
        "Review release checklist friday at 3pm #important #release @work ~3 pomodoros",
        now(),
    );

    assert_eq!(parsed.title, "Review release checklist");
    assert_eq!(parsed.priority, Some(Priority::High));
    assert_eq!(parsed.estimated_pomodoros, Some(3));
    assert_eq!(parsed.category, Some("work".to_string()));
    assert_eq!(parsed.tags, Some(vec!["release".to_string()]));

    let json = serde_json::to_value(&parsed).unwrap();
    // Absent attributes stay absent on the wire.
    assert!(json.get("isRecurring").is_none());
    assert!(json.get("recurringPattern").is_none());

    let back: pomo_core::ParsedTask = serde_json::from_value(json).unwrap();
    assert_eq!(back, parsed);
}
