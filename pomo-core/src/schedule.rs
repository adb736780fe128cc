//! Greedy energy-aware assignment of tasks to time blocks.

use serde::{Deserialize, Serialize};

use crate::blocks::TimeBlock;
use crate::classify::{
    determine_cognitive_load_type, determine_ideal_energy_level, estimate_task_complexity,
    CognitiveLoadType, EnergyLevel, TaskComplexity,
};
use crate::task::Task;

/// Minutes per pomodoro when converting effort estimates to durations.
pub const POMODORO_MINUTES: u32 = 25;

/// A task enriched with the cognitive attributes the scheduler keys on.
/// Derived once; immutable for scheduling purposes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CognitiveTask {
    #[serde(flatten)]
    pub task: Task,
    pub complexity: TaskComplexity,
    pub cognitive_load_type: CognitiveLoadType,
    pub ideal_energy_level: EnergyLevel,
    /// Minutes.
    pub estimated_duration: u32,
}

impl CognitiveTask {
    /// Apply the classification pipeline to a plain task.
    pub fn derive(task: Task) -> Self {
        let complexity = estimate_task_complexity(&task);
        let cognitive_load_type = determine_cognitive_load_type(&task);
        let ideal_energy_level = determine_ideal_energy_level(complexity, cognitive_load_type);
        let estimated_duration = task.estimated_pomodoros.unwrap_or(1) * POMODORO_MINUTES;
        Self {
            task,
            complexity,
            cognitive_load_type,
            ideal_energy_level,
            estimated_duration,
        }
    }
}

/// One placed task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledTask {
    pub task: CognitiveTask,
    pub time_block: TimeBlock,
}

/// Energy preference order per ideal level. Deterministic: exact match
/// first, then the nearer of the remaining levels.
fn energy_preference(level: EnergyLevel) -> [EnergyLevel; 3] {
    match level {
        EnergyLevel::High => [EnergyLevel::High, EnergyLevel::Medium, EnergyLevel::Low],
        EnergyLevel::Medium => [EnergyLevel::Medium, EnergyLevel::High, EnergyLevel::Low],
        EnergyLevel::Low => [EnergyLevel::Low, EnergyLevel::Medium, EnergyLevel::High],
    }
}

/// Greedy assignment: tasks in priority order (stable for ties), each taking
/// the earliest available block at its ideal energy level, falling back to
/// the next-best level rather than dropping the task. Every block is
/// consumed at most once; a task is omitted only when no available block
/// remains at all.
pub fn schedule_tasks(tasks: &[CognitiveTask], blocks: &[TimeBlock]) -> Vec<ScheduledTask> {
    let mut by_priority: Vec<&CognitiveTask> = tasks.iter().collect();
    by_priority.sort_by_key(|t| t.task.priority.rank());

    // Earliest-first regardless of the caller's block ordering.
    let mut block_order: Vec<usize> = (0..blocks.len()).collect();
    block_order.sort_by_key(|&i| blocks[i].start_time);

    let mut consumed = vec![false; blocks.len()];
    let mut scheduled = Vec::new();

    for task in by_priority {
        let mut chosen = None;
        'levels: for level in energy_preference(task.ideal_energy_level) {
            for &i in &block_order {
                if !consumed[i] && blocks[i].available && blocks[i].energy_level == level {
                    chosen = Some(i);
                    break 'levels;
                }
            }
        }

        if let Some(i) = chosen {
            consumed[i] = true;
            scheduled.push(ScheduledTask {
                task: task.clone(),
                time_block: blocks[i].clone(),
            });
        }
    }

    scheduled
}
