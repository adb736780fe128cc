//! pomo-core: natural-language task parsing and adaptive day scheduling.

pub mod blocks;
pub mod classify;
pub mod parser;
pub mod profile;
pub mod schedule;
pub mod task;
pub mod time;

pub use blocks::{generate_time_blocks, CalendarEvent, TimeBlock};
pub use classify::{
    determine_cognitive_load_type, determine_ideal_energy_level, estimate_task_complexity,
    CognitiveLoadType, EnergyLevel, TaskComplexity,
};
pub use parser::{generate_task_description, parse, ParsedTask};
pub use profile::{Chronotype, CognitiveProfile};
pub use schedule::{schedule_tasks, CognitiveTask, ScheduledTask};
pub use task::{Priority, RecurringPattern, Task, TaskStatus};
pub use time::local_to_utc;
