//! Keyword classification of tasks: complexity, cognitive load type, and the
//! energy level a task ideally wants.
//!
//! These are ordered rule lists, not models. Keyword tables are explicit
//! configuration so they can be tested and extended independently of the
//! functions that evaluate them.

use serde::{Deserialize, Serialize};

use crate::task::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskComplexity {
    Low,
    Medium,
    High,
}

impl TaskComplexity {
    /// One-tier upgrade; high stays high.
    fn bump(self) -> Self {
        match self {
            TaskComplexity::Low => TaskComplexity::Medium,
            TaskComplexity::Medium | TaskComplexity::High => TaskComplexity::High,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CognitiveLoadType {
    Focus,
    Creativity,
    DecisionMaking,
    Learning,
    Routine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyLevel {
    Low,
    Medium,
    High,
}

impl EnergyLevel {
    pub fn label(self) -> &'static str {
        match self {
            EnergyLevel::Low => "low",
            EnergyLevel::Medium => "medium",
            EnergyLevel::High => "high",
        }
    }
}

/// Titles containing these get a one-tier complexity upgrade.
const COMPLEXITY_KEYWORDS: &[&str] = &[
    "research",
    "algorithm",
    "analyze",
    "design",
    "strategy",
    "architecture",
    "optimize",
    "refactor",
];

/// Load-type rules, evaluated top to bottom; first keyword hit wins.
const LOAD_RULES: &[(CognitiveLoadType, &[&str])] = &[
    (CognitiveLoadType::Focus, &["analyze", "review", "focus", "debug", "audit", "write"]),
    (CognitiveLoadType::Creativity, &["design", "brainstorm", "creative", "draft", "sketch"]),
    (CognitiveLoadType::DecisionMaking, &["evaluate", "decide", "choose", "compare", "prioritize"]),
    (CognitiveLoadType::Learning, &["learn", "study", "practice", "read", "tutorial"]),
    (CognitiveLoadType::Routine, &["update", "organize", "file", "email", "clean"]),
];

/// Base complexity from the pomodoro estimate, upgraded one tier when the
/// title signals inherently complex work.
pub fn estimate_task_complexity(task: &Task) -> TaskComplexity {
    let base = match task.estimated_pomodoros.unwrap_or(1) {
        n if n >= 5 => TaskComplexity::High,
        n if n >= 2 => TaskComplexity::Medium,
        _ => TaskComplexity::Low,
    };

    let title = task.title.to_lowercase();
    if COMPLEXITY_KEYWORDS.iter().any(|k| title.contains(k)) {
        base.bump()
    } else {
        base
    }
}

/// Classify the kind of mental effort a task demands. Falls back to focus
/// work when no keyword matches.
pub fn determine_cognitive_load_type(task: &Task) -> CognitiveLoadType {
    let title = task.title.to_lowercase();
    for (load, keywords) in LOAD_RULES {
        if keywords.iter().any(|k| title.contains(k)) {
            return *load;
        }
    }
    CognitiveLoadType::Focus
}

/// Joint {complexity, load type} -> energy level lookup.
///
/// High complexity always wants high energy. Medium-complexity focus work
/// wants high energy too; other medium-complexity work sits at medium.
/// Routine work and low-complexity work run fine on low energy.
pub fn determine_ideal_energy_level(
    complexity: TaskComplexity,
    load: CognitiveLoadType,
) -> EnergyLevel {
    match (complexity, load) {
        (TaskComplexity::High, _) => EnergyLevel::High,
        (_, CognitiveLoadType::Routine) => EnergyLevel::Low,
        (TaskComplexity::Medium, CognitiveLoadType::Focus) => EnergyLevel::High,
        (TaskComplexity::Medium, _) => EnergyLevel::Medium,
        (TaskComplexity::Low, _) => EnergyLevel::Low,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(title: &str, pomodoros: Option<u32>) -> Task {
        let t = Task::new("t1", title);
        match pomodoros {
            Some(n) => t.with_pomodoros(n),
            None => t,
        }
    }

    #[test]
    fn test_complexity_thresholds() {
        assert_eq!(estimate_task_complexity(&task("x", Some(5))), TaskComplexity::High);
        assert_eq!(estimate_task_complexity(&task("x", Some(3))), TaskComplexity::Medium);
        assert_eq!(estimate_task_complexity(&task("x", Some(1))), TaskComplexity::Low);
        // No estimate behaves like a single pomodoro.
        assert_eq!(estimate_task_complexity(&task("x", None)), TaskComplexity::Low);
    }

    #[test]
    fn test_complexity_keyword_bumps_one_tier() {
        assert_eq!(
            estimate_task_complexity(&task("Research pricing", Some(1))),
            TaskComplexity::Medium
        );
        assert_eq!(
            estimate_task_complexity(&task("Design the new algorithm", Some(3))),
            TaskComplexity::High
        );
        // Already high stays high.
        assert_eq!(
            estimate_task_complexity(&task("Research everything", Some(6))),
            TaskComplexity::High
        );
    }

    #[test]
    fn test_load_type_first_match_wins() {
        assert_eq!(
            determine_cognitive_load_type(&task("Review the design doc", None)),
            CognitiveLoadType::Focus
        );
        assert_eq!(
            determine_cognitive_load_type(&task("Brainstorm campaign ideas", None)),
            CognitiveLoadType::Creativity
        );
        assert_eq!(
            determine_cognitive_load_type(&task("Decide on vendor", None)),
            CognitiveLoadType::DecisionMaking
        );
        assert_eq!(
            determine_cognitive_load_type(&task("Study for the exam", None)),
            CognitiveLoadType::Learning
        );
        assert_eq!(
            determine_cognitive_load_type(&task("Organize the inbox", None)),
            CognitiveLoadType::Routine
        );
    }

    #[test]
    fn test_load_type_fallback_is_focus() {
        assert_eq!(
            determine_cognitive_load_type(&task("Misc errand", None)),
            CognitiveLoadType::Focus
        );
    }

    #[test]
    fn test_energy_lookup_table() {
        use CognitiveLoadType::*;
        use TaskComplexity::*;

        assert_eq!(determine_ideal_energy_level(High, Focus), EnergyLevel::High);
        assert_eq!(determine_ideal_energy_level(High, Routine), EnergyLevel::High);
        assert_eq!(determine_ideal_energy_level(Medium, Focus), EnergyLevel::High);
        assert_eq!(determine_ideal_energy_level(Medium, Creativity), EnergyLevel::Medium);
        assert_eq!(determine_ideal_energy_level(Medium, DecisionMaking), EnergyLevel::Medium);
        assert_eq!(determine_ideal_energy_level(Medium, Learning), EnergyLevel::Medium);
        assert_eq!(determine_ideal_energy_level(Medium, Routine), EnergyLevel::Low);
        assert_eq!(determine_ideal_energy_level(Low, Routine), EnergyLevel::Low);
        assert_eq!(determine_ideal_energy_level(Low, Focus), EnergyLevel::Low);
    }
}
