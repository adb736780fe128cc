//! Natural-language task parsing: free text in, structured attributes out.
//!
//! Extraction runs as a fixed pipeline of strip stages over a working copy of
//! the input. Each stage removes the tokens it recognized so later stages see
//! cleaned text; the order matters (priority markers before generic tags,
//! date phrases before recurrence). The final title is the residual text,
//! whitespace-normalized. The parser never fails: anything unrecognized is
//! simply left in the title.

use std::ops::Range;
use std::sync::LazyLock;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::task::{Priority, RecurringPattern};

/// Structured attributes extracted from one free-text task description.
///
/// Absent attributes are `None` and skipped during serialization, so callers
/// can use plain presence checks on the JSON side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedTask {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_pomodoros: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_recurring: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_pattern: Option<RecurringPattern>,
}

const WEEKDAYS: &str = "monday|tuesday|wednesday|thursday|friday|saturday|sunday";

/// Optional "at 2:30pm" suffix; three capture groups (hour, minute, am/pm).
const TIME_SUFFIX: &str = r"(?:\s+at\s+(\d{1,2})(?::(\d{2}))?\s*(am|pm)?)?";

static PRIORITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)#(important|high|medium|low)\b").unwrap());
static BANG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"!+").unwrap());
static EFFORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)~(\d+)(?:\s*pomodoros?)?").unwrap());
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#([A-Za-z0-9_]+)").unwrap());
static CATEGORY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@([A-Za-z0-9_]+)").unwrap());

static TODAY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)\btoday\b{TIME_SUFFIX}")).unwrap());
static TOMORROW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)\btomorrow\b{TIME_SUFFIX}")).unwrap());
static NEXT_WEEK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bnext week\b").unwrap());
static WEEKDAY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)\b({WEEKDAYS})\b{TIME_SUFFIX}")).unwrap());
static NUMERIC_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"\b(\d{{1,2}})[/-](\d{{1,2}})\b{TIME_SUFFIX}")).unwrap());

static EVERY_DAILY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bevery\s+(?:day|morning|evening)\b").unwrap());
static EVERY_WEEKLY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)\bevery\s+(?:week|{WEEKDAYS})\b")).unwrap());
static EVERY_MONTHLY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bevery\s+(?:month|\d{1,2}(?:st|nd|rd|th))\b").unwrap());
static EVERY_CUSTOM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bevery\s+\d+\s+days\b").unwrap());

static STRAY_EFFORT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"~\d+").unwrap());
static LEADING_BY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^\s*by\b").unwrap());
static TRAILING_BY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bby\s*$").unwrap());
static TRAILING_EVERY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bevery\s*$").unwrap());

/// Parse one free-text task description.
///
/// `now` is the injected clock for relative phrases ("today", "friday");
/// callers pass wall-clock local time, tests pin a fixed instant.
pub fn parse(input: &str, now: NaiveDateTime) -> ParsedTask {
    let mut parsed = ParsedTask::default();
    if input.trim().is_empty() {
        return parsed;
    }

    let mut title = input.to_string();

    parsed.priority = extract_priority(&mut title);
    parsed.estimated_pomodoros = extract_effort(&mut title);

    let tags = extract_tags(&mut title);
    if !tags.is_empty() {
        parsed.tags = Some(tags);
    }

    parsed.category = extract_category(&mut title);
    parsed.due_date = extract_due_date(&mut title, now);

    if let Some(pattern) = extract_recurrence(&mut title) {
        parsed.is_recurring = Some(true);
        // Recurring weekly tasks carry no fixed due date; instances are the
        // caller's concern.
        if pattern == RecurringPattern::Weekly {
            parsed.due_date = None;
        }
        parsed.recurring_pattern = Some(pattern);
    }

    parsed.title = cleanup_title(&title);
    parsed
}

fn extract_priority(title: &mut String) -> Option<Priority> {
    if let Some(m) = PRIORITY_RE.find(title) {
        let priority = match m.as_str().trim_start_matches('#').to_lowercase().as_str() {
            "important" | "high" => Priority::High,
            "medium" => Priority::Medium,
            _ => Priority::Low,
        };
        let range = m.range();
        title.replace_range(range, "");
        return Some(priority);
    }

    // Any run of bangs means high priority; "!" and "!!!" are equivalent.
    if let Some(m) = BANG_RE.find(title) {
        let range = m.range();
        title.replace_range(range, "");
        return Some(Priority::High);
    }

    None
}

fn extract_effort(title: &mut String) -> Option<u32> {
    let caps = EFFORT_RE.captures(title)?;
    let full = caps.get(0)?.range();
    let count: u32 = caps.get(1)?.as_str().parse().ok()?;
    if count == 0 {
        return None;
    }
    title.replace_range(full, "");
    Some(count)
}

fn extract_tags(title: &mut String) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    let mut ranges: Vec<Range<usize>> = Vec::new();

    for caps in TAG_RE.captures_iter(title) {
        let (Some(full), Some(word)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let tag = word.as_str().to_lowercase();
        if !tags.contains(&tag) {
            tags.push(tag);
        }
        // Remove only the matched token itself; surrounding whitespace is
        // normalized later, which keeps adjacent numeric content intact for
        // numeric tags like "#123".
        ranges.push(full.range());
    }

    for range in ranges.into_iter().rev() {
        title.replace_range(range, "");
    }

    tags
}

fn extract_category(title: &mut String) -> Option<String> {
    let caps = CATEGORY_RE.captures(title)?;
    let category = caps.get(1)?.as_str().to_lowercase();
    let range = caps.get(0)?.range();
    title.replace_range(range, "");
    Some(category)
}

/// Ordered date handlers; the first phrase that matches wins and is stripped.
fn extract_due_date(title: &mut String, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let handlers: [fn(&str, NaiveDateTime) -> Option<(Range<usize>, NaiveDateTime)>; 5] = [
        match_today,
        match_tomorrow,
        match_next_week,
        match_weekday,
        match_numeric_date,
    ];

    for handler in handlers {
        if let Some((range, due)) = handler(title, now) {
            title.replace_range(range, "");
            return Some(due);
        }
    }
    None
}

fn match_today(title: &str, now: NaiveDateTime) -> Option<(Range<usize>, NaiveDateTime)> {
    let caps = TODAY_RE.captures(title)?;
    let time = captured_time(&caps, 1).unwrap_or_else(end_of_day);
    Some((caps.get(0)?.range(), now.date().and_time(time)))
}

fn match_tomorrow(title: &str, now: NaiveDateTime) -> Option<(Range<usize>, NaiveDateTime)> {
    let caps = TOMORROW_RE.captures(title)?;
    let time = captured_time(&caps, 1).unwrap_or_else(end_of_day);
    Some((caps.get(0)?.range(), (now.date() + Duration::days(1)).and_time(time)))
}

fn match_next_week(title: &str, now: NaiveDateTime) -> Option<(Range<usize>, NaiveDateTime)> {
    let m = NEXT_WEEK_RE.find(title)?;
    Some((m.range(), (now.date() + Duration::days(7)).and_time(end_of_day())))
}

fn match_weekday(title: &str, now: NaiveDateTime) -> Option<(Range<usize>, NaiveDateTime)> {
    for caps in WEEKDAY_RE.captures_iter(title) {
        let full = caps.get(0)?;
        // "every monday" belongs to the recurrence stage, not the date stage.
        if preceded_by_every(title, full.start()) {
            continue;
        }
        let weekday = weekday_from_name(caps.get(1)?.as_str())?;
        let time = captured_time(&caps, 2).unwrap_or_else(end_of_day);

        // Next occurrence, strictly in the future: the same weekday today
        // wraps to next week.
        let today = now.date().weekday().num_days_from_monday() as i64;
        let target = weekday.num_days_from_monday() as i64;
        let mut ahead = (target - today).rem_euclid(7);
        if ahead == 0 {
            ahead = 7;
        }
        return Some((full.range(), (now.date() + Duration::days(ahead)).and_time(time)));
    }
    None
}

fn match_numeric_date(title: &str, now: NaiveDateTime) -> Option<(Range<usize>, NaiveDateTime)> {
    for caps in NUMERIC_DATE_RE.captures_iter(title) {
        let full = caps.get(0)?;
        let month: u32 = caps.get(1)?.as_str().parse().ok()?;
        let day: u32 = caps.get(2)?.as_str().parse().ok()?;

        let Some(mut date) = NaiveDate::from_ymd_opt(now.year(), month, day) else {
            continue;
        };
        // A date already behind us this year means next year.
        if date < now.date() {
            date = NaiveDate::from_ymd_opt(now.year() + 1, month, day)?;
        }
        let time = captured_time(&caps, 3).unwrap_or_else(end_of_day);
        return Some((full.range(), date.and_time(time)));
    }
    None
}

fn extract_recurrence(title: &mut String) -> Option<RecurringPattern> {
    let patterns: [(&LazyLock<Regex>, RecurringPattern); 4] = [
        (&EVERY_DAILY_RE, RecurringPattern::Daily),
        (&EVERY_WEEKLY_RE, RecurringPattern::Weekly),
        (&EVERY_MONTHLY_RE, RecurringPattern::Monthly),
        (&EVERY_CUSTOM_RE, RecurringPattern::Custom),
    ];

    for (re, pattern) in patterns {
        if let Some(m) = re.find(title) {
            let range = m.range();
            title.replace_range(range, "");
            return Some(pattern);
        }
    }
    None
}

fn cleanup_title(title: &str) -> String {
    let mut t = STRAY_EFFORT_RE.replace_all(title, "").into_owned();
    t = TRAILING_EVERY_RE.replace(&t, "").into_owned();
    t = LEADING_BY_RE.replace(&t, "").into_owned();
    t = TRAILING_BY_RE.replace(&t, "").into_owned();
    t.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn preceded_by_every(title: &str, start: usize) -> bool {
    title[..start].trim_end().to_lowercase().ends_with("every")
}

/// 12-hour clock to `NaiveTime`; `base` is the hour capture group index.
fn captured_time(caps: &Captures<'_>, base: usize) -> Option<NaiveTime> {
    let hour_raw: u32 = caps.get(base)?.as_str().parse().ok()?;
    let minute: u32 = match caps.get(base + 1) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };
    let hour = match caps.get(base + 2).map(|m| m.as_str().to_lowercase()) {
        Some(ref meridiem) if meridiem == "pm" && hour_raw != 12 => hour_raw + 12,
        Some(ref meridiem) if meridiem == "am" && hour_raw == 12 => 0,
        _ => hour_raw,
    };
    NaiveTime::from_hms_opt(hour, minute, 0)
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN)
}

fn weekday_from_name(name: &str) -> Option<Weekday> {
    match name.to_lowercase().as_str() {
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Render a human-readable multi-line summary, one line per present attribute.
pub fn generate_task_description(parsed: &ParsedTask) -> String {
    let mut lines = vec![format!("Task: {}", parsed.title)];

    if let Some(due) = parsed.due_date {
        lines.push(format!("Due: {}", due.format("%Y-%m-%d %H:%M")));
    }
    if let Some(priority) = parsed.priority {
        lines.push(format!("Priority: {}", priority.label()));
    }
    if let Some(count) = parsed.estimated_pomodoros {
        lines.push(format!("Estimated Pomodoros: {count}"));
    }
    if let Some(ref category) = parsed.category {
        lines.push(format!("Category: {category}"));
    }
    if let Some(ref tags) = parsed.tags {
        lines.push(format!("Tags: {}", tags.join(", ")));
    }
    if let Some(pattern) = parsed.recurring_pattern {
        lines.push(format!("Recurring: {}", pattern.label()));
    }

    lines.join("\n")
}
