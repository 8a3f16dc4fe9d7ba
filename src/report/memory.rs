//! In-memory log sink

use super::{Level, MergeEvent, MergeLog};
use chrono::{DateTime, Local};
use std::sync::Mutex;

/// One recorded event with the time it was seen
#[derive(Debug, Clone)]
pub struct LogLine {
    pub timestamp: DateTime<Local>,
    pub level: Level,
    pub event: MergeEvent,
}

impl LogLine {
    /// `MM/DD/YYYY hh:mm:ss message`
    pub fn render(&self) -> String {
        format!("{} {}", self.timestamp.format("%m/%d/%Y %I:%M:%S"), self.event)
    }
}

/// Keeps every event in memory, for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryLog {
    lines: Mutex<Vec<LogLine>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far
    pub fn lines(&self) -> Vec<LogLine> {
        match self.lines.lock() {
            Ok(lines) => lines.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Recorded events without timestamps
    pub fn events(&self) -> Vec<MergeEvent> {
        self.lines().into_iter().map(|line| line.event).collect()
    }

    /// Event messages without timestamps
    pub fn messages(&self) -> Vec<String> {
        self.lines()
            .iter()
            .map(|line| line.event.to_string())
            .collect()
    }
}

impl MergeLog for MemoryLog {
    fn record(&self, event: &MergeEvent) {
        let line = LogLine {
            timestamp: Local::now(),
            level: event.level(),
            event: event.clone(),
        };
        match self.lines.lock() {
            Ok(mut lines) => lines.push(line),
            Err(poisoned) => poisoned.into_inner().push(line),
        }
    }
}
