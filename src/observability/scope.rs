//! Begin/complete logging around a unit of work
//!
//! - `{name}_BEGIN` on creation (INFO)
//! - `{name}_COMPLETE` from `complete` (INFO)
//! - `{name}_FAILED` from `fail` (WARN)
//! - `{name}_INCOMPLETE` when dropped without either (WARN)

use std::time::Instant;

use super::logger::Logger;

/// Scope that logs the lifecycle of one operation
pub struct ObservationScope {
    name: &'static str,
    fields: Vec<(&'static str, String)>,
    started: Instant,
    finished: bool,
}

impl ObservationScope {
    /// Opens a scope, logging `{name}_BEGIN`
    pub fn new(name: &'static str) -> Self {
        Self::with_fields(name, Vec::new())
    }

    /// Opens a scope whose fields are repeated on every event
    pub fn with_fields(name: &'static str, fields: Vec<(&'static str, String)>) -> Self {
        let scope = Self {
            name,
            fields,
            started: Instant::now(),
            finished: false,
        };
        Logger::info(&format!("{}_BEGIN", name), &scope.field_refs(&[]));
        scope
    }

    fn field_refs<'s>(&'s self, extra: &[(&'s str, &'s str)]) -> Vec<(&'s str, &'s str)> {
        self.fields
            .iter()
            .map(|(key, value)| (*key, value.as_str()))
            .chain(extra.iter().copied())
            .collect()
    }

    /// Milliseconds since the scope opened
    pub fn elapsed_ms(&self) -> String {
        self.started.elapsed().as_millis().to_string()
    }

    /// Logs `{name}_COMPLETE` with the extra fields and elapsed time
    pub fn complete_with_fields(mut self, extra: &[(&str, &str)]) {
        self.finished = true;
        let elapsed = self.elapsed_ms();
        let mut fields = self.field_refs(&[]);
        fields.extend(extra.iter().copied());
        fields.push(("elapsed_ms", elapsed.as_str()));
        Logger::info(&format!("{}_COMPLETE", self.name), &fields);
    }

    /// Logs `{name}_COMPLETE`
    pub fn complete(self) {
        self.complete_with_fields(&[]);
    }

    /// Logs `{name}_FAILED` with a reason
    pub fn fail(mut self, reason: &str) {
        self.finished = true;
        let fields = self.field_refs(&[("reason", reason)]);
        Logger::warn(&format!("{}_FAILED", self.name), &fields);
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl Drop for ObservationScope {
    fn drop(&mut self) {
        if !self.finished {
            Logger::warn(
                &format!("{}_INCOMPLETE", self.name),
                &[("reason", "scope dropped without completion")],
            );
        }
    }
}
