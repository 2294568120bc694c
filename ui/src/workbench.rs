//! Session-scoped input state: the current draft text, the payload being
//! displayed as a QR image, and the most recent scan result.

use crate::history::HistoryStore;
use crate::storage::StoragePort;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Workbench {
    text: String,
    generated: Option<String>,
    scanned: Option<String>,
}

impl Workbench {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The payload currently rendered as a QR image, if any.
    pub fn generated(&self) -> Option<&str> {
        self.generated.as_deref()
    }

    /// The most recently decoded payload from a scan session, if any.
    pub fn scanned(&self) -> Option<&str> {
        self.scanned.as_deref()
    }

    /// Replaces the draft text unconditionally. No validation.
    pub fn set_text(&mut self, value: impl Into<String>) {
        self.text = value.into();
    }

    /// Turns the current draft into the displayed QR payload.
    ///
    /// Empty drafts are silently ignored. A non-empty draft is recorded in
    /// the history (which appends only when it is novel) and always becomes
    /// the displayed payload, so regenerating a saved payload re-renders it.
    pub fn generate<S: StoragePort>(&mut self, history: &mut HistoryStore<S>) {
        if self.text.is_empty() {
            return;
        }
        history.record(&self.text);
        self.generated = Some(self.text.clone());
    }

    /// Overwrites the scan result. Scan results are never persisted.
    pub fn record_scan(&mut self, payload: String) {
        self.scanned = Some(payload);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn fresh_history() -> HistoryStore<MemoryStorage> {
        HistoryStore::hydrate(MemoryStorage::new())
    }

    #[test]
    fn generate_with_empty_draft_changes_nothing() {
        let mut history = fresh_history();
        let mut workbench = Workbench::new();

        workbench.generate(&mut history);

        assert_eq!(workbench.generated(), None);
        assert!(history.history().is_empty());
    }

    #[test]
    fn regenerating_a_saved_payload_redisplays_without_a_second_append() {
        let mut history = fresh_history();
        let mut workbench = Workbench::new();

        workbench.set_text("hello");
        workbench.generate(&mut history);
        workbench.generate(&mut history);

        assert_eq!(workbench.generated(), Some("hello"));
        assert_eq!(history.history().len(), 1);
    }

    #[test]
    fn generate_then_regenerate_scenario() {
        let mut history = fresh_history();
        let mut workbench = Workbench::new();

        workbench.set_text("hello");
        workbench.generate(&mut history);
        assert_eq!(workbench.generated(), Some("hello"));
        assert_eq!(history.history().codes(), ["hello"]);

        workbench.set_text("world");
        workbench.generate(&mut history);
        assert_eq!(workbench.generated(), Some("world"));
        assert_eq!(history.history().codes(), ["hello", "world"]);

        workbench.set_text("hello");
        workbench.generate(&mut history);
        assert_eq!(workbench.generated(), Some("hello"));
        assert_eq!(history.history().codes(), ["hello", "world"]);
    }

    #[test]
    fn set_text_replaces_the_draft_but_not_the_display() {
        let mut history = fresh_history();
        let mut workbench = Workbench::new();

        workbench.set_text("shown");
        workbench.generate(&mut history);
        workbench.set_text("draft only");

        assert_eq!(workbench.text(), "draft only");
        assert_eq!(workbench.generated(), Some("shown"));
    }

    #[test]
    fn scan_results_overwrite_each_other() {
        let mut workbench = Workbench::new();
        assert_eq!(workbench.scanned(), None);

        workbench.record_scan("first".into());
        workbench.record_scan("second".into());
        assert_eq!(workbench.scanned(), Some("second"));
    }
}
