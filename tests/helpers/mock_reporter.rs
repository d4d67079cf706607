// ==========================================
// 记录型报告器 - 用于断言构建过程中的回调
// ==========================================

use geo_lookup::importer::{BuildReporter, ImportError, SheetBatch, SheetSelection};
use std::cell::RefCell;

#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub events: RefCell<Vec<String>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }

    pub fn has_event(&self, prefix: &str) -> bool {
        self.events.borrow().iter().any(|e| e.starts_with(prefix))
    }

    fn push(&self, event: String) {
        self.events.borrow_mut().push(event);
    }
}

impl BuildReporter for RecordingReporter {
    fn workbook_opened(&self, label: &str, _path: &str, sheet_count: usize) {
        self.push(format!("opened:{}:{}", label, sheet_count));
    }

    fn sheets_selected(&self, label: &str, selection: &SheetSelection) {
        self.push(format!("selected:{}:{}", label, selection.selected.join(",")));
    }

    fn sheet_processed(&self, _label: &str, batch: &SheetBatch, override_mapping: bool) {
        self.push(format!(
            "processed:{}:{}:{}",
            batch.sheet,
            batch.records.len(),
            override_mapping
        ));
    }

    fn sheet_skipped(&self, _label: &str, sheet: &str, _reason: &str) {
        self.push(format!("skipped:{}", sheet));
    }

    fn join_applied(&self, column: &str, matched: usize, unmatched: usize) {
        self.push(format!("joined:{}:{}:{}", column, matched, unmatched));
    }

    fn join_skipped(&self, column: &str, _reason: &str) {
        self.push(format!("join_skipped:{}", column));
    }

    fn output_written(&self, _path: &str, format: &str, rows: usize) {
        self.push(format!("written:{}:{}", format, rows));
    }

    fn optional_output_skipped(&self, _error: &ImportError) {
        self.push("optional_skipped".to_string());
    }

    fn build_finished(&self, pipeline: &str, rows: usize) {
        self.push(format!("finished:{}:{}", pipeline, rows));
    }
}
