// ==========================================
// 地理编码查找表 - tracing 报告器
// ==========================================
// 职责: 将构建节点输出为结构化日志
// 级别: 进度 info；跳过/缺失/可选输出失败 warn；列解析细节 debug
// ==========================================

use crate::importer::error::ImportError;
use crate::importer::importer_trait::BuildReporter;
use crate::importer::record_coercer::SheetBatch;
use crate::importer::sheet_selector::SheetSelection;
use tracing::{debug, info, warn};

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl BuildReporter for TracingReporter {
    fn workbook_opened(&self, label: &str, path: &str, sheet_count: usize) {
        info!(source = label, path = path, sheet_count = sheet_count, "工作簿已打开");
    }

    fn sheets_selected(&self, label: &str, selection: &SheetSelection) {
        info!(
            source = label,
            selected = selection.selected.len(),
            sheets = ?selection.selected,
            "工作表选择完成"
        );
        if !selection.missing.is_empty() {
            warn!(
                source = label,
                missing = ?selection.missing,
                "显式指定的工作表在工作簿中不存在"
            );
        }
    }

    fn sheet_processed(&self, label: &str, batch: &SheetBatch, override_mapping: bool) {
        debug!(
            source = label,
            sheet = %batch.sheet,
            override_mapping = override_mapping,
            code = ?batch.columns.code,
            name = ?batch.columns.name,
            alternatename = ?batch.columns.alternatename,
            status = ?batch.columns.status,
            "列解析结果"
        );
        info!(
            source = label,
            sheet = %batch.sheet,
            records = batch.records.len(),
            blank_code_rows = batch.blank_code_rows,
            duplicate_rows = batch.duplicate_rows,
            "工作表已处理"
        );
    }

    fn sheet_skipped(&self, label: &str, sheet: &str, reason: &str) {
        warn!(source = label, sheet = sheet, reason = reason, "工作表已跳过");
    }

    fn table_loaded(&self, path: &str, rows: usize, columns: usize) {
        info!(path = path, rows = rows, columns = columns, "输入表已读取");
    }

    fn join_applied(&self, column: &str, matched: usize, unmatched: usize) {
        info!(column = column, matched = matched, unmatched = unmatched, "名称列已补充");
    }

    fn join_skipped(&self, column: &str, reason: &str) {
        warn!(column = column, reason = reason, "名称补充已跳过");
    }

    fn output_written(&self, path: &str, format: &str, rows: usize) {
        info!(path = path, format = format, rows = rows, "输出已写出");
    }

    fn optional_output_skipped(&self, error: &ImportError) {
        warn!(error = %error, "可选输出失败，继续执行");
    }

    fn build_finished(&self, pipeline: &str, rows: usize) {
        info!(pipeline = pipeline, rows = rows, "构建完成");
    }
}
