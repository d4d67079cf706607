// ==========================================
// 地理编码查找表 - 导入 Trait
// ==========================================
// 职责: 定义外部协作者接口（不包含实现）
// - WorkbookReader: 工作簿读取（阶段 0）
// - TableReader: 平面表读取（邮编表 / 已写出的查找表）
// - BuildReporter: 构建过程报告（替代全局 verbose 开关）
// ==========================================

use crate::domain::table::{RawSheet, Table};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::record_coercer::SheetBatch;
use crate::importer::sheet_selector::SheetSelection;
use std::path::Path;

// ==========================================
// WorkbookReader Trait
// ==========================================
// 用途: 按名称读取工作表
// 实现者: ExcelWorkbook（calamine）, 测试中的内存工作簿
pub trait WorkbookReader {
    /// 工作簿来源（路径或标识），用于日志与报告
    fn source_path(&self) -> &str;

    /// 全部工作表名（工作簿原顺序）
    fn sheet_names(&self) -> Vec<String>;

    /// 读取单张工作表
    ///
    /// # 返回
    /// - Ok(RawSheet): 表头已 trim，空白单元格缺失
    /// - Err: 该表解析失败（调用方包装为 SheetProcessing 并按空批次处理）
    fn read_sheet(&mut self, sheet_name: &str) -> ImportResult<RawSheet>;
}

// ==========================================
// TableReader Trait
// ==========================================
// 用途: 读取带表头的平面表（全部按字符串读取）
// 实现者: CsvTableParser
pub trait TableReader {
    fn read_table(&self, path: &Path) -> ImportResult<Table>;
}

// ==========================================
// BuildReporter Trait
// ==========================================
// 用途: 在固定节点报告构建进度，默认实现为空操作
// 实现者: TracingReporter
pub trait BuildReporter {
    fn workbook_opened(&self, _label: &str, _path: &str, _sheet_count: usize) {}

    fn sheets_selected(&self, _label: &str, _selection: &SheetSelection) {}

    fn sheet_processed(&self, _label: &str, _batch: &SheetBatch, _override_mapping: bool) {}

    /// 工作表被跳过（Code 列缺失或处理失败），不影响退出码
    fn sheet_skipped(&self, _label: &str, _sheet: &str, _reason: &str) {}

    fn table_loaded(&self, _path: &str, _rows: usize, _columns: usize) {}

    fn join_applied(&self, _column: &str, _matched: usize, _unmatched: usize) {}

    fn join_skipped(&self, _column: &str, _reason: &str) {}

    fn output_written(&self, _path: &str, _format: &str, _rows: usize) {}

    /// 可选输出失败（警告级）
    fn optional_output_skipped(&self, _error: &ImportError) {}

    fn build_finished(&self, _pipeline: &str, _rows: usize) {}
}
