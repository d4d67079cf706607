// ==========================================
// 地理编码查找表 - 输出层
// ==========================================
// 职责: Table → 文件
// 支持: CSV（主输出，事实来源）, Parquet（可选列式输出）
// ==========================================

pub mod csv_writer;
pub mod parquet_writer;

pub use csv_writer::CsvTableWriter;
pub use parquet_writer::ParquetTableWriter;

use crate::domain::table::Table;
use crate::importer::error::ImportResult;
use std::path::Path;

// ==========================================
// TableWriter Trait
// ==========================================
// 用途: 将表写出到指定路径（父目录不存在时自动创建）
// 实现者: CsvTableWriter, ParquetTableWriter
pub trait TableWriter {
    /// 输出格式名（用于日志与报告）
    fn format(&self) -> &'static str;

    fn write_table(&self, table: &Table, path: &Path) -> ImportResult<()>;
}

/// 创建输出文件的父目录
pub(crate) fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}
