// ==========================================
// 地理编码查找表 - CSV 写出器
// ==========================================
// 格式: UTF-8，逗号分隔，首行表头，NULL 写为空字段
// ==========================================

use crate::domain::table::Table;
use crate::exporter::{ensure_parent_dir, TableWriter};
use crate::importer::error::{ImportError, ImportResult};
use csv::WriterBuilder;
use std::path::Path;

pub struct CsvTableWriter;

impl TableWriter for CsvTableWriter {
    fn format(&self) -> &'static str {
        "csv"
    }

    fn write_table(&self, table: &Table, path: &Path) -> ImportResult<()> {
        let display = path.display().to_string();
        let to_output_error = |message: String| ImportError::OutputWrite {
            path: display.clone(),
            message,
        };

        ensure_parent_dir(path).map_err(|e| to_output_error(e.to_string()))?;

        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_path(path)
            .map_err(|e| to_output_error(e.to_string()))?;

        writer
            .write_record(&table.columns)
            .map_err(|e| to_output_error(e.to_string()))?;

        for row in &table.rows {
            writer
                .write_record(row.iter().map(|v| v.as_deref().unwrap_or("")))
                .map_err(|e| to_output_error(e.to_string()))?;
        }

        writer.flush().map_err(|e| to_output_error(e.to_string()))?;
        Ok(())
    }
}
