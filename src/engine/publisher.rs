// ==========================================
// 地理编码查找表 - 输出发布
// ==========================================
// 规则: CSV 为主输出，失败即致命
//       Parquet 为可选输出，失败降级为警告，CSV 结果保留
// ==========================================

use crate::domain::table::Table;
use crate::engine::report::{BuildReport, OutputReport};
use crate::exporter::{CsvTableWriter, ParquetTableWriter, TableWriter};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::BuildReporter;
use std::path::Path;

pub struct OutputPublisher {
    primary: Box<dyn TableWriter>,
    columnar: Box<dyn TableWriter>,
}

impl Default for OutputPublisher {
    fn default() -> Self {
        Self::new(Box::new(CsvTableWriter), Box::new(ParquetTableWriter))
    }
}

impl OutputPublisher {
    pub fn new(primary: Box<dyn TableWriter>, columnar: Box<dyn TableWriter>) -> Self {
        Self { primary, columnar }
    }

    /// 写出主输出与可选列式输出
    ///
    /// # 返回
    /// - Err(OutputWrite): 主输出失败
    /// - Ok(()): 主输出成功（可选输出失败已记录在报告中）
    pub fn publish(
        &self,
        table: &Table,
        csv_path: &Path,
        parquet_path: Option<&Path>,
        reporter: &dyn BuildReporter,
        report: &mut BuildReport,
    ) -> ImportResult<()> {
        let rows = table.row_count();

        if let Err(e) = self.primary.write_table(table, csv_path) {
            let error = match e {
                ImportError::OutputWrite { .. } => e,
                other => ImportError::OutputWrite {
                    path: csv_path.display().to_string(),
                    message: other.to_string(),
                },
            };
            report.outputs.push(Self::output_report(
                csv_path,
                self.primary.format(),
                rows,
                Some(error.to_string()),
            ));
            return Err(error);
        }
        reporter.output_written(&csv_path.display().to_string(), self.primary.format(), rows);
        report
            .outputs
            .push(Self::output_report(csv_path, self.primary.format(), rows, None));

        let Some(parquet_path) = parquet_path else {
            return Ok(());
        };

        match self.columnar.write_table(table, parquet_path) {
            Ok(()) => {
                reporter.output_written(
                    &parquet_path.display().to_string(),
                    self.columnar.format(),
                    rows,
                );
                report.outputs.push(Self::output_report(
                    parquet_path,
                    self.columnar.format(),
                    rows,
                    None,
                ));
            }
            Err(e) => {
                let warning = ImportError::OptionalWrite {
                    path: parquet_path.display().to_string(),
                    message: e.to_string(),
                };
                reporter.optional_output_skipped(&warning);
                report.outputs.push(Self::output_report(
                    parquet_path,
                    self.columnar.format(),
                    rows,
                    Some(warning.to_string()),
                ));
            }
        }

        Ok(())
    }

    fn output_report(path: &Path, format: &str, rows: usize, error: Option<String>) -> OutputReport {
        OutputReport {
            path: path.display().to_string(),
            format: format.to_string(),
            rows,
            written: error.is_none(),
            error,
        }
    }
}
