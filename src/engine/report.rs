// ==========================================
// 地理编码查找表 - 构建报告
// ==========================================
// 职责: 汇总一次构建的来源、工作表、合并、join 与输出情况
// 输出: --report 指定时写出 JSON（失败仅告警）
// ==========================================

use crate::importer::column_resolver::ResolvedColumns;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::lookup_merger::MergeStats;
use crate::importer::record_coercer::SheetBatch;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use uuid::Uuid;

/// 单次构建报告
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    pub run_id: Uuid,
    pub pipeline: String, // "geo" / "postcode"
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub sources: Vec<SourceReport>,
    pub inputs: Vec<TableInputReport>,
    pub merge: Option<MergeStats>,
    pub enrichment: Vec<JoinReport>,
    pub outputs: Vec<OutputReport>,
}

/// 工作簿来源报告
#[derive(Debug, Clone, Serialize)]
pub struct SourceReport {
    pub label: String,
    pub path: String,
    pub sheets_total: usize,
    pub missing_sheets: Vec<String>,
    pub sheets: Vec<SheetReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SheetReport {
    pub sheet: String,
    pub override_mapping: bool,
    #[serde(flatten)]
    pub outcome: SheetOutcome,
}

/// 工作表处理结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SheetOutcome {
    Processed {
        columns: ResolvedColumns,
        records: usize,
        blank_code_rows: usize,
        duplicate_rows: usize,
    },
    MissingCodeColumn {
        headers: Vec<String>,
    },
    Failed {
        message: String,
    },
}

impl SheetOutcome {
    pub fn processed(batch: &SheetBatch) -> Self {
        SheetOutcome::Processed {
            columns: batch.columns.clone(),
            records: batch.records.len(),
            blank_code_rows: batch.blank_code_rows,
            duplicate_rows: batch.duplicate_rows,
        }
    }
}

/// 平面表输入报告（NSPL / 回读的查找表）
#[derive(Debug, Clone, Serialize)]
pub struct TableInputReport {
    pub path: String,
    pub rows: usize,
    pub columns: usize,
}

/// 单个 join 列的报告
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinReport {
    pub column: String,
    pub output_column: String,
    pub matched: usize,
    pub unmatched: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<String>,
}

/// 输出文件报告
#[derive(Debug, Clone, Serialize)]
pub struct OutputReport {
    pub path: String,
    pub format: String,
    pub rows: usize,
    pub written: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BuildReport {
    pub fn start(pipeline: impl Into<String>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            pipeline: pipeline.into(),
            started_at: Utc::now(),
            finished_at: None,
            sources: Vec::new(),
            inputs: Vec::new(),
            merge: None,
            enrichment: Vec::new(),
            outputs: Vec::new(),
        }
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// 已处理工作表数（不含跳过与失败）
    pub fn processed_sheets(&self) -> usize {
        self.sources
            .iter()
            .flat_map(|s| &s.sheets)
            .filter(|s| matches!(s.outcome, SheetOutcome::Processed { .. }))
            .count()
    }

    /// 写出一组报告（JSON 数组，pretty 格式）
    pub fn write_json(reports: &[BuildReport], path: &Path) -> ImportResult<()> {
        let to_error = |message: String| ImportError::OptionalWrite {
            path: path.display().to_string(),
            message,
        };

        crate::exporter::ensure_parent_dir(path).map_err(|e| to_error(e.to_string()))?;
        let json = serde_json::to_string_pretty(reports).map_err(|e| to_error(e.to_string()))?;
        std::fs::write(path, json).map_err(|e| to_error(e.to_string()))
    }
}
