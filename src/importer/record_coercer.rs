// ==========================================
// 地理编码查找表 - 记录规整器实现
// ==========================================
// 职责: RawSheet + 列映射 → 规范记录 (CanonicalRecord)
// 规则: Code 列未解析 → 整张表跳过；空白 Code 行丢弃；表内重复 Code 首条为准
// ==========================================

use crate::domain::lookup::CanonicalRecord;
use crate::domain::mapping::ColumnMapping;
use crate::domain::table::{RawRow, RawSheet};
use crate::importer::column_resolver::{ColumnResolver, ResolvedColumns};
use std::collections::HashSet;

// ==========================================
// SheetBatch - 单张工作表的规整结果
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetBatch {
    pub sheet: String,
    pub columns: ResolvedColumns,
    pub records: Vec<CanonicalRecord>,
    pub blank_code_rows: usize, // 因 Code 为空被丢弃的行数
    pub duplicate_rows: usize,  // 因表内重复被丢弃的行数
}

/// 规整结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoercionOutcome {
    /// 正常规整（记录可能为空）
    Coerced(SheetBatch),
    /// Code 列未解析，整张表不贡献记录
    MissingCodeColumn { sheet: String, headers: Vec<String> },
}

impl CoercionOutcome {
    /// 取出记录（Code 列缺失时为空批次）
    pub fn into_records(self) -> Vec<CanonicalRecord> {
        match self {
            CoercionOutcome::Coerced(batch) => batch.records,
            CoercionOutcome::MissingCodeColumn { .. } => Vec::new(),
        }
    }
}

pub struct RecordCoercer;

impl RecordCoercer {
    /// 将工作表规整为规范记录
    ///
    /// # 参数
    /// - sheet: 原始工作表
    /// - mapping: 该表生效的列映射（覆写或基础）
    ///
    /// # 返回
    /// - CoercionOutcome::Coerced: 规整后的批次，保持行顺序
    /// - CoercionOutcome::MissingCodeColumn: Code 列未命中任何候选
    pub fn coerce(sheet: &RawSheet, mapping: &ColumnMapping) -> CoercionOutcome {
        let columns = ColumnResolver::resolve_mapping(&sheet.headers, mapping);

        let Some(code_col) = columns.code.clone() else {
            return CoercionOutcome::MissingCodeColumn {
                sheet: sheet.name.clone(),
                headers: sheet.headers.clone(),
            };
        };

        let mut seen: HashSet<String> = HashSet::new();
        let mut records = Vec::new();
        let mut blank_code_rows = 0;
        let mut duplicate_rows = 0;

        for row in &sheet.rows {
            let Some(code) = Self::get_string(row, Some(code_col.as_str())) else {
                blank_code_rows += 1;
                continue;
            };

            if seen.contains(&code) {
                duplicate_rows += 1;
                continue;
            }
            seen.insert(code.clone());

            records.push(CanonicalRecord {
                code,
                name: Self::get_string(row, columns.name.as_deref()),
                alternate_name: Self::get_string(row, columns.alternatename.as_deref()),
                status: Self::get_string(row, columns.status.as_deref()),
            });
        }

        CoercionOutcome::Coerced(SheetBatch {
            sheet: sheet.name.clone(),
            columns,
            records,
            blank_code_rows,
            duplicate_rows,
        })
    }

    /// 提取字符串字段（trim 后为空视为缺失）
    fn get_string(row: &RawRow, column: Option<&str>) -> Option<String> {
        let value = row.get(column?)?.trim();
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }
}
