// ==========================================
// 地理编码查找表 - 名称补充 (Enrichment Join)
// ==========================================
// 规则: 每个 join 列追加 `<列名>_name`，原有列不做修改
//       未匹配 → NULL；表中不存在的 join 列跳过
//       重命名在 join 之后一次性进行，未知键忽略
// ==========================================

use crate::domain::lookup::EnrichmentIndex;
use crate::domain::table::Table;
use crate::engine::report::JoinReport;
use std::collections::{BTreeMap, HashSet};

pub struct EnrichmentJoiner;

impl EnrichmentJoiner {
    /// 名称列的列名
    pub fn output_column(column: &str) -> String {
        format!("{}_name", column)
    }

    /// 按 join 列依次追加名称列
    ///
    /// # 返回
    /// - Table: 追加名称列后的表（行数与原表一致）
    /// - Vec<JoinReport>: 每个 join 列一条（含跳过原因）
    pub fn join(
        mut table: Table,
        join_columns: &[String],
        index: &EnrichmentIndex,
    ) -> (Table, Vec<JoinReport>) {
        let mut reports = Vec::with_capacity(join_columns.len());
        let mut seen = HashSet::new();

        for column in join_columns {
            if !seen.insert(column.as_str()) {
                continue;
            }

            let output_column = Self::output_column(column);
            let skipped = |reason: &str| JoinReport {
                column: column.clone(),
                output_column: output_column.clone(),
                matched: 0,
                unmatched: 0,
                skipped: Some(reason.to_string()),
            };

            let Some(col_index) = table.column_index(column) else {
                reports.push(skipped("表中不存在该列"));
                continue;
            };
            if table.has_column(&output_column) {
                reports.push(skipped("名称列已存在"));
                continue;
            }

            let names: Vec<Option<String>> = table
                .rows
                .iter()
                .map(|row| {
                    row.get(col_index)
                        .and_then(|v| v.as_deref())
                        .and_then(|code| index.lookup(code))
                        .map(str::to_string)
                })
                .collect();

            let matched = names.iter().filter(|n| n.is_some()).count();
            let unmatched = names.len() - matched;
            table.push_column(output_column.clone(), names);

            reports.push(JoinReport {
                column: column.clone(),
                output_column,
                matched,
                unmatched,
                skipped: None,
            });
        }

        (table, reports)
    }

    /// 列重命名（旧名 → 新名），表中不存在的键忽略
    pub fn rename_columns(mut table: Table, renames: &BTreeMap<String, String>) -> Table {
        if renames.is_empty() {
            return table;
        }
        for column in table.columns.iter_mut() {
            if let Some(new_name) = renames.get(column.as_str()) {
                *column = new_name.clone();
            }
        }
        table
    }
}
