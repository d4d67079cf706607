// ==========================================
// 地理编码查找表 - 查找表合并器实现
// ==========================================
// 职责: 多工作表/多工作簿批次 → 唯一 Code 的查找表
// 策略: 先到先得 (first-seen-wins)，后到记录整条丢弃，不做字段级合并
// 顺序: EW/NI 工作簿（选择顺序）→ Scotland 工作簿（选择顺序）
// ==========================================

use crate::domain::lookup::{CanonicalRecord, LookupTable};
use crate::importer::error::{ImportError, ImportResult};
use serde::Serialize;
use std::collections::HashSet;

/// 合并统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeStats {
    pub batches: usize,
    pub records_in: usize,         // 拼接后的记录总数
    pub duplicates_dropped: usize, // 跨批次重复被丢弃的记录数
    pub records_out: usize,
}

// ==========================================
// LookupMerger - 增量追加，结束时一次性去重
// ==========================================
#[derive(Debug, Default)]
pub struct LookupMerger {
    pending: Vec<CanonicalRecord>,
    batches: usize,
}

impl LookupMerger {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一个批次（按处理顺序调用）
    pub fn append(&mut self, batch: Vec<CanonicalRecord>) {
        self.batches += 1;
        self.pending.extend(batch);
    }

    pub fn pending_records(&self) -> usize {
        self.pending.len()
    }

    /// 结束合并: 去重并产出查找表
    ///
    /// # 返回
    /// - Ok((LookupTable, MergeStats)): 去重后的查找表
    /// - Err(ImportError::EmptyResult): 全部批次拼接后为空
    pub fn finish(self) -> ImportResult<(LookupTable, MergeStats)> {
        if self.pending.is_empty() {
            return Err(ImportError::EmptyResult);
        }

        let records_in = self.pending.len();
        let mut first_occurrence: HashSet<String> = HashSet::with_capacity(records_in);
        let mut unique = Vec::with_capacity(records_in);

        for record in self.pending {
            if first_occurrence.contains(&record.code) {
                continue;
            }
            first_occurrence.insert(record.code.clone());
            unique.push(record);
        }

        let stats = MergeStats {
            batches: self.batches,
            records_in,
            duplicates_dropped: records_in - unique.len(),
            records_out: unique.len(),
        };

        Ok((LookupTable::from_unique(unique), stats))
    }

    /// 一次性合并全部批次
    pub fn merge<I>(batches: I) -> ImportResult<LookupTable>
    where
        I: IntoIterator<Item = Vec<CanonicalRecord>>,
    {
        let mut merger = Self::new();
        for batch in batches {
            merger.append(batch);
        }
        merger.finish().map(|(table, _)| table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(code: &str, name: &str) -> CanonicalRecord {
        CanonicalRecord {
            code: code.to_string(),
            name: Some(name.to_string()),
            alternate_name: None,
            status: None,
        }
    }

    #[test]
    fn test_merge_earlier_batch_wins() {
        let first = vec![record("E08000001", "Bolton")];
        let second = vec![
            CanonicalRecord {
                status: Some("terminated".into()),
                ..record("E08000001", "Bolton (old)")
            },
            record("E08000002", "Bury"),
        ];

        let table = LookupMerger::merge(vec![first.clone(), second]).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("E08000001"), Some(&first[0]));
        assert_eq!(table.records()[1].code, "E08000002");
    }

    #[test]
    fn test_merge_preserves_processing_order() {
        let table = LookupMerger::merge(vec![
            vec![record("W06000001", "Isle of Anglesey")],
            vec![record("E06000001", "Hartlepool")],
            vec![record("S12000033", "Aberdeen City")],
        ])
        .unwrap();

        let codes: Vec<&str> = table.records().iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["W06000001", "E06000001", "S12000033"]);
    }

    #[test]
    fn test_merge_empty_batches_fail() {
        let result = LookupMerger::merge(vec![Vec::new(), Vec::new()]);
        assert!(matches!(result, Err(ImportError::EmptyResult)));

        let result = LookupMerger::merge(Vec::<Vec<CanonicalRecord>>::new());
        assert!(matches!(result, Err(ImportError::EmptyResult)));
    }

    #[test]
    fn test_merge_is_idempotent() {
        let batches = vec![
            vec![record("E06000001", "Hartlepool"), record("E06000002", "Middlesbrough")],
            vec![record("E06000002", "dup"), record("E06000003", "Redcar")],
        ];

        let a = LookupMerger::merge(batches.clone()).unwrap();
        let b = LookupMerger::merge(batches).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_finish_reports_stats() {
        let mut merger = LookupMerger::new();
        merger.append(vec![record("A", "a"), record("B", "b")]);
        merger.append(Vec::new());
        merger.append(vec![record("A", "again")]);
        assert_eq!(merger.pending_records(), 3);

        let (table, stats) = merger.finish().unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(
            stats,
            MergeStats {
                batches: 3,
                records_in: 3,
                duplicates_dropped: 1,
                records_out: 2,
            }
        );
    }
}
