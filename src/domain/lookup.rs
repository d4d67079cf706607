// ==========================================
// 地理编码查找表 - 查找表领域模型
// ==========================================
// 职责: CanonicalRecord / LookupTable / EnrichmentIndex
// 红线: 存活记录的 Code 非空；LookupTable 内 Code 唯一
// ==========================================

use crate::domain::table::Table;
use crate::domain::types::CanonicalField;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

// ==========================================
// CanonicalRecord - 规范记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CanonicalRecord {
    pub code: String,                   // 编码（已 trim，非空）
    pub name: Option<String>,           // 名称
    pub alternate_name: Option<String>, // 别名
    pub status: Option<String>,         // 状态
}

impl CanonicalRecord {
    pub fn field(&self, field: CanonicalField) -> Option<&str> {
        match field {
            CanonicalField::Code => Some(self.code.as_str()),
            CanonicalField::Name => self.name.as_deref(),
            CanonicalField::AlternateName => self.alternate_name.as_deref(),
            CanonicalField::Status => self.status.as_deref(),
        }
    }

    fn to_row(&self) -> Vec<Option<String>> {
        CanonicalField::ALL
            .iter()
            .map(|f| self.field(*f).map(str::to_string))
            .collect()
    }
}

// ==========================================
// LookupTable - 去重后的查找表
// ==========================================
// 生命周期: LookupMerger 构建，构建流程持有
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupTable {
    records: Vec<CanonicalRecord>,
    positions: HashMap<String, usize>, // Code → records 下标
}

impl LookupTable {
    /// 由已去重的记录构造（仅供合并器使用）
    pub(crate) fn from_unique(records: Vec<CanonicalRecord>) -> Self {
        let positions: HashMap<String, usize> = records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.code.clone(), i))
            .collect();
        debug_assert_eq!(positions.len(), records.len());
        Self { records, positions }
    }

    /// 从已写出的查找表（Code, Name, AlternateName, Status）还原
    ///
    /// # 说明
    /// - 缺少 Code 列时返回 None
    /// - 空白 Code 的行被丢弃，重复 Code 首条为准
    pub fn from_table(table: &Table) -> Option<Self> {
        let code_idx = table.column_index(CanonicalField::Code.column_name())?;
        let idx_of = |field: CanonicalField| table.column_index(field.column_name());
        let name_idx = idx_of(CanonicalField::Name);
        let alt_idx = idx_of(CanonicalField::AlternateName);
        let status_idx = idx_of(CanonicalField::Status);

        let cell = |row: &[Option<String>], idx: Option<usize>| -> Option<String> {
            idx.and_then(|i| row.get(i))
                .and_then(|v| v.as_deref())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let mut seen = HashSet::new();
        let mut records = Vec::new();
        for row in &table.rows {
            let row = row.as_slice();
            let Some(code) = cell(row, Some(code_idx)) else {
                continue;
            };
            if !seen.insert(code.clone()) {
                continue;
            }
            records.push(CanonicalRecord {
                code,
                name: cell(row, name_idx),
                alternate_name: cell(row, alt_idx),
                status: cell(row, status_idx),
            });
        }

        Some(Self::from_unique(records))
    }

    pub fn records(&self) -> &[CanonicalRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, code: &str) -> Option<&CanonicalRecord> {
        self.positions.get(code).map(|&i| &self.records[i])
    }

    /// 转换为输出表（四列固定顺序）
    pub fn to_table(&self) -> Table {
        let columns = CanonicalField::ALL
            .iter()
            .map(|f| f.column_name().to_string())
            .collect();
        Table {
            columns,
            rows: self.records.iter().map(CanonicalRecord::to_row).collect(),
        }
    }

    /// 派生只读的 Code → Name 索引
    pub fn enrichment_index(&self) -> EnrichmentIndex {
        let names = self
            .records
            .iter()
            .map(|r| (r.code.clone(), r.name.clone()))
            .collect();
        EnrichmentIndex { names }
    }
}

// ==========================================
// EnrichmentIndex - Code → Name 只读索引
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct EnrichmentIndex {
    names: HashMap<String, Option<String>>,
}

impl EnrichmentIndex {
    /// 查找编码对应的名称；未收录或名称为空时返回 None
    pub fn lookup(&self, code: &str) -> Option<&str> {
        self.names.get(code).and_then(|n| n.as_deref())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
