// ==========================================
// 地理编码查找表 - 列映射配置模型
// ==========================================
// 职责: 候选表头列表 (CandidateList) 与列映射 (ColumnMapping)
// 红线: 候选顺序即匹配优先级，必须使用有序列表，不依赖 map 迭代顺序
// ==========================================

use crate::domain::types::CanonicalField;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// CandidateList - 有序候选表头
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateList(Vec<String>);

impl CandidateList {
    pub fn new<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(candidates.into_iter().map(Into::into).collect())
    }

    /// 有效候选（trim 后非空），保持声明顺序
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|c| c.trim()).filter(|c| !c.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl<S: Into<String>> FromIterator<S> for CandidateList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

// ==========================================
// ColumnMapping - 规范字段 → 候选表头
// ==========================================
// 基础映射默认生效；per-sheet 覆写映射整体替换基础映射（不按字段合并）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    #[serde(default)]
    pub code: CandidateList,
    #[serde(default)]
    pub name: CandidateList,
    #[serde(default)]
    pub alternatename: CandidateList,
    #[serde(default)]
    pub status: CandidateList,
}

impl ColumnMapping {
    pub fn candidates(&self, field: CanonicalField) -> &CandidateList {
        match field {
            CanonicalField::Code => &self.code,
            CanonicalField::Name => &self.name,
            CanonicalField::AlternateName => &self.alternatename,
            CanonicalField::Status => &self.status,
        }
    }
}

// ==========================================
// SheetMappings - 基础映射 + 按工作表覆写
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct SheetMappings {
    base: ColumnMapping,
    overrides: BTreeMap<String, ColumnMapping>,
}

impl SheetMappings {
    pub fn new(base: ColumnMapping, overrides: BTreeMap<String, ColumnMapping>) -> Self {
        Self { base, overrides }
    }

    /// 选择工作表使用的映射
    ///
    /// # 规则
    /// 1. 覆写表中存在该工作表名（先精确，再 trim 后）→ 使用覆写映射
    /// 2. 否则 → 使用基础映射
    pub fn for_sheet(&self, sheet_name: &str) -> &ColumnMapping {
        self.overrides
            .get(sheet_name)
            .or_else(|| self.overrides.get(sheet_name.trim()))
            .unwrap_or(&self.base)
    }

    pub fn has_override(&self, sheet_name: &str) -> bool {
        self.overrides.contains_key(sheet_name) || self.overrides.contains_key(sheet_name.trim())
    }
}
