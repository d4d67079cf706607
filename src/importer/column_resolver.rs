// ==========================================
// 地理编码查找表 - 列解析器实现
// ==========================================
// 职责: 表头集合 + 有序候选 → 实际使用的表头
// 规则: 两轮匹配（精确优先，包含其次），均不区分大小写
// ==========================================

use crate::domain::mapping::{CandidateList, ColumnMapping};
use crate::domain::types::CanonicalField;
use serde::Serialize;

// ==========================================
// ResolvedColumns - 各规范字段的解析结果
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedColumns {
    pub code: Option<String>,
    pub name: Option<String>,
    pub alternatename: Option<String>,
    pub status: Option<String>,
}

impl ResolvedColumns {
    pub fn get(&self, field: CanonicalField) -> Option<&str> {
        match field {
            CanonicalField::Code => self.code.as_deref(),
            CanonicalField::Name => self.name.as_deref(),
            CanonicalField::AlternateName => self.alternatename.as_deref(),
            CanonicalField::Status => self.status.as_deref(),
        }
    }
}

pub struct ColumnResolver;

impl ColumnResolver {
    /// 解析单个规范字段使用的表头
    ///
    /// # 参数
    /// - headers: 工作表表头（已 trim，按列顺序）
    /// - candidates: 有序候选列表
    ///
    /// # 返回
    /// - Some(header): 命中的实际表头
    /// - None: 两轮均未命中
    ///
    /// # 规则
    /// 1. 精确轮: 按候选顺序，任一表头与候选相等即返回
    /// 2. 包含轮: 精确轮全部落空后，按候选顺序返回第一个包含候选子串的表头
    ///
    /// 低优先级候选的精确命中胜过高优先级候选的子串命中。
    pub fn resolve<'h>(headers: &'h [String], candidates: &CandidateList) -> Option<&'h str> {
        let lowered: Vec<String> = headers.iter().map(|h| h.to_lowercase()).collect();

        for candidate in candidates.iter() {
            let key = candidate.to_lowercase();
            if let Some(idx) = lowered.iter().position(|h| *h == key) {
                return Some(headers[idx].as_str());
            }
        }

        for candidate in candidates.iter() {
            let key = candidate.to_lowercase();
            if let Some(idx) = lowered.iter().position(|h| h.contains(&key)) {
                return Some(headers[idx].as_str());
            }
        }

        None
    }

    /// 解析四个规范字段
    pub fn resolve_mapping(headers: &[String], mapping: &ColumnMapping) -> ResolvedColumns {
        let pick = |field: CanonicalField| {
            Self::resolve(headers, mapping.candidates(field)).map(str::to_string)
        };

        ResolvedColumns {
            code: pick(CanonicalField::Code),
            name: pick(CanonicalField::Name),
            alternatename: pick(CanonicalField::AlternateName),
            status: pick(CanonicalField::Status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_exact_match_is_case_insensitive() {
        let h = headers(&["geogcd", "GEOGNM"]);
        let c = CandidateList::new(["GEOGCD"]);
        assert_eq!(ColumnResolver::resolve(&h, &c), Some("geogcd"));
    }

    #[test]
    fn test_exact_match_on_low_priority_beats_substring_on_high_priority() {
        // "Code" 是 "LAD23CD_Code" 的子串，但 "GEOGCD" 精确命中
        let h = headers(&["LAD23CD_Code", "GEOGCD"]);
        let c = CandidateList::new(["Code", "GEOGCD"]);
        assert_eq!(ColumnResolver::resolve(&h, &c), Some("GEOGCD"));
    }

    #[test]
    fn test_contains_pass_follows_candidate_order() {
        let h = headers(&["Area name (Welsh)", "Area code (GSS)"]);
        let c = CandidateList::new(["code", "name"]);
        assert_eq!(ColumnResolver::resolve(&h, &c), Some("Area code (GSS)"));
    }

    #[test]
    fn test_contains_pass_returns_first_matching_header() {
        let h = headers(&["GEOGNMW", "GEOGNM_ALT", "GEOGNM"]);
        let c = CandidateList::new(["nmw", "geognm_"]);
        assert_eq!(ColumnResolver::resolve(&h, &c), Some("GEOGNMW"));
    }

    #[test]
    fn test_no_match_returns_none() {
        let h = headers(&["ENTITYCD", "OPER_DATE"]);
        let c = CandidateList::new(["GEOGCD", "Code"]);
        assert_eq!(ColumnResolver::resolve(&h, &c), None);
    }

    #[test]
    fn test_empty_candidates_never_match() {
        let h = headers(&["GEOGCD"]);
        assert_eq!(ColumnResolver::resolve(&h, &CandidateList::default()), None);
        assert_eq!(ColumnResolver::resolve(&h, &CandidateList::new(["", "  "])), None);
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let h = headers(&["STATUS_CODE", "STATUS", "GEOGCD"]);
        let c = CandidateList::new(["stat", "status"]);
        let first = ColumnResolver::resolve(&h, &c);
        for _ in 0..10 {
            assert_eq!(ColumnResolver::resolve(&h, &c), first);
        }
        assert_eq!(first, Some("STATUS"));
    }

    #[test]
    fn test_resolve_mapping_scenario_geogcd() {
        let h = headers(&["GEOGCD", "GEOGNM"]);
        let mapping = ColumnMapping {
            code: CandidateList::new(["Code", "GEOGCD"]),
            name: CandidateList::new(["Name", "GEOGNM"]),
            ..Default::default()
        };

        let resolved = ColumnResolver::resolve_mapping(&h, &mapping);
        assert_eq!(resolved.code.as_deref(), Some("GEOGCD"));
        assert_eq!(resolved.name.as_deref(), Some("GEOGNM"));
        assert_eq!(resolved.alternatename, None);
        assert_eq!(resolved.status, None);
    }
}
