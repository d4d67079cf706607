// ==========================================
// 地理编码查找表 - 工作表选择器实现
// ==========================================
// 职责: 工作簿全部工作表 → 参与构建的工作表（保持原顺序）
// 优先级: 显式清单 > 名称正则（前缀锚定）> 全部
// ==========================================

use regex::Regex;

/// 工作表选择结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetSelection {
    pub selected: Vec<String>, // 入选工作表（工作簿原顺序）
    pub missing: Vec<String>,  // 显式清单中在工作簿里不存在的名称
}

pub struct SheetSelector;

impl SheetSelector {
    /// 选择参与构建的工作表
    ///
    /// # 参数
    /// - all_names: 工作簿中的全部工作表名（原顺序）
    /// - explicit: 显式清单，可为空
    /// - pattern: 名称正则，可为 None
    ///
    /// # 规则
    /// 1. 显式清单非空 → 保留在清单中的名称，顺序取工作簿顺序
    /// 2. 否则正则存在 → 保留 trim 后从开头匹配正则的名称
    /// 3. 否则 → 全部保留
    ///
    /// 清单与正则互斥，从不组合。
    pub fn select(all_names: &[String], explicit: &[String], pattern: Option<&Regex>) -> SheetSelection {
        if !explicit.is_empty() {
            let selected = all_names
                .iter()
                .filter(|name| explicit.contains(*name))
                .cloned()
                .collect();
            let missing = explicit
                .iter()
                .filter(|name| !all_names.contains(*name))
                .cloned()
                .collect();
            return SheetSelection { selected, missing };
        }

        let selected = match pattern {
            Some(rx) => all_names
                .iter()
                .filter(|name| Self::matches_prefix(rx, name.trim()))
                .cloned()
                .collect(),
            None => all_names.to_vec(),
        };

        SheetSelection {
            selected,
            missing: Vec::new(),
        }
    }

    /// 正则是否从字符串开头匹配（前缀匹配，不要求整串匹配）
    fn matches_prefix(rx: &Regex, name: &str) -> bool {
        rx.find(name).is_some_and(|m| m.start() == 0)
    }
}
