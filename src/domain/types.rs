// ==========================================
// 地理编码查找表 - 领域类型定义
// ==========================================
// 职责: 规范字段 (Canonical Field) 定义
// 红线: 输出列固定为 Code, Name, AlternateName, Status
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 规范字段 (Canonical Field)
// ==========================================
// 配置键: code / name / alternatename / status
// 输出列: Code / Name / AlternateName / Status
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CanonicalField {
    Code,          // 编码（主键，必填）
    Name,          // 名称
    AlternateName, // 别名（如威尔士语名称）
    Status,        // 状态（live / terminated）
}

impl CanonicalField {
    /// 全部规范字段，按输出列顺序
    pub const ALL: [CanonicalField; 4] = [
        CanonicalField::Code,
        CanonicalField::Name,
        CanonicalField::AlternateName,
        CanonicalField::Status,
    ];

    /// 配置文件中 column_map 使用的键名
    pub fn config_key(&self) -> &'static str {
        match self {
            CanonicalField::Code => "code",
            CanonicalField::Name => "name",
            CanonicalField::AlternateName => "alternatename",
            CanonicalField::Status => "status",
        }
    }

    /// 输出文件中的列名
    pub fn column_name(&self) -> &'static str {
        match self {
            CanonicalField::Code => "Code",
            CanonicalField::Name => "Name",
            CanonicalField::AlternateName => "AlternateName",
            CanonicalField::Status => "Status",
        }
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.config_key())
    }
}
