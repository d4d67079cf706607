// ==========================================
// 地理编码查找表 - 领域模型层
// ==========================================
// 职责: 定义规范字段、列映射、查找表、表格数据结构
// 红线: 不含文件读写逻辑,不含构建流程逻辑
// ==========================================

pub mod lookup;
pub mod mapping;
pub mod table;
pub mod types;

// 重导出核心类型
pub use lookup::{CanonicalRecord, EnrichmentIndex, LookupTable};
pub use mapping::{CandidateList, ColumnMapping, SheetMappings};
pub use table::{RawRow, RawSheet, Table};
pub use types::CanonicalField;
