// ==========================================
// 地理编码查找表 - 导入层
// ==========================================
// 职责: 工作表选择 → 列解析 → 记录规整 → 合并去重
// 支持: Excel, CSV
// ==========================================

// 模块声明
pub mod column_resolver;
pub mod error;
pub mod file_parser;
pub mod importer_trait;
pub mod lookup_merger;
pub mod record_coercer;
pub mod sheet_selector;

// 重导出核心类型
pub use column_resolver::{ColumnResolver, ResolvedColumns};
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvTableParser, ExcelWorkbook};
pub use lookup_merger::{LookupMerger, MergeStats};
pub use record_coercer::{CoercionOutcome, RecordCoercer, SheetBatch};
pub use sheet_selector::{SheetSelection, SheetSelector};

// 重导出 Trait 接口
pub use importer_trait::{BuildReporter, TableReader, WorkbookReader};
