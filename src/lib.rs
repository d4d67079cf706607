// ==========================================
// 地理编码查找表 - 核心库
// ==========================================
// 职责: 从 RGC 工作簿构建去重的 Code → Name 查找表，
//       并为 NSPL 邮编表补充名称列
// 技术栈: calamine + csv + parquet，serde_yaml 配置，tracing 日志
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 表与记录
pub mod domain;

// 导入层 - 工作簿/CSV 读取、列解析、规整、合并
pub mod importer;

// 输出层 - CSV / Parquet
pub mod exporter;

// 配置层 - YAML 配置
pub mod config;

// 引擎层 - 构建流程
pub mod engine;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

pub use domain::{
    CandidateList, CanonicalField, CanonicalRecord, ColumnMapping, EnrichmentIndex, LookupTable,
    RawSheet, SheetMappings, Table,
};

pub use importer::{
    ColumnResolver, ImportError, ImportResult, LookupMerger, RecordCoercer, SheetSelector,
};

pub use config::ConfigManager;

pub use engine::{
    BuildReport, EnrichmentJoiner, GeoLookupBuilder, PostcodeLookupBuilder, TracingReporter,
};

// ==========================================
// 常量定义
// ==========================================

// 版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 名称
pub const APP_NAME: &str = "geo-lookup";
