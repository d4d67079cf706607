// ==========================================
// 地理编码查找表 - 引擎层
// ==========================================
// 职责: 编排导入层与输出层，完成 geo / postcode 两条构建流程
// 红线: 单线程、同步；工作表级错误不终止构建
// ==========================================

pub mod enrichment;
pub mod geo_lookup_builder;
pub mod postcode_lookup_builder;
pub mod publisher;
pub mod report;
pub mod reporter;

// 重导出核心引擎
pub use enrichment::EnrichmentJoiner;
pub use geo_lookup_builder::{GeoBuildOutcome, GeoLookupBuilder, WorkbookSource};
pub use postcode_lookup_builder::{PostcodeBuildOutcome, PostcodeLookupBuilder};
pub use publisher::OutputPublisher;
pub use report::{
    BuildReport, JoinReport, OutputReport, SheetOutcome, SheetReport, SourceReport,
    TableInputReport,
};
pub use reporter::TracingReporter;
