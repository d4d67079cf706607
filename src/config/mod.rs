// ==========================================
// 地理编码查找表 - 配置层
// ==========================================
// 职责: YAML 配置加载与校验
// 存储: config.yaml（paths / geo_lookup / postcode_lookup 三段）
// ==========================================

pub mod config_manager;

// 重导出核心配置管理器
pub use config_manager::{
    config_keys, ConfigManager, GeoLookupSettings, LookupConfig, PostcodeLookupSettings,
    WorkbookSourceSettings,
};
