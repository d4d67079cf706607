// ==========================================
// 地理编码查找表 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 分级: 致命错误终止构建；工作表级错误记录后跳过
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 配置错误（致命）=====
    #[error("配置错误 (key: {key}): {message}")]
    Config { key: String, message: String },

    // ===== 数据源错误（致命）=====
    #[error("无法打开数据源 {path}: {message}")]
    SourceOpen { path: String, message: String },

    #[error("不支持的文件格式: {0} (仅支持 .xlsx/.xlsm/.xls 或 .csv)")]
    UnsupportedFormat(String),

    // ===== 工作表错误（可恢复，按空批次处理）=====
    #[error("工作表 '{sheet}' 处理失败: {message}")]
    SheetProcessing { sheet: String, message: String },

    // ===== 合并结果错误（致命）=====
    #[error("所有数据源均未产出记录，请检查工作表选择、文件路径与列候选配置")]
    EmptyResult,

    // ===== 输出错误 =====
    #[error("写出失败 {path}: {message}")]
    OutputWrite { path: String, message: String },

    #[error("可选输出已跳过 {path}: {message}")]
    OptionalWrite { path: String, message: String },

    // ===== 底层解析错误 =====
    #[error("Excel 解析错误: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析错误: {0}")]
    CsvParseError(String),

    #[error("Parquet 错误: {0}")]
    ParquetError(String),

    #[error("文件读取错误: {0}")]
    FileReadError(String),
}

impl ImportError {
    /// 是否为可恢复错误（不影响退出码）
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ImportError::SheetProcessing { .. } | ImportError::OptionalWrite { .. }
        )
    }

    pub(crate) fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        ImportError::Config {
            key: key.into(),
            message: message.into(),
        }
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

// 实现 From<parquet::errors::ParquetError>
impl From<parquet::errors::ParquetError> for ImportError {
    fn from(err: parquet::errors::ParquetError) -> Self {
        ImportError::ParquetError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
