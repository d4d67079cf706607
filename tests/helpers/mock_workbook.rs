// ==========================================
// 内存工作簿 - 用于集成测试
// ==========================================
// 替代 calamine 读取的 Excel 文件；可指定读取失败的工作表
// ==========================================

use geo_lookup::domain::RawSheet;
use geo_lookup::importer::{ImportError, ImportResult, WorkbookReader};
use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkbook {
    pub path: String,
    pub sheets: Vec<RawSheet>,
    pub failing: HashSet<String>,
}

impl InMemoryWorkbook {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            ..Default::default()
        }
    }

    pub fn with_sheet(mut self, sheet: RawSheet) -> Self {
        self.sheets.push(sheet);
        self
    }

    /// 读取该工作表时返回错误
    pub fn with_failing_sheet(mut self, name: &str) -> Self {
        self.sheets.push(RawSheet {
            name: name.to_string(),
            ..Default::default()
        });
        self.failing.insert(name.to_string());
        self
    }
}

impl WorkbookReader for InMemoryWorkbook {
    fn source_path(&self) -> &str {
        &self.path
    }

    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name.clone()).collect()
    }

    fn read_sheet(&mut self, sheet_name: &str) -> ImportResult<RawSheet> {
        if self.failing.contains(sheet_name) {
            return Err(ImportError::ExcelParseError(format!(
                "corrupt range in {}",
                sheet_name
            )));
        }
        self.sheets
            .iter()
            .find(|s| s.name == sheet_name)
            .cloned()
            .ok_or_else(|| ImportError::SheetProcessing {
                sheet: sheet_name.to_string(),
                message: "sheet not found".to_string(),
            })
    }
}
