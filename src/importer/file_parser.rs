// ==========================================
// 地理编码查找表 - 文件解析器实现
// ==========================================
// 阶段 0: 文件读取与解析
// 支持: Excel (.xlsx/.xlsm/.xls) / CSV (.csv)
// ==========================================

use crate::domain::table::{RawSheet, Table};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::{TableReader, WorkbookReader};
use calamine::{open_workbook_auto, Data, Reader, Sheets};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

const EXCEL_EXTENSIONS: [&str; 3] = ["xlsx", "xlsm", "xls"];

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

// ==========================================
// ExcelWorkbook - calamine 工作簿
// ==========================================
pub struct ExcelWorkbook {
    path: String,
    workbook: Sheets<BufReader<File>>,
}

impl ExcelWorkbook {
    /// 打开工作簿
    ///
    /// # 返回
    /// - Ok(ExcelWorkbook)
    /// - Err(SourceOpen): 文件不存在或无法打开（致命）
    /// - Err(UnsupportedFormat): 扩展名不是 Excel
    pub fn open<P: AsRef<Path>>(file_path: P) -> ImportResult<Self> {
        let path = file_path.as_ref();
        let display = path.display().to_string();

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::SourceOpen {
                path: display,
                message: "文件不存在".to_string(),
            });
        }

        // 检查扩展名
        let ext = extension_of(path);
        if !EXCEL_EXTENSIONS.contains(&ext.as_str()) {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let workbook = open_workbook_auto(path).map_err(|e| ImportError::SourceOpen {
            path: display.clone(),
            message: e.to_string(),
        })?;

        Ok(Self {
            path: display,
            workbook,
        })
    }

    fn cell_value(cell: &Data) -> Option<String> {
        match cell {
            Data::Empty => None,
            other => Some(other.to_string()),
        }
    }
}

impl WorkbookReader for ExcelWorkbook {
    fn source_path(&self) -> &str {
        &self.path
    }

    fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }

    fn read_sheet(&mut self, sheet_name: &str) -> ImportResult<RawSheet> {
        // 解析失败返回 ExcelParseError，由构建流程包装为工作表级错误
        let range = self.workbook.worksheet_range(sheet_name)?;

        // 提取表头（第一行），空表返回无表头工作表
        let mut rows = range.rows();
        let Some(header_row) = rows.next() else {
            return Ok(RawSheet {
                name: sheet_name.to_string(),
                ..Default::default()
            });
        };
        let headers: Vec<String> = header_row.iter().map(|cell| cell.to_string()).collect();

        // 读取数据行
        let cells = rows.map(|row| row.iter().map(Self::cell_value).collect::<Vec<_>>());

        Ok(RawSheet::from_cells(sheet_name, headers, cells))
    }
}

// ==========================================
// CsvTableParser - CSV 平面表
// ==========================================
pub struct CsvTableParser;

impl TableReader for CsvTableParser {
    fn read_table(&self, path: &Path) -> ImportResult<Table> {
        let display = path.display().to_string();

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::SourceOpen {
                path: display,
                message: "文件不存在".to_string(),
            });
        }

        // 检查扩展名
        let ext = extension_of(path);
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        // 打开 CSV 文件
        let file = File::open(path).map_err(|e| ImportError::SourceOpen {
            path: display.clone(),
            message: e.to_string(),
        })?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        // 读取表头
        let columns: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();
        let width = columns.len();

        // 读取所有行
        let mut table = Table::new(columns);
        for result in reader.records() {
            let record = result?;
            let mut row: Vec<Option<String>> = record
                .iter()
                .take(width)
                .map(|value| {
                    let trimmed = value.trim();
                    (!trimmed.is_empty()).then(|| trimmed.to_string())
                })
                .collect();

            // 跳过完全空白的行
            if row.iter().all(Option::is_none) {
                continue;
            }

            row.resize(width, None);
            table.rows.push(row);
        }

        Ok(table)
    }
}
