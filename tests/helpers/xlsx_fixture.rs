// ==========================================
// Excel 测试工作簿生成
// ==========================================
// 用 rust_xlsxwriter 写出真实 xlsx，供 calamine 读取
// 空字符串单元格不写入（读取时为空白单元格）
// ==========================================

use std::path::{Path, PathBuf};

pub struct SheetSpec<'a> {
    pub name: &'a str,
    pub rows: Vec<Vec<&'a str>>,
}

impl<'a> SheetSpec<'a> {
    pub fn new(name: &'a str, rows: &[&[&'a str]]) -> Self {
        Self {
            name,
            rows: rows.iter().map(|r| r.to_vec()).collect(),
        }
    }
}

/// 在目录中写出工作簿，工作表顺序与参数一致
pub fn write_workbook(dir: &Path, file_name: &str, sheets: &[SheetSpec]) -> PathBuf {
    let path = dir.join(file_name);
    let mut workbook = rust_xlsxwriter::Workbook::new();

    for spec in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(spec.name).expect("工作表名无效");
        for (row_idx, row) in spec.rows.iter().enumerate() {
            for (col_idx, value) in row.iter().enumerate() {
                if value.is_empty() {
                    continue;
                }
                worksheet
                    .write_string(row_idx as u32, col_idx as u16, *value)
                    .expect("写入单元格失败");
            }
        }
    }

    workbook.save(&path).expect("保存测试工作簿失败");
    path
}
