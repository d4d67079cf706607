// ==========================================
// 地理编码查找表 - 表格数据模型
// ==========================================
// 职责: RawSheet（工作表原始行）与 Table（通用输出表）
// 用途: 解析层产出 RawSheet，构建层产出 Table 交给写出层
// ==========================================

use std::collections::{HashMap, HashSet};

/// 原始行记录: 表头 → 单元格值（空白单元格不出现在 map 中）
pub type RawRow = HashMap<String, String>;

// ==========================================
// RawSheet - 工作表原始数据
// ==========================================
// 生命周期: 由解析器产出，被 RecordCoercer 消费后丢弃
#[derive(Debug, Clone, Default)]
pub struct RawSheet {
    pub name: String,         // 工作表名
    pub headers: Vec<String>, // 表头（已 trim，保持原始列顺序）
    pub rows: Vec<RawRow>,    // 数据行（保持读取顺序）
}

impl RawSheet {
    /// 由表头和按列排列的单元格构造工作表
    ///
    /// # 参数
    /// - name: 工作表名
    /// - headers: 原始表头（会被 trim）
    /// - cells: 每行按列顺序的单元格值，None 或空白表示缺失
    ///
    /// # 说明
    /// - 表头重复时，以第一次出现的列为准
    /// - 完全空白的行被跳过
    pub fn from_cells<H, R>(name: impl Into<String>, headers: H, cells: R) -> Self
    where
        H: IntoIterator,
        H::Item: AsRef<str>,
        R: IntoIterator<Item = Vec<Option<String>>>,
    {
        let headers: Vec<String> = headers
            .into_iter()
            .map(|h| h.as_ref().trim().to_string())
            .collect();

        // 每个表头只由其第一次出现的列提供值，后续同名列即使前者为空也不补位
        let mut claimed = HashSet::new();
        let owning: Vec<bool> = headers.iter().map(|h| claimed.insert(h.as_str())).collect();

        let mut rows = Vec::new();
        for row_cells in cells {
            let mut row = RawRow::new();
            for (col_idx, cell) in row_cells.into_iter().enumerate() {
                if !owning.get(col_idx).copied().unwrap_or(false) {
                    continue;
                }
                let Some(value) = cell else {
                    continue;
                };
                if value.trim().is_empty() {
                    continue;
                }
                row.insert(headers[col_idx].clone(), value);
            }

            if row.is_empty() {
                continue;
            }
            rows.push(row);
        }

        Self {
            name: name.into(),
            headers,
            rows,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

// ==========================================
// Table - 通用表格（有序列 + 可空单元格）
// ==========================================
// 用途: 邮编表、输出表
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.column_index(column).is_some()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// 读取指定行、指定列的值
    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx)?.as_deref()
    }

    /// 追加一列（values 长度须与行数一致，不足部分补 None）
    pub fn push_column(&mut self, column: impl Into<String>, values: Vec<Option<String>>) {
        self.columns.push(column.into());
        let mut values = values.into_iter();
        for row in &mut self.rows {
            row.push(values.next().flatten());
        }
    }

    /// 按列名投影，保持原表列顺序
    ///
    /// # 返回
    /// - Ok(Table): 投影后的表
    /// - Err(Vec<String>): 原表中不存在的列名
    pub fn select_columns(self, keep: &[String]) -> Result<Table, Vec<String>> {
        let missing: Vec<String> = keep
            .iter()
            .filter(|k| !self.has_column(k))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(missing);
        }

        let indices: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| keep.contains(*c))
            .map(|(idx, _)| idx)
            .collect();

        let columns = indices.iter().map(|&i| self.columns[i].clone()).collect();
        let rows = self
            .rows
            .into_iter()
            .map(|mut row| {
                indices
                    .iter()
                    .map(|&i| row.get_mut(i).and_then(Option::take))
                    .collect()
            })
            .collect();

        Ok(Table { columns, rows })
    }
}
