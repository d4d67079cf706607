// ==========================================
// 测试数据构建器
// ==========================================
// 提供: 工作表构建、列映射构建、构建设置构建
// ==========================================

use geo_lookup::config::{GeoLookupSettings, PostcodeLookupSettings};
use geo_lookup::domain::{CandidateList, ColumnMapping, RawSheet, SheetMappings};
use std::collections::BTreeMap;
use std::path::Path;

/// 工作表构建器（所有单元格按字符串给出，空字符串视为空白单元格）
pub struct SheetBuilder {
    name: String,
    headers: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl SheetBuilder {
    pub fn new(name: &str, headers: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn row(mut self, cells: &[&str]) -> Self {
        self.rows.push(
            cells
                .iter()
                .map(|c| if c.is_empty() { None } else { Some(c.to_string()) })
                .collect(),
        );
        self
    }

    pub fn build(self) -> RawSheet {
        RawSheet::from_cells(self.name, self.headers, self.rows)
    }
}

/// RGC 常用的基础映射
pub fn base_mapping() -> ColumnMapping {
    ColumnMapping {
        code: CandidateList::new(["Code", "GEOGCD"]),
        name: CandidateList::new(["Name", "GEOGNM"]),
        alternatename: CandidateList::new(["GEOGNMW"]),
        status: CandidateList::new(["STATUS"]),
    }
}

pub fn geo_settings(out_dir: &Path) -> GeoLookupSettings {
    GeoLookupSettings {
        sources: Vec::new(),
        sheet_name_pattern: None,
        mappings: SheetMappings::new(base_mapping(), BTreeMap::new()),
        out_csv: out_dir.join("geo_lookup.csv"),
        out_parquet: None,
    }
}

pub fn postcode_settings(nspl_csv: &Path, out_dir: &Path) -> PostcodeLookupSettings {
    PostcodeLookupSettings {
        nspl_csv: nspl_csv.to_path_buf(),
        keep_columns: Vec::new(),
        join_name_for_codes: Vec::new(),
        rename_final: BTreeMap::new(),
        geo_lookup_csv: Some(out_dir.join("geo_lookup.csv")),
        out_csv: out_dir.join("postcode_lookup.csv"),
        out_parquet: None,
    }
}
