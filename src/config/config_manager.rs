// ==========================================
// 地理编码查找表 - 配置管理器
// ==========================================
// 职责: 加载 YAML 配置、校验必填项、产出各构建流程的设置
// 红线: 必填项缺失 → ConfigError，在写出任何文件之前失败
// ==========================================

use crate::domain::mapping::{ColumnMapping, SheetMappings};
use crate::importer::error::{ImportError, ImportResult};
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    pub const PATHS: &str = "paths";
    pub const RGC_EWNI_XLSX: &str = "paths.rgc_ewni_xlsx";
    pub const RGC_SCOT_XLSX: &str = "paths.rgc_scot_xlsx";
    pub const NSPL_CSV: &str = "paths.nspl_csv";

    pub const GEO_LOOKUP: &str = "geo_lookup";
    pub const GEO_OUT_CSV: &str = "geo_lookup.out_csv";
    pub const GEO_SHEET_NAME_PATTERN: &str = "geo_lookup.sheet_name_pattern";

    pub const POSTCODE_LOOKUP: &str = "postcode_lookup";
    pub const POSTCODE_OUT_CSV: &str = "postcode_lookup.out_csv";
    pub const POSTCODE_KEEP_COLUMNS: &str = "postcode_lookup.keep_columns";
}

// ==========================================
// YAML 文件结构
// ==========================================

/// 配置文件根结构
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LookupConfig {
    pub paths: Option<PathsConfig>,
    pub geo_lookup: Option<GeoLookupConfig>,
    pub postcode_lookup: Option<PostcodeLookupConfig>,
}

/// 数据源路径（对核心逻辑而言是不透明字符串）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    pub rgc_ewni_xlsx: Option<String>,
    pub rgc_scot_xlsx: Option<String>,
    pub nspl_csv: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeoLookupConfig {
    pub out_csv: Option<String>,
    pub out_parquet: Option<String>,
    #[serde(default)]
    pub ewni_sheets: Vec<String>,
    #[serde(default)]
    pub scotland_sheets: Vec<String>,
    pub sheet_name_pattern: Option<String>,
    #[serde(default)]
    pub column_map: ColumnMapping,
    #[serde(default)]
    pub per_sheet_overrides: BTreeMap<String, ColumnMapping>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostcodeLookupConfig {
    pub out_csv: Option<String>,
    pub out_parquet: Option<String>,
    #[serde(default)]
    pub keep_columns: Vec<String>,
    #[serde(default)]
    pub join_name_for_codes: Vec<String>,
    #[serde(default)]
    pub rename_final: BTreeMap<String, String>,
}

// ==========================================
// 已校验的构建设置
// ==========================================

/// 单个工作簿数据源
#[derive(Debug, Clone)]
pub struct WorkbookSourceSettings {
    pub label: String,               // "EW/NI" / "Scotland"
    pub path: PathBuf,
    pub explicit_sheets: Vec<String>,
}

/// geo lookup 构建设置
#[derive(Debug, Clone)]
pub struct GeoLookupSettings {
    pub sources: Vec<WorkbookSourceSettings>, // 处理顺序: EW/NI → Scotland
    pub sheet_name_pattern: Option<Regex>,
    pub mappings: SheetMappings,
    pub out_csv: PathBuf,
    pub out_parquet: Option<PathBuf>,
}

/// postcode lookup 构建设置
#[derive(Debug, Clone)]
pub struct PostcodeLookupSettings {
    pub nspl_csv: PathBuf,
    pub keep_columns: Vec<String>,
    pub join_name_for_codes: Vec<String>,
    pub rename_final: BTreeMap<String, String>,
    pub geo_lookup_csv: Option<PathBuf>, // 仅在需要 join 时使用
    pub out_csv: PathBuf,
    pub out_parquet: Option<PathBuf>,
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigManager {
    source: String,
    config: LookupConfig,
}

impl ConfigManager {
    /// 从 YAML 文件加载配置
    ///
    /// # 返回
    /// - Err(SourceOpen): 配置文件无法读取
    /// - Err(Config): YAML 格式错误
    pub fn from_path<P: AsRef<Path>>(path: P) -> ImportResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ImportError::SourceOpen {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::parse(&text, path.display().to_string())
    }

    /// 从 YAML 文本加载配置
    pub fn from_yaml_str(text: &str) -> ImportResult<Self> {
        Self::parse(text, "<inline>".to_string())
    }

    fn parse(text: &str, source: String) -> ImportResult<Self> {
        // 空文档视为空配置，由后续必填校验报错
        let config = if text.trim().is_empty() {
            LookupConfig::default()
        } else {
            serde_yaml::from_str(text).map_err(|e| ImportError::config(source.as_str(), e.to_string()))?
        };
        Ok(Self { source, config })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn raw(&self) -> &LookupConfig {
        &self.config
    }

    fn paths(&self) -> ImportResult<&PathsConfig> {
        self.config
            .paths
            .as_ref()
            .ok_or_else(|| ImportError::config(config_keys::PATHS, "缺少必填配置段"))
    }

    fn geo_section(&self) -> ImportResult<&GeoLookupConfig> {
        self.config
            .geo_lookup
            .as_ref()
            .ok_or_else(|| ImportError::config(config_keys::GEO_LOOKUP, "缺少必填配置段"))
    }

    fn postcode_section(&self) -> ImportResult<&PostcodeLookupConfig> {
        self.config.postcode_lookup.as_ref().ok_or_else(|| {
            ImportError::config(config_keys::POSTCODE_LOOKUP, "缺少必填配置段")
        })
    }

    /// 必填字符串项（trim 后非空）
    fn require(value: Option<&String>, key: &str) -> ImportResult<PathBuf> {
        match value.map(|v| v.trim()) {
            Some(v) if !v.is_empty() => Ok(PathBuf::from(v)),
            _ => Err(ImportError::config(key, "缺少必填配置项")),
        }
    }

    fn optional(value: Option<&String>) -> Option<PathBuf> {
        value
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    /// 产出 geo lookup 构建设置
    ///
    /// # 校验
    /// - paths / geo_lookup 段存在
    /// - 两个工作簿路径与 out_csv 存在
    /// - sheet_name_pattern 可编译
    pub fn geo_lookup_settings(&self) -> ImportResult<GeoLookupSettings> {
        let paths = self.paths()?;
        let geo = self.geo_section()?;

        let ewni = Self::require(paths.rgc_ewni_xlsx.as_ref(), config_keys::RGC_EWNI_XLSX)?;
        let scot = Self::require(paths.rgc_scot_xlsx.as_ref(), config_keys::RGC_SCOT_XLSX)?;
        let out_csv = Self::require(geo.out_csv.as_ref(), config_keys::GEO_OUT_CSV)?;

        let sheet_name_pattern = match geo.sheet_name_pattern.as_deref().map(str::trim) {
            Some(p) if !p.is_empty() => Some(Regex::new(p).map_err(|e| {
                ImportError::config(config_keys::GEO_SHEET_NAME_PATTERN, e.to_string())
            })?),
            _ => None,
        };

        Ok(GeoLookupSettings {
            sources: vec![
                WorkbookSourceSettings {
                    label: "EW/NI".to_string(),
                    path: ewni,
                    explicit_sheets: geo.ewni_sheets.clone(),
                },
                WorkbookSourceSettings {
                    label: "Scotland".to_string(),
                    path: scot,
                    explicit_sheets: geo.scotland_sheets.clone(),
                },
            ],
            sheet_name_pattern,
            mappings: SheetMappings::new(geo.column_map.clone(), geo.per_sheet_overrides.clone()),
            out_csv,
            out_parquet: Self::optional(geo.out_parquet.as_ref()),
        })
    }

    /// 产出 postcode lookup 构建设置
    ///
    /// # 校验
    /// - paths.nspl_csv 与 postcode_lookup.out_csv 存在
    /// - join_name_for_codes 非空时，geo_lookup.out_csv 须存在（用于回读查找表）
    pub fn postcode_lookup_settings(&self) -> ImportResult<PostcodeLookupSettings> {
        let paths = self.paths()?;
        let postcode = self.postcode_section()?;

        let nspl_csv = Self::require(paths.nspl_csv.as_ref(), config_keys::NSPL_CSV)?;
        let out_csv = Self::require(postcode.out_csv.as_ref(), config_keys::POSTCODE_OUT_CSV)?;

        let geo_lookup_csv = if postcode.join_name_for_codes.is_empty() {
            None
        } else {
            let geo = self.geo_section()?;
            Some(Self::require(geo.out_csv.as_ref(), config_keys::GEO_OUT_CSV)?)
        };

        Ok(PostcodeLookupSettings {
            nspl_csv,
            keep_columns: postcode.keep_columns.clone(),
            join_name_for_codes: postcode.join_name_for_codes.clone(),
            rename_final: postcode.rename_final.clone(),
            geo_lookup_csv,
            out_csv,
            out_parquet: Self::optional(postcode.out_parquet.as_ref()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::CanonicalField;

    const FULL_CONFIG: &str = r#"
paths:
  rgc_ewni_xlsx: data/RGC_EWNI.xlsx
  rgc_scot_xlsx: data/RGC_SCOT.xlsx
  nspl_csv: data/NSPL.csv
geo_lookup:
  out_csv: out/geo_lookup.csv
  out_parquet: out/geo_lookup.parquet
  scotland_sheets: [S12_CA]
  sheet_name_pattern: "^[ENSW]\\d{2}"
  column_map:
    code: [Code, GEOGCD]
    name: [Name, GEOGNM]
    alternatename: [GEOGNMW]
    status: [STATUS]
  per_sheet_overrides:
    LAD_2023:
      code: [LAD23CD]
      name: [LAD23NM]
postcode_lookup:
  out_csv: out/postcode_lookup.csv
  keep_columns: [pcds, oslaua, ctry]
  join_name_for_codes: [oslaua, ctry]
  rename_final:
    pcds: postcode
  use_duckdb: false
"#;

    #[test]
    fn test_geo_settings_from_full_config() {
        let manager = ConfigManager::from_yaml_str(FULL_CONFIG).unwrap();
        let settings = manager.geo_lookup_settings().unwrap();

        assert_eq!(settings.sources.len(), 2);
        assert_eq!(settings.sources[0].label, "EW/NI");
        assert!(settings.sources[0].explicit_sheets.is_empty());
        assert_eq!(settings.sources[1].explicit_sheets, vec!["S12_CA"]);
        assert_eq!(settings.out_csv, PathBuf::from("out/geo_lookup.csv"));
        assert_eq!(settings.out_parquet, Some(PathBuf::from("out/geo_lookup.parquet")));
        assert!(settings.sheet_name_pattern.unwrap().is_match("E06_UA"));

        let override_map = settings.mappings.for_sheet("LAD_2023");
        assert_eq!(
            override_map.candidates(CanonicalField::Code).iter().collect::<Vec<_>>(),
            vec!["LAD23CD"]
        );
        assert!(override_map.status.is_empty());
    }

    #[test]
    fn test_postcode_settings_from_full_config() {
        let manager = ConfigManager::from_yaml_str(FULL_CONFIG).unwrap();
        let settings = manager.postcode_lookup_settings().unwrap();

        assert_eq!(settings.keep_columns, vec!["pcds", "oslaua", "ctry"]);
        assert_eq!(settings.join_name_for_codes, vec!["oslaua", "ctry"]);
        assert_eq!(settings.rename_final.get("pcds").map(String::as_str), Some("postcode"));
        assert_eq!(settings.geo_lookup_csv, Some(PathBuf::from("out/geo_lookup.csv")));
        assert_eq!(settings.out_parquet, None);
    }

    #[test]
    fn test_missing_paths_section_is_config_error() {
        let manager = ConfigManager::from_yaml_str("geo_lookup:\n  out_csv: out.csv\n").unwrap();
        let err = manager.geo_lookup_settings().unwrap_err();
        assert!(matches!(err, ImportError::Config { ref key, .. } if key == "paths"));
    }

    #[test]
    fn test_missing_geo_section_is_config_error() {
        let yaml = "paths:\n  rgc_ewni_xlsx: a.xlsx\n  rgc_scot_xlsx: b.xlsx\n";
        let err = ConfigManager::from_yaml_str(yaml)
            .unwrap()
            .geo_lookup_settings()
            .unwrap_err();
        assert!(matches!(err, ImportError::Config { ref key, .. } if key == "geo_lookup"));
    }

    #[test]
    fn test_blank_required_path_is_config_error() {
        let yaml = "paths:\n  rgc_ewni_xlsx: ' '\n  rgc_scot_xlsx: b.xlsx\ngeo_lookup:\n  out_csv: o.csv\n";
        let err = ConfigManager::from_yaml_str(yaml)
            .unwrap()
            .geo_lookup_settings()
            .unwrap_err();
        assert!(matches!(err, ImportError::Config { ref key, .. } if key == config_keys::RGC_EWNI_XLSX));
    }

    #[test]
    fn test_invalid_sheet_pattern_is_config_error() {
        let yaml = "paths:\n  rgc_ewni_xlsx: a.xlsx\n  rgc_scot_xlsx: b.xlsx\ngeo_lookup:\n  out_csv: o.csv\n  sheet_name_pattern: '(['\n";
        let err = ConfigManager::from_yaml_str(yaml)
            .unwrap()
            .geo_lookup_settings()
            .unwrap_err();
        assert!(matches!(
            err,
            ImportError::Config { ref key, .. } if key == config_keys::GEO_SHEET_NAME_PATTERN
        ));
    }

    #[test]
    fn test_postcode_without_join_does_not_need_geo_section() {
        let yaml = "paths:\n  nspl_csv: n.csv\npostcode_lookup:\n  out_csv: p.csv\n";
        let settings = ConfigManager::from_yaml_str(yaml)
            .unwrap()
            .postcode_lookup_settings()
            .unwrap();
        assert!(settings.geo_lookup_csv.is_none());
        assert!(settings.keep_columns.is_empty());
    }

    #[test]
    fn test_malformed_yaml_is_config_error() {
        let err = ConfigManager::from_yaml_str("paths: [unclosed").unwrap_err();
        assert!(matches!(err, ImportError::Config { .. }));
    }

    #[test]
    fn test_missing_config_file_is_source_open_error() {
        let err = ConfigManager::from_path("does/not/exist.yaml").unwrap_err();
        assert!(matches!(err, ImportError::SourceOpen { .. }));
    }
}
