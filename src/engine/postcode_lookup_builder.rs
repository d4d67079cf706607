// ==========================================
// 地理编码查找表 - postcode lookup 构建器
// ==========================================
// 流程: 读取 NSPL CSV → 保留 keep_columns
//       → （可选）按编码补充名称列 → 重命名 → 写出
// 查找表来源: 同次运行的 geo 结果（内存），否则回读 geo_lookup.out_csv
// ==========================================

use crate::config::{config_keys, PostcodeLookupSettings};
use crate::domain::lookup::LookupTable;
use crate::domain::table::Table;
use crate::engine::enrichment::EnrichmentJoiner;
use crate::engine::publisher::OutputPublisher;
use crate::engine::report::{BuildReport, TableInputReport};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::CsvTableParser;
use crate::importer::importer_trait::{BuildReporter, TableReader};
use std::borrow::Cow;
use std::path::Path;
use tracing::{debug, instrument};

/// postcode lookup 构建结果
pub struct PostcodeBuildOutcome {
    pub table: Table,
    pub report: BuildReport,
}

pub struct PostcodeLookupBuilder<'r> {
    settings: PostcodeLookupSettings,
    reporter: &'r dyn BuildReporter,
    reader: Box<dyn TableReader>,
    publisher: OutputPublisher,
}

impl<'r> PostcodeLookupBuilder<'r> {
    pub fn new(settings: PostcodeLookupSettings, reporter: &'r dyn BuildReporter) -> Self {
        Self {
            settings,
            reporter,
            reader: Box::new(CsvTableParser),
            publisher: OutputPublisher::default(),
        }
    }

    pub fn with_reader(mut self, reader: Box<dyn TableReader>) -> Self {
        self.reader = reader;
        self
    }

    pub fn with_publisher(mut self, publisher: OutputPublisher) -> Self {
        self.publisher = publisher;
        self
    }

    pub fn settings(&self) -> &PostcodeLookupSettings {
        &self.settings
    }

    /// 独立运行（从 geo CSV 回读查找表）
    pub fn run(&self) -> ImportResult<PostcodeBuildOutcome> {
        self.build(None)
    }

    /// 构建 postcode lookup
    ///
    /// # 参数
    /// - geo: 同次运行产出的查找表；为 None 且需要 join 时回读 geo CSV
    ///
    /// # 返回
    /// - Err(SourceOpen): NSPL 或 geo CSV 无法读取
    /// - Err(Config): keep_columns 中的列在 NSPL 中不存在
    /// - Err(OutputWrite): CSV 写出失败
    #[instrument(skip_all, fields(in_memory_lookup = geo.is_some()))]
    pub fn build(&self, geo: Option<&LookupTable>) -> ImportResult<PostcodeBuildOutcome> {
        let mut report = BuildReport::start("postcode");

        let nspl = self.load_table(&self.settings.nspl_csv, &mut report)?;
        let table = self.project(nspl)?;

        let table = if self.settings.join_name_for_codes.is_empty() {
            table
        } else {
            let lookup = self.lookup_table(geo, &mut report)?;
            let index = lookup.enrichment_index();
            debug!(codes = index.len(), "名称索引已建立");

            let (table, joins) =
                EnrichmentJoiner::join(table, &self.settings.join_name_for_codes, &index);
            for join in &joins {
                match &join.skipped {
                    Some(reason) => self.reporter.join_skipped(&join.column, reason),
                    None => self
                        .reporter
                        .join_applied(&join.column, join.matched, join.unmatched),
                }
            }
            report.enrichment = joins;
            table
        };

        let table = EnrichmentJoiner::rename_columns(table, &self.settings.rename_final);

        self.publisher.publish(
            &table,
            &self.settings.out_csv,
            self.settings.out_parquet.as_deref(),
            self.reporter,
            &mut report,
        )?;

        report.finish();
        self.reporter.build_finished("postcode", table.row_count());

        Ok(PostcodeBuildOutcome { table, report })
    }

    fn load_table(&self, path: &Path, report: &mut BuildReport) -> ImportResult<Table> {
        let table = self.reader.read_table(path)?;
        let display = path.display().to_string();
        self.reporter
            .table_loaded(&display, table.row_count(), table.columns.len());
        report.inputs.push(TableInputReport {
            path: display,
            rows: table.row_count(),
            columns: table.columns.len(),
        });
        Ok(table)
    }

    /// 保留 keep_columns（为空时保留全部列）
    fn project(&self, table: Table) -> ImportResult<Table> {
        if self.settings.keep_columns.is_empty() {
            return Ok(table);
        }
        table
            .select_columns(&self.settings.keep_columns)
            .map_err(|missing| {
                ImportError::config(
                    config_keys::POSTCODE_KEEP_COLUMNS,
                    format!("NSPL 文件中不存在以下列: {}", missing.join(", ")),
                )
            })
    }

    /// 取得用于 join 的查找表
    fn lookup_table<'g>(
        &self,
        geo: Option<&'g LookupTable>,
        report: &mut BuildReport,
    ) -> ImportResult<Cow<'g, LookupTable>> {
        if let Some(lookup) = geo {
            return Ok(Cow::Borrowed(lookup));
        }

        let path = self.settings.geo_lookup_csv.as_deref().ok_or_else(|| {
            ImportError::config(config_keys::GEO_OUT_CSV, "按编码补充名称时必须配置")
        })?;
        let table = self.load_table(path, report)?;
        let lookup = LookupTable::from_table(&table).ok_or_else(|| ImportError::SourceOpen {
            path: path.display().to_string(),
            message: "geo lookup 文件缺少 Code 列".to_string(),
        })?;
        Ok(Cow::Owned(lookup))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::reporter::TracingReporter;
    use std::collections::BTreeMap;
    use std::path::PathBuf;
    use tempfile::tempdir;

    struct StaticReader(Table);

    impl TableReader for StaticReader {
        fn read_table(&self, _path: &Path) -> ImportResult<Table> {
            Ok(self.0.clone())
        }
    }

    fn nspl() -> Table {
        let mut table = Table::new(vec!["pcds".into(), "oslaua".into(), "lat".into()]);
        table.rows.push(vec![
            Some("TS24 0AA".into()),
            Some("E06000001".into()),
            Some("54.69".into()),
        ]);
        table
    }

    fn settings(out: PathBuf, keep: &[&str]) -> PostcodeLookupSettings {
        PostcodeLookupSettings {
            nspl_csv: PathBuf::from("NSPL.csv"),
            keep_columns: keep.iter().map(|c| c.to_string()).collect(),
            join_name_for_codes: Vec::new(),
            rename_final: BTreeMap::new(),
            geo_lookup_csv: None,
            out_csv: out,
            out_parquet: None,
        }
    }

    #[test]
    fn test_keep_columns_missing_is_config_error() {
        let dir = tempdir().unwrap();
        let reporter = TracingReporter;
        let builder = PostcodeLookupBuilder::new(
            settings(dir.path().join("out.csv"), &["pcds", "rgn"]),
            &reporter,
        )
        .with_reader(Box::new(StaticReader(nspl())));

        let result = builder.run();
        match result {
            Err(ImportError::Config { key, message }) => {
                assert_eq!(key, config_keys::POSTCODE_KEEP_COLUMNS);
                assert!(message.contains("rgn"));
            }
            _ => panic!("expected config error"),
        }
        assert!(!dir.path().join("out.csv").exists());
    }

    #[test]
    fn test_empty_keep_columns_retains_all() {
        let dir = tempdir().unwrap();
        let reporter = TracingReporter;
        let outcome = PostcodeLookupBuilder::new(settings(dir.path().join("out.csv"), &[]), &reporter)
            .with_reader(Box::new(StaticReader(nspl())))
            .run()
            .unwrap();

        assert_eq!(outcome.table.columns, vec!["pcds", "oslaua", "lat"]);
        assert!(outcome.report.enrichment.is_empty());
    }
}
