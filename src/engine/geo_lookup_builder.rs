// ==========================================
// 地理编码查找表 - geo lookup 构建器
// ==========================================
// 流程: 逐工作簿（EW/NI → Scotland）选择工作表
//       → 逐表选择映射 → 规整 → 追加到合并器
//       → 去重 → 写出 CSV（主）与 Parquet（可选）
// 容错: 单表失败记录后按空批次处理；打开工作簿失败、空结果、主输出失败为致命错误
// ==========================================

use crate::config::{GeoLookupSettings, WorkbookSourceSettings};
use crate::domain::lookup::LookupTable;
use crate::engine::publisher::OutputPublisher;
use crate::engine::report::{BuildReport, SheetOutcome, SheetReport, SourceReport};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::ExcelWorkbook;
use crate::importer::importer_trait::{BuildReporter, WorkbookReader};
use crate::importer::lookup_merger::LookupMerger;
use crate::importer::record_coercer::{CoercionOutcome, RecordCoercer};
use crate::importer::sheet_selector::SheetSelector;
use tracing::{debug, instrument};

/// 一个已打开的工作簿数据源
pub struct WorkbookSource {
    pub label: String,
    pub explicit_sheets: Vec<String>,
    pub workbook: Box<dyn WorkbookReader>,
}

impl WorkbookSource {
    /// 按配置打开 Excel 工作簿
    pub fn open(settings: &WorkbookSourceSettings) -> ImportResult<Self> {
        let workbook = ExcelWorkbook::open(&settings.path)?;
        Ok(Self {
            label: settings.label.clone(),
            explicit_sheets: settings.explicit_sheets.clone(),
            workbook: Box::new(workbook),
        })
    }
}

/// geo lookup 构建结果
pub struct GeoBuildOutcome {
    pub lookup: LookupTable,
    pub report: BuildReport,
}

// ==========================================
// GeoLookupBuilder
// ==========================================
pub struct GeoLookupBuilder<'r> {
    settings: GeoLookupSettings,
    reporter: &'r dyn BuildReporter,
    publisher: OutputPublisher,
}

impl<'r> GeoLookupBuilder<'r> {
    pub fn new(settings: GeoLookupSettings, reporter: &'r dyn BuildReporter) -> Self {
        Self {
            settings,
            reporter,
            publisher: OutputPublisher::default(),
        }
    }

    /// 替换输出发布器（测试中注入失败的写出器）
    pub fn with_publisher(mut self, publisher: OutputPublisher) -> Self {
        self.publisher = publisher;
        self
    }

    pub fn settings(&self) -> &GeoLookupSettings {
        &self.settings
    }

    /// 按配置顺序打开全部工作簿，任一失败即终止
    pub fn open_sources(&self) -> ImportResult<Vec<WorkbookSource>> {
        self.settings.sources.iter().map(WorkbookSource::open).collect()
    }

    /// 打开配置中的工作簿并构建
    pub fn run(&self) -> ImportResult<GeoBuildOutcome> {
        let sources = self.open_sources()?;
        self.build(sources)
    }

    /// 从已打开的数据源构建查找表并写出
    ///
    /// # 返回
    /// - Ok(GeoBuildOutcome): 查找表 + 构建报告
    /// - Err(EmptyResult): 全部来源均未产出记录
    /// - Err(OutputWrite): CSV 写出失败
    #[instrument(skip_all, fields(sources = sources.len()))]
    pub fn build(&self, sources: Vec<WorkbookSource>) -> ImportResult<GeoBuildOutcome> {
        let mut report = BuildReport::start("geo");
        let mut merger = LookupMerger::new();

        for mut source in sources {
            let source_report = self.process_source(&mut source, &mut merger);
            report.sources.push(source_report);
        }

        let (lookup, stats) = merger.finish()?;
        debug!(
            records_in = stats.records_in,
            duplicates_dropped = stats.duplicates_dropped,
            "合并去重完成"
        );
        report.merge = Some(stats);

        let table = lookup.to_table();
        self.publisher.publish(
            &table,
            &self.settings.out_csv,
            self.settings.out_parquet.as_deref(),
            self.reporter,
            &mut report,
        )?;

        report.finish();
        self.reporter.build_finished("geo", lookup.len());

        Ok(GeoBuildOutcome { lookup, report })
    }

    fn process_source(&self, source: &mut WorkbookSource, merger: &mut LookupMerger) -> SourceReport {
        let label = source.label.as_str();
        let path = source.workbook.source_path().to_string();
        let all_names = source.workbook.sheet_names();
        self.reporter.workbook_opened(label, &path, all_names.len());

        let selection = SheetSelector::select(
            &all_names,
            &source.explicit_sheets,
            self.settings.sheet_name_pattern.as_ref(),
        );
        self.reporter.sheets_selected(label, &selection);

        let mut sheets = Vec::with_capacity(selection.selected.len());
        for sheet_name in &selection.selected {
            let sheet_report = self.process_sheet(label, source.workbook.as_mut(), sheet_name, merger);
            sheets.push(sheet_report);
        }

        SourceReport {
            label: source.label.clone(),
            path,
            sheets_total: all_names.len(),
            missing_sheets: selection.missing,
            sheets,
        }
    }

    /// 处理单张工作表；失败时记录并按空批次处理
    fn process_sheet(
        &self,
        label: &str,
        workbook: &mut dyn WorkbookReader,
        sheet_name: &str,
        merger: &mut LookupMerger,
    ) -> SheetReport {
        let override_mapping = self.settings.mappings.has_override(sheet_name);
        let mapping = self.settings.mappings.for_sheet(sheet_name);

        let outcome = match workbook.read_sheet(sheet_name) {
            Ok(sheet) => match RecordCoercer::coerce(&sheet, mapping) {
                CoercionOutcome::Coerced(batch) => {
                    self.reporter.sheet_processed(label, &batch, override_mapping);
                    let outcome = SheetOutcome::processed(&batch);
                    merger.append(batch.records);
                    outcome
                }
                CoercionOutcome::MissingCodeColumn { sheet, headers } => {
                    self.reporter
                        .sheet_skipped(label, &sheet, "没有列匹配 Code 候选");
                    SheetOutcome::MissingCodeColumn { headers }
                }
            },
            Err(e) => {
                let error = match e {
                    ImportError::SheetProcessing { .. } => e,
                    other => ImportError::SheetProcessing {
                        sheet: sheet_name.to_string(),
                        message: other.to_string(),
                    },
                };
                self.reporter.sheet_skipped(label, sheet_name, &error.to_string());
                merger.append(Vec::new());
                SheetOutcome::Failed {
                    message: error.to_string(),
                }
            }
        };

        SheetReport {
            sheet: sheet_name.to_string(),
            override_mapping,
            outcome,
        }
    }
}
