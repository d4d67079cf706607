// ==========================================
// 地理编码查找表 - 命令行入口
// ==========================================
// 子命令: geo / postcode / all
// 退出码: 0 成功；1 致命错误
// ==========================================

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use geo_lookup::config::ConfigManager;
use geo_lookup::engine::{BuildReport, GeoLookupBuilder, PostcodeLookupBuilder, TracingReporter};
use geo_lookup::logging;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "geo-lookup")]
#[command(version, about = "Build geographic code lookups from RGC workbooks and enrich NSPL postcodes")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true, default_value = "config.yaml")]
    config: PathBuf,

    /// Debug-level logging (column resolution per sheet)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit log lines as JSON
    #[arg(long, global = true)]
    log_json: bool,

    /// Write a JSON build report to this path
    #[arg(long, global = true)]
    report: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the geo lookup (Code, Name, AlternateName, Status)
    Geo,

    /// Build the postcode lookup, reading names from the geo lookup CSV
    Postcode,

    /// Build the geo lookup, then the postcode lookup
    All,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_json);

    tracing::info!(version = geo_lookup::VERSION, config = %cli.config.display(), "geo-lookup 启动");

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "构建失败");
            eprintln!("错误: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = ConfigManager::from_path(&cli.config)
        .with_context(|| format!("加载配置失败: {}", cli.config.display()))?;
    let reporter = TracingReporter;
    let mut reports = Vec::new();

    let result = match cli.command {
        Command::Geo => run_geo(&config, &reporter, &mut reports).map(|_| ()),
        Command::Postcode => run_postcode(&config, &reporter, None, &mut reports),
        Command::All => run_geo(&config, &reporter, &mut reports)
            .and_then(|lookup| run_postcode(&config, &reporter, Some(&lookup), &mut reports)),
    };

    // 失败时也写出已完成部分的报告
    if let Some(path) = &cli.report {
        if let Err(e) = BuildReport::write_json(&reports, path) {
            tracing::warn!(error = %e, "构建报告写出失败");
        }
    }

    result
}

fn run_geo(
    config: &ConfigManager,
    reporter: &TracingReporter,
    reports: &mut Vec<BuildReport>,
) -> Result<geo_lookup::LookupTable> {
    let settings = config
        .geo_lookup_settings()
        .context("geo_lookup 配置无效")?;
    let outcome = GeoLookupBuilder::new(settings, reporter)
        .run()
        .context("geo lookup 构建失败")?;
    reports.push(outcome.report);
    Ok(outcome.lookup)
}

fn run_postcode(
    config: &ConfigManager,
    reporter: &TracingReporter,
    lookup: Option<&geo_lookup::LookupTable>,
    reports: &mut Vec<BuildReport>,
) -> Result<()> {
    let settings = config
        .postcode_lookup_settings()
        .context("postcode_lookup 配置无效")?;
    let outcome = PostcodeLookupBuilder::new(settings, reporter)
        .build(lookup)
        .context("postcode lookup 构建失败")?;
    reports.push(outcome.report);
    Ok(())
}
