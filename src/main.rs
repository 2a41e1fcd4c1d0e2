//! rstagscan 命令行入口
//!
//! 运行命令：
//! cargo run --features cli -- https://example.com --format text

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use rstagscan::{
    validate_url, ConfigManager, HttpPageFetcher, RuleLoader, ScanService, TagDetector,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

/// 检测页面中的营销/统计跟踪代码并给出建议
#[derive(Debug, Parser)]
#[command(name = "rstagscan", version, about)]
struct Cli {
    /// 目标页面URL
    url: String,

    /// 从本地HTML文件读取页面内容（不发起网络请求）
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// 输出格式
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// 抓取超时（秒）
    #[arg(short, long, default_value_t = 30)]
    timeout: u64,

    /// 自定义规则库（JSON）
    #[arg(long)]
    rules: Option<PathBuf>,

    /// 输出调试日志
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = ConfigManager::custom()
        .http_timeout(cli.timeout)
        .build();

    let detector = match &cli.rules {
        Some(path) => {
            let rule_lib = RuleLoader::from_file(path)?;
            TagDetector::with_rules(&rule_lib)?
        }
        None => TagDetector::new()?,
    };

    let report = match &cli.file {
        Some(path) => {
            validate_url(&cli.url)?;
            let body = tokio::fs::read(path)
                .await
                .with_context(|| format!("读取HTML文件失败：{}", path.display()))?;
            detector.scan_bytes(&cli.url, &body)
        }
        None => {
            let fetcher = HttpPageFetcher::new(&config)?;
            let service = ScanService::new(Arc::new(detector), fetcher);
            service
                .scan(&cli.url)
                .await
                .with_context(|| format!("扫描失败：{}", cli.url))?
        }
    };

    match cli.format {
        OutputFormat::Json => println!("{}", report.to_pretty_json()?),
        OutputFormat::Text => print!("{}", report),
    }

    Ok(())
}
