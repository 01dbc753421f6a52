// apps/we_cli/src/main.rs

//! WaveEnv 命令行界面
//!
//! 在本地进程内创建波浪模拟任务、观察帧流并做点查询。

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// WaveEnv 波浪场模拟命令行工具
#[derive(Parser)]
#[command(name = "we_cli")]
#[command(author = "WaveEnv Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "WaveEnv spectral wave field simulator", long_about = None)]
struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 运行模拟并输出帧统计
    Run(commands::run::RunArgs),
    /// 运行模拟后做单点查询
    Query(commands::query::QueryArgs),
    /// 验证请求文件
    Validate(commands::validate::ValidateArgs),
    /// 显示网格与波浪实现信息
    Info(commands::info::InfoArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 初始化日志
    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // 执行命令
    match cli.command {
        Commands::Run(args) => commands::run::execute(args),
        Commands::Query(args) => commands::query::execute(args),
        Commands::Validate(args) => commands::validate::execute(args),
        Commands::Info(args) => commands::info::execute(args),
    }
}
