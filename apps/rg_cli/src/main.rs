// apps/rg_cli/src/main.rs

//! RadialGeo 命令行界面
//!
//! 在规则经纬度网格上做径向（极坐标）采样。
//!
//! ```text
//! rg_cli geometry --start 50 --step 50 --end 500 --resolution 10
//! rg_cli sample --config sampling.json --grid tqv.json --format csv --features
//! rg_cli validate --config sampling.json --grid tqv.json
//! rg_cli info
//! ```

mod commands;
mod grid_io;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// RadialGeo 径向采样命令行工具
#[derive(Parser)]
#[command(name = "rg_cli")]
#[command(author = "RadialGeo Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Radial (polar-coordinate) sampling of gridded geographic data", long_about = None)]
struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 预览径向几何
    Geometry(commands::geometry::GeometryArgs),
    /// 径向采样
    Sample(commands::sample::SampleArgs),
    /// 验证配置
    Validate(commands::validate::ValidateArgs),
    /// 显示信息
    Info(commands::info::InfoArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 初始化日志，写到 stderr 以免混入 CSV / JSON 输出
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
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Geometry(args) => commands::geometry::execute(args),
        Commands::Sample(args) => commands::sample::execute(args),
        Commands::Validate(args) => commands::validate::execute(args),
        Commands::Info(args) => commands::info::execute(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_sample() {
        let cli = Cli::try_parse_from([
            "rg_cli", "sample", "--config", "c.json", "--grid", "g.json", "--format", "json", "--features",
        ])
        .unwrap();
        match cli.command {
            Commands::Sample(args) => {
                assert_eq!(args.format, commands::sample::OutputFormat::Json);
                assert!(args.features);
                assert!(args.output.is_none());
            }
            _ => panic!("expected sample"),
        }
    }
}
