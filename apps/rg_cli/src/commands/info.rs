// apps/rg_cli/src/commands/info.rs

//! 信息显示命令
//!
//! 显示版本、可用地球模型和默认配置。

use anyhow::Result;
use clap::Args;
use rg_config::SamplingConfig;
use rg_geo::{EarthModel, Ellipsoid};
use tracing::info;

/// 信息显示参数
#[derive(Args)]
pub struct InfoArgs {
    /// 只显示默认配置（JSON）
    #[arg(long)]
    pub defaults: bool,
}

/// 执行信息命令
pub fn execute(args: InfoArgs) -> Result<()> {
    info!("=== RadialGeo 信息 ===");

    if !args.defaults {
        print_system_info();
        println!();
    }
    print_default_config()
}

fn print_system_info() {
    println!("=== 系统信息 ===");
    println!("RadialGeo CLI 版本: {}", env!("CARGO_PKG_VERSION"));
    println!("目标平台: {}", std::env::consts::ARCH);
    println!("操作系统: {}", std::env::consts::OS);

    println!("\n地球模型:");
    for (name, e) in [("wgs84", Ellipsoid::WGS84), ("grs80", Ellipsoid::GRS80)] {
        println!("  - ellipsoid {name}: {e}");
    }
    if let EarthModel::Sphere { radius_m } = EarthModel::MEAN_SPHERE {
        println!("  - sphere (默认半径 {radius_m} m)");
    }
}

fn print_default_config() -> Result<()> {
    println!("=== 默认配置 ===");
    let config = SamplingConfig::default();
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
