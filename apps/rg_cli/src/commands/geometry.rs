// apps/rg_cli/src/commands/geometry.rs

//! 几何预览命令
//!
//! 打印半径 / 方位角序列与采样点数量，不读取网格。

use anyhow::Result;
use clap::Args;
use rg_config::SamplingConfig;
use rg_radial::GeometrySpec;
use serde_json::json;
use std::path::PathBuf;
use tracing::info;

/// 几何参数
#[derive(Args)]
pub struct GeometryArgs {
    /// 配置文件路径（优先于命令行参数）
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 起始半径 [km]
    #[arg(long, default_value = "50.0")]
    pub start: f64,

    /// 环间距 [km]
    #[arg(long, default_value = "50.0")]
    pub step: f64,

    /// 最外环半径 [km]
    #[arg(long, default_value = "500.0")]
    pub end: f64,

    /// 方位角分辨率 [度]
    #[arg(long, default_value = "10.0")]
    pub resolution: f64,

    /// 以 JSON 输出
    #[arg(long)]
    pub json: bool,
}

/// 执行几何命令
pub fn execute(args: GeometryArgs) -> Result<()> {
    let spec = match &args.config {
        Some(path) => SamplingConfig::from_file(path)?.geometry,
        None => GeometrySpec::new(args.start, args.step, args.end, args.resolution),
    };
    let grid = spec.build()?;
    info!("几何: {:?}", spec);

    if args.json {
        let doc = json!({
            "radii_km": grid.radii(),
            "azimuths_deg": grid.azimuths(),
            "center_prepended": grid.has_center_sample(),
            "n_samples": grid.n_samples(),
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    println!("=== 径向几何 ===");
    println!("半径 ({} 环): {:?}", grid.n_rings(), grid.radii());
    println!("方位角 ({} 个): {:?}", grid.n_azimuths(), grid.azimuths());
    println!(
        "圆心: {}",
        if grid.has_center_sample() {
            "前置为样本 0"
        } else {
            "由半径 0 环覆盖"
        }
    );
    println!("每个圆心样本数: {}", grid.n_samples());
    Ok(())
}
