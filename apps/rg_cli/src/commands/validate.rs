// apps/rg_cli/src/commands/validate.rs

//! 配置验证命令
//!
//! 验证采样配置，并可选地检查圆心与源网格覆盖范围。

use anyhow::{bail, Result};
use clap::Args;
use rg_config::SamplingConfig;
use rg_foundation::float::{approx_eq_rel, whole_steps, STEP_COUNT_TOLERANCE};
use rg_geo::GeoPoint;
use rg_grid::SourceGrid;
use rg_radial::{RadialGrid, RadialSampler};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use crate::grid_io::load_grid;

/// 验证参数
#[derive(Args)]
pub struct ValidateArgs {
    /// 配置文件路径
    #[arg(short, long)]
    pub config: PathBuf,

    /// 源网格文件路径
    #[arg(short, long)]
    pub grid: Option<PathBuf>,

    /// 严格模式（警告也视为错误）
    #[arg(long)]
    pub strict: bool,
}

/// 验证结果
#[derive(Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    fn is_ok_strict(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// 执行验证命令
pub fn execute(args: ValidateArgs) -> Result<()> {
    info!("=== RadialGeo 配置验证 ===");

    let mut result = ValidationResult::default();

    let config = validate_config(&args.config, &mut result);

    if let (Some(config), Some(grid_path)) = (&config, &args.grid) {
        validate_coverage(config, grid_path, &mut result);
    }

    print_validation_result(&result, args.strict)
}

fn validate_config(path: &Path, result: &mut ValidationResult) -> Option<SamplingConfig> {
    println!("\n检查配置文件: {}", path.display());

    let config = match SamplingConfig::from_file(path) {
        Ok(config) => config,
        Err(e) => {
            result.add_error(e.to_string());
            return None;
        }
    };

    if config.centers.is_empty() {
        result.add_warning("未配置圆心 (centers)，sample 命令将无法运行");
    }
    let res = config.geometry.degree_resolution;
    if !divides_full_circle(res) {
        result.add_warning(format!(
            "方位角分辨率 {res}° 不能整除 360°，最后一个方位角之后的扇区较窄"
        ));
    }

    println!("  ✓ 配置文件有效");
    Some(config)
}

/// 分辨率能否整除 360°（容忍浮点舍入）
fn divides_full_circle(res: f64) -> bool {
    approx_eq_rel(whole_steps(360.0, res) as f64 * res, 360.0, STEP_COUNT_TOLERANCE)
}

fn validate_coverage(config: &SamplingConfig, path: &Path, result: &mut ValidationResult) {
    println!("\n检查源网格: {}", path.display());

    let loaded = match load_grid(path) {
        Ok(loaded) => loaded,
        Err(e) => {
            result.add_error(format!("{e:#}"));
            return;
        }
    };
    let source = &loaded.grid;

    let (grid, sampler) = match (config.build_grid(), config.sampler()) {
        (Ok(g), Ok(s)) => (g, s),
        (Err(e), _) | (_, Err(e)) => {
            result.add_error(e.to_string());
            return;
        }
    };
    let convention = sampler.convention_for(source);

    for (i, &center) in config.centers.iter().enumerate() {
        let normalized = center.with_lon(convention.normalize(center.lon));
        if !source.contains(normalized.lon, normalized.lat) {
            result.add_error(format!("圆心 {i} ({}, {}) 不在网格范围内", center.lat, center.lon));
            continue;
        }
        match outside_fraction(&sampler, source, center, &grid) {
            Ok(frac) if frac == 0.0 => {}
            Ok(frac) => result.add_warning(format!(
                "圆心 {i} ({}, {}) 有 {:.1}% 的采样点落在网格外",
                center.lat,
                center.lon,
                frac * 100.0
            )),
            Err(e) => result.add_error(format!("圆心 {i}: {e}")),
        }
    }

    println!("  ✓ 覆盖范围检查完成");
}

fn outside_fraction(
    sampler: &RadialSampler,
    source: &SourceGrid,
    center: GeoPoint,
    grid: &RadialGrid,
) -> Result<f64> {
    let locations = sampler.locations(center, grid, sampler.convention_for(source))?;
    let outside = locations
        .points()
        .iter()
        .filter(|p| !source.contains(p.lon, p.lat))
        .count();
    Ok(outside as f64 / locations.len() as f64)
}

fn print_validation_result(result: &ValidationResult, strict: bool) -> Result<()> {
    println!("\n=== 验证结果 ===");

    if !result.errors.is_empty() {
        println!("\n错误 ({}):", result.errors.len());
        for err in &result.errors {
            error!("  ✗ {}", err);
            println!("  ✗ {}", err);
        }
    }

    if !result.warnings.is_empty() {
        println!("\n警告 ({}):", result.warnings.len());
        for warning in &result.warnings {
            warn!("  ⚠ {}", warning);
            println!("  ⚠ {}", warning);
        }
    }

    let success = if strict {
        result.is_ok_strict()
    } else {
        result.is_ok()
    };

    if success {
        println!("\n✓ 验证通过");
        Ok(())
    } else {
        println!("\n✗ 验证失败");
        bail!(
            "验证失败：发现 {} 个错误，{} 个警告",
            result.errors.len(),
            result.warnings.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_mode() {
        let mut result = ValidationResult::default();
        assert!(result.is_ok_strict());
        result.add_warning("w");
        assert!(result.is_ok());
        assert!(!result.is_ok_strict());
        result.add_error("e");
        assert!(!result.is_ok());
    }

    #[test]
    fn test_divides_full_circle() {
        for res in [10.0, 0.1, 0.3, 7.5, 360.0] {
            assert!(divides_full_circle(res), "{res}");
        }
        for res in [7.0, 0.7, 100.0] {
            assert!(!divides_full_circle(res), "{res}");
        }
    }
}
