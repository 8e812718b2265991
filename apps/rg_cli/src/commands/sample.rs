// apps/rg_cli/src/commands/sample.rs

//! 径向采样命令
//!
//! 读取采样配置与源网格，对每个圆心做径向采样，输出样本或特征表。

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use rg_config::SamplingConfig;
use rg_geo::GeoPoint;
use rg_radial::{
    min_max_scale, sample_many_located, CartesianRegridder, InterpolatedSamples, NamedFeature, RadialFeatures,
    RadialGrid, SampleLocations,
};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

use crate::grid_io::load_grid;

/// 输出格式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// 逗号分隔表格
    #[default]
    Csv,
    /// JSON 文档
    Json,
}

/// 采样参数
#[derive(Args)]
pub struct SampleArgs {
    /// 配置文件路径
    #[arg(short, long)]
    pub config: PathBuf,

    /// 源网格 JSON 文件
    #[arg(short, long)]
    pub grid: PathBuf,

    /// 输出文件（缺省写到标准输出）
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 输出格式
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// 输出统计特征而不是逐点样本
    #[arg(long)]
    pub features: bool,

    /// 笛卡尔重采样结果做最小-最大归一化（仅 JSON）
    #[arg(long)]
    pub scale: bool,
}

/// 单个圆心的结果
struct CenterResult {
    center: GeoPoint,
    locations: SampleLocations,
    samples: InterpolatedSamples,
}

/// 执行采样命令
pub fn execute(args: SampleArgs) -> Result<()> {
    let config = SamplingConfig::from_file(&args.config)
        .with_context(|| format!("无法加载配置: {}", args.config.display()))?;
    let centers = config.require_centers()?.to_vec();
    let loaded = load_grid(&args.grid)?;
    let source = &loaded.grid;

    let grid = config.build_grid()?;
    let sampler = config.sampler()?;
    let convention = sampler.convention_for(source);

    info!(
        "网格: {} × {} 节点, {} 个时间片, 经度约定 {}",
        source.lons().len(),
        source.lats().len(),
        source.n_time(),
        convention.name()
    );
    info!(
        "几何: {} 环 × {} 方位角, 每个圆心 {} 个样本, 圆心 {} 个",
        grid.n_rings(),
        grid.n_azimuths(),
        grid.n_samples(),
        centers.len()
    );

    let start = Instant::now();
    let results: Vec<CenterResult> = centers
        .iter()
        .zip(sample_many_located(&sampler, source, &centers, &grid)?)
        .map(|(&center, (locations, samples))| CenterResult {
            center,
            locations,
            samples,
        })
        .collect();
    info!("采样完成, 耗时 {:.3} s", start.elapsed().as_secs_f64());

    let nan_total: usize = results.iter().map(|r| r.samples.n_nan()).sum();
    if nan_total > 0 {
        warn!("共 {} 个样本值落在网格外 (NaN)", nan_total);
    }

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("无法创建输出文件: {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    match args.format {
        OutputFormat::Csv => {
            if config.regrid_size.is_some() {
                warn!("CSV 输出不包含笛卡尔重采样结果");
            }
            if args.features {
                write_features_csv(&mut out, &config, &grid, &results, &loaded.time_labels)?;
            } else {
                write_samples_csv(&mut out, &grid, &results, &loaded.time_labels)?;
            }
        }
        OutputFormat::Json => {
            let doc = build_json(&config, &grid, &results, &loaded.time_labels, &args)?;
            serde_json::to_writer_pretty(&mut out, &doc)?;
            writeln!(out)?;
        }
    }
    out.flush()?;

    if let Some(path) = &args.output {
        info!("结果已写入 {}", path.display());
    }
    Ok(())
}

/// 第 `i` 个样本的 (半径, 方位角)；前置圆心没有方位角
fn polar_of(grid: &RadialGrid, i: usize) -> (f64, Option<f64>) {
    if grid.has_center_sample() && i == 0 {
        return (0.0, None);
    }
    let j = i - grid.ring_offset();
    (
        grid.radii()[j / grid.n_azimuths()],
        Some(grid.azimuths()[j % grid.n_azimuths()]),
    )
}

fn fmt_value(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else {
        v.to_string()
    }
}

fn write_samples_csv(
    out: &mut dyn Write,
    grid: &RadialGrid,
    results: &[CenterResult],
    time_labels: &[String],
) -> Result<()> {
    writeln!(
        out,
        "center,center_lat,center_lon,sample,radius_km,azimuth_deg,lat,lon,{}",
        time_labels.join(",")
    )?;
    for (c, r) in results.iter().enumerate() {
        for (i, point) in r.locations.points().iter().enumerate() {
            let (radius, azimuth) = polar_of(grid, i);
            let values: Vec<String> = r.samples.row(i).iter().map(|&v| fmt_value(v)).collect();
            writeln!(
                out,
                "{c},{},{},{i},{radius},{},{},{},{}",
                r.center.lat,
                r.center.lon,
                azimuth.map(|a| a.to_string()).unwrap_or_default(),
                point.lat,
                point.lon,
                values.join(",")
            )?;
        }
    }
    Ok(())
}

fn extract_features(
    config: &SamplingConfig,
    grid: &RadialGrid,
    samples: &InterpolatedSamples,
) -> Result<Vec<NamedFeature>> {
    let features = RadialFeatures::new(samples, grid)?.with_nan_policy(config.nan_policy);
    Ok(features.extract(&config.feature_set(grid))?)
}

fn write_features_csv(
    out: &mut dyn Write,
    config: &SamplingConfig,
    grid: &RadialGrid,
    results: &[CenterResult],
    time_labels: &[String],
) -> Result<()> {
    for (c, r) in results.iter().enumerate() {
        let features = extract_features(config, grid, &r.samples)?;
        if c == 0 {
            let names: Vec<&str> = features.iter().map(|f| f.name.as_str()).collect();
            writeln!(out, "center,center_lat,center_lon,time,{}", names.join(","))?;
        }
        for (t, label) in time_labels.iter().enumerate() {
            let values: Vec<String> = features.iter().map(|f| fmt_value(f.values[t])).collect();
            writeln!(
                out,
                "{c},{},{},{label},{}",
                r.center.lat,
                r.center.lon,
                values.join(",")
            )?;
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    times: &'a [String],
    radii_km: &'a [f64],
    azimuths_deg: &'a [f64],
    center_prepended: bool,
    centers: Vec<JsonCenter>,
}

#[derive(Serialize)]
struct JsonCenter {
    lat: f64,
    lon: f64,
    locations: Vec<GeoPoint>,
    /// `[sample][time]`，NaN 写为 null
    samples: Vec<Vec<Option<f64>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    features: Option<Vec<JsonFeature>>,
    /// `[time][row][col]`
    #[serde(skip_serializing_if = "Option::is_none")]
    images: Option<Vec<Vec<Vec<Option<f64>>>>>,
}

#[derive(Serialize)]
struct JsonFeature {
    name: String,
    values: Vec<Option<f64>>,
}

fn finite_or_null(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}

fn build_json<'a>(
    config: &SamplingConfig,
    grid: &'a RadialGrid,
    results: &[CenterResult],
    time_labels: &'a [String],
    args: &SampleArgs,
) -> Result<JsonDocument<'a>> {
    let regridder = config
        .regrid_size
        .map(|size| CartesianRegridder::new(grid, size))
        .transpose()?;

    let mut centers = Vec::with_capacity(results.len());
    for r in results {
        let samples = (0..r.samples.n_samples())
            .map(|i| r.samples.row(i).iter().map(|&v| finite_or_null(v)).collect())
            .collect();

        let features = if args.features {
            let named = extract_features(config, grid, &r.samples)?;
            Some(
                named
                    .into_iter()
                    .map(|f| JsonFeature {
                        name: f.name,
                        values: f.values.into_iter().map(finite_or_null).collect(),
                    })
                    .collect(),
            )
        } else {
            None
        };

        let images = match &regridder {
            Some(regridder) => {
                let mut per_time = Vec::with_capacity(r.samples.n_time());
                for t in 0..r.samples.n_time() {
                    let mut image = regridder.regrid(&r.samples, t)?;
                    if args.scale {
                        image = min_max_scale(&image);
                    }
                    per_time.push(
                        image
                            .chunks(regridder.size())
                            .map(|row| row.iter().map(|&v| finite_or_null(v)).collect())
                            .collect(),
                    );
                }
                Some(per_time)
            }
            None => None,
        };

        centers.push(JsonCenter {
            lat: r.center.lat,
            lon: r.center.lon,
            locations: r.locations.points().to_vec(),
            samples,
            features,
            images,
        });
    }

    Ok(JsonDocument {
        times: time_labels,
        radii_km: grid.radii(),
        azimuths_deg: grid.azimuths(),
        center_prepended: grid.has_center_sample(),
        centers,
    })
}
