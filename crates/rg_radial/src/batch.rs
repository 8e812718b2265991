// crates/rg_radial/src/batch.rs

//! 多圆心批量采样
//!
//! 同一源网格、同一几何，对多个圆心分别采样。各圆心相互独立，
//! 启用 `parallel` 特性时按圆心并行。

use crate::geometry::RadialGrid;
use crate::sampler::RadialSampler;
use crate::samples::{InterpolatedSamples, SampleLocations};
use rg_foundation::error::RgResult;
use rg_geo::GeoPoint;
use rg_grid::SourceGrid;
use tracing::{debug, trace};

/// 单个圆心的采样位置与结果
pub type LocatedSamples = (SampleLocations, InterpolatedSamples);

/// 批量采样，结果顺序与 `centers` 一致
///
/// 任一圆心出错即返回该错误。
pub fn sample_many(
    sampler: &RadialSampler,
    source: &SourceGrid,
    centers: &[GeoPoint],
    grid: &RadialGrid,
) -> RgResult<Vec<InterpolatedSamples>> {
    Ok(sample_many_located(sampler, source, centers, grid)?
        .into_iter()
        .map(|(_, samples)| samples)
        .collect())
}

/// 批量采样，同时返回每个圆心的采样位置
pub fn sample_many_located(
    sampler: &RadialSampler,
    source: &SourceGrid,
    centers: &[GeoPoint],
    grid: &RadialGrid,
) -> RgResult<Vec<LocatedSamples>> {
    debug!(
        centers = centers.len(),
        samples_per_center = grid.n_samples(),
        parallel = cfg!(feature = "parallel"),
        "batch radial sampling"
    );

    let per_center = |i: usize, center: GeoPoint| sample_one(sampler, source, i, center, grid);

    #[cfg(feature = "parallel")]
    {
        run_parallel(centers, per_center)
    }
    #[cfg(not(feature = "parallel"))]
    {
        run_sequential(centers, per_center)
    }
}

/// 顺序批量采样
pub fn sample_many_sequential(
    sampler: &RadialSampler,
    source: &SourceGrid,
    centers: &[GeoPoint],
    grid: &RadialGrid,
) -> RgResult<Vec<InterpolatedSamples>> {
    run_sequential(centers, |i, center| {
        sample_one(sampler, source, i, center, grid).map(|(_, samples)| samples)
    })
}

/// 并行批量采样
#[cfg(feature = "parallel")]
pub fn sample_many_parallel(
    sampler: &RadialSampler,
    source: &SourceGrid,
    centers: &[GeoPoint],
    grid: &RadialGrid,
) -> RgResult<Vec<InterpolatedSamples>> {
    run_parallel(centers, |i, center| {
        sample_one(sampler, source, i, center, grid).map(|(_, samples)| samples)
    })
}

fn run_sequential<T, F>(centers: &[GeoPoint], f: F) -> RgResult<Vec<T>>
where
    F: Fn(usize, GeoPoint) -> RgResult<T>,
{
    centers.iter().enumerate().map(|(i, &c)| f(i, c)).collect()
}

#[cfg(feature = "parallel")]
fn run_parallel<T, F>(centers: &[GeoPoint], f: F) -> RgResult<Vec<T>>
where
    T: Send,
    F: Fn(usize, GeoPoint) -> RgResult<T> + Sync + Send,
{
    use rayon::prelude::*;
    centers.par_iter().enumerate().map(|(i, &c)| f(i, c)).collect()
}

fn sample_one(
    sampler: &RadialSampler,
    source: &SourceGrid,
    index: usize,
    center: GeoPoint,
    grid: &RadialGrid,
) -> RgResult<LocatedSamples> {
    trace!(index, lat = center.lat, lon = center.lon, "sampling center");
    sampler.sample_with_locations(source, center, grid)
}
