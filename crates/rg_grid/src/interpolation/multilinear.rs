// crates/rg_grid/src/interpolation/multilinear.rs

//! 多线性（经纬度双线性）插值器
//!
//! 预计算目标点在源网格上的插值权重，再批量应用到所有时间片。
//! 同一组采样点（如一个圆心的全部径向采样点）只需定位一次。
//!
//! # 域外处理
//!
//! 目标点落在网格包络 `[min(lon), max(lon)] × [min(lat), max(lat)]` 之外，
//! 或坐标为 NaN 时，该点结果为 NaN：不外推、不截断、不按经度回绕。
//!
//! # 示例
//!
//! ```
//! use rg_grid::{MultilinearInterpolator, SourceGrid};
//!
//! let grid = SourceGrid::new_2d(
//!     vec![0.0, 1.0],
//!     vec![0.0, 1.0],
//!     vec![0.0, 10.0, 20.0, 30.0], // [lon][lat]
//! ).unwrap();
//!
//! let interp = MultilinearInterpolator::new(&grid, &[(0.5, 0.5), (2.0, 0.5)]);
//! let out = interp.interpolate(&grid).unwrap();
//! assert!((out[0] - 15.0).abs() < 1e-12);
//! assert!(out[1].is_nan());
//! ```

use crate::grid::SourceGrid;
use rg_foundation::error::{RgError, RgResult};

/// 插值权重
#[derive(Debug, Clone, Copy)]
struct Weight {
    /// 源网格节点索引（不含时间维）
    node: usize,
    /// 权重值
    val: f64,
}

/// 多线性插值器
///
/// 权重按目标点展平存储，`offsets[i]..offsets[i+1]` 为第 `i` 个目标点的权重。
/// 无权重的目标点即为域外点。
#[derive(Debug, Clone)]
pub struct MultilinearInterpolator {
    flat_weights: Vec<Weight>,
    offsets: Vec<usize>,
    /// 构建时的网格尺寸 (n_lon, n_lat)
    src_dims: (usize, usize),
}

impl MultilinearInterpolator {
    /// 为 `(lon, lat)` 目标点序列预计算权重
    pub fn new(grid: &SourceGrid, points: &[(f64, f64)]) -> Self {
        let mut flat_weights = Vec::with_capacity(points.len() * 4);
        let mut offsets = Vec::with_capacity(points.len() + 1);
        offsets.push(0);

        for &(lon, lat) in points {
            Self::push_point_weights(grid, lon, lat, &mut flat_weights);
            offsets.push(flat_weights.len());
        }

        tracing::trace!(
            targets = points.len(),
            weights = flat_weights.len(),
            "multilinear weights precomputed"
        );

        Self {
            flat_weights,
            offsets,
            src_dims: (grid.lons().len(), grid.lats().len()),
        }
    }

    /// 计算单点的双线性权重，零权重角点不计入
    fn push_point_weights(grid: &SourceGrid, lon: f64, lat: f64, out: &mut Vec<Weight>) {
        let (Some(px), Some(py)) = (grid.lons().locate(lon), grid.lats().locate(lat)) else {
            return;
        };

        let (tx, ty) = (px.fraction, py.fraction);
        let corners = [
            (px.index, py.index, (1.0 - tx) * (1.0 - ty)),
            (px.index + 1, py.index, tx * (1.0 - ty)),
            (px.index, py.index + 1, (1.0 - tx) * ty),
            (px.index + 1, py.index + 1, tx * ty),
        ];

        for (i_lon, i_lat, w) in corners {
            if w != 0.0 {
                out.push(Weight {
                    node: grid.node_index(i_lon, i_lat),
                    val: w,
                });
            }
        }
    }

    /// 目标点数量
    #[inline]
    pub fn n_targets(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    /// 总权重数量
    #[inline]
    pub fn n_weights(&self) -> usize {
        self.flat_weights.len()
    }

    /// 第 `i` 个目标点是否落在网格内
    #[inline]
    pub fn is_inside(&self, i: usize) -> bool {
        self.offsets[i + 1] > self.offsets[i]
    }

    /// 域外目标点数量
    pub fn n_outside(&self) -> usize {
        (0..self.n_targets()).filter(|&i| !self.is_inside(i)).count()
    }

    /// 对所有时间片插值
    ///
    /// 返回 `n_targets × n_time` 的行主序数组（第 `i` 行对应第 `i` 个目标点）。
    pub fn interpolate(&self, grid: &SourceGrid) -> RgResult<Vec<f64>> {
        let mut output = vec![f64::NAN; self.n_targets() * grid.n_time()];
        self.interpolate_into(grid, &mut output)?;
        Ok(output)
    }

    /// 插值到调用方提供的缓冲区
    pub fn interpolate_into(&self, grid: &SourceGrid, output: &mut [f64]) -> RgResult<()> {
        let dims = (grid.lons().len(), grid.lats().len());
        if dims != self.src_dims {
            return Err(RgError::invalid_input(format!(
                "插值器按 {:?} 网格构建，实际网格为 {:?}",
                self.src_dims, dims
            )));
        }

        let n_time = grid.n_time();
        RgError::check_size("interpolation output", self.n_targets() * n_time, output.len())?;

        for (i, row) in output.chunks_exact_mut(n_time).enumerate() {
            let weights = &self.flat_weights[self.offsets[i]..self.offsets[i + 1]];
            if weights.is_empty() {
                row.fill(f64::NAN);
                continue;
            }
            for (t, slot) in row.iter_mut().enumerate() {
                // NaN 节点按 IEEE 规则传播
                *slot = weights
                    .iter()
                    .map(|w| w.val * grid.value_at(w.node, t))
                    .sum();
            }
        }

        Ok(())
    }
}

/// 单点插值便捷函数，返回每个时间片的值
pub fn interpolate_point(grid: &SourceGrid, lon: f64, lat: f64) -> Vec<f64> {
    let interp = MultilinearInterpolator::new(grid, &[(lon, lat)]);
    // 尺寸由同一网格构建，必然匹配
    interp
        .interpolate(grid)
        .unwrap_or_else(|_| vec![f64::NAN; grid.n_time()])
}

impl SourceGrid {
    /// 对 `(lon, lat)` 目标点批量插值，`output` 长度为 `points.len() × n_time`
    pub fn interpolate(&self, points: &[(f64, f64)], output: &mut [f64]) -> RgResult<()> {
        MultilinearInterpolator::new(self, points).interpolate_into(self, output)
    }

    /// 单点插值，返回每个时间片的值
    pub fn interpolate_point(&self, lon: f64, lat: f64) -> Vec<f64> {
        interpolate_point(self, lon, lat)
    }
}
