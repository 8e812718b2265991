// crates/rg_radial/src/regrid.rs

//! 极坐标样本重采样到方形笛卡尔网格
//!
//! 网格为 `size × size` 个节点，覆盖 `[-R, R]²` 千米（`R` 为最外环半径），
//! x 指向东、y 指向北。输出按行主序排列：行为 y 下标（由南向北），
//! 列为 x 下标（由西向东）。
//!
//! 每个节点换算为 (ρ, 方位角)，在极坐标格架上沿半径线性、沿方位角
//! 周期线性插值。首环之内以圆心样本作为 ρ = 0 的值；最外环之外为 NaN。

use crate::geometry::RadialGrid;
use crate::samples::InterpolatedSamples;
use rg_foundation::error::{RgError, RgResult};

/// 外环判定容差 (km)
const RADIUS_TOLERANCE: f64 = 1e-9;

/// 方位角节点：归一化到 [0, 360) 的角度与其在方位角序列中的下标
#[derive(Debug, Clone, Copy)]
struct AzimuthNode {
    deg: f64,
    column: usize,
}

/// 极坐标到笛卡尔网格的重采样器
#[derive(Debug, Clone)]
pub struct CartesianRegridder {
    grid: RadialGrid,
    size: usize,
    half_extent_km: f64,
    nodes: Vec<AzimuthNode>,
}

impl CartesianRegridder {
    /// 为给定几何创建 `size × size` 的重采样器
    ///
    /// # 错误
    /// - `size < 2`
    /// - 最外环半径为 0
    pub fn new(grid: &RadialGrid, size: usize) -> RgResult<Self> {
        if size < 2 {
            return Err(RgError::invalid_argument(
                "size",
                format!("网格边长至少为 2, 实际 {size}"),
            ));
        }
        let half_extent_km = grid.outer_radius();
        if half_extent_km <= 0.0 {
            return Err(RgError::invalid_argument("radii", "最外环半径必须为正"));
        }

        // 0° 与 360° 等重复方向只保留一个
        let mut nodes: Vec<AzimuthNode> = grid
            .azimuths()
            .iter()
            .enumerate()
            .map(|(column, &a)| AzimuthNode {
                deg: a.rem_euclid(360.0),
                column,
            })
            .collect();
        nodes.sort_by(|a, b| a.deg.total_cmp(&b.deg));
        nodes.dedup_by(|b, a| (b.deg - a.deg).abs() < 1e-9);

        Ok(Self {
            grid: grid.clone(),
            size,
            half_extent_km,
            nodes,
        })
    }

    /// 网格边长（节点数）
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// 网格半边长 (km)
    #[inline]
    pub fn half_extent_km(&self) -> f64 {
        self.half_extent_km
    }

    /// 第 `j` 个节点的坐标 (km)，x 与 y 共用
    #[inline]
    pub fn coordinate(&self, j: usize) -> f64 {
        -self.half_extent_km + 2.0 * self.half_extent_km * j as f64 / (self.size - 1) as f64
    }

    /// 重采样第 `time` 个时间片
    pub fn regrid(&self, samples: &InterpolatedSamples, time: usize) -> RgResult<Vec<f64>> {
        RgError::check_size("radial samples", self.grid.n_samples(), samples.n_samples())?;
        if time >= samples.n_time() {
            return Err(RgError::invalid_argument(
                "time",
                format!("时间片下标 {time} 超出 0..{}", samples.n_time()),
            ));
        }

        let mut out = Vec::with_capacity(self.size * self.size);
        for row in 0..self.size {
            let y = self.coordinate(row);
            for col in 0..self.size {
                let x = self.coordinate(col);
                out.push(self.value_at(samples, time, x, y));
            }
        }
        Ok(out)
    }

    /// 笛卡尔坐标 (km) 处的插值
    fn value_at(&self, samples: &InterpolatedSamples, t: usize, x: f64, y: f64) -> f64 {
        let rho = x.hypot(y);
        let radii = self.grid.radii();
        if rho > self.half_extent_km + RADIUS_TOLERANCE {
            return f64::NAN;
        }
        let bearing = x.atan2(y).to_degrees().rem_euclid(360.0);

        let first = radii[0];
        if rho < first {
            // 圆心到首环之间
            let center = samples.get(0, t);
            let ring0 = self.ring_value(samples, t, 0, bearing);
            return center + (ring0 - center) * rho / first;
        }

        let upper = radii.partition_point(|&r| r <= rho);
        if upper == 0 {
            return self.ring_value(samples, t, 0, bearing);
        }
        let lower = upper - 1;
        if upper >= radii.len() {
            return self.ring_value(samples, t, lower, bearing);
        }

        let (r0, r1) = (radii[lower], radii[upper]);
        let w = (rho - r0) / (r1 - r0);
        let v0 = self.ring_value(samples, t, lower, bearing);
        let v1 = self.ring_value(samples, t, upper, bearing);
        v0 + (v1 - v0) * w
    }

    /// 第 `ring` 环在方位角 `bearing` 处的周期线性插值
    fn ring_value(&self, samples: &InterpolatedSamples, t: usize, ring: usize, bearing: f64) -> f64 {
        let value = |node: &AzimuthNode| samples.get(self.grid.sample_index(ring, node.column), t);

        let n = self.nodes.len();
        if n == 1 {
            return value(&self.nodes[0]);
        }

        let upper = self.nodes.partition_point(|node| node.deg <= bearing);
        let (a, b, span_start, span) = if upper == 0 || upper == n {
            // 跨越 360° 的区间
            let a = &self.nodes[n - 1];
            let b = &self.nodes[0];
            let span = b.deg + 360.0 - a.deg;
            let offset = if bearing >= a.deg { a.deg } else { a.deg - 360.0 };
            (a, b, offset, span)
        } else {
            let a = &self.nodes[upper - 1];
            let b = &self.nodes[upper];
            (a, b, a.deg, b.deg - a.deg)
        };

        let w = (bearing - span_start) / span;
        let (va, vb) = (value(a), value(b));
        if w == 0.0 {
            va
        } else {
            va + (vb - va) * w
        }
    }
}
