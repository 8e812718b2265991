// crates/rg_grid/src/axis.rs

//! 规则网格坐标轴
//!
//! 严格单调（升序或降序）的一维坐标序列，用于在插值时定位目标坐标
//! 所在的网格区间。间距无需均匀。

use rg_foundation::error::{RgError, RgResult};

/// 坐标轴定位结果：下界索引与区间内的线性权重
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisPosition {
    /// 区间下界索引 `i`（区间为 `[i, i+1]`）
    pub index: usize,
    /// 区间内的比例 `t ∈ [0, 1]`，值 = `(1-t)·v[i] + t·v[i+1]`
    pub fraction: f64,
}

/// 严格单调坐标轴
#[derive(Debug, Clone, PartialEq)]
pub struct GridAxis {
    values: Vec<f64>,
    ascending: bool,
}

impl GridAxis {
    /// 创建坐标轴
    ///
    /// # 错误
    /// - 少于 2 个点
    /// - 含非有限值
    /// - 非严格单调
    pub fn new(name: &'static str, values: Vec<f64>) -> RgResult<Self> {
        if values.len() < 2 {
            return Err(RgError::invalid_input(format!(
                "{name} 坐标轴至少需要 2 个点, 实际 {}",
                values.len()
            )));
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(RgError::invalid_input(format!("{name} 坐标轴含非有限值: {bad}")));
        }

        let ascending = values[1] > values[0];
        let monotonic = values.windows(2).all(|w| {
            if ascending {
                w[1] > w[0]
            } else {
                w[1] < w[0]
            }
        });
        if !monotonic {
            return Err(RgError::invalid_input(format!("{name} 坐标轴必须严格单调")));
        }

        Ok(Self { values, ascending })
    }

    /// 坐标值
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// 点数
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// 是否为空（构造保证非空）
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 是否升序
    #[inline]
    pub fn is_ascending(&self) -> bool {
        self.ascending
    }

    /// 最小值
    #[inline]
    pub fn min(&self) -> f64 {
        if self.ascending {
            self.values[0]
        } else {
            self.values[self.values.len() - 1]
        }
    }

    /// 最大值
    #[inline]
    pub fn max(&self) -> f64 {
        if self.ascending {
            self.values[self.values.len() - 1]
        } else {
            self.values[0]
        }
    }

    /// 是否在 `[min, max]` 范围内（含边界，NaN 不在范围内）
    #[inline]
    pub fn contains(&self, x: f64) -> bool {
        x >= self.min() && x <= self.max()
    }

    /// 定位坐标 `x` 所在区间
    ///
    /// 范围外或 NaN 返回 `None`，不外推、不截断。
    pub fn locate(&self, x: f64) -> Option<AxisPosition> {
        if !self.contains(x) {
            return None;
        }

        let n = self.values.len();
        // 第一个“越过” x 的点
        let upper = if self.ascending {
            self.values.partition_point(|&v| v <= x)
        } else {
            self.values.partition_point(|&v| v >= x)
        };
        let index = upper.saturating_sub(1).min(n - 2);

        let v0 = self.values[index];
        let v1 = self.values[index + 1];
        let fraction = ((x - v0) / (v1 - v0)).clamp(0.0, 1.0);

        Some(AxisPosition { index, fraction })
    }
}
