// crates/rg_radial/src/scaling.rs

//! 最小-最大归一化
//!
//! 把采样值线性映射到 `[0, 1]`。NaN 不参与拟合，且变换后仍为 NaN。

use rg_foundation::error::{RgError, RgResult};
use serde::{Deserialize, Serialize};

/// 最小-最大缩放器
///
/// 先 [`fit`](Self::fit) 得到范围，再用同一范围变换多组数据。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScaler {
    min: f64,
    max: f64,
}

impl MinMaxScaler {
    /// 直接指定范围
    pub fn with_range(min: f64, max: f64) -> RgResult<Self> {
        RgError::check_finite("min", min)?;
        RgError::check_finite("max", max)?;
        if min > max {
            return Err(RgError::invalid_argument(
                "min",
                format!("最小值 {min} 大于最大值 {max}"),
            ));
        }
        Ok(Self { min, max })
    }

    /// 由数据拟合范围（忽略 NaN 与无穷）
    ///
    /// # 错误
    /// 没有任何有限值时返回 `InvalidInput`
    pub fn fit(values: &[f64]) -> RgResult<Self> {
        let (min, max) = values
            .iter()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        if min > max {
            return Err(RgError::invalid_input("没有可用于拟合的有限值"));
        }
        Ok(Self { min, max })
    }

    /// 拟合得到的最小值
    #[inline]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// 拟合得到的最大值
    #[inline]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// 单值变换；范围退化（常数）时映射为 0
    #[inline]
    pub fn scale(&self, v: f64) -> f64 {
        let span = self.max - self.min;
        if span == 0.0 {
            if v.is_nan() {
                f64::NAN
            } else {
                0.0
            }
        } else {
            (v - self.min) / span
        }
    }

    /// 变换
    pub fn transform(&self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|&v| self.scale(v)).collect()
    }

    /// 原地变换
    pub fn transform_in_place(&self, values: &mut [f64]) {
        for v in values.iter_mut() {
            *v = self.scale(*v);
        }
    }

    /// 逆变换
    pub fn inverse_transform(&self, scaled: &[f64]) -> Vec<f64> {
        let span = self.max - self.min;
        scaled.iter().map(|&s| self.min + s * span).collect()
    }
}

/// 以数据自身范围归一化
///
/// 全为 NaN 时原样返回。
pub fn min_max_scale(values: &[f64]) -> Vec<f64> {
    match MinMaxScaler::fit(values) {
        Ok(scaler) => scaler.transform(values),
        Err(_) => values.to_vec(),
    }
}
