// crates/rg_radial/src/samples.rs

//! 径向采样结果
//!
//! `n_samples × n_time` 行主序数组：第 `i` 行对应第 `i` 个采样位置，
//! 第 `t` 列对应源网格第 `t` 个时间片。二维输入即只有一列。

use rg_foundation::error::{RgError, RgResult};
use rg_geo::GeoPoint;
use serde::{Deserialize, Serialize};

/// 采样位置序列（前置圆心时圆心在首位）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleLocations {
    points: Vec<GeoPoint>,
    center_prepended: bool,
}

impl SampleLocations {
    pub(crate) fn new(points: Vec<GeoPoint>, center_prepended: bool) -> Self {
        Self {
            points,
            center_prepended,
        }
    }

    /// 采样点
    #[inline]
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    /// 采样点数量
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// 是否为空
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// 首个样本是否为前置圆心
    #[inline]
    pub fn center_prepended(&self) -> bool {
        self.center_prepended
    }

    /// `(lon, lat)` 序列，插值器的输入顺序
    pub fn lon_lat_pairs(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| (p.lon, p.lat)).collect()
    }
}

/// 插值结果
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolatedSamples {
    values: Vec<f64>,
    n_samples: usize,
    n_time: usize,
}

impl InterpolatedSamples {
    /// 由行主序数据创建
    ///
    /// # 错误
    /// `values.len() != n_samples * n_time` 或 `n_time == 0`
    pub fn new(values: Vec<f64>, n_samples: usize, n_time: usize) -> RgResult<Self> {
        if n_time == 0 {
            return Err(RgError::invalid_input("时间维长度必须至少为 1"));
        }
        RgError::check_size("samples", n_samples * n_time, values.len())?;
        Ok(Self::from_raw(values, n_samples, n_time))
    }

    /// 调用方保证 `values.len() == n_samples * n_time`
    pub(crate) fn from_raw(values: Vec<f64>, n_samples: usize, n_time: usize) -> Self {
        debug_assert_eq!(values.len(), n_samples * n_time);
        Self {
            values,
            n_samples,
            n_time,
        }
    }

    /// 展平数据（行主序）
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// 取出展平数据
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// 样本数
    #[inline]
    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    /// 时间片数
    #[inline]
    pub fn n_time(&self) -> usize {
        self.n_time
    }

    /// 第 `sample` 个样本第 `t` 个时间片的值
    #[inline]
    pub fn get(&self, sample: usize, t: usize) -> f64 {
        self.values[sample * self.n_time + t]
    }

    /// 第 `sample` 个样本的全部时间片
    #[inline]
    pub fn row(&self, sample: usize) -> &[f64] {
        let start = sample * self.n_time;
        &self.values[start..start + self.n_time]
    }

    /// 第 `t` 个时间片的全部样本
    pub fn time_slice(&self, t: usize) -> Vec<f64> {
        self.values
            .iter()
            .skip(t)
            .step_by(self.n_time)
            .copied()
            .collect()
    }

    /// NaN 数量（域外样本 × 时间片）
    pub fn n_nan(&self) -> usize {
        self.values.iter().filter(|v| v.is_nan()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let samples = InterpolatedSamples::from_raw(vec![1.0, 2.0, 3.0, 4.0, 5.0, f64::NAN], 3, 2);
        assert_eq!(samples.n_samples(), 3);
        assert_eq!(samples.n_time(), 2);
        assert_eq!(samples.get(1, 1), 4.0);
        assert_eq!(samples.row(2)[0], 5.0);
        assert_eq!(samples.time_slice(0), vec![1.0, 3.0, 5.0]);
        assert_eq!(samples.n_nan(), 1);
    }

    #[test]
    fn test_new_checks_size() {
        assert!(InterpolatedSamples::new(vec![0.0; 5], 3, 2).is_err());
        assert!(InterpolatedSamples::new(vec![], 0, 0).is_err());
        assert!(InterpolatedSamples::new(vec![0.0; 6], 3, 2).is_ok());
    }

    #[test]
    fn test_locations_pairs() {
        let locs = SampleLocations::new(vec![GeoPoint::new(45.0, -120.0), GeoPoint::new(46.0, -119.0)], true);
        assert!(locs.center_prepended());
        assert_eq!(locs.lon_lat_pairs(), vec![(-120.0, 45.0), (-119.0, 46.0)]);
    }
}
