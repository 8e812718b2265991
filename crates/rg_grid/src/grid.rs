// crates/rg_grid/src/grid.rs

//! 源网格数据
//!
//! 规则经纬度网格上的二维（或带时间维的三维）数值场。
//!
//! # 内存布局
//!
//! 值按 `[lon][lat][time]` 展平存储，经度变化最慢、时间变化最快：
//!
//! ```text
//! idx = (i_lon * n_lat + i_lat) * n_time + t
//! ```
//!
//! 二维场即 `n_time = 1` 的网格。

use crate::axis::GridAxis;
use rg_foundation::error::{RgError, RgResult};
use rg_geo::LonConvention;

/// 规则经纬度源网格（调用方所有，插值时只读）
#[derive(Debug, Clone)]
pub struct SourceGrid {
    lons: GridAxis,
    lats: GridAxis,
    n_time: usize,
    values: Vec<f64>,
    nodata: Option<f64>,
}

impl SourceGrid {
    /// 从坐标轴与展平数据创建网格
    ///
    /// # 错误
    /// - 坐标轴非严格单调或少于 2 点
    /// - `n_time == 0`
    /// - `values.len() != n_lon * n_lat * n_time`
    pub fn new(lons: Vec<f64>, lats: Vec<f64>, n_time: usize, values: Vec<f64>) -> RgResult<Self> {
        let lons = GridAxis::new("longitude", lons)?;
        let lats = GridAxis::new("latitude", lats)?;
        if n_time == 0 {
            return Err(RgError::invalid_input("时间维长度必须至少为 1"));
        }
        RgError::check_size("grid values", lons.len() * lats.len() * n_time, values.len())?;

        Ok(Self {
            lons,
            lats,
            n_time,
            values,
            nodata: None,
        })
    }

    /// 二维网格（单一时间片）
    pub fn new_2d(lons: Vec<f64>, lats: Vec<f64>, values: Vec<f64>) -> RgResult<Self> {
        Self::new(lons, lats, 1, values)
    }

    /// 由函数 `f(lon, lat, t)` 生成网格
    pub fn from_fn<F>(lons: Vec<f64>, lats: Vec<f64>, n_time: usize, mut f: F) -> RgResult<Self>
    where
        F: FnMut(f64, f64, usize) -> f64,
    {
        let mut values = Vec::with_capacity(lons.len() * lats.len() * n_time);
        for &lon in &lons {
            for &lat in &lats {
                for t in 0..n_time {
                    values.push(f(lon, lat, t));
                }
            }
        }
        Self::new(lons, lats, n_time, values)
    }

    /// 设置无数据值（插值时视同 NaN）
    #[must_use]
    pub fn with_nodata(mut self, nodata: f64) -> Self {
        self.nodata = Some(nodata);
        self
    }

    /// 经度轴
    #[inline]
    pub fn lons(&self) -> &GridAxis {
        &self.lons
    }

    /// 纬度轴
    #[inline]
    pub fn lats(&self) -> &GridAxis {
        &self.lats
    }

    /// 时间片数量
    #[inline]
    pub fn n_time(&self) -> usize {
        self.n_time
    }

    /// 网格节点数量（不含时间维）
    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.lons.len() * self.lats.len()
    }

    /// 展平数据
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// 无数据值
    #[inline]
    pub fn nodata(&self) -> Option<f64> {
        self.nodata
    }

    /// 节点索引（不含时间维）
    #[inline]
    pub fn node_index(&self, i_lon: usize, i_lat: usize) -> usize {
        i_lon * self.lats.len() + i_lat
    }

    /// 读取某节点某时间片的值；无数据值返回 NaN
    #[inline]
    pub fn value_at(&self, node: usize, t: usize) -> f64 {
        let v = self.values[node * self.n_time + t];
        match self.nodata {
            Some(nd) if v == nd => f64::NAN,
            _ => v,
        }
    }

    /// 经度范围 (min, max)
    pub fn lon_range(&self) -> (f64, f64) {
        (self.lons.min(), self.lons.max())
    }

    /// 纬度范围 (min, max)
    pub fn lat_range(&self) -> (f64, f64) {
        (self.lats.min(), self.lats.max())
    }

    /// 点是否在网格包络内（含边界）
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        self.lons.contains(lon) && self.lats.contains(lat)
    }

    /// 网格经度约定
    pub fn lon_convention(&self) -> LonConvention {
        LonConvention::detect(self.lons.values())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_mismatch() {
        let err = SourceGrid::new(vec![0.0, 1.0], vec![0.0, 1.0], 2, vec![0.0; 4]).unwrap_err();
        assert!(matches!(err, RgError::SizeMismatch { expected: 8, actual: 4, .. }));
    }

    #[test]
    fn test_zero_time() {
        assert!(SourceGrid::new(vec![0.0, 1.0], vec![0.0, 1.0], 0, vec![]).is_err());
    }

    #[test]
    fn test_layout() {
        let grid = SourceGrid::from_fn(vec![0.0, 1.0, 2.0], vec![10.0, 20.0], 2, |lon, lat, t| {
            lon * 100.0 + lat + t as f64 * 0.5
        })
        .unwrap();

        assert_eq!(grid.n_nodes(), 6);
        let node = grid.node_index(2, 1);
        assert_eq!(node, 5);
        assert_eq!(grid.value_at(node, 0), 220.0);
        assert_eq!(grid.value_at(node, 1), 220.5);
    }

    #[test]
    fn test_nodata() {
        let grid = SourceGrid::new_2d(vec![0.0, 1.0], vec![0.0, 1.0], vec![1.0, -9999.0, 3.0, 4.0])
            .unwrap()
            .with_nodata(-9999.0);
        assert!(grid.value_at(1, 0).is_nan());
        assert_eq!(grid.value_at(2, 0), 3.0);
    }

    #[test]
    fn test_envelope_and_convention() {
        let grid = SourceGrid::new_2d(vec![-125.0, -115.0], vec![50.0, 40.0], vec![0.0; 4]).unwrap();
        assert_eq!(grid.lon_range(), (-125.0, -115.0));
        assert_eq!(grid.lat_range(), (40.0, 50.0));
        assert!(grid.contains(-120.0, 45.0));
        assert!(!grid.contains(-126.0, 45.0));
        assert_eq!(grid.lon_convention(), LonConvention::Signed180);
    }
}
