// apps/rg_cli/src/grid_io.rs

//! 源网格 JSON 文档读取
//!
//! 文档格式：
//!
//! ```json
//! {
//!   "lons": [-125.0, -124.75, ...],
//!   "lats": [50.0, 49.75, ...],
//!   "times": ["2019-06-01T00", "2019-06-01T01"],
//!   "values": [...],
//!   "nodata": -9999.0
//! }
//! ```
//!
//! `values` 按 `[lon][lat][time]` 展平；`times` 缺省时视为单一时间片。

use anyhow::{Context, Result};
use rg_grid::SourceGrid;
use serde::Deserialize;
use std::path::Path;

/// 网格文档
#[derive(Debug, Deserialize)]
pub struct GridDocument {
    pub lons: Vec<f64>,
    pub lats: Vec<f64>,
    #[serde(default)]
    pub times: Option<Vec<String>>,
    pub values: Vec<f64>,
    #[serde(default)]
    pub nodata: Option<f64>,
}

/// 已加载的网格与时间片标签
pub struct LoadedGrid {
    pub grid: SourceGrid,
    pub time_labels: Vec<String>,
}

impl GridDocument {
    /// 转换为源网格
    pub fn into_grid(self) -> Result<LoadedGrid> {
        let time_labels = match self.times {
            Some(labels) if !labels.is_empty() => labels,
            _ => vec!["value".to_string()],
        };
        let mut grid = SourceGrid::new(self.lons, self.lats, time_labels.len(), self.values)
            .context("网格文档与坐标轴不一致")?;
        if let Some(nodata) = self.nodata {
            grid = grid.with_nodata(nodata);
        }
        Ok(LoadedGrid { grid, time_labels })
    }
}

/// 从文件加载网格
pub fn load_grid(path: &Path) -> Result<LoadedGrid> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("无法读取网格文件: {}", path.display()))?;
    let doc: GridDocument = serde_json::from_str(&content)
        .with_context(|| format!("网格文件解析失败: {}", path.display()))?;
    doc.into_grid()
}
