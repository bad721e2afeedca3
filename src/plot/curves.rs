//! # 曲线图渲染
//!
//! 使用 `plotters` 库生成能量-体积 / 压强-体积对比图。
//!
//! ## 功能
//! - 多数据集、多模型曲线同图对比
//! - 颜色按数据集分配（与原始绘图脚本一致）
//! - 按输出扩展名选择 PNG / SVG 后端
//!
//! ## 依赖关系
//! - 被 `commands/plot.rs` 调用
//! - 使用 `plotters` 渲染图表

use crate::error::{EosKitError, Result};

use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

/// 数据集调色板（matplotlib tab 色系）
const PALETTE: [RGBColor; 6] = [
    RGBColor(31, 119, 180),  // tab:blue
    RGBColor(255, 127, 14),  // tab:orange
    RGBColor(44, 160, 44),   // tab:green
    RGBColor(214, 39, 40),   // tab:red
    RGBColor(148, 103, 189), // tab:purple
    RGBColor(140, 86, 75),   // tab:brown
];

/// 曲线绘制方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    /// 折线
    Line,
    /// 散点 + 折线（原始采样点）
    PointsWithLine,
}

/// 一条曲线
#[derive(Debug, Clone)]
pub struct Series {
    /// 图例标签（如 "chgnet-bm3"）
    pub label: String,
    /// (x, y) 数据点
    pub points: Vec<(f64, f64)>,
    /// 颜色索引（按数据集分配）
    pub color_idx: usize,
    pub kind: SeriesKind,
}

/// 渲染曲线图。输出后端由扩展名决定（`.svg` → SVG，否则 PNG）。
pub fn render_chart(
    output_path: &Path,
    width: u32,
    height: u32,
    title: &str,
    x_label: &str,
    y_label: &str,
    series: &[Series],
) -> Result<()> {
    if series.iter().all(|s| s.points.is_empty()) {
        return Err(EosKitError::PlotError("no data to plot".to_string()));
    }

    let use_svg = output_path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("svg"))
        .unwrap_or(false);

    if use_svg {
        let root = SVGBackend::new(output_path, (width, height)).into_drawing_area();
        draw_chart(&root, title, x_label, y_label, series)?;
        root.present()
            .map_err(|e| EosKitError::PlotError(e.to_string()))?;
    } else {
        let root = BitMapBackend::new(output_path, (width, height)).into_drawing_area();
        draw_chart(&root, title, x_label, y_label, series)?;
        root.present()
            .map_err(|e| EosKitError::PlotError(e.to_string()))?;
    }
    Ok(())
}

/// 绘制图表主体
fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    title: &str,
    x_label: &str,
    y_label: &str,
    series: &[Series],
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)
        .map_err(|e| EosKitError::PlotError(format!("{:?}", e)))?;

    // 数据范围（以 5% 边距扩展）
    let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for s in series {
        for &(x, y) in &s.points {
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
    }
    let x_pad = (x_max - x_min).max(1e-12) * 0.05;
    let y_pad = (y_max - y_min).max(1e-12) * 0.05;

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 22))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(
            (x_min - x_pad)..(x_max + x_pad),
            (y_min - y_pad)..(y_max + y_pad),
        )
        .map_err(|e| EosKitError::PlotError(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc(x_label)
        .y_desc(y_label)
        .label_style(("sans-serif", 14))
        .draw()
        .map_err(|e| EosKitError::PlotError(e.to_string()))?;

    for s in series {
        let color = PALETTE[s.color_idx % PALETTE.len()];
        match s.kind {
            SeriesKind::Line => {
                chart
                    .draw_series(LineSeries::new(s.points.iter().copied(), &color))
                    .map_err(|e| EosKitError::PlotError(e.to_string()))?
                    .label(s.label.clone())
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 18, y)], color)
                    });
            }
            SeriesKind::PointsWithLine => {
                chart
                    .draw_series(LineSeries::new(s.points.iter().copied(), &color))
                    .map_err(|e| EosKitError::PlotError(e.to_string()))?
                    .label(s.label.clone())
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 18, y)], color)
                    });
                chart
                    .draw_series(
                        s.points
                            .iter()
                            .map(|&(x, y)| Circle::new((x, y), 3, color.filled())),
                    )
                    .map_err(|e| EosKitError::PlotError(e.to_string()))?;
            }
        }
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK.mix(0.4))
        .label_font(("sans-serif", 13))
        .draw()
        .map_err(|e| EosKitError::PlotError(e.to_string()))?;

    Ok(())
}
