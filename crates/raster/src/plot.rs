//! The plotters-backed rasterizer.

use crate::bitmap::Bitmap;
use crate::error::RasterError;
use crate::fallback::ChartRasterizer;
use crate::fonts::ensure_fonts;
use crate::palette::series_color;
use crate::preset::{QualityPreset, RasterConfig};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontDesc, FontFamily, FontStyle};
use powerdeck_model::{AxisKind, BarMode, Chart, Fill, PieTrace, Trace, XValue};
use std::collections::HashMap;
use std::f64::consts::{FRAC_PI_2, TAU};
use std::path::PathBuf;

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

const INK: RGBColor = RGBColor(0x0F, 0x17, 0x2A);
const GRID: RGBColor = RGBColor(0xE5, 0xE7, 0xEB);

fn draw_err<E: std::fmt::Display>(e: E) -> RasterError {
    RasterError::Draw(e.to_string())
}

fn to_rgb(c: powerdeck_types::Color) -> RGBColor {
    RGBColor(c.r, c.g, c.b)
}

/// Draws charts into an in-memory RGB buffer.
#[derive(Debug, Clone)]
pub struct PlottersRasterizer {
    max_pixels: u64,
    font_path: Option<PathBuf>,
}

impl Default for PlottersRasterizer {
    fn default() -> Self {
        Self::new(&RasterConfig::default())
    }
}

impl PlottersRasterizer {
    pub fn new(config: &RasterConfig) -> Self {
        Self {
            max_pixels: config.max_pixels,
            font_path: config.font_path.clone(),
        }
    }

    pub fn with_max_pixels(mut self, max_pixels: u64) -> Self {
        self.max_pixels = max_pixels;
        self
    }
}

impl ChartRasterizer for PlottersRasterizer {
    fn rasterize(&self, chart: &Chart, preset: &QualityPreset) -> Result<Bitmap, RasterError> {
        if !preset.is_valid() {
            return Err(RasterError::InvalidPreset(preset.name.clone()));
        }
        let pixels = preset.pixels();
        if pixels > self.max_pixels {
            return Err(RasterError::TooLarge {
                preset: preset.name.clone(),
                pixels,
                limit: self.max_pixels,
            });
        }

        let (width, height) = (preset.pixel_width() as u32, preset.pixel_height() as u32);
        let mut buffer = vec![255u8; pixels as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            let painter = Painter {
                scale: preset.scale as f64,
                text: ensure_fonts(self.font_path.as_deref()).is_available(),
            };
            painter.draw(chart, &root)?;
            root.present().map_err(draw_err)?;
        }
        Bitmap::new(width, height, buffer)
    }
}

struct Painter {
    scale: f64,
    /// False when no font is registered; every text element is skipped.
    text: bool,
}

impl Painter {
    fn px(&self, v: f64) -> u32 {
        (v * self.scale).round().max(1.0) as u32
    }

    fn font(&self, size: f64) -> FontDesc<'static> {
        FontDesc::new(FontFamily::SansSerif, size * self.scale, FontStyle::Normal)
    }

    fn draw(&self, chart: &Chart, root: &Area) -> Result<(), RasterError> {
        root.fill(&WHITE).map_err(draw_err)?;
        let area = match chart.title() {
            Some(title) if self.text => root.titled(title, self.font(22.0).color(&INK)).map_err(draw_err)?,
            _ => root.clone(),
        };

        let pies: Vec<&PieTrace> = chart
            .traces
            .iter()
            .filter_map(|t| match t {
                Trace::Pie(p) => Some(p),
                _ => None,
            })
            .collect();
        let has_cartesian = chart.traces.iter().any(|t| !matches!(t, Trace::Pie(_)));
        let panels = pies.len() + usize::from(has_cartesian);
        if panels == 0 {
            return Ok(());
        }

        let areas = area.split_evenly((1, panels));
        let mut areas = areas.iter();
        if has_cartesian {
            if let Some(panel) = areas.next() {
                self.draw_cartesian(chart, panel)?;
            }
        }
        for (pie, panel) in pies.into_iter().zip(areas) {
            self.draw_pie(pie, panel)?;
        }
        Ok(())
    }

    fn draw_cartesian(&self, chart: &Chart, area: &Area) -> Result<(), RasterError> {
        let axis = chart.layout.x_axis.kind;
        let stacked = chart.layout.bar_mode == BarMode::Stack;
        let categories = Categories::collect(chart, axis);
        let n = categories.labels.len().max(1);
        let (y_min, y_max) = value_range(chart, &categories, axis, stacked);

        let mut builder = ChartBuilder::on(area);
        builder.margin(self.px(16.0));
        if self.text {
            builder.x_label_area_size(self.px(44.0)).y_label_area_size(self.px(72.0));
        }
        let mut cc = builder
            .build_cartesian_2d(-0.5..(n as f64 - 0.5), y_min..y_max)
            .map_err(draw_err)?;

        if self.text {
            let labels = &categories.labels;
            let x_formatter = |v: &f64| category_at(labels, *v);
            let y_formatter = |v: &f64| axis_number(*v);
            let mut mesh = cc.configure_mesh();
            mesh.disable_x_mesh()
                .x_labels(n.min(24))
                .x_label_formatter(&x_formatter)
                .y_label_formatter(&y_formatter)
                .label_style(self.font(12.0).color(&INK))
                .axis_desc_style(self.font(13.0).color(&INK));
            if let Some(title) = chart.layout.x_axis.title.as_deref().filter(|t| !t.is_empty()) {
                mesh.x_desc(title);
            }
            if let Some(title) = chart.layout.y_axis.title.as_deref().filter(|t| !t.is_empty()) {
                mesh.y_desc(title);
            }
            mesh.draw().map_err(draw_err)?;
        } else {
            let baseline = PathElement::new(vec![(-0.5, 0.0), (n as f64 - 0.5, 0.0)], GRID.stroke_width(self.px(1.0)));
            cc.draw_series(std::iter::once(baseline)).map_err(draw_err)?;
        }

        let stroke = self.px(2.5);
        let bar_count = chart.traces.iter().filter(|t| matches!(t, Trace::Bar(_))).count();
        let mut bar_slot = 0;
        let mut stack_base = vec![(0.0f64, 0.0f64); n];
        let mut legend: Vec<(String, RGBColor)> = Vec::new();

        for (i, trace) in chart.traces.iter().enumerate() {
            match trace {
                Trace::Line(series) => {
                    let color = to_rgb(series.color.unwrap_or_else(|| series_color(i)));
                    let points = categories.points(&series.x, &series.y, axis);
                    for segment in segments(&points) {
                        if series.fill == Fill::ToZero {
                            cc.draw_series(
                                AreaSeries::new(segment, 0.0, color.mix(0.3).filled()).border_style(color.stroke_width(stroke)),
                            )
                            .map_err(draw_err)?;
                        } else {
                            cc.draw_series(LineSeries::new(segment, color.stroke_width(stroke)))
                                .map_err(draw_err)?;
                        }
                    }
                    if let Some(name) = trace.name() {
                        legend.push((name.to_string(), color));
                    }
                }
                Trace::Bar(series) => {
                    let color = to_rgb(series.color.unwrap_or_else(|| series_color(i)));
                    let mut rects = Vec::new();
                    for (x, y) in categories.points(&series.x, &series.y, axis).into_iter().flatten() {
                        let (x0, x1, y0, y1) = if stacked {
                            let base = &mut stack_base[x as usize];
                            let slot = if y >= 0.0 { &mut base.0 } else { &mut base.1 };
                            let y0 = *slot;
                            *slot += y;
                            (x - 0.35, x + 0.35, y0, *slot)
                        } else {
                            let width = 0.8 / bar_count.max(1) as f64;
                            let x0 = x - 0.4 + width * bar_slot as f64;
                            (x0 + width * 0.06, x0 + width * 0.94, 0.0, y)
                        };
                        rects.push(Rectangle::new([(x0, y0), (x1, y1)], color.filled()));
                    }
                    cc.draw_series(rects).map_err(draw_err)?;
                    bar_slot += 1;
                    if let Some(name) = trace.name() {
                        legend.push((name.to_string(), color));
                    }
                }
                Trace::ScatterText(text) => {
                    let color = text.color.map(to_rgb).unwrap_or(INK);
                    let points: Vec<(f64, f64, String)> = categories
                        .points(&text.x, &text.y, axis)
                        .into_iter()
                        .enumerate()
                        .filter_map(|(k, p)| {
                            p.map(|(x, y)| {
                                let label = text.text.get(k).cloned().unwrap_or_else(|| axis_number(y));
                                (x, y, label)
                            })
                        })
                        .collect();
                    if self.text {
                        let style = self.font(12.0).color(&color).pos(Pos::new(HPos::Center, VPos::Bottom));
                        cc.draw_series(points.into_iter().map(|(x, y, label)| Text::new(label, (x, y), style.clone())))
                            .map_err(draw_err)?;
                    } else {
                        let radius = self.px(3.0);
                        cc.draw_series(points.into_iter().map(|(x, y, _)| Circle::new((x, y), radius, color.filled())))
                            .map_err(draw_err)?;
                    }
                }
                Trace::Pie(_) => {}
            }
        }

        if self.text && !legend.is_empty() {
            let swatch = self.px(5.0) as i32;
            for (name, color) in legend {
                cc.draw_series(std::iter::empty::<PathElement<(f64, f64)>>())
                    .map_err(draw_err)?
                    .label(name)
                    .legend(move |(x, y)| Rectangle::new([(x, y - swatch), (x + 2 * swatch, y + swatch)], color.filled()));
            }
            cc.configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(WHITE.mix(0.85).filled())
                .border_style(GRID.stroke_width(1))
                .label_font(self.font(12.0).color(&INK))
                .draw()
                .map_err(draw_err)?;
        }
        Ok(())
    }

    fn draw_pie(&self, pie: &PieTrace, area: &Area) -> Result<(), RasterError> {
        let slices: Vec<(usize, f64)> = pie
            .values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.filter(|v| v.is_finite() && *v > 0.0).map(|v| (i, v)))
            .collect();
        let total: f64 = slices.iter().map(|(_, v)| v).sum();
        if total <= 0.0 {
            return Ok(());
        }

        let (w, h) = area.dim_in_pixel();
        let (w, h) = (w as f64, h as f64);
        let legend_w = if self.text { w * 0.35 } else { 0.0 };
        let (cx, cy) = ((w - legend_w) / 2.0, h / 2.0);
        let radius = (w - legend_w).min(h) * 0.42;
        let inner = radius * (pie.hole as f64).clamp(0.0, 0.95);

        let mut start = -FRAC_PI_2;
        for &(i, value) in &slices {
            let sweep = value / total * TAU;
            let mut outline = arc(cx, cy, radius, start, start + sweep);
            if inner > 0.0 {
                outline.extend(arc(cx, cy, inner, start + sweep, start));
            } else {
                outline.push((cx.round() as i32, cy.round() as i32));
            }
            let color = pie.colors.get(i).copied().unwrap_or_else(|| series_color(i));
            area.draw(&Polygon::new(outline, to_rgb(color).filled())).map_err(draw_err)?;
            start += sweep;
        }

        if self.text {
            let line_h = self.px(22.0) as i32;
            let swatch = self.px(12.0) as i32;
            let left = (w - legend_w + self.px(8.0) as f64) as i32;
            let top = (cy as i32) - line_h * slices.len() as i32 / 2;
            for (row, &(i, value)) in slices.iter().enumerate() {
                let y = top + line_h * row as i32;
                let color = pie.colors.get(i).copied().unwrap_or_else(|| series_color(i));
                area.draw(&Rectangle::new([(left, y), (left + swatch, y + swatch)], to_rgb(color).filled()))
                    .map_err(draw_err)?;
                let label = pie.labels.get(i).map(String::as_str).unwrap_or("");
                let caption = format!("{} {:.1}%", label, value / total * 100.0);
                area.draw(&Text::new(caption, (left + swatch + swatch / 2, y), self.font(12.0).color(&INK)))
                    .map_err(draw_err)?;
            }
        }
        Ok(())
    }
}

/// Distinct x labels across cartesian traces, in first-seen order.
struct Categories {
    labels: Vec<String>,
    index: HashMap<String, usize>,
}

fn cartesian(trace: &Trace) -> Option<(&[XValue], &[Option<f64>])> {
    match trace {
        Trace::Line(s) | Trace::Bar(s) => Some((&s.x, &s.y)),
        Trace::ScatterText(t) => Some((&t.x, &t.y)),
        Trace::Pie(_) => None,
    }
}

fn x_label(xs: &[XValue], i: usize, axis: AxisKind) -> String {
    xs.get(i).map(|x| x.label(axis)).unwrap_or_else(|| i.to_string())
}

impl Categories {
    fn collect(chart: &Chart, axis: AxisKind) -> Self {
        let mut categories = Categories {
            labels: Vec::new(),
            index: HashMap::new(),
        };
        for (xs, ys) in chart.traces.iter().filter_map(cartesian) {
            for i in 0..xs.len().max(ys.len()) {
                let label = x_label(xs, i, axis);
                if !categories.index.contains_key(&label) {
                    categories.index.insert(label.clone(), categories.labels.len());
                    categories.labels.push(label);
                }
            }
        }
        categories
    }

    /// Plot positions for each y value; `None` where the value is missing.
    fn points(&self, xs: &[XValue], ys: &[Option<f64>], axis: AxisKind) -> Vec<Option<(f64, f64)>> {
        ys.iter()
            .enumerate()
            .map(|(i, y)| {
                let y = y.filter(|v| v.is_finite())?;
                let pos = *self.index.get(&x_label(xs, i, axis))?;
                Some((pos as f64, y))
            })
            .collect()
    }
}

/// Splits a series at missing values so lines break instead of bridging gaps.
fn segments(points: &[Option<(f64, f64)>]) -> Vec<Vec<(f64, f64)>> {
    points
        .split(Option::is_none)
        .filter(|run| !run.is_empty())
        .map(|run| run.iter().flatten().copied().collect())
        .collect()
}

fn value_range(chart: &Chart, categories: &Categories, axis: AxisKind, stacked: bool) -> (f64, f64) {
    let (mut lo, mut hi) = (0.0f64, 0.0f64);
    let mut stack = vec![(0.0f64, 0.0f64); categories.labels.len()];
    for trace in &chart.traces {
        let Some((xs, ys)) = cartesian(trace) else {
            continue;
        };
        for (x, y) in categories.points(xs, ys, axis).into_iter().flatten() {
            if stacked && matches!(trace, Trace::Bar(_)) {
                let slot = &mut stack[x as usize];
                if y >= 0.0 {
                    slot.0 += y;
                    hi = hi.max(slot.0);
                } else {
                    slot.1 += y;
                    lo = lo.min(slot.1);
                }
            } else {
                lo = lo.min(y);
                hi = hi.max(y);
            }
        }
    }
    if hi - lo < f64::EPSILON {
        hi = lo + 1.0;
    }
    let pad = (hi - lo) * 0.08;
    (if lo < 0.0 { lo - pad } else { lo }, hi + pad)
}

fn arc(cx: f64, cy: f64, r: f64, from: f64, to: f64) -> Vec<(i32, i32)> {
    let steps = (((to - from).abs() / TAU) * 96.0).ceil().max(2.0) as usize;
    (0..=steps)
        .map(|k| {
            let a = from + (to - from) * k as f64 / steps as f64;
            ((cx + r * a.cos()).round() as i32, (cy + r * a.sin()).round() as i32)
        })
        .collect()
}

fn category_at(labels: &[String], v: f64) -> String {
    let r = v.round();
    if (v - r).abs() > 1e-6 || r < 0.0 {
        return String::new();
    }
    labels.get(r as usize).cloned().unwrap_or_default()
}

fn axis_number(v: f64) -> String {
    let a = v.abs();
    if a >= 1e6 {
        format!("{:.1}M", v / 1e6)
    } else if a >= 1e4 {
        format!("{:.0}k", v / 1e3)
    } else if v.fract() == 0.0 {
        format!("{:.0}", v)
    } else {
        format!("{:.2}", v)
    }
}
