use crate::bitmap::Bitmap;
use crate::error::RasterError;
use crate::preset::QualityPreset;
use powerdeck_model::Chart;

/// Turns a chart into pixels at one preset.
pub trait ChartRasterizer {
    fn rasterize(&self, chart: &Chart, preset: &QualityPreset) -> Result<Bitmap, RasterError>;
}

impl<R: ChartRasterizer + ?Sized> ChartRasterizer for &R {
    fn rasterize(&self, chart: &Chart, preset: &QualityPreset) -> Result<Bitmap, RasterError> {
        (**self).rasterize(chart, preset)
    }
}

/// A successful rasterization and the preset that produced it.
#[derive(Debug, Clone)]
pub struct Rasterized {
    pub bitmap: Bitmap,
    pub preset: String,
    /// Presets tried, including the successful one.
    pub attempts: usize,
}

/// Tries each preset in order and returns the first success.
pub fn rasterize_with_fallback<R: ChartRasterizer + ?Sized>(
    rasterizer: &R,
    chart: &Chart,
    presets: &[QualityPreset],
) -> Result<Rasterized, RasterError> {
    let label = chart.caption_or("untitled chart");
    for (i, preset) in presets.iter().enumerate() {
        match rasterizer.rasterize(chart, preset) {
            Ok(bitmap) => {
                log::debug!(
                    "Rasterized '{}' at preset '{}' ({}x{})",
                    label,
                    preset.name,
                    bitmap.width,
                    bitmap.height
                );
                return Ok(Rasterized {
                    bitmap,
                    preset: preset.name.clone(),
                    attempts: i + 1,
                });
            }
            Err(e) => log::debug!("Preset '{}' failed for '{}': {}", preset.name, label, e),
        }
    }
    log::warn!("All {} presets failed for '{}'", presets.len(), label);
    Err(RasterError::Exhausted {
        chart: label.to_string(),
        attempts: presets.len(),
    })
}

/// Relabels date axes to month names, drops interactive controls, then
/// rasterizes with fallback. Both exporters go through here.
pub fn rasterize_for_export<R: ChartRasterizer + ?Sized>(
    rasterizer: &R,
    chart: &Chart,
    presets: &[QualityPreset],
) -> Result<Rasterized, RasterError> {
    let prepared = chart.without_controls().with_month_labels();
    rasterize_with_fallback(rasterizer, &prepared, presets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::default_presets;
    use powerdeck_model::Trace;
    use std::cell::RefCell;

    /// Fails the first `failures` calls, then returns a 1x1 bitmap.
    struct Flaky {
        failures: usize,
        calls: RefCell<Vec<String>>,
    }

    impl ChartRasterizer for Flaky {
        fn rasterize(&self, _chart: &Chart, preset: &QualityPreset) -> Result<Bitmap, RasterError> {
            let mut calls = self.calls.borrow_mut();
            calls.push(preset.name.clone());
            if calls.len() <= self.failures {
                return Err(RasterError::Draw("renderer crashed".into()));
            }
            Ok(Bitmap::blank(1, 1))
        }
    }

    fn chart() -> Chart {
        Chart::new("Solar").with_trace(Trace::line("kWh", ["Jan"], vec![Some(1.0)]))
    }

    #[test]
    fn third_preset_succeeds_after_two_failures() {
        let rasterizer = Flaky {
            failures: 2,
            calls: RefCell::default(),
        };
        let result = rasterize_with_fallback(&rasterizer, &chart(), &default_presets()).unwrap();
        assert_eq!(result.preset, "medium");
        assert_eq!(result.attempts, 3);
        assert_eq!(*rasterizer.calls.borrow(), vec!["ultra", "high", "medium"]);
    }

    #[test]
    fn exhausting_every_preset_is_an_error() {
        let rasterizer = Flaky {
            failures: usize::MAX,
            calls: RefCell::default(),
        };
        let err = rasterize_with_fallback(&rasterizer, &chart(), &default_presets()).unwrap_err();
        assert!(matches!(err, RasterError::Exhausted { attempts: 5, .. }));
    }

    #[test]
    fn export_preparation_relabels_months() {
        struct Capture(RefCell<Option<Chart>>);
        impl ChartRasterizer for Capture {
            fn rasterize(&self, chart: &Chart, _: &QualityPreset) -> Result<Bitmap, RasterError> {
                *self.0.borrow_mut() = Some(chart.clone());
                Ok(Bitmap::blank(1, 1))
            }
        }

        let chart = Chart::new("Gas").with_trace(Trace::bar("kWh", ["2025-01-01", "2025-02-01"], vec![Some(1.0), Some(2.0)]));
        let capture = Capture(RefCell::default());
        rasterize_for_export(&capture, &chart, &default_presets()).unwrap();

        let seen = capture.0.borrow().clone().unwrap();
        let labels: Vec<String> = seen.traces[0].x().iter().map(|x| x.to_string()).collect();
        assert_eq!(labels, vec!["Jan 2025", "Feb 2025"]);
    }
}
