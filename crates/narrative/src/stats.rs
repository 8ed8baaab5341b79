/// Summary statistics over the present, finite values of a series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub sum: f64,
    pub count: usize,
    /// Position of the first minimum in the original series.
    pub argmin: usize,
    /// Position of the first maximum in the original series.
    pub argmax: usize,
    pub last: f64,
    /// Second-to-last present value, if any.
    pub previous: Option<f64>,
}

impl SeriesStats {
    /// `None` when the series holds no usable number.
    pub fn compute(values: &[Option<f64>]) -> Option<SeriesStats> {
        let mut present = values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.filter(|v| v.is_finite()).map(|v| (i, v)));

        let (first_idx, first) = present.next()?;
        let mut stats = SeriesStats {
            min: first,
            max: first,
            mean: first,
            sum: first,
            count: 1,
            argmin: first_idx,
            argmax: first_idx,
            last: first,
            previous: None,
        };
        for (i, v) in present {
            if v < stats.min {
                stats.min = v;
                stats.argmin = i;
            }
            if v > stats.max {
                stats.max = v;
                stats.argmax = i;
            }
            stats.sum += v;
            stats.count += 1;
            stats.previous = Some(stats.last);
            stats.last = v;
        }
        stats.mean = stats.sum / stats.count as f64;
        Some(stats)
    }

    pub fn is_finite(&self) -> bool {
        self.sum.is_finite() && self.mean.is_finite()
    }

    /// Change between the last two present values; zero for a single point.
    pub fn last_delta(&self) -> f64 {
        self.previous.map(|p| self.last - p).unwrap_or(0.0)
    }
}
