use crate::util::Interval;

/// A lookup table of values sampled at regular intervals.
#[derive(Clone, Debug)]
pub struct LookupTable<T> {
    offset: f64,
    step: f64,
    values: Vec<T>,
}

impl<T> LookupTable<T> {
    /// Creates a lookup table from a sample function.
    /// The table always holds at least one sample.
    pub fn from_samples(range: Interval<f64>, step: f64, f: impl FnMut(f64) -> T) -> Self {
        let offset = range.min;
        let num_samples = usize::max((range.length() / step).ceil() as usize, 1);
        let xs = (0..num_samples).map(|i| offset + ((i as f64) + 0.5) * step);
        let values = xs.map(f).collect();
        Self {
            offset,
            step,
            values,
        }
    }

    /// Samples the lookup table, clamping to the first or last
    /// value outside of the sampled range.
    pub fn sample(&self, x: f64) -> &T {
        let idx = (x - self.offset) / self.step;
        let idx = usize::min(idx as u32 as usize, self.values.len() - 1);
        &self.values[idx]
    }
}
