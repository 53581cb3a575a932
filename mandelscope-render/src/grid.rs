use mandelscope_core::CoreError;

/// Per-pixel escape fractions for a full frame.
///
/// Sized once and reused every frame. Stored column-major (`x * height + y`)
/// so each column is one contiguous run: the unit the partitioner hands to
/// a worker.
#[derive(Debug, Clone)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    data: Vec<f64>,
}

impl PixelGrid {
    pub fn new(width: u32, height: u32) -> mandelscope_core::Result<Self> {
        if width == 0 || height == 0 {
            return Err(CoreError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            data: vec![0.0; width as usize * height as usize],
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Value at pixel `(x, y)`.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> f64 {
        self.data[x as usize * self.height as usize + y as usize]
    }

    /// Column `x`, top to bottom.
    pub fn column(&self, x: u32) -> &[f64] {
        let h = self.height as usize;
        let start = x as usize * h;
        &self.data[start..start + h]
    }

    /// Mutable columns in order, each paired with its x coordinate.
    pub fn columns_mut(&mut self) -> impl Iterator<Item = (u32, &mut [f64])> {
        self.data
            .chunks_exact_mut(self.height as usize)
            .enumerate()
            .map(|(x, column)| (x as u32, column))
    }

    /// Number of pixels whose orbit did not escape within the budget.
    pub fn interior_count(&self) -> usize {
        self.data.iter().filter(|&&v| v >= 1.0).count()
    }

    /// Set every cell to `value`.
    #[cfg(test)]
    pub(crate) fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }
}
