use image::GrayImage;

/// Packed boolean raster; `true` marks a dark pixel or module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMatrix {
    width: usize,
    height: usize,
    bits: Vec<u64>,
}

impl BitMatrix {
    /// All-light matrix of the given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            bits: vec![0; (width * height).div_ceil(64)],
        }
    }

    /// Square matrix, the shape of every sampled symbol
    pub fn square(size: usize) -> Self {
        Self::new(size, size)
    }

    /// Build from row-major booleans
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        let mut matrix = Self::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, &dark) in row.as_ref().iter().enumerate().take(width) {
                matrix.set(x, y, dark);
            }
        }
        matrix
    }

    /// Threshold a luma raster: pixels equal to or below `threshold` are dark,
    /// or above it when `inverted` is set
    pub fn from_luma(gray: &GrayImage, threshold: u8, inverted: bool) -> Self {
        let (w, h) = gray.dimensions();
        let mut matrix = Self::new(w as usize, h as usize);
        for (x, y, px) in gray.enumerate_pixels() {
            if (px.0[0] <= threshold) != inverted {
                matrix.set(x as usize, y as usize, true);
            }
        }
        matrix
    }

    /// Width in cells
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in cells
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> Option<(usize, u64)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = y * self.width + x;
        Some((i / 64, 1u64 << (i % 64)))
    }

    /// Cell at column `x`, row `y`; out-of-range reads are light
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.index(x, y)
            .is_some_and(|(word, bit)| self.bits[word] & bit != 0)
    }

    /// Write a cell; out-of-range writes are ignored
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if let Some((word, bit)) = self.index(x, y) {
            if value {
                self.bits[word] |= bit;
            } else {
                self.bits[word] &= !bit;
            }
        }
    }

    /// Flip a cell
    #[inline]
    pub fn toggle(&mut self, x: usize, y: usize) {
        if let Some((word, bit)) = self.index(x, y) {
            self.bits[word] ^= bit;
        }
    }

    /// Number of dark cells
    pub fn count_dark(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Render as text, `#` for dark and `.` for light
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                out.push(if self.get(x, y) { '#' } else { '.' });
            }
            out.push('\n');
        }
        out
    }
}

impl Default for BitMatrix {
    fn default() -> Self {
        Self::new(0, 0)
    }
}
