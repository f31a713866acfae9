//! Channel-first raster array.

/// A dense channel-first `f32` raster: `channels x height x width`.
///
/// Layout is row-major within each channel, channels contiguous:
/// `data[(c * height + y) * width + x]`. This is the layout handed to and
/// received from the inference engine, and the layout all tiling operations
/// work in.
#[derive(Debug, Clone, PartialEq)]
pub struct BandStack {
    data: Vec<f32>,
    channels: usize,
    height: usize,
    width: usize,
}

impl BandStack {
    /// Create a stack from existing data. Panics in debug builds if the
    /// buffer length does not match the dimensions.
    pub fn from_data(data: Vec<f32>, channels: usize, height: usize, width: usize) -> Self {
        debug_assert_eq!(data.len(), channels * height * width);
        Self {
            data,
            channels,
            height,
            width,
        }
    }

    /// Create a zero-filled stack.
    pub fn zeros(channels: usize, height: usize, width: usize) -> Self {
        Self {
            data: vec![0.0; channels * height * width],
            channels,
            height,
            width,
        }
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Raw buffer access.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    #[inline]
    pub fn get(&self, c: usize, y: usize, x: usize) -> f32 {
        self.data[(c * self.height + y) * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, c: usize, y: usize, x: usize, value: f32) {
        self.data[(c * self.height + y) * self.width + x] = value;
    }

    /// One channel plane as a row-major slice.
    pub fn channel(&self, c: usize) -> &[f32] {
        let plane = self.height * self.width;
        &self.data[c * plane..(c + 1) * plane]
    }

    /// One row of one channel.
    #[inline]
    pub fn row(&self, c: usize, y: usize) -> &[f32] {
        let start = (c * self.height + y) * self.width;
        &self.data[start..start + self.width]
    }

    /// Copy a `height x width` window starting at `(y, x)` into a new stack,
    /// all channels.
    pub fn window(&self, y: usize, x: usize, height: usize, width: usize) -> BandStack {
        debug_assert!(y + height <= self.height && x + width <= self.width);
        let mut out = Vec::with_capacity(self.channels * height * width);
        for c in 0..self.channels {
            for row in y..y + height {
                let start = (c * self.height + row) * self.width + x;
                out.extend_from_slice(&self.data[start..start + width]);
            }
        }
        BandStack::from_data(out, self.channels, height, width)
    }

    /// Write `src` into this stack at `(y, x)`, all channels. Channel counts
    /// must match; the source must fit.
    pub fn blit(&mut self, src: &BandStack, y: usize, x: usize) {
        debug_assert_eq!(src.channels, self.channels);
        debug_assert!(y + src.height <= self.height && x + src.width <= self.width);
        for c in 0..self.channels {
            for row in 0..src.height {
                let dst_start = (c * self.height + y + row) * self.width + x;
                let src_start = (c * src.height + row) * src.width;
                self.data[dst_start..dst_start + src.width]
                    .copy_from_slice(&src.data[src_start..src_start + src.width]);
            }
        }
    }

    /// Stack two images channel-wise. Spatial dimensions must match.
    pub fn concat_channels(&self, other: &BandStack) -> BandStack {
        debug_assert_eq!((self.height, self.width), (other.height, other.width));
        let mut data = Vec::with_capacity(self.data.len() + other.data.len());
        data.extend_from_slice(&self.data);
        data.extend_from_slice(&other.data);
        BandStack::from_data(data, self.channels + other.channels, self.height, self.width)
    }
}
