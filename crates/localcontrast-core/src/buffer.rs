//! PixelBuffer - interleaved image container
//!
//! `PixelBuffer` is the image type handed to the tone mapper by the
//! surrounding application. It is a row-major grid of interleaved samples,
//! 8 or 16 bits per channel, with 3 (RGB) or 4 (RGBA) channels.
//!
//! # Sample layout
//!
//! The sample for channel `c` of pixel `(x, y)` lives at index
//! `(y * width + x) * channels + c`. Channel order is R, G, B, A.
//! The tone mapper never reads or writes the alpha channel.
//!
//! # Examples
//!
//! ```
//! use localcontrast_core::{BitDepth, PixelBuffer};
//!
//! let mut buf = PixelBuffer::new(4, 4, BitDepth::Bit8, false).unwrap();
//! buf.set_rgb(1, 2, [10, 20, 30]).unwrap();
//! assert_eq!(buf.get_rgb(1, 2), Some([10, 20, 30]));
//! ```

use crate::error::{Error, Result};

/// Bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum BitDepth {
    /// 8 bits per channel, samples in [0, 255]
    Bit8 = 8,
    /// 16 bits per channel, samples in [0, 65535]
    Bit16 = 16,
}

impl BitDepth {
    /// Create `BitDepth` from a raw bit count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDepth`] if `bits` is not 8 or 16.
    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            8 => Ok(BitDepth::Bit8),
            16 => Ok(BitDepth::Bit16),
            _ => Err(Error::InvalidDepth(bits)),
        }
    }

    /// Get the number of bits per channel.
    pub fn bits(self) -> u32 {
        self as u32
    }

    /// Get the maximum sample value representable at this depth.
    pub fn max_value(self) -> u32 {
        (1u32 << self.bits()) - 1
    }
}

/// Interleaved sample storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PixelData {
    /// 8-bit samples
    Bit8(Vec<u8>),
    /// 16-bit samples
    Bit16(Vec<u16>),
}

impl PixelData {
    /// Number of samples stored.
    pub fn len(&self) -> usize {
        match self {
            PixelData::Bit8(v) => v.len(),
            PixelData::Bit16(v) => v.len(),
        }
    }

    /// Whether no samples are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn depth(&self) -> BitDepth {
        match self {
            PixelData::Bit8(_) => BitDepth::Bit8,
            PixelData::Bit16(_) => BitDepth::Bit16,
        }
    }
}

/// Interleaved RGB/RGBA image buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: u32,
    data: PixelData,
}

impl PixelBuffer {
    /// Create a zero-filled buffer.
    ///
    /// # Arguments
    ///
    /// * `width` - Width in pixels (must be > 0)
    /// * `height` - Height in pixels (must be > 0)
    /// * `depth` - Bits per channel
    /// * `has_alpha` - Whether a fourth (alpha) channel is present
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32, depth: BitDepth, has_alpha: bool) -> Result<Self> {
        let channels = if has_alpha { 4 } else { 3 };
        let len = sample_count(width, height, channels)?;
        let data = match depth {
            BitDepth::Bit8 => PixelData::Bit8(vec![0; len]),
            BitDepth::Bit16 => PixelData::Bit16(vec![0; len]),
        };
        Ok(PixelBuffer {
            width,
            height,
            channels,
            data,
        })
    }

    /// Wrap existing 8-bit interleaved samples.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are zero, `channels` is not 3 or 4,
    /// or `data.len() != width * height * channels`.
    pub fn from_u8(width: u32, height: u32, channels: u32, data: Vec<u8>) -> Result<Self> {
        Self::from_data(width, height, channels, PixelData::Bit8(data))
    }

    /// Wrap existing 16-bit interleaved samples.
    ///
    /// # Errors
    ///
    /// Same conditions as [`PixelBuffer::from_u8`].
    pub fn from_u16(width: u32, height: u32, channels: u32, data: Vec<u16>) -> Result<Self> {
        Self::from_data(width, height, channels, PixelData::Bit16(data))
    }

    /// Wrap existing interleaved samples of either depth.
    pub fn from_data(width: u32, height: u32, channels: u32, data: PixelData) -> Result<Self> {
        if channels != 3 && channels != 4 {
            return Err(Error::InvalidChannels(channels));
        }
        let expected = sample_count(width, height, channels)?;
        if data.len() != expected {
            return Err(Error::BufferLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(PixelBuffer {
            width,
            height,
            channels,
            data,
        })
    }

    /// Create a buffer with the same geometry and depth, zero-filled.
    pub fn create_template(&self) -> Self {
        let len = self.data.len();
        let data = match self.data {
            PixelData::Bit8(_) => PixelData::Bit8(vec![0; len]),
            PixelData::Bit16(_) => PixelData::Bit16(vec![0; len]),
        };
        PixelBuffer {
            width: self.width,
            height: self.height,
            channels: self.channels,
            data,
        }
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the image dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Get the bits per channel.
    #[inline]
    pub fn depth(&self) -> BitDepth {
        self.data.depth()
    }

    /// Get the number of interleaved channels (3 or 4).
    #[inline]
    pub fn channels(&self) -> u32 {
        self.channels
    }

    /// Whether the buffer carries an alpha channel.
    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.channels == 4
    }

    /// Number of pixels (`width * height`).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Raw sample storage.
    #[inline]
    pub fn data(&self) -> &PixelData {
        &self.data
    }

    /// Mutable raw sample storage.
    #[inline]
    pub fn data_mut(&mut self) -> &mut PixelData {
        &mut self.data
    }

    /// 8-bit samples, if this is an 8-bit buffer.
    pub fn as_u8(&self) -> Option<&[u8]> {
        match &self.data {
            PixelData::Bit8(v) => Some(v),
            PixelData::Bit16(_) => None,
        }
    }

    /// 16-bit samples, if this is a 16-bit buffer.
    pub fn as_u16(&self) -> Option<&[u16]> {
        match &self.data {
            PixelData::Bit16(v) => Some(v),
            PixelData::Bit8(_) => None,
        }
    }

    /// Consume the buffer and return its storage.
    pub fn into_data(self) -> PixelData {
        self.data
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * self.channels as usize)
    }

    /// Read one sample.
    pub fn sample(&self, x: u32, y: u32, channel: u32) -> Option<u32> {
        if channel >= self.channels {
            return None;
        }
        let i = self.offset(x, y)? + channel as usize;
        Some(match &self.data {
            PixelData::Bit8(v) => v[i] as u32,
            PixelData::Bit16(v) => v[i] as u32,
        })
    }

    /// Read the R, G, B samples of a pixel.
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<[u32; 3]> {
        let i = self.offset(x, y)?;
        Some(match &self.data {
            PixelData::Bit8(v) => [v[i] as u32, v[i + 1] as u32, v[i + 2] as u32],
            PixelData::Bit16(v) => [v[i] as u32, v[i + 1] as u32, v[i + 2] as u32],
        })
    }

    /// Read the alpha sample of a pixel, if the buffer has one.
    pub fn get_alpha(&self, x: u32, y: u32) -> Option<u32> {
        if !self.has_alpha() {
            return None;
        }
        self.sample(x, y, 3)
    }

    /// Write the R, G, B samples of a pixel. Values are clamped to the depth.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `(x, y)` lies outside the image.
    pub fn set_rgb(&mut self, x: u32, y: u32, rgb: [u32; 3]) -> Result<()> {
        let i = self.offset(x, y).ok_or(Error::IndexOutOfBounds {
            index: y as usize * self.width as usize + x as usize,
            len: self.pixel_count(),
        })?;
        match &mut self.data {
            PixelData::Bit8(v) => {
                for (c, value) in rgb.iter().enumerate() {
                    v[i + c] = (*value).min(255) as u8;
                }
            }
            PixelData::Bit16(v) => {
                for (c, value) in rgb.iter().enumerate() {
                    v[i + c] = (*value).min(65535) as u16;
                }
            }
        }
        Ok(())
    }

    /// Write the alpha sample of a pixel. No-op on buffers without alpha.
    pub fn set_alpha(&mut self, x: u32, y: u32, alpha: u32) -> Result<()> {
        if !self.has_alpha() {
            return Ok(());
        }
        let i = self.offset(x, y).ok_or(Error::IndexOutOfBounds {
            index: y as usize * self.width as usize + x as usize,
            len: self.pixel_count(),
        })? + 3;
        match &mut self.data {
            PixelData::Bit8(v) => v[i] = alpha.min(255) as u8,
            PixelData::Bit16(v) => v[i] = alpha.min(65535) as u16,
        }
        Ok(())
    }

    /// Fill every pixel's R, G, B with one color.
    pub fn fill_rgb(&mut self, rgb: [u32; 3]) {
        let step = self.channels as usize;
        match &mut self.data {
            PixelData::Bit8(v) => {
                for px in v.chunks_exact_mut(step) {
                    for c in 0..3 {
                        px[c] = rgb[c].min(255) as u8;
                    }
                }
            }
            PixelData::Bit16(v) => {
                for px in v.chunks_exact_mut(step) {
                    for c in 0..3 {
                        px[c] = rgb[c].min(65535) as u16;
                    }
                }
            }
        }
    }
}

fn sample_count(width: u32, height: u32, channels: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimension { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(channels as usize))
        .ok_or(Error::InvalidDimension { width, height })
}
