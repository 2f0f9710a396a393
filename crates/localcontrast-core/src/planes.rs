//! Working buffers for the tone mapping engines
//!
//! [`RgbBuffer`] is a packed 3-channel buffer (`RGBRGB...`, no alpha, no
//! padding) and [`Plane`] a single-channel scratch buffer of the same pixel
//! count. Both are row-major: pixel `(x, y)` is at index `y * width + x`.
//!
//! The fast engine works on `RgbBuffer<u8>` with `Plane<i32>` luminance,
//! the float engine on `RgbBuffer<f32>` with `Plane<f32>` luminance.

use crate::error::{Error, Result};
use std::slice::{ChunksExact, ChunksExactMut};

/// Packed, de-interleaved RGB working buffer
#[derive(Debug, Clone, PartialEq)]
pub struct RgbBuffer<T> {
    width: u32,
    height: u32,
    data: Vec<T>,
}

impl<T: Copy + Default> RgbBuffer<T> {
    /// Create a buffer filled with `T::default()`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let len = pixel_count(width, height)? * 3;
        Ok(RgbBuffer {
            width,
            height,
            data: vec![T::default(); len],
        })
    }

    /// Create a buffer from packed RGB data.
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions are invalid or
    /// `data.len() != width * height * 3`.
    pub fn from_data(width: u32, height: u32, data: Vec<T>) -> Result<Self> {
        let expected = pixel_count(width, height)? * 3;
        if data.len() != expected {
            return Err(Error::BufferLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(RgbBuffer {
            width,
            height,
            data,
        })
    }
}

impl<T> RgbBuffer<T> {
    /// Width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels (not samples)
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// All samples, `RGBRGB...`
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// All samples, mutable
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Iterate over `[r, g, b]` triples.
    #[inline]
    pub fn pixels(&self) -> ChunksExact<'_, T> {
        self.data.chunks_exact(3)
    }

    /// Iterate mutably over `[r, g, b]` triples.
    #[inline]
    pub fn pixels_mut(&mut self) -> ChunksExactMut<'_, T> {
        self.data.chunks_exact_mut(3)
    }

    /// Consume the buffer and return the packed samples.
    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    /// Convert every sample with `f`, keeping the dimensions.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> RgbBuffer<U> {
        RgbBuffer {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(f).collect(),
        }
    }

    /// A default-filled plane with this buffer's dimensions.
    pub fn plane<U: Copy + Default>(&self) -> Plane<U> {
        Plane {
            width: self.width,
            height: self.height,
            data: vec![U::default(); self.pixel_count()],
        }
    }
}

/// Single-channel scratch plane
#[derive(Debug, Clone, PartialEq)]
pub struct Plane<T> {
    width: u32,
    height: u32,
    data: Vec<T>,
}

impl<T: Copy + Default> Plane<T> {
    /// Create a plane filled with `T::default()`.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let len = pixel_count(width, height)?;
        Ok(Plane {
            width,
            height,
            data: vec![T::default(); len],
        })
    }

    /// Create a plane from row-major data.
    pub fn from_data(width: u32, height: u32, data: Vec<T>) -> Result<Self> {
        let expected = pixel_count(width, height)?;
        if data.len() != expected {
            return Err(Error::BufferLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Plane {
            width,
            height,
            data,
        })
    }

    /// Get the value at `(x, y)`.
    pub fn get(&self, x: u32, y: u32) -> Option<T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[y as usize * self.width as usize + x as usize])
    }
}

impl<T> Plane<T> {
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }
}

fn pixel_count(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimension { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .filter(|n| n.checked_mul(3).is_some())
        .ok_or(Error::InvalidDimension { width, height })
}
