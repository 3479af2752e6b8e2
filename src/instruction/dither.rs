//! # Reduction to black and white
//!
//! Thermal heads only know two colors. This module turns an 8-bit grayscale image into a [Bitmap] either with a fixed threshold or with Floyd-Steinberg error diffusion.
//!
//! ## Floyd-Steinberg
//!
//! Pixels are visited left to right, top to bottom. Each one is snapped to black or white, and the difference between what it was and what it became is pushed to the neighbours that have not been visited yet:
//!
//! ```text
//!           X    7/16
//!   3/16  5/16   1/16
//! ```
//!
//! All arithmetic is done on integers, so the same image always gives the same bits.

use image::GrayImage;
use serde::{Serialize, Deserialize};

/// Luminance under which a pixel counts as black when no dithering is requested
pub const THRESHOLD: u8 = 128;

/// How grayscale is reduced before printing
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DitherMode {
    /// The image is passed along untouched and cut with [THRESHOLD] when printed
    None,
    FloydSteinberg
}

impl DitherMode {
    /// Parses the canonical receipt spelling (`none`, `floydsteinberg`). Matching is case sensitive.
    pub fn from_name(name: &str) -> Option<DitherMode> {
        match name {
            "none" => Some(DitherMode::None),
            "floydsteinberg" => Some(DitherMode::FloydSteinberg),
            _ => None
        }
    }
}

/// Monochrome image, one bit per pixel
///
/// Rows are packed most significant bit first, padded with white up to a whole byte. A set bit is a black dot.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Bitmap {
    width: u32,
    height: u32,
    data: Vec<u8>
}

impl Bitmap {
    /// Creates a white bitmap
    pub fn new(width: u32, height: u32) -> Bitmap {
        let width_bytes = (width as usize + 7) / 8;
        Bitmap {
            width,
            height,
            data: vec![0; width_bytes * height as usize]
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes needed for one row
    pub fn width_bytes(&self) -> usize {
        (self.width as usize + 7) / 8
    }

    /// Packed rows, top to bottom
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// A single packed row
    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.width_bytes();
        &self.data[start..start + self.width_bytes()]
    }

    /// True if the pixel is black
    pub fn get(&self, x: u32, y: u32) -> bool {
        let byte = self.data[y as usize * self.width_bytes() + x as usize / 8];
        byte & (0x80 >> (x % 8)) != 0
    }

    pub fn set(&mut self, x: u32, y: u32, black: bool) {
        let idx = y as usize * self.width_bytes() + x as usize / 8;
        let mask = 0x80 >> (x % 8);
        if black {
            self.data[idx] |= mask;
        } else {
            self.data[idx] &= !mask;
        }
    }
}

/// Fixed threshold, no error diffusion.
///
/// ```rust
/// use escpos_receipt::dither::threshold;
/// use image::{GrayImage, Luma};
///
/// let gray = GrayImage::from_fn(9, 1, |x, _| Luma([if x % 2 == 0 { 0 } else { 255 }]));
/// let bitmap = threshold(&gray);
/// assert_eq!(&[0b10101010, 0b10000000], bitmap.row(0));
/// ```
pub fn threshold(gray: &GrayImage) -> Bitmap {
    let mut bitmap = Bitmap::new(gray.width(), gray.height());
    for (x, y, pixel) in gray.enumerate_pixels() {
        if pixel.0[0] < THRESHOLD {
            bitmap.set(x, y, true);
        }
    }
    bitmap
}

/// Floyd-Steinberg error diffusion against black and white.
pub fn floyd_steinberg(gray: &GrayImage) -> Bitmap {
    let (width, height) = gray.dimensions();
    let mut bitmap = Bitmap::new(width, height);
    let w = width as usize;
    // Two rows of accumulated error is all the kernel ever reaches
    let mut current = vec![0i32; w + 2];
    let mut next = vec![0i32; w + 2];

    for y in 0..height {
        for x in 0..width {
            let i = x as usize + 1;
            let old = gray.get_pixel(x, y).0[0] as i32 + current[i];
            let (new, black) = if old < THRESHOLD as i32 {(0, true)} else {(255, false)};
            if black {
                bitmap.set(x, y, true);
            }
            let error = old - new;
            current[i + 1] += error * 7 / 16;
            next[i - 1] += error * 3 / 16;
            next[i] += error * 5 / 16;
            next[i + 1] += error / 16;
        }
        std::mem::swap(&mut current, &mut next);
        for e in next.iter_mut() {
            *e = 0;
        }
    }

    bitmap
}
