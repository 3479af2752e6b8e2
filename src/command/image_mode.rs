use serde::{Serialize, Deserialize};

/// Specifies how images are transferred to the printer
///
/// Not all modes are supported by all printers. Both modes print one dot per pixel in each direction.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Hash)]
pub enum ImageMode {
    /// Raster bit image, `GS v 0`. Rows of packed pixels, most printers support it.
    Raster,
    /// 24-dot double density bit image, `ESC * 33`, printed in bands of 24 rows.
    TwentyfourDotDoubleDensity
}

impl Eq for ImageMode{}

impl Default for ImageMode {
    fn default() -> ImageMode {
        ImageMode::Raster
    }
}

impl ImageMode {
    /// Returns the `m` parameter that goes with the command
    pub fn as_byte(&self) -> u8 {
        match self {
            ImageMode::Raster => 0x00,
            ImageMode::TwentyfourDotDoubleDensity => 0x21
        }
    }
}
