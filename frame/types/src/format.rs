/*!
    Pixel format types.
*/

/**
    Video pixel formats.

    Only packed 8-bit formats are represented. Conferencing frames travel
    as packed RGB end to end, so the planar YUV family is out of scope.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum PixelFormat {
    /// Packed RGB, 24bpp (the interchange format for all pipeline stages)
    Rgb24,
    /// Packed RGBA, 32bpp (common for display surfaces)
    Rgba32,
    /// Single channel grayscale, 8bpp
    Gray8,
}

impl PixelFormat {
    /**
        Returns the number of bytes per pixel for this format.
    */
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Rgb24 => 3,
            Self::Rgba32 => 4,
            Self::Gray8 => 1,
        }
    }

    /**
        Returns the number of color channels.
    */
    pub const fn channels(self) -> u32 {
        match self {
            Self::Rgb24 => 3,
            Self::Rgba32 => 4,
            Self::Gray8 => 1,
        }
    }

    /**
        Returns true if this format carries an alpha channel.
    */
    pub const fn has_alpha(self) -> bool {
        matches!(self, Self::Rgba32)
    }
}
