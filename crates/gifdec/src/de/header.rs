/// Represents the header and logical screen descriptor of a GIF stream.
#[derive(Debug, Clone)]
pub struct Header {
    version: [u8; 3],
    width: u16,
    height: u16,
    color_resolution: u8,
    sorted: bool,
    background_color: u8,
    pixel_aspect_ratio: u8,
    global_color_table: Option<ColorTable>,
}

impl Header {
    #[allow(clippy::too_many_arguments)]
    pub(crate) const fn new(
        version: [u8; 3],
        width: u16,
        height: u16,
        color_resolution: u8,
        sorted: bool,
        background_color: u8,
        pixel_aspect_ratio: u8,
        global_color_table: Option<ColorTable>,
    ) -> Self {
        Self {
            version,
            width,
            height,
            color_resolution,
            sorted,
            background_color,
            pixel_aspect_ratio,
            global_color_table,
        }
    }

    /// The three ASCII version bytes following the signature (`87a` or `89a`).
    ///
    /// The version is captured but not validated; decoding proceeds the same
    /// way for either.
    #[must_use]
    pub const fn version(&self) -> &[u8; 3] {
        &self.version
    }

    /// The width of the logical screen (canvas), in pixels.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// The height of the logical screen (canvas), in pixels.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// The color resolution field, a 3-bit value.
    #[must_use]
    pub const fn color_resolution(&self) -> u8 {
        self.color_resolution
    }

    /// Whether the global color table is sorted by decreasing importance.
    #[must_use]
    pub const fn sorted(&self) -> bool {
        self.sorted
    }

    /// Index into the global color table for the canvas background.
    #[must_use]
    pub const fn background_color(&self) -> u8 {
        self.background_color
    }

    /// The raw pixel aspect ratio byte (0 means no aspect ratio given).
    #[must_use]
    pub const fn pixel_aspect_ratio(&self) -> u8 {
        self.pixel_aspect_ratio
    }

    /// The global color table, if one is present.
    #[must_use]
    pub const fn global_color_table(&self) -> Option<&ColorTable> {
        self.global_color_table.as_ref()
    }
}

/// An ordered table of RGB triples.
///
/// Table lengths are always a power of two between 2 and 256, derived from a
/// 3-bit exponent in the enclosing descriptor.
#[derive(Debug, Clone)]
pub struct ColorTable {
    entries: Vec<[u8; 3]>,
}

impl ColorTable {
    pub(crate) const fn new(entries: Vec<[u8; 3]>) -> Self {
        Self { entries }
    }

    /// The number of entries in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The RGB triple at `index`, if the index is within the table.
    #[must_use]
    pub fn get(&self, index: u8) -> Option<[u8; 3]> {
        self.entries.get(usize::from(index)).copied()
    }

    /// All entries in table order.
    #[must_use]
    pub fn entries(&self) -> &[[u8; 3]] {
        &self.entries
    }
}
