use crate::de::header::ColorTable;

/// Represents an image descriptor: one image's placement and flags.
#[derive(Debug, Clone, Copy)]
pub struct ImageDescriptor {
    left: u16,
    top: u16,
    width: u16,
    height: u16,
    interlaced: bool,
    sorted: bool,
}

impl ImageDescriptor {
    pub(crate) const fn new(
        left: u16,
        top: u16,
        width: u16,
        height: u16,
        interlaced: bool,
        sorted: bool,
    ) -> Self {
        Self {
            left,
            top,
            width,
            height,
            interlaced,
            sorted,
        }
    }

    /// Horizontal offset of the image on the logical screen, in pixels.
    #[must_use]
    pub const fn left(&self) -> u16 {
        self.left
    }

    /// Vertical offset of the image on the logical screen, in pixels.
    #[must_use]
    pub const fn top(&self) -> u16 {
        self.top
    }

    /// The width of the image, in pixels.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// The height of the image, in pixels.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Whether the image data was stored in interlaced row order.
    ///
    /// Interlacing is undone during decoding; decoded pixel rows are always
    /// in top-to-bottom order.
    #[must_use]
    pub const fn interlaced(&self) -> bool {
        self.interlaced
    }

    /// Whether the local color table is sorted by decreasing importance.
    #[must_use]
    pub const fn sorted(&self) -> bool {
        self.sorted
    }
}

/// Represents one decoded image block: descriptor, optional local color
/// table, and the decompressed pixel indices in linear row order.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    descriptor: ImageDescriptor,
    local_color_table: Option<ColorTable>,
    indices: Vec<u8>,
}

impl DecodedImage {
    pub(crate) const fn new(
        descriptor: ImageDescriptor,
        local_color_table: Option<ColorTable>,
        indices: Vec<u8>,
    ) -> Self {
        Self {
            descriptor,
            local_color_table,
            indices,
        }
    }

    /// The image descriptor.
    #[must_use]
    pub const fn descriptor(&self) -> &ImageDescriptor {
        &self.descriptor
    }

    /// The local color table, which overrides the global table for this
    /// image only.
    #[must_use]
    pub const fn local_color_table(&self) -> Option<&ColorTable> {
        self.local_color_table.as_ref()
    }

    /// Decompressed color-table indices, one per pixel, top-to-bottom.
    #[must_use]
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    pub(crate) fn into_parts(self) -> (ImageDescriptor, Option<ColorTable>, Vec<u8>) {
        (self.descriptor, self.local_color_table, self.indices)
    }
}

/// Row offsets and strides for the four interlace passes.
const INTERLACE_OFFSETS: [usize; 4] = [0, 4, 2, 1];
const INTERLACE_STRIDES: [usize; 4] = [8, 8, 4, 2];

/// Reorder interlaced pixel rows into top-to-bottom order.
///
/// Interlaced GIFs store rows in four passes (every 8th row from 0, every 8th
/// from 4, every 4th from 2, every 2nd from 1). The decoder emits rows in
/// pass order; this copies each one to its true row index.
pub(crate) fn deinterlace(indices: &[u8], width: usize) -> Vec<u8> {
    if width == 0 {
        return Vec::new();
    }

    let rows = indices.len() / width;
    let mut reordered = vec![0; indices.len()];
    let mut from_row = 0;

    for pass in 0..4 {
        let mut to_row = INTERLACE_OFFSETS[pass];

        while to_row < rows {
            let source = &indices[from_row * width..(from_row + 1) * width];
            reordered[to_row * width..(to_row + 1) * width].copy_from_slice(source);
            from_row += 1;
            to_row += INTERLACE_STRIDES[pass];
        }
    }

    // A trailing partial row (malformed input) is carried over as-is.
    reordered[rows * width..].copy_from_slice(&indices[rows * width..]);

    reordered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eight_rows_invert_to_linear_order() {
        // One pixel per row; rows in interlace pass order.
        let interlaced = [0, 4, 2, 6, 1, 3, 5, 7];
        let linear = deinterlace(&interlaced, 1);
        assert_eq!(linear, [0, 1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn rows_wider_than_one_pixel_move_together() {
        let interlaced = [
            0, 0, 0, // row 0 (pass 1)
            4, 4, 4, // row 4 (pass 2)
            2, 2, 2, // row 2 (pass 3)
            1, 1, 1, // row 1 (pass 4)
            3, 3, 3, // row 3 (pass 4)
        ];
        let linear = deinterlace(&interlaced, 3);
        assert_eq!(linear, [0, 0, 0, 1, 1, 1, 2, 2, 2, 3, 3, 3, 4, 4, 4]);
    }

    #[test]
    fn output_length_matches_input_length() {
        let interlaced = vec![7; 13];
        assert_eq!(deinterlace(&interlaced, 4).len(), 13);
        assert!(deinterlace(&[], 5).is_empty());
    }
}
