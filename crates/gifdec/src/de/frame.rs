use crate::de::extension::DisposalMethod;
use crate::de::header::ColorTable;

/// Represents a fully decoded frame of the animation.
///
/// Frames are emitted in stream order. Each carries its own pixel indices,
/// the color table that applies to it (local overriding global), and the
/// control metadata from the graphic control extension that preceded it, or
/// defaults when none did. Frames are not composited against one another;
/// honoring disposal across frames belongs to a playback layer.
#[derive(Debug, Clone)]
pub struct Frame {
    left: u16,
    top: u16,
    width: u16,
    height: u16,
    indices: Vec<u8>,
    palette: Option<ColorTable>,
    transparent_index: Option<u8>,
    disposal: DisposalMethod,
    delay_cs: u16,
}

impl Frame {
    #[allow(clippy::too_many_arguments)]
    pub(crate) const fn new(
        left: u16,
        top: u16,
        width: u16,
        height: u16,
        indices: Vec<u8>,
        palette: Option<ColorTable>,
        transparent_index: Option<u8>,
        disposal: DisposalMethod,
        delay_cs: u16,
    ) -> Self {
        Self {
            left,
            top,
            width,
            height,
            indices,
            palette,
            transparent_index,
            disposal,
            delay_cs,
        }
    }

    /// Horizontal offset of the frame on the logical screen, in pixels.
    #[must_use]
    pub const fn left(&self) -> u16 {
        self.left
    }

    /// Vertical offset of the frame on the logical screen, in pixels.
    #[must_use]
    pub const fn top(&self) -> u16 {
        self.top
    }

    /// The width of the frame, in pixels.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// The height of the frame, in pixels.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Color-table indices, one per pixel, row by row from the top.
    #[must_use]
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    /// The color table this frame resolves against, if the stream carried
    /// one (local when present, otherwise global).
    #[must_use]
    pub const fn palette(&self) -> Option<&ColorTable> {
        self.palette.as_ref()
    }

    /// The color index rendered as fully transparent, if any.
    #[must_use]
    pub const fn transparent_index(&self) -> Option<u8> {
        self.transparent_index
    }

    /// How to dispose of this frame once its delay has elapsed.
    #[must_use]
    pub const fn disposal(&self) -> DisposalMethod {
        self.disposal
    }

    /// Display time in hundredths of a second.
    #[must_use]
    pub const fn delay_cs(&self) -> u16 {
        self.delay_cs
    }

    /// Display time in milliseconds.
    #[must_use]
    pub fn delay_ms(&self) -> u32 {
        u32::from(self.delay_cs) * 10
    }

    /// Resolve the frame into an RGBA8 buffer of `width * height * 4` bytes.
    ///
    /// The transparent index, when given, becomes a fully transparent pixel
    /// instead of a palette lookup. Indices outside the palette (or any index
    /// when no palette exists) resolve to opaque black.
    #[must_use]
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut rgba = Vec::with_capacity(self.indices.len() * 4);

        for &index in &self.indices {
            if self.transparent_index == Some(index) {
                rgba.extend_from_slice(&[0, 0, 0, 0]);
                continue;
            }

            let [r, g, b] = self
                .palette
                .as_ref()
                .and_then(|palette| palette.get(index))
                .unwrap_or([0, 0, 0]);

            rgba.extend_from_slice(&[r, g, b, 0xFF]);
        }

        rgba
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_color_palette() -> ColorTable {
        ColorTable::new(vec![[0x10, 0x20, 0x30], [0xFF, 0xFF, 0xFF]])
    }

    #[test]
    fn rgba_resolution_honors_transparency() {
        let frame = Frame::new(
            0,
            0,
            2,
            1,
            vec![0, 1],
            Some(two_color_palette()),
            Some(1),
            DisposalMethod::Keep,
            5,
        );

        assert_eq!(
            frame.to_rgba(),
            [0x10, 0x20, 0x30, 0xFF, 0x00, 0x00, 0x00, 0x00]
        );
        assert_eq!(frame.delay_ms(), 50);
    }

    #[test]
    fn out_of_palette_index_is_opaque_black() {
        let frame = Frame::new(
            0,
            0,
            1,
            1,
            vec![5],
            Some(two_color_palette()),
            None,
            DisposalMethod::Unspecified,
            0,
        );

        assert_eq!(frame.to_rgba(), [0, 0, 0, 0xFF]);
    }
}
