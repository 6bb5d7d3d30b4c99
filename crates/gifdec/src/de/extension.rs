/// How the canvas is treated once a frame's display time has elapsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisposalMethod {
    /// No disposal specified; the viewer may do anything.
    #[default]
    Unspecified,

    /// Leave the frame in place and draw the next one over it.
    Keep,

    /// Clear the frame's area to the background color.
    RestoreBackground,

    /// Restore the area to whatever was there before this frame.
    RestorePrevious,
}

impl DisposalMethod {
    /// Decode the 3-bit disposal field from the graphic control packed byte.
    ///
    /// Values 4 through 7 are reserved and treated as unspecified.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits {
            1 => Self::Keep,
            2 => Self::RestoreBackground,
            3 => Self::RestorePrevious,
            _ => Self::Unspecified,
        }
    }
}

/// Represents a graphic control extension (label `0xF9`).
///
/// At most one precedes a given image block and applies only to that image.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphicControl {
    disposal: DisposalMethod,
    user_input: bool,
    transparent_index: Option<u8>,
    delay_cs: u16,
}

impl GraphicControl {
    pub(crate) const fn new(
        disposal: DisposalMethod,
        user_input: bool,
        transparent_index: Option<u8>,
        delay_cs: u16,
    ) -> Self {
        Self {
            disposal,
            user_input,
            transparent_index,
            delay_cs,
        }
    }

    /// How to dispose of the governed frame.
    #[must_use]
    pub const fn disposal(&self) -> DisposalMethod {
        self.disposal
    }

    /// Whether the viewer should wait for user input before continuing.
    #[must_use]
    pub const fn user_input(&self) -> bool {
        self.user_input
    }

    /// The color index to treat as transparent, if transparency was given.
    #[must_use]
    pub const fn transparent_index(&self) -> Option<u8> {
        self.transparent_index
    }

    /// Display time for the governed frame, in hundredths of a second.
    #[must_use]
    pub const fn delay_cs(&self) -> u16 {
        self.delay_cs
    }
}

/// Represents a plain text extension (label `0x01`).
///
/// The 12-byte grid header (position, cell size and color indices of the text
/// grid) is captured verbatim rather than interpreted; next to nothing renders
/// these blocks.
#[derive(Debug, Clone)]
pub struct PlainText {
    grid: [u8; 12],
    text: String,
}

impl PlainText {
    pub(crate) const fn new(grid: [u8; 12], text: String) -> Self {
        Self { grid, text }
    }

    /// The raw 12-byte text grid header.
    #[must_use]
    pub const fn grid(&self) -> &[u8; 12] {
        &self.grid
    }

    /// The text payload, assembled from sub-blocks.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Represents an application extension (label `0xFF`).
#[derive(Debug, Clone)]
pub enum Application {
    /// The Netscape 2.0 looping extension.
    Netscape {
        /// Number of times the animation repeats (0 means forever).
        loop_count: u16,
    },

    /// Any other application extension, carried as an opaque payload.
    Unknown {
        /// The 8-byte application identifier.
        identifier: [u8; 8],
        /// The 3-byte application authentication code.
        auth_code: [u8; 3],
        /// The application data, assembled from sub-blocks.
        data: Vec<u8>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_disposal_bits_are_unspecified() {
        assert_eq!(DisposalMethod::from_bits(0), DisposalMethod::Unspecified);
        assert_eq!(DisposalMethod::from_bits(2), DisposalMethod::RestoreBackground);
        for bits in 4..8 {
            assert_eq!(DisposalMethod::from_bits(bits), DisposalMethod::Unspecified);
        }
    }

    #[test]
    fn graphic_control_defaults() {
        let control = GraphicControl::default();
        assert_eq!(control.disposal(), DisposalMethod::Unspecified);
        assert_eq!(control.transparent_index(), None);
        assert_eq!(control.delay_cs(), 0);
        assert!(!control.user_input());
    }
}
