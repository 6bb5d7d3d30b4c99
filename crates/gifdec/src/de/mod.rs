//! Decode GIF streams into structured events and raster frames.
//!
//! [`parse`] drives a single forward pass over an in-memory byte buffer and
//! emits one typed event per parsed construct to a [`Handler`]. [`Gif`] is
//! the batteries-included consumer: it collects the events into a header,
//! comments, a loop count, and fully resolved [`Frame`]s.

mod error;
mod extension;
mod frame;
mod header;
mod image;
mod lzw;
mod parser;

use std::fs;
use std::path::Path;

pub use error::DecodeError;
pub use extension::{Application, DisposalMethod, GraphicControl, PlainText};
pub use frame::Frame;
pub use header::{ColorTable, Header};
pub use image::{DecodedImage, ImageDescriptor};

use parser::Parser;
use tracing::debug;

/// The ASCII signature every GIF stream begins with.
pub const SIGNATURE: parser::Signature = *b"GIF";

// Top-level block sentinels.
const EXTENSION_INTRODUCER: u8 = 0x21; // '!'
const IMAGE_SEPARATOR: u8 = 0x2C; // ','
const TRAILER: u8 = 0x3B; // ';'

// Extension labels.
const GRAPHIC_CONTROL_LABEL: u8 = 0xF9;
const COMMENT_LABEL: u8 = 0xFE;
const PLAIN_TEXT_LABEL: u8 = 0x01;
const APPLICATION_LABEL: u8 = 0xFF;

/// Receives one event per construct parsed from the stream.
///
/// Every method has a no-op default, so a consumer implements only the
/// variants it cares about.
#[allow(unused_variables)]
pub trait Handler {
    /// The header and logical screen descriptor, emitted exactly once,
    /// before any block.
    fn header(&mut self, header: &Header) {}

    /// A graphic control extension. It governs the next image block only;
    /// retaining it is the consumer's job.
    fn graphic_control(&mut self, control: &GraphicControl) {}

    /// A comment extension.
    fn comment(&mut self, text: &str) {}

    /// A plain text extension.
    fn plain_text(&mut self, ext: &PlainText) {}

    /// An application extension (Netscape loop count or an opaque payload).
    fn application(&mut self, ext: &Application) {}

    /// An extension with an unrecognized label, payload captured opaquely.
    fn unknown_extension(&mut self, label: u8, data: &[u8]) {}

    /// A decoded image block, pixel indices already deinterlaced.
    fn image(&mut self, image: DecodedImage) {}

    /// The stream trailer; the final event of a successful parse.
    fn trailer(&mut self) {}
}

/// Decode a complete GIF stream, emitting events to `handler`.
///
/// This is a single synchronous pass: sub-block lengths are only discoverable
/// sequentially, so blocks are parsed strictly in stream order. The block
/// loop is iterative, with the trailer sentinel as its only exit.
///
/// # Errors
///
/// This function returns an error if:
///
/// - The stream does not start with the `GIF` signature.
/// - A top-level block begins with an unknown sentinel byte.
/// - The pixel data contains an invalid LZW code.
/// - The stream ends before the trailer.
pub fn parse<H: Handler>(data: &[u8], handler: &mut H) -> Result<(), DecodeError> {
    let mut parser = Parser::new(data);

    let header = parse_header(&mut parser)?;
    handler.header(&header);

    loop {
        let sentinel = parser.read_byte()?;
        debug!(sentinel, remaining = parser.bytes_remaining());

        match sentinel {
            EXTENSION_INTRODUCER => parse_extension(&mut parser, handler)?,
            IMAGE_SEPARATOR => {
                let image = parse_image(&mut parser)?;
                handler.image(image);
            }
            TRAILER => {
                handler.trailer();
                return Ok(());
            }
            _ => return Err(DecodeError::UnknownBlockSentinel { actual: sentinel }),
        }
    }
}

/// Decode the signature, logical screen descriptor and global color table.
fn parse_header(parser: &mut Parser) -> Result<Header, DecodeError> {
    parser.expect_signature(SIGNATURE)?;
    let version = parser.read_array::<3>()?;

    let width = parser.read_u16_le()?;
    let height = parser.read_u16_le()?;

    let packed = parser.read_byte()?;
    let has_global_table = packed & 0x80 != 0;
    let color_resolution = (packed & 0x70) >> 4;
    let sorted = packed & 0x08 != 0;
    let table_len = 1 << ((packed & 0x07) + 1);

    let background_color = parser.read_byte()?;
    let pixel_aspect_ratio = parser.read_byte()?;

    let global_color_table = if has_global_table {
        Some(parse_color_table(parser, table_len)?)
    } else {
        None
    };

    Ok(Header::new(
        version,
        width,
        height,
        color_resolution,
        sorted,
        background_color,
        pixel_aspect_ratio,
        global_color_table,
    ))
}

/// Decode a color table of `len` RGB triples.
fn parse_color_table(parser: &mut Parser, len: usize) -> Result<ColorTable, DecodeError> {
    let mut entries = Vec::with_capacity(len);

    for _ in 0..len {
        entries.push(parser.read_array::<3>()?);
    }

    Ok(ColorTable::new(entries))
}

/// Decode one extension block and emit its event.
fn parse_extension<H: Handler>(parser: &mut Parser, handler: &mut H) -> Result<(), DecodeError> {
    let label = parser.read_byte()?;
    debug!(label, "extension");

    match label {
        GRAPHIC_CONTROL_LABEL => {
            let control = parse_graphic_control(parser)?;
            handler.graphic_control(&control);
        }
        COMMENT_LABEL => {
            let data = parser.read_sub_blocks()?;
            handler.comment(&String::from_utf8_lossy(&data));
        }
        PLAIN_TEXT_LABEL => {
            // Fixed 12-byte grid header, preceded by its size byte.
            let _block_size = parser.read_byte()?;
            let grid = parser.read_array::<12>()?;
            let data = parser.read_sub_blocks()?;
            let text = String::from_utf8_lossy(&data).to_string();
            handler.plain_text(&PlainText::new(grid, text));
        }
        APPLICATION_LABEL => {
            let ext = parse_application(parser)?;
            handler.application(&ext);
        }
        _ => {
            let data = parser.read_sub_blocks()?;
            handler.unknown_extension(label, &data);
        }
    }

    Ok(())
}

/// Decode the fixed 4-byte graphic control body.
fn parse_graphic_control(parser: &mut Parser) -> Result<GraphicControl, DecodeError> {
    // Block size, always 4.
    let _block_size = parser.read_byte()?;

    let packed = parser.read_byte()?;
    let disposal = DisposalMethod::from_bits((packed & 0x1C) >> 2);
    let user_input = packed & 0x02 != 0;
    let transparency_given = packed & 0x01 != 0;

    let delay_cs = parser.read_u16_le()?;
    // The index byte is present either way; the flag decides whether it
    // means anything.
    let index = parser.read_byte()?;
    let transparent_index = transparency_given.then_some(index);

    let terminator = parser.read_byte()?;
    if terminator != 0 {
        debug!(terminator, "nonzero graphic control terminator");
    }

    Ok(GraphicControl::new(
        disposal,
        user_input,
        transparent_index,
        delay_cs,
    ))
}

/// Decode an application extension, recognizing the Netscape loop body.
fn parse_application(parser: &mut Parser) -> Result<Application, DecodeError> {
    // Application header size, always 11.
    let _block_size = parser.read_byte()?;
    let identifier = parser.read_array::<8>()?;
    let auth_code = parser.read_array::<3>()?;

    if identifier == *b"NETSCAPE" {
        let _sub_block_size = parser.read_byte()?;
        let _sub_id = parser.read_byte()?;
        let loop_count = parser.read_u16_le()?;

        let terminator = parser.read_byte()?;
        if terminator != 0 {
            debug!(terminator, "nonzero Netscape extension terminator");
        }

        Ok(Application::Netscape { loop_count })
    } else {
        let data = parser.read_sub_blocks()?;
        Ok(Application::Unknown {
            identifier,
            auth_code,
            data,
        })
    }
}

/// Decode one image block: descriptor, local color table and pixel data.
fn parse_image(parser: &mut Parser) -> Result<DecodedImage, DecodeError> {
    let left = parser.read_u16_le()?;
    let top = parser.read_u16_le()?;
    let width = parser.read_u16_le()?;
    let height = parser.read_u16_le()?;

    let packed = parser.read_byte()?;
    let has_local_table = packed & 0x80 != 0;
    let interlaced = packed & 0x40 != 0;
    let sorted = packed & 0x20 != 0;
    let table_len = 1 << ((packed & 0x07) + 1);

    debug!(left, top, width, height, interlaced, "image descriptor");

    let local_color_table = if has_local_table {
        Some(parse_color_table(parser, table_len)?)
    } else {
        None
    };

    let min_code_size = parser.read_byte()?;
    let data = parser.read_sub_blocks()?;
    let mut indices = lzw::decompress(min_code_size, &data)?;

    if interlaced {
        indices = image::deinterlace(&indices, usize::from(width));
    }

    let descriptor = ImageDescriptor::new(left, top, width, height, interlaced, sorted);
    Ok(DecodedImage::new(descriptor, local_color_table, indices))
}

/// Represents the contents of a fully decoded GIF stream.
#[derive(Debug)]
pub struct Gif {
    header: Header,
    loop_count: Option<u16>,
    comments: Vec<String>,
    frames: Vec<Frame>,
}

impl Gif {
    /// Read and decode a GIF file.
    ///
    /// # Errors
    ///
    /// This function returns an error if:
    ///
    /// - Cannot read the file at path.
    /// - Data does not follow the GIF file format specification.
    pub fn open(path: &Path) -> Result<Self, DecodeError> {
        let data = fs::read(path).map_err(|err| DecodeError::ReadFailure { source: err })?;
        Self::from_bytes(&data)
    }

    /// Decode GIF data from an in-memory buffer.
    ///
    /// Each image block becomes one [`Frame`], resolved against the color
    /// table that applies to it (local over global) and the graphic control
    /// extension that most recently preceded it. Without a graphic control
    /// extension a frame gets the defaults: no transparency, zero delay,
    /// unspecified disposal.
    ///
    /// # Errors
    ///
    /// This function returns an error if:
    ///
    /// - Data does not follow the GIF file format specification.
    pub fn from_bytes(data: &[u8]) -> Result<Self, DecodeError> {
        #[derive(Default)]
        struct Collector {
            header: Option<Header>,
            // Held until the next image block, then consumed by it.
            control: Option<GraphicControl>,
            loop_count: Option<u16>,
            comments: Vec<String>,
            frames: Vec<Frame>,
        }

        impl Handler for Collector {
            fn header(&mut self, header: &Header) {
                self.header = Some(header.clone());
            }

            fn graphic_control(&mut self, control: &GraphicControl) {
                self.control = Some(*control);
            }

            fn comment(&mut self, text: &str) {
                self.comments.push(text.to_owned());
            }

            fn application(&mut self, ext: &Application) {
                if let Application::Netscape { loop_count } = *ext {
                    self.loop_count = Some(loop_count);
                }
            }

            fn image(&mut self, image: DecodedImage) {
                let control = self.control.take().unwrap_or_default();
                let (descriptor, local_color_table, indices) = image.into_parts();

                let palette = local_color_table.or_else(|| {
                    self.header
                        .as_ref()
                        .and_then(Header::global_color_table)
                        .cloned()
                });

                self.frames.push(Frame::new(
                    descriptor.left(),
                    descriptor.top(),
                    descriptor.width(),
                    descriptor.height(),
                    indices,
                    palette,
                    control.transparent_index(),
                    control.disposal(),
                    control.delay_cs(),
                ));
            }
        }

        let mut collector = Collector::default();
        parse(data, &mut collector)?;

        let header = collector
            .header
            .expect("parse emits a header before returning successfully");

        Ok(Self {
            header,
            loop_count: collector.loop_count,
            comments: collector.comments,
            frames: collector.frames,
        })
    }

    /// The header and logical screen descriptor.
    #[must_use]
    pub const fn header(&self) -> &Header {
        &self.header
    }

    /// The Netscape loop count, if the stream carried one (0 means forever).
    #[must_use]
    pub const fn loop_count(&self) -> Option<u16> {
        self.loop_count
    }

    /// Comment extension payloads, in stream order.
    #[must_use]
    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    /// The decoded frames, in stream order.
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }
}
