//! CVAT for images XML format support.
//!
//! Reads the label vocabulary, the first image record and its polygon
//! annotations from a CVAT export.
//!
//! # Format Structure
//!
//! ```xml
//! <annotations>
//!   <version>1.1</version>
//!   <meta>
//!     <task>
//!       <labels>
//!         <label>
//!           <name>1</name>
//!           <color>#fa3253</color>
//!           <attributes/>
//!         </label>
//!       </labels>
//!     </task>
//!   </meta>
//!   <image id="0" name="liver.png" width="512" height="256">
//!     <polyline label="1" occluded="0" points="10.5,20.0;30.0,40.25;5.0,40.0"/>
//!   </image>
//! </annotations>
//! ```
//!
//! Label definitions are collected from anywhere in the document. Only the
//! first `<image>` is read; its direct `<polyline>` children become
//! annotations in document order. Other shapes, `<polygon>` included, are
//! ignored.

use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::color_utils::{parse_hex_color, to_hex_color};
use crate::format::error::FormatError;
use crate::model::{Annotation, ImageDescriptor, LabelVocabulary, MAX_IMAGE_PIXELS, Point};

/// Everything the rasterizer needs from one annotation document.
#[derive(Debug, Clone, PartialEq)]
pub struct CvatDocument {
    /// Declared labels and their colors.
    pub vocabulary: LabelVocabulary,
    /// The annotated image.
    pub image: ImageDescriptor,
    /// Annotations of the image, in document order.
    pub annotations: Vec<Annotation>,
}

impl CvatDocument {
    /// Read and parse a document from disk.
    pub fn from_path(path: &Path) -> Result<Self, FormatError> {
        log::info!("Parsing XML file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a document from XML text.
    pub fn parse(xml: &str) -> Result<Self, FormatError> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        let mut parser = CvatParser::default();
        let mut depth = 0usize;

        loop {
            match reader.read_event()? {
                Event::Start(ref e) => {
                    depth += 1;
                    parser.open(e, depth)?;
                }
                Event::Empty(ref e) => {
                    parser.open(e, depth + 1)?;
                    parser.close(e.name().as_ref(), depth + 1)?;
                }
                Event::End(ref e) => {
                    parser.close(e.name().as_ref(), depth)?;
                    depth = depth.saturating_sub(1);
                }
                Event::Text(ref e) => {
                    let text = e.unescape()?;
                    parser.text(&text);
                }
                Event::CData(ref e) => {
                    let text = String::from_utf8_lossy(e).into_owned();
                    parser.text(&text);
                }
                Event::Eof => break,
                _ => {}
            }
        }

        parser.finish()
    }
}

/// Which direct child of `<label>` is currently open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LabelField {
    Name,
    Color,
}

/// A `<label>` element being read.
#[derive(Debug, Default)]
struct LabelCapture {
    depth: usize,
    field: Option<LabelField>,
    name: Option<String>,
    color: Option<String>,
}

/// Streaming state while walking the XML events.
#[derive(Debug, Default)]
struct CvatParser {
    vocabulary: LabelVocabulary,
    image: Option<ImageDescriptor>,
    annotations: Vec<Annotation>,
    label: Option<LabelCapture>,
    /// Depth of the first `<image>` while it is open.
    image_depth: Option<usize>,
}

impl CvatParser {
    fn open(&mut self, e: &BytesStart<'_>, depth: usize) -> Result<(), FormatError> {
        let name = e.name();
        let name = name.as_ref();

        if let Some(capture) = self.label.as_mut() {
            if depth == capture.depth + 1 {
                capture.field = match name {
                    b"name" => Some(LabelField::Name),
                    b"color" => Some(LabelField::Color),
                    _ => None,
                };
            }
            return Ok(());
        }

        match name {
            b"label" => {
                self.label = Some(LabelCapture {
                    depth,
                    ..LabelCapture::default()
                });
            }
            b"image" if self.image.is_none() => {
                self.image = Some(read_image(e)?);
                self.image_depth = Some(depth);
            }
            b"polyline" if self.image_depth.is_some_and(|d| depth == d + 1) => {
                let index = self.annotations.len();
                self.annotations.push(read_annotation(e, index)?);
            }
            _ => {}
        }

        Ok(())
    }

    fn close(&mut self, name: &[u8], depth: usize) -> Result<(), FormatError> {
        if let Some(capture) = self.label.as_mut() {
            if depth == capture.depth + 1 {
                capture.field = None;
            } else if depth == capture.depth && name == b"label" {
                if let Some(capture) = self.label.take() {
                    self.finish_label(capture)?;
                }
            }
            return Ok(());
        }

        if name == b"image" && self.image_depth == Some(depth) {
            self.image_depth = None;
        }
        Ok(())
    }

    fn text(&mut self, text: &str) {
        let Some(capture) = self.label.as_mut() else {
            return;
        };
        let slot = match capture.field {
            Some(LabelField::Name) => &mut capture.name,
            Some(LabelField::Color) => &mut capture.color,
            None => return,
        };
        slot.get_or_insert_with(String::new).push_str(text);
    }

    fn finish_label(&mut self, capture: LabelCapture) -> Result<(), FormatError> {
        let name = capture
            .name
            .filter(|n| !n.is_empty())
            .ok_or_else(|| FormatError::missing_field("label/name"))?;
        let value = capture
            .color
            .ok_or_else(|| FormatError::missing_field(format!("label '{}'/color", name)))?;
        let color = parse_hex_color(&value).ok_or_else(|| FormatError::InvalidColor {
            label: name.clone(),
            value: value.clone(),
        })?;

        log::debug!("Label '{}' -> {}", name, to_hex_color(color));
        self.vocabulary.insert(name, color);
        Ok(())
    }

    fn finish(self) -> Result<CvatDocument, FormatError> {
        let image = self.image.ok_or(FormatError::MissingImage)?;
        Ok(CvatDocument {
            vocabulary: self.vocabulary,
            image,
            annotations: self.annotations,
        })
    }
}

/// Read an attribute value, unescaped.
fn attribute(e: &BytesStart<'_>, key: &str) -> Result<Option<String>, FormatError> {
    match e.try_get_attribute(key)? {
        Some(attr) => Ok(Some(attr.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}

fn required_attribute(
    e: &BytesStart<'_>,
    element: &str,
    key: &str,
) -> Result<String, FormatError> {
    attribute(e, key)?.ok_or_else(|| FormatError::missing_field(format!("{}/@{}", element, key)))
}

fn read_dimension(e: &BytesStart<'_>, key: &str) -> Result<u32, FormatError> {
    let raw = required_attribute(e, "image", key)?;
    let value: u32 = raw.trim().parse().map_err(|_| {
        FormatError::invalid_format(format!("image {} '{}' is not an integer", key, raw))
    })?;
    if value == 0 {
        return Err(FormatError::invalid_format(format!("image {} must be positive", key)));
    }
    Ok(value)
}

fn read_image(e: &BytesStart<'_>) -> Result<ImageDescriptor, FormatError> {
    let width = read_dimension(e, "width")?;
    let height = read_dimension(e, "height")?;
    let name = attribute(e, "name")?.unwrap_or_default();
    let image = ImageDescriptor::new(name, width, height);
    if image.pixel_count() > MAX_IMAGE_PIXELS {
        return Err(FormatError::invalid_format(format!(
            "image {}x{} exceeds {} pixels",
            width, height, MAX_IMAGE_PIXELS
        )));
    }
    Ok(image)
}

fn read_annotation(e: &BytesStart<'_>, index: usize) -> Result<Annotation, FormatError> {
    let label = required_attribute(e, "polyline", "label")?;
    let points = parse_points(&required_attribute(e, "polyline", "points")?)?;
    Ok(Annotation::new(index, label, points))
}

/// Parse a CVAT points list: `"x1,y1;x2,y2;..."`.
///
/// Empty groups (from doubled or trailing separators) are skipped.
pub fn parse_points(raw: &str) -> Result<Vec<Point>, FormatError> {
    raw.split(';')
        .map(str::trim)
        .filter(|group| !group.is_empty())
        .map(parse_vertex)
        .collect()
}

fn parse_vertex(group: &str) -> Result<Point, FormatError> {
    let mut parts = group.split(',');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(x), Some(y), None) => Ok(Point::new(
            parse_coordinate(x, group)?,
            parse_coordinate(y, group)?,
        )),
        _ => Err(FormatError::invalid_coordinates(format!(
            "expected 'x,y', found '{}'",
            group
        ))),
    }
}

fn parse_coordinate(text: &str, group: &str) -> Result<f64, FormatError> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| {
            FormatError::invalid_coordinates(format!("'{}' in vertex '{}' is not a number", text, group))
        })
}
