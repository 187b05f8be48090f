//! # SVG Parser
//!
//! Reads the parts of an SVG document the composer needs: the declared size,
//! the viewBox, the root fill, and every `<path>` element at any depth. Each
//! path is measured as it is read, so a corrupt `d` attribute is reported
//! here with its index rather than surfacing later as a wrong layout.
//!
//! Everything else (groups, transforms, strokes, other shapes) is ignored.

use log::debug;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::IconError;
use crate::geometry::BBox;
use crate::number::fmt_number;
use crate::path::path_bbox;

/// Fill used when neither the path nor the root sets a usable one.
pub const DEFAULT_FILL: &str = "#000000";

/// A parsed SVG viewBox.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

/// One `<path>` element.
#[derive(Debug, Clone, PartialEq)]
pub struct PathRecord {
    /// The raw `d` attribute.
    pub data: String,
    pub fill: String,
    /// `None` when the path draws nothing.
    pub bbox: Option<BBox>,
}

/// An icon ready for layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedIcon {
    pub declared_width: Option<f64>,
    pub declared_height: Option<f64>,
    pub view_box: ViewBox,
    pub paths: Vec<PathRecord>,
}

impl ParsedIcon {
    /// Translation that moves the viewBox origin to (0, 0).
    pub fn offset(&self) -> (f64, f64) {
        (-self.view_box.min_x, -self.view_box.min_y)
    }

    /// Union of the path boxes, in viewport-local coordinates. Falls back to
    /// the whole viewport when no path draws anything.
    pub fn content_box(&self) -> BBox {
        let (dx, dy) = self.offset();
        self.paths
            .iter()
            .fold(None, |acc, p| crate::geometry::bbox::union(acc, p.bbox))
            .map(|b| b.translate(dx, dy))
            .unwrap_or_else(|| BBox::from_size(self.view_box.width, self.view_box.height))
    }

    /// Physical width: the declared width, or the viewport width when the
    /// document declares none.
    pub fn physical_width(&self) -> f64 {
        self.declared_width.unwrap_or(self.view_box.width)
    }

    pub fn physical_height(&self) -> f64 {
        self.declared_height.unwrap_or(self.view_box.height)
    }
}

/// Parse a viewBox string like "0 0 100 100" or "0,0,24,24".
pub fn parse_view_box(s: &str) -> Option<ViewBox> {
    let parts: Vec<f64> = s
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .map(|p| p.parse::<f64>().ok())
        .collect::<Option<Vec<f64>>>()?;
    if parts.len() == 4 {
        Some(ViewBox {
            min_x: parts[0],
            min_y: parts[1],
            width: parts[2],
            height: parts[3],
        })
    } else {
        None
    }
}

/// Reads the leading number of a length attribute: `"24px"` → 24.
pub fn parse_length(s: &str) -> Option<f64> {
    let s = s.trim();
    let bytes = s.as_bytes();
    let mut end = 0;
    let mut seen_dot = false;
    if end < bytes.len() && matches!(bytes[end], b'+' | b'-') {
        end += 1;
    }
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => end += 1,
            b'.' if !seen_dot => {
                seen_dot = true;
                end += 1;
            }
            _ => break,
        }
    }
    s[..end].parse::<f64>().ok()
}

fn resolve_view_box(
    view_box: Option<&str>,
    width: Option<f64>,
    height: Option<f64>,
) -> Result<ViewBox, IconError> {
    let vb = match view_box {
        Some(s) => parse_view_box(s).ok_or_else(|| {
            IconError::InvalidViewBox(format!("'{}' is not four numbers", s))
        })?,
        None => match (width, height) {
            (Some(width), Some(height)) => ViewBox {
                min_x: 0.0,
                min_y: 0.0,
                width,
                height,
            },
            _ => {
                return Err(IconError::InvalidViewBox(
                    "missing viewBox and width/height".to_string(),
                ))
            }
        },
    };

    if vb.width > 0.0 && vb.height > 0.0 {
        Ok(vb)
    } else {
        Err(IconError::InvalidViewBox(format!(
            "viewport size {}x{} is not positive",
            fmt_number(vb.width),
            fmt_number(vb.height)
        )))
    }
}

fn resolve_fill(own: Option<String>, root: Option<&str>) -> String {
    let fill = own
        .filter(|f| !f.is_empty())
        .or_else(|| root.map(str::to_string))
        .unwrap_or_else(|| DEFAULT_FILL.to_string());
    if fill == "none" || fill == "currentColor" {
        DEFAULT_FILL.to_string()
    } else {
        fill
    }
}

/// Parse SVG XML content into a `ParsedIcon`.
pub fn parse_icon(content: &str) -> Result<ParsedIcon, IconError> {
    let mut reader = Reader::from_str(content);
    let mut buf = Vec::new();

    let mut root: Option<(Option<f64>, Option<f64>, ViewBox, Option<String>)> = None;
    let mut paths = Vec::new();
    let mut path_index = 0;

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| IconError::Xml(e.to_string()))?;
        let e = match &event {
            Event::Start(e) | Event::Empty(e) => e,
            Event::Eof => break,
            _ => {
                buf.clear();
                continue;
            }
        };

        if root.is_none() {
            // The first element is the root, whatever its name.
            let width = get_attr(e, "width").as_deref().and_then(parse_length);
            let height = get_attr(e, "height").as_deref().and_then(parse_length);
            let view_box = resolve_view_box(get_attr(e, "viewBox").as_deref(), width, height)?;
            let fill = get_attr(e, "fill").filter(|f| !f.is_empty());
            root = Some((width, height, view_box, fill));
        } else if e.local_name().as_ref() == b"path" {
            let index = path_index;
            path_index += 1;

            let data = get_attr(e, "d").unwrap_or_default();
            if !data.trim().is_empty() {
                let bbox = path_bbox(&data).map_err(|source| IconError::Path { index, source })?;
                let root_fill = root.as_ref().and_then(|r| r.3.as_deref());
                let fill = resolve_fill(get_attr(e, "fill"), root_fill);
                paths.push(PathRecord { data, fill, bbox });
            }
        }
        buf.clear();
    }

    let (declared_width, declared_height, view_box, _) = root.ok_or_else(|| {
        IconError::Xml("document has no root element".to_string())
    })?;
    if paths.is_empty() {
        return Err(IconError::NoPathElements);
    }

    debug!(
        "Parsed icon: viewBox=({} {} {} {}), paths={}",
        fmt_number(view_box.min_x),
        fmt_number(view_box.min_y),
        fmt_number(view_box.width),
        fmt_number(view_box.height),
        paths.len()
    );

    Ok(ParsedIcon {
        declared_width,
        declared_height,
        view_box,
        paths,
    })
}

/// Helper to get an attribute value from a quick-xml BytesStart.
fn get_attr(e: &BytesStart, name: &str) -> Option<String> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == name.as_bytes() {
            return String::from_utf8(attr.value.to_vec()).ok();
        }
    }
    None
}
