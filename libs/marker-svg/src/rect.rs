//! # Marker Rectangles
//!
//! Reads the `<rect>` elements of marker artwork into fixed-shape
//! records. Everything else in the document is ignored, apart from the
//! root `viewBox`, which is kept for the compiled output.

use config::constants::{BACKGROUND_FILL, MARK_FILL, MAX_MARKER_GRID};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{MarkerError, MarkerResult};

/// Paint of a marker rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerColor {
    /// Black: cells are added to the marker.
    Mark,
    /// White: cells are erased from the marker.
    Background,
}

impl MarkerColor {
    /// Maps an SVG `fill` value; anything but exactly `black` or `white`
    /// is `None`.
    pub fn from_fill(fill: &str) -> Option<Self> {
        match fill {
            MARK_FILL => Some(Self::Mark),
            BACKGROUND_FILL => Some(Self::Background),
            _ => None,
        }
    }
}

/// An axis-aligned rectangle on the integer marker grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerRect {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
    pub color: MarkerColor,
}

impl MarkerRect {
    /// Creates a rectangle.
    pub fn new(x: i64, y: i64, width: i64, height: i64, color: MarkerColor) -> Self {
        Self {
            x,
            y,
            width,
            height,
            color,
        }
    }

    /// Unit cells `(x, y)` covered by the rectangle, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        (self.y..self.bottom()).flat_map(move |y| (self.x..self.right()).map(move |x| (x, y)))
    }

    /// Exclusive right edge, saturating at `i64::MAX`.
    #[inline]
    pub fn right(&self) -> i64 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge, saturating at `i64::MAX`.
    #[inline]
    pub fn bottom(&self) -> i64 {
        self.y.saturating_add(self.height)
    }
}

/// SVG `viewBox`: `min_x min_y width height`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    /// Parses whitespace- or comma-separated `viewBox` text.
    ///
    /// # Errors
    ///
    /// Fails unless the text holds exactly four finite numbers with a
    /// non-negative width and height.
    pub fn parse(text: &str) -> MarkerResult<Self> {
        let values = text
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|part| !part.is_empty())
            .map(|part| part.parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| MarkerError::invalid_attribute("viewBox", text, e.to_string()))?;

        match values.as_slice() {
            &[min_x, min_y, width, height]
                if values.iter().all(|v| v.is_finite()) && width >= 0.0 && height >= 0.0 =>
            {
                Ok(Self {
                    min_x,
                    min_y,
                    width,
                    height,
                })
            }
            _ => Err(MarkerError::invalid_attribute(
                "viewBox",
                text,
                "expected four numbers with non-negative size",
            )),
        }
    }

    /// Smallest origin-anchored box around every rectangle.
    pub fn enclosing(rects: &[MarkerRect]) -> Self {
        let width = rects.iter().map(MarkerRect::right).max().unwrap_or(0).max(0);
        let height = rects.iter().map(MarkerRect::bottom).max().unwrap_or(0).max(0);
        Self {
            min_x: 0.0,
            min_y: 0.0,
            width: width as f64,
            height: height as f64,
        }
    }
}

impl std::fmt::Display for ViewBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} {}", self.min_x, self.min_y, self.width, self.height)
    }
}

/// Rectangles of a marker document in paint order.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerDocument {
    pub rects: Vec<MarkerRect>,
    /// Root `viewBox`, when the document declares one.
    pub view_box: Option<ViewBox>,
}

impl MarkerDocument {
    /// Declared `viewBox`, or one enclosing every rectangle.
    pub fn view_box_or_extent(&self) -> ViewBox {
        self.view_box.unwrap_or_else(|| ViewBox::enclosing(&self.rects))
    }
}

/// Reads marker rectangles from SVG text.
///
/// # Errors
///
/// Returns [`MarkerError::Xml`] for malformed XML, attribute errors for
/// rectangles with missing or unparsable geometry, and
/// [`MarkerError::EmptyInput`] when there is no `<rect>` at all.
///
/// # Example
///
/// ```rust
/// use marker_svg::rect::{parse_marker_svg, MarkerColor};
///
/// let svg = r#"<svg viewBox="0 0 6 6">
///     <rect x="0" y="0" width="6" height="6" fill="black"/>
///     <rect x="1" y="1" width="1" height="1" fill="white"/>
/// </svg>"#;
/// let doc = parse_marker_svg(svg).unwrap();
/// assert_eq!(doc.rects.len(), 2);
/// assert_eq!(doc.rects[1].color, MarkerColor::Background);
/// ```
pub fn parse_marker_svg(svg: &str) -> MarkerResult<MarkerDocument> {
    let mut reader = Reader::from_str(svg);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut rects = Vec::new();
    let mut view_box = None;
    let mut seen_rect = false;
    let mut seen_root = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"svg" if !seen_root => {
                    seen_root = true;
                    if let Some(text) = get_attribute_opt(e, "viewBox") {
                        view_box = Some(ViewBox::parse(&text)?);
                    }
                }
                b"rect" => {
                    seen_rect = true;
                    if let Some(rect) = parse_rect(e)? {
                        rects.push(rect);
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(MarkerError::xml(e)),
        }
        buf.clear();
    }

    if !seen_rect {
        return Err(MarkerError::EmptyInput);
    }
    debug!(rects = rects.len(), "Read marker rectangles");
    Ok(MarkerDocument { rects, view_box })
}

/// Reads one `<rect>`; `None` when its fill is neither black nor white.
fn parse_rect(e: &BytesStart) -> MarkerResult<Option<MarkerRect>> {
    let fill = get_attribute_opt(e, "fill");
    let Some(color) = fill.as_deref().and_then(MarkerColor::from_fill) else {
        debug!(fill = ?fill, "Ignoring rect with unsupported fill");
        return Ok(None);
    };

    let x = optional_coordinate(e, "x")?;
    let y = optional_coordinate(e, "y")?;
    let width = required_length(e, "width")?;
    let height = required_length(e, "height")?;

    Ok(Some(MarkerRect::new(x, y, width, height, color)))
}

fn optional_coordinate(e: &BytesStart, name: &'static str) -> MarkerResult<i64> {
    get_attribute_opt(e, name).map_or(Ok(0), |value| parse_integer(name, &value))
}

fn required_length(e: &BytesStart, name: &'static str) -> MarkerResult<i64> {
    let value = get_attribute_opt(e, name).ok_or(MarkerError::MissingAttribute {
        element: "rect",
        attribute: name,
    })?;
    let length = parse_integer(name, &value)?;
    if length < 0 {
        return Err(MarkerError::invalid_attribute(name, value, "negative length"));
    }
    Ok(length)
}

/// Parses a number, truncates it toward zero and bounds its magnitude by
/// [`MAX_MARKER_GRID`].
fn parse_integer(name: &'static str, value: &str) -> MarkerResult<i64> {
    let number: f64 = value
        .trim()
        .parse()
        .map_err(|_| MarkerError::invalid_attribute(name, value, "not a number"))?;
    if !number.is_finite() {
        return Err(MarkerError::invalid_attribute(name, value, "not finite"));
    }
    let number = number.trunc();
    if number.abs() > MAX_MARKER_GRID as f64 {
        return Err(MarkerError::invalid_attribute(
            name,
            value,
            format!("exceeds marker grid limit {MAX_MARKER_GRID}"),
        ));
    }
    Ok(number as i64)
}

/// Get an optional attribute value.
pub(crate) fn get_attribute_opt(e: &BytesStart, name: &str) -> Option<String> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == name.as_bytes() {
            return String::from_utf8(attr.value.to_vec()).ok();
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_rects_in_order() {
        let svg = r#"<svg><rect x="1" y="2" width="3" height="4" fill="black"/><g><rect x="0" y="0" width="1" height="1" fill="white"></rect></g></svg>"#;
        let doc = parse_marker_svg(svg).unwrap();
        assert_eq!(
            doc.rects,
            vec![
                MarkerRect::new(1, 2, 3, 4, MarkerColor::Mark),
                MarkerRect::new(0, 0, 1, 1, MarkerColor::Background),
            ]
        );
        assert!(doc.view_box.is_none());
    }

    #[test]
    fn test_missing_position_defaults_to_zero() {
        let doc = parse_marker_svg(r#"<svg><rect width="2" height="2" fill="black"/></svg>"#).unwrap();
        assert_eq!(doc.rects[0], MarkerRect::new(0, 0, 2, 2, MarkerColor::Mark));
    }

    #[test]
    fn test_float_lengths_truncate() {
        let doc = parse_marker_svg(r#"<svg><rect x="1.9" y="0" width="2.7" height="1.0" fill="black"/></svg>"#).unwrap();
        assert_eq!(doc.rects[0], MarkerRect::new(1, 0, 2, 1, MarkerColor::Mark));
    }

    #[test]
    fn test_other_fills_are_ignored() {
        let svg = r#"<svg><rect width="2" height="2" fill="red"/><rect width="2" height="2"/></svg>"#;
        let doc = parse_marker_svg(svg).unwrap();
        assert!(doc.rects.is_empty());
    }

    #[test]
    fn test_fill_match_is_exact() {
        let svg = r#"<svg><rect width="2" height="2" fill="BLACK"/><rect width="2" height="2" fill=" white"/><rect width="2" height="2" fill="Black"/></svg>"#;
        let doc = parse_marker_svg(svg).unwrap();
        assert!(doc.rects.is_empty());
        assert_eq!(MarkerColor::from_fill("black"), Some(MarkerColor::Mark));
        assert_eq!(MarkerColor::from_fill("white"), Some(MarkerColor::Background));
    }

    #[test]
    fn test_huge_geometry_is_rejected() {
        let svg = r#"<svg viewBox="0 0 6 6"><rect x="9e18" y="0" width="9e18" height="1" fill="white"/></svg>"#;
        let err = parse_marker_svg(svg).unwrap_err();
        assert!(matches!(err, MarkerError::InvalidAttribute { attribute: "x", .. }));

        let err = parse_marker_svg(r#"<svg><rect width="1e9" height="1" fill="black"/></svg>"#).unwrap_err();
        assert!(matches!(err, MarkerError::InvalidAttribute { attribute: "width", .. }));

        let err = parse_marker_svg(r#"<svg><rect y="-5000" width="1" height="1" fill="black"/></svg>"#).unwrap_err();
        assert!(matches!(err, MarkerError::InvalidAttribute { attribute: "y", .. }));
    }

    #[test]
    fn test_grid_limit_is_inclusive() {
        let svg = format!(r#"<svg><rect x="{0}" y="-{0}" width="{0}" height="1" fill="black"/></svg>"#, MAX_MARKER_GRID);
        let doc = parse_marker_svg(&svg).unwrap();
        assert_eq!(doc.rects[0].right(), 2 * MAX_MARKER_GRID);
    }

    #[test]
    fn test_edges_saturate_instead_of_overflowing() {
        let rect = MarkerRect::new(i64::MAX - 1, i64::MAX, 5, 5, MarkerColor::Mark);
        assert_eq!(rect.right(), i64::MAX);
        assert_eq!(rect.bottom(), i64::MAX);
        assert_eq!(rect.cells().count(), 0);
    }

    #[test]
    fn test_missing_width_is_an_error() {
        let err = parse_marker_svg(r#"<svg><rect height="2" fill="black"/></svg>"#).unwrap_err();
        assert_eq!(
            err,
            MarkerError::MissingAttribute {
                element: "rect",
                attribute: "width"
            }
        );
    }

    #[test]
    fn test_bad_numbers_are_errors() {
        let err = parse_marker_svg(r#"<svg><rect x="one" width="2" height="2" fill="black"/></svg>"#).unwrap_err();
        assert!(matches!(err, MarkerError::InvalidAttribute { attribute: "x", .. }));

        let err = parse_marker_svg(r#"<svg><rect width="-2" height="2" fill="black"/></svg>"#).unwrap_err();
        assert!(matches!(err, MarkerError::InvalidAttribute { attribute: "width", .. }));
    }

    #[test]
    fn test_no_rects_is_empty_input() {
        assert_eq!(parse_marker_svg("<svg></svg>").unwrap_err(), MarkerError::EmptyInput);
    }

    #[test]
    fn test_malformed_xml() {
        let err = parse_marker_svg("<svg><rect width='1' height='1' fill='black'></svg>").unwrap_err();
        assert!(matches!(err, MarkerError::Xml(_)));
    }

    #[test]
    fn test_view_box_parsing() {
        let doc = parse_marker_svg(r#"<svg viewBox="0,0 6 6"><rect width="1" height="1" fill="black"/></svg>"#).unwrap();
        assert_eq!(doc.view_box.unwrap().to_string(), "0 0 6 6");
        assert!(ViewBox::parse("0 0 6").is_err());
        assert!(ViewBox::parse("0 0 -1 6").is_err());
    }

    #[test]
    fn test_enclosing_view_box() {
        let rects = [
            MarkerRect::new(0, 0, 4, 2, MarkerColor::Mark),
            MarkerRect::new(3, 1, 2, 5, MarkerColor::Background),
        ];
        let vb = ViewBox::enclosing(&rects);
        assert_eq!((vb.width, vb.height), (5.0, 6.0));
    }

    #[test]
    fn test_rect_cells_row_major() {
        let cells: Vec<_> = MarkerRect::new(1, 1, 2, 2, MarkerColor::Mark).cells().collect();
        assert_eq!(cells, vec![(1, 1), (2, 1), (1, 2), (2, 2)]);
    }
}
