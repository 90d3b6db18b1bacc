//! # SVG Output
//!
//! Writes compiled path groups as an SVG document and reads such a
//! document back into its cell set.

use std::io::Cursor;

use config::constants::{MARK_FILL, SVG_NAMESPACE};
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use tracing::debug;

use crate::cells::UnitSquareSet;
use crate::error::{MarkerError, MarkerResult};
use crate::path::{group_cells, parse_path_data, PathGroup, PathGrouping};
use crate::rect::{get_attribute_opt, parse_marker_svg, ViewBox};

/// A marker ready to be written out.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledMarker {
    /// Marked cells.
    pub cells: UnitSquareSet,
    /// Path elements in output order.
    pub groups: Vec<PathGroup>,
    /// Output `viewBox`.
    pub view_box: ViewBox,
}

impl CompiledMarker {
    /// Serializes the marker as SVG text.
    pub fn to_svg(&self) -> MarkerResult<String> {
        write_svg(&self.groups, &self.view_box)
    }
}

/// Compiles rectangle artwork into path groups.
///
/// # Errors
///
/// Propagates every error from [`parse_marker_svg`]. Artwork with
/// rectangles but no marked cell compiles to zero groups.
///
/// # Example
///
/// ```rust
/// use marker_svg::path::PathGrouping;
/// use marker_svg::svg::compile_marker;
///
/// let svg = r#"<svg><rect x="0" y="0" width="2" height="2" fill="black"/></svg>"#;
/// let marker = compile_marker(svg, PathGrouping::default()).unwrap();
/// assert_eq!(marker.groups.len(), 1);
/// assert_eq!(marker.cells.len(), 4);
/// ```
pub fn compile_marker(svg: &str, grouping: PathGrouping) -> MarkerResult<CompiledMarker> {
    let document = parse_marker_svg(svg)?;
    let cells = UnitSquareSet::from_rects(&document.rects);
    let groups = group_cells(&cells, grouping);

    debug!(
        rects = document.rects.len(),
        cells = cells.len(),
        groups = groups.len(),
        "Compiled marker"
    );

    Ok(CompiledMarker {
        view_box: document.view_box_or_extent(),
        cells,
        groups,
    })
}

/// Writes path groups as an SVG document.
pub fn write_svg(groups: &[PathGroup], view_box: &ViewBox) -> MarkerResult<String> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    let view_box = view_box.to_string();
    let mut root = BytesStart::new("svg");
    root.push_attribute(("xmlns", SVG_NAMESPACE));
    root.push_attribute(("shape-rendering", "crispEdges"));
    root.push_attribute(("viewBox", view_box.as_str()));
    root.push_attribute(("fill", MARK_FILL));
    writer
        .write_event(Event::Start(root))
        .map_err(|e| MarkerError::xml(format!("failed to write svg element: {e}")))?;

    for group in groups {
        let data = group.data();
        let mut path = BytesStart::new("path");
        path.push_attribute(("d", data.as_str()));
        writer
            .write_event(Event::Empty(path))
            .map_err(|e| MarkerError::xml(format!("failed to write path {}: {e}", group.key)))?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("svg")))
        .map_err(|e| MarkerError::xml(format!("failed to close svg element: {e}")))?;

    String::from_utf8(writer.into_inner().into_inner()).map_err(MarkerError::xml)
}

/// Reads the cells drawn by the `<path>` elements of compiled SVG.
///
/// # Errors
///
/// Fails on malformed XML or path data outside the unit-cell form.
pub fn read_compiled_svg(svg: &str) -> MarkerResult<UnitSquareSet> {
    let mut reader = Reader::from_str(svg);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut cells = UnitSquareSet::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) if e.local_name().as_ref() == b"path" => {
                let data = get_attribute_opt(e, "d").unwrap_or_default();
                for (x, y) in parse_path_data(&data)? {
                    cells.insert(x, y);
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(MarkerError::xml(e)),
        }
        buf.clear();
    }

    Ok(cells)
}
