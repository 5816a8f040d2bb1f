use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

use crate::error::ParseError;
use crate::pipeline::stats;
use crate::types::track::{TrackStatistics, Waypoint};

pub const GPX_NAMESPACE: &[u8] = b"http://www.topografix.com/GPX/1/1";

/// Parses a GPX document and computes its statistics.
pub fn parse_track(bytes: &[u8]) -> Result<TrackStatistics, ParseError> {
    let waypoints = parse_waypoints(bytes)?;
    Ok(stats::compute_statistics(&waypoints))
}

/// Collects every GPX 1.1 `trkpt` in document order, at any depth.
///
/// Track segments are not tracked: points from all `trk`/`trkseg` elements
/// end up in one flat sequence. The whole document is checked for
/// well-formedness, so an error after the last track point still fails.
pub fn parse_waypoints(bytes: &[u8]) -> Result<Vec<Waypoint>, ParseError> {
    let mut reader = NsReader::from_reader(bytes);

    let mut waypoints = Vec::new();
    let mut open: Vec<String> = Vec::new();
    let mut seen_root = false;

    loop {
        let position = reader.buffer_position();
        let (ns, event) = reader
            .read_resolved_event()
            .map_err(|e| xml_error(position, e.to_string()))?;

        let in_gpx_namespace = match ns {
            ResolveResult::Bound(Namespace(uri)) => uri == GPX_NAMESPACE,
            ResolveResult::Unbound => false,
            ResolveResult::Unknown(prefix) => {
                return Err(unbound_prefix(position, &prefix));
            }
        };

        match event {
            Event::Start(e) => {
                enter_element(&mut seen_root, &open, position)?;
                check_attributes(&reader, &e, position)?;
                if in_gpx_namespace && is_trkpt(&open, &e) {
                    waypoints.push(read_waypoint(&e, waypoints.len(), position)?);
                }
                open.push(String::from_utf8_lossy(e.name().as_ref()).into_owned());
            }
            Event::Empty(e) => {
                enter_element(&mut seen_root, &open, position)?;
                check_attributes(&reader, &e, position)?;
                if in_gpx_namespace && is_trkpt(&open, &e) {
                    waypoints.push(read_waypoint(&e, waypoints.len(), position)?);
                }
            }
            Event::End(e) => {
                if open.pop().is_none() {
                    return Err(xml_error(
                        position,
                        format!(
                            "unexpected closing tag </{}>",
                            String::from_utf8_lossy(e.name().as_ref())
                        ),
                    ));
                }
            }
            Event::Text(t) => {
                let text = t
                    .unescape()
                    .map_err(|e| xml_error(position, e.to_string()))?;
                if open.is_empty() && !text.trim().is_empty() {
                    return Err(xml_error(
                        position,
                        "text outside the document element".to_string(),
                    ));
                }
            }
            Event::CData(_) if open.is_empty() => {
                return Err(xml_error(
                    position,
                    "CDATA outside the document element".to_string(),
                ));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(name) = open.pop() {
        return Err(ParseError::UnclosedElement(name));
    }
    if !seen_root {
        return Err(ParseError::NoRootElement);
    }

    tracing::debug!("Parsed GPX document with {} track points", waypoints.len());

    Ok(waypoints)
}

fn enter_element(seen_root: &mut bool, open: &[String], position: usize) -> Result<(), ParseError> {
    if open.is_empty() {
        if *seen_root {
            return Err(xml_error(position, "junk after document element".to_string()));
        }
        *seen_root = true;
    }
    Ok(())
}

/// Only descendants of the root count; a bare `trkpt` document has no points.
fn is_trkpt(open: &[String], e: &BytesStart) -> bool {
    !open.is_empty() && e.local_name().as_ref() == b"trkpt"
}

/// Rejects malformed attributes on any element, not just track points.
fn check_attributes(
    reader: &NsReader<&[u8]>,
    e: &BytesStart,
    position: usize,
) -> Result<(), ParseError> {
    for attr in e.attributes() {
        let attr = attr.map_err(|e| xml_error(position, e.to_string()))?;

        if attr.value.contains(&b'<') {
            return Err(xml_error(
                position,
                format!(
                    "'<' in value of attribute '{}'",
                    String::from_utf8_lossy(attr.key.as_ref())
                ),
            ));
        }
        attr.unescape_value()
            .map_err(|e| xml_error(position, e.to_string()))?;

        // xmlns declarations and the reserved xml prefix are always bound
        if attr.key.as_namespace_binding().is_some()
            || attr.key.prefix().is_some_and(|p| p.as_ref() == b"xml")
        {
            continue;
        }
        if let (ResolveResult::Unknown(prefix), _) = reader.resolve_attribute(attr.key) {
            return Err(unbound_prefix(position, &prefix));
        }
    }
    Ok(())
}

fn unbound_prefix(position: usize, prefix: &[u8]) -> ParseError {
    xml_error(
        position,
        format!(
            "unbound namespace prefix '{}'",
            String::from_utf8_lossy(prefix)
        ),
    )
}

fn read_waypoint(e: &BytesStart, index: usize, position: usize) -> Result<Waypoint, ParseError> {
    let mut lat = None;
    let mut lon = None;

    for attr in e.attributes() {
        let attr = attr.map_err(|e| xml_error(position, e.to_string()))?;
        let slot = match attr.key.as_ref() {
            b"lat" => &mut lat,
            b"lon" => &mut lon,
            _ => continue,
        };
        let value = attr
            .unescape_value()
            .map_err(|e| xml_error(position, e.to_string()))?;
        *slot = Some(value.into_owned());
    }

    let lat = coordinate(lat, index, "lat", 90.0)?;
    let lon = coordinate(lon, index, "lon", 180.0)?;

    Ok(Waypoint::new(lat, lon))
}

fn coordinate(
    raw: Option<String>,
    index: usize,
    attribute: &'static str,
    limit: f64,
) -> Result<f64, ParseError> {
    let raw = raw.ok_or(ParseError::MissingAttribute { index, attribute })?;

    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ParseError::InvalidCoordinate {
            index,
            attribute,
            value: raw.clone(),
        })?;

    if value.is_nan() {
        return Err(ParseError::InvalidCoordinate {
            index,
            attribute,
            value: raw,
        });
    }
    if !(-limit..=limit).contains(&value) {
        return Err(ParseError::OutOfRange {
            index,
            attribute,
            value,
        });
    }

    Ok(value)
}

fn xml_error(position: usize, message: String) -> ParseError {
    ParseError::Xml { position, message }
}
