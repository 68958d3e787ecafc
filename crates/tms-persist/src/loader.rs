//! Network file parser.
//!
//! # Format
//!
//! ```text
//! ; lines starting with ';' are comments, blank lines are ignored
//! 4                 ← number of intersections N
//! 5                 ← number of routes M
//! 1                 ← default yellow time
//! W                 ← N intersection lines: id[:duration:order[:yellow]]
//! X:3:W,Y
//! Y
//! Z:4:X,Y:2         ← Z overrides the default yellow time with 2
//! W:X:40            ← M route lines: from:to:defaultSpeed[:signSpeed]
//! Y:X:60
//! X:Y:60
//! X:Z:80:70
//! Y:Z:50
//! ```
//!
//! Numeric fields are plain ASCII digits.  Loaded routes start with zero
//! congestion.
//!
//! Light orders list origin ids and must be a permutation of the routes that
//! end at that intersection.  Because routes are declared after
//! intersections, lights are installed only once every route line has been
//! read.

use std::io::Read;
use std::path::Path;

use tms_network::Network;
use tms_network::lights::ORDER_SEPARATOR;
use tms_network::route::FIELD_SEPARATOR;

use crate::{PersistError, PersistResult};

/// Prefix marking a comment line.
pub const COMMENT_PREFIX: char = ';';

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a network from a file.
///
/// # Errors
///
/// - [`PersistError::FileUnavailable`] if the file cannot be opened or read.
/// - [`PersistError::InvalidNetwork`] if its contents are malformed.
pub fn load_network(path: &Path) -> PersistResult<Network> {
    let file = std::fs::File::open(path).map_err(|source| PersistError::FileUnavailable {
        path: path.to_owned(),
        source,
    })?;
    load_network_reader(file).map_err(|e| match e {
        PersistError::Io(source) => PersistError::FileUnavailable { path: path.to_owned(), source },
        other => other,
    })
}

/// Like [`load_network`] but accepts any `Read` source.
pub fn load_network_reader<R: Read>(mut reader: R) -> PersistResult<Network> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_network(&text)
}

/// Parse and validate a network from its textual form.
pub fn parse_network(text: &str) -> PersistResult<Network> {
    let mut lines = Records::new(text);

    // ── Header ────────────────────────────────────────────────────────────
    let (line, raw) = lines.require("intersection count")?;
    let intersection_count = parse_number::<usize>(line, "intersection count", raw)?;
    let (line, raw) = lines.require("route count")?;
    let route_count = parse_number::<usize>(line, "route count", raw)?;
    let (line, raw) = lines.require("yellow time")?;
    let yellow_time = parse_number::<u32>(line, "yellow time", raw)?;

    let mut network = Network::new(yellow_time);

    // ── Intersections ─────────────────────────────────────────────────────
    let mut pending_lights = Vec::new();
    for _ in 0..intersection_count {
        let (line, raw) = lines.require("intersection declaration")?;
        let decl = parse_intersection(line, raw)?;
        network
            .add_intersection(decl.id)
            .map_err(|e| PersistError::invalid(line, e))?;
        if let Some(lights) = decl.lights {
            pending_lights.push((line, decl.id, lights));
        }
    }

    // ── Routes ────────────────────────────────────────────────────────────
    for _ in 0..route_count {
        let (line, raw) = lines.require("route declaration")?;
        add_route(&mut network, line, raw)?;
    }

    if let Some((line, _)) = lines.next() {
        return Err(PersistError::invalid(
            line,
            format!(
                "unexpected extra line: header declares {intersection_count} intersections \
                 and {route_count} routes"
            ),
        ));
    }

    // ── Lights (need the full route set) ──────────────────────────────────
    for (line, id, lights) in pending_lights {
        let result = match lights.yellow_time {
            Some(yellow) => network.add_lights_with_yellow(id, yellow, lights.duration, &lights.order),
            None => network.add_lights(id, lights.duration, &lights.order),
        };
        result.map_err(|e| PersistError::invalid(line, e))?;
    }

    log::debug!(
        "parsed network: {} intersections, {} routes, yellow time {}",
        network.len(),
        network.route_count(),
        network.yellow_time()
    );
    Ok(network)
}

// ── Line records ──────────────────────────────────────────────────────────────

/// Iterator over meaningful `(line_number, trimmed_text)` pairs.
struct Records<'a> {
    inner:     std::iter::Enumerate<std::str::Lines<'a>>,
    last_line: usize,
}

impl<'a> Records<'a> {
    fn new(text: &'a str) -> Self {
        Self { inner: text.lines().enumerate(), last_line: 0 }
    }

    fn require(&mut self, what: &str) -> PersistResult<(usize, &'a str)> {
        self.next().ok_or_else(|| {
            PersistError::invalid(self.last_line + 1, format!("unexpected end of input: expected {what}"))
        })
    }
}

impl<'a> Iterator for Records<'a> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        for (i, raw) in self.inner.by_ref() {
            self.last_line = i + 1;
            let text = raw.trim();
            if text.is_empty() || text.starts_with(COMMENT_PREFIX) {
                continue;
            }
            return Some((i + 1, text));
        }
        None
    }
}

// ── Field parsers ─────────────────────────────────────────────────────────────

struct LightsDecl<'a> {
    duration:    u32,
    order:       Vec<&'a str>,
    yellow_time: Option<u32>,
}

struct IntersectionDecl<'a> {
    id:     &'a str,
    lights: Option<LightsDecl<'a>>,
}

fn parse_intersection(line: usize, raw: &str) -> PersistResult<IntersectionDecl<'_>> {
    let fields: Vec<&str> = raw.split(FIELD_SEPARATOR).collect();
    let lights = match fields.as_slice() {
        [_] => None,
        [_, duration, order] | [_, duration, order, _] => Some(LightsDecl {
            duration:    parse_number(line, "light duration", duration)?,
            order:       order.split(ORDER_SEPARATOR).collect(),
            yellow_time: match fields.get(3) {
                Some(yellow) => Some(parse_number(line, "yellow time", yellow)?),
                None => None,
            },
        }),
        _ => {
            return Err(PersistError::invalid(
                line,
                format!("expected id[:duration:order[:yellow]], got {raw:?}"),
            ));
        }
    };
    Ok(IntersectionDecl { id: fields[0], lights })
}

fn add_route(network: &mut Network, line: usize, raw: &str) -> PersistResult<()> {
    let fields: Vec<&str> = raw.split(FIELD_SEPARATOR).collect();
    let (from, to, speed, sign) = match fields.as_slice() {
        [from, to, speed] => (*from, *to, *speed, None),
        [from, to, speed, sign] => (*from, *to, *speed, Some(*sign)),
        _ => {
            return Err(PersistError::invalid(
                line,
                format!("expected from:to:speed[:sign], got {raw:?}"),
            ));
        }
    };
    let speed = parse_speed(line, "default speed", speed)?;
    let sign = sign.map(|s| parse_speed(line, "speed sign", s)).transpose()?;

    let invalid = |e| PersistError::invalid(line, e);
    network.connect_intersections(from, to, speed).map_err(invalid)?;
    if let Some(sign) = sign {
        network.add_speed_sign(from, to, sign).map_err(invalid)?;
    }
    Ok(())
}

/// `FromStr` alone would also take a leading `+`.
fn parse_number<T: std::str::FromStr>(line: usize, what: &str, raw: &str) -> PersistResult<T> {
    let invalid =
        || PersistError::invalid(line, format!("{what} must be a non-negative integer, got {raw:?}"));
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    raw.parse::<T>().map_err(|_| invalid())
}

fn parse_speed(line: usize, what: &str, raw: &str) -> PersistResult<i32> {
    let speed = parse_number::<u32>(line, what, raw)?;
    i32::try_from(speed).map_err(|_| PersistError::invalid(line, format!("{what} {speed} is too large")))
}
