//! Network serializer.  Output is the canonical form of the format described
//! in [`crate::loader`]: no comments, no blank lines, intersections in
//! insertion order, routes in creation order, every line ending in `\n`.
//!
//! Congestion readings are live state and are not written.

use std::fmt;
use std::io::Write;
use std::path::Path;

use tms_network::route::FIELD_SEPARATOR;
use tms_network::{Network, Route};

use crate::{PersistError, PersistResult};

/// Display adapter producing the file text of a network.
///
/// Built through [`NetworkText::new`], which rejects networks whose text
/// would not load back.
pub struct NetworkText<'a>(&'a Network);

impl<'a> NetworkText<'a> {
    /// # Errors
    ///
    /// [`PersistError::RouteOutsideCycle`] if a lighted intersection has an
    /// incoming route that joined after its lights were installed.  Its light
    /// order no longer covers every incoming route, so the loader would
    /// reject the file.
    pub fn new(network: &'a Network) -> PersistResult<Self> {
        for intersection in network.intersections() {
            let Some(lights) = intersection.lights() else { continue };
            let stray = intersection
                .connections()
                .iter()
                .enumerate()
                .find(|(i, _)| !lights.controls(*i));
            if let Some((_, route)) = stray {
                return Err(PersistError::RouteOutsideCycle {
                    intersection: intersection.id().to_owned(),
                    route:        route.id(),
                });
            }
        }
        Ok(Self(network))
    }
}

impl fmt::Display for NetworkText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let network = self.0;
        writeln!(f, "{}", network.len())?;
        writeln!(f, "{}", network.route_count())?;
        writeln!(f, "{}", network.yellow_time())?;

        for intersection in network.intersections() {
            write!(f, "{intersection}")?;
            match intersection.lights() {
                Some(lights) if lights.yellow_time() != network.yellow_time() => {
                    write!(f, "{FIELD_SEPARATOR}{}", lights.yellow_time())?;
                }
                _ => {}
            }
            writeln!(f)?;
        }
        for route in network.routes() {
            write_route_line(f, route)?;
        }
        Ok(())
    }
}

/// `from:to:defaultSpeed[:signSpeed]`
fn write_route_line(f: &mut fmt::Formatter<'_>, route: &Route) -> fmt::Result {
    write!(
        f,
        "{}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{}",
        route.from_name(),
        route.to_name(),
        route.default_speed()
    )?;
    if route.has_speed_sign() {
        write!(f, "{FIELD_SEPARATOR}{}", route.speed())?;
    }
    writeln!(f)
}

/// Render `network` to its textual form.
pub fn serialize_network(network: &Network) -> PersistResult<String> {
    Ok(NetworkText::new(network)?.to_string())
}

/// Write `network` to any `Write` sink.
pub fn write_network<W: Write>(network: &Network, mut writer: W) -> PersistResult<()> {
    let text = NetworkText::new(network)?;
    write!(writer, "{text}")?;
    writer.flush()?;
    Ok(())
}

/// Save `network` to `path`, replacing any existing file.
///
/// The network is checked before the file is touched, so a network that
/// cannot be saved leaves `path` as it was.
pub fn save_network(network: &Network, path: &Path) -> PersistResult<()> {
    let text = NetworkText::new(network)?;
    let mut writer = std::io::BufWriter::new(std::fs::File::create(path)?);
    write!(writer, "{text}")?;
    writer.flush()?;
    log::debug!(
        "saved network ({} intersections, {} routes) to {}",
        network.len(),
        network.route_count(),
        path.display()
    );
    Ok(())
}
