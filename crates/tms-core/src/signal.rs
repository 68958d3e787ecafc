//! Traffic signal states shown on a light-controlled route.

use std::fmt;

/// The colour a traffic light currently shows to one incoming route.
///
/// Within one set of intersection lights, at most one route is `Green` or
/// `Yellow` at any moment; all others are `Red`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrafficSignal {
    Green,
    Yellow,
    #[default]
    Red,
}

impl TrafficSignal {
    /// Lower-case name used in logs and CSV output.
    pub fn as_str(self) -> &'static str {
        match self {
            TrafficSignal::Green  => "green",
            TrafficSignal::Yellow => "yellow",
            TrafficSignal::Red    => "red",
        }
    }
}

impl fmt::Display for TrafficSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
