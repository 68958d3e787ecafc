//! Directed routes between intersections.

use std::fmt;

use tms_core::{IntersectionId, TrafficSignal};

use crate::{NetworkError, NetworkResult};

/// Separator between fields of a route's textual form (and of route ids).
pub const FIELD_SEPARATOR: char = ':';

/// Highest congestion level a route can report.
pub const MAX_CONGESTION: u32 = 100;

/// A directed edge ending at the intersection that owns it.
///
/// The origin is referenced by its `IntersectionId` handle and its
/// identifier; a route never owns or borrows the origin intersection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    from:          IntersectionId,
    from_name:     String,
    to_name:       String,
    default_speed: i32,
    /// Displayed speed of the electronic speed sign, if one is installed.
    speed_sign:    Option<i32>,
    congestion:    u32,
    /// `Some` iff the route is controlled by traffic lights.
    signal:        Option<TrafficSignal>,
}

impl Route {
    /// Create a route from `from_name` to `to_name`.
    ///
    /// # Errors
    ///
    /// [`NetworkError::InvalidArgument`] if `default_speed` is negative.
    pub fn new(
        from:          IntersectionId,
        from_name:     impl Into<String>,
        to_name:       impl Into<String>,
        default_speed: i32,
    ) -> NetworkResult<Self> {
        if default_speed < 0 {
            return Err(NetworkError::InvalidArgument(format!(
                "default speed must be non-negative, got {default_speed}"
            )));
        }
        Ok(Self {
            from,
            from_name: from_name.into(),
            to_name: to_name.into(),
            default_speed,
            speed_sign: None,
            congestion: 0,
            signal: None,
        })
    }

    /// The composite key `"<from>:<to>"`.
    pub fn id(&self) -> String {
        format!("{}{FIELD_SEPARATOR}{}", self.from_name, self.to_name)
    }

    /// Handle of the origin intersection.
    #[inline]
    pub fn from(&self) -> IntersectionId {
        self.from
    }

    pub fn from_name(&self) -> &str {
        &self.from_name
    }

    pub fn to_name(&self) -> &str {
        &self.to_name
    }

    pub fn default_speed(&self) -> i32 {
        self.default_speed
    }

    // ── Speed sign ────────────────────────────────────────────────────────

    /// Install an electronic speed sign showing `initial_speed`, replacing
    /// any sign already present.
    pub fn add_speed_sign(&mut self, initial_speed: i32) -> NetworkResult<()> {
        self.check_display_speed(initial_speed)?;
        self.speed_sign = Some(initial_speed);
        Ok(())
    }

    pub fn has_speed_sign(&self) -> bool {
        self.speed_sign.is_some()
    }

    /// Current speed limit: the sign's display if present, else the default.
    #[inline]
    pub fn speed(&self) -> i32 {
        self.speed_sign.unwrap_or(self.default_speed)
    }

    /// Overwrite the speed sign's displayed value.
    ///
    /// No monotonicity is enforced here; callers that only ever lower the
    /// limit (see `Intersection::reduce_incoming_speed_signs`) own that rule.
    ///
    /// # Errors
    ///
    /// - [`NetworkError::InvalidState`] if the route has no speed sign.
    /// - [`NetworkError::InvalidArgument`] if `limit` is negative or above the
    ///   default speed.
    pub fn set_speed_limit(&mut self, limit: i32) -> NetworkResult<()> {
        if self.speed_sign.is_none() {
            return Err(NetworkError::InvalidState(format!(
                "route {} has no speed sign",
                self.id()
            )));
        }
        self.check_display_speed(limit)?;
        self.speed_sign = Some(limit);
        Ok(())
    }

    /// Lower the sign to `limit` if that is below what it shows now.  No-op
    /// without a sign.  Never raises the display, so the sign stays within
    /// `0..=default_speed` as long as `limit` is non-negative.
    pub(crate) fn lower_speed_sign(&mut self, limit: i32) {
        debug_assert!(limit >= 0, "speed sign lowered to {limit}");
        if let Some(shown) = self.speed_sign.as_mut() {
            *shown = (*shown).min(limit);
        }
    }

    fn check_display_speed(&self, speed: i32) -> NetworkResult<()> {
        if speed < 0 || speed > self.default_speed {
            return Err(NetworkError::InvalidArgument(format!(
                "speed sign on {} must show 0..={}, got {speed}",
                self.id(),
                self.default_speed
            )));
        }
        Ok(())
    }

    // ── Traffic light ─────────────────────────────────────────────────────

    /// Mark the route as light-controlled.  Idempotent; a newly controlled
    /// route shows red until its lights say otherwise.
    pub fn add_traffic_light(&mut self) {
        self.signal.get_or_insert(TrafficSignal::Red);
    }

    pub fn has_traffic_light(&self) -> bool {
        self.signal.is_some()
    }

    /// The signal shown to this route, or `None` if it has no traffic light.
    pub fn signal(&self) -> Option<TrafficSignal> {
        self.signal
    }

    /// Only the owning intersection's lights drive the signal.
    pub(crate) fn set_signal(&mut self, signal: TrafficSignal) {
        if let Some(current) = self.signal.as_mut() {
            *current = signal;
        }
    }

    // ── Congestion ────────────────────────────────────────────────────────

    /// Congestion level in `0..=100`.
    pub fn congestion(&self) -> u32 {
        self.congestion
    }

    pub fn set_congestion(&mut self, level: u32) -> NetworkResult<()> {
        if level > MAX_CONGESTION {
            return Err(NetworkError::InvalidArgument(format!(
                "congestion must be at most {MAX_CONGESTION}, got {level}"
            )));
        }
        self.congestion = level;
        Ok(())
    }
}

/// `"<from>:<to>:<defaultSpeed>:<congestion>[:<signSpeed>]"`
impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{}",
            self.from_name, self.to_name, self.default_speed, self.congestion
        )?;
        if let Some(sign) = self.speed_sign {
            write!(f, "{FIELD_SEPARATOR}{sign}")?;
        }
        Ok(())
    }
}
