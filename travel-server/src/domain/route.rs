//! Bus routes contributed by travelers.

use serde::{Deserialize, Serialize};

use super::error::require;
use super::{CoreError, Fare, TimeOfDay};

/// Operator assumed when a contributor doesn't name one.
pub const DEFAULT_OPERATOR: &str = "KSRTC";

/// A known bus departure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusRoute {
    /// Unique within the catalog for the process lifetime.
    pub id: u64,
    /// e.g. "Sulthan Bathery - Pala"
    pub route_label: String,
    pub departure_time: TimeOfDay,
    /// Journey time in minutes; 0 when the contributor didn't say.
    pub duration_minutes: u32,
    pub fare: Fare,
    pub operator: String,
}

impl BusRoute {
    /// Case-insensitive substring match on the route label.
    pub fn label_contains(&self, needle: &str) -> bool {
        let needle = needle.trim();
        !needle.is_empty()
            && self
                .route_label
                .to_lowercase()
                .contains(&needle.to_lowercase())
    }

    /// Duration in the "10h 30m" form used by timetables.
    pub fn duration_label(&self) -> String {
        format_duration(self.duration_minutes)
    }
}

/// Unvalidated input for a new route.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewBusRoute {
    #[serde(alias = "route_name")]
    pub route_label: String,
    pub departure_time: String,
    pub fare: String,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub operator: Option<String>,
}

impl NewBusRoute {
    /// Input carrying only the three required fields.
    pub fn new(
        route_label: impl Into<String>,
        departure_time: impl Into<String>,
        fare: impl Into<String>,
    ) -> Self {
        Self {
            route_label: route_label.into(),
            departure_time: departure_time.into(),
            fare: fare.into(),
            ..Default::default()
        }
    }

    /// Set the journey duration, e.g. "6h 45m".
    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    /// Validate the input and produce a route with the given id.
    pub fn into_route(self, id: u64) -> Result<BusRoute, CoreError> {
        let route_label = require("route_label", &self.route_label)?;

        require("departure_time", &self.departure_time)?;
        let departure_time = TimeOfDay::parse(&self.departure_time)
            .map_err(|e| CoreError::validation("departure_time", e.to_string()))?;

        require("fare", &self.fare)?;
        let fare =
            Fare::parse(&self.fare).map_err(|e| CoreError::validation("fare", e.to_string()))?;

        let duration_minutes = match self.duration.as_deref().map(str::trim) {
            None | Some("") => 0,
            Some(d) => parse_duration(d).ok_or_else(|| {
                CoreError::validation("duration", "expected a form like \"10h 30m\"")
            })?,
        };

        let operator = self
            .operator
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .unwrap_or_else(|| DEFAULT_OPERATOR.to_string());

        Ok(BusRoute {
            id,
            route_label,
            departure_time,
            duration_minutes,
            fare,
            operator,
        })
    }
}

/// Parse "10h 30m", "2h", "45m", "1h30m" or a bare minute count.
///
/// ```
/// use travel_server::domain::parse_duration;
///
/// assert_eq!(parse_duration("10h 30m"), Some(630));
/// assert_eq!(parse_duration("45"), Some(45));
/// assert_eq!(parse_duration("soon"), None);
/// ```
pub fn parse_duration(s: &str) -> Option<u32> {
    let s = s.trim().to_ascii_lowercase();
    if s.is_empty() {
        return None;
    }
    if s.bytes().all(|b| b.is_ascii_digit()) {
        return s.parse().ok();
    }

    let mut total: u32 = 0;
    let mut digits = String::new();
    let mut seen_unit = false;
    let mut seen_hours = false;
    let mut seen_minutes = false;

    for c in s.chars() {
        match c {
            '0'..='9' => digits.push(c),
            'h' | 'm' => {
                let value: u32 = digits.parse().ok()?;
                digits.clear();
                let minutes = if c == 'h' {
                    if seen_hours || seen_minutes {
                        return None;
                    }
                    seen_hours = true;
                    value.checked_mul(60)?
                } else {
                    if seen_minutes {
                        return None;
                    }
                    seen_minutes = true;
                    value
                };
                total = total.checked_add(minutes)?;
                seen_unit = true;
            }
            ' ' => {}
            _ => return None,
        }
    }

    if !digits.is_empty() || !seen_unit {
        return None;
    }
    Some(total)
}

/// Format minutes as "10h 30m", "2h" or "45m".
pub fn format_duration(minutes: u32) -> String {
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}
