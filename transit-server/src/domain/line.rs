//! Line types.
//!
//! A `Line` stores only the outward stop sequence. For out-and-back lines
//! the return leg is derived on demand by `Line::full_route`.

use std::fmt;

use super::StopId;

/// Stable handle of a line within a catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(pub usize);

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The stop sequence of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Outward stop sequence as given in input.
    pub stops: Vec<StopId>,
    /// True for closed loops, false for out-and-back lines.
    pub round_trip: bool,
}

/// A named bus line.
///
/// A line is registered before its route is known, so `route` is `None`
/// until the catalogue assigns one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Unique line name
    pub name: String,
    route: Option<Route>,
}

impl Line {
    /// Creates a line without a route.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            route: None,
        }
    }

    /// Returns the route, if one has been set.
    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    pub(crate) fn set_route(&mut self, route: Route) {
        self.route = Some(route);
    }

    /// Returns true if this line is a closed loop.
    ///
    /// A line without a route is not a round trip.
    pub fn is_round_trip(&self) -> bool {
        self.route.as_ref().is_some_and(|r| r.round_trip)
    }

    /// Returns the stops visited by one full traversal of the line.
    ///
    /// A round trip is traversed exactly as stored. An out-and-back line
    /// is traversed outward and then back, without repeating the
    /// turnaround stop: `[X, Y, Z]` becomes `[X, Y, Z, Y, X]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_server::domain::Line;
    ///
    /// let line = Line::new("14");
    /// assert!(line.full_route().is_empty());
    /// ```
    pub fn full_route(&self) -> Vec<StopId> {
        let Some(route) = &self.route else {
            return Vec::new();
        };

        let mut stops = route.stops.clone();
        if !route.round_trip && stops.len() > 1 {
            stops.extend(route.stops.iter().rev().skip(1));
        }
        stops
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Out-and-back traversal has 2n - 1 stops and is a palindrome
        #[test]
        fn out_and_back_length(stops in proptest::collection::vec(0usize..20, 1..30)) {
            let mut l = Line::new("L");
            l.set_route(Route { stops: stops.iter().copied().map(StopId).collect(), round_trip: false });
            let full = l.full_route();
            prop_assert_eq!(full.len(), 2 * stops.len() - 1);
            let reversed: Vec<StopId> = full.iter().rev().copied().collect();
            prop_assert_eq!(full, reversed);
        }

        /// Round trip traversal keeps the input length
        #[test]
        fn round_trip_length(stops in proptest::collection::vec(0usize..20, 0..30)) {
            let mut l = Line::new("L");
            l.set_route(Route { stops: stops.iter().copied().map(StopId).collect(), round_trip: true });
            prop_assert_eq!(l.full_route().len(), stops.len());
        }
    }
}
