//! Island classification.
//!
//! The archipelago has exactly two inhabited islands and they are far apart,
//! so a single longitude threshold on the first coordinate is enough to tell
//! them apart. Classification is a pure function of geometry, never of
//! properties.

use std::fmt;

use crate::LineGeometry;

/// Longitude used when a geometry carries no coordinates (main island).
const DEFAULT_LONGITUDE: f64 = -17.0;

/// Dividing longitude between the islands. Porto Santo sits at roughly
/// −16.3, the main island at roughly −17.0, with open sea in between.
const ISLAND_SPLIT_LONGITUDE: f64 = -16.5;

/// The island a route belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Island {
    Madeira,
    PortoSanto,
}

impl Island {
    /// Classify a geometry by its representative longitude.
    pub fn from_geometry(geometry: &LineGeometry) -> Self {
        let longitude = geometry.first_longitude().unwrap_or(DEFAULT_LONGITUDE);
        if longitude > ISLAND_SPLIT_LONGITUDE {
            Island::PortoSanto
        } else {
            Island::Madeira
        }
    }

    /// Human-readable island name, as emitted in output properties.
    pub fn label(self) -> &'static str {
        match self {
            Island::Madeira => "Madeira",
            Island::PortoSanto => "Porto Santo",
        }
    }

    /// Suffix appended to route ids on this island.
    pub fn id_suffix(self) -> &'static str {
        match self {
            Island::Madeira => "",
            Island::PortoSanto => "-PS",
        }
    }
}

impl fmt::Display for Island {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
