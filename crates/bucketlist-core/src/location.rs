//! The persisted point-of-interest record and its value types.

use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::CoreError;

/// Name given to records created by `LocationStore::add`.
pub const PLACEHOLDER_NAME: &str = "New location";

/// A WGS84 latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Builds a coordinate, rejecting values outside `[-90, 90]` / `[-180, 180]`
    /// and non-finite values.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::CoordinateOutOfRange`] if either component is out of range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoreError> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        if !valid {
            return Err(CoreError::CoordinateOutOfRange {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5}, {:.5}", self.latitude, self.longitude)
    }
}

/// A saved place.
///
/// Identity is the `id` alone: two records compare equal when their ids match,
/// whatever their text or coordinates. Coordinates are fixed at creation and
/// only exposed through accessors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    latitude: f64,
    longitude: f64,
}

impl Location {
    /// Creates a record with a fresh random id.
    pub fn new(name: impl Into<String>, description: impl Into<String>, at: Coordinate) -> Self {
        Self::with_id(Uuid::new_v4(), name, description, at)
    }

    pub fn with_id(
        id: Uuid,
        name: impl Into<String>,
        description: impl Into<String>,
        at: Coordinate,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            latitude: at.latitude,
            longitude: at.longitude,
        }
    }

    /// A new record named [`PLACEHOLDER_NAME`] with an empty description.
    #[must_use]
    pub fn placeholder(at: Coordinate) -> Self {
        Self::new(PLACEHOLDER_NAME, "", at)
    }

    /// Fixture record used by previews and tests.
    #[must_use]
    pub fn example() -> Self {
        Self::new(
            "Buckingham Palace",
            "Where Queen Elizabeth lives with her dorgis.",
            Coordinate {
                latitude: 51.501,
                longitude: -0.141,
            },
        )
    }

    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    #[must_use]
    pub fn coordinate(&self) -> Coordinate {
        Coordinate {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    /// Returns the edited value of this record: same coordinates, new text, and
    /// an id chosen by `policy`.
    #[must_use]
    pub fn edited(
        &self,
        name: impl Into<String>,
        description: impl Into<String>,
        policy: IdentityPolicy,
    ) -> Self {
        let id = match policy {
            IdentityPolicy::Stable => self.id,
            IdentityPolicy::Rotate => Uuid::new_v4(),
        };
        Self::with_id(id, name, description, self.coordinate())
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Location {}

impl Hash for Location {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// What happens to a record's id when an edit is saved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdentityPolicy {
    /// Keep the id; observers compare whole values to detect the change.
    #[default]
    Stable,
    /// Assign a fresh id on every save, so identity-keyed observers see a new record.
    Rotate,
}

impl std::fmt::Display for IdentityPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdentityPolicy::Stable => write!(f, "stable"),
            IdentityPolicy::Rotate => write!(f, "rotate"),
        }
    }
}

impl FromStr for IdentityPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stable" => Ok(IdentityPolicy::Stable),
            "rotate" => Ok(IdentityPolicy::Rotate),
            other => Err(CoreError::InvalidIdentityPolicy(other.to_string())),
        }
    }
}
