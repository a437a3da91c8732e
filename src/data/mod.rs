//! Core data layer for SWAPI Explorer
//!
//! This module contains the resource categories, the typed SWAPI records, the
//! paginating HTTP client and the data manager that decides between cached and
//! freshly fetched records.

pub mod client;
pub mod manager;
pub mod records;

pub use client::{FetchError, RecordSource, SwapiClient, DEFAULT_TIMEOUT_SECS, SWAPI_BASE_URL};
pub use manager::{DataError, DataManager, DEFAULT_TTL_DAYS};
pub use records::{Film, Person, Planet, RecordSet, Resource, Species, Starship, Vehicle};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the six SWAPI resource categories
///
/// A category identifies both the API endpoint (`{base_url}/{category}/`) and
/// the cache file (`{category}.json`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Films,
    People,
    Planets,
    Species,
    Starships,
    Vehicles,
}

/// Returned when a string does not name a category
#[derive(Debug, Error)]
#[error("Unknown category: '{0}'. Valid: films, people, planets, species, starships, vehicles")]
pub struct UnknownCategory(pub String);

impl Category {
    /// All categories in fetch order
    pub const ALL: [Category; 6] = [
        Category::Films,
        Category::People,
        Category::Planets,
        Category::Species,
        Category::Starships,
        Category::Vehicles,
    ];

    /// API path segment and cache key
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Films => "films",
            Category::People => "people",
            Category::Planets => "planets",
            Category::Species => "species",
            Category::Starships => "starships",
            Category::Vehicles => "vehicles",
        }
    }

    /// Human-readable name used in the dashboard and reports
    pub fn title(&self) -> &'static str {
        match self {
            Category::Films => "Films",
            Category::People => "Characters",
            Category::Planets => "Planets",
            Category::Species => "Species",
            Category::Starships => "Starships",
            Category::Vehicles => "Vehicles",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "films" | "film" => Ok(Category::Films),
            "people" | "person" | "characters" => Ok(Category::People),
            "planets" | "planet" => Ok(Category::Planets),
            "species" => Ok(Category::Species),
            "starships" | "starship" => Ok(Category::Starships),
            "vehicles" | "vehicle" => Ok(Category::Vehicles),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}
