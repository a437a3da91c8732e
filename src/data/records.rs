//! Typed SWAPI records
//!
//! Every field is kept exactly as the API returns it. SWAPI encodes most
//! numbers as strings (`"172"`, `"1,000"`, `"unknown"`), so numeric
//! interpretation is left to the analysis layer. Only the name/title and url
//! are required; a record missing them is rejected at the boundary.

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use super::Category;

/// A record type that belongs to a single SWAPI category
pub trait Resource: DeserializeOwned + Serialize + Clone + Send + 'static {
    /// The category this record type is fetched from
    const CATEGORY: Category;

    /// Display name of the record (title for films)
    fn name(&self) -> &str;

    /// Wraps a list of records in the tagged union
    fn into_record_set(records: Vec<Self>) -> RecordSet;
}

/// A film from `/films/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Film {
    pub title: String,
    #[serde(default)]
    pub episode_id: u32,
    #[serde(default)]
    pub opening_crawl: String,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub producer: String,
    /// Release date as `YYYY-MM-DD`
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub characters: Vec<String>,
    #[serde(default)]
    pub planets: Vec<String>,
    #[serde(default)]
    pub starships: Vec<String>,
    #[serde(default)]
    pub vehicles: Vec<String>,
    #[serde(default)]
    pub species: Vec<String>,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub edited: String,
    pub url: String,
}

/// A character from `/people/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    #[serde(default)]
    pub height: String,
    #[serde(default)]
    pub mass: String,
    #[serde(default)]
    pub hair_color: String,
    #[serde(default)]
    pub skin_color: String,
    #[serde(default)]
    pub eye_color: String,
    #[serde(default)]
    pub birth_year: String,
    #[serde(default)]
    pub gender: String,
    /// URL of the homeworld planet
    #[serde(default)]
    pub homeworld: Option<String>,
    #[serde(default)]
    pub films: Vec<String>,
    #[serde(default)]
    pub species: Vec<String>,
    #[serde(default)]
    pub vehicles: Vec<String>,
    #[serde(default)]
    pub starships: Vec<String>,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub edited: String,
    pub url: String,
}

/// A planet from `/planets/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    pub name: String,
    #[serde(default)]
    pub rotation_period: String,
    #[serde(default)]
    pub orbital_period: String,
    #[serde(default)]
    pub diameter: String,
    /// Comma-separated climates, e.g. `"temperate, tropical"`
    #[serde(default)]
    pub climate: String,
    #[serde(default)]
    pub gravity: String,
    /// Comma-separated terrains
    #[serde(default)]
    pub terrain: String,
    #[serde(default)]
    pub surface_water: String,
    #[serde(default)]
    pub population: String,
    #[serde(default)]
    pub residents: Vec<String>,
    #[serde(default)]
    pub films: Vec<String>,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub edited: String,
    pub url: String,
}

/// A species from `/species/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    pub name: String,
    #[serde(default)]
    pub classification: String,
    #[serde(default)]
    pub designation: String,
    #[serde(default)]
    pub average_height: String,
    #[serde(default)]
    pub skin_colors: String,
    #[serde(default)]
    pub hair_colors: String,
    #[serde(default)]
    pub eye_colors: String,
    #[serde(default)]
    pub average_lifespan: String,
    /// Null for species without a homeworld
    #[serde(default)]
    pub homeworld: Option<String>,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub people: Vec<String>,
    #[serde(default)]
    pub films: Vec<String>,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub edited: String,
    pub url: String,
}

/// A starship from `/starships/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Starship {
    pub name: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default)]
    pub cost_in_credits: String,
    #[serde(default)]
    pub length: String,
    #[serde(default)]
    pub max_atmosphering_speed: String,
    #[serde(default)]
    pub crew: String,
    #[serde(default)]
    pub passengers: String,
    #[serde(default)]
    pub cargo_capacity: String,
    #[serde(default)]
    pub consumables: String,
    #[serde(default)]
    pub hyperdrive_rating: String,
    /// Megalights per hour
    #[serde(default, rename = "MGLT")]
    pub mglt: String,
    #[serde(default)]
    pub starship_class: String,
    #[serde(default)]
    pub pilots: Vec<String>,
    #[serde(default)]
    pub films: Vec<String>,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub edited: String,
    pub url: String,
}

/// A vehicle from `/vehicles/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub name: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default)]
    pub cost_in_credits: String,
    #[serde(default)]
    pub length: String,
    #[serde(default)]
    pub max_atmosphering_speed: String,
    #[serde(default)]
    pub crew: String,
    #[serde(default)]
    pub passengers: String,
    #[serde(default)]
    pub cargo_capacity: String,
    #[serde(default)]
    pub consumables: String,
    #[serde(default)]
    pub vehicle_class: String,
    #[serde(default)]
    pub pilots: Vec<String>,
    #[serde(default)]
    pub films: Vec<String>,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub edited: String,
    pub url: String,
}

impl Resource for Film {
    const CATEGORY: Category = Category::Films;

    fn name(&self) -> &str {
        &self.title
    }

    fn into_record_set(records: Vec<Self>) -> RecordSet {
        RecordSet::Films(records)
    }
}

impl Resource for Person {
    const CATEGORY: Category = Category::People;

    fn name(&self) -> &str {
        &self.name
    }

    fn into_record_set(records: Vec<Self>) -> RecordSet {
        RecordSet::People(records)
    }
}

impl Resource for Planet {
    const CATEGORY: Category = Category::Planets;

    fn name(&self) -> &str {
        &self.name
    }

    fn into_record_set(records: Vec<Self>) -> RecordSet {
        RecordSet::Planets(records)
    }
}

impl Resource for Species {
    const CATEGORY: Category = Category::Species;

    fn name(&self) -> &str {
        &self.name
    }

    fn into_record_set(records: Vec<Self>) -> RecordSet {
        RecordSet::Species(records)
    }
}

impl Resource for Starship {
    const CATEGORY: Category = Category::Starships;

    fn name(&self) -> &str {
        &self.name
    }

    fn into_record_set(records: Vec<Self>) -> RecordSet {
        RecordSet::Starships(records)
    }
}

impl Resource for Vehicle {
    const CATEGORY: Category = Category::Vehicles;

    fn name(&self) -> &str {
        &self.name
    }

    fn into_record_set(records: Vec<Self>) -> RecordSet {
        RecordSet::Vehicles(records)
    }
}

/// The records of any one category
#[derive(Debug, Clone, PartialEq)]
pub enum RecordSet {
    Films(Vec<Film>),
    People(Vec<Person>),
    Planets(Vec<Planet>),
    Species(Vec<Species>),
    Starships(Vec<Starship>),
    Vehicles(Vec<Vehicle>),
}

impl RecordSet {
    /// The category these records belong to
    pub fn category(&self) -> Category {
        match self {
            RecordSet::Films(_) => Category::Films,
            RecordSet::People(_) => Category::People,
            RecordSet::Planets(_) => Category::Planets,
            RecordSet::Species(_) => Category::Species,
            RecordSet::Starships(_) => Category::Starships,
            RecordSet::Vehicles(_) => Category::Vehicles,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            RecordSet::Films(r) => r.len(),
            RecordSet::People(r) => r.len(),
            RecordSet::Planets(r) => r.len(),
            RecordSet::Species(r) => r.len(),
            RecordSet::Starships(r) => r.len(),
            RecordSet::Vehicles(r) => r.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
