use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// One session in the static course catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Compared verbatim when looking for same-day clashes.
    pub date: String,
    #[serde(with = "hh_mm")]
    pub time_start: NaiveTime,
    #[serde(with = "hh_mm")]
    pub time_end: NaiveTime,
    pub subject: String,
    pub name: String,
    pub lecturer: String,
    /// Location name -> offered for this session.
    #[serde(default)]
    pub location: BTreeMap<String, bool>,
    #[serde(default)]
    pub xpos: f64,
    #[serde(default)]
    pub ypos: f64,
}

impl Course {
    pub fn label(&self) -> String {
        format!("{} {}《{}》", self.date, self.subject, self.name)
    }

    pub fn available_locations(&self) -> impl Iterator<Item = &str> {
        self.location
            .iter()
            .filter(|(_, offered)| **offered)
            .map(|(name, _)| name.as_str())
    }
}

#[derive(Debug)]
pub enum CatalogError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    /// The course at this index does not end after it starts.
    EmptyWindow(usize),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Io(err) => write!(f, "failed to read catalog: {err}"),
            CatalogError::Parse(err) => write!(f, "malformed catalog: {err}"),
            CatalogError::EmptyWindow(index) => {
                write!(f, "course #{index} must end after it starts")
            }
        }
    }
}

impl std::error::Error for CatalogError {}

/// Read-only course list, addressed by position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Course>", into = "Vec<Course>")]
pub struct Catalog {
    courses: Vec<Course>,
}

impl Catalog {
    pub fn new(courses: Vec<Course>) -> Result<Self, CatalogError> {
        if let Some(index) = courses.iter().position(|c| c.time_end <= c.time_start) {
            return Err(CatalogError::EmptyWindow(index));
        }
        Ok(Self { courses })
    }

    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let courses: Vec<Course> = serde_json::from_str(raw).map_err(CatalogError::Parse)?;
        Self::new(courses)
    }

    /// Loaded once at start-up, before the server accepts requests.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(CatalogError::Io)?;
        Self::from_json(&raw)
    }

    pub fn get(&self, index: usize) -> Option<&Course> {
        self.courses.get(index)
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

impl TryFrom<Vec<Course>> for Catalog {
    type Error = CatalogError;

    fn try_from(courses: Vec<Course>) -> Result<Self, Self::Error> {
        Self::new(courses)
    }
}

impl From<Catalog> for Vec<Course> {
    fn from(catalog: Catalog) -> Self {
        catalog.courses
    }
}

mod hh_mm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(|e| serde::de::Error::custom(format!("invalid time '{raw}': {e}")))
    }
}
