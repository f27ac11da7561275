use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One catalog entry. Loaded once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecyclerRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub materials: Vec<String>,
    /// Material tag → published rate. May cover only some materials.
    #[serde(default)]
    pub rates: BTreeMap<String, f64>,
    pub location: FacilityLocation,
    #[serde(default)]
    pub contact: FacilityContact,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityLocation {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub city: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FacilityContact {
    #[serde(default)]
    pub phone: Option<String>,
}

/// A validated latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Returns `None` unless both values are present, finite and in range
    /// (lat in [-90, 90], lon in [-180, 180]). Invalid pairs count as absent.
    pub fn validated(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        let (lat, lon) = (latitude?, longitude?);
        if !lat.is_finite() || !lon.is_finite() {
            return None;
        }
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return None;
        }
        Some(Self {
            latitude: lat,
            longitude: lon,
        })
    }
}

/// Price a facility offers for the requested material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RateQuote {
    /// Published rate for the exact material tag.
    Exact { value: f64 },
    /// Highest rate the facility publishes for any material. Approximate.
    BestAvailable { value: f64 },
}

impl RateQuote {
    pub fn value(&self) -> f64 {
        match self {
            Self::Exact { value } | Self::BestAvailable { value } => *value,
        }
    }

    pub fn is_approximate(&self) -> bool {
        matches!(self, Self::BestAvailable { .. })
    }
}

/// A ranked facility for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityMatch {
    pub id: String,
    pub name: String,
    pub address: String,
    pub materials: Vec<String>,
    /// 1 when the facility accepts the canonical material tag.
    pub match_score: u8,
    /// Great-circle distance in km, rounded to 2 decimals.
    pub distance_km: Option<f64>,
    pub rate: Option<RateQuote>,
    pub contact_phone: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}
