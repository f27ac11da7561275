use std::cmp::Ordering;

use super::catalog::FacilityCatalog;
use super::geo::{haversine_km, round2};
use crate::models::{FacilityMatch, GeoPoint, RateQuote, RecyclerRecord};

/// Accepted-material keywords that mark a facility as hazardous-capable.
const HAZARD_MATERIAL_KEYWORDS: &[&str] = &[
    "hazardous",
    "medical",
    "battery",
    "e-waste",
    "pesticide",
    "chemical",
];

/// Broad material categories and the accepted-material tags they cover.
const CATEGORY_MATERIALS: &[(&str, &[&str])] = &[
    ("plastic", &["PET", "HDPE", "LDPE", "PP", "PS", "PVC", "PLASTIC"]),
    ("metal", &["METAL", "STEEL", "ALUMINIUM", "ALUMINUM", "IRON"]),
    ("paper", &["PAPER", "CARDBOARD", "NEWSPAPER", "MAGAZINE"]),
    (
        "hazardous",
        &[
            "HAZARDOUS",
            "CHEMICAL",
            "HAZARDOUS CHEMICALS",
            "MEDICAL",
            "MEDICAL WASTE",
            "BATTERY",
            "BATTERIES",
            "PESTICIDE",
        ],
    ),
    ("electronic", &["ELECTRONICS", "E-WASTE", "COMPUTER", "PHONE", "CIRCUIT"]),
];

/// Parameters of one facility search.
#[derive(Debug, Clone)]
pub struct FacilityQuery<'a> {
    pub material_type: &'a str,
    pub city: Option<&'a str>,
    pub location: Option<GeoPoint>,
    pub hazardous: bool,
    pub limit: usize,
}

/// Map a free-text material label to the canonical catalog tag.
pub fn normalize_material(material_type: &str) -> String {
    let m = material_type.to_lowercase();
    let has = |needle: &str| m.contains(needle);

    let tag = if has("pet") || has("bottle") {
        "PET"
    } else if has("hdpe") {
        "HDPE"
    } else if has("ldpe") {
        "LDPE"
    } else if has("pp") || has("polypropylene") {
        "PP"
    } else if has("ps") || has("polystyrene") {
        "PS"
    } else if has("paper") {
        "Paper"
    } else if has("cardboard") || has("corrugated") {
        "Cardboard"
    } else if has("glass") {
        "Glass"
    } else if has("metal") || has("aluminum") || has("steel") {
        "Metal"
    } else if has("electronic") || has("e-waste") || has("ewaste") || has("circuit") {
        "Electronics"
    } else if has("battery") {
        "Batteries"
    } else if has("chemical") || has("pesticide") {
        "Hazardous Chemicals"
    } else if has("medical") || has("biohazard") {
        "Medical Waste"
    } else if material_type.trim().is_empty() {
        "Mixed"
    } else {
        return title_case(material_type.trim());
    };
    tag.to_string()
}

fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}

impl FacilityCatalog {
    /// Rank facilities for a material.
    ///
    /// City and hazardous filters widen back out when they would leave
    /// nothing. Accepting the canonical tag outranks any distance; ties
    /// are broken by distance, unknown distances last.
    pub fn match_facilities(&self, query: &FacilityQuery<'_>) -> Vec<FacilityMatch> {
        let target = normalize_material(query.material_type);
        let mut candidates: Vec<&RecyclerRecord> = self.records().iter().collect();

        if let Some(city) = query.city.map(str::trim).filter(|c| !c.is_empty()) {
            let city_lower = city.to_lowercase();
            let in_city: Vec<&RecyclerRecord> = candidates
                .iter()
                .copied()
                .filter(|r| {
                    r.location
                        .city
                        .as_deref()
                        .is_some_and(|c| c.trim().to_lowercase() == city_lower)
                })
                .collect();
            if in_city.is_empty() {
                tracing::warn!(city, "No facilities registered in city, searching all cities");
            } else {
                candidates = in_city;
            }
        }

        if query.hazardous {
            let capable: Vec<&RecyclerRecord> = candidates
                .iter()
                .copied()
                .filter(|r| accepts_hazardous(r))
                .collect();
            if capable.is_empty() {
                tracing::warn!("No hazardous-capable facilities among candidates, keeping all");
            } else {
                candidates = capable;
            }
        }

        let mut scored: Vec<(u8, Option<f64>, &RecyclerRecord)> = candidates
            .into_iter()
            .map(|r| {
                let score = u8::from(accepts_material(r, &target));
                let distance = query.location.map(|p| haversine_km(p, record_point(r)));
                (score, distance, r)
            })
            .collect();

        scored.sort_by(|a, b| {
            b.0.cmp(&a.0).then_with(|| {
                let da = a.1.unwrap_or(f64::INFINITY);
                let db = b.1.unwrap_or(f64::INFINITY);
                da.partial_cmp(&db).unwrap_or(Ordering::Equal)
            })
        });

        scored
            .into_iter()
            .take(query.limit)
            .map(|(score, distance, r)| to_match(r, score, distance, resolve_rate(r, &target)))
            .collect()
    }

    /// Facilities accepting any material of a broad category (plastic,
    /// metal, paper, hazardous, electronic) within `max_km`, nearest first.
    /// Unknown categories yield nothing.
    pub fn nearby_by_category(
        &self,
        location: GeoPoint,
        category: &str,
        max_km: f64,
        limit: usize,
    ) -> Vec<FacilityMatch> {
        let category = category.trim().to_lowercase();
        let Some((_, tags)) = CATEGORY_MATERIALS.iter().find(|(name, _)| *name == category) else {
            return Vec::new();
        };

        let mut nearby: Vec<(f64, &RecyclerRecord)> = self
            .records()
            .iter()
            .filter(|r| {
                r.materials
                    .iter()
                    .any(|m| tags.contains(&m.trim().to_uppercase().as_str()))
            })
            .map(|r| (haversine_km(location, record_point(r)), r))
            .filter(|(d, _)| *d <= max_km)
            .collect();
        nearby.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

        nearby
            .into_iter()
            .take(limit)
            .map(|(d, r)| to_match(r, 1, Some(d), best_rate(r)))
            .collect()
    }
}

fn record_point(r: &RecyclerRecord) -> GeoPoint {
    GeoPoint {
        latitude: r.location.latitude,
        longitude: r.location.longitude,
    }
}

fn accepts_material(r: &RecyclerRecord, target: &str) -> bool {
    r.materials.iter().any(|m| m.trim().eq_ignore_ascii_case(target))
}

fn accepts_hazardous(r: &RecyclerRecord) -> bool {
    let joined = r.materials.join(" ").to_lowercase();
    HAZARD_MATERIAL_KEYWORDS.iter().any(|k| joined.contains(k))
}

/// Exact rate for the tag, else the facility's highest published rate.
fn resolve_rate(r: &RecyclerRecord, target: &str) -> Option<RateQuote> {
    match r.rates.get(target) {
        Some(&value) => Some(RateQuote::Exact { value }),
        None => best_rate(r),
    }
}

fn best_rate(r: &RecyclerRecord) -> Option<RateQuote> {
    r.rates
        .values()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |best: Option<f64>, v| Some(best.map_or(v, |b| b.max(v))))
        .map(|value| RateQuote::BestAvailable { value })
}

fn to_match(
    r: &RecyclerRecord,
    match_score: u8,
    distance: Option<f64>,
    rate: Option<RateQuote>,
) -> FacilityMatch {
    FacilityMatch {
        id: r.id.clone(),
        name: r.name.clone(),
        address: r.address.clone(),
        materials: r.materials.clone(),
        match_score,
        distance_km: distance.map(round2),
        rate,
        contact_phone: r.contact.phone.clone(),
        latitude: r.location.latitude,
        longitude: r.location.longitude,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::models::{FacilityContact, FacilityLocation};

    /// Roughly 1 km per 0.009 degrees of latitude.
    const KM_PER_DEG: f64 = 111.19;

    fn origin() -> GeoPoint {
        GeoPoint {
            latitude: 12.0,
            longitude: 77.0,
        }
    }

    fn facility(id: &str, materials: &[&str], km_north: f64, city: &str) -> RecyclerRecord {
        RecyclerRecord {
            id: id.into(),
            name: format!("Facility {id}"),
            address: String::new(),
            materials: materials.iter().map(|m| m.to_string()).collect(),
            rates: BTreeMap::new(),
            location: FacilityLocation {
                latitude: 12.0 + km_north / KM_PER_DEG,
                longitude: 77.0,
                city: Some(city.into()),
            },
            contact: FacilityContact::default(),
        }
    }

    fn query<'a>(material: &'a str) -> FacilityQuery<'a> {
        FacilityQuery {
            material_type: material,
            city: None,
            location: Some(origin()),
            hazardous: false,
            limit: 3,
        }
    }

    #[test]
    fn normalization_rules() {
        assert_eq!(normalize_material("PET Plastic (Blue Tint)"), "PET");
        assert_eq!(normalize_material("plastic bottle"), "PET");
        assert_eq!(normalize_material("HDPE Plastic / White Paper"), "HDPE");
        assert_eq!(normalize_material("Corrugated Cardboard"), "Cardboard");
        assert_eq!(normalize_material("Aluminum / Steel"), "Metal");
        assert_eq!(normalize_material("E-Waste / ABS Plastic"), "Electronics");
        assert_eq!(normalize_material("Lithium battery"), "Batteries");
        assert_eq!(normalize_material("pesticide can"), "Hazardous Chemicals");
        assert_eq!(normalize_material("biohazard bag"), "Medical Waste");
        assert_eq!(normalize_material("wooden crate"), "Wooden Crate");
        assert_eq!(normalize_material("   "), "Mixed");
    }

    #[test]
    fn nearer_facility_wins_on_equal_score() {
        let catalog = FacilityCatalog::from_records(vec![
            facility("far", &["PET"], 15.0, "Bengaluru"),
            facility("near", &["PET"], 2.0, "Bengaluru"),
        ]);
        let results = catalog.match_facilities(&query("PET bottle"));
        assert_eq!(results[0].id, "near");
        assert_eq!(results[1].id, "far");
        let d = results[0].distance_km.unwrap();
        assert!((d - 2.0).abs() < 0.05, "got {d}");
    }

    #[test]
    fn material_match_dominates_distance() {
        let catalog = FacilityCatalog::from_records(vec![
            facility("glass-near", &["Glass"], 2.0, "Bengaluru"),
            facility("pet-far", &["PET"], 15.0, "Bengaluru"),
        ]);
        let results = catalog.match_facilities(&query("PET bottle"));
        assert_eq!(results[0].id, "pet-far");
        assert_eq!(results[0].match_score, 1);
        assert_eq!(results[1].match_score, 0);
    }

    #[test]
    fn unknown_city_widens_to_full_catalog() {
        let catalog = FacilityCatalog::from_records(vec![
            facility("a", &["PET"], 1.0, "Pune"),
            facility("b", &["Paper"], 2.0, "Chennai"),
        ]);
        let mut q = query("PET");
        q.city = Some("Atlantis");
        assert_eq!(catalog.match_facilities(&q).len(), 2);
    }

    #[test]
    fn city_filter_is_case_insensitive() {
        let catalog = FacilityCatalog::from_records(vec![
            facility("a", &["PET"], 1.0, "Pune"),
            facility("b", &["PET"], 2.0, "Chennai"),
        ]);
        let mut q = query("PET");
        q.city = Some("  chennai ");
        let results = catalog.match_facilities(&q);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "b");
    }

    #[test]
    fn hazardous_filter_prefers_capable_facilities() {
        let catalog = FacilityCatalog::from_records(vec![
            facility("plain", &["PET"], 1.0, "Pune"),
            facility("ewaste", &["Electronics", "E-Waste"], 9.0, "Pune"),
        ]);
        let mut q = query("E-Waste / ABS Plastic");
        q.hazardous = true;
        let results = catalog.match_facilities(&q);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "ewaste");
    }

    #[test]
    fn hazardous_filter_widens_when_nothing_capable() {
        let catalog = FacilityCatalog::from_records(vec![facility("plain", &["PET"], 1.0, "Pune")]);
        let mut q = query("battery");
        q.hazardous = true;
        assert_eq!(catalog.match_facilities(&q).len(), 1);
    }

    #[test]
    fn unknown_distance_sorts_last() {
        let catalog = FacilityCatalog::from_records(vec![
            facility("a", &["PET"], 5.0, "Pune"),
            facility("b", &["PET"], 1.0, "Pune"),
        ]);
        let mut q = query("PET");
        q.location = None;
        let results = catalog.match_facilities(&q);
        assert!(results.iter().all(|r| r.distance_km.is_none()));
        // Stable sort keeps catalog order when nothing distinguishes them.
        assert_eq!(results[0].id, "a");
    }

    #[test]
    fn results_truncated_to_limit() {
        let catalog = FacilityCatalog::from_records(
            (0..6)
                .map(|i| facility(&i.to_string(), &["PET"], i as f64, "Pune"))
                .collect(),
        );
        assert_eq!(catalog.match_facilities(&query("PET")).len(), 3);
    }

    #[test]
    fn exact_rate_preferred_over_best_available() {
        let mut rec = facility("a", &["PET", "Glass"], 1.0, "Pune");
        rec.rates.insert("PET".into(), 12.0);
        rec.rates.insert("Glass".into(), 30.0);
        let catalog = FacilityCatalog::from_records(vec![rec]);

        let pet = catalog.match_facilities(&query("PET"));
        assert_eq!(pet[0].rate, Some(RateQuote::Exact { value: 12.0 }));

        let paper = catalog.match_facilities(&query("paper"));
        assert_eq!(paper[0].rate, Some(RateQuote::BestAvailable { value: 30.0 }));
        assert!(paper[0].rate.unwrap().is_approximate());
    }

    #[test]
    fn no_rates_means_no_quote() {
        let catalog = FacilityCatalog::from_records(vec![facility("a", &["PET"], 1.0, "Pune")]);
        assert!(catalog.match_facilities(&query("PET"))[0].rate.is_none());
    }

    #[test]
    fn nearby_by_category_respects_radius() {
        let catalog = FacilityCatalog::from_records(vec![
            facility("near", &["PET"], 3.0, "Pune"),
            facility("far", &["HDPE"], 40.0, "Pune"),
            facility("paper", &["Paper"], 1.0, "Pune"),
        ]);
        let results = catalog.nearby_by_category(origin(), "Plastic", 20.0, 5);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "near");
    }

    #[test]
    fn nearby_by_unknown_category_is_empty() {
        let catalog = FacilityCatalog::from_records(vec![facility("a", &["PET"], 1.0, "Pune")]);
        assert!(catalog.nearby_by_category(origin(), "textiles", 20.0, 5).is_empty());
    }
}
