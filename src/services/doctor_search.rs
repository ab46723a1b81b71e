use regex::Regex;
use std::sync::OnceLock;

use crate::clients::npi_registry_client::{NpiAddress, NpiRecord, RegistryQuery};
use crate::clients::places_client::PlaceResult;
use crate::models::{Doctor, DoctorSearchRequest, DoctorSource};

pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 50;

const ADDRESS_UNAVAILABLE: &str = "Address not available";
const PHONE_UNAVAILABLE: &str = "Phone not available";

static ZIP_PATTERN: OnceLock<Regex> = OnceLock::new();
static CITY_STATE_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Validated form of a search request
#[derive(Debug, Clone, PartialEq)]
pub enum SearchPlan {
    Registry(RegistryQuery),
    Places { query: String, limit: u32 },
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

fn zip_pattern() -> &'static Regex {
    ZIP_PATTERN.get_or_init(|| Regex::new(r"^(\d{5})(?:-\d{4})?$").expect("zip pattern is valid"))
}

fn city_state_pattern() -> &'static Regex {
    CITY_STATE_PATTERN.get_or_init(|| {
        Regex::new(r"^\s*([^,]+?)\s*,\s*([A-Za-z]{2})(?:\s+\d{5}(?:-\d{4})?)?\s*$").expect("city/state pattern is valid")
    })
}

pub fn clamp_limit(limit: Option<u32>) -> u32 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

/// Turn the request into a concrete upstream query
pub fn plan_search(request: &DoctorSearchRequest) -> Result<SearchPlan, String> {
    let limit = clamp_limit(request.limit);
    let location = non_blank(&request.location);
    let postal_code = non_blank(&request.postal_code);
    let city = non_blank(&request.city);
    let state = non_blank(&request.state).map(|s| s.to_uppercase());

    if location.is_none() && postal_code.is_none() && city.is_none() && state.is_none() {
        return Err("Please provide a location, postal code, or city and state.".to_string());
    }

    match request.source {
        DoctorSource::Places => {
            let place = location.unwrap_or_else(|| {
                [city, state, postal_code].into_iter().flatten().collect::<Vec<_>>().join(", ")
            });
            Ok(SearchPlan::Places { query: format!("dermatologist near {}", place), limit })
        }
        DoctorSource::Registry => {
            let mut query = RegistryQuery { postal_code, city, state, limit };
            if let Some(location) = location {
                if let Some(caps) = zip_pattern().captures(&location) {
                    query.postal_code.get_or_insert_with(|| caps[1].to_string());
                } else if let Some(caps) = city_state_pattern().captures(&location) {
                    query.city.get_or_insert_with(|| caps[1].to_string());
                    query.state.get_or_insert_with(|| caps[2].to_uppercase());
                } else if query.postal_code.is_none() && query.city.is_none() {
                    return Err("Location must be a 5-digit ZIP code or \"City, ST\".".to_string());
                }
            }
            if let Some(zip) = &query.postal_code {
                if !zip_pattern().is_match(zip) {
                    return Err(format!("Invalid postal code '{}'", zip));
                }
            }
            Ok(SearchPlan::Registry(query))
        }
    }
}

/// "SAN ANTONIO" -> "San Antonio"
pub fn title_case(value: &str) -> String {
    value.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// US numbers become "(512) 555-0100"; anything else is passed through
pub fn format_phone(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return PHONE_UNAVAILABLE.to_string();
    };
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    let digits = match digits.len() {
        11 if digits.starts_with('1') => &digits[1..],
        _ => digits.as_str(),
    };
    if digits.len() == 10 {
        format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..])
    } else {
        raw.to_string()
    }
}

fn format_address(address: &NpiAddress) -> String {
    let mut parts: Vec<String> = [&address.address_1, &address.address_2, &address.city]
        .into_iter()
        .filter_map(|p| non_blank(p))
        .map(|p| title_case(&p))
        .collect();

    let state = non_blank(&address.state).map(|s| s.to_uppercase());
    let zip = non_blank(&address.postal_code).map(|z| z.chars().take(5).collect::<String>());
    let tail = [state, zip].into_iter().flatten().collect::<Vec<_>>().join(" ");
    if !tail.is_empty() {
        parts.push(tail);
    }

    if parts.is_empty() {
        ADDRESS_UNAVAILABLE.to_string()
    } else {
        parts.join(", ")
    }
}

/// Reshape a registry record into a doctor
pub fn doctor_from_registry(record: &NpiRecord) -> Doctor {
    let basic = &record.basic;
    let person = [&basic.first_name, &basic.last_name]
        .into_iter()
        .filter_map(|p| non_blank(p))
        .map(|p| title_case(&p))
        .collect::<Vec<_>>()
        .join(" ");

    let name = if !person.is_empty() {
        match non_blank(&basic.credential) {
            Some(credential) => format!("Dr. {}, {}", person, credential),
            None => format!("Dr. {}", person),
        }
    } else {
        non_blank(&basic.organization_name)
            .map(|o| title_case(&o))
            .unwrap_or_else(|| "Unknown provider".to_string())
    };

    let address = record.addresses.iter()
        .find(|a| a.address_purpose.as_deref().is_some_and(|p| p.eq_ignore_ascii_case("LOCATION")))
        .or_else(|| record.addresses.first());

    let specialty = record.taxonomies.iter()
        .find(|t| t.primary)
        .or_else(|| record.taxonomies.first())
        .and_then(|t| t.desc.clone())
        .unwrap_or_else(|| "Dermatology".to_string());

    let npi = record.number.as_ref().and_then(|n| match n {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    });

    Doctor {
        name,
        specialty,
        address: address.map(format_address).unwrap_or_else(|| ADDRESS_UNAVAILABLE.to_string()),
        phone: format_phone(address.and_then(|a| a.telephone_number.as_deref())),
        rating: None,
        reviews: None,
        npi,
        website: None,
        latitude: None,
        longitude: None,
        source: DoctorSource::Registry,
    }
}

/// Reshape a map listing into a doctor
pub fn doctor_from_place(place: &PlaceResult) -> Doctor {
    Doctor {
        name: non_blank(&place.title).unwrap_or_else(|| "Unknown provider".to_string()),
        specialty: non_blank(&place.kind).unwrap_or_else(|| "Dermatologist".to_string()),
        address: non_blank(&place.address).unwrap_or_else(|| ADDRESS_UNAVAILABLE.to_string()),
        phone: format_phone(place.phone.as_deref()),
        rating: place.rating,
        reviews: place.reviews,
        npi: None,
        website: non_blank(&place.website),
        latitude: place.gps_coordinates.map(|c| c.latitude),
        longitude: place.gps_coordinates.map(|c| c.longitude),
        source: DoctorSource::Places,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::npi_registry_client::{NpiBasic, NpiTaxonomy};
    use crate::clients::places_client::GpsCoordinates;

    fn request(location: Option<&str>) -> DoctorSearchRequest {
        DoctorSearchRequest { location: location.map(str::to_string), ..Default::default() }
    }

    #[test]
    fn empty_request_is_rejected() {
        assert!(plan_search(&request(None)).is_err());
        assert!(plan_search(&request(Some("   "))).is_err());
    }

    #[test]
    fn zip_location_becomes_postal_code() {
        let plan = plan_search(&request(Some("78701-1234"))).unwrap();
        assert_eq!(plan, SearchPlan::Registry(RegistryQuery {
            postal_code: Some("78701".to_string()),
            city: None,
            state: None,
            limit: DEFAULT_LIMIT,
        }));
    }

    #[test]
    fn city_state_location_is_split() {
        let SearchPlan::Registry(query) = plan_search(&request(Some("San Antonio, tx"))).unwrap() else {
            panic!("expected registry plan");
        };
        assert_eq!(query.city.as_deref(), Some("San Antonio"));
        assert_eq!(query.state.as_deref(), Some("TX"));
    }

    #[test]
    fn free_text_location_needs_places_source() {
        assert!(plan_search(&request(Some("near the river"))).is_err());
        let req = DoctorSearchRequest { source: DoctorSource::Places, limit: Some(500), ..request(Some("near the river")) };
        assert_eq!(plan_search(&req).unwrap(), SearchPlan::Places {
            query: "dermatologist near near the river".to_string(),
            limit: MAX_LIMIT,
        });
    }

    #[test]
    fn places_query_from_parts() {
        let req = DoctorSearchRequest {
            city: Some("Austin".to_string()),
            state: Some("tx".to_string()),
            source: DoctorSource::Places,
            limit: Some(0),
            ..Default::default()
        };
        assert_eq!(plan_search(&req).unwrap(), SearchPlan::Places {
            query: "dermatologist near Austin, TX".to_string(),
            limit: 1,
        });
    }

    #[test]
    fn bad_postal_code_is_rejected() {
        let req = DoctorSearchRequest { postal_code: Some("ABCDE".to_string()), ..Default::default() };
        assert!(plan_search(&req).is_err());
    }

    #[test]
    fn phone_formatting() {
        assert_eq!(format_phone(Some("5125550100")), "(512) 555-0100");
        assert_eq!(format_phone(Some("+1 512-555-0100")), "(512) 555-0100");
        assert_eq!(format_phone(Some("+44 20 7946 0958")), "+44 20 7946 0958");
        assert_eq!(format_phone(None), PHONE_UNAVAILABLE);
    }

    #[test]
    fn registry_record_is_reshaped() {
        let record = NpiRecord {
            number: Some(serde_json::json!(1234567890)),
            basic: NpiBasic {
                first_name: Some("JANE".to_string()),
                last_name: Some("DOE".to_string()),
                credential: Some("MD".to_string()),
                organization_name: None,
            },
            addresses: vec![
                NpiAddress {
                    address_purpose: Some("MAILING".to_string()),
                    address_1: Some("PO BOX 1".to_string()),
                    ..Default::default()
                },
                NpiAddress {
                    address_purpose: Some("LOCATION".to_string()),
                    address_1: Some("100 MAIN ST".to_string()),
                    address_2: Some("".to_string()),
                    city: Some("AUSTIN".to_string()),
                    state: Some("tx".to_string()),
                    postal_code: Some("787011234".to_string()),
                    telephone_number: Some("512-555-0100".to_string()),
                },
            ],
            taxonomies: vec![
                NpiTaxonomy { desc: Some("Pathology".to_string()), primary: false },
                NpiTaxonomy { desc: Some("Dermatology".to_string()), primary: true },
            ],
        };
        let doctor = doctor_from_registry(&record);
        assert_eq!(doctor.name, "Dr. Jane Doe, MD");
        assert_eq!(doctor.address, "100 Main St, Austin, TX 78701");
        assert_eq!(doctor.phone, "(512) 555-0100");
        assert_eq!(doctor.specialty, "Dermatology");
        assert_eq!(doctor.npi.as_deref(), Some("1234567890"));
        assert_eq!(doctor.source, DoctorSource::Registry);
    }

    #[test]
    fn empty_registry_record_gets_placeholders() {
        let doctor = doctor_from_registry(&NpiRecord::default());
        assert_eq!(doctor.name, "Unknown provider");
        assert_eq!(doctor.address, ADDRESS_UNAVAILABLE);
        assert_eq!(doctor.phone, PHONE_UNAVAILABLE);
        assert_eq!(doctor.npi, None);
    }

    #[test]
    fn place_is_reshaped() {
        let place = PlaceResult {
            title: Some("Austin Skin Clinic".to_string()),
            rating: Some(4.7),
            reviews: Some(120),
            gps_coordinates: Some(GpsCoordinates { latitude: 30.26, longitude: -97.74 }),
            ..Default::default()
        };
        let doctor = doctor_from_place(&place);
        assert_eq!(doctor.name, "Austin Skin Clinic");
        assert_eq!(doctor.specialty, "Dermatologist");
        assert_eq!(doctor.address, ADDRESS_UNAVAILABLE);
        assert_eq!(doctor.rating, Some(4.7));
        assert_eq!(doctor.latitude, Some(30.26));
        assert_eq!(doctor.source, DoctorSource::Places);
    }
}
