//! Data models for NPI registry records

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Address purpose of the practice location.
pub const LOCATION_PURPOSE: &str = "LOCATION";

/// Address purpose of the mailing address.
pub const MAILING_PURPOSE: &str = "MAILING";

/// A single NPI registry record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupResult {
    #[serde(default, deserialize_with = "lenient_int")]
    pub number: u64,
    #[serde(default, deserialize_with = "lenient_int")]
    pub created_epoch: i64,
    #[serde(default, deserialize_with = "lenient_int")]
    pub last_updated_epoch: i64,
    /// Raw enumeration type as sent by the registry ("NPI-1", "NPI-2").
    #[serde(default, deserialize_with = "null_to_default")]
    pub enumeration_type: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub basic: BasicInfo,
    /// Addresses in the order the registry returned them.
    #[serde(default, deserialize_with = "null_to_default")]
    pub addresses: Vec<Address>,
}

impl LookupResult {
    /// Find the first address with the given purpose.
    ///
    /// The match on the purpose tag is exact and case-sensitive. A missing
    /// address is a normal outcome and yields `None`.
    pub fn address(&self, purpose: &str) -> Option<&Address> {
        self.addresses.iter().find(|a| a.address_purpose == purpose)
    }

    pub fn location_address(&self) -> Option<&Address> {
        self.address(LOCATION_PURPOSE)
    }

    pub fn mailing_address(&self) -> Option<&Address> {
        self.address(MAILING_PURPOSE)
    }

    pub fn enumeration_kind(&self) -> EnumerationType {
        EnumerationType::from_wire(&self.enumeration_type)
    }
}

/// Free-function form of [`LookupResult::address`].
pub fn get_address<'a>(result: &'a LookupResult, purpose: &str) -> Option<&'a Address> {
    result.address(purpose)
}

/// Whether a record describes an individual provider or an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumerationType {
    Individual,
    Organization,
    Unknown,
}

impl EnumerationType {
    fn from_wire(value: &str) -> Self {
        match value {
            "NPI-1" => EnumerationType::Individual,
            "NPI-2" => EnumerationType::Organization,
            _ => EnumerationType::Unknown,
        }
    }
}

/// Basic record information.
///
/// `sole_proprietor`, `last_updated` and `enumeration_date` are kept as the
/// strings the registry sends. Their formats are not stable enough upstream to
/// parse eagerly, and a surprising value must not fail the whole record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicInfo {
    #[serde(deserialize_with = "null_to_default")]
    pub status: String,
    #[serde(deserialize_with = "null_to_default")]
    pub credential: String,
    #[serde(deserialize_with = "null_to_default")]
    pub first_name: String,
    #[serde(deserialize_with = "null_to_default")]
    pub middle_name: String,
    #[serde(deserialize_with = "null_to_default")]
    pub last_name: String,
    /// Display name; organizations carry their name here.
    #[serde(deserialize_with = "null_to_default")]
    pub name: String,
    #[serde(deserialize_with = "null_to_default")]
    pub gender: String,
    #[serde(deserialize_with = "null_to_default")]
    pub sole_proprietor: String,
    #[serde(deserialize_with = "null_to_default")]
    pub last_updated: String,
    #[serde(deserialize_with = "null_to_default")]
    pub enumeration_date: String,
}

impl BasicInfo {
    /// Interpret the sole-proprietor flag: "YES"/"Y" or "NO"/"N", any case.
    /// Other values yield `None`.
    pub fn is_sole_proprietor(&self) -> Option<bool> {
        match self.sole_proprietor.trim().to_ascii_uppercase().as_str() {
            "YES" | "Y" => Some(true),
            "NO" | "N" => Some(false),
            _ => None,
        }
    }

    /// `name` when present, otherwise the joined person name parts.
    pub fn display_name(&self) -> String {
        if !self.name.is_empty() {
            return self.name.clone();
        }
        [&self.first_name, &self.middle_name, &self.last_name]
            .iter()
            .filter(|part| !part.is_empty())
            .map(|part| part.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// An address in an NPI record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    #[serde(deserialize_with = "null_to_default")]
    pub address_1: String,
    #[serde(deserialize_with = "null_to_default")]
    pub address_2: String,
    #[serde(deserialize_with = "null_to_default")]
    pub city: String,
    #[serde(deserialize_with = "null_to_default")]
    pub state: String,
    #[serde(deserialize_with = "null_to_default")]
    pub postal_code: String,
    #[serde(deserialize_with = "null_to_default")]
    pub telephone_number: String,
    #[serde(deserialize_with = "null_to_default")]
    pub fax_number: String,
    #[serde(deserialize_with = "null_to_default")]
    pub address_type: String,
    /// "LOCATION" or "MAILING".
    #[serde(deserialize_with = "null_to_default")]
    pub address_purpose: String,
}

/// Other identifier attached to a record. Not populated by any lookup yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Identifier {
    pub code: String,
    pub issuer: String,
    pub state: String,
    pub identifier: String,
    #[serde(rename = "desc")]
    pub description: String,
}

/// Response envelope of the registry API.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ResultEnvelope {
    #[serde(default, deserialize_with = "lenient_int")]
    pub result_count: u64,
    #[serde(default, deserialize_with = "null_to_default")]
    pub results: Vec<LookupResult>,
    #[serde(default, rename = "Errors", deserialize_with = "null_to_default")]
    pub errors: Vec<UpstreamError>,
}

/// Validation message the registry returns instead of results.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct UpstreamError {
    pub description: String,
    pub field: String,
}

impl ResultEnvelope {
    pub(crate) fn from_slice(body: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(body)
    }

    /// Log the outcome of a decoded response.
    pub(crate) fn report(&self) {
        for error in &self.errors {
            tracing::warn!(
                field = %error.field,
                description = %error.description,
                "Registry rejected the query"
            );
        }
        tracing::debug!(
            result_count = self.result_count,
            results = self.results.len(),
            "Decoded registry response"
        );
    }

    /// The single record of an exact lookup.
    ///
    /// Anything but exactly one result (zero, or a fuzzy-shaped response with
    /// several) is treated as not found; there is no separate "ambiguous"
    /// outcome.
    pub(crate) fn into_single(self) -> Option<LookupResult> {
        if self.result_count != 1 {
            return None;
        }
        self.results.into_iter().next()
    }
}

fn null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrString<T> {
    Int(T),
    Str(String),
}

/// Integers arrive either as JSON numbers or as digit strings depending on the
/// API version; null and blank strings map to zero.
fn lenient_int<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr + Default,
{
    match Option::<IntOrString<T>>::deserialize(deserializer)? {
        None => Ok(T::default()),
        Some(IntOrString::Int(value)) => Ok(value),
        Some(IntOrString::Str(s)) if s.trim().is_empty() => Ok(T::default()),
        Some(IntOrString::Str(s)) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("invalid integer value: {:?}", s))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SINGLE: &str = r#"{
        "result_count": 1,
        "results": [{
            "number": 1234567890,
            "basic": {"first_name": "Jane", "last_name": "Doe"},
            "addresses": [{"address_purpose": "LOCATION", "city": "Austin"}]
        }]
    }"#;

    fn record_with_addresses(purposes: &[(&str, &str)]) -> LookupResult {
        LookupResult {
            addresses: purposes
                .iter()
                .map(|(purpose, city)| Address {
                    address_purpose: purpose.to_string(),
                    city: city.to_string(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_decode_single_record() {
        let envelope = ResultEnvelope::from_slice(SINGLE.as_bytes()).unwrap();
        let record = envelope.into_single().unwrap();

        assert_eq!(record.number, 1234567890);
        assert_eq!(record.basic.first_name, "Jane");
        assert_eq!(record.basic.last_name, "Doe");

        let address = get_address(&record, "LOCATION").unwrap();
        assert_eq!(address.city, "Austin");
    }

    #[test]
    fn test_decode_full_record() {
        let json = r#"{
            "number": 1215290382,
            "created_epoch": 1143158400,
            "last_updated_epoch": 1183939200,
            "enumeration_type": "NPI-1",
            "basic": {
                "status": "A",
                "credential": "M.D.",
                "first_name": "JOHN",
                "middle_name": "Q",
                "last_name": "SMITH",
                "name": "SMITH JOHN",
                "gender": "M",
                "sole_proprietor": "NO",
                "last_updated": "2007-07-09",
                "enumeration_date": "2006-03-24"
            },
            "addresses": [{
                "address_1": "100 MAIN ST",
                "address_2": "SUITE 4",
                "city": "AUSTIN",
                "state": "TX",
                "postal_code": "787011234",
                "telephone_number": "512-555-0100",
                "fax_number": "512-555-0101",
                "address_type": "DOM",
                "address_purpose": "MAILING"
            }]
        }"#;

        let record: LookupResult = serde_json::from_str(json).unwrap();
        assert_eq!(record.created_epoch, 1143158400);
        assert_eq!(record.last_updated_epoch, 1183939200);
        assert_eq!(record.enumeration_kind(), EnumerationType::Individual);
        assert_eq!(record.basic.credential, "M.D.");
        assert_eq!(record.basic.middle_name, "Q");
        assert_eq!(record.basic.gender, "M");
        assert_eq!(record.basic.is_sole_proprietor(), Some(false));
        assert_eq!(record.basic.last_updated, "2007-07-09");
        assert_eq!(record.basic.enumeration_date, "2006-03-24");

        let mailing = record.mailing_address().unwrap();
        assert_eq!(mailing.address_1, "100 MAIN ST");
        assert_eq!(mailing.address_2, "SUITE 4");
        assert_eq!(mailing.state, "TX");
        assert_eq!(mailing.postal_code, "787011234");
        assert_eq!(mailing.telephone_number, "512-555-0100");
        assert_eq!(mailing.fax_number, "512-555-0101");
        assert_eq!(mailing.address_type, "DOM");
        assert!(record.location_address().is_none());
    }

    #[test]
    fn test_numbers_as_strings_and_nulls() {
        let json = r#"{
            "number": "1215290382",
            "created_epoch": "1143158400000",
            "last_updated_epoch": null,
            "enumeration_type": "NPI-2",
            "basic": {"name": "ACME CLINIC", "credential": null},
            "addresses": null
        }"#;

        let record: LookupResult = serde_json::from_str(json).unwrap();
        assert_eq!(record.number, 1215290382);
        assert_eq!(record.created_epoch, 1143158400000);
        assert_eq!(record.last_updated_epoch, 0);
        assert_eq!(record.enumeration_kind(), EnumerationType::Organization);
        assert_eq!(record.basic.credential, "");
        assert!(record.addresses.is_empty());
    }

    #[test]
    fn test_non_numeric_number_is_rejected() {
        let result = serde_json::from_str::<LookupResult>(r#"{"number": "abc"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_single_requires_exactly_one() {
        let empty = ResultEnvelope::from_slice(br#"{"result_count": 0, "results": []}"#).unwrap();
        assert!(empty.into_single().is_none());

        let many = ResultEnvelope::from_slice(
            br#"{"result_count": 2, "results": [{"number": 1}, {"number": 2}]}"#,
        )
        .unwrap();
        assert!(many.into_single().is_none());

        // Count claims one record but the array is empty.
        let hollow = ResultEnvelope::from_slice(br#"{"result_count": 1, "results": []}"#).unwrap();
        assert!(hollow.into_single().is_none());
    }

    #[test]
    fn test_upstream_errors_envelope() {
        let envelope = ResultEnvelope::from_slice(
            br#"{"Errors": [{"description": "Invalid NPI number", "field": "number", "number": "04"}]}"#,
        )
        .unwrap();
        assert_eq!(envelope.result_count, 0);
        assert!(envelope.results.is_empty());
        assert_eq!(envelope.errors.len(), 1);
        assert_eq!(envelope.errors[0].field, "number");
    }

    #[test]
    fn test_address_lookup_returns_first_match() {
        let record = record_with_addresses(&[
            ("MAILING", "Dallas"),
            ("LOCATION", "Austin"),
            ("LOCATION", "Houston"),
        ]);
        assert_eq!(record.address("LOCATION").unwrap().city, "Austin");
        assert_eq!(record.address("MAILING").unwrap().city, "Dallas");
    }

    #[test]
    fn test_address_lookup_is_case_sensitive() {
        let record = record_with_addresses(&[("LOCATION", "Austin")]);
        assert!(record.address("location").is_none());
        assert!(record.address("").is_none());
        assert!(LookupResult::default().address("LOCATION").is_none());
    }

    #[test]
    fn test_display_name() {
        let person = BasicInfo {
            first_name: "JANE".into(),
            last_name: "DOE".into(),
            ..Default::default()
        };
        assert_eq!(person.display_name(), "JANE DOE");

        let org = BasicInfo {
            name: "ACME CLINIC".into(),
            ..Default::default()
        };
        assert_eq!(org.display_name(), "ACME CLINIC");
    }

    #[test]
    fn test_sole_proprietor_is_permissive() {
        let mut basic = BasicInfo {
            sole_proprietor: "yes".into(),
            ..Default::default()
        };
        assert_eq!(basic.is_sole_proprietor(), Some(true));
        basic.sole_proprietor = " n ".into();
        assert_eq!(basic.is_sole_proprietor(), Some(false));
        basic.sole_proprietor = "Y".into();
        assert_eq!(basic.is_sole_proprietor(), Some(true));
        basic.sole_proprietor = "X".into();
        assert_eq!(basic.is_sole_proprietor(), None);
    }
}
