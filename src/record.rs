//! The flat sighting record and its fixed column schema.

use std::borrow::Cow;
use std::fmt;

use serde::Deserialize;
use serde::de::{self, Deserializer, Visitor};

use crate::error::{ReportError, Result};

/// One sighting observation. Every value is kept as text, exactly as loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    #[serde(deserialize_with = "text")]
    pub id: String,
    #[serde(deserialize_with = "text")]
    pub year: String,
    #[serde(deserialize_with = "text")]
    pub month: String,
    #[serde(deserialize_with = "text")]
    pub day: String,
    #[serde(deserialize_with = "text")]
    pub time: String,
    #[serde(deserialize_with = "text")]
    pub location: String,
    #[serde(deserialize_with = "text")]
    pub state_or_province: String,
    #[serde(deserialize_with = "text")]
    pub title: String,
    #[serde(deserialize_with = "text")]
    pub description: String,
    #[serde(deserialize_with = "text")]
    pub locale: String,
    #[serde(deserialize_with = "text")]
    pub duration: String,
    #[serde(deserialize_with = "text")]
    pub credibility: String,
    #[serde(deserialize_with = "text")]
    pub location_flags: String,
    #[serde(deserialize_with = "text")]
    pub longitude: String,
    #[serde(deserialize_with = "text")]
    pub type_of_ufo_craft_flags: String,
    #[serde(deserialize_with = "text")]
    pub aliens_monsters_flags: String,
    #[serde(deserialize_with = "text")]
    pub apparent_ufo_occupant_activities_flags: String,
    #[serde(deserialize_with = "text")]
    pub places_visited_and_things_affected_flags: String,
    #[serde(deserialize_with = "text")]
    pub evidence_and_special_effects_flags: String,
    #[serde(deserialize_with = "text")]
    pub miscellaneous_details_flags: String,
    #[serde(deserialize_with = "text")]
    pub latitude: String,
    #[serde(deserialize_with = "text")]
    pub elevation: String,
    #[serde(deserialize_with = "text")]
    pub relative_altitude: String,
    #[serde(rename = "ref", deserialize_with = "text")]
    pub reference: String,
    #[serde(deserialize_with = "text")]
    pub strangeness: String,
    #[serde(deserialize_with = "text")]
    pub miscellaneous_flags: String,
    #[serde(deserialize_with = "text")]
    pub continent: String,
    #[serde(deserialize_with = "text")]
    pub country: String,
}

/// Builds `HEADER` plus name-based accessors from one field table, so the
/// column order and the accessors cannot drift apart.
macro_rules! schema {
    ($($field:ident => $name:literal),* $(,)?) => {
        /// Column order used by every tabular export.
        pub const HEADER: [&str; 28] = [$($name),*];

        impl Record {
            /// Returns the value of the field with the given schema name.
            pub fn get(&self, name: &str) -> Option<&str> {
                match name {
                    $($name => Some(self.$field.as_str()),)*
                    _ => None,
                }
            }

            /// Sets a field by schema name. Returns `false` for unknown names.
            pub fn set(&mut self, name: &str, value: String) -> bool {
                match name {
                    $($name => {
                        self.$field = value;
                        true
                    })*
                    _ => false,
                }
            }
        }
    };
}

schema! {
    id => "id",
    year => "year",
    month => "month",
    day => "day",
    time => "time",
    location => "location",
    state_or_province => "stateOrProvince",
    title => "title",
    description => "description",
    locale => "locale",
    duration => "duration",
    credibility => "credibility",
    location_flags => "locationFlags",
    longitude => "longitude",
    type_of_ufo_craft_flags => "typeOfUfoCraftFlags",
    aliens_monsters_flags => "aliensMonstersFlags",
    apparent_ufo_occupant_activities_flags => "apparentUfoOccupantActivitiesFlags",
    places_visited_and_things_affected_flags => "placesVisitedAndThingsAffectedFlags",
    evidence_and_special_effects_flags => "evidenceAndSpecialEffectsFlags",
    miscellaneous_details_flags => "miscellaneousDetailsFlags",
    latitude => "latitude",
    elevation => "elevation",
    relative_altitude => "relativeAltitude",
    reference => "ref",
    strangeness => "strangeness",
    miscellaneous_flags => "miscellaneousFlags",
    continent => "continent",
    country => "country",
}

/// The eight multi-valued tag fields, in scan order.
pub const FLAG_FIELDS: [&str; 8] = [
    "locationFlags",
    "typeOfUfoCraftFlags",
    "aliensMonstersFlags",
    "apparentUfoOccupantActivitiesFlags",
    "placesVisitedAndThingsAffectedFlags",
    "evidenceAndSpecialEffectsFlags",
    "miscellaneousDetailsFlags",
    "miscellaneousFlags",
];

impl Record {
    /// Raw text of the eight flag fields, in [`FLAG_FIELDS`] order.
    pub fn flags(&self) -> [&str; 8] {
        [
            self.location_flags.as_str(),
            self.type_of_ufo_craft_flags.as_str(),
            self.aliens_monsters_flags.as_str(),
            self.apparent_ufo_occupant_activities_flags.as_str(),
            self.places_visited_and_things_affected_flags.as_str(),
            self.evidence_and_special_effects_flags.as_str(),
            self.miscellaneous_details_flags.as_str(),
            self.miscellaneous_flags.as_str(),
        ]
    }

    pub fn credibility(&self) -> Result<i64> {
        self.integer("credibility", &self.credibility)
    }

    pub fn strangeness(&self) -> Result<i64> {
        self.integer("strangeness", &self.strangeness)
    }

    fn integer(&self, field: &'static str, value: &str) -> Result<i64> {
        value
            .trim()
            .parse()
            .map_err(|source| ReportError::FieldParse {
                id: self.id.clone(),
                field,
                value: value.to_string(),
                source,
            })
    }

    /// Projects the record onto [`HEADER`] for export.
    ///
    /// `description` loses its line breaks and the two scores are rewritten
    /// in canonical integer form. The record itself is left untouched.
    pub fn export_row(&self) -> Result<Vec<String>> {
        HEADER
            .iter()
            .map(|&name| match name {
                "description" => Ok(clean_description(&self.description).into_owned()),
                "credibility" => self.credibility().map(|v| v.to_string()),
                "strangeness" => self.strangeness().map(|v| v.to_string()),
                _ => Ok(self.get(name).unwrap_or_default().to_string()),
            })
            .collect()
    }
}

/// Removes `\n` so a description fits on one table or CSV row.
///
/// Carriage returns are left in place.
pub fn clean_description(text: &str) -> Cow<'_, str> {
    if text.contains('\n') {
        Cow::Owned(text.replace('\n', ""))
    } else {
        Cow::Borrowed(text)
    }
}

/// Accepts strings, numbers, booleans and null, keeping their textual form.
fn text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct TextVisitor;

    impl<'de> Visitor<'de> for TextVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a string, number, boolean or null")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<String, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_unit<E: de::Error>(self) -> std::result::Result<String, E> {
            Ok(String::new())
        }

        fn visit_none<E: de::Error>(self) -> std::result::Result<String, E> {
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(TextVisitor)
}
