use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Species
// ---------------------------------------------------------------------------

/// Penguin species. `Ord` follows declaration order so sets iterate the way
/// the species checkboxes are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Species {
    Adelie,
    Gentoo,
    Chinstrap,
}

impl Species {
    pub const ALL: [Species; 3] = [Species::Adelie, Species::Gentoo, Species::Chinstrap];

    pub fn as_str(self) -> &'static str {
        match self {
            Species::Adelie => "Adelie",
            Species::Gentoo => "Gentoo",
            Species::Chinstrap => "Chinstrap",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown species '{0}' (expected Adelie, Gentoo or Chinstrap)")]
pub struct UnknownSpecies(pub String);

impl FromStr for Species {
    type Err = UnknownSpecies;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Species::ALL
            .into_iter()
            .find(|sp| sp.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownSpecies(trimmed.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Attribute – the numeric columns a histogram can be drawn over
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Attribute {
    #[default]
    BillLengthMm,
    BillDepthMm,
    FlipperLengthMm,
    BodyMassG,
}

impl Attribute {
    pub const ALL: [Attribute; 4] = [
        Attribute::BillLengthMm,
        Attribute::BillDepthMm,
        Attribute::FlipperLengthMm,
        Attribute::BodyMassG,
    ];

    /// Column name as it appears in the dataset files.
    pub fn column(self) -> &'static str {
        match self {
            Attribute::BillLengthMm => "bill_length_mm",
            Attribute::BillDepthMm => "bill_depth_mm",
            Attribute::FlipperLengthMm => "flipper_length_mm",
            Attribute::BodyMassG => "body_mass_g",
        }
    }

    /// Axis label.
    pub fn label(self) -> &'static str {
        match self {
            Attribute::BillLengthMm => "Bill Length (mm)",
            Attribute::BillDepthMm => "Bill Depth (mm)",
            Attribute::FlipperLengthMm => "Flipper Length (mm)",
            Attribute::BodyMassG => "Body Mass (g)",
        }
    }

    /// Read this attribute from a record; `None` when the value is missing.
    pub fn value(self, record: &Record) -> Option<f64> {
        match self {
            Attribute::BillLengthMm => record.bill_length_mm,
            Attribute::BillDepthMm => record.bill_depth_mm,
            Attribute::FlipperLengthMm => record.flipper_length_mm,
            Attribute::BodyMassG => record.body_mass_g,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown attribute '{0}'")]
pub struct UnknownAttribute(pub String);

impl FromStr for Attribute {
    type Err = UnknownAttribute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Attribute::ALL
            .into_iter()
            .find(|a| a.column() == s.trim())
            .ok_or_else(|| UnknownAttribute(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the penguins table
// ---------------------------------------------------------------------------

/// One penguin. Numeric measurements and `sex` may be missing in the source
/// data; `NA`, `NaN` and empty cells all deserialize to `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(deserialize_with = "deserialize_species")]
    pub species: Species,
    pub island: String,
    #[serde(default, deserialize_with = "deserialize_measurement")]
    pub bill_length_mm: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_measurement")]
    pub bill_depth_mm: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_measurement")]
    pub flipper_length_mm: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_measurement")]
    pub body_mass_g: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_na_string")]
    pub sex: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub year: Option<i64>,
}

fn deserialize_species<'de, D: Deserializer<'de>>(de: D) -> Result<Species, D::Error> {
    let raw = String::deserialize(de)?;
    raw.parse().map_err(serde::de::Error::custom)
}

fn deserialize_measurement<'de, D: Deserializer<'de>>(de: D) -> Result<Option<f64>, D::Error> {
    let value: Option<f64> = csv::invalid_option(de)?;
    Ok(value.filter(|v| v.is_finite()))
}

fn deserialize_na_string<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    let raw: Option<String> = Option::deserialize(de)?;
    Ok(raw.filter(|s| !is_missing_token(s)))
}

/// Tokens pandas / R write for a missing cell.
pub fn is_missing_token(s: &str) -> bool {
    matches!(s.trim(), "" | "NA" | "NaN" | "nan" | "null" | "None")
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full, immutable dataset plus a few pre-computed indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
    /// Sorted set of island names.
    islands: BTreeSet<String>,
}

impl Dataset {
    pub fn from_records(records: Vec<Record>) -> Self {
        let islands = records.iter().map(|r| r.island.clone()).collect();
        Dataset { records, islands }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn islands(&self) -> &BTreeSet<String> {
        &self.islands
    }

    /// Number of records of the given species.
    pub fn species_count(&self, species: Species) -> usize {
        self.records.iter().filter(|r| r.species == species).count()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn species_parse_is_case_insensitive_and_rejects_unknown() {
        assert_eq!("gentoo".parse::<Species>(), Ok(Species::Gentoo));
        assert_eq!(" Adelie ".parse::<Species>(), Ok(Species::Adelie));
        assert_eq!(
            "Emperor".parse::<Species>(),
            Err(UnknownSpecies("Emperor".into()))
        );
    }

    #[test]
    fn attribute_reads_matching_field() {
        let rec = crate::data::test_support::record(Species::Adelie, Some(39.1), None);
        assert_eq!(Attribute::BillLengthMm.value(&rec), Some(39.1));
        assert_eq!(Attribute::BillDepthMm.value(&rec), None);
        assert_eq!(
            "flipper_length_mm".parse::<Attribute>(),
            Ok(Attribute::FlipperLengthMm)
        );
        assert!("beak".parse::<Attribute>().is_err());
    }

    #[test]
    fn dataset_indexes_islands_and_counts() {
        let ds = crate::data::test_support::sample_dataset();
        assert_eq!(ds.len(), 6);
        assert!(ds.islands().contains("Biscoe"));
        assert_eq!(ds.species_count(Species::Chinstrap), 1);
    }
}
