use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A closed set of field values with a fixed risk weight each.
///
/// Labels match case-sensitively against [`Category::label`].
pub trait Category: Copy + Eq + fmt::Debug + 'static {
    /// Wire name of the observation field this category fills.
    const FIELD: &'static str;
    /// Every member, in display order.
    const ALL: &'static [Self];
    /// Weight used when the field is missing or not a recognised label.
    const DEFAULT_WEIGHT: f64;

    fn label(self) -> &'static str;
    fn weight(self) -> f64;

    fn from_label(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.label() == raw)
    }
}

/// Size class of loose rock on the slope. Larger rocks raise risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RockSize {
    /// < 0.5 m
    Small,
    /// 0.5-2 m
    Medium,
    /// > 2 m
    Large,
}

impl Category for RockSize {
    const FIELD: &'static str = "rockSize";
    const ALL: &'static [Self] = &[Self::Small, Self::Medium, Self::Large];
    const DEFAULT_WEIGHT: f64 = 0.2;

    fn label(self) -> &'static str {
        match self {
            Self::Small => "Small",
            Self::Medium => "Medium",
            Self::Large => "Large",
        }
    }

    fn weight(self) -> f64 {
        match self {
            Self::Small => 0.1,
            Self::Medium => 0.2,
            Self::Large => 0.3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoilType {
    Rock,
    Sand,
    Silt,
    Clay,
    Mixed,
}

impl Category for SoilType {
    const FIELD: &'static str = "soilType";
    const ALL: &'static [Self] = &[Self::Rock, Self::Sand, Self::Silt, Self::Clay, Self::Mixed];
    const DEFAULT_WEIGHT: f64 = 0.2;

    fn label(self) -> &'static str {
        match self {
            Self::Rock => "Rock",
            Self::Sand => "Sand",
            Self::Silt => "Silt",
            Self::Clay => "Clay",
            Self::Mixed => "Mixed",
        }
    }

    fn weight(self) -> f64 {
        match self {
            Self::Rock => 0.1,
            Self::Sand => 0.15,
            Self::Silt => 0.2,
            Self::Clay => 0.25,
            Self::Mixed => 0.2,
        }
    }
}

/// Vegetation cover. Denser cover binds soil and lowers risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vegetation {
    Dense,
    Moderate,
    Sparse,
    None,
}

impl Category for Vegetation {
    const FIELD: &'static str = "vegetation";
    const ALL: &'static [Self] = &[Self::Dense, Self::Moderate, Self::Sparse, Self::None];
    const DEFAULT_WEIGHT: f64 = 0.15;

    fn label(self) -> &'static str {
        match self {
            Self::Dense => "Dense",
            Self::Moderate => "Moderate",
            Self::Sparse => "Sparse",
            Self::None => "None",
        }
    }

    fn weight(self) -> f64 {
        match self {
            Self::Dense => 0.05,
            Self::Moderate => 0.1,
            Self::Sparse => 0.15,
            Self::None => 0.2,
        }
    }
}

/// A categorical field as it arrived from the user.
///
/// Unrecognised text is kept verbatim so it can be echoed back in tables and
/// exports; it scores with the category's default weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Label<T> {
    Known(T),
    Other(String),
    Missing,
}

impl<T> Default for Label<T> {
    fn default() -> Self {
        Label::Missing
    }
}

impl<T: Category> Label<T> {
    /// Exact, case-sensitive match; the empty string counts as missing.
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            return Label::Missing;
        }
        match T::from_label(raw) {
            Some(c) => Label::Known(c),
            None => Label::Other(raw.to_string()),
        }
    }

    pub fn known(&self) -> Option<T> {
        match self {
            Label::Known(c) => Some(*c),
            _ => None,
        }
    }

    pub fn weight(&self) -> f64 {
        self.known().map_or(T::DEFAULT_WEIGHT, Category::weight)
    }

    /// Text as entered; empty for a missing field.
    pub fn as_str(&self) -> &str {
        match self {
            Label::Known(c) => c.label(),
            Label::Other(raw) => raw,
            Label::Missing => "",
        }
    }
}

impl<T: Category> From<T> for Label<T> {
    fn from(c: T) -> Self {
        Label::Known(c)
    }
}

impl<T: Category> fmt::Display for Label<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<T: Category> Serialize for Label<T> {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        match self {
            Label::Missing => s.serialize_none(),
            other => s.serialize_str(other.as_str()),
        }
    }
}

impl<'de, T: Category> Deserialize<'de> for Label<T> {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        Ok(raw.map_or(Label::Missing, |s| Label::parse(&s)))
    }
}

/// One geological sample: the five inputs to the risk score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    /// Slope angle in degrees, nominally 0-90.
    pub slope: f64,
    #[serde(default)]
    pub rock_size: Label<RockSize>,
    #[serde(default)]
    pub soil_type: Label<SoilType>,
    #[serde(default)]
    pub vegetation: Label<Vegetation>,
    /// Rainfall in mm, nominally 0-200+.
    pub rainfall: f64,
}

impl Observation {
    pub fn new(
        slope: f64,
        rock_size: impl Into<Label<RockSize>>,
        soil_type: impl Into<Label<SoilType>>,
        vegetation: impl Into<Label<Vegetation>>,
        rainfall: f64,
    ) -> Self {
        Self {
            slope,
            rock_size: rock_size.into(),
            soil_type: soil_type.into(),
            vegetation: vegetation.into(),
            rainfall,
        }
    }

    /// Build from raw label text, as typed into a form or read from a file.
    pub fn from_labels(slope: f64, rock_size: &str, soil_type: &str, vegetation: &str, rainfall: f64) -> Self {
        Self {
            slope,
            rock_size: Label::parse(rock_size),
            soil_type: Label::parse(soil_type),
            vegetation: Label::parse(vegetation),
            rainfall,
        }
    }
}
