#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Measurement unit attached to a recipe or pantry ingredient.
///
/// On the wire a unit is written as its full name (`"Fluid Ounce"`). Parsing is
/// lenient: the variant name (`"FLUID_OUNCE"`), the full name and the
/// abbreviation (`"fl oz"`) are all accepted, case-insensitively.
///
/// When the `sea-orm` feature is enabled, this enum can be used directly in SeaORM entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
pub enum CookingUnit {
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "TEASPOON"))]
    Teaspoon,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "TABLESPOON"))]
    Tablespoon,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "CUP"))]
    Cup,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "FLUID_OUNCE"))]
    FluidOunce,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "PINT"))]
    Pint,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "QUART"))]
    Quart,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "GALLON"))]
    Gallon,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "MILLILITER"))]
    Milliliter,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "LITER"))]
    Liter,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "GRAM"))]
    Gram,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "KILOGRAM"))]
    Kilogram,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "OUNCE"))]
    Ounce,
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "POUND"))]
    Pound,
    /// Whole items ("3 carrots").
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "COUNT"))]
    Count,
}

impl CookingUnit {
    /// All units, in display order.
    pub const ALL: &'static [CookingUnit] = &[
        Self::Teaspoon,
        Self::Tablespoon,
        Self::Cup,
        Self::FluidOunce,
        Self::Pint,
        Self::Quart,
        Self::Gallon,
        Self::Milliliter,
        Self::Liter,
        Self::Gram,
        Self::Kilogram,
        Self::Ounce,
        Self::Pound,
        Self::Count,
    ];

    pub fn full_name(&self) -> &'static str {
        match self {
            Self::Teaspoon => "Teaspoon",
            Self::Tablespoon => "Tablespoon",
            Self::Cup => "Cup",
            Self::FluidOunce => "Fluid Ounce",
            Self::Pint => "Pint",
            Self::Quart => "Quart",
            Self::Gallon => "Gallon",
            Self::Milliliter => "Milliliter",
            Self::Liter => "Liter",
            Self::Gram => "Gram",
            Self::Kilogram => "Kilogram",
            Self::Ounce => "Ounce",
            Self::Pound => "Pound",
            Self::Count => "Count",
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            Self::Teaspoon => "tsp",
            Self::Tablespoon => "tbsp",
            Self::Cup => "cup",
            Self::FluidOunce => "fl oz",
            Self::Pint => "pt",
            Self::Quart => "qt",
            Self::Gallon => "gal",
            Self::Milliliter => "ml",
            Self::Liter => "l",
            Self::Gram => "g",
            Self::Kilogram => "kg",
            Self::Ounce => "oz",
            Self::Pound => "lb",
            Self::Count => "ct",
        }
    }
}

impl fmt::Display for CookingUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.full_name())
    }
}

/// Error when parsing an unknown unit string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseUnitError {
    invalid: String,
}

impl fmt::Display for ParseUnitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid unit '{}'. Valid values: {}",
            self.invalid,
            CookingUnit::ALL
                .iter()
                .map(|u| u.full_name())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl std::error::Error for ParseUnitError {}

impl FromStr for CookingUnit {
    type Err = ParseUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Variant names use '_' where full names use ' ' (FLUID_OUNCE / Fluid Ounce).
        let wanted = s.trim().replace('_', " ").to_lowercase();
        CookingUnit::ALL
            .iter()
            .copied()
            .find(|unit| {
                unit.full_name().eq_ignore_ascii_case(&wanted)
                    || unit.abbreviation().eq_ignore_ascii_case(&wanted)
            })
            .ok_or_else(|| ParseUnitError {
                invalid: s.to_string(),
            })
    }
}

impl Serialize for CookingUnit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.full_name())
    }
}

impl<'de> Deserialize<'de> for CookingUnit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
