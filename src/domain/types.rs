//! Shared input types.
//!
//! These types are intentionally kept as closed enumerations so that:
//!
//! - an unknown zone or nature is rejected at the boundary (parse time)
//! - evaluators can `match` exhaustively without a catch-all default
//! - records serialize to stable, human-readable tokens in JSON/CSV

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Municipality assumed when the caller does not name one.
pub const DEFAULT_MUNICIPALITY: &str = "SORRISO";

/// Municipal zoning classification codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ZoneCode {
    Zad1,
    Zad2,
    Zc1,
    Zc2,
    Zct1,
    Zct2,
    Zct3,
    Zct4,
    Zeis,
    Zh1,
    Zh2,
    Zh3,
    Zhl,
    Zi1,
    Zi2,
    Zia1,
    Zia2,
    Zii,
}

impl ZoneCode {
    pub const ALL: [ZoneCode; 18] = [
        ZoneCode::Zad1,
        ZoneCode::Zad2,
        ZoneCode::Zc1,
        ZoneCode::Zc2,
        ZoneCode::Zct1,
        ZoneCode::Zct2,
        ZoneCode::Zct3,
        ZoneCode::Zct4,
        ZoneCode::Zeis,
        ZoneCode::Zh1,
        ZoneCode::Zh2,
        ZoneCode::Zh3,
        ZoneCode::Zhl,
        ZoneCode::Zi1,
        ZoneCode::Zi2,
        ZoneCode::Zia1,
        ZoneCode::Zia2,
        ZoneCode::Zii,
    ];

    /// Legislation code, as printed on zoning maps.
    pub fn code(self) -> &'static str {
        match self {
            ZoneCode::Zad1 => "ZAD1",
            ZoneCode::Zad2 => "ZAD2",
            ZoneCode::Zc1 => "ZC1",
            ZoneCode::Zc2 => "ZC2",
            ZoneCode::Zct1 => "ZCT1",
            ZoneCode::Zct2 => "ZCT2",
            ZoneCode::Zct3 => "ZCT3",
            ZoneCode::Zct4 => "ZCT4",
            ZoneCode::Zeis => "ZEIS",
            ZoneCode::Zh1 => "ZH1",
            ZoneCode::Zh2 => "ZH2",
            ZoneCode::Zh3 => "ZH3",
            ZoneCode::Zhl => "ZHL",
            ZoneCode::Zi1 => "ZI1",
            ZoneCode::Zi2 => "ZI2",
            ZoneCode::Zia1 => "ZIA1",
            ZoneCode::Zia2 => "ZIA2",
            ZoneCode::Zii => "ZII",
        }
    }

    /// Transition zones (ZCT*) take their lateral/rear setback group from the
    /// zone they cross.
    pub fn is_transition(self) -> bool {
        matches!(
            self,
            ZoneCode::Zct1 | ZoneCode::Zct2 | ZoneCode::Zct3 | ZoneCode::Zct4
        )
    }
}

impl fmt::Display for ZoneCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ZoneCode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ZoneCode::ALL
            .into_iter()
            .find(|z| z.code().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseError::UnknownZone(wanted.to_string()))
    }
}

/// Category of development; gates which fields and parameters are relevant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum BuildingNature {
    /// Splitting an existing lot (desmembramento).
    Subdivision,
    /// Allotment with condominium (loteamento e condomínio).
    AllotmentWithCondominium,
    /// Architectural project.
    Architectural,
    /// Urbanistic project.
    Urbanistic,
    /// The regulation does not constrain lot dimensions for this project.
    NotApplicable,
}

impl BuildingNature {
    pub const ALL: [BuildingNature; 5] = [
        BuildingNature::Subdivision,
        BuildingNature::AllotmentWithCondominium,
        BuildingNature::Architectural,
        BuildingNature::Urbanistic,
        BuildingNature::NotApplicable,
    ];

    /// Natures for which minimum frontage and minimum lot area are regulated.
    pub const LOT_SPLITTING: [BuildingNature; 2] = [
        BuildingNature::Subdivision,
        BuildingNature::AllotmentWithCondominium,
    ];

    pub fn token(self) -> &'static str {
        match self {
            BuildingNature::Subdivision => "subdivision",
            BuildingNature::AllotmentWithCondominium => "allotment-with-condominium",
            BuildingNature::Architectural => "architectural",
            BuildingNature::Urbanistic => "urbanistic",
            BuildingNature::NotApplicable => "not-applicable",
        }
    }

    pub fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (BuildingNature::Subdivision, Locale::En) => "subdivision",
            (BuildingNature::Subdivision, Locale::PtBr) => "desmembramento",
            (BuildingNature::AllotmentWithCondominium, Locale::En) => "allotment with condominium",
            (BuildingNature::AllotmentWithCondominium, Locale::PtBr) => "loteamento e condomínio",
            (BuildingNature::Architectural, Locale::En) => "architectural project",
            (BuildingNature::Architectural, Locale::PtBr) => "projeto arquitetônico",
            (BuildingNature::Urbanistic, Locale::En) => "urbanistic project",
            (BuildingNature::Urbanistic, Locale::PtBr) => "projeto urbanístico",
            (BuildingNature::NotApplicable, Locale::En) => "not applicable",
            (BuildingNature::NotApplicable, Locale::PtBr) => "não se aplica",
        }
    }
}

impl fmt::Display for BuildingNature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for BuildingNature {
    type Err = ParseError;

    /// Accepts the kebab-case tokens plus the labels used on municipal forms
    /// (Portuguese, with or without accents).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_token(s);
        let nature = match key.as_str() {
            "subdivision" | "desmembramento" => BuildingNature::Subdivision,
            "allotment with condominium"
            | "allotment"
            | "loteamento e condominio"
            | "loteamento e condomínio" => BuildingNature::AllotmentWithCondominium,
            "architectural" | "architectural project" | "arquitetonico" | "arquitetônico" => {
                BuildingNature::Architectural
            }
            "urbanistic" | "urbanistic project" | "urbanistico" | "urbanístico" => {
                BuildingNature::Urbanistic
            }
            "not applicable" | "n/a" | "nao se aplica" | "não se aplica" => {
                BuildingNature::NotApplicable
            }
            _ => return Err(ParseError::UnknownNature(s.trim().to_string())),
        };
        Ok(nature)
    }
}

/// Land use (typology) recognised by the frontal setback schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LandUse {
    Residential,
    Commercial,
}

impl LandUse {
    /// Case-insensitive, trimmed; English or Portuguese.
    ///
    /// Returns `None` for anything else (e.g. "mixed"): an unrecognised use is
    /// a per-parameter outcome, not a parse failure.
    pub fn parse(raw: &str) -> Option<LandUse> {
        match normalize_token(raw).as_str() {
            "residential" | "residencial" => Some(LandUse::Residential),
            "commercial" | "comercial" => Some(LandUse::Commercial),
            _ => None,
        }
    }
}

/// Output language for explanations and advisories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    #[value(name = "en")]
    En,
    #[serde(rename = "pt-br")]
    #[value(name = "pt-br")]
    PtBr,
}

impl FromStr for Locale {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "en" | "en us" | "english" => Ok(Locale::En),
            "pt br" | "pt" | "portuguese" => Ok(Locale::PtBr),
            _ => Err(ParseError::UnknownLocale(s.trim().to_string())),
        }
    }
}

/// Every input field a form may carry. Used for dependency lists, missing
/// field reports and the dependency resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Zone,
    Use,
    Nature,
    Floors,
    TotalHeight,
    Avenue,
    CrossedZone,
    BuiltArea,
    MinimumFrontage,
    MinimumLotArea,
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::Zone,
        Field::Use,
        Field::Nature,
        Field::Floors,
        Field::TotalHeight,
        Field::Avenue,
        Field::CrossedZone,
        Field::BuiltArea,
        Field::MinimumFrontage,
        Field::MinimumLotArea,
    ];

    /// Whether a `CalculationInput` can carry this field. Minimum frontage
    /// and minimum lot area are collected by the form for the approval record
    /// but never feed an evaluator.
    pub fn is_evaluator_input(self) -> bool {
        !matches!(self, Field::MinimumFrontage | Field::MinimumLotArea)
    }

    pub fn key(self) -> &'static str {
        match self {
            Field::Zone => "zone",
            Field::Use => "use",
            Field::Nature => "nature",
            Field::Floors => "floors",
            Field::TotalHeight => "total_height",
            Field::Avenue => "avenue",
            Field::CrossedZone => "crossed_zone",
            Field::BuiltArea => "built_area",
            Field::MinimumFrontage => "minimum_frontage",
            Field::MinimumLotArea => "minimum_lot_area",
        }
    }

    pub fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Field::Zone, Locale::En) => "zone",
            (Field::Zone, Locale::PtBr) => "zona",
            (Field::Use, Locale::En) => "use",
            (Field::Use, Locale::PtBr) => "tipologia",
            (Field::Nature, Locale::En) => "nature",
            (Field::Nature, Locale::PtBr) => "natureza",
            (Field::Floors, Locale::En) => "floor count",
            (Field::Floors, Locale::PtBr) => "pavimentos",
            (Field::TotalHeight, Locale::En) => "total height",
            (Field::TotalHeight, Locale::PtBr) => "altura total",
            (Field::Avenue, Locale::En) => "avenue",
            (Field::Avenue, Locale::PtBr) => "avenida",
            (Field::CrossedZone, Locale::En) => "crossed zone",
            (Field::CrossedZone, Locale::PtBr) => "zona atravessada",
            (Field::BuiltArea, Locale::En) => "built area",
            (Field::BuiltArea, Locale::PtBr) => "área construída",
            (Field::MinimumFrontage, Locale::En) => "minimum frontage",
            (Field::MinimumFrontage, Locale::PtBr) => "testada mínima",
            (Field::MinimumLotArea, Locale::En) => "minimum lot area",
            (Field::MinimumLotArea, Locale::PtBr) => "área mínima do lote",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Everything the evaluators need to know about one parcel.
///
/// Only `municipality` has an implicit default; every optional field stays
/// `None` unless the caller sets it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationInput {
    pub zone: ZoneCode,
    /// Free-form use/typology as typed by the caller ("Residencial", "commercial", ...).
    pub land_use: String,
    pub municipality: String,
    pub floors: Option<u32>,
    /// Total building height in meters.
    pub total_height: Option<f64>,
    pub avenue: Option<String>,
    pub nature: Option<BuildingNature>,
    /// Only consulted when `zone` is a transition zone.
    pub crossed_zone: Option<ZoneCode>,
    /// Built area in square meters.
    pub built_area: Option<f64>,
}

impl CalculationInput {
    pub fn new(zone: ZoneCode, land_use: impl Into<String>) -> Self {
        Self {
            zone,
            land_use: land_use.into(),
            municipality: DEFAULT_MUNICIPALITY.to_string(),
            floors: None,
            total_height: None,
            avenue: None,
            nature: None,
            crossed_zone: None,
            built_area: None,
        }
    }

    pub fn with_municipality(mut self, municipality: impl Into<String>) -> Self {
        self.municipality = municipality.into();
        self
    }

    pub fn with_floors(mut self, floors: u32) -> Self {
        self.floors = Some(floors);
        self
    }

    pub fn with_total_height(mut self, meters: f64) -> Self {
        self.total_height = Some(meters);
        self
    }

    pub fn with_avenue(mut self, avenue: impl Into<String>) -> Self {
        self.avenue = Some(avenue.into());
        self
    }

    pub fn with_nature(mut self, nature: BuildingNature) -> Self {
        self.nature = Some(nature);
        self
    }

    pub fn with_crossed_zone(mut self, zone: ZoneCode) -> Self {
        self.crossed_zone = Some(zone);
        self
    }

    pub fn with_built_area(mut self, square_meters: f64) -> Self {
        self.built_area = Some(square_meters);
        self
    }

    /// Avenue with surrounding whitespace removed; blank counts as absent.
    pub fn avenue_trimmed(&self) -> Option<&str> {
        self.avenue.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// Whether the caller supplied a value for `field`.
    ///
    /// Output-only fields (minimum frontage, minimum lot area) are never
    /// supplied by an input record.
    pub fn has(&self, field: Field) -> bool {
        match field {
            Field::Zone => true,
            Field::Use => !self.land_use.trim().is_empty(),
            Field::Nature => self.nature.is_some(),
            Field::Floors => self.floors.is_some(),
            Field::TotalHeight => self.total_height.is_some(),
            Field::Avenue => self.avenue_trimmed().is_some(),
            Field::CrossedZone => self.crossed_zone.is_some(),
            Field::BuiltArea => self.built_area.is_some(),
            Field::MinimumFrontage | Field::MinimumLotArea => false,
        }
    }
}

/// Lowercase, trim, fold `-`/`_` into spaces and collapse runs of whitespace.
fn normalize_token(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .replace(['-', '_'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_codes_parse_case_insensitively() {
        assert_eq!(" zct2 ".parse::<ZoneCode>().unwrap(), ZoneCode::Zct2);
        assert_eq!("ZEIS".parse::<ZoneCode>().unwrap(), ZoneCode::Zeis);
        assert_eq!(
            "ZX1".parse::<ZoneCode>(),
            Err(ParseError::UnknownZone("ZX1".to_string()))
        );
        assert!("".parse::<ZoneCode>().is_err());
    }

    #[test]
    fn zone_code_serializes_as_legislation_code() {
        let json = serde_json::to_string(&ZoneCode::Zia1).unwrap();
        assert_eq!(json, "\"ZIA1\"");
        for zone in ZoneCode::ALL {
            assert_eq!(zone.to_string().parse::<ZoneCode>().unwrap(), zone);
        }
    }

    #[test]
    fn only_zct_zones_are_transitions() {
        let transitions: Vec<_> = ZoneCode::ALL.into_iter().filter(|z| z.is_transition()).collect();
        assert_eq!(
            transitions,
            vec![ZoneCode::Zct1, ZoneCode::Zct2, ZoneCode::Zct3, ZoneCode::Zct4]
        );
    }

    #[test]
    fn nature_accepts_form_labels() {
        assert_eq!(
            "Loteamento e Condomínio".parse::<BuildingNature>().unwrap(),
            BuildingNature::AllotmentWithCondominium
        );
        assert_eq!(
            "allotment_with_condominium".parse::<BuildingNature>().unwrap(),
            BuildingNature::AllotmentWithCondominium
        );
        assert_eq!(
            "Não se aplica".parse::<BuildingNature>().unwrap(),
            BuildingNature::NotApplicable
        );
        assert_eq!(
            "Arquitetonico".parse::<BuildingNature>().unwrap(),
            BuildingNature::Architectural
        );
        assert!("demolition".parse::<BuildingNature>().is_err());
    }

    #[test]
    fn land_use_is_trimmed_and_case_insensitive() {
        assert_eq!(LandUse::parse("  RESIDENTIAL "), Some(LandUse::Residential));
        assert_eq!(LandUse::parse("Comercial"), Some(LandUse::Commercial));
        assert_eq!(LandUse::parse("Misto"), None);
    }

    #[test]
    fn input_defaults_only_the_municipality() {
        let input = CalculationInput::new(ZoneCode::Zc1, "residential");
        assert_eq!(input.municipality, DEFAULT_MUNICIPALITY);
        assert!(input.floors.is_none());
        assert!(input.total_height.is_none());
        assert!(input.nature.is_none());
        assert!(!input.has(Field::Avenue));
    }

    #[test]
    fn blank_avenue_counts_as_missing() {
        let input = CalculationInput::new(ZoneCode::Zct2, "residential").with_avenue("   ");
        assert_eq!(input.avenue_trimmed(), None);
        assert!(!input.has(Field::Avenue));
    }
}
