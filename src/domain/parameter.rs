//! Evaluation outputs: calculated parameters and the parameter set.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::{BuildingNature, Field, Locale, ZoneCode};

/// The six regulated dimensions, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterName {
    FrontalSetback,
    LateralSetback,
    RearSetback,
    MinimumFrontage,
    MaximumHeight,
    DevelopmentLevy,
}

impl ParameterName {
    pub const ALL: [ParameterName; 6] = [
        ParameterName::FrontalSetback,
        ParameterName::LateralSetback,
        ParameterName::RearSetback,
        ParameterName::MinimumFrontage,
        ParameterName::MaximumHeight,
        ParameterName::DevelopmentLevy,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ParameterName::FrontalSetback => "frontal_setback",
            ParameterName::LateralSetback => "lateral_setback",
            ParameterName::RearSetback => "rear_setback",
            ParameterName::MinimumFrontage => "minimum_frontage",
            ParameterName::MaximumHeight => "maximum_height",
            ParameterName::DevelopmentLevy => "development_levy",
        }
    }

    pub fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (ParameterName::FrontalSetback, Locale::En) => "Frontal setback",
            (ParameterName::FrontalSetback, Locale::PtBr) => "Recuo frontal",
            (ParameterName::LateralSetback, Locale::En) => "Lateral setback",
            (ParameterName::LateralSetback, Locale::PtBr) => "Recuo lateral",
            (ParameterName::RearSetback, Locale::En) => "Rear setback",
            (ParameterName::RearSetback, Locale::PtBr) => "Recuo de fundos",
            (ParameterName::MinimumFrontage, Locale::En) => "Minimum frontage",
            (ParameterName::MinimumFrontage, Locale::PtBr) => "Testada mínima",
            (ParameterName::MaximumHeight, Locale::En) => "Maximum height",
            (ParameterName::MaximumHeight, Locale::PtBr) => "Altura máxima",
            (ParameterName::DevelopmentLevy, Locale::En) => "Development levy",
            (ParameterName::DevelopmentLevy, Locale::PtBr) => "Outorga onerosa",
        }
    }
}

impl fmt::Display for ParameterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Meters,
    /// A yes/no style status (the development levy).
    Status,
}

impl Unit {
    pub fn key(self) -> &'static str {
        match self {
            Unit::Meters => "meters",
            Unit::Status => "status",
        }
    }
}

/// Non-numeric outcomes the legislation speaks in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "symbol", rename_all = "snake_case")]
pub enum Symbol {
    /// No height limit.
    Unrestricted,
    /// The development levy is charged.
    LevyApplies,
    /// The development levy is waived.
    LevyWaived,
    /// No setback is required unless the wall has openings, in which case
    /// `minimum` meters apply.
    ZeroUnlessOpenings { minimum: f64 },
}

impl Symbol {
    pub fn text(self, locale: Locale) -> String {
        match (self, locale) {
            (Symbol::Unrestricted, Locale::En) => "unrestricted".to_string(),
            (Symbol::Unrestricted, Locale::PtBr) => "livre".to_string(),
            (Symbol::LevyApplies, Locale::En) => "applies".to_string(),
            (Symbol::LevyApplies, Locale::PtBr) => "cobrança".to_string(),
            (Symbol::LevyWaived, Locale::En) => "waived".to_string(),
            (Symbol::LevyWaived, Locale::PtBr) => "livre".to_string(),
            (Symbol::ZeroUnlessOpenings { minimum }, Locale::En) => {
                format!("0 m, except openings → minimum {minimum:.2} m")
            }
            (Symbol::ZeroUnlessOpenings { minimum }, Locale::PtBr) => {
                format!("0 m (exceto se houver aberturas → mínimo {minimum:.2} m)")
            }
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text(Locale::En))
    }
}

/// Tagged parameter value, so callers never have to sniff strings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ParamValue {
    Numeric(f64),
    Symbolic(Symbol),
    Absent,
}

impl ParamValue {
    pub fn is_absent(self) -> bool {
        matches!(self, ParamValue::Absent)
    }
}

/// Why a parameter could not be produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParamError {
    /// The zone is absent from every table relevant to this parameter.
    #[error("zone {zone} not catalogued")]
    ZoneNotFound { zone: ZoneCode },

    #[error("use '{land_use}' not recognized for zone {zone}")]
    UseNotRecognized { zone: ZoneCode, land_use: String },

    #[error("combination of zone {zone} and nature {nature} not found")]
    CombinationNotFound { zone: ZoneCode, nature: BuildingNature },

    /// A required input (floors, height, avenue, nature) is missing.
    #[error("insufficient data: {} required", field_list(.missing, Locale::En))]
    InsufficientData { missing: Vec<Field> },
}

impl ParamError {
    /// Stable machine-readable code (used by the CSV export).
    pub fn code(&self) -> &'static str {
        match self {
            ParamError::ZoneNotFound { .. } => "zone_not_found",
            ParamError::UseNotRecognized { .. } => "use_not_recognized",
            ParamError::CombinationNotFound { .. } => "combination_not_found",
            ParamError::InsufficientData { .. } => "insufficient_data",
        }
    }

    pub fn localized(&self, locale: Locale) -> String {
        match locale {
            Locale::En => self.to_string(),
            Locale::PtBr => match self {
                ParamError::ZoneNotFound { zone } => format!("Zona {zone} não catalogada"),
                ParamError::UseNotRecognized { zone, land_use } => {
                    format!("Uso {} não reconhecido para zona {zone}", land_use.trim())
                }
                ParamError::CombinationNotFound { zone, nature } => format!(
                    "Combinação zona {zone} + natureza {} não encontrada",
                    nature.label(Locale::PtBr)
                ),
                ParamError::InsufficientData { missing } => format!(
                    "Dados insuficientes para cálculo ({} necessários)",
                    field_list(missing, Locale::PtBr)
                ),
            },
        }
    }
}

fn field_list(fields: &[Field], locale: Locale) -> String {
    let joiner = match locale {
        Locale::En => " and ",
        Locale::PtBr => " e ",
    };
    fields
        .iter()
        .map(|f| f.label(locale))
        .collect::<Vec<_>>()
        .join(joiner)
}

/// One evaluated dimension.
///
/// Either resolved (`error` is `None`; `value` may still be `Absent` when the
/// regulation does not apply) or blocked (`error` is set and `value` is
/// `Absent`). Use the constructors; they keep the two states apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatedParameter {
    pub name: ParameterName,
    pub value: ParamValue,
    pub unit: Unit,
    /// Human-readable provenance ("Zone ZC1 - residential use").
    pub rule: String,
    /// Input fields the outcome depended on.
    pub depends_on: Vec<Field>,
    pub error: Option<ParamError>,
}

impl CalculatedParameter {
    pub fn resolved(
        name: ParameterName,
        value: ParamValue,
        unit: Unit,
        rule: impl Into<String>,
        depends_on: Vec<Field>,
    ) -> Self {
        Self {
            name,
            value,
            unit,
            rule: rule.into(),
            depends_on,
            error: None,
        }
    }

    /// Resolved, but the regulation does not constrain this parameter.
    pub fn not_applicable(
        name: ParameterName,
        unit: Unit,
        rule: impl Into<String>,
        depends_on: Vec<Field>,
    ) -> Self {
        Self::resolved(name, ParamValue::Absent, unit, rule, depends_on)
    }

    pub fn blocked(
        name: ParameterName,
        unit: Unit,
        rule: impl Into<String>,
        depends_on: Vec<Field>,
        error: ParamError,
    ) -> Self {
        Self {
            name,
            value: ParamValue::Absent,
            unit,
            rule: rule.into(),
            depends_on,
            error: Some(error),
        }
    }

    pub fn is_blocked(&self) -> bool {
        self.error.is_some()
    }

    /// Value as shown to a person: numbers with two decimals and the unit,
    /// symbols in the requested language, errors as their explanation.
    pub fn display_value(&self, locale: Locale) -> String {
        if let Some(err) = &self.error {
            return err.localized(locale);
        }
        match self.value {
            ParamValue::Numeric(v) => match self.unit {
                Unit::Meters => format!("{v:.2} m"),
                Unit::Status => format!("{v:.2}"),
            },
            ParamValue::Symbolic(symbol) => symbol.text(locale),
            ParamValue::Absent => match locale {
                Locale::En => "not applicable".to_string(),
                Locale::PtBr => "não se aplica".to_string(),
            },
        }
    }
}

/// All parameters for one input, in `ParameterName::ALL` order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    pub legislation: String,
    pub municipality: String,
    parameters: Vec<CalculatedParameter>,
}

impl ParameterSet {
    pub fn new(legislation: impl Into<String>, municipality: impl Into<String>) -> Self {
        Self {
            legislation: legislation.into(),
            municipality: municipality.into(),
            parameters: Vec::with_capacity(ParameterName::ALL.len()),
        }
    }

    /// Insert a parameter, replacing any earlier entry with the same name in
    /// place (insertion order is preserved).
    pub fn insert(&mut self, parameter: CalculatedParameter) {
        match self.parameters.iter_mut().find(|p| p.name == parameter.name) {
            Some(slot) => *slot = parameter,
            None => self.parameters.push(parameter),
        }
    }

    pub fn get(&self, name: ParameterName) -> Option<&CalculatedParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CalculatedParameter> {
        self.parameters.iter()
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// True when every known parameter has an entry.
    pub fn is_complete(&self) -> bool {
        ParameterName::ALL.iter().all(|name| self.get(*name).is_some())
    }

    pub fn blocked(&self) -> impl Iterator<Item = &CalculatedParameter> {
        self.parameters.iter().filter(|p| p.is_blocked())
    }
}

/// A parameter set keyed by the parcel it was computed for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParcelResult {
    pub parcel_id: String,
    pub parameters: ParameterSet,
    /// Mandatory form fields the parcel's input did not supply.
    pub missing_fields: Vec<Field>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meters(name: ParameterName, v: f64) -> CalculatedParameter {
        CalculatedParameter::resolved(name, ParamValue::Numeric(v), Unit::Meters, "rule", vec![Field::Zone])
    }

    #[test]
    fn blocked_parameters_never_carry_a_value() {
        let p = CalculatedParameter::blocked(
            ParameterName::MaximumHeight,
            Unit::Meters,
            "Zone ZH1",
            vec![Field::Zone],
            ParamError::ZoneNotFound { zone: ZoneCode::Zh1 },
        );
        assert!(p.is_blocked());
        assert!(p.value.is_absent());
        assert_eq!(p.display_value(Locale::En), "zone ZH1 not catalogued");
        assert_eq!(p.display_value(Locale::PtBr), "Zona ZH1 não catalogada");
    }

    #[test]
    fn not_applicable_is_not_an_error() {
        let p = CalculatedParameter::not_applicable(
            ParameterName::MinimumFrontage,
            Unit::Meters,
            "Zone ZH2 - not applicable",
            vec![Field::Zone, Field::Nature],
        );
        assert!(!p.is_blocked());
        assert!(p.value.is_absent());
        assert_eq!(p.display_value(Locale::En), "not applicable");
    }

    #[test]
    fn numeric_meters_render_with_two_decimals() {
        let p = meters(ParameterName::LateralSetback, 2.0);
        assert_eq!(p.display_value(Locale::En), "2.00 m");
    }

    #[test]
    fn zero_unless_openings_mentions_the_group_minimum() {
        let s = Symbol::ZeroUnlessOpenings { minimum: 1.5 };
        assert_eq!(s.text(Locale::En), "0 m, except openings → minimum 1.50 m");
        assert_eq!(
            s.text(Locale::PtBr),
            "0 m (exceto se houver aberturas → mínimo 1.50 m)"
        );
    }

    #[test]
    fn insufficient_data_lists_missing_fields() {
        let err = ParamError::InsufficientData {
            missing: vec![Field::Floors, Field::TotalHeight],
        };
        assert_eq!(
            err.to_string(),
            "insufficient data: floor count and total height required"
        );
        assert_eq!(
            err.localized(Locale::PtBr),
            "Dados insuficientes para cálculo (pavimentos e altura total necessários)"
        );
        assert_eq!(err.code(), "insufficient_data");
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut set = ParameterSet::new("LEG", "SORRISO");
        set.insert(meters(ParameterName::FrontalSetback, 4.0));
        set.insert(meters(ParameterName::LateralSetback, 1.5));
        set.insert(meters(ParameterName::FrontalSetback, 2.0));

        let names: Vec<_> = set.iter().map(|p| p.name).collect();
        assert_eq!(names, vec![ParameterName::FrontalSetback, ParameterName::LateralSetback]);
        assert_eq!(
            set.get(ParameterName::FrontalSetback).unwrap().value,
            ParamValue::Numeric(2.0)
        );
        assert!(!set.is_complete());
    }

    #[test]
    fn values_serialize_as_tagged_variants() {
        let json = serde_json::to_value(ParamValue::Symbolic(Symbol::Unrestricted)).unwrap();
        assert_eq!(json["kind"], "symbolic");
        assert_eq!(json["value"]["symbol"], "unrestricted");

        let json = serde_json::to_value(ParamValue::Numeric(12.0)).unwrap();
        assert_eq!(json["kind"], "numeric");
        assert_eq!(json["value"], 12.0);

        let json = serde_json::to_value(ParamValue::Absent).unwrap();
        assert_eq!(json["kind"], "absent");
    }
}
