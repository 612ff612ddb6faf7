//! Minimum frontage.

use crate::catalog::Catalog;
use crate::domain::{
    BuildingNature, CalculatedParameter, CalculationInput, Field, Locale, ParamError, ParamValue, ParameterName,
    Unit,
};

/// Table lookup on `(zone, nature)`.
///
/// `NotApplicable` is checked first and resolves to an absent value without
/// an error: the regulation does not constrain frontage for that project.
pub fn minimum_frontage(input: &CalculationInput, catalog: &Catalog) -> CalculatedParameter {
    let name = ParameterName::MinimumFrontage;
    let zone = input.zone;
    let depends_on = vec![Field::Zone, Field::Nature];

    let nature = match input.nature {
        Some(BuildingNature::NotApplicable) => {
            return CalculatedParameter::not_applicable(
                name,
                Unit::Meters,
                format!("Zone {zone} - not applicable"),
                depends_on,
            );
        }
        Some(nature) => nature,
        None => {
            return CalculatedParameter::blocked(
                name,
                Unit::Meters,
                format!("Zone {zone}"),
                depends_on,
                ParamError::InsufficientData {
                    missing: vec![Field::Nature],
                },
            );
        }
    };

    let rule = format!("Zone {zone} - {}", nature.label(Locale::En));
    match catalog.frontage(zone, nature) {
        Some(meters) => {
            CalculatedParameter::resolved(name, ParamValue::Numeric(meters), Unit::Meters, rule, depends_on)
        }
        None => CalculatedParameter::blocked(
            name,
            Unit::Meters,
            rule,
            depends_on,
            ParamError::CombinationNotFound { zone, nature },
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ZoneCode;

    fn eval(zone: ZoneCode, nature: Option<BuildingNature>) -> CalculatedParameter {
        let mut input = CalculationInput::new(zone, "residential");
        input.nature = nature;
        minimum_frontage(&input, Catalog::standard())
    }

    #[test]
    fn table_values() {
        assert_eq!(
            eval(ZoneCode::Zad1, Some(BuildingNature::Subdivision)).value,
            ParamValue::Numeric(10.0)
        );
        assert_eq!(
            eval(ZoneCode::Zad1, Some(BuildingNature::AllotmentWithCondominium)).value,
            ParamValue::Numeric(15.0)
        );
        assert_eq!(
            eval(ZoneCode::Zh3, Some(BuildingNature::AllotmentWithCondominium)).value,
            ParamValue::Numeric(12.0)
        );
    }

    #[test]
    fn not_applicable_has_no_value_and_no_error() {
        for zone in ZoneCode::ALL {
            let p = eval(zone, Some(BuildingNature::NotApplicable));
            assert!(p.value.is_absent());
            assert!(p.error.is_none(), "{zone}");
        }
    }

    #[test]
    fn missing_nature_is_insufficient_data() {
        let p = eval(ZoneCode::Zh2, None);
        assert_eq!(
            p.error,
            Some(ParamError::InsufficientData {
                missing: vec![Field::Nature]
            })
        );
    }

    #[test]
    fn unlisted_pairs_are_combination_not_found() {
        let p = eval(ZoneCode::Zc1, Some(BuildingNature::Subdivision));
        assert_eq!(
            p.error,
            Some(ParamError::CombinationNotFound {
                zone: ZoneCode::Zc1,
                nature: BuildingNature::Subdivision
            })
        );

        let p = eval(ZoneCode::Zh2, Some(BuildingNature::Architectural));
        assert!(matches!(p.error, Some(ParamError::CombinationNotFound { .. })));
        assert!(p.value.is_absent());
    }
}
