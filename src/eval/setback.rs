//! Frontal, lateral and rear setbacks.

use crate::catalog::Catalog;
use crate::domain::{
    CalculatedParameter, CalculationInput, Field, LandUse, ParamError, ParamValue, ParameterName, Symbol, Unit,
};
use crate::precision::round2;

/// Floors up to which lateral/rear walls may sit on the boundary.
const LOW_RISE_MAX_FLOORS: u32 = 2;

/// Height is divided by this to get the dynamic setback.
const HEIGHT_DIVISOR: f64 = 10.0;

/// Fixed value from the zone's frontal schedule and the declared use.
pub fn frontal_setback(input: &CalculationInput, catalog: &Catalog) -> CalculatedParameter {
    let name = ParameterName::FrontalSetback;
    let zone = input.zone;

    let Some(group) = catalog.frontal_group(zone) else {
        return CalculatedParameter::blocked(
            name,
            Unit::Meters,
            format!("Zone {zone}"),
            vec![Field::Zone],
            ParamError::ZoneNotFound { zone },
        );
    };

    let use_label = input.land_use.trim();
    let Some(land_use) = LandUse::parse(use_label) else {
        return CalculatedParameter::blocked(
            name,
            Unit::Meters,
            format!("Zone {zone} - {use_label} use"),
            vec![Field::Zone, Field::Use],
            ParamError::UseNotRecognized {
                zone,
                land_use: use_label.to_string(),
            },
        );
    };

    let use_name = match land_use {
        LandUse::Residential => "residential",
        LandUse::Commercial => "commercial",
    };
    CalculatedParameter::resolved(
        name,
        ParamValue::Numeric(group.schedule.for_use(land_use)),
        Unit::Meters,
        format!("Zone {zone} - {use_name} use ({} schedule)", group.name),
        vec![Field::Zone, Field::Use],
    )
}

pub fn lateral_setback(input: &CalculationInput, catalog: &Catalog) -> CalculatedParameter {
    side_setback(ParameterName::LateralSetback, input, catalog)
}

pub fn rear_setback(input: &CalculationInput, catalog: &Catalog) -> CalculatedParameter {
    side_setback(ParameterName::RearSetback, input, catalog)
}

/// Shared rule for lateral and rear setbacks.
///
/// Transition zones look up their group through the crossed zone when one
/// is supplied. Up to two floors the wall may sit on the boundary unless it
/// has openings; above that the setback is `height / 10`, never below the
/// group minimum.
fn side_setback(name: ParameterName, input: &CalculationInput, catalog: &Catalog) -> CalculatedParameter {
    let zone = input.zone;
    let inherited = input.crossed_zone.filter(|_| zone.is_transition());
    let reference = inherited.unwrap_or(zone);

    let mut depends_on = vec![Field::Zone, Field::Floors, Field::TotalHeight];
    if inherited.is_some() {
        depends_on.push(Field::CrossedZone);
    }

    let (floors, height) = match (input.floors, input.total_height) {
        (Some(floors), Some(height)) => (floors, height),
        (floors, height) => {
            let mut missing = Vec::new();
            if floors.is_none() {
                missing.push(Field::Floors);
            }
            if height.is_none() {
                missing.push(Field::TotalHeight);
            }
            return CalculatedParameter::blocked(
                name,
                Unit::Meters,
                format!("Zone {zone}"),
                depends_on,
                ParamError::InsufficientData { missing },
            );
        }
    };

    let Some(minimum) = catalog.setback_minimum(reference) else {
        let mut depends_on = vec![Field::Zone];
        if inherited.is_some() {
            depends_on.push(Field::CrossedZone);
        }
        return CalculatedParameter::blocked(
            name,
            Unit::Meters,
            format!("Zone {zone}"),
            depends_on,
            ParamError::ZoneNotFound { zone },
        );
    };

    let zone_label = match inherited {
        Some(crossed) => format!("Zone {zone} (inherits {crossed})"),
        None => format!("Zone {zone}"),
    };

    if floors <= LOW_RISE_MAX_FLOORS {
        return CalculatedParameter::resolved(
            name,
            ParamValue::Symbolic(Symbol::ZeroUnlessOpenings { minimum }),
            Unit::Meters,
            format!("{zone_label} - up to {LOW_RISE_MAX_FLOORS} floors"),
            depends_on,
        );
    }

    let setback = round2((height / HEIGHT_DIVISOR).max(minimum));
    CalculatedParameter::resolved(
        name,
        ParamValue::Numeric(setback),
        Unit::Meters,
        format!("{zone_label} - {floors} floors, height {height:.1} m"),
        depends_on,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Locale, ZoneCode};

    fn catalog() -> &'static Catalog {
        Catalog::standard()
    }

    #[test]
    fn standard_schedule_frontal_values() {
        let residential = frontal_setback(&CalculationInput::new(ZoneCode::Zc1, "residential"), catalog());
        assert_eq!(residential.value, ParamValue::Numeric(4.0));
        assert_eq!(residential.unit, Unit::Meters);

        let commercial = frontal_setback(&CalculationInput::new(ZoneCode::Zct3, "Commercial"), catalog());
        assert_eq!(commercial.value, ParamValue::Numeric(1.5));
    }

    #[test]
    fn special_interest_frontal_values() {
        let residential = frontal_setback(&CalculationInput::new(ZoneCode::Zeis, " Residencial "), catalog());
        assert_eq!(residential.value, ParamValue::Numeric(2.0));

        let commercial = frontal_setback(&CalculationInput::new(ZoneCode::Zeis, "COMMERCIAL"), catalog());
        assert_eq!(commercial.value, ParamValue::Numeric(1.5));
    }

    #[test]
    fn frontal_unknown_zone_and_use() {
        let p = frontal_setback(&CalculationInput::new(ZoneCode::Zh1, "residential"), catalog());
        assert_eq!(p.error, Some(ParamError::ZoneNotFound { zone: ZoneCode::Zh1 }));
        assert_eq!(p.depends_on, vec![Field::Zone]);

        let p = frontal_setback(&CalculationInput::new(ZoneCode::Zc2, "Mixed"), catalog());
        assert_eq!(
            p.error,
            Some(ParamError::UseNotRecognized {
                zone: ZoneCode::Zc2,
                land_use: "Mixed".to_string()
            })
        );
        assert!(p.value.is_absent());
    }

    #[test]
    fn low_rise_is_zero_unless_openings() {
        let input = CalculationInput::new(ZoneCode::Zh2, "residential")
            .with_floors(2)
            .with_total_height(30.0);
        for p in [lateral_setback(&input, catalog()), rear_setback(&input, catalog())] {
            assert_eq!(p.value, ParamValue::Symbolic(Symbol::ZeroUnlessOpenings { minimum: 1.5 }));
            assert_eq!(p.display_value(Locale::En), "0 m, except openings → minimum 1.50 m");
        }
    }

    #[test]
    fn mid_rise_uses_height_over_ten() {
        let input = CalculationInput::new(ZoneCode::Zc1, "residential")
            .with_floors(5)
            .with_total_height(20.0);
        let p = rear_setback(&input, catalog());
        assert_eq!(p.value, ParamValue::Numeric(2.0));
        assert_eq!(p.display_value(Locale::En), "2.00 m");
        assert_eq!(p.name, ParameterName::RearSetback);
    }

    #[test]
    fn group_minimum_is_a_floor() {
        let input = CalculationInput::new(ZoneCode::Zi1, "commercial")
            .with_floors(3)
            .with_total_height(9.0);
        assert_eq!(lateral_setback(&input, catalog()).value, ParamValue::Numeric(2.0));

        let input = CalculationInput::new(ZoneCode::Zh3, "residential")
            .with_floors(4)
            .with_total_height(12.0);
        assert_eq!(lateral_setback(&input, catalog()).value, ParamValue::Numeric(1.5));
    }

    #[test]
    fn result_is_rounded_to_two_decimals() {
        let input = CalculationInput::new(ZoneCode::Zc1, "residential")
            .with_floors(8)
            .with_total_height(25.67);
        assert_eq!(lateral_setback(&input, catalog()).value, ParamValue::Numeric(2.57));
    }

    #[test]
    fn missing_floors_or_height_is_insufficient_data() {
        let input = CalculationInput::new(ZoneCode::Zc1, "residential").with_floors(4);
        let p = lateral_setback(&input, catalog());
        assert_eq!(
            p.error,
            Some(ParamError::InsufficientData {
                missing: vec![Field::TotalHeight]
            })
        );

        let input = CalculationInput::new(ZoneCode::Zia1, "residential");
        let p = rear_setback(&input, catalog());
        assert_eq!(
            p.error,
            Some(ParamError::InsufficientData {
                missing: vec![Field::Floors, Field::TotalHeight]
            })
        );
    }

    #[test]
    fn transition_zone_inherits_crossed_group() {
        let input = CalculationInput::new(ZoneCode::Zct2, "residential")
            .with_floors(6)
            .with_total_height(18.0)
            .with_crossed_zone(ZoneCode::Zi2);
        let p = lateral_setback(&input, catalog());
        assert_eq!(p.value, ParamValue::Numeric(2.0));
        assert!(p.depends_on.contains(&Field::CrossedZone));
        assert!(p.rule.contains("inherits ZI2"));
    }

    #[test]
    fn transition_zone_without_crossed_zone_is_uncatalogued() {
        let input = CalculationInput::new(ZoneCode::Zct1, "residential")
            .with_floors(3)
            .with_total_height(10.0);
        let p = lateral_setback(&input, catalog());
        assert_eq!(p.error, Some(ParamError::ZoneNotFound { zone: ZoneCode::Zct1 }));
        assert_eq!(p.display_value(Locale::En), "zone ZCT1 not catalogued");
    }

    #[test]
    fn uncatalogued_crossed_zone_names_the_parcel_zone() {
        let input = CalculationInput::new(ZoneCode::Zct3, "residential")
            .with_floors(3)
            .with_total_height(10.0)
            .with_crossed_zone(ZoneCode::Zia2);
        let p = rear_setback(&input, catalog());
        assert_eq!(p.error, Some(ParamError::ZoneNotFound { zone: ZoneCode::Zct3 }));
        assert_eq!(p.depends_on, vec![Field::Zone, Field::CrossedZone]);
    }

    #[test]
    fn crossed_zone_is_ignored_outside_transition_zones() {
        let input = CalculationInput::new(ZoneCode::Zh1, "residential")
            .with_floors(3)
            .with_total_height(10.0)
            .with_crossed_zone(ZoneCode::Zi1);
        let p = lateral_setback(&input, catalog());
        assert_eq!(p.value, ParamValue::Numeric(1.5));
        assert!(!p.depends_on.contains(&Field::CrossedZone));
    }
}
