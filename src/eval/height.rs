//! Maximum height and development levy.
//!
//! Both depend on the fronting avenue in the avenue-dependent zones; every
//! other zone is driven by the zone alone.

use crate::catalog::{Catalog, HeightRule};
use crate::domain::{
    CalculatedParameter, CalculationInput, Field, ParamError, ParamValue, ParameterName, Symbol, Unit,
};

fn zone_deps(input: &CalculationInput) -> Vec<Field> {
    if input.avenue_trimmed().is_some() {
        vec![Field::Zone, Field::Avenue]
    } else {
        vec![Field::Zone]
    }
}

pub fn maximum_height(input: &CalculationInput, catalog: &Catalog) -> CalculatedParameter {
    let name = ParameterName::MaximumHeight;
    let zone = input.zone;

    let Some(rule) = catalog.height_rule(zone) else {
        return CalculatedParameter::blocked(
            name,
            Unit::Meters,
            format!("Zone {zone}"),
            vec![Field::Zone],
            ParamError::ZoneNotFound { zone },
        );
    };

    match rule {
        HeightRule::Fixed { meters, council_review } => {
            let note = if council_review {
                " (more floors subject to CONDESS approval)"
            } else {
                ""
            };
            CalculatedParameter::resolved(
                name,
                ParamValue::Numeric(meters),
                Unit::Meters,
                format!("Zone {zone} - fixed maximum height{note}"),
                zone_deps(input),
            )
        }
        HeightRule::Unrestricted => CalculatedParameter::resolved(
            name,
            ParamValue::Symbolic(Symbol::Unrestricted),
            Unit::Meters,
            format!("Zone {zone} - unrestricted height"),
            zone_deps(input),
        ),
        HeightRule::AvenueDependent { default_meters } => {
            let depends_on = vec![Field::Zone, Field::Avenue];
            let Some(avenue) = input.avenue_trimmed() else {
                return CalculatedParameter::blocked(
                    name,
                    Unit::Meters,
                    format!("Zone {zone}"),
                    depends_on,
                    ParamError::InsufficientData {
                        missing: vec![Field::Avenue],
                    },
                );
            };
            if catalog.is_listed_avenue(avenue) {
                CalculatedParameter::resolved(
                    name,
                    ParamValue::Symbolic(Symbol::Unrestricted),
                    Unit::Meters,
                    format!("Zone {zone} - {avenue} (unrestricted height)"),
                    depends_on,
                )
            } else {
                CalculatedParameter::resolved(
                    name,
                    ParamValue::Numeric(default_meters),
                    Unit::Meters,
                    format!("Zone {zone} - {avenue} (default height)"),
                    depends_on,
                )
            }
        }
    }
}

/// Waived only in a waiver zone fronting a listed avenue; applies everywhere
/// else, including zones no table mentions.
pub fn development_levy(input: &CalculationInput, catalog: &Catalog) -> CalculatedParameter {
    let name = ParameterName::DevelopmentLevy;
    let zone = input.zone;
    let depends_on = zone_deps(input);

    match input.avenue_trimmed() {
        Some(avenue) if catalog.can_waive_levy(zone) && catalog.is_listed_avenue(avenue) => {
            CalculatedParameter::resolved(
                name,
                ParamValue::Symbolic(Symbol::LevyWaived),
                Unit::Status,
                format!("Zone {zone} - {avenue} (levy waived)"),
                depends_on,
            )
        }
        Some(avenue) if catalog.can_waive_levy(zone) => CalculatedParameter::resolved(
            name,
            ParamValue::Symbolic(Symbol::LevyApplies),
            Unit::Status,
            format!("Zone {zone} - {avenue} (levy applies)"),
            depends_on,
        ),
        _ => CalculatedParameter::resolved(
            name,
            ParamValue::Symbolic(Symbol::LevyApplies),
            Unit::Status,
            format!("Zone {zone} - standard levy"),
            depends_on,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ZoneCode;

    fn input(zone: ZoneCode, avenue: Option<&str>) -> CalculationInput {
        let input = CalculationInput::new(zone, "residential");
        match avenue {
            Some(a) => input.with_avenue(a),
            None => input,
        }
    }

    #[test]
    fn fixed_heights() {
        let catalog = Catalog::standard();
        assert_eq!(maximum_height(&input(ZoneCode::Zc1, None), catalog).value, ParamValue::Numeric(12.0));
        assert_eq!(maximum_height(&input(ZoneCode::Zc2, None), catalog).value, ParamValue::Numeric(8.0));

        let zii = maximum_height(&input(ZoneCode::Zii, None), catalog);
        assert_eq!(zii.value, ParamValue::Numeric(2.0));
        assert!(zii.rule.contains("CONDESS"));
    }

    #[test]
    fn unrestricted_zones_ignore_the_avenue() {
        let catalog = Catalog::standard();
        for zone in [ZoneCode::Zad2, ZoneCode::Zct1] {
            let p = maximum_height(&input(zone, Some("Rua Qualquer")), catalog);
            assert_eq!(p.value, ParamValue::Symbolic(Symbol::Unrestricted));
        }
    }

    #[test]
    fn avenue_dependent_zones() {
        let catalog = Catalog::standard();
        let listed = maximum_height(&input(ZoneCode::Zct2, Some("Av. Paulista")), catalog);
        assert_eq!(listed.value, ParamValue::Symbolic(Symbol::Unrestricted));

        let other = maximum_height(&input(ZoneCode::Zct4, Some("Rua das Palmeiras")), catalog);
        assert_eq!(other.value, ParamValue::Numeric(12.0));

        let missing = maximum_height(&input(ZoneCode::Zct2, None), catalog);
        assert_eq!(
            missing.error,
            Some(ParamError::InsufficientData {
                missing: vec![Field::Avenue]
            })
        );
        assert_eq!(missing.depends_on, vec![Field::Zone, Field::Avenue]);
    }

    #[test]
    fn unknown_height_zone() {
        let p = maximum_height(&input(ZoneCode::Zh1, None), Catalog::standard());
        assert_eq!(p.error, Some(ParamError::ZoneNotFound { zone: ZoneCode::Zh1 }));
    }

    #[test]
    fn levy_waived_only_on_listed_avenues_in_waiver_zones() {
        let catalog = Catalog::standard();
        let waived = development_levy(&input(ZoneCode::Zct4, Some("Av. Brasil")), catalog);
        assert_eq!(waived.value, ParamValue::Symbolic(Symbol::LevyWaived));
        assert_eq!(waived.unit, Unit::Status);

        let applies = development_levy(&input(ZoneCode::Zct2, Some("Rua B")), catalog);
        assert_eq!(applies.value, ParamValue::Symbolic(Symbol::LevyApplies));

        let no_avenue = development_levy(&input(ZoneCode::Zct2, None), catalog);
        assert_eq!(no_avenue.value, ParamValue::Symbolic(Symbol::LevyApplies));
        assert!(no_avenue.error.is_none());
    }

    #[test]
    fn levy_applies_outside_waiver_zones_regardless_of_avenue() {
        let catalog = Catalog::standard();
        for zone in ZoneCode::ALL {
            if catalog.can_waive_levy(zone) {
                continue;
            }
            for avenue in [None, Some("Av. Brasil"), Some("Rua X")] {
                let p = development_levy(&input(zone, avenue), catalog);
                assert_eq!(p.value, ParamValue::Symbolic(Symbol::LevyApplies), "{zone}");
            }
        }
    }
}
