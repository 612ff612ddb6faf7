//! Field Dependency Resolver.
//!
//! Table-driven mapping from a zone (and optionally a building nature) to
//! the form fields a caller must collect before evaluation, plus a preview
//! of the parameters the evaluators will produce. Nothing here evaluates a
//! parameter.

use tracing::debug;

use crate::catalog::{Catalog, HeightRule};
use crate::domain::{
    Advisory, BuildingNature, CalculationInput, ConditionalField, Field, FieldChoices, FieldDependencySpec,
    ParameterName, PreviewEntry, ZoneCode,
};

/// Resolve the form requirements for `zone`.
///
/// With `nature == None` only zone-level requirements are reported and
/// lot-splitting fields stay conditional. Supplying a nature collapses every
/// conditional field into mandatory, optional or hidden.
pub fn resolve_dependencies(
    zone: ZoneCode,
    nature: Option<BuildingNature>,
    catalog: &Catalog,
) -> FieldDependencySpec {
    let mut spec = FieldDependencySpec::new(zone, nature);
    spec.mandatory.extend([Field::Use, Field::Nature]);

    let dynamic = catalog.needs_dynamic_setbacks(zone);
    let avenue = catalog.is_avenue_dependent(zone);
    let frontage = catalog.has_frontage(zone);

    if dynamic {
        spec.mandatory.extend([Field::Floors, Field::TotalHeight]);
        spec.advisories.push(Advisory::DynamicSetbacks);
    }

    if avenue {
        spec.mandatory.push(Field::Avenue);
        spec.choices.push(FieldChoices {
            field: Field::Avenue,
            options: catalog.avenues.iter().map(|a| a.to_string()).collect(),
        });
        spec.advisories.push(Advisory::AvenueRequired { zone });
    }

    if frontage {
        spec.conditional.push(ConditionalField {
            field: Field::MinimumFrontage,
            required_for: BuildingNature::LOT_SPLITTING.to_vec(),
        });
        spec.advisories.push(Advisory::FrontageForLotSplitting);
    }
    spec.conditional.push(ConditionalField {
        field: Field::MinimumLotArea,
        required_for: BuildingNature::LOT_SPLITTING.to_vec(),
    });

    if zone.is_transition() {
        spec.optional.push(Field::CrossedZone);
        spec.advisories.push(Advisory::TransitionInheritance);
    }
    spec.optional.push(Field::BuiltArea);

    if matches!(
        catalog.height_rule(zone),
        Some(HeightRule::Fixed { council_review: true, .. })
    ) {
        spec.advisories.push(Advisory::CouncilApprovalForHeight);
    }

    spec.preview = preview(zone, nature, catalog);

    if let Some(nature) = nature {
        narrow_by_nature(&mut spec, nature, avenue);
    }

    finish(&mut spec);
    debug!(
        zone = %zone,
        nature = ?nature,
        mandatory = spec.mandatory.len(),
        hidden = spec.hidden.len(),
        "dependencies resolved"
    );
    spec
}

fn narrow_by_nature(spec: &mut FieldDependencySpec, nature: BuildingNature, avenue_zone: bool) {
    match nature {
        BuildingNature::NotApplicable => {
            spec.hidden.extend([Field::MinimumFrontage, Field::MinimumLotArea]);
            spec.advisories.push(Advisory::FrontageNotApplicable);
        }
        BuildingNature::Subdivision | BuildingNature::AllotmentWithCondominium => {
            spec.advisories.push(Advisory::LotSplittingRequiresFrontage);
        }
        BuildingNature::Architectural => {
            spec.mandatory.extend([Field::Floors, Field::TotalHeight, Field::BuiltArea]);
            spec.hidden.push(Field::MinimumLotArea);
            spec.advisories.push(Advisory::ArchitecturalRequiresBuildingData);
        }
        BuildingNature::Urbanistic => {
            spec.mandatory.push(Field::BuiltArea);
            spec.hidden.push(Field::MinimumLotArea);
            spec.advisories.push(Advisory::UrbanisticRequiresBuiltArea);
        }
    }

    if !avenue_zone {
        spec.hidden.push(Field::Avenue);
    }

    // A known nature settles every conditional field.
    for cond in std::mem::take(&mut spec.conditional) {
        if spec.hidden.contains(&cond.field) {
            continue;
        }
        if cond.required_for.contains(&nature) {
            spec.mandatory.push(cond.field);
        } else {
            spec.optional.push(cond.field);
        }
    }

    if nature == BuildingNature::NotApplicable {
        for entry in &mut spec.preview {
            if entry.parameter == ParameterName::MinimumFrontage {
                entry.conditional = false;
                entry.computable = false;
            }
        }
    }
}

/// Deduplicate, drop hidden fields from every other list and derive the
/// visible list in `Field::ALL` order.
fn finish(spec: &mut FieldDependencySpec) {
    dedup(&mut spec.hidden);
    let hidden = spec.hidden.clone();

    spec.mandatory.retain(|f| !hidden.contains(f));
    dedup(&mut spec.mandatory);

    let mandatory = spec.mandatory.clone();
    spec.optional.retain(|f| !hidden.contains(f) && !mandatory.contains(f));
    dedup(&mut spec.optional);

    spec.conditional.retain(|c| !hidden.contains(&c.field));
    spec.choices.retain(|c| !hidden.contains(&c.field));

    spec.visible = Field::ALL
        .into_iter()
        .filter(|f| {
            *f == Field::Zone
                || spec.mandatory.contains(f)
                || spec.optional.contains(f)
                || spec.is_conditional(*f)
        })
        .collect();
}

fn dedup(fields: &mut Vec<Field>) {
    let mut seen = Vec::with_capacity(fields.len());
    fields.retain(|f| {
        if seen.contains(f) {
            false
        } else {
            seen.push(*f);
            true
        }
    });
}

/// Parameters the evaluators will produce for this zone, with the fields
/// each one reads.
fn preview(zone: ZoneCode, nature: Option<BuildingNature>, catalog: &Catalog) -> Vec<PreviewEntry> {
    let mut out = vec![PreviewEntry {
        parameter: ParameterName::FrontalSetback,
        depends_on: vec![Field::Zone, Field::Use],
        conditional: false,
        computable: catalog.frontal_group(zone).is_some(),
    }];

    if catalog.needs_dynamic_setbacks(zone) {
        let mut depends_on = vec![Field::Zone, Field::Floors, Field::TotalHeight];
        if zone.is_transition() {
            depends_on.push(Field::CrossedZone);
        }
        // Transition zones have no group of their own; the crossed zone
        // decides, and it is not known here.
        let computable = catalog.setback_minimum(zone).is_some();
        for parameter in [ParameterName::LateralSetback, ParameterName::RearSetback] {
            out.push(PreviewEntry {
                parameter,
                depends_on: depends_on.clone(),
                conditional: false,
                computable,
            });
        }
    }

    if catalog.has_frontage(zone) {
        let computable = match nature {
            Some(nature) => catalog.frontage(zone, nature).is_some(),
            None => true,
        };
        out.push(PreviewEntry {
            parameter: ParameterName::MinimumFrontage,
            depends_on: vec![Field::Zone, Field::Nature],
            conditional: true,
            computable,
        });
    }

    let zone_deps = if catalog.is_avenue_dependent(zone) {
        vec![Field::Zone, Field::Avenue]
    } else {
        vec![Field::Zone]
    };
    out.push(PreviewEntry {
        parameter: ParameterName::MaximumHeight,
        depends_on: zone_deps.clone(),
        conditional: false,
        computable: catalog.height_rule(zone).is_some(),
    });
    out.push(PreviewEntry {
        parameter: ParameterName::DevelopmentLevy,
        depends_on: zone_deps,
        conditional: false,
        computable: true,
    });
    out
}

/// Mandatory fields the input does not supply.
///
/// Form-only fields (minimum frontage, minimum lot area) are not part of a
/// `CalculationInput` and are never reported here.
pub fn missing_fields(spec: &FieldDependencySpec, input: &CalculationInput) -> Vec<Field> {
    spec.mandatory
        .iter()
        .copied()
        .filter(|f| f.is_evaluator_input() && !input.has(*f))
        .collect()
}
