//! Form-level dependency records produced by the dependency resolver.

use serde::{Deserialize, Serialize};

use super::parameter::ParameterName;
use super::types::{BuildingNature, Field, Locale, ZoneCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
}

/// A human-facing note attached to a dependency spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum Advisory {
    /// Floors and height drive the lateral and rear setbacks.
    DynamicSetbacks,
    /// The zone's height and levy depend on the fronting avenue.
    AvenueRequired { zone: ZoneCode },
    /// Lateral and rear setbacks follow the crossed zone.
    TransitionInheritance,
    /// Extra floors need approval by the municipal development council.
    CouncilApprovalForHeight,
    FrontageForLotSplitting,
    FrontageNotApplicable,
    LotSplittingRequiresFrontage,
    ArchitecturalRequiresBuildingData,
    UrbanisticRequiresBuiltArea,
}

impl Advisory {
    pub fn severity(self) -> Severity {
        match self {
            Advisory::DynamicSetbacks
            | Advisory::LotSplittingRequiresFrontage
            | Advisory::ArchitecturalRequiresBuildingData
            | Advisory::UrbanisticRequiresBuiltArea => Severity::Warning,
            _ => Severity::Info,
        }
    }

    pub fn text(self, locale: Locale) -> String {
        match locale {
            Locale::En => match self {
                Advisory::DynamicSetbacks => {
                    "Floor count and total height are required for lateral and rear setbacks".to_string()
                }
                Advisory::AvenueRequired { zone } => {
                    format!("Avenue is required in zone {zone} for maximum height and development levy")
                }
                Advisory::TransitionInheritance => {
                    "Transition zone: lateral and rear setbacks follow the crossed zone when one is given"
                        .to_string()
                }
                Advisory::CouncilApprovalForHeight => {
                    "Additional floors require approval by the development council (CONDESS)".to_string()
                }
                Advisory::FrontageForLotSplitting => {
                    "Minimum frontage applies to subdivisions and allotments".to_string()
                }
                Advisory::FrontageNotApplicable => {
                    "Minimum frontage and minimum lot area do not apply to this project".to_string()
                }
                Advisory::LotSplittingRequiresFrontage => {
                    "Minimum frontage and minimum lot area are mandatory for subdivisions and allotments"
                        .to_string()
                }
                Advisory::ArchitecturalRequiresBuildingData => {
                    "Floor count, total height and built area are mandatory for architectural projects"
                        .to_string()
                }
                Advisory::UrbanisticRequiresBuiltArea => {
                    "Built area is mandatory for urbanistic projects".to_string()
                }
            },
            Locale::PtBr => match self {
                Advisory::DynamicSetbacks => {
                    "Pavimentos e altura são obrigatórios para cálculo de recuos laterais e de fundos"
                        .to_string()
                }
                Advisory::AvenueRequired { zone } => {
                    format!("Campo avenida é obrigatório para a zona {zone} (altura máxima e outorga onerosa)")
                }
                Advisory::TransitionInheritance => {
                    "Zona de transição: recuos laterais e de fundos seguem a zona atravessada, se informada"
                        .to_string()
                }
                Advisory::CouncilApprovalForHeight => {
                    "Para mais pavimentos, consulte o CONDESS".to_string()
                }
                Advisory::FrontageForLotSplitting => {
                    "Testada mínima aplicável para loteamentos e desmembramentos".to_string()
                }
                Advisory::FrontageNotApplicable => {
                    "Testada mínima e área mínima do lote não se aplicam para este tipo de projeto"
                        .to_string()
                }
                Advisory::LotSplittingRequiresFrontage => {
                    "Testada mínima e área mínima do lote são obrigatórias para loteamentos e desmembramentos"
                        .to_string()
                }
                Advisory::ArchitecturalRequiresBuildingData => {
                    "Pavimentos, altura total e área construída são obrigatórios para projetos arquitetônicos"
                        .to_string()
                }
                Advisory::UrbanisticRequiresBuiltArea => {
                    "Área construída é obrigatória para projetos urbanísticos".to_string()
                }
            },
        }
    }
}

/// A field that becomes mandatory only for some natures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionalField {
    pub field: Field,
    pub required_for: Vec<BuildingNature>,
}

/// Closed list of accepted values for a field (rendered as a select box).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChoices {
    pub field: Field,
    pub options: Vec<String>,
}

/// What the evaluator will be able to compute, announced before submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewEntry {
    pub parameter: ParameterName,
    pub depends_on: Vec<Field>,
    /// Only computed for some natures.
    pub conditional: bool,
    pub computable: bool,
}

/// Form requirements for a zone, optionally narrowed by nature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDependencySpec {
    pub zone: ZoneCode,
    pub nature: Option<BuildingNature>,
    pub mandatory: Vec<Field>,
    pub optional: Vec<Field>,
    pub conditional: Vec<ConditionalField>,
    pub visible: Vec<Field>,
    pub hidden: Vec<Field>,
    pub choices: Vec<FieldChoices>,
    pub advisories: Vec<Advisory>,
    pub preview: Vec<PreviewEntry>,
}

impl FieldDependencySpec {
    pub fn new(zone: ZoneCode, nature: Option<BuildingNature>) -> Self {
        Self {
            zone,
            nature,
            mandatory: Vec::new(),
            optional: Vec::new(),
            conditional: Vec::new(),
            visible: Vec::new(),
            hidden: Vec::new(),
            choices: Vec::new(),
            advisories: Vec::new(),
            preview: Vec::new(),
        }
    }

    pub fn is_mandatory(&self, field: Field) -> bool {
        self.mandatory.contains(&field)
    }

    pub fn is_conditional(&self, field: Field) -> bool {
        self.conditional.iter().any(|c| c.field == field)
    }

    pub fn is_hidden(&self, field: Field) -> bool {
        self.hidden.contains(&field)
    }
}
