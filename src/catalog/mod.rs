//! Zone Rule Catalog.
//!
//! Pure data plus lookups. The process-wide catalog is a `static` built from
//! const tables (`tables::SORRISO`), so it is initialised before `main` runs,
//! never mutated, and can be shared across threads without coordination.
//!
//! Tests and alternative legislations can build their own `Catalog` from
//! `'static` slices and pass it to `eval::evaluate_with`.

pub mod tables;

use crate::domain::{BuildingNature, LandUse, ZoneCode};

/// Frontal setback values for one schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrontalSchedule {
    pub residential: f64,
    pub commercial: f64,
}

impl FrontalSchedule {
    pub fn for_use(self, land_use: LandUse) -> f64 {
        match land_use {
            LandUse::Residential => self.residential,
            LandUse::Commercial => self.commercial,
        }
    }
}

/// Zones sharing one frontal setback schedule.
#[derive(Debug, Clone, Copy)]
pub struct FrontalGroup {
    pub name: &'static str,
    pub zones: &'static [ZoneCode],
    pub schedule: FrontalSchedule,
}

/// Zones sharing one minimum lateral/rear setback.
#[derive(Debug, Clone, Copy)]
pub struct SetbackGroup {
    pub minimum: f64,
    pub zones: &'static [ZoneCode],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrontageEntry {
    pub zone: ZoneCode,
    pub nature: BuildingNature,
    pub meters: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeightRule {
    /// A fixed cap. `council_review` marks zones where more floors can be
    /// granted by the development council.
    Fixed { meters: f64, council_review: bool },
    Unrestricted,
    /// Unrestricted on listed avenues, `default_meters` elsewhere.
    AvenueDependent { default_meters: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightEntry {
    pub zone: ZoneCode,
    pub rule: HeightRule,
}

/// The full set of rule tables for one legislation.
#[derive(Debug)]
pub struct Catalog {
    /// Legislation identifier, carried into every `ParameterSet`.
    pub legislation: &'static str,
    pub municipality: &'static str,
    pub frontal_groups: &'static [FrontalGroup],
    pub setback_groups: &'static [SetbackGroup],
    pub frontage: &'static [FrontageEntry],
    pub heights: &'static [HeightEntry],
    /// Avenues granting unrestricted height and levy exemption.
    pub avenues: &'static [&'static str],
    pub levy_waiver_zones: &'static [ZoneCode],
    /// Zones whose forms must collect floors and height (dependency resolver).
    pub dynamic_setback_zones: &'static [ZoneCode],
}

impl Catalog {
    /// The catalog shipped with the crate.
    pub fn standard() -> &'static Catalog {
        &tables::SORRISO
    }

    pub fn frontal_group(&self, zone: ZoneCode) -> Option<&FrontalGroup> {
        self.frontal_groups.iter().find(|g| g.zones.contains(&zone))
    }

    pub fn setback_minimum(&self, zone: ZoneCode) -> Option<f64> {
        self.setback_groups
            .iter()
            .find(|g| g.zones.contains(&zone))
            .map(|g| g.minimum)
    }

    pub fn frontage(&self, zone: ZoneCode, nature: BuildingNature) -> Option<f64> {
        self.frontage
            .iter()
            .find(|e| e.zone == zone && e.nature == nature)
            .map(|e| e.meters)
    }

    /// Whether the zone has any frontage entry at all.
    pub fn has_frontage(&self, zone: ZoneCode) -> bool {
        self.frontage.iter().any(|e| e.zone == zone)
    }

    pub fn height_rule(&self, zone: ZoneCode) -> Option<HeightRule> {
        self.heights.iter().find(|e| e.zone == zone).map(|e| e.rule)
    }

    pub fn is_avenue_dependent(&self, zone: ZoneCode) -> bool {
        matches!(self.height_rule(zone), Some(HeightRule::AvenueDependent { .. }))
    }

    /// Listed avenue match: surrounding whitespace and ASCII case are ignored.
    pub fn is_listed_avenue(&self, avenue: &str) -> bool {
        let wanted = avenue.trim();
        self.avenues.iter().any(|a| a.eq_ignore_ascii_case(wanted))
    }

    pub fn can_waive_levy(&self, zone: ZoneCode) -> bool {
        self.levy_waiver_zones.contains(&zone)
    }

    pub fn needs_dynamic_setbacks(&self, zone: ZoneCode) -> bool {
        self.dynamic_setback_zones.contains(&zone)
    }

    /// Names of the tables mentioning `zone`, for inspection.
    pub fn memberships(&self, zone: ZoneCode) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.frontal_group(zone).is_some() {
            out.push("frontal");
        }
        if self.setback_minimum(zone).is_some() {
            out.push("setback");
        }
        if self.has_frontage(zone) {
            out.push("frontage");
        }
        if self.height_rule(zone).is_some() {
            out.push("height");
        }
        if self.can_waive_levy(zone) {
            out.push("levy-waiver");
        }
        if self.needs_dynamic_setbacks(zone) {
            out.push("dynamic-setbacks");
        }
        out
    }
}
