//! Legislation tables for Sorriso/MT, LC 108/2009 as amended by LC 415/2023.
//!
//! One authoritative copy of every table. Each table is authoritative for
//! its own parameter only: the groups intentionally do not agree on a single
//! zone taxonomy (ZCT4 has a frontage entry but no frontal schedule, ZI1/ZI2
//! have setback minimums but no frontal schedule, and so on).

use crate::domain::{BuildingNature, ZoneCode};

use super::{Catalog, FrontageEntry, FrontalGroup, FrontalSchedule, HeightEntry, HeightRule, SetbackGroup};

pub const LEGISLATION: &str = "LC_108_2009_ALTERADA_LC_415_2023";
pub const MUNICIPALITY: &str = "SORRISO";

/// Default height in avenue-dependent zones when the avenue is not listed.
pub const AVENUE_DEFAULT_HEIGHT_M: f64 = 12.0;

const FRONTAL_GROUPS: &[FrontalGroup] = &[
    FrontalGroup {
        name: "standard",
        zones: &[
            ZoneCode::Zc1,
            ZoneCode::Zc2,
            ZoneCode::Zad1,
            ZoneCode::Zad2,
            ZoneCode::Zh2,
            ZoneCode::Zh3,
            ZoneCode::Zct1,
            ZoneCode::Zct2,
            ZoneCode::Zct3,
        ],
        schedule: FrontalSchedule {
            residential: 4.0,
            commercial: 1.5,
        },
    },
    FrontalGroup {
        name: "special interest",
        zones: &[ZoneCode::Zeis],
        schedule: FrontalSchedule {
            residential: 2.0,
            commercial: 1.5,
        },
    },
];

const SETBACK_GROUPS: &[SetbackGroup] = &[
    SetbackGroup {
        minimum: 1.5,
        zones: &[
            ZoneCode::Zc1,
            ZoneCode::Zc2,
            ZoneCode::Zad1,
            ZoneCode::Zad2,
            ZoneCode::Zh1,
            ZoneCode::Zh2,
            ZoneCode::Zh3,
            ZoneCode::Zhl,
            ZoneCode::Zeis,
        ],
    },
    SetbackGroup {
        minimum: 2.0,
        zones: &[ZoneCode::Zi1, ZoneCode::Zi2],
    },
];

const fn frontage(zone: ZoneCode, nature: BuildingNature, meters: f64) -> FrontageEntry {
    FrontageEntry { zone, nature, meters }
}

const FRONTAGE: &[FrontageEntry] = &[
    frontage(ZoneCode::Zad1, BuildingNature::Subdivision, 10.0),
    frontage(ZoneCode::Zad1, BuildingNature::AllotmentWithCondominium, 15.0),
    frontage(ZoneCode::Zad2, BuildingNature::Subdivision, 10.0),
    frontage(ZoneCode::Zad2, BuildingNature::AllotmentWithCondominium, 15.0),
    frontage(ZoneCode::Zh2, BuildingNature::Subdivision, 10.0),
    frontage(ZoneCode::Zh2, BuildingNature::AllotmentWithCondominium, 15.0),
    frontage(ZoneCode::Zh3, BuildingNature::Subdivision, 10.0),
    frontage(ZoneCode::Zh3, BuildingNature::AllotmentWithCondominium, 12.0),
    frontage(ZoneCode::Zct2, BuildingNature::Subdivision, 10.0),
    frontage(ZoneCode::Zct2, BuildingNature::AllotmentWithCondominium, 15.0),
    frontage(ZoneCode::Zct3, BuildingNature::Subdivision, 10.0),
    frontage(ZoneCode::Zct3, BuildingNature::AllotmentWithCondominium, 15.0),
    frontage(ZoneCode::Zct4, BuildingNature::Subdivision, 10.0),
    frontage(ZoneCode::Zct4, BuildingNature::AllotmentWithCondominium, 15.0),
];

const HEIGHTS: &[HeightEntry] = &[
    HeightEntry {
        zone: ZoneCode::Zc1,
        rule: HeightRule::Fixed { meters: 12.0, council_review: false },
    },
    HeightEntry {
        zone: ZoneCode::Zc2,
        rule: HeightRule::Fixed { meters: 8.0, council_review: false },
    },
    HeightEntry {
        zone: ZoneCode::Zii,
        rule: HeightRule::Fixed { meters: 2.0, council_review: true },
    },
    HeightEntry {
        zone: ZoneCode::Zad2,
        rule: HeightRule::Unrestricted,
    },
    HeightEntry {
        zone: ZoneCode::Zct1,
        rule: HeightRule::Unrestricted,
    },
    HeightEntry {
        zone: ZoneCode::Zct2,
        rule: HeightRule::AvenueDependent { default_meters: AVENUE_DEFAULT_HEIGHT_M },
    },
    HeightEntry {
        zone: ZoneCode::Zct4,
        rule: HeightRule::AvenueDependent { default_meters: AVENUE_DEFAULT_HEIGHT_M },
    },
];

const AVENUES: &[&str] = &[
    "Av. Porto Alegre",
    "Av. dos Emigrantes",
    "Av. Paulista",
    "Av. Brasil",
    "Av. Joao Natalino Brescansin",
    "Av. Tancredo Neves",
];

const LEVY_WAIVER_ZONES: &[ZoneCode] = &[ZoneCode::Zct2, ZoneCode::Zct4];

const DYNAMIC_SETBACK_ZONES: &[ZoneCode] = &[
    ZoneCode::Zc1,
    ZoneCode::Zc2,
    ZoneCode::Zad1,
    ZoneCode::Zad2,
    ZoneCode::Zh1,
    ZoneCode::Zh2,
    ZoneCode::Zh3,
    ZoneCode::Zct1,
    ZoneCode::Zct2,
    ZoneCode::Zct3,
    ZoneCode::Zct4,
    ZoneCode::Zeis,
];

pub static SORRISO: Catalog = Catalog {
    legislation: LEGISLATION,
    municipality: MUNICIPALITY,
    frontal_groups: FRONTAL_GROUPS,
    setback_groups: SETBACK_GROUPS,
    frontage: FRONTAGE,
    heights: HEIGHTS,
    avenues: AVENUES,
    levy_waiver_zones: LEVY_WAIVER_ZONES,
    dynamic_setback_zones: DYNAMIC_SETBACK_ZONES,
};
