//! Legacy Save Migration
//!
//! Older saves differ from the current record in a handful of known ways.
//! Loading first detects which of those shapes a record has, then rewrites
//! it once into the current format. Steady-state loading only ever sees
//! normalized records.

use std::fmt;

use crown_rules::{Ability, ForceTemplate, RoleId, Ruleset};

use crate::force::{Force, ForceRecord};
use crate::save::{MonarchRecord, RECORD_VERSION};

/// REF roles renamed since older saves: (old, new).
const DEPRECATED_REF_ROLES: [(&str, &str); 2] = [
    ("model.role.soldier", "model.role.infantry"),
    ("model.role.dragoon", "model.role.cavalry"),
];

/// One of the monarch's four forces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForceSlot {
    Expeditionary,
    Intervention,
    Mercenary,
    WarSupport,
}

impl fmt::Display for ForceSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ForceSlot::Expeditionary => "expeditionary force",
            ForceSlot::Intervention => "intervention force",
            ForceSlot::Mercenary => "mercenary force",
            ForceSlot::WarSupport => "war support force",
        };
        f.write_str(name)
    }
}

/// A known deviation of a saved record from the current format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LegacyShape {
    /// Record predates format versioning
    Unversioned(u32),
    /// REF units stored as top-level `land_units` / `naval_units`
    TopLevelUnits,
    /// REF land units holding a role since renamed
    DeprecatedRefRoles(usize),
    /// A force missing, or empty where that is never legitimate
    MissingForce(ForceSlot),
    /// Keys this version does not understand
    UnknownKeys(Vec<String>),
}

/// Lists every legacy shape present in `record`.
pub fn detect_legacy_shapes(record: &MonarchRecord) -> Vec<LegacyShape> {
    let mut shapes = Vec::new();

    if record.version < RECORD_VERSION {
        shapes.push(LegacyShape::Unversioned(record.version));
    }

    let top_level = record.land_units.is_some() || record.naval_units.is_some();
    if top_level {
        shapes.push(LegacyShape::TopLevelUnits);
    }

    let deprecated = record
        .expeditionary_force
        .iter()
        .flat_map(|f| f.land_units.iter())
        .chain(record.land_units.iter().flatten())
        .filter(|g| DEPRECATED_REF_ROLES.iter().any(|(old, _)| g.role.as_str() == *old))
        .count();
    if deprecated > 0 {
        shapes.push(LegacyShape::DeprecatedRefRoles(deprecated));
    }

    // An empty REF is legitimate once it has sailed
    if record.expeditionary_force.is_none() && !top_level {
        shapes.push(LegacyShape::MissingForce(ForceSlot::Expeditionary));
    }
    let others = [
        (ForceSlot::Intervention, &record.intervention_force),
        (ForceSlot::Mercenary, &record.mercenary_force),
        (ForceSlot::WarSupport, &record.war_support_force),
    ];
    for (slot, force) in others {
        if force.as_ref().map_or(true, ForceRecord::is_empty) {
            shapes.push(LegacyShape::MissingForce(slot));
        }
    }

    if !record.unknown.is_empty() {
        shapes.push(LegacyShape::UnknownKeys(record.unknown.keys().cloned().collect()));
    }
    shapes
}

/// Rewrites `record` into the current format, fixing each shape in `shapes`.
pub fn normalize(mut record: MonarchRecord, shapes: &[LegacyShape], rules: &Ruleset) -> MonarchRecord {
    for shape in shapes {
        match shape {
            LegacyShape::Unversioned(version) => {
                tracing::debug!("Upgrading monarch record from version {}", version);
            }
            LegacyShape::TopLevelUnits => {
                tracing::warn!("Moving top-level REF units into the expeditionary force");
                // A list present in the record replaces its counterpart outright
                let force = record
                    .expeditionary_force
                    .get_or_insert_with(|| default_force_record(ForceSlot::Expeditionary, rules));
                if let Some(land) = record.land_units.take() {
                    force.land_units = land;
                }
                if let Some(naval) = record.naval_units.take() {
                    force.naval_units = naval;
                }
            }
            LegacyShape::DeprecatedRefRoles(count) => {
                tracing::warn!("Rewriting {} deprecated REF role(s)", count);
            }
            LegacyShape::MissingForce(slot) => {
                tracing::warn!("Repopulating empty {} from ruleset defaults", slot);
                let fresh = default_force_record(*slot, rules);
                match slot {
                    ForceSlot::Expeditionary => record.expeditionary_force = Some(fresh),
                    ForceSlot::Intervention => record.intervention_force = Some(fresh),
                    ForceSlot::Mercenary => record.mercenary_force = Some(fresh),
                    ForceSlot::WarSupport => record.war_support_force = Some(fresh),
                }
            }
            LegacyShape::UnknownKeys(keys) => {
                for key in keys {
                    tracing::warn!("Bogus monarch tag: {}", key);
                }
                record.unknown.clear();
            }
        }
    }

    // Runs after top-level units have been moved in
    if shapes.iter().any(|s| matches!(s, LegacyShape::DeprecatedRefRoles(_))) {
        if let Some(force) = record.expeditionary_force.as_mut() {
            for group in &mut force.land_units {
                if let Some((_, new)) = DEPRECATED_REF_ROLES.iter().find(|(old, _)| group.role.as_str() == *old) {
                    group.role = RoleId::from(*new);
                }
            }
        }
    }

    record.version = RECORD_VERSION;
    record
}

/// The ruleset's starting composition of a force, as a record.
pub fn default_force_record(slot: ForceSlot, rules: &Ruleset) -> ForceRecord {
    let options = rules.options();
    let (template, required): (&ForceTemplate, Option<Ability>) = match slot {
        ForceSlot::Expeditionary => (&options.ref_force, Some(Ability::RefUnit)),
        ForceSlot::Intervention => (&options.intervention_force, None),
        ForceSlot::Mercenary => (&options.mercenary_force, None),
        ForceSlot::WarSupport => (&options.war_support_force, None),
    };
    Force::from_template(template, required, rules).to_record()
}
