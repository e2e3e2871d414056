//! Monarch Persistence
//!
//! The saved form of a monarch: its two flags and four forces. Loading runs
//! legacy migration (see [`crate::migrate`]) before rebuilding any force.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;
use std::sync::Arc;

use crown_rules::{Ruleset, UnitGroup};

use crate::capabilities::Capabilities;
use crate::error::Result;
use crate::force::{Force, ForceRecord};
use crate::migrate::{detect_legacy_shapes, normalize};
use crate::monarch::Monarch;
use crate::player::PlayerState;

/// Current save format version.
pub const RECORD_VERSION: u32 = 1;

/// Saved shape of a monarch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonarchRecord {
    /// Format version; absent in the oldest saves
    #[serde(default)]
    pub version: u32,
    /// Id of the player this monarch belongs to
    pub player: String,
    #[serde(default)]
    pub support_sea: bool,
    #[serde(default)]
    pub displeasure: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expeditionary_force: Option<ForceRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intervention_force: Option<ForceRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mercenary_force: Option<ForceRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub war_support_force: Option<ForceRecord>,
    /// Legacy REF land units outside any force
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub land_units: Option<Vec<UnitGroup>>,
    /// Legacy REF naval units outside any force
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub naval_units: Option<Vec<UnitGroup>>,
    #[serde(flatten, default, skip_serializing_if = "BTreeMap::is_empty")]
    pub unknown: BTreeMap<String, serde_json::Value>,
}

impl Monarch {
    /// Serializable form of this monarch.
    pub fn to_record(&self) -> MonarchRecord {
        MonarchRecord {
            version: RECORD_VERSION,
            player: self.player_id.clone(),
            support_sea: self.support_sea,
            displeasure: self.displeasure,
            expeditionary_force: Some(self.expeditionary_force.to_record()),
            intervention_force: Some(self.intervention_force.to_record()),
            mercenary_force: Some(self.mercenary_force.to_record()),
            war_support_force: Some(self.war_support_force.to_record()),
            ..Default::default()
        }
    }

    /// Rebuilds a monarch for `player` from a saved record, migrating
    /// legacy records first.
    pub fn from_record(rules: Arc<Ruleset>, player: &PlayerState, record: MonarchRecord) -> Result<Self> {
        let shapes = detect_legacy_shapes(&record);
        let record = if shapes.is_empty() {
            record
        } else {
            tracing::info!("Migrating monarch record of {}: {:?}", record.player, shapes);
            normalize(record, &shapes, &rules)
        };

        if record.player != player.id {
            tracing::warn!(
                "Monarch record belongs to {} but is loaded for {}",
                record.player,
                player.id
            );
        }

        let load = |force: &Option<ForceRecord>| match force {
            Some(force) => Force::from_record(force, &rules),
            None => Ok(Force::new()),
        };
        let expeditionary_force = load(&record.expeditionary_force)?;
        let intervention_force = load(&record.intervention_force)?;
        let mercenary_force = load(&record.mercenary_force)?;
        let war_support_force = load(&record.war_support_force)?;

        Ok(Self {
            player_id: player.id.clone(),
            capabilities: Capabilities::build(&rules, &player.abilities),
            rules,
            expeditionary_force,
            intervention_force,
            mercenary_force,
            war_support_force,
            support_sea: record.support_sea,
            displeasure: record.displeasure,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_record())?)
    }

    pub fn from_json(rules: Arc<Ruleset>, player: &PlayerState, json: &str) -> Result<Self> {
        let record: MonarchRecord = serde_json::from_str(json)?;
        Self::from_record(rules, player, record)
    }

    /// Writes the monarch to a JSON file.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &self.to_record())?;
        tracing::info!("Saved monarch of {} to {}", self.player_id, path.display());
        Ok(())
    }

    /// Reads a monarch from a JSON file.
    pub fn load_from_file(rules: Arc<Ruleset>, player: &PlayerState, path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(rules, player, &content)
    }
}
