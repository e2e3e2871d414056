//! Monarch Actions
//!
//! The closed set of things the monarch may do in a turn. Actions carry no
//! data; their effect is produced by an outcome generator after selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MonarchError;

/// Constants describing monarch actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonarchAction {
    NoAction,
    RaiseTaxAct,
    RaiseTaxWar,
    /// Never selectable
    ForceTax,
    LowerTaxWar,
    LowerTaxOther,
    WaiveTax,
    AddToRef,
    DeclarePeace,
    DeclareWar,
    SupportLand,
    SupportSea,
    MonarchMercenaries,
    HessianMercenaries,
    /// Never selectable
    Displeasure,
}

impl MonarchAction {
    pub const ALL: [MonarchAction; 15] = [
        MonarchAction::NoAction,
        MonarchAction::RaiseTaxAct,
        MonarchAction::RaiseTaxWar,
        MonarchAction::ForceTax,
        MonarchAction::LowerTaxWar,
        MonarchAction::LowerTaxOther,
        MonarchAction::WaiveTax,
        MonarchAction::AddToRef,
        MonarchAction::DeclarePeace,
        MonarchAction::DeclareWar,
        MonarchAction::SupportLand,
        MonarchAction::SupportSea,
        MonarchAction::MonarchMercenaries,
        MonarchAction::HessianMercenaries,
        MonarchAction::Displeasure,
    ];

    /// Stable camel-case key, e.g. `raiseTaxAct`.
    pub fn key(self) -> &'static str {
        match self {
            MonarchAction::NoAction => "noAction",
            MonarchAction::RaiseTaxAct => "raiseTaxAct",
            MonarchAction::RaiseTaxWar => "raiseTaxWar",
            MonarchAction::ForceTax => "forceTax",
            MonarchAction::LowerTaxWar => "lowerTaxWar",
            MonarchAction::LowerTaxOther => "lowerTaxOther",
            MonarchAction::WaiveTax => "waiveTax",
            MonarchAction::AddToRef => "addToRef",
            MonarchAction::DeclarePeace => "declarePeace",
            MonarchAction::DeclareWar => "declareWar",
            MonarchAction::SupportLand => "supportLand",
            MonarchAction::SupportSea => "supportSea",
            MonarchAction::MonarchMercenaries => "monarchMercenaries",
            MonarchAction::HessianMercenaries => "hessianMercenaries",
            MonarchAction::Displeasure => "displeasure",
        }
    }

    fn message_key(self, suffix: &str) -> String {
        format!("model.monarch.action.{}.{}", self.key(), suffix)
    }

    pub fn text_key(self) -> String {
        self.message_key("text")
    }

    pub fn yes_key(self) -> String {
        self.message_key("yes")
    }

    pub fn no_key(self) -> String {
        self.message_key("no")
    }

    pub fn header_key(self) -> String {
        self.message_key("header")
    }

    pub fn is_tax_raise(self) -> bool {
        matches!(self, MonarchAction::RaiseTaxAct | MonarchAction::RaiseTaxWar)
    }

    pub fn is_tax_reduction(self) -> bool {
        matches!(self, MonarchAction::LowerTaxWar | MonarchAction::LowerTaxOther)
    }
}

impl fmt::Display for MonarchAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for MonarchAction {
    type Err = MonarchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MonarchAction::ALL
            .into_iter()
            .find(|a| a.key() == s)
            .ok_or_else(|| MonarchError::UnknownAction(s.to_string()))
    }
}

/// An action paired with its draw weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedAction {
    pub action: MonarchAction,
    pub weight: u32,
}

impl WeightedAction {
    pub fn new(action: MonarchAction, weight: u32) -> Self {
        Self { action, weight }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_parse_back() {
        for action in MonarchAction::ALL {
            assert_eq!(action.key().parse::<MonarchAction>().unwrap(), action);
        }
    }

    #[test]
    fn test_unknown_key_is_invalid_argument() {
        let err = "abdicate".parse::<MonarchAction>().unwrap_err();
        assert!(matches!(err, MonarchError::UnknownAction(ref s) if s == "abdicate"));
    }

    #[test]
    fn test_message_keys() {
        assert_eq!(
            MonarchAction::RaiseTaxAct.text_key(),
            "model.monarch.action.raiseTaxAct.text"
        );
        assert_eq!(
            MonarchAction::HessianMercenaries.header_key(),
            "model.monarch.action.hessianMercenaries.header"
        );
    }
}
