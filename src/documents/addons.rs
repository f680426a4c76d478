//! Purchasable add-ons and the canonical key set.
//!
//! Each add-on produces a separate trailing document (addendum). Callers have
//! historically sent several spellings for the same add-on; the accepted
//! legacy spellings are listed in [`LEGACY_ADDON_KEYS`] and nothing else is
//! mapped. Unknown keys are ignored.

use serde::Serialize;

use super::contract_type::ContractType;
use super::model::DocumentRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Addon {
    Explanations,
    Protocol,
}

/// Legacy add-on keys and the canonical add-on they stand for.
pub const LEGACY_ADDON_KEYS: &[(&str, Addon)] = &[
    ("explanation", Addon::Explanations),
    ("handover_protocol", Addon::Protocol),
];

impl Addon {
    pub const ALL: [Addon; 2] = [Addon::Explanations, Addon::Protocol];

    /// Canonical key.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Explanations => "explanations",
            Self::Protocol => "protocol",
        }
    }

    /// Resolve a raw key: canonical keys first, then the legacy mapping.
    pub fn parse(raw: &str) -> Option<Self> {
        let key = raw.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|addon| addon.key() == key)
            .or_else(|| {
                LEGACY_ADDON_KEYS
                    .iter()
                    .find(|(legacy, _)| *legacy == key)
                    .map(|(_, addon)| *addon)
            })
    }

    pub fn role(&self) -> DocumentRole {
        match self {
            Self::Explanations => DocumentRole::Explanations,
            Self::Protocol => DocumentRole::Protocol,
        }
    }
}

/// Ordered, de-duplicated add-on selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddonSelection {
    addons: Vec<Addon>,
    ignored: Vec<String>,
}

impl AddonSelection {
    /// Keeps the order of first occurrence; unknown keys are remembered but
    /// otherwise ignored.
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selection = Self::default();
        for key in keys {
            let key = key.as_ref();
            match Addon::parse(key) {
                Some(addon) if !selection.addons.contains(&addon) => selection.addons.push(addon),
                Some(_) => {}
                None => selection.ignored.push(key.to_string()),
            }
        }
        selection
    }

    pub fn contains(&self, addon: Addon) -> bool {
        self.addons.contains(&addon)
    }

    /// Selected add-ons the contract type knows about, in selection order.
    pub fn recognized_for(&self, contract_type: ContractType) -> Vec<Addon> {
        let supported = contract_type.supported_addons();
        self.addons
            .iter()
            .copied()
            .filter(|addon| supported.contains(addon))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = Addon> + '_ {
        self.addons.iter().copied()
    }

    pub fn ignored(&self) -> &[String] {
        &self.ignored
    }

    pub fn is_empty(&self) -> bool {
        self.addons.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_and_legacy_keys() {
        assert_eq!(Addon::parse("protocol"), Some(Addon::Protocol));
        assert_eq!(Addon::parse("handover_protocol"), Some(Addon::Protocol));
        assert_eq!(Addon::parse(" Explanations "), Some(Addon::Explanations));
        assert_eq!(Addon::parse("explanation"), Some(Addon::Explanations));
        assert_eq!(Addon::parse("protocols"), None);
        assert_eq!(Addon::parse("handover"), None);
    }

    #[test]
    fn test_selection_keeps_first_occurrence_order() {
        let selection =
            AddonSelection::from_keys(["protocol", "explanation", "handover_protocol", "insurance"]);
        assert_eq!(
            selection.iter().collect::<Vec<_>>(),
            vec![Addon::Protocol, Addon::Explanations]
        );
        assert_eq!(selection.ignored(), ["insurance".to_string()]);
    }

    #[test]
    fn test_recognized_for_contract_type() {
        let selection = AddonSelection::from_keys(["explanations", "protocol"]);
        assert_eq!(
            selection.recognized_for(ContractType::GarageLease),
            vec![Addon::Explanations, Addon::Protocol]
        );
    }
}
