//! Contract types and the vocabulary that depends on record values.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::addons::Addon;
use super::record::ContractRecord;
use super::GeneratorError;

/// The fixed set of contracts the engine can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContractType {
    FullSublease,
    RoomSublease,
    GarageLease,
}

impl ContractType {
    pub const ALL: [ContractType; 3] = [
        ContractType::FullSublease,
        ContractType::RoomSublease,
        ContractType::GarageLease,
    ];

    /// Wire identifier, also used as filename prefix.
    pub fn id(&self) -> &'static str {
        match self {
            Self::FullSublease => "full-sublease",
            Self::RoomSublease => "room-sublease",
            Self::GarageLease => "garage-lease",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::FullSublease => "Untermietvertrag über eine Wohnung",
            Self::RoomSublease => "Untermietvertrag über ein WG-Zimmer",
            Self::GarageLease => "Mietvertrag über eine Garage / einen Stellplatz",
        }
    }

    /// Add-ons that produce an addendum for this contract type.
    pub fn supported_addons(&self) -> &'static [Addon] {
        match self {
            Self::FullSublease | Self::RoomSublease | Self::GarageLease => &Addon::ALL,
        }
    }

    pub fn is_sublease(&self) -> bool {
        matches!(self, Self::FullSublease | Self::RoomSublease)
    }
}

impl fmt::Display for ContractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ContractType {
    type Err = GeneratorError;

    /// Accepts the kebab-case identifier; underscores are treated as hyphens.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.id() == normalized)
            .ok_or_else(|| GeneratorError::UnknownContractType(raw.to_string()))
    }
}

/// Fixed-term vs indefinite lease, derived from the `lease_type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaseTerm {
    Fixed,
    Indefinite,
}

impl LeaseTerm {
    /// Anything that is not explicitly a fixed term gets the indefinite wording.
    pub fn from_record(record: &ContractRecord) -> Self {
        match record.text("lease_type").map(|value| value.to_lowercase()) {
            Some(value) if matches!(value.as_str(), "fixed" | "limited" | "befristet") => {
                Self::Fixed
            }
            _ => Self::Indefinite,
        }
    }
}

/// What a garage lease rents out, driving the "Garage" vs "Stellplatz" wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Garage,
    ParkingSpace,
    Unspecified,
}

impl ObjectKind {
    pub fn from_record(record: &ContractRecord) -> Self {
        let Some(value) = record.text("garage_type") else {
            return Self::Unspecified;
        };
        match value.to_lowercase().as_str() {
            "garage" | "einzelgarage" | "doppelgarage" | "tiefgarage" => Self::Garage,
            "stellplatz" | "parking" | "parking_space" | "parking-space" | "carport"
            | "tiefgaragenstellplatz" => Self::ParkingSpace,
            _ => Self::Unspecified,
        }
    }

    /// Bare noun, e.g. "Stellplatz".
    pub fn noun(&self) -> &'static str {
        match self {
            Self::Garage => "Garage",
            Self::ParkingSpace => "Stellplatz",
            Self::Unspecified => "Mietobjekt",
        }
    }

    pub fn nominative(&self) -> &'static str {
        match self {
            Self::Garage => "die Garage",
            Self::ParkingSpace => "der Stellplatz",
            Self::Unspecified => "das Mietobjekt",
        }
    }

    pub fn accusative(&self) -> &'static str {
        match self {
            Self::Garage => "die Garage",
            Self::ParkingSpace => "den Stellplatz",
            Self::Unspecified => "das Mietobjekt",
        }
    }

    pub fn genitive(&self) -> &'static str {
        match self {
            Self::Garage => "der Garage",
            Self::ParkingSpace => "des Stellplatzes",
            Self::Unspecified => "des Mietobjekts",
        }
    }

    /// Indefinite accusative used in titles, e.g. "über einen Stellplatz".
    pub fn indefinite(&self) -> &'static str {
        match self {
            Self::Garage => "eine Garage",
            Self::ParkingSpace => "einen Stellplatz",
            Self::Unspecified => "ein Mietobjekt",
        }
    }

    /// Location phrase, e.g. "auf dem Stellplatz".
    pub fn locative(&self) -> &'static str {
        match self {
            Self::Garage => "in der Garage",
            Self::ParkingSpace => "auf dem Stellplatz",
            Self::Unspecified => "im Mietobjekt",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_contract_type() {
        assert_eq!("room-sublease".parse::<ContractType>().unwrap(), ContractType::RoomSublease);
        assert_eq!(" GARAGE_LEASE ".parse::<ContractType>().unwrap(), ContractType::GarageLease);
        assert!(matches!(
            "house-sale".parse::<ContractType>(),
            Err(GeneratorError::UnknownContractType(value)) if value == "house-sale"
        ));
    }

    #[test]
    fn test_lease_term_from_record() {
        let fixed = ContractRecord::from_pairs(&[("lease_type", "Befristet")]);
        let open = ContractRecord::from_pairs(&[("contract_type", "unlimited")]);
        assert_eq!(LeaseTerm::from_record(&fixed), LeaseTerm::Fixed);
        assert_eq!(LeaseTerm::from_record(&open), LeaseTerm::Indefinite);
        assert_eq!(LeaseTerm::from_record(&ContractRecord::default()), LeaseTerm::Indefinite);
    }

    #[test]
    fn test_object_kind_vocabulary() {
        let parking = ContractRecord::from_pairs(&[("garage_type", "carport")]);
        let kind = ObjectKind::from_record(&parking);
        assert_eq!(kind, ObjectKind::ParkingSpace);
        assert_eq!(kind.accusative(), "den Stellplatz");
        assert_eq!(ObjectKind::from_record(&ContractRecord::default()).noun(), "Mietobjekt");
    }
}
