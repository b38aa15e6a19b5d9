//! Subscription tiers.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Subscription level gating feature access.
///
/// Variants are declared from lowest to highest so `Ord` follows the upgrade path.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Entry tier every new account starts on.
    #[default]
    Trial,
    /// Mid tier.
    Basic,
    /// Top tier.
    Pro,
}

impl Tier {
    /// All tiers in upgrade order.
    pub const ALL: [Self; 3] = [Self::Trial, Self::Basic, Self::Pro];

    /// Returns the wire name of the tier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trial => "trial",
            Self::Basic => "basic",
            Self::Pro => "pro",
        }
    }

    /// Returns true for the tier new accounts start on.
    #[must_use]
    pub const fn is_entry(self) -> bool {
        matches!(self, Self::Trial)
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known tier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown subscription tier: {0}")]
pub struct ParseTierError(pub String);

impl std::str::FromStr for Tier {
    type Err = ParseTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trial" => Ok(Self::Trial),
            "basic" => Ok(Self::Basic),
            "pro" => Ok(Self::Pro),
            _ => Err(ParseTierError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_order_follows_upgrade_path() {
        assert!(Tier::Trial < Tier::Basic);
        assert!(Tier::Basic < Tier::Pro);
        assert_eq!(Tier::default(), Tier::Trial);
    }

    #[test]
    fn test_tier_parse() {
        assert_eq!("trial".parse::<Tier>().unwrap(), Tier::Trial);
        assert_eq!(" PRO ".parse::<Tier>().unwrap(), Tier::Pro);
        assert!("premium".parse::<Tier>().is_err());
    }

    #[test]
    fn test_tier_serde_uses_lowercase() {
        assert_eq!(serde_json::to_string(&Tier::Basic).unwrap(), "\"basic\"");
        let tier: Tier = serde_json::from_str("\"pro\"").unwrap();
        assert_eq!(tier, Tier::Pro);
    }
}
