//! Business profile stored on each user.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Current profile schema version.
pub const PROFILE_VERSION: u32 = 1;

/// Legal form of the business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    /// Sole proprietorship.
    SoleProprietor,
    /// Single-member LLC.
    LlcSingle,
    /// Multi-member LLC.
    LlcMulti,
    /// S corporation.
    SCorp,
    /// C corporation.
    CCorp,
    /// Partnership.
    Partnership,
}

impl EntityType {
    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SoleProprietor => "sole_proprietor",
            Self::LlcSingle => "llc_single",
            Self::LlcMulti => "llc_multi",
            Self::SCorp => "s_corp",
            Self::CCorp => "c_corp",
            Self::Partnership => "partnership",
        }
    }

    /// Returns true if the business files Schedule C.
    #[must_use]
    pub const fn files_schedule_c(self) -> bool {
        matches!(self, Self::SoleProprietor | Self::LlcSingle)
    }
}

/// Errors raised by profile validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    /// State is not a two-letter code.
    #[error("state must be a two-letter code, got '{0}'")]
    InvalidState(String),

    /// Revenue is negative.
    #[error("annual revenue cannot be negative")]
    NegativeRevenue,

    /// Schema version is not supported.
    #[error("unsupported profile version {0}")]
    UnsupportedVersion(u32),
}

/// Versioned business profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessProfile {
    /// Schema version.
    #[serde(default = "default_version")]
    pub version: u32,
    /// Legal form.
    #[serde(default)]
    pub entity_type: Option<EntityType>,
    /// Two-letter state code, stored uppercase.
    #[serde(default)]
    pub state: Option<String>,
    /// Free-text industry.
    #[serde(default)]
    pub industry: Option<String>,
    /// Annual revenue in dollars.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub annual_revenue: Option<Decimal>,
    /// Employee headcount.
    #[serde(default)]
    pub employee_count: Option<u32>,
    /// Whether a home office is used for business.
    #[serde(default)]
    pub has_home_office: bool,
}

const fn default_version() -> u32 {
    PROFILE_VERSION
}

impl Default for BusinessProfile {
    fn default() -> Self {
        Self {
            version: PROFILE_VERSION,
            entity_type: None,
            state: None,
            industry: None,
            annual_revenue: None,
            employee_count: None,
            has_home_office: false,
        }
    }
}

impl BusinessProfile {
    /// Validates and normalizes the profile.
    pub fn validated(mut self) -> Result<Self, ProfileError> {
        if self.version != PROFILE_VERSION {
            return Err(ProfileError::UnsupportedVersion(self.version));
        }

        if let Some(state) = self.state.take() {
            let state = state.trim().to_ascii_uppercase();
            if state.len() != 2 || !state.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(ProfileError::InvalidState(state));
            }
            self.state = Some(state);
        }

        if self.annual_revenue.is_some_and(|r| r.is_sign_negative() && !r.is_zero()) {
            return Err(ProfileError::NegativeRevenue);
        }

        self.industry = self
            .industry
            .map(|i| i.trim().to_string())
            .filter(|i| !i.is_empty());

        Ok(self)
    }

    /// One-line summary used in guidance prompts.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if let Some(entity) = self.entity_type {
            parts.push(format!("entity type {}", entity.as_str()));
        }
        if let Some(state) = &self.state {
            parts.push(format!("state {state}"));
        }
        if let Some(industry) = &self.industry {
            parts.push(format!("industry {industry}"));
        }
        if let Some(revenue) = self.annual_revenue {
            parts.push(format!("annual revenue ${revenue}"));
        }
        if let Some(count) = self.employee_count {
            parts.push(format!("{count} employees"));
        }
        if self.has_home_office {
            parts.push("home office".to_string());
        }

        if parts.is_empty() {
            "no business profile provided".to_string()
        } else {
            parts.join(", ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_deserialize_defaults_version() {
        let profile: BusinessProfile =
            serde_json::from_value(json!({ "entity_type": "llc_single" })).unwrap();
        assert_eq!(profile.version, PROFILE_VERSION);
        assert_eq!(profile.entity_type, Some(EntityType::LlcSingle));
        assert!(!profile.has_home_office);
    }

    #[test]
    fn test_validated_normalizes_state() {
        let profile = BusinessProfile {
            state: Some(" ca ".into()),
            industry: Some("   ".into()),
            ..BusinessProfile::default()
        }
        .validated()
        .unwrap();
        assert_eq!(profile.state.as_deref(), Some("CA"));
        assert!(profile.industry.is_none());
    }

    #[test]
    fn test_validated_rejects_bad_state() {
        let err = BusinessProfile {
            state: Some("California".into()),
            ..BusinessProfile::default()
        }
        .validated()
        .unwrap_err();
        assert!(matches!(err, ProfileError::InvalidState(_)));
    }

    #[test]
    fn test_validated_rejects_negative_revenue() {
        let err = BusinessProfile {
            annual_revenue: Some(dec!(-1)),
            ..BusinessProfile::default()
        }
        .validated()
        .unwrap_err();
        assert_eq!(err, ProfileError::NegativeRevenue);
    }

    #[test]
    fn test_validated_rejects_future_version() {
        let err = BusinessProfile {
            version: 2,
            ..BusinessProfile::default()
        }
        .validated()
        .unwrap_err();
        assert_eq!(err, ProfileError::UnsupportedVersion(2));
    }

    #[test]
    fn test_summary() {
        let profile = BusinessProfile {
            entity_type: Some(EntityType::SoleProprietor),
            state: Some("TX".into()),
            has_home_office: true,
            ..BusinessProfile::default()
        };
        assert_eq!(profile.summary(), "entity type sole_proprietor, state TX, home office");
        assert_eq!(BusinessProfile::default().summary(), "no business profile provided");
    }

    #[test]
    fn test_schedule_c_filers() {
        assert!(EntityType::SoleProprietor.files_schedule_c());
        assert!(!EntityType::SCorp.files_schedule_c());
    }
}
