//! Paid subscriptions through Stripe.

use std::time::Duration;

use async_trait::async_trait;
use fylr_shared::config::StripeConfig;
use fylr_shared::types::Tier;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::IntegrationError;

/// Lifecycle state of a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Paid and usable.
    Active,
    /// In a provider-side trial period.
    Trialing,
    /// Awaiting first payment.
    Incomplete,
    /// First payment window expired.
    IncompleteExpired,
    /// Renewal payment failed.
    PastDue,
    /// Unpaid after retries.
    Unpaid,
    /// Canceled.
    Canceled,
    /// Paused.
    Paused,
    /// Creation failed on our side or the provider's.
    Failed,
}

impl SubscriptionStatus {
    /// Returns true if the tier should be granted.
    #[must_use]
    pub const fn grants_access(self) -> bool {
        matches!(self, Self::Active | Self::Trialing)
    }
}

/// Result of a subscription attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubscriptionOutcome {
    /// Provider subscription ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_id: Option<String>,
    /// Provider customer ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    /// Resulting status.
    pub status: SubscriptionStatus,
    /// True when no provider was contacted.
    pub mock: bool,
    /// Failure description when `status` is `failed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SubscriptionOutcome {
    /// Outcome returned when no payment provider is configured.
    #[must_use]
    pub fn mock(tier: Tier) -> Self {
        Self {
            subscription_id: Some(format!("sub_mock_{tier}")),
            customer_id: None,
            status: SubscriptionStatus::Active,
            mock: true,
            error: None,
        }
    }

    /// Outcome returned when the attempt failed.
    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            subscription_id: None,
            customer_id: None,
            status: SubscriptionStatus::Failed,
            mock: false,
            error: Some(error.into()),
        }
    }
}

/// Creates subscriptions with a payment provider.
///
/// Implementations never fail: errors become a `failed` outcome.
#[async_trait]
pub trait BillingProvider: Send + Sync {
    /// Subscribes `email` to `tier`.
    async fn create_subscription(&self, email: &str, tier: Tier) -> SubscriptionOutcome;
}

/// Stripe-backed billing. Without a secret key every request is mocked.
#[derive(Debug, Clone)]
pub struct StripeBilling {
    client: Client,
    base_url: String,
    secret_key: Option<String>,
    basic_price_id: Option<String>,
    pro_price_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StripeObject {
    id: String,
}

#[derive(Debug, Deserialize)]
struct StripeSubscription {
    id: String,
    status: SubscriptionStatus,
}

impl StripeBilling {
    /// Builds the provider from configuration.
    pub fn new(config: &StripeConfig) -> Result<Self, IntegrationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            secret_key: config.secret_key.clone().filter(|k| !k.trim().is_empty()),
            basic_price_id: config.basic_price_id.clone(),
            pro_price_id: config.pro_price_id.clone(),
        })
    }

    /// Returns true if a secret key is configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.secret_key.is_some()
    }

    fn price_id(&self, tier: Tier) -> Option<&str> {
        match tier {
            Tier::Trial => None,
            Tier::Basic => self.basic_price_id.as_deref(),
            Tier::Pro => self.pro_price_id.as_deref(),
        }
    }

    async fn post_form<T: for<'de> Deserialize<'de>>(
        &self,
        secret_key: &str,
        resource: &str,
        form: &[(&str, &str)],
    ) -> Result<T, IntegrationError> {
        let response = self
            .client
            .post(format!("{}/{resource}", self.base_url))
            .bearer_auth(secret_key)
            .form(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IntegrationError::status(status, &body));
        }

        response
            .json()
            .await
            .map_err(|e| IntegrationError::Parse(e.to_string()))
    }

    async fn subscribe(
        &self,
        secret_key: &str,
        email: &str,
        tier: Tier,
    ) -> Result<SubscriptionOutcome, IntegrationError> {
        let price_id = self
            .price_id(tier)
            .ok_or(IntegrationError::NotConfigured("price ID for tier"))?;

        let customer: StripeObject = self
            .post_form(secret_key, "customers", &[("email", email)])
            .await?;

        let subscription: StripeSubscription = self
            .post_form(
                secret_key,
                "subscriptions",
                &[
                    ("customer", customer.id.as_str()),
                    ("items[0][price]", price_id),
                    ("metadata[tier]", tier.as_str()),
                ],
            )
            .await?;

        Ok(SubscriptionOutcome {
            subscription_id: Some(subscription.id),
            customer_id: Some(customer.id),
            status: subscription.status,
            mock: false,
            error: None,
        })
    }
}

#[async_trait]
impl BillingProvider for StripeBilling {
    async fn create_subscription(&self, email: &str, tier: Tier) -> SubscriptionOutcome {
        let Some(secret_key) = self.secret_key.as_deref() else {
            tracing::debug!(tier = %tier, "Payment provider not configured, returning mock subscription");
            return SubscriptionOutcome::mock(tier);
        };

        match self.subscribe(secret_key, email, tier).await {
            Ok(outcome) => {
                tracing::info!(tier = %tier, status = ?outcome.status, "Subscription created");
                outcome
            }
            Err(e) => {
                tracing::warn!(tier = %tier, error = %e, "Subscription creation failed");
                SubscriptionOutcome::failed(e.to_string())
            }
        }
    }
}
