//! Form guidance through the text-generation service.

use async_trait::async_trait;
use fylr_core::forms::{FormData, FormGuidance, FormTemplate, missing_fields};
use fylr_core::profile::BusinessProfile;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::IntegrationError;
use crate::openai::OpenAiClient;

/// Suggests how to complete a tax form.
///
/// Implementations never fail: anything that prevents AI guidance yields
/// [`FormGuidance::from_template`].
#[async_trait]
pub trait GuidanceAdvisor: Send + Sync {
    /// Produces guidance for one form.
    async fn advise(
        &self,
        template: &FormTemplate,
        data: &FormData,
        profile: &BusinessProfile,
    ) -> FormGuidance;
}

const SYSTEM_PROMPT: &str = "You are an expert tax advisor helping small businesses and \
freelancers complete IRS forms. Give concrete, conservative guidance. Answer only with the \
requested JSON.";

/// Advisor backed by an OpenAI-compatible model.
#[derive(Debug, Clone)]
pub struct LlmGuidanceAdvisor {
    client: Option<OpenAiClient>,
    schema: Value,
}

#[derive(Debug, Deserialize)]
struct RawGuidance {
    next_steps: Vec<String>,
    recommendations: Vec<String>,
    warnings: Vec<String>,
    #[serde(with = "rust_decimal::serde::float")]
    estimated_savings: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    confidence: Decimal,
}

impl LlmGuidanceAdvisor {
    /// Creates an advisor.
    #[must_use]
    pub fn new(client: Option<OpenAiClient>) -> Self {
        Self {
            client,
            schema: guidance_schema(),
        }
    }

    async fn request(
        &self,
        client: &OpenAiClient,
        template: &FormTemplate,
        data: &FormData,
        profile: &BusinessProfile,
    ) -> Result<FormGuidance, IntegrationError> {
        let prompt = user_prompt(template, data, profile)?;
        let content = client
            .complete_json(SYSTEM_PROMPT, &prompt, "form_guidance", &self.schema)
            .await?;
        parse_guidance(&content)
    }
}

#[async_trait]
impl GuidanceAdvisor for LlmGuidanceAdvisor {
    async fn advise(
        &self,
        template: &FormTemplate,
        data: &FormData,
        profile: &BusinessProfile,
    ) -> FormGuidance {
        let Some(client) = &self.client else {
            return FormGuidance::from_template(template, data);
        };

        match self.request(client, template, data, profile).await {
            Ok(guidance) => guidance,
            Err(e) => {
                tracing::warn!(
                    form_type = %template.form_type,
                    error = %e,
                    "Guidance request failed, using template guidance"
                );
                FormGuidance::from_template(template, data)
            }
        }
    }
}

fn user_prompt(
    template: &FormTemplate,
    data: &FormData,
    profile: &BusinessProfile,
) -> Result<String, IntegrationError> {
    let data_json =
        serde_json::to_string(data).map_err(|e| IntegrationError::Parse(e.to_string()))?;
    let missing = missing_fields(template, data);

    Ok(format!(
        "Form: {title} (version {version})\n\
         Business profile: {profile}\n\
         Current entries: {data_json}\n\
         Unanswered fields: {missing}\n\
         Provide next steps, deduction recommendations, audit-risk warnings, \
         estimated tax savings in dollars, and your confidence from 0 to 1.",
        title = template.title,
        version = template.version,
        profile = profile.summary(),
        missing = missing.join(", "),
    ))
}

/// JSON schema constraining the model's answer.
#[must_use]
pub fn guidance_schema() -> Value {
    let string_list = json!({ "type": "array", "items": { "type": "string" } });
    json!({
        "type": "object",
        "properties": {
            "next_steps": string_list,
            "recommendations": string_list,
            "warnings": string_list,
            "estimated_savings": { "type": "number" },
            "confidence": { "type": "number" }
        },
        "required": ["next_steps", "recommendations", "warnings", "estimated_savings", "confidence"],
        "additionalProperties": false
    })
}

/// Parses and validates the model's JSON answer.
pub fn parse_guidance(content: &str) -> Result<FormGuidance, IntegrationError> {
    let raw: RawGuidance =
        serde_json::from_str(content).map_err(|e| IntegrationError::Parse(e.to_string()))?;

    if raw.confidence < Decimal::ZERO || raw.confidence > Decimal::ONE {
        return Err(IntegrationError::Parse(format!(
            "confidence out of range: {}",
            raw.confidence
        )));
    }
    if raw.estimated_savings.is_sign_negative() && !raw.estimated_savings.is_zero() {
        return Err(IntegrationError::Parse("negative estimated savings".to_string()));
    }

    Ok(FormGuidance {
        next_steps: raw.next_steps,
        recommendations: raw.recommendations,
        warnings: raw.warnings,
        estimated_savings: raw.estimated_savings.round_dp(2),
        confidence: raw.confidence,
        ai_generated: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fylr_core::forms::{FormType, template_for};
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_valid_guidance() {
        let guidance = parse_guidance(
            r#"{"next_steps":["Enter gross receipts"],"recommendations":["Claim home office"],
                "warnings":[],"estimated_savings":1200.5,"confidence":0.8}"#,
        )
        .unwrap();
        assert_eq!(guidance.next_steps, vec!["Enter gross receipts"]);
        assert_eq!(guidance.estimated_savings, dec!(1200.5));
        assert!(guidance.ai_generated);
    }

    #[test]
    fn test_parse_rejects_bad_confidence() {
        let err = parse_guidance(
            r#"{"next_steps":[],"recommendations":[],"warnings":[],"estimated_savings":0,"confidence":7}"#,
        )
        .unwrap_err();
        assert!(matches!(err, IntegrationError::Parse(_)));
    }

    #[test]
    fn test_parse_rejects_missing_keys() {
        assert!(parse_guidance(r#"{"next_steps":[]}"#).is_err());
    }

    #[test]
    fn test_prompt_mentions_missing_fields() {
        let template = template_for(FormType::ScheduleSe);
        let prompt =
            user_prompt(template, &FormData::new(), &BusinessProfile::default()).unwrap();
        assert!(prompt.contains("taxpayer_info."));
        assert!(prompt.contains("no business profile provided"));
    }

    #[tokio::test]
    async fn test_unconfigured_uses_template_guidance() {
        let template = template_for(FormType::ScheduleC);
        let data = FormData::blank(template);
        let guidance = LlmGuidanceAdvisor::new(None)
            .advise(template, &data, &BusinessProfile::default())
            .await;
        assert_eq!(guidance, FormGuidance::from_template(template, &data));
        assert!(!guidance.ai_generated);
    }
}
