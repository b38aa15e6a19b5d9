//! Expense categorization through the text-generation service.

use async_trait::async_trait;
use fylr_core::ledger::{Categorization, ExpenseCategory};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::IntegrationError;
use crate::openai::OpenAiClient;

/// Assigns a category to an expense.
///
/// Implementations never fail: anything that prevents a judgment yields
/// [`Categorization::fallback`].
#[async_trait]
pub trait ExpenseCategorizer: Send + Sync {
    /// Categorizes one expense.
    async fn categorize(&self, description: &str, amount: Decimal) -> Categorization;
}

const SYSTEM_PROMPT: &str = "You are a tax assistant for small businesses and freelancers. \
Categorize business expenses for US federal tax purposes. Answer only with the requested JSON.";

/// Categorizer backed by an OpenAI-compatible model.
///
/// Without a client every expense gets the fallback categorization.
#[derive(Debug, Clone)]
pub struct LlmExpenseCategorizer {
    client: Option<OpenAiClient>,
    schema: Value,
}

#[derive(Debug, Deserialize)]
struct RawCategorization {
    category: String,
    tax_deductible: bool,
    #[serde(with = "rust_decimal::serde::float")]
    confidence: Decimal,
    reasoning: String,
}

impl LlmExpenseCategorizer {
    /// Creates a categorizer.
    #[must_use]
    pub fn new(client: Option<OpenAiClient>) -> Self {
        Self {
            client,
            schema: categorization_schema(),
        }
    }

    async fn request(
        &self,
        client: &OpenAiClient,
        description: &str,
        amount: Decimal,
    ) -> Result<Categorization, IntegrationError> {
        let content = client
            .complete_json(
                SYSTEM_PROMPT,
                &user_prompt(description, amount),
                "expense_categorization",
                &self.schema,
            )
            .await?;
        parse_categorization(&content)
    }
}

#[async_trait]
impl ExpenseCategorizer for LlmExpenseCategorizer {
    async fn categorize(&self, description: &str, amount: Decimal) -> Categorization {
        let Some(client) = &self.client else {
            tracing::debug!("Text generation not configured, using fallback categorization");
            return Categorization::fallback();
        };

        match self.request(client, description, amount).await {
            Ok(categorization) => {
                tracing::debug!(
                    category = %categorization.category,
                    confidence = %categorization.confidence,
                    "Expense categorized"
                );
                categorization
            }
            Err(e) => {
                tracing::warn!(error = %e, "Expense categorization failed, using fallback");
                Categorization::fallback()
            }
        }
    }
}

fn user_prompt(description: &str, amount: Decimal) -> String {
    format!(
        "Categorize this business expense.\n\
         Description: {description}\n\
         Amount: ${amount}\n\
         Choose the single best category, whether it is tax deductible for a \
         self-employed taxpayer, your confidence from 0 to 1, and a one-sentence reason."
    )
}

/// JSON schema constraining the model's answer.
#[must_use]
pub fn categorization_schema() -> Value {
    let categories: Vec<&str> = ExpenseCategory::ASSIGNABLE
        .iter()
        .map(|c| c.as_str())
        .collect();

    json!({
        "type": "object",
        "properties": {
            "category": { "type": "string", "enum": categories },
            "tax_deductible": { "type": "boolean" },
            "confidence": { "type": "number" },
            "reasoning": { "type": "string" }
        },
        "required": ["category", "tax_deductible", "confidence", "reasoning"],
        "additionalProperties": false
    })
}

/// Parses and validates the model's JSON answer.
pub fn parse_categorization(content: &str) -> Result<Categorization, IntegrationError> {
    let raw: RawCategorization =
        serde_json::from_str(content).map_err(|e| IntegrationError::Parse(e.to_string()))?;

    Categorization::validated(&raw.category, raw.tax_deductible, raw.confidence, raw.reasoning)
        .map_err(|e| IntegrationError::Parse(e.to_string()))
}
