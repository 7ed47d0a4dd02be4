use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{error, info};

use ai_client::{truncate_to_char_boundary, Gemini};
use proposal_common::{Benefit, Config, GenerationContext, ProposalContent, ProposalError};

use crate::prompt::build_prompt;
use crate::traits::CopyModel;

/// Turns product inputs plus search context into `ProposalContent`.
/// One model call per request; any failure is terminal.
#[derive(Clone)]
pub struct ContentGenerator {
    model: Arc<dyn CopyModel>,
    strict: bool,
}

impl ContentGenerator {
    pub fn new(model: Arc<dyn CopyModel>) -> Self {
        Self {
            model,
            strict: false,
        }
    }

    /// Gemini-backed generator. Fails with `MissingCredential` when no key
    /// is configured, before anything touches the network.
    pub fn from_config(config: &Config) -> Result<Self, ProposalError> {
        let key = config.require_api_key()?;
        let gemini = Gemini::new(key, config.gemini_model.clone())
            .map_err(|e| ProposalError::Config(e.to_string()))?;
        Ok(Self::new(Arc::new(gemini)).strict(config.strict_schema))
    }

    /// Reject content whose counts differ from what the prompt asks for.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub async fn generate(
        &self,
        product_name: &str,
        price: &str,
        capacity: Option<&str>,
        context: &GenerationContext,
    ) -> Result<ProposalContent, ProposalError> {
        info!(
            product = product_name,
            context_bytes = context.as_str().len(),
            "Generating proposal content"
        );

        let prompt = build_prompt(product_name, price, capacity, context);

        let raw = self.model.complete_json(&prompt).await.map_err(|e| {
            error!(product = product_name, error = %e, "Model call failed");
            ProposalError::Generation(e.to_string())
        })?;

        let mut content = parse_content(&raw, self.strict).map_err(|e| {
            error!(
                product = product_name,
                error = %e,
                response = truncate_to_char_boundary(&raw, 200),
                "Model output did not parse"
            );
            e
        })?;

        if self.strict {
            content.validate().map_err(|e| {
                error!(product = product_name, error = %e, "Model output failed validation");
                e
            })?;
        }

        fill_echo_fields(&mut content, product_name, price, capacity);
        info!(
            product = product_name,
            benefits = content.benefits.len(),
            specs = content.product_specs.len(),
            "Proposal content generated"
        );
        Ok(content)
    }
}

/// Parse the model's text as a JSON object. Surrounding prose or code fences
/// make this fail either way.
///
/// With `strict` the object must deserialize into `ProposalContent` as-is.
/// Otherwise any object passes: scalars of the wrong type become text and
/// shapes that make no sense become empty.
pub fn parse_content(raw: &str, strict: bool) -> Result<ProposalContent, ProposalError> {
    let value: Value = serde_json::from_str(raw.trim())
        .map_err(|e| ProposalError::MalformedOutput(format!("not valid JSON: {e}")))?;

    let Value::Object(fields) = value else {
        return Err(ProposalError::MalformedOutput(
            "expected a JSON object".to_string(),
        ));
    };

    if strict {
        return serde_json::from_value(Value::Object(fields))
            .map_err(|e| ProposalError::MalformedOutput(format!("unexpected shape: {e}")));
    }
    Ok(lenient_content(&fields))
}

fn lenient_content(fields: &Map<String, Value>) -> ProposalContent {
    let benefits = match fields.get("benefits") {
        Some(Value::Array(items)) => items.iter().filter_map(lenient_benefit).collect(),
        Some(item @ Value::Object(_)) => lenient_benefit(item).into_iter().collect(),
        _ => Vec::new(),
    };
    let product_specs = match fields.get("product_specs") {
        Some(Value::Array(items)) => items.iter().filter_map(scalar_text).collect(),
        Some(item) => scalar_text(item).into_iter().collect(),
        None => Vec::new(),
    };
    let capacity = match fields.get("capacity") {
        None | Some(Value::Null) => None,
        Some(v) => Some(field_text(Some(v))),
    };

    ProposalContent {
        product_name: field_text(fields.get("product_name")),
        price: field_text(fields.get("price")),
        capacity,
        catch_copy: field_text(fields.get("catch_copy")),
        benefits,
        product_specs,
        comment: field_text(fields.get("comment")),
        target: field_text(fields.get("target")),
    }
}

fn lenient_benefit(item: &Value) -> Option<Benefit> {
    match item {
        Value::Object(o) => Some(Benefit {
            title: field_text(o.get("title")),
            detail: field_text(o.get("detail")),
        }),
        other => scalar_text(other).map(|title| Benefit {
            title,
            detail: String::new(),
        }),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn field_text(value: Option<&Value>) -> String {
    value.and_then(scalar_text).unwrap_or_default()
}

/// The echo fields repeat the caller's input; blanks are filled from it.
fn fill_echo_fields(
    content: &mut ProposalContent,
    product_name: &str,
    price: &str,
    capacity: Option<&str>,
) {
    if content.product_name.trim().is_empty() {
        content.product_name = product_name.to_string();
    }
    if content.price.trim().is_empty() {
        content.price = price.to_string();
    }
    if content.capacity.as_deref().map_or(true, |c| c.trim().is_empty()) {
        content.capacity = capacity.map(str::to_string);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_content, MockModel};
    use ai_client::AiError;

    fn generator(model: MockModel) -> ContentGenerator {
        ContentGenerator::new(Arc::new(model))
    }

    #[test]
    fn fenced_output_is_malformed() {
        let raw = "Here you go:\n```json\n{\"catch_copy\": \"x\"}\n```";
        assert!(matches!(parse_content(raw, false), Err(ProposalError::MalformedOutput(_))));
        let raw = "```json\n{\"catch_copy\": \"x\"}\n```";
        assert!(matches!(parse_content(raw, false), Err(ProposalError::MalformedOutput(_))));
    }

    #[test]
    fn non_object_json_is_malformed() {
        assert!(matches!(parse_content("[1, 2]", false), Err(ProposalError::MalformedOutput(_))));
        assert!(matches!(parse_content("\"text\"", true), Err(ProposalError::MalformedOutput(_))));
    }

    #[test]
    fn surrounding_whitespace_is_fine() {
        let content = parse_content("\n  {\"catch_copy\": \"やさしい甘み\"}  \n", false).unwrap();
        assert_eq!(content.catch_copy, "やさしい甘み");
    }

    #[test]
    fn wrong_types_pass_through_unless_strict() {
        let raw = r#"{"price": 2000, "capacity": 5, "catch_copy": "x",
            "benefits": ["早い", {"title": "安い", "detail": 1}, null],
            "product_specs": "国産", "comment": null, "target": false}"#;

        let content = parse_content(raw, false).unwrap();
        assert_eq!(content.price, "2000");
        assert_eq!(content.capacity.as_deref(), Some("5"));
        assert_eq!(content.benefits.len(), 2);
        assert_eq!(content.benefits[0].title, "早い");
        assert_eq!(content.benefits[1].detail, "1");
        assert_eq!(content.product_specs, vec!["国産".to_string()]);
        assert_eq!(content.comment, "");
        assert_eq!(content.target, "false");

        assert!(matches!(
            parse_content(raw, true),
            Err(ProposalError::MalformedOutput(_))
        ));
    }

    #[tokio::test]
    async fn numeric_price_is_passed_through_as_text() {
        let raw = r#"{"product_name": "白米 5kg", "price": 2000, "catch_copy": "x"}"#;
        let out = generator(MockModel::returning(raw))
            .generate("白米 5kg", "2000円", Some("5kg"), &GenerationContext::empty())
            .await
            .unwrap();
        assert_eq!(out.price, "2000");

        let err = generator(MockModel::returning(raw))
            .strict(true)
            .generate("白米 5kg", "2000円", Some("5kg"), &GenerationContext::empty())
            .await
            .unwrap_err();
        assert!(matches!(err, ProposalError::MalformedOutput(_)));
    }

    #[tokio::test]
    async fn returns_parsed_content_with_all_keys() {
        let content = generator(MockModel::returning_content(&sample_content()))
            .generate("白米 5kg", "2000円", Some("5kg"), &GenerationContext::empty())
            .await
            .unwrap();

        assert_eq!(content, sample_content());
        let value = serde_json::to_value(&content).unwrap();
        for key in ProposalContent::REQUIRED_KEYS {
            assert!(value.get(key).is_some(), "missing {key}");
        }
    }

    #[tokio::test]
    async fn prompt_reaches_the_model_once() {
        let model = Arc::new(MockModel::returning_content(&sample_content()));
        let generator = ContentGenerator::new(model.clone());
        let ctx = GenerationContext::new("Title: a\nSnippet: b\nURL: c\n\n");

        generator
            .generate("白米 5kg", "2000円", Some("5kg"), &ctx)
            .await
            .unwrap();

        let prompts = model.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("白米 5kg"));
        assert!(prompts[0].contains("Title: a\nSnippet: b\nURL: c"));
    }

    #[tokio::test]
    async fn model_failure_is_generation_error() {
        let err = generator(MockModel::failing(|| AiError::Api {
            status: 403,
            message: "API key not valid".into(),
        }))
        .generate("白米", "1円", None, &GenerationContext::empty())
        .await
        .unwrap_err();

        assert!(matches!(err, ProposalError::Generation(_)));
        assert!(err.is_generation_failure());
    }

    #[tokio::test]
    async fn lenient_mode_passes_short_benefit_lists_through() {
        let mut content = sample_content();
        content.benefits.truncate(1);
        let out = generator(MockModel::returning_content(&content))
            .generate("白米 5kg", "2000円", Some("5kg"), &GenerationContext::empty())
            .await
            .unwrap();
        assert_eq!(out.benefits.len(), 1);
    }

    #[tokio::test]
    async fn strict_mode_rejects_short_benefit_lists() {
        let mut content = sample_content();
        content.benefits.truncate(1);
        let err = generator(MockModel::returning_content(&content))
            .strict(true)
            .generate("白米 5kg", "2000円", Some("5kg"), &GenerationContext::empty())
            .await
            .unwrap_err();
        assert!(matches!(err, ProposalError::SchemaViolation(_)));
    }

    #[tokio::test]
    async fn blank_echo_fields_are_filled_from_input() {
        let out = generator(MockModel::returning(r#"{"catch_copy": "x"}"#))
            .generate("白米 5kg", "2000円", Some("5kg"), &GenerationContext::empty())
            .await
            .unwrap();
        assert_eq!(out.product_name, "白米 5kg");
        assert_eq!(out.price, "2000円");
        assert_eq!(out.capacity.as_deref(), Some("5kg"));
    }

    #[test]
    fn missing_key_fails_before_any_request() {
        let err = ContentGenerator::from_config(&Config::default()).err().unwrap();
        assert!(matches!(err, ProposalError::MissingCredential));
    }

    #[test]
    fn configured_key_builds_a_generator() {
        let config = Config::default().with_api_key("AIza-test");
        assert!(ContentGenerator::from_config(&config).is_ok());
    }
}
