use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ProposalError;

/// Text search results folded into the generation context.
pub const TEXT_RESULT_LIMIT: usize = 5;

/// Image results requested when the caller gives no count.
pub const DEFAULT_IMAGE_COUNT: usize = 20;

/// Shown in place of a product image when none was found.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://placehold.co/600x400?text=No+Image+Found";

// --- Search ---

/// One outbound search, built per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub product_name: String,
    /// Full query string sent to the provider.
    pub terms: String,
    pub region: String,
    pub limit: usize,
}

impl SearchQuery {
    /// Product name plus "official / features / reviews".
    pub fn for_text(product_name: &str, region: &str) -> Self {
        Self {
            product_name: product_name.to_string(),
            terms: format!("{product_name} 公式 特徴 レビュー"),
            region: region.to_string(),
            limit: TEXT_RESULT_LIMIT,
        }
    }

    /// Product name plus "product image / white background".
    pub fn for_images(product_name: &str, region: &str, count: usize) -> Self {
        Self {
            product_name: product_name.to_string(),
            terms: format!("{product_name} 商品画像 白背景"),
            region: region.to_string(),
            limit: count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub snippet: String,
    pub url: String,
}

impl SearchResult {
    /// `Title/Snippet/URL` block followed by a blank line.
    pub fn context_entry(&self) -> String {
        format!(
            "Title: {}\nSnippet: {}\nURL: {}\n\n",
            self.title, self.snippet, self.url
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResult {
    pub url: String,
}

/// Grounding text handed to the model. Empty is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenerationContext(String);

impl GenerationContext {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for GenerationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for GenerationContext {
    fn from(text: String) -> Self {
        Self(text)
    }
}

// --- Generated content ---

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Benefit {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub detail: String,
}

/// Marketing copy returned by the model. Missing keys deserialize to empty
/// values so the serialized form always carries every required key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalContent {
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub price: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<String>,
    #[serde(default)]
    pub catch_copy: String,
    #[serde(default)]
    pub benefits: Vec<Benefit>,
    #[serde(default)]
    pub product_specs: Vec<String>,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub target: String,
}

impl ProposalContent {
    pub const REQUIRED_KEYS: [&'static str; 7] = [
        "product_name",
        "price",
        "catch_copy",
        "benefits",
        "product_specs",
        "comment",
        "target",
    ];

    pub const BENEFIT_COUNT: usize = 3;
    pub const MIN_SPECS: usize = 3;
    pub const MAX_SPECS: usize = 5;

    /// Count checks the prompt asks for. Length targets stay advisory.
    pub fn validate(&self) -> Result<(), ProposalError> {
        let mut problems = Vec::new();

        if self.catch_copy.trim().is_empty() {
            problems.push("catch_copy is empty".to_string());
        }
        if self.benefits.len() != Self::BENEFIT_COUNT {
            problems.push(format!(
                "expected {} benefits, got {}",
                Self::BENEFIT_COUNT,
                self.benefits.len()
            ));
        }
        let specs = self.product_specs.len();
        if !(Self::MIN_SPECS..=Self::MAX_SPECS).contains(&specs) {
            problems.push(format!(
                "expected {}-{} product_specs, got {specs}",
                Self::MIN_SPECS,
                Self::MAX_SPECS
            ));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ProposalError::SchemaViolation(problems.join("; ")))
        }
    }
}

// --- Rendered output ---

/// Company block printed in the top corner of the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Letterhead {
    pub name: String,
    pub lines: Vec<String>,
}

/// Final rendered document. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalDocument {
    file_name: String,
    html: String,
}

impl ProposalDocument {
    pub fn new(file_name: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            html: html.into(),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn into_html(self) -> String {
        self.html
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> ProposalContent {
        ProposalContent {
            product_name: "白米 5kg".into(),
            price: "2000円".into(),
            capacity: Some("5kg".into()),
            catch_copy: "毎日の食卓に".into(),
            benefits: vec![Benefit::default(), Benefit::default(), Benefit::default()],
            product_specs: vec!["a".into(), "b".into(), "c".into()],
            comment: "おすすめです".into(),
            target: "30代主婦".into(),
        }
    }

    #[test]
    fn search_queries_append_qualifiers() {
        let text = SearchQuery::for_text("白米 5kg", "jp-jp");
        assert_eq!(text.terms, "白米 5kg 公式 特徴 レビュー");
        assert_eq!(text.limit, TEXT_RESULT_LIMIT);

        let images = SearchQuery::for_images("白米 5kg", "jp-jp", 7);
        assert_eq!(images.terms, "白米 5kg 商品画像 白背景");
        assert_eq!(images.limit, 7);
    }

    #[test]
    fn context_entry_format() {
        let r = SearchResult {
            title: "T".into(),
            snippet: "S".into(),
            url: "https://u".into(),
        };
        assert_eq!(r.context_entry(), "Title: T\nSnippet: S\nURL: https://u\n\n");
    }

    #[test]
    fn missing_keys_default_and_serialize_back() {
        let content: ProposalContent = serde_json::from_str(r#"{"catch_copy": "x"}"#).unwrap();
        assert_eq!(content.catch_copy, "x");
        assert!(content.benefits.is_empty());

        let value = serde_json::to_value(&content).unwrap();
        for key in ProposalContent::REQUIRED_KEYS {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        assert!(value.get("capacity").is_none());
    }

    #[test]
    fn wrong_types_fail_to_deserialize() {
        let result: Result<ProposalContent, _> =
            serde_json::from_str(r#"{"benefits": "three of them"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn validate_accepts_well_formed_content() {
        assert!(complete().validate().is_ok());
    }

    #[test]
    fn validate_reports_every_count_problem() {
        let mut content = complete();
        content.benefits.pop();
        content.product_specs.clear();
        content.catch_copy = " ".into();

        let err = content.validate().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("expected 3 benefits, got 2"));
        assert!(message.contains("expected 3-5 product_specs, got 0"));
        assert!(message.contains("catch_copy is empty"));
    }

    #[test]
    fn generation_context_is_transparent() {
        let ctx = GenerationContext::new("abc");
        assert_eq!(serde_json::to_string(&ctx).unwrap(), "\"abc\"");
        assert!(GenerationContext::empty().is_empty());
    }
}
