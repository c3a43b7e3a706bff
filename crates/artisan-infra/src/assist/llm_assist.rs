//! LLM-powered assist gateway.
//!
//! `LlmAssistGateway` implements `AssistGateway` with one structured-output
//! completion per operation. Each call sends a JSON schema generated by
//! `schemars` and parses the reply with `serde_json`; a reply that does not
//! fit the expected shape is reported as `AssistError::Malformed`.

use schemars::JsonSchema;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use artisan_core::assist::gateway::AssistGateway;
use artisan_core::llm::box_provider::BoxLlmProvider;
use artisan_types::config::AssistConfig;
use artisan_types::error::AssistError;
use artisan_types::llm::{CompletionRequest, Message, OutputConfig};
use artisan_types::prompt::{PartialPromptElements, SuggestionSet};

const SYSTEM_PROMPT: &str = "You are an expert prompt engineer helping a user build a \
structured prompt for a generative AI model. Reply with JSON only.";

/// Keywords asked for per brainstorming theme.
const KEYWORD_COUNT: usize = 10;

// ---------------------------------------------------------------------------
// Wire replies
// ---------------------------------------------------------------------------

/// Skeleton prompt extracted from an idea.
#[derive(Debug, Deserialize, JsonSchema)]
struct ExpandReply {
    /// The most fitting role for the AI.
    #[serde(default)]
    role: Option<String>,
    /// The goal the prompt should achieve.
    #[serde(default)]
    purpose: Option<String>,
    /// Constraints the output should respect.
    #[serde(default)]
    constraints: Option<String>,
}

/// The single best next addition to a prompt, or an empty string.
#[derive(Debug, Deserialize, JsonSchema)]
struct NextAdditionReply {
    /// Text to append (may span several lines), or an empty string.
    #[serde(default)]
    suggestion: String,
}

/// Associations around a brainstorming theme.
#[derive(Debug, Deserialize, JsonSchema)]
struct KeywordsReply {
    /// Ten related concepts, keywords or unexpected associations.
    keywords: Vec<String>,
}

/// Short refinements for a prompt.
#[derive(Debug, Deserialize, JsonSchema)]
struct RefineReply {
    /// Five short, concrete additions.
    suggestions: Vec<String>,
}

// ---------------------------------------------------------------------------
// Schema helpers
// ---------------------------------------------------------------------------

/// Set `additionalProperties: false` on every object schema, as strict
/// structured output requires.
fn add_additional_properties_false(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            if map.get("type").and_then(|t| t.as_str()) == Some("object") {
                map.insert(
                    "additionalProperties".to_string(),
                    serde_json::Value::Bool(false),
                );
            }
            for child in map.values_mut() {
                add_additional_properties_false(child);
            }
        }
        serde_json::Value::Array(items) => {
            for child in items {
                add_additional_properties_false(child);
            }
        }
        _ => {}
    }
}

fn output_config_for<T: JsonSchema>(name: &str) -> OutputConfig {
    let schema = schemars::schema_for!(T);
    let mut value = serde_json::to_value(schema).unwrap_or_default();
    add_additional_properties_false(&mut value);
    OutputConfig::json_schema(name, value)
}

/// Drop a surrounding Markdown code fence, if the model added one.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Reject a list that is empty or holds only blank entries; trims and drops
/// blanks otherwise.
fn non_empty_list(name: &str, items: Vec<String>) -> Result<Vec<String>, AssistError> {
    let cleaned: Vec<String> = items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if cleaned.is_empty() {
        return Err(AssistError::Malformed(format!("`{name}` is empty")));
    }
    Ok(cleaned)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

// ---------------------------------------------------------------------------
// LlmAssistGateway
// ---------------------------------------------------------------------------

/// Assist gateway backed by an LLM provider.
pub struct LlmAssistGateway {
    provider: BoxLlmProvider,
    config: AssistConfig,
}

impl LlmAssistGateway {
    pub fn new(provider: BoxLlmProvider, config: AssistConfig) -> Self {
        Self { provider, config }
    }

    /// Send one structured-output request and parse the reply as `T`.
    async fn ask<T>(&self, schema_name: &str, user_message: String) -> Result<T, AssistError>
    where
        T: DeserializeOwned + JsonSchema,
    {
        let request = CompletionRequest {
            model: self.config.model.clone(),
            messages: vec![Message::user(user_message)],
            system: Some(SYSTEM_PROMPT.to_string()),
            max_tokens: self.config.max_tokens,
            temperature: Some(self.config.temperature),
            output_config: Some(output_config_for::<T>(schema_name)),
        };

        let response = self.provider.complete(&request).await.map_err(|e| {
            tracing::warn!(provider = self.provider.name(), schema = schema_name, error = %e, "assist call failed");
            AssistError::Unavailable(e.to_string())
        })?;

        serde_json::from_str::<T>(strip_code_fence(&response.content)).map_err(|e| {
            tracing::warn!(schema = schema_name, error = %e, "assist reply did not match schema");
            AssistError::Malformed(format!("failed to parse {schema_name}: {e}"))
        })
    }

    /// Brainstorm short keywords around a central theme.
    ///
    /// Used to seed a workspace idea; the engine never calls this.
    pub async fn idea_keywords(&self, theme: &str) -> Result<Vec<String>, AssistError> {
        let message = format!(
            "You are a creative brainstorming assistant. For the central theme \"{theme}\", \
             generate {KEYWORD_COUNT} related concepts, keywords or unexpected associations, \
             each a single word or a short phrase."
        );

        let reply: KeywordsReply = self.ask("IdeaKeywords", message).await?;
        let mut keywords = non_empty_list("keywords", reply.keywords)?;
        keywords.truncate(KEYWORD_COUNT);
        Ok(keywords)
    }
}

impl AssistGateway for LlmAssistGateway {
    async fn expand_idea(&self, idea: &str) -> Result<PartialPromptElements, AssistError> {
        let message = format!(
            "The user's idea: \"{idea}\"\n\n\
             Analyze this idea and draft the skeleton of a prompt for a generative AI. \
             Extract the most fitting role for the AI, the purpose the prompt should \
             achieve, and any constraints the output needs."
        );

        let reply: ExpandReply = self.ask("ExpandedIdea", message).await?;
        Ok(PartialPromptElements {
            role: non_blank(reply.role),
            purpose: non_blank(reply.purpose),
            constraints: non_blank(reply.constraints),
            details: None,
        })
    }

    async fn suggest_elements(&self, idea: &str) -> Result<SuggestionSet, AssistError> {
        let message = format!(
            "The user's idea: \"{idea}\"\n\n\
             Propose elements for a generative AI prompt built on this idea. Give three \
             concrete and varied options for each of:\n\
             - roles: the expert or character the AI should act as\n\
             - purposes: the concrete goal the prompt should achieve\n\
             - constraints: conditions the output must or must not satisfy"
        );

        let reply: SuggestionSet = self.ask("PromptSuggestions", message).await?;
        let limit = SuggestionSet::ITEMS_PER_LIST;
        let truncate = |mut items: Vec<String>| {
            items.truncate(limit);
            items
        };
        Ok(SuggestionSet {
            roles: truncate(non_empty_list("roles", reply.roles)?),
            purposes: truncate(non_empty_list("purposes", reply.purposes)?),
            constraints: truncate(non_empty_list("constraints", reply.constraints)?),
        })
    }

    async fn next_addition(&self, composed: &str) -> Result<String, AssistError> {
        let message = format!(
            "Here is a prompt that is still being written:\n```\n{composed}\n```\n\n\
             Understand its context, then propose the single most effective and concrete \
             item to add next. It may span several lines. Return text that can be appended \
             as-is, for example as a bullet like \"- concrete suggestion\", with no \
             explanation or preamble. If nothing fits, return an empty string."
        );

        let reply: NextAdditionReply = self.ask("NextAddition", message).await?;
        Ok(reply.suggestion.trim().to_string())
    }

    async fn refine(&self, composed: &str) -> Result<Vec<String>, AssistError> {
        let message = format!(
            "Analyze the prompt below and propose improvements that would make its results \
             more specific, distinctive and effective. Each improvement must be short, \
             concrete text that can be appended to the prompt directly, with no explanation. \
             Propose five.\n\n## Prompt\n{composed}"
        );

        let reply: RefineReply = self.ask("Refinements", message).await?;
        non_empty_list("suggestions", reply.suggestions)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use artisan_core::llm::provider::LlmProvider;
    use artisan_types::llm::{CompletionResponse, LlmError, StopReason, Usage};

    use super::*;

    // -----------------------------------------------------------------------
    // MockLlmProvider
    // -----------------------------------------------------------------------

    /// Returns a canned reply and records every request it sees.
    struct MockLlmProvider {
        reply: Result<String, ()>,
        requests: Arc<Mutex<Vec<CompletionRequest>>>,
    }

    impl LlmProvider for MockLlmProvider {
        fn name(&self) -> &str {
            "mock"
        }

        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            self.requests.lock().unwrap().push(request.clone());
            match &self.reply {
                Ok(content) => Ok(CompletionResponse {
                    id: "msg_mock".to_string(),
                    content: content.clone(),
                    model: "mock-model".to_string(),
                    stop_reason: StopReason::EndTurn,
                    usage: Usage::default(),
                }),
                Err(()) => Err(LlmError::Overloaded("try later".to_string())),
            }
        }
    }

    fn gateway(reply: &str) -> (LlmAssistGateway, Arc<Mutex<Vec<CompletionRequest>>>) {
        gateway_with(Ok(reply.to_string()))
    }

    fn gateway_with(
        reply: Result<String, ()>,
    ) -> (LlmAssistGateway, Arc<Mutex<Vec<CompletionRequest>>>) {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let provider = MockLlmProvider {
            reply,
            requests: requests.clone(),
        };
        let config = AssistConfig {
            model: "mock-model".to_string(),
            ..AssistConfig::default()
        };
        (
            LlmAssistGateway::new(BoxLlmProvider::new(provider), config),
            requests,
        )
    }

    #[tokio::test]
    async fn test_expand_idea_maps_present_fields() {
        let (gw, requests) = gateway(r#"{"role": "Travel writer", "purpose": "Plan a trip"}"#);

        let partial = gw.expand_idea("weekend in Kyoto").await.unwrap();
        assert_eq!(partial.role.as_deref(), Some("Travel writer"));
        assert_eq!(partial.purpose.as_deref(), Some("Plan a trip"));
        assert!(partial.constraints.is_none());
        assert!(partial.details.is_none());

        let requests = requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].model, "mock-model");
        assert!(requests[0].messages[0].content.contains("weekend in Kyoto"));
        let config = requests[0].output_config.as_ref().unwrap();
        assert_eq!(config.format.json_schema.name, "ExpandedIdea");
    }

    #[tokio::test]
    async fn test_expand_idea_treats_blank_field_as_absent() {
        let (gw, _) = gateway(r#"{"role": "  ", "purpose": "p", "constraints": "c"}"#);
        let partial = gw.expand_idea("x").await.unwrap();
        assert!(partial.role.is_none());
        assert_eq!(partial.constraints.as_deref(), Some("c"));
    }

    #[tokio::test]
    async fn test_suggest_elements_truncates_to_three() {
        let (gw, _) = gateway(
            r#"{"roles": ["a", "b", "c", "d"], "purposes": ["p"], "constraints": ["x", "y"]}"#,
        );
        let set = gw.suggest_elements("idea").await.unwrap();
        assert_eq!(set.roles, vec!["a", "b", "c"]);
        assert_eq!(set.purposes, vec!["p"]);
        assert_eq!(set.constraints, vec!["x", "y"]);
    }

    #[tokio::test]
    async fn test_suggest_elements_missing_list_is_malformed() {
        let (gw, _) = gateway(r#"{"roles": ["a"], "purposes": ["p"]}"#);
        let err = gw.suggest_elements("idea").await.unwrap_err();
        assert!(matches!(err, AssistError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_suggest_elements_empty_list_is_malformed() {
        let (gw, _) = gateway(r#"{"roles": [], "purposes": ["p"], "constraints": ["c"]}"#);
        let err = gw.suggest_elements("idea").await.unwrap_err();
        assert!(matches!(err, AssistError::Malformed(m) if m.contains("roles")));
    }

    #[tokio::test]
    async fn test_next_addition_missing_field_is_empty() {
        let (gw, _) = gateway("{}");
        assert_eq!(gw.next_addition("Role:\nwriter").await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_next_addition_strips_code_fence() {
        let (gw, requests) = gateway("```json\n{\"suggestion\": \"- keep it under 200 words\\n\"}\n```");
        let text = gw.next_addition("Role:\nwriter").await.unwrap();
        assert_eq!(text, "- keep it under 200 words");
        assert!(
            requests.lock().unwrap()[0].messages[0]
                .content
                .contains("Role:\nwriter")
        );
    }

    #[tokio::test]
    async fn test_refine_returns_list() {
        let (gw, _) = gateway(r#"{"suggestions": ["Add an example", "Name the audience"]}"#);
        let items = gw.refine("Purpose:\nexplain").await.unwrap();
        assert_eq!(items, vec!["Add an example", "Name the audience"]);
    }

    #[tokio::test]
    async fn test_refine_empty_list_is_malformed() {
        let (gw, _) = gateway(r#"{"suggestions": ["  "]}"#);
        assert!(matches!(
            gw.refine("p").await.unwrap_err(),
            AssistError::Malformed(_)
        ));
    }

    #[tokio::test]
    async fn test_idea_keywords_cleans_and_caps_list() {
        let keywords: Vec<String> = (1..=12).map(|i| format!(" word {i} ")).collect();
        let reply = serde_json::json!({ "keywords": keywords }).to_string();
        let (gw, requests) = gateway(&reply);

        let items = gw.idea_keywords("night market").await.unwrap();
        assert_eq!(items.len(), 10);
        assert_eq!(items[0], "word 1");
        assert_eq!(items[9], "word 10");

        let requests = requests.lock().unwrap();
        assert!(requests[0].messages[0].content.contains("night market"));
        let config = requests[0].output_config.as_ref().unwrap();
        assert_eq!(config.format.json_schema.name, "IdeaKeywords");
    }

    #[tokio::test]
    async fn test_idea_keywords_empty_list_is_malformed() {
        let (gw, _) = gateway(r#"{"keywords": ["", "  "]}"#);
        assert!(matches!(
            gw.idea_keywords("theme").await.unwrap_err(),
            AssistError::Malformed(m) if m.contains("keywords")
        ));
    }

    #[tokio::test]
    async fn test_idea_keywords_missing_list_is_malformed() {
        let (gw, _) = gateway("{}");
        assert!(matches!(
            gw.idea_keywords("theme").await.unwrap_err(),
            AssistError::Malformed(m) if m.contains("IdeaKeywords")
        ));
    }

    #[tokio::test]
    async fn test_non_json_reply_is_malformed() {
        let (gw, _) = gateway("not valid json at all");
        match gw.refine("p").await {
            Err(AssistError::Malformed(msg)) => assert!(msg.contains("Refinements")),
            other => panic!("expected Malformed, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_provider_failure_is_unavailable() {
        let (gw, _) = gateway_with(Err(()));
        let err = gw.expand_idea("idea").await.unwrap_err();
        assert!(matches!(err, AssistError::Unavailable(m) if m.contains("overloaded")));
    }

    #[test]
    fn test_schema_has_additional_properties_false() {
        let config = output_config_for::<RefineReply>("Refinements");
        assert_eq!(config.format.json_schema.strict, Some(true));
        assert_eq!(
            config.format.json_schema.schema["additionalProperties"],
            serde_json::Value::Bool(false)
        );
        assert!(
            config.format.json_schema.schema["properties"]
                .get("suggestions")
                .is_some()
        );
    }

    #[test]
    fn test_strip_code_fence_variants() {
        assert_eq!(strip_code_fence("  {\"a\":1} "), "{\"a\":1}");
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n{\"a\":1}\n```"), "{\"a\":1}");
    }
}
