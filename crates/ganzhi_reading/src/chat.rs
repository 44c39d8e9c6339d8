//! Narrator backed by an OpenAI-compatible chat-completions endpoint.

use std::fmt::Write;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::NarrativeConfig;
use crate::error::NarrativeError;
use crate::narrative::{NarrativeContext, Narrator};
use crate::request::{Focus, Language};

const SYSTEM_PROMPT: &str =
    "You are a professional Bazi analyst who explains charts in plain, practical language.";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatContent,
}

#[derive(Debug, Deserialize)]
struct ChatContent {
    #[serde(default)]
    content: Option<String>,
}

/// Calls a remote text-generation service with a structured prompt.
pub struct ChatNarrator {
    client: reqwest::blocking::Client,
    endpoint: String,
    model: String,
    api_key: String,
    max_tokens: u32,
    temperature: f32,
}

impl ChatNarrator {
    /// Build from configuration. Fails without an API key.
    pub fn from_config(config: &NarrativeConfig) -> Result<Self, NarrativeError> {
        let api_key = config.api_key().ok_or(NarrativeError::MissingApiKey)?;
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("ganzhi/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }
}

impl Narrator for ChatNarrator {
    fn name(&self) -> &'static str {
        "chat"
    }

    fn narrate(&self, ctx: &NarrativeContext<'_>) -> Result<String, NarrativeError> {
        let prompt = build_prompt(ctx);
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };
        debug!(endpoint = %self.endpoint, model = %self.model, "requesting narrative");
        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(NarrativeError::Status {
                code: status.as_u16(),
                body,
            });
        }
        let text = resp.text()?;
        extract_content(&text)
    }
}

/// Pull the first completion out of a chat-completions response body.
fn extract_content(body: &str) -> Result<String, NarrativeError> {
    let parsed: ChatResponse =
        serde_json::from_str(body).map_err(|e| NarrativeError::Malformed(e.to_string()))?;
    let content = parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .map(|c| c.trim().to_string())
        .unwrap_or_default();
    if content.is_empty() {
        Err(NarrativeError::EmptyResponse)
    } else {
        Ok(content)
    }
}

/// Instructions, section headings and chart facts for the model.
pub fn build_prompt(ctx: &NarrativeContext<'_>) -> String {
    let a = ctx.analysis;
    let b = &a.element_analysis;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Give an explanatory Bazi analysis, not a prediction of events. \
         Write five sections of 2-5 sentences each, in {}, with these headings:",
        language_name(ctx.language)
    );
    for (i, h) in headings(ctx.language).iter().enumerate() {
        let _ = writeln!(out, "{}) {h}", i + 1);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Guidelines:");
    let _ = writeln!(out, "- {}", focus_hint(ctx.focus));
    let _ = writeln!(
        out,
        "- Center the day master and judge its strength from the five-element distribution."
    );
    let _ = writeln!(
        out,
        "- Ground every conclusion in the chart: stems, branches, elements, ten gods."
    );
    let _ = writeln!(
        out,
        "- Keep advice directional and the tone calm; no fatalism, no guarantees."
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Four pillars:");
    for (pos, p) in ctx.chart.pillars() {
        let hidden: Vec<&str> = p.hidden_stems.iter().map(|s| s.name()).collect();
        let _ = writeln!(
            out,
            "- {}: {} ({}), hidden {}, ten god {}",
            pos.name(),
            p.pillar(),
            p.element,
            hidden.join("/"),
            p.ten_god
        );
    }
    if ctx.chart.hour.is_none() {
        let _ = writeln!(out, "- hour: not provided, information is limited");
    }
    let _ = writeln!(out);
    let counts: Vec<String> = b
        .element_count
        .iter()
        .map(|(e, v)| format!("{e} {v:.1}"))
        .collect();
    let _ = writeln!(out, "Element count: {}", counts.join(", "));
    let _ = writeln!(
        out,
        "Dominant: {}; balance: {}; day master {} ({}) is {}",
        b.dominant_element,
        b.element_balance,
        a.day_master,
        a.day_element,
        a.day_master_strength.name()
    );
    let _ = write!(
        out,
        "Use god: {}; avoid god: {}",
        a.use_god.map_or("none", |e| e.name()),
        a.avoid_god.map_or("none", |e| e.name())
    );
    out
}

fn language_name(l: Language) -> &'static str {
    match l {
        Language::Zh => "Simplified Chinese",
        Language::En => "English",
        Language::Mi => "te reo Māori",
    }
}

fn headings(l: Language) -> [&'static str; 5] {
    match l {
        Language::Zh => [
            "总体结构判断",
            "五行与日主关系说明",
            "优势倾向",
            "潜在压力或挑战",
            "可执行的调整建议",
        ],
        Language::En => [
            "Overall structural assessment",
            "Relationship between the Day Master and the Five Elements",
            "Strengths and supportive tendencies",
            "Potential pressures or challenges",
            "Practical adjustment suggestions",
        ],
        Language::Mi => [
            "Te arotake whānui o te hanganga",
            "Te hononga o te Rangatira Rā ki ngā Rima o ngā mea",
            "Ngā kaha me ngā ia tautoko",
            "Ngā pēhitanga, ngā wero pea",
            "Ngā tohutohu whakatikatika ka taea te mahi",
        ],
    }
}

fn focus_hint(focus: Focus) -> &'static str {
    match focus {
        Focus::Overall => "Cover career, wealth and relationships evenly without forecasting specific events.",
        Focus::Career => "Keep the overall structure but lean towards career, professional growth and ways of collaborating.",
        Focus::Wealth => "Keep the overall structure but lean towards attitudes to money, risk tolerance and financial habits.",
        Focus::Love => "Keep the overall structure but lean towards emotional expression and patterns in close relationships.",
        Focus::Health => "Keep the overall structure but lean towards energy, recovery, stress and long-term health habits.",
        Focus::Family => "Keep the overall structure but lean towards family atmosphere, upbringing and roles at home.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::narrative::{FallbackNarrator, TemplateNarrator};
    use ganzhi_base::{analyze_chart, compute_chart};
    use ganzhi_time::CivilDate;
    use serde_json::{Value, json};
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const COMPLETIONS: &str = "/v1/chat/completions";

    /// Narrate the 1990-01-01 chart against `endpoint` on a blocking
    /// thread; also returns the template text for the same context.
    async fn narrate_at(
        endpoint: String,
        with_fallback: bool,
    ) -> (Result<String, NarrativeError>, String) {
        tokio::task::spawn_blocking(move || {
            let config = NarrativeConfig {
                endpoint,
                model: "test-model".to_string(),
                api_key: Some("sk-test".to_string()),
                timeout_secs: 5,
                max_tokens: 123,
                temperature: 0.5,
                ..NarrativeConfig::default()
            };
            let chat = ChatNarrator::from_config(&config).unwrap();
            let chart = compute_chart(CivilDate::new(1990, 1, 1).unwrap(), None).unwrap();
            let analysis = analyze_chart(&chart);
            let ctx = NarrativeContext {
                chart: &chart,
                analysis: &analysis,
                focus: Focus::Career,
                language: Language::En,
            };
            let template = TemplateNarrator.narrate(&ctx).unwrap();
            let result = if with_fallback {
                FallbackNarrator::new(Box::new(chat)).narrate(&ctx)
            } else {
                chat.narrate(&ctx)
            };
            (result, template)
        })
        .await
        .unwrap()
    }

    async fn failing_server() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(COMPLETIONS))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream overloaded"))
            .mount(&server)
            .await;
        server
    }

    #[test]
    fn prompt_carries_chart_facts() {
        let chart = compute_chart(CivilDate::new(1990, 1, 1).unwrap(), None).unwrap();
        let analysis = analyze_chart(&chart);
        let prompt = build_prompt(&NarrativeContext {
            chart: &chart,
            analysis: &analysis,
            focus: Focus::Wealth,
            language: Language::Zh,
        });
        assert!(prompt.contains("Simplified Chinese"));
        assert!(prompt.contains("1) 总体结构判断"));
        assert!(prompt.contains("attitudes to money"));
        assert!(prompt.contains("- year: Geng-Wu (Metal), hidden Ding/Ji, ten god Indirect Wealth"));
        assert!(prompt.contains("- day: Bing-Yin (Fire), hidden Jia/Bing/Wu, ten god Day Master"));
        assert!(prompt.contains("hour: not provided"));
        assert!(prompt.contains("Element count: Wood 0.3, Fire 1.6, Earth 1.9, Metal 1.3, Water 0.3"));
        assert!(prompt.contains("Use god: Water; avoid god: Wood"));
    }

    #[test]
    fn content_extraction() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"  text \n"}}]}"#;
        assert_eq!(extract_content(body).unwrap(), "text");
        assert_eq!(
            extract_content(r#"{"choices":[]}"#),
            Err(NarrativeError::EmptyResponse)
        );
        assert_eq!(
            extract_content(r#"{"choices":[{"message":{"content":null}}]}"#),
            Err(NarrativeError::EmptyResponse)
        );
        assert!(matches!(
            extract_content("<html>"),
            Err(NarrativeError::Malformed(_))
        ));
    }

    #[test]
    fn missing_key_rejected() {
        let config = NarrativeConfig {
            api_key: Some("   ".to_string()),
            ..NarrativeConfig::default()
        };
        // A blank configured key does not fall through to the environment.
        assert!(matches!(
            ChatNarrator::from_config(&config),
            Err(NarrativeError::MissingApiKey)
        ));
    }

    #[test]
    fn unreachable_endpoint_is_http_error() {
        let config = NarrativeConfig {
            endpoint: "http://127.0.0.1:9/v1/chat/completions".to_string(),
            api_key: Some("sk-test".to_string()),
            timeout_secs: 2,
            ..NarrativeConfig::default()
        };
        let narrator = ChatNarrator::from_config(&config).unwrap();
        let chart = compute_chart(CivilDate::new(1990, 1, 1).unwrap(), None).unwrap();
        let analysis = analyze_chart(&chart);
        let result = narrator.narrate(&NarrativeContext {
            chart: &chart,
            analysis: &analysis,
            focus: Focus::Overall,
            language: Language::En,
        });
        assert!(matches!(result, Err(NarrativeError::Http(_))));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn completion_request_and_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(COMPLETIONS))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({
                "model": "test-model",
                "max_tokens": 123,
                "temperature": 0.5,
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": " Earth carries this chart. "}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (result, _) = narrate_at(format!("{}{COMPLETIONS}", server.uri()), false).await;
        assert_eq!(result.unwrap(), "Earth carries this chart.");

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], SYSTEM_PROMPT);
        assert_eq!(body["messages"][1]["role"], "user");
        let prompt = body["messages"][1]["content"].as_str().unwrap();
        assert!(prompt.contains("in English"));
        assert!(prompt.contains("Use god: Water; avoid god: Wood"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn server_error_maps_to_status() {
        let server = failing_server().await;
        let (result, _) = narrate_at(format!("{}{COMPLETIONS}", server.uri()), false).await;
        assert_eq!(
            result,
            Err(NarrativeError::Status {
                code: 500,
                body: "upstream overloaded".to_string(),
            })
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn server_error_falls_back_to_template() {
        let server = failing_server().await;
        let (result, template) = narrate_at(format!("{}{COMPLETIONS}", server.uri()), true).await;
        assert_eq!(result.unwrap(), template);
        assert!(template.contains("【Overall structure】"));
    }
}
