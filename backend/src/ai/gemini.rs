//! Gemini completion provider.
//!
//! Thin reqwest client for the generateContent endpoint. The provider
//! trait is the seam the assistant talks through, so tests can swap in
//! a double instead of hitting the network.

use async_trait::async_trait;
use log::info;
use serde::{Deserialize, Serialize};

use crate::ai::error::AiError;
use shared::{ChatMessage, MessageRole};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const MODEL: &str = "gemini-2.5-flash";
const TEMPERATURE: f64 = 0.7;
const TOP_P: f64 = 0.95;

/// Fixed persona instruction sent with every request.
const SYSTEM_INSTRUCTION: &str = "\
Você é MestreIA, um assistente financeiro especialista da plataforma ContaMestre.
Sua missão é ajudar usuários a organizar suas finanças, economizar, planejar impostos e sugerir investimentos.
Seja acessível, confiante e educativo. Use um tom amigável e profissional.
Você pode analisar dados financeiros, simular cenários tributários (IRPF, Simples Nacional, etc.), prever fluxo de caixa e gerar insights.
Sempre que fornecer uma sugestão de investimento, inclua um aviso sobre riscos e a necessidade de consultar um especialista.
Quando fizer simulações tributárias, mencione que são estimativas e que um contador deve ser consultado para decisões finais.
Baseie suas respostas nos recursos do ContaMestre: DRE, CMV, finanças pessoais, calendário de pagamentos, etc.
Responda em português do Brasil.";

/// Seam between the assistant and whatever produces completions
#[async_trait]
pub trait CompletionProvider {
    /// Produce the model's reply for a prompt given prior turns
    async fn complete(&self, history: &[ChatMessage], prompt: &str) -> Result<String, AiError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    top_p: f64,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

/// HTTP client for the Gemini generateContent API
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
}

impl GeminiClient {
    /// Create a client with an explicit API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Create a client from the GEMINI_API_KEY environment variable
    pub fn from_env() -> Result<Self, AiError> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| AiError::MissingApiKey)?;
        Ok(Self::new(api_key))
    }

    fn role_name(role: MessageRole) -> &'static str {
        match role {
            MessageRole::User => "user",
            MessageRole::Model => "model",
        }
    }

    fn build_request(history: &[ChatMessage], prompt: &str) -> GenerateContentRequest {
        let mut contents: Vec<Content> = history
            .iter()
            .map(|message| Content {
                role: Some(Self::role_name(message.role).to_string()),
                parts: vec![Part { text: message.text.clone() }],
            })
            .collect();
        contents.push(Content {
            role: Some("user".to_string()),
            parts: vec![Part { text: prompt.to_string() }],
        });

        GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part { text: SYSTEM_INSTRUCTION.to_string() }],
            },
            contents,
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                top_p: TOP_P,
            },
        }
    }
}

#[async_trait]
impl CompletionProvider for GeminiClient {
    async fn complete(&self, history: &[ChatMessage], prompt: &str) -> Result<String, AiError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            BASE_URL, MODEL, self.api_key
        );
        let request = Self::build_request(history, prompt);

        info!(
            "🤖 AI: Calling {} with {} content turns",
            MODEL,
            request.contents.len()
        );

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<GenerateContentResponse>()
            .await?;

        let text = response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .filter(|text| !text.is_empty())
            .ok_or(AiError::EmptyResponse)?;

        Ok(text)
    }
}
