//! Performance tips for a chord sheet, written by an LLM.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::config;
use crate::core::error::{AppError, AppResult};

/// Tip-generation collaborator. Output is Telegram HTML (`<b>`, `<i>`).
#[async_trait]
pub trait TipGenerator: Send + Sync {
    async fn generate_tips(&self, sheet: &str) -> AppResult<String>;
}

/// Tips, or the apology line users see when the service failed.
pub async fn tips_or_apology(generator: &dyn TipGenerator, sheet: &str) -> String {
    match generator.generate_tips(sheet).await {
        Ok(tips) => tips,
        Err(e) => {
            log::warn!("Chords: tip generation failed: {}", e);
            apology(&e)
        }
    }
}

pub fn apology(error: &AppError) -> String {
    format!("Не удалось проанализировать аккорды: {}", error)
}

/// The analysis prompt with the sheet appended.
pub fn build_prompt(sheet: &str) -> String {
    format!(
        r#"Проанализируй следующий текст песни с аккордами и верни информацию в следующем формате:

1. Сначала выведи "<b>Уникальные аккорды:</b>" и через запятую все уникальные аккорды из песни в порядке их появления в тексте.

2. Затем, основываясь на анализе текста песни, аккордов, их последовательностей и общего настроения композиции, дай персонализированные советы по исполнению именно этой песни в таком формате не больше 250 символов:

<b>Советы по исполнению трека на гитаре:</b>

<b>Стиль исполнения:</b>
<i>Бой/Перебор:</i> Опиши конкретный паттерн боя или перебора, который лучше всего подходит для этой песни, учитывая её ритм и настроение.
<i>Техника:</i> Предложи специфические техники исполнения, которые подчеркнут характер именно этой композиции.

<b>Ритмический рисунок:</b>
<i>Темп:</i> Укажи примерный темп и его особенности для этой песни.
<i>Акценты:</i> Опиши, на каких долях или аккордах стоит делать акценты в этой конкретной песне.

<b>Использование устройств:</b>
<i>Каподастр:</i> Если нужен каподастр, укажи конкретный лад и почему это упростит игру именно этой песни.
<i>Звучание:</i> Предложи настройки звука, которые подойдут для этой композиции.

<b>Практические советы:</b>
<i>Сложные места:</i> Укажи конкретные сложные места в песне и как их лучше отработать.
<i>Последовательность разучивания:</i> Предложи порядок разучивания частей именно этой песни.

Текст песни для анализа:
{}"#,
        sheet
    )
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatReply>,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

/// Mistral chat-completions client.
pub struct MistralTips {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl MistralTips {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, model: impl Into<String>) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config::network::tips_timeout())
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    /// Fails with `AppError::Config` when `MISTRAL_API_KEY` is not set.
    pub fn from_config() -> AppResult<Self> {
        let api_key = config::MISTRAL_API_KEY
            .clone()
            .ok_or_else(|| AppError::Config("MISTRAL_API_KEY is not set".to_string()))?;
        Self::new(config::MISTRAL_BASE_URL.as_str(), api_key, config::MISTRAL_MODEL.as_str())
    }
}

#[async_trait]
impl TipGenerator for MistralTips {
    async fn generate_tips(&self, sheet: &str) -> AppResult<String> {
        let prompt = build_prompt(sheet);
        log::info!("Chords: requesting tips from {} ({} chars of prompt)", self.model, prompt.len());

        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &prompt,
            }],
        };

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(AppError::HttpStatus(response.status()));
        }

        let body: ChatResponse = response.json().await?;
        let choice = body
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Parse("empty choices in chat response".to_string()))?;
        choice
            .message
            .and_then(|message| message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| AppError::Parse("no message content in first choice".to_string()))
    }
}

/// Used when no API key is configured: every request ends in the apology.
pub struct DisabledTips;

#[async_trait]
impl TipGenerator for DisabledTips {
    async fn generate_tips(&self, _sheet: &str) -> AppResult<String> {
        Err(AppError::Config("MISTRAL_API_KEY is not set".to_string()))
    }
}
