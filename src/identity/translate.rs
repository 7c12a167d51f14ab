//! English → Russian translation variants for artist and song names.
//!
//! Uses the keyless `translate_a/single` endpoint. Its answer is a nested
//! array: `data[0][0][0]` is the whole-text translation, `data[1]` holds one
//! entry per dictionary hit with alternative renderings in `entry[2][j][0]`.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::HashSet;

use crate::core::config;
use crate::core::error::{AppError, AppResult};

static CAMEL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([a-z])([A-Z])").expect("camel regex is valid"));

static ACRONYM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([A-Z])([A-Z][a-z])").expect("acronym regex is valid"));

static GLUED_I_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([a-z])I([A-Z])").expect("glued I regex is valid"));

/// Translation collaborator.
///
/// Never fails: transport and parse problems yield an empty list, which
/// callers read as "no information".
#[async_trait]
pub trait Translator: Send + Sync {
    /// Ordered, de-duplicated candidate translations, primary first.
    async fn variants(&self, text: &str) -> Vec<String>;
}

/// First translation variant, if the service produced any.
pub async fn first_variant<T: Translator + ?Sized>(translator: &T, text: &str) -> Option<String> {
    translator.variants(text).await.into_iter().next()
}

/// Splits glued names so they translate word by word:
/// `KorolIShut` → `Korol I Shut`, `XMLHttp` → `XML Http`.
pub fn prepare_text_for_translation(text: &str) -> String {
    let text = CAMEL_RE.replace_all(text, "$1 $2");
    let text = ACRONYM_RE.replace_all(&text, "$1 $2");
    GLUED_I_RE.replace_all(&text, "$1 I $2").into_owned()
}

/// Pulls the primary translation and every per-word alternative out of the
/// service's nested-array answer, keeping first-seen order.
pub fn extract_variants(data: &Value) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut variants = Vec::new();
    let mut push = |candidate: &str| {
        if !candidate.is_empty() && seen.insert(candidate.to_string()) {
            variants.push(candidate.to_string());
        }
    };

    if let Some(primary) = data.get(0).and_then(|v| v.get(0)).and_then(|v| v.get(0)).and_then(Value::as_str) {
        push(primary);
    }

    if let Some(entries) = data.get(1).and_then(Value::as_array) {
        for entry in entries {
            let (Some(word), Some(alternatives)) =
                (entry.get(0).and_then(Value::as_str), entry.get(2).and_then(Value::as_array))
            else {
                continue;
            };
            push(word);
            for alternative in alternatives {
                if let Some(text) = alternative.get(0).and_then(Value::as_str) {
                    push(text);
                }
            }
        }
    }

    variants
}

/// Google Translate (`client=gtx`) client, en → ru.
pub struct GoogleTranslator {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleTranslator {
    pub fn new(base_url: impl Into<String>) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config::network::timeout())
            .user_agent("akkordy-bot/1.0")
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config() -> AppResult<Self> {
        Self::new(config::TRANSLATE_BASE_URL.as_str())
    }

    async fn fetch(&self, text: &str) -> AppResult<Value> {
        let url = format!(
            "{}/translate_a/single?client=gtx&sl=en&tl=ru&dt=t&dt=at&dt=ss&dt=bd&q={}",
            self.base_url,
            urlencoding::encode(text)
        );

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(AppError::HttpStatus(response.status()));
        }
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn variants(&self, text: &str) -> Vec<String> {
        let prepared = prepare_text_for_translation(text);
        match self.fetch(&prepared).await {
            Ok(data) => {
                let variants = extract_variants(&data);
                log::info!("Translate: '{}' → {:?}", prepared, variants);
                variants
            }
            Err(e) => {
                log::warn!("Translate: failed for '{}': {}", prepared, e);
                Vec::new()
            }
        }
    }
}
