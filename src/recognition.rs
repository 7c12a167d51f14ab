//! Audio recognition collaborator and the AudD client.

use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;

use crate::core::config;
use crate::core::error::{AppError, AppResult};
use crate::core::types::RecognizedTrack;

/// Turns an audio clip into a track. `Ok(None)` means "heard it, no idea".
#[async_trait]
pub trait Recognizer: Send + Sync {
    async fn recognize(&self, clip: &Path) -> AppResult<Option<RecognizedTrack>>;
}

#[derive(Debug, Deserialize)]
struct AuddResponse {
    status: String,
    result: Option<AuddResult>,
    error: Option<AuddError>,
}

#[derive(Debug, Deserialize)]
struct AuddError {
    error_code: Option<i64>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AuddResult {
    #[serde(default)]
    artist: String,
    #[serde(default)]
    title: String,
    album: Option<String>,
    apple_music: Option<AppleMusicInfo>,
    spotify: Option<SpotifyInfo>,
}

#[derive(Debug, Deserialize)]
struct AppleMusicInfo {
    isrc: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SpotifyInfo {
    external_ids: Option<SpotifyExternalIds>,
}

#[derive(Debug, Deserialize)]
struct SpotifyExternalIds {
    isrc: Option<String>,
}

/// Parses an AudD answer.
///
/// `status: error` is an error; a success without a result, or with a blank
/// artist or title, is a miss.
pub fn parse_audd_response(body: &str) -> AppResult<Option<RecognizedTrack>> {
    let response: AuddResponse = serde_json::from_str(body)?;

    if response.status != "success" {
        let (code, message) = response
            .error
            .map(|e| (e.error_code.unwrap_or_default(), e.error_message.unwrap_or_default()))
            .unwrap_or_default();
        return Err(AppError::Parse(format!("AudD error {}: {}", code, message)));
    }

    let Some(result) = response.result else {
        return Ok(None);
    };
    if result.artist.trim().is_empty() || result.title.trim().is_empty() {
        return Ok(None);
    }

    let isrc = result
        .apple_music
        .and_then(|apple| apple.isrc)
        .or_else(|| result.spotify.and_then(|s| s.external_ids).and_then(|ids| ids.isrc))
        .filter(|isrc| !isrc.trim().is_empty());

    Ok(Some(RecognizedTrack {
        title: result.title.trim().to_string(),
        artist: result.artist.trim().to_string(),
        isrc,
        album: result.album,
    }))
}

/// https://audd.io recognition API.
pub struct AuddRecognizer {
    client: reqwest::Client,
    endpoint: String,
    api_token: String,
}

impl AuddRecognizer {
    pub fn new(endpoint: impl Into<String>, api_token: impl Into<String>) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config::network::recognition_timeout())
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_token: api_token.into(),
        })
    }

    /// Fails with `AppError::Config` when `AUDD_API_TOKEN` is not set.
    pub fn from_config() -> AppResult<Self> {
        let token = config::AUDD_API_TOKEN
            .clone()
            .ok_or_else(|| AppError::Config("AUDD_API_TOKEN is not set".to_string()))?;
        Self::new(config::AUDD_BASE_URL.as_str(), token)
    }
}

#[async_trait]
impl Recognizer for AuddRecognizer {
    async fn recognize(&self, clip: &Path) -> AppResult<Option<RecognizedTrack>> {
        let bytes = tokio::fs::read(clip).await?;
        let file_name = clip
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "clip.mp3".to_string());
        log::info!("Recognize: uploading {} ({} bytes)", file_name, bytes.len());

        let form = reqwest::multipart::Form::new()
            .text("api_token", self.api_token.clone())
            .text("return", "apple_music,spotify")
            .part("file", reqwest::multipart::Part::bytes(bytes).file_name(file_name));

        let response = self.client.post(&self.endpoint).multipart(form).send().await?;
        if !response.status().is_success() {
            return Err(AppError::HttpStatus(response.status()));
        }

        let body = response.text().await?;
        let track = parse_audd_response(&body)?;
        match &track {
            Some(track) => log::info!(
                "Recognize: '{} - {}' isrc={}",
                track.artist,
                track.title,
                track.isrc.as_deref().unwrap_or("-")
            ),
            None => log::info!("Recognize: no match"),
        }
        Ok(track)
    }
}

/// Used when no API token is configured: every clip is a miss.
pub struct DisabledRecognizer;

#[async_trait]
impl Recognizer for DisabledRecognizer {
    async fn recognize(&self, clip: &Path) -> AppResult<Option<RecognizedTrack>> {
        log::warn!("Recognize: AUDD_API_TOKEN is not set, skipping {}", clip.display());
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SPLEEN: &str = r#"{
        "status": "success",
        "result": {
            "artist": "Spleen",
            "title": "Orange Man",
            "album": "Granatovy Albom",
            "release_date": "1998-01-01",
            "apple_music": {"isrc": "RUA109800012", "url": "https://music.apple.com/x"},
            "spotify": {"external_ids": {"isrc": "RUA109800099"}}
        }
    }"#;

    #[test]
    fn test_parse_success_prefers_apple_isrc() {
        let track = parse_audd_response(SPLEEN).unwrap().unwrap();
        assert_eq!(
            track,
            RecognizedTrack {
                title: "Orange Man".to_string(),
                artist: "Spleen".to_string(),
                isrc: Some("RUA109800012".to_string()),
                album: Some("Granatovy Albom".to_string()),
            }
        );
    }

    #[test]
    fn test_parse_falls_back_to_spotify_isrc() {
        let body = r#"{"status":"success","result":{"artist":"Kino","title":"Kukushka","spotify":{"external_ids":{"isrc":"RUB420900001"}}}}"#;
        let track = parse_audd_response(body).unwrap().unwrap();
        assert_eq!(track.isrc.as_deref(), Some("RUB420900001"));
        assert_eq!(track.album, None);
    }

    #[test]
    fn test_parse_miss() {
        assert_eq!(parse_audd_response(r#"{"status":"success","result":null}"#).unwrap(), None);
        assert_eq!(
            parse_audd_response(r#"{"status":"success","result":{"artist":" ","title":"x"}}"#).unwrap(),
            None
        );
    }

    #[test]
    fn test_parse_error_status() {
        let body = r#"{"status":"error","error":{"error_code":901,"error_message":"Recognition failed: no api_token"}}"#;
        let err = parse_audd_response(body).unwrap_err();
        assert_eq!(err.to_string(), "Unexpected response: AudD error 901: Recognition failed: no api_token");
        assert!(matches!(parse_audd_response("not json"), Err(AppError::Json(_))));
    }

    #[tokio::test]
    async fn test_recognizer_uploads_clip() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .and(body_string_contains("apple_music,spotify"))
            .and(body_string_contains("token-123"))
            .respond_with(ResponseTemplate::new(200).set_body_string(SPLEEN))
            .mount(&server)
            .await;

        let mut clip = tempfile::NamedTempFile::new().unwrap();
        clip.write_all(b"ID3 fake audio").unwrap();

        let recognizer = AuddRecognizer::new(format!("{}/", server.uri()), "token-123").unwrap();
        let track = recognizer.recognize(clip.path()).await.unwrap().unwrap();
        assert_eq!(track.artist, "Spleen");
    }

    #[tokio::test]
    async fn test_missing_clip_is_io_error() {
        let recognizer = AuddRecognizer::new("http://127.0.0.1:9/", "t").unwrap();
        let err = recognizer.recognize(Path::new("/no/such/clip.ogg")).await.unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }
}
