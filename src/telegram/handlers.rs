//! Telegram bot handler tree configuration
//!
//! The dispatcher schema lives here so integration tests can build the same
//! handler tree as production code.

use std::path::Path;
use std::sync::Arc;

use teloxide::dispatching::{HandlerExt, UpdateFilterExt, UpdateHandler};
use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::{FileId, ParseMode};
use teloxide::RequestError;
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;

use crate::core::config;
use crate::core::error::AppResult;
use crate::pipeline::{ChordFinder, ChordOutcome};
use crate::telegram::bot::Command;
use crate::telegram::messages;
use crate::telegram::Bot;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub finder: Arc<ChordFinder>,
}

impl HandlerDeps {
    pub fn new(finder: Arc<ChordFinder>) -> Self {
        Self { finder }
    }
}

/// An audio-bearing attachment of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clip {
    pub file_id: FileId,
    /// Extension for the temp file, recognition services sniff it
    pub extension: &'static str,
}

/// Audio, voice notes, videos, video notes and audio documents.
pub fn clip_of(msg: &Message) -> Option<Clip> {
    if let Some(audio) = msg.audio() {
        return Some(Clip {
            file_id: audio.file.id.clone(),
            extension: ".mp3",
        });
    }
    if let Some(voice) = msg.voice() {
        return Some(Clip {
            file_id: voice.file.id.clone(),
            extension: ".ogg",
        });
    }
    if let Some(video) = msg.video() {
        return Some(Clip {
            file_id: video.file.id.clone(),
            extension: ".mp4",
        });
    }
    if let Some(note) = msg.video_note() {
        return Some(Clip {
            file_id: note.file.id.clone(),
            extension: ".mp4",
        });
    }
    msg.document()
        .filter(|doc| {
            doc.mime_type
                .as_ref()
                .is_some_and(|mime| mime.essence_str().starts_with("audio/"))
        })
        .map(|doc| Clip {
            file_id: doc.file.id.clone(),
            extension: ".mp3",
        })
}

/// Creates the main dispatcher handler tree
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    let deps_clips = deps.clone();

    dptree::entry()
        .branch(command_handler())
        .branch(clip_handler(deps_clips))
        .branch(fallback_handler())
}

fn command_handler() -> UpdateHandler<HandlerError> {
    Update::filter_message().branch(dptree::entry().filter_command::<Command>().endpoint(
        |bot: Bot, msg: Message, cmd: Command| async move {
            log::info!("Received command: {:?} from chat {}", cmd, msg.chat.id);
            match cmd {
                Command::Start | Command::Help => {
                    bot.send_message(msg.chat.id, messages::GREETING).await?;
                }
            }
            Ok(())
        },
    ))
}

fn clip_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter_map(|msg: Message| clip_of(&msg))
        .endpoint(move |bot: Bot, msg: Message, clip: Clip| {
            let deps = deps.clone();
            async move {
                if let Err(e) = handle_clip(&bot, &msg, &clip, &deps.finder).await {
                    log::error!("Failed to process clip from chat {}: {}", msg.chat.id, e);
                    let _ = bot.send_message(msg.chat.id, messages::PROCESSING_FAILED).await;
                }
                Ok(())
            }
        })
}

fn fallback_handler() -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter(|msg: Message| msg.chat.is_private())
        .endpoint(|bot: Bot, msg: Message| async move {
            bot.send_message(msg.chat.id, messages::SEND_AUDIO_HINT).await?;
            Ok(())
        })
}

/// Downloads a Telegram file into a temp file that is removed on drop.
pub async fn download_clip(bot: &Bot, clip: &Clip) -> AppResult<NamedTempFile> {
    let file = bot.get_file(clip.file_id.clone()).await?;
    log::info!("Downloading {} ({} bytes)", file.path, file.size);

    std::fs::create_dir_all(config::TEMP_FILES_DIR.as_str())?;
    let temp = tempfile::Builder::new()
        .prefix("akkordy_")
        .suffix(clip.extension)
        .tempfile_in(config::TEMP_FILES_DIR.as_str())?;

    let mut dst = tokio::fs::File::create(temp.path()).await?;
    bot.download_file(&file.path, &mut dst).await?;
    dst.flush().await?;

    Ok(temp)
}

async fn handle_clip(bot: &Bot, msg: &Message, clip: &Clip, finder: &ChordFinder) -> AppResult<()> {
    let chat_id = msg.chat.id;
    bot.send_message(chat_id, messages::DOWNLOADING).await?;

    let temp = download_clip(bot, clip).await?;
    reply_for_clip(bot, chat_id, temp.path(), finder).await
    // temp file is removed here
}

async fn reply_for_clip(bot: &Bot, chat_id: ChatId, clip: &Path, finder: &ChordFinder) -> AppResult<()> {
    let Some(track) = finder.recognize(clip).await else {
        bot.send_message(chat_id, messages::NOT_RECOGNIZED).await?;
        return Ok(());
    };

    let identity = finder.prepare(&track).await;
    bot.send_message(chat_id, messages::found_banner(&identity))
        .parse_mode(ParseMode::Html)
        .await?;

    match finder.find_for_identity(identity).await {
        ChordOutcome::Found { chords, tips, .. } => {
            for part in messages::sheet_messages(&chords.sheet) {
                bot.send_message(chat_id, part).parse_mode(ParseMode::Html).await?;
            }
            for part in messages::split_message(&tips) {
                send_html_or_plain(bot, chat_id, part).await?;
            }
        }
        ChordOutcome::ChordsNotFound { .. } | ChordOutcome::NotRecognized => {
            bot.send_message(chat_id, messages::CHORDS_NOT_FOUND).await?;
        }
    }
    Ok(())
}

fn is_html_parse_error(err: &RequestError) -> bool {
    err.to_string().to_lowercase().contains("can't parse entities")
}

/// Tips come from a language model and are not always valid HTML.
async fn send_html_or_plain(bot: &Bot, chat_id: ChatId, text: String) -> Result<Message, RequestError> {
    match bot.send_message(chat_id, text.clone()).parse_mode(ParseMode::Html).await {
        Ok(msg) => Ok(msg),
        Err(e) if is_html_parse_error(&e) => {
            log::warn!("Tips are not valid HTML, sending as plain text: {}", e);
            bot.send_message(chat_id, text).await
        }
        Err(e) => Err(e),
    }
}
