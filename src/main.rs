use anyhow::Result;
use dotenvy::dotenv;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use teloxide::prelude::*;

use akkordy::chords::sheet::normalize_chord_sheet;
use akkordy::chords::tips::DisabledTips;
use akkordy::cli::{Cli, Commands};
use akkordy::core::{config, init_logger, log_services_configuration, RecognizedTrack};
use akkordy::identity::script::classify;
use akkordy::identity::translit::{convert_to_russian, improved_convert_to_russian, reapply_case};
use akkordy::identity::{lookup_alias, plan};
use akkordy::pipeline::{ChordFinder, ChordOutcome};
use akkordy::telegram::{create_bot, schema, setup_bot_commands, HandlerDeps};

/// Main entry point
///
/// Parses CLI arguments and dispatches to the subcommand; no subcommand runs the bot.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Load environment variables from .env before any config is read
    let _ = dotenv();

    init_logger(&config::LOG_FILE_PATH)?;

    match cli.command {
        None | Some(Commands::Run) => run_bot().await,
        Some(Commands::Resolve {
            artist,
            title,
            isrc,
            tips,
        }) => {
            let track = RecognizedTrack {
                title,
                artist,
                isrc,
                album: None,
            };
            resolve(&track, tips).await
        }
        Some(Commands::Recognize { file }) => recognize(&file).await,
        Some(Commands::Normalize { file, chords }) => normalize(&file, &chords),
        Some(Commands::Translit { text, improved }) => {
            translit(&text, improved);
            Ok(())
        }
    }
}

async fn run_bot() -> Result<()> {
    log::info!("Starting bot...");
    log_services_configuration();

    let bot = create_bot()?;
    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to set bot commands: {}", e);
    }

    let finder = Arc::new(ChordFinder::from_config()?);
    let handler = schema(HandlerDeps::new(finder));

    log::info!("📡 Ready to receive updates!");
    Dispatcher::builder(bot, handler)
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    log::info!("Dispatcher shutdown gracefully");
    Ok(())
}

fn print_outcome(outcome: &ChordOutcome) {
    match outcome {
        ChordOutcome::NotRecognized => println!("Song not recognized"),
        ChordOutcome::ChordsNotFound { identity } => println!("No chords found for {}", identity),
        ChordOutcome::Found { identity, chords, tips } => {
            println!("{} → {} - {}", identity, chords.query_artist, chords.query_title);
            println!("{} ({} match)", chords.page, chords.tier);
            println!("Chords: {}", chords.chords.join(", "));
            println!();
            println!("{}", chords.sheet);
            if !tips.is_empty() {
                println!();
                println!("{}", tips);
            }
        }
    }
}

async fn resolve(track: &RecognizedTrack, with_tips: bool) -> Result<()> {
    let mut finder = ChordFinder::from_config()?;
    if !with_tips {
        finder = finder.with_tips(Arc::new(DisabledTips));
    }

    let identity = finder.prepare(track).await;
    for (i, step) in plan(&identity).iter().enumerate() {
        log::info!("plan {}: {} ({:?} title, {:?} artist)", i + 1, step.label, step.title, step.artist);
    }
    let mut outcome = finder.find_for_identity(identity).await;
    if !with_tips {
        if let ChordOutcome::Found { tips, .. } = &mut outcome {
            tips.clear();
        }
    }
    print_outcome(&outcome);
    Ok(())
}

async fn recognize(file: &Path) -> Result<()> {
    let finder = ChordFinder::from_config()?;
    print_outcome(&finder.find_for_clip(file).await);
    Ok(())
}

fn normalize(file: &Path, chords: &[String]) -> Result<()> {
    let raw = if file == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(file)?
    };
    println!("{}", normalize_chord_sheet(&raw, chords));
    Ok(())
}

fn translit(text: &str, improved: bool) {
    let converted = if improved {
        improved_convert_to_russian(text)
    } else {
        convert_to_russian(text)
    };
    println!("translit:  {}", classify(text).is_translit);
    println!("alias:     {}", lookup_alias(text).unwrap_or("-"));
    println!("converted: {}", converted);
    println!("cased:     {}", reapply_case(text, &converted));
}
