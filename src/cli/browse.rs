use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::{info, types::Track, warning};

use super::{build_engine, print_track, print_tracks, spinner};

/// One line of input in the interactive browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseCommand {
    Next,
    Previous,
    Random,
    List,
    Quit,
}

impl BrowseCommand {
    /// Parses a command; an empty line means "next".
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "" | "n" | "next" => Some(BrowseCommand::Next),
            "p" | "prev" | "previous" => Some(BrowseCommand::Previous),
            "r" | "random" => Some(BrowseCommand::Random),
            "l" | "list" => Some(BrowseCommand::List),
            "q" | "quit" | "exit" => Some(BrowseCommand::Quit),
            _ => None,
        }
    }
}

pub async fn browse() {
    let mut engine = build_engine();

    let pb = spinner("Preloading tracks...");
    let preload = engine.preload_count();
    engine.preload(preload).await;
    pb.finish_and_clear();

    info!("Commands: [n]ext (enter), [p]revious, [r]andom, [l]ist, [q]uit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        let _ = std::io::stdout().flush();

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warning!("Cannot read input. Err: {}", e);
                break;
            }
        };

        let track: Track = match BrowseCommand::parse(&line) {
            Some(BrowseCommand::Next) => engine.next().await,
            Some(BrowseCommand::Previous) => engine.previous().await,
            Some(BrowseCommand::Random) => engine.random().await,
            Some(BrowseCommand::List) => {
                print_tracks(engine.history().tracks());
                continue;
            }
            Some(BrowseCommand::Quit) => break,
            None => {
                warning!("Unknown command {:?}", line.trim());
                continue;
            }
        };

        print_track(&track);
        info!(
            "Position {} of {}",
            engine.current_index() + 1,
            engine.history().len()
        );
        if engine.is_degraded() {
            warning!("Deezer is not answering, the track above may be a repeat or a placeholder");
        }
    }
}
