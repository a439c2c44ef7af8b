use anyhow::{Context, Result};
use dotenv::dotenv;
use std::env;
use summary_linker::{DataLoader, LoadState, SelectionController, SummaryError};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tracing::{info, warn};
use utils::errors::{CLIENT_BUILD_FAILED, DOCUMENT_READ_FAILED, SELECTION_READ_FAILED};
use utils::tracing::setup_tracing;

mod config;
mod render;

/// Usage: `summary-explorer [PATH|-] [SENTENCE_INDEX...]`
///
/// The document is read from PATH, or from stdin when PATH is `-` or
/// missing. Sentence indices given on the command line are shown in order;
/// without them, indices are read interactively from stdin (file input only).
#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    setup_tracing();
    config::load()?;

    let mut args = env::args().skip(1);
    let path = args.next().filter(|p| p != "-");
    let indices: Vec<String> = args.collect();

    let document = read_document(path.as_deref()).await?;
    let loader =
        DataLoader::from_config(&config::get_config().service).context(CLIENT_BUILD_FAILED)?;
    let mut controller = SelectionController::new(loader.subscribe());

    loader.submit(document);
    if let Some(line) = render::status(&loader.state().view()) {
        println!("{line}");
    }

    let state = loader.settled().await;
    if let LoadState::Failed(_) = state {
        if let Some(line) = render::status(&state.view()) {
            println!("{line}");
        }
        return Ok(());
    }

    controller.refresh();
    print!("{}", render::summary(&controller));
    println!();
    print!("{}", render::document(&controller));

    if !indices.is_empty() {
        for raw in indices {
            show_selection(&mut controller, &raw);
        }
        return Ok(());
    }

    if path.is_none() {
        info!("Document was read from stdin; pass sentence indices as arguments to select");
        return Ok(());
    }

    info!("Reading sentence indices from stdin");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context(SELECTION_READ_FAILED)? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "q" {
            break;
        }
        show_selection(&mut controller, line);
    }

    Ok(())
}

async fn read_document(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("{DOCUMENT_READ_FAILED}: {path}")),
        None => {
            let mut document = String::new();
            tokio::io::stdin()
                .read_to_string(&mut document)
                .await
                .context(DOCUMENT_READ_FAILED)?;
            Ok(document)
        }
    }
}

fn show_selection(controller: &mut SelectionController, raw: &str) {
    let index = match raw.parse::<usize>() {
        Ok(index) => index,
        Err(err) => {
            warn!(input = raw, error = %err, "Not a sentence index");
            return;
        }
    };

    match controller.select_sentence(index) {
        Ok(()) => {
            println!();
            print!("{}", render::summary(controller));
            println!();
            print!("{}", render::document(controller));
        }
        Err(err @ SummaryError::IndexOutOfRange { .. }) => {
            println!("Error: {err}");
        }
        Err(err) => {
            warn!(error = %err, "Failed to compute similarities");
        }
    }
}
