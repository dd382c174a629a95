use anyhow::Result;
use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use yt_transcript::cli::Cli;
use yt_transcript::config::Config;
use yt_transcript::extractors::extract_video_id;
use yt_transcript::output;
use yt_transcript::transcript::TranscriptPipeline;
use yt_transcript::TranscriptError;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.verbose {
        "yt_transcript=debug"
    } else {
        "yt_transcript=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let video_id = extract_video_id(&cli.url)
        .ok_or_else(|| TranscriptError::InvalidUrl(cli.url.clone()))?;

    if !cli.quiet {
        println!("{} Video ID: {}", style("→").cyan(), video_id);
    }

    let config = Config::load().await?;
    let pipeline = TranscriptPipeline::new(&config, cli.language_list());

    tracing::info!("Fetching transcript for video {}", video_id);

    let progress = (!cli.quiet).then(|| {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap(),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(100));
        spinner.set_message("Fetching transcript...");
        spinner
    });

    let result = pipeline.fetch_for(&video_id).await;
    if let Some(spinner) = &progress {
        spinner.finish_and_clear();
    }
    let transcript = result?;

    if !cli.quiet {
        println!(
            "{} Transcript retrieved ({})",
            style("✔").green(),
            transcript.language
        );
    }

    let text = transcript.text();

    // Optional sinks warn on failure but never abort the run
    if cli.copy {
        match output::copy_to_clipboard(&text).await {
            Ok(()) => {
                if !cli.quiet {
                    println!("{} Copied to clipboard", style("✔").green());
                }
            }
            Err(err) => eprintln!("{} Clipboard copy failed: {}", style("⚠").yellow(), err),
        }
    }

    if cli.save {
        let vault_root = cli
            .obsidian_path
            .clone()
            .unwrap_or_else(|| config.vault.path.clone());
        let writer = output::NoteWriter::new(vault_root);

        match writer.save(
            &video_id,
            &text,
            cli.title.as_deref(),
            &cli.tag_list(),
            Some(&cli.url),
        ) {
            Ok(path) => println!("{} Saved: {}", style("✔").green(), path.display()),
            Err(err) => eprintln!("{} Note save failed: {}", style("⚠").yellow(), err),
        }
    }

    if !cli.copy && !cli.save {
        output::print_to_console(&text);
    }

    Ok(())
}
