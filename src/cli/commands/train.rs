//! Train command - background self-play training with progress reporting

use std::{
    fs::File,
    path::{Path, PathBuf},
    thread,
    time::Duration,
};

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Serialize;
use serde_json::to_writer_pretty;

use crate::{
    app::{AgentConfig, App, TrainingConfig},
    cli::{
        config::AgentArgs,
        output::{create_training_progress, format_number, print_kv, print_section},
    },
    q_learning::{TrainingLaunch, TrainingReport},
};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Serialize)]
struct TrainingSummaryFile<'a> {
    training: &'a TrainingReport,
    config: &'a AgentConfig,
}

fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    // Treat trailing separators or missing filename as a directory target.
    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push("training_summary.json");
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Train the agent by self-play")]
pub struct TrainArgs {
    /// Number of self-play games
    #[arg(long, short = 'g', default_value_t = TrainingConfig::default().games)]
    pub games: usize,

    #[command(flatten)]
    pub agent: AgentArgs,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let config = args.agent.to_config();
    let app = App::new();
    let agent = app
        .create_agent(&config)
        .context("creating Q-learning agent")?;
    let supervisor = app.create_supervisor(agent);

    println!("Training agent with {} games...", format_number(args.games));

    let handle = match supervisor.start(args.games, app.random_source(&config))? {
        TrainingLaunch::Started(handle) => handle,
        TrainingLaunch::AlreadyRunning { .. } => bail!("a training run is already active"),
    };

    let progress = if args.no_progress {
        None
    } else {
        Some(create_training_progress(args.games as u64)?)
    };

    while !handle.is_finished() {
        if let Some(pb) = &progress {
            let (current, _) = supervisor.progress();
            pb.set_position(current as u64);
            pb.set_message(format!(
                "{} pairs",
                format_number(supervisor.agent().memory_size())
            ));
        }
        thread::sleep(POLL_INTERVAL);
    }

    let report = handle.join().context("waiting for training to finish")?;
    if let Some(pb) = &progress {
        pb.set_position(report.games_played as u64);
        pb.finish_with_message(format!("{} pairs", format_number(report.memory_size)));
    }

    print_section("Training complete");
    print_kv("Games", &format_number(report.games_played));
    print_kv("Memory", &format!("{} state-action pairs", format_number(report.memory_size)));
    print_kv("Elapsed", &format!("{:.2?}", report.elapsed));

    if let Some(raw) = &args.summary {
        let path = sanitize_summary_path(raw);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let file =
            File::create(&path).with_context(|| format!("creating {}", path.display()))?;
        to_writer_pretty(
            file,
            &TrainingSummaryFile {
                training: &report,
                config: &config,
            },
        )
        .with_context(|| format!("writing {}", path.display()))?;
        print_kv("Summary", &path.display().to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_summary_path() {
        assert_eq!(
            sanitize_summary_path(Path::new("out/run")),
            PathBuf::from("out/run.json")
        );
        assert_eq!(
            sanitize_summary_path(Path::new("out/run.JSON")),
            PathBuf::from("out/run.JSON")
        );
        assert_eq!(
            sanitize_summary_path(Path::new("out/run.txt")),
            PathBuf::from("out/run.json")
        );
    }
}
