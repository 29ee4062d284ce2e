use anyhow::{Context, Result, bail};
use std::io;
use wordle_game::cli::{CliInterface, parse_cli};
use wordle_game::logging::{self, default_log_path};
use wordle_game::tui::TuiInterface;
use wordle_game::wordbank::{EMBEDDED_WORDBANK, load_wordbank_from_file, load_wordbank_from_str};
use wordle_game::{SessionSummary, game_loop};

fn main() -> Result<()> {
    let cli = parse_cli();

    let log_path = cli.log_file.clone().unwrap_or_else(default_log_path);
    logging::init(&log_path)
        .with_context(|| format!("Failed to open log file '{}'", log_path.display()))?;

    let wordbank = match &cli.wordbank_path {
        Some(path) => load_wordbank_from_file(path)
            .with_context(|| format!("Failed to load word bank from '{}'", path.display()))?,
        None => load_wordbank_from_str(EMBEDDED_WORDBANK),
    };
    log::info!("Loaded {} words", wordbank.len());

    let Some(mut picker) = cli.secret_picker(wordbank) else {
        bail!("--daily needs a word bank with at least one five-letter word");
    };

    let summary = if cli.plain {
        let stdin = io::stdin();
        let mut interface = CliInterface::with_delay(stdin.lock(), cli.notify_delay());
        game_loop(&mut picker, &mut interface)
    } else {
        let mut interface =
            TuiInterface::new(cli.notify_delay()).context("Failed to initialize terminal")?;
        let summary = game_loop(&mut picker, &mut interface);
        interface.cleanup().context("Failed to restore terminal")?;
        summary
    };

    print_summary(summary);
    Ok(())
}

fn print_summary(summary: SessionSummary) {
    let played = summary.won + summary.lost;
    if played > 0 {
        println!("Games finished: {played} (won {}, lost {})", summary.won, summary.lost);
    }
}
