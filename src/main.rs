//! hgcomb - comb through a file's Mercurial history
//!
//! Binary entry point: the terminal UI, or a line-oriented subcommand.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::DefaultTerminal;

use hgcomb::app::App;
use hgcomb::config::{Cli, Command, Options};
use hgcomb::hg::{CommandWorker, ProcessExecutor};
use hgcomb::logging::{self, LogTarget};
use hgcomb::oneshot;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let options = &cli.options;

    match cli.command() {
        Command::Browse { file } => browse(options, file),
        Command::Show { file, index } => {
            logging::init(&LogTarget::for_cli(options.log_file.as_deref()))?;
            let mut out = io::stdout().lock();
            oneshot::run_show(
                options.pipeline_config(),
                &ProcessExecutor::new(),
                &file,
                index,
                &mut out,
            )?;
            Ok(())
        }
        Command::Grep { pattern, file } => {
            logging::init(&LogTarget::for_cli(options.log_file.as_deref()))?;
            let mut out = io::stdout().lock();
            oneshot::run_grep(
                options.pipeline_config(),
                &ProcessExecutor::new(),
                &pattern,
                &file,
                &mut out,
            )?;
            Ok(())
        }
    }
}

fn browse(options: &Options, file: Option<PathBuf>) -> color_eyre::Result<()> {
    logging::init(&LogTarget::for_tui(options.log_file.as_deref()))?;
    let worker = CommandWorker::new(Arc::new(ProcessExecutor::new()), options.workers)?;
    let mut app = App::new(options.pipeline_config(), worker, file);

    let terminal = ratatui::init();
    // Restore the terminal even if the loop panics
    let _guard = scopeguard::guard((), |_| ratatui::restore());
    run(terminal, &mut app)
}

/// Run the application's main loop.
fn run(mut terminal: DefaultTerminal, app: &mut App) -> color_eyre::Result<()> {
    app.begin_history();

    while app.running {
        terminal.draw(|frame| app.render(frame))?;
        handle_events(app)?;
    }

    Ok(())
}

/// Handle crossterm events.
///
/// Uses poll with 200ms timeout so finished hg commands are picked up even
/// while no key is pressed.
fn handle_events(app: &mut App) -> color_eyre::Result<()> {
    if event::poll(Duration::from_millis(200))? {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                app.on_key_event(key);
            }
            _ => {}
        }
    }
    app.drain_completions();
    app.clear_expired_notification();
    Ok(())
}
