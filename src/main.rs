//! usrdir-manager binary entry point.
//!
//! Parses the command line, sets up file logging, then either prints an
//! HTML snapshot of one page or runs the interactive TUI and restores the
//! terminal on exit.
//!
use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use usrdir_manager::Result;
use usrdir_manager::app;
use usrdir_manager::config::Cli;
use usrdir_manager::error::Context;
use usrdir_manager::remote::HttpDirectoryClient;

/// Log to a file only; anything written to stdout would corrupt the TUI.
/// The returned guard flushes pending lines when dropped.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("usrdir_manager={}", cli.log_level())));

    let log_file = cli.log_file();
    let log_dir = log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(std::path::Path::to_path_buf)
        .unwrap_or_else(std::env::temp_dir);
    let log_name = log_file
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_else(|| "usrdir-manager.log".into());

    let file_appender = tracing_appender::rolling::never(log_dir, log_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode().with_ctx(|| "enable raw mode".into())?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .with_ctx(|| "enter alternate screen".into())?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).with_ctx(|| "create terminal".into())?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) {
    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();
}

async fn print_snapshot(cli: &Cli) -> Result<()> {
    let client = HttpDirectoryClient::new(cli.api_url.clone())?;
    let html = app::snapshot::render_html(client, cli.page_size, cli.search.as_deref(), cli.page)
        .await
        .map_err(|e| format!("snapshot: {e}"))?;
    print!("{html}");
    Ok(())
}

/// Program entry point: run the TUI and report any top-level error to stderr.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = setup_tracing(&cli);
    tracing::info!(api_url = %cli.api_url, page_size = cli.page_size.get(), "starting");

    if cli.html {
        return print_snapshot(&cli).await;
    }

    let mut terminal = init_terminal().map_err(|e| format!("init terminal: {e}"))?;
    let res = app::run(&mut terminal, &cli).await;
    restore_terminal(&mut terminal);

    if let Err(err) = res {
        tracing::error!(error = %err, "application error");
        eprintln!("application error: {err}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_wraps_terminal_errors_with_a_label() {
        let err = std::result::Result::<(), std::io::Error>::Err(std::io::Error::other("tty"))
            .with_ctx(|| "init terminal".into())
            .unwrap_err();
        assert_eq!(err.to_string(), "init terminal: tty");
    }
}
