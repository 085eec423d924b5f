//! ctxmenu - preview the context menu composed for a payload.
//!
//! Reads a context payload as JSON, prints the menu a host would pop up, and
//! optionally activates one entry against the real system collaborators.

mod headless;
mod logging;

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use ctxmenu_core::models::{find_action, ContextPayload};
use ctxmenu_core::settings::RosterSetting;
use ctxmenu_core::{ContextMenu, CtxMenuError, MenuSettings};
use ctxmenu_system::{system_collaborators, HttpDownloader};

use headless::{HeadlessWindow, TextRenderer};
use logging::LogOptions;

#[derive(Parser, Debug)]
#[command(name = "ctxmenu")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Context payload JSON file, or `-` for stdin. Defaults to an empty payload.
    #[arg(long, value_name = "FILE")]
    context: Option<String>,

    /// Settings file. Defaults to the platform config directory.
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Roster preset, overriding the settings file.
    #[arg(long, value_name = "NAME")]
    preset: Option<String>,

    /// Force the "Inspect Element" entry on or off.
    #[arg(long, value_name = "BOOL")]
    inspect: Option<bool>,

    /// Activate the entry with this id after printing the menu.
    #[arg(long, value_name = "ID")]
    activate: Option<String>,

    /// Log filter directive, e.g. `ctxmenu_core=trace`.
    #[arg(long, value_name = "FILTER")]
    log: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _log_guard = logging::init(&LogOptions::detect(cli.log.clone()));

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(category = e.category(), error = %e, "ctxmenu failed");
            eprintln!("error: {e}");
            if let Some(hint) = e.hint() {
                eprintln!("hint: {hint}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CtxMenuError> {
    let payload = read_payload(cli.context.as_deref())?;

    let mut settings = match &cli.settings {
        Some(path) => MenuSettings::load(path)?,
        None => MenuSettings::load_default()?,
    };
    if let Some(preset) = cli.preset {
        settings.roster = RosterSetting::Preset(preset);
    }
    if let Some(inspect) = cli.inspect {
        settings.show_inspect_element = Some(inspect);
    }
    let options = settings.into_options()?;

    let renderer = TextRenderer::new();
    let mut collaborators = system_collaborators(renderer.clone());
    collaborators.downloader = Arc::new(HttpDownloader::new().foreground());

    let window = HeadlessWindow::new(1);
    let subscription = ContextMenu::new(options, collaborators).attach(window.clone());
    window.request_context(payload);
    subscription.unsubscribe();

    let Some(entries) = renderer.last_menu() else {
        println!("(no menu)");
        return match cli.activate {
            Some(id) => Err(CtxMenuError::config(format!("No menu to activate '{id}' in"))),
            None => Ok(()),
        };
    };

    if let Some(id) = cli.activate {
        let action = find_action(&entries, &id)
            .ok_or_else(|| CtxMenuError::config(format!("No entry with id '{id}'")))?;
        if !action.activate() {
            return Err(CtxMenuError::config(format!("Entry '{id}' is disabled")));
        }
        tracing::info!(id = %id, "Activated entry");
    }

    Ok(())
}

fn read_payload(source: Option<&str>) -> Result<ContextPayload, CtxMenuError> {
    let json = match source {
        None => return Ok(ContextPayload::default()),
        Some("-") => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
        Some(path) => fs::read_to_string(path)?,
    };

    let payload = serde_json::from_str(&json)?;
    Ok(payload)
}
