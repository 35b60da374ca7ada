use crate::config::Config;
use crate::constants::TICK_RATE_MS;
use crate::logger::Logger;
use crate::security::TrustStore;
use crate::ui::app::App;
use crate::ui::core::{EventHandler, EventType};
use anyhow::Context;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io::{self, Stdout, Write};
use tokio::time::Duration;

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Set up the terminal, run the event loop and restore the terminal
pub async fn run_app(config: Config, trust: TrustStore, logger: Logger) -> anyhow::Result<()> {
    let mut terminal = setup_terminal()?;

    let mut app = App::new(config, trust, logger);
    let size = terminal.size()?;
    app.resize(size.width, size.height);
    let mut event_handler = EventHandler::new(Duration::from_millis(TICK_RATE_MS));

    let result = run_app_loop(&mut terminal, &mut app, &mut event_handler).await;

    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> anyhow::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut Tui) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app_loop(terminal: &mut Tui, app: &mut App, event_handler: &mut EventHandler) -> anyhow::Result<()> {
    let mut needs_render = true;

    loop {
        if needs_render {
            draw(terminal, app)?;
            needs_render = false;
        }

        match event_handler.next_event().await? {
            EventType::Key(key) => {
                app.handle_key(key);
                needs_render = true;
            }
            EventType::Resize(width, height) => {
                app.resize(width, height);
                needs_render = true;
            }
            EventType::Tick => {
                app.tick();
                // Spinner frames advance on every tick
                needs_render = app.screens().is_active();
            }
            EventType::Other => {}
        }

        if app.process_completions() > 0 {
            needs_render = true;
        }

        if let Some(edit) = app.take_external_edit() {
            restore_terminal(terminal)?;
            let result = edit_in_external_editor(&edit.value);
            *terminal = setup_terminal()?;
            terminal.clear()?;
            app.finish_external_edit(edit.target, result);
            needs_render = true;
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

fn draw<B: Backend>(terminal: &mut Terminal<B>, app: &App) -> anyhow::Result<()> {
    terminal.draw(|f| app.render(f, f.area()))?;
    Ok(())
}

/// Open `value` in `$VISUAL` or `$EDITOR` (falling back to `vi`) and return
/// the saved text
pub fn edit_in_external_editor(value: &str) -> anyhow::Result<String> {
    let editor = std::env::var("VISUAL")
        .or_else(|_| std::env::var("EDITOR"))
        .unwrap_or_else(|_| "vi".to_string());
    edit_with(&editor, value)
}

/// Run `editor` on a private scratch file holding `value`.
///
/// The file gets a random name and mode 0600 and is removed afterwards.
pub fn edit_with(editor: &str, value: &str) -> anyhow::Result<String> {
    let mut scratch = tempfile::Builder::new()
        .prefix("lazyworktree-")
        .suffix(".md")
        .tempfile()
        .context("Failed to create a scratch file")?;
    scratch
        .write_all(value.as_bytes())
        .and_then(|_| scratch.flush())
        .with_context(|| format!("Failed to write {}", scratch.path().display()))?;
    let path = scratch.path().to_path_buf();
    log::info!("Opening {} in {}", path.display(), editor);

    let status = std::process::Command::new("sh")
        .arg("-c")
        .arg(format!("{} \"$1\"", editor))
        .arg("sh")
        .arg(&path)
        .status()
        .with_context(|| format!("Failed to start editor '{}'", editor))?;

    if !status.success() {
        anyhow::bail!("Editor '{}' exited with {}", editor, status);
    }
    let edited = std::fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(edited.trim_end().to_string())
}
