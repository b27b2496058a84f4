use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};

pub type TuiTerminal = Terminal<CrosstermBackend<Stderr>>;

/// Raw mode plus alternate screen, restored when the guard is dropped
pub struct TerminalGuard {
    terminal: TuiTerminal,
}

impl TerminalGuard {
    pub fn acquire() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        match Self::enter() {
            Ok(terminal) => Ok(Self { terminal }),
            Err(err) => {
                // Best effort: the setup error is the one worth reporting
                let _ = restore_terminal();
                Err(err)
            }
        }
    }

    fn enter() -> Result<TuiTerminal> {
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;
        Ok(terminal)
    }

    pub fn terminal_mut(&mut self) -> &mut TuiTerminal {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(err) = restore_terminal() {
            tracing::error!("failed to restore terminal: {err:#}");
        }
    }
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    let mut stderr = stderr();
    execute!(stderr, LeaveAlternateScreen, Show).context("Failed to leave alternate screen")?;
    Ok(())
}
