use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::config;
use crate::media::{MediaElement, MediaEvent};
use crate::player::{Command, Player};
use crate::runtime::overlay;
use crate::runtime::startup::Services;
use crate::ui;

/// Persistent player loop: drains media notifications, draws, handles keys.
/// Returns `Ok(())` when the user quits.
pub fn run<M: MediaElement>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    player: &mut Player<M>,
    events: &Receiver<MediaEvent>,
    services: &Services,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        while let Ok(ev) = events.try_recv() {
            player.handle_media(ev);
        }
        app.take_prompt();
        app.clamp_selection(player.queue().len());

        terminal.draw(|f| {
            ui::draw_player(f, app, player, &settings.ui, settings.preview.scrub_seconds)
        })?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if overlay::handle_key(key, app, &services.gate, &services.subscriber) {
                    continue;
                }
                if handle_key_event(key, settings, app, player, services) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Returns true when the key asks to quit.
fn handle_key_event<M: MediaElement>(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    player: &mut Player<M>,
    services: &Services,
) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let seek = settings.preview.scrub_seconds as f64;

    let command = match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('u') => {
            overlay::open(app, &services.gate);
            return false;
        }
        KeyCode::Char('j') | KeyCode::Down if !ctrl => {
            app.next(player.queue().len());
            return false;
        }
        KeyCode::Char('k') | KeyCode::Up if !ctrl => {
            app.prev();
            return false;
        }
        KeyCode::Enter => match player.queue().get(app.selected) {
            Some(entry) => Command::Select(entry.index),
            None => return false,
        },
        KeyCode::Char(' ') | KeyCode::Char('p') => Command::TogglePlay,
        KeyCode::Char('l') => Command::Next,
        KeyCode::Char('h') => Command::Previous,
        KeyCode::Right if ctrl => Command::Next,
        KeyCode::Left if ctrl => Command::Previous,
        KeyCode::Char('L') => Command::SeekBy(seek),
        KeyCode::Char('H') => Command::SeekBy(-seek),
        KeyCode::Char('+') | KeyCode::Char('=') => Command::VolumeUp,
        KeyCode::Char('-') => Command::VolumeDown,
        KeyCode::Up if ctrl => Command::VolumeUp,
        KeyCode::Down if ctrl => Command::VolumeDown,
        KeyCode::Char('m') => Command::ToggleMute,
        KeyCode::Char('c') => Command::Close,
        KeyCode::Char(c @ '1'..='9') => match c.to_digit(10) {
            Some(n) => Command::SelectNumber(n),
            None => return false,
        },
        _ => return false,
    };

    app.status = None;
    player.dispatch(command);
    false
}
