use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use log::debug;
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::config;
use crate::media::{MediaElement, MediaEvent};
use crate::preview::{DetailCommand, PreviewPlayer};
use crate::runtime::overlay;
use crate::runtime::startup::Services;
use crate::ui;

/// Track-detail loop for `encore track <n>`.
pub fn run<M: MediaElement>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    preview: &mut PreviewPlayer<M>,
    events: &Receiver<MediaEvent>,
    services: &Services,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        while let Ok(ev) = events.try_recv() {
            preview.handle_media(ev);
        }
        app.take_prompt();

        terminal.draw(|f| {
            ui::draw_detail(f, app, preview, &settings.ui, settings.preview.scrub_seconds)
        })?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if overlay::handle_key(key, app, &services.gate, &services.subscriber) {
                    continue;
                }
                if handle_key_event(key, app, preview, services) {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn handle_key_event<M: MediaElement>(
    key: KeyEvent,
    app: &mut App,
    preview: &mut PreviewPlayer<M>,
    services: &Services,
) -> bool {
    let command = match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('u') => {
            overlay::open(app, &services.gate);
            return false;
        }
        KeyCode::Char('n') | KeyCode::Char('b') => {
            let (prev, next) = services.playlist.neighbors(preview.track().number);
            let target = if key.code == KeyCode::Char('n') { next } else { prev };
            match target {
                Some(track) => preview.load_track(track.clone()),
                None => debug!("no neighbouring track page"),
            }
            return false;
        }
        KeyCode::Char(' ') | KeyCode::Char('p') => DetailCommand::TogglePlay,
        KeyCode::Right => DetailCommand::ScrubForward,
        KeyCode::Left => DetailCommand::ScrubBack,
        KeyCode::Char(c @ '0'..='9') => match c.to_digit(10) {
            Some(d) => DetailCommand::Seek(d as f64 / 10.0),
            None => return false,
        },
        _ => return false,
    };

    app.status = None;
    preview.dispatch(command);
    false
}
