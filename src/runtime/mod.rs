use std::env;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use log::{info, warn};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::config;
use crate::error::EncoreError;
use crate::media::RodioMedia;
use crate::player::Player;
use crate::preview::PreviewPlayer;

mod detail_loop;
mod event_loop;
mod logging;
mod overlay;
mod settings;
mod startup;

/// Which screen to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Player,
    /// Track-detail preview for the given album number.
    Track(u32),
}

/// The player driving the open screen; owns the media element.
enum Screen {
    Player(Player<RodioMedia>),
    Detail(PreviewPlayer<RodioMedia>),
}

/// `encore` or `encore track <n>`.
pub fn parse_mode<I: IntoIterator<Item = String>>(args: I) -> Result<Mode, String> {
    let mut args = args.into_iter();
    match args.next().as_deref() {
        None => Ok(Mode::Player),
        Some("track") => {
            let number = args
                .next()
                .ok_or_else(|| "usage: encore track <number>".to_string())?;
            number
                .parse::<u32>()
                .map(Mode::Track)
                .map_err(|_| format!("not a track number: {number}"))
        }
        Some(other) => Err(format!("unknown argument {other:?}; usage: encore [track <number>]")),
    }
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, settings_problem) = settings::load_settings();

    match logging::init(&config::data_dir(&settings)) {
        Ok(path) => info!("encore starting, logging to {}", path.display()),
        Err(e) => eprintln!("encore: logging disabled: {e}"),
    }
    if let Some(problem) = settings_problem {
        warn!("{problem}");
    }

    let mode = parse_mode(env::args().skip(1))?;
    let services = startup::open_services(&settings)?;

    let detail_track = match mode {
        Mode::Player => None,
        Mode::Track(number) => {
            let index = services
                .playlist
                .index_of(number)
                .ok_or_else(|| EncoreError::Playlist(format!("no track numbered {number}")))?;
            services.playlist.get(index).cloned()
        }
    };

    let (media, events) = RodioMedia::new(&settings.media);
    let mut app = App::new();
    let mut screen = match detail_track {
        None => {
            let mut player = Player::new(
                services.playlist.clone(),
                services.gate.clone(),
                media,
                settings.player.clone(),
                app.gate_prompt(),
            );
            startup::restore_session(&mut player, &services.session);
            Screen::Player(player)
        }
        Some(track) => Screen::Detail(PreviewPlayer::new(
            track,
            services.gate.clone(),
            media,
            settings.preview.clone(),
            app.gate_prompt(),
        )),
    };

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = match &mut screen {
        Screen::Player(player) => {
            let result =
                event_loop::run(&mut terminal, &settings, &mut app, player, &events, &services);
            startup::persist_session(player, &services.session);
            result
        }
        Screen::Detail(preview) => {
            detail_loop::run(&mut terminal, &settings, &mut app, preview, &events, &services)
        }
    };

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Joins the audio thread, which may still be finishing a fetch.
    drop(screen);

    info!("encore exiting");
    run_result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_arguments_open_the_player() {
        assert_eq!(parse_mode(args(&[])), Ok(Mode::Player));
    }

    #[test]
    fn track_argument_opens_detail_view() {
        assert_eq!(parse_mode(args(&["track", "3"])), Ok(Mode::Track(3)));
    }

    #[test]
    fn bad_arguments_are_reported() {
        assert!(parse_mode(args(&["track"])).is_err());
        assert!(parse_mode(args(&["track", "three"])).is_err());
        assert!(parse_mode(args(&["shuffle"])).is_err());
    }
}
