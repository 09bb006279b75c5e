//! Terminal rendering for the persistent player and the track-detail view.

use std::{collections::BTreeMap, sync::LazyLock};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::config::{TimeField, UiSettings};
use crate::media::MediaElement;
use crate::player::{Player, VolumeIcon, format_time};
use crate::playlist::TrackDescriptor;
use crate::preview::PreviewPlayer;

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    map.insert("j/k", "up/down");
    map.insert("enter", "play selected");
    map.insert("1-9", "play track #");
    map.insert("space/p", "play/pause");
    map.insert("h/l", "prev/next");
    map.insert("+/-", "volume");
    map.insert("m", "mute");
    map.insert("c", "close");
    map.insert("u", "subscribe");
    map.insert("q", "quit");
    map.insert("left/right", "scrub");
    map.insert("0-9", "seek to tenths");
    map.insert("n/b", "next/prev track page");
    map
});

const PLAYER_CONTROLS: [&str; 11] = [
    "j/k", "enter", "1-9", "space/p", "h/l", "H/L", "+/-", "m", "c", "u", "q",
];
const DETAIL_CONTROLS: [&str; 6] = ["space/p", "left/right", "0-9", "n/b", "u", "q"];

fn controls_text(order: &[&str], seek_seconds: u64) -> String {
    order
        .iter()
        .filter_map(|k| {
            if *k == "H/L" {
                Some(format!("[H/L] seek -/+{seek_seconds}s"))
            } else if *k == "left/right" {
                Some(format!("[left/right] scrub -/+{seek_seconds}s"))
            } else {
                CONTROLS_MAP.get(k).map(|v| format!("[{k}] {v}"))
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Now-playing time text (elapsed/total/remaining) per `UiSettings`.
fn now_playing_time_text(elapsed: f64, total: Option<f64>, ui: &UiSettings) -> Option<String> {
    let parts: Vec<String> = ui
        .now_playing_time_fields
        .iter()
        .filter_map(|f| match f {
            TimeField::Elapsed => Some(format_time(elapsed)),
            TimeField::Total => total.map(format_time),
            TimeField::Remaining => total.map(|t| format!("-{}", format_time(t - elapsed))),
        })
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(&ui.now_playing_time_separator))
    }
}

fn track_label(track: &TrackDescriptor) -> String {
    format!("{:02}. {}", track.number, track.title)
}

/// Text progress bar of `width` cells.
fn progress_bar(elapsed: f64, total: Option<f64>, width: usize) -> String {
    let ratio = match total {
        Some(t) if t > 0.0 && elapsed.is_finite() => (elapsed / t).clamp(0.0, 1.0),
        _ => 0.0,
    };
    let filled = (ratio * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn volume_text(level: f32) -> String {
    format!(
        "{} {:>3}%",
        VolumeIcon::for_level(level).symbol(),
        (level * 100.0).round() as u32
    )
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn padded(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        })
}

fn screen_chunks(frame: &Frame) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area())
}

fn draw_header(frame: &mut Frame, area: Rect, text: &str) {
    let header = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" encore ")
            .title_alignment(Alignment::Center),
    );
    frame.render_widget(header, area);
}

fn lock_text(locked: bool) -> &'static str {
    if locked {
        "ALBUM: locked, [u] to subscribe"
    } else {
        "ALBUM: unlocked"
    }
}

/// Render the persistent player screen.
pub fn draw_player<M: MediaElement>(
    frame: &mut Frame,
    app: &App,
    player: &Player<M>,
    ui: &UiSettings,
    seek_seconds: u64,
) {
    let chunks = screen_chunks(frame);
    draw_header(frame, chunks[0], &ui.header_text);

    let state = player.state();
    let status = {
        let mut parts: Vec<String> = Vec::new();
        match player.current_track() {
            Some(track) => {
                let song = track_label(track);
                match now_playing_time_text(state.elapsed, player.total_duration(), ui) {
                    Some(time) => parts.push(format!("Song: {song} [{time}]")),
                    None => parts.push(format!("Song: {song}")),
                }
                parts.push(if state.playing { "Playing" } else { "Paused" }.to_string());
            }
            None => parts.push("Stopped".to_string()),
        }
        parts.push(volume_text(state.volume));
        parts.push(lock_text(player.gate().is_locked()).to_string());
        if let Some(msg) = &app.status {
            parts.push(msg.clone());
        }
        parts.join(" • ")
    };
    let status_par = Paragraph::new(status)
        .block(padded(" status "))
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    let queue = player.queue();
    let items: Vec<ListItem> = queue
        .iter()
        .map(|e| {
            let marker = if e.is_current { "♪" } else { " " };
            let line = format!("{marker} {:02}  {}  {}", e.number, e.title, e.duration_label);
            if e.is_current {
                ListItem::new(line).bold()
            } else {
                ListItem::new(line)
            }
        })
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" up next "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut list_state = ListState::default();
    if !queue.is_empty() {
        list_state.select(Some(app.selected.min(queue.len() - 1)));
    }
    frame.render_stateful_widget(list, chunks[2], &mut list_state);

    let footer = Paragraph::new(controls_text(&PLAYER_CONTROLS, seek_seconds))
        .block(padded(" controls "))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);

    draw_subscribe(frame, app);
}

/// Render the track-detail screen.
pub fn draw_detail<M: MediaElement>(
    frame: &mut Frame,
    app: &App,
    preview: &PreviewPlayer<M>,
    ui: &UiSettings,
    scrub_seconds: u64,
) {
    let chunks = screen_chunks(frame);
    let track = preview.track();
    draw_header(frame, chunks[0], &track_label(track));

    let total = preview.total_duration();
    let mut status = vec![
        if preview.is_playing() { "Playing" } else { "Paused" }.to_string(),
    ];
    if let Some(time) = now_playing_time_text(preview.elapsed(), total, ui) {
        status.push(time);
    }
    if let Some(msg) = &app.status {
        status.push(msg.clone());
    }
    let status_par = Paragraph::new(status.join(" • "))
        .block(padded(" status "))
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    let width = chunks[2].width.saturating_sub(4) as usize;
    let mut body = vec![progress_bar(preview.elapsed(), total, width), String::new()];
    if track.is_bonus {
        body.push("Bonus track".to_string());
    }
    if preview.preview_notice_visible() {
        body.push(format!(
            "Preview: the first {}s play while the album is locked. Subscribe with [u] to hear it all.",
            preview.threshold()
        ));
    } else {
        body.push(lock_text(false).to_string());
    }
    let body_par = Paragraph::new(body.join("\n"))
        .block(padded(" track "))
        .wrap(Wrap { trim: false });
    frame.render_widget(body_par, chunks[2]);

    let footer = Paragraph::new(controls_text(&DETAIL_CONTROLS, scrub_seconds))
        .block(padded(" controls "))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);

    draw_subscribe(frame, app);
}

fn draw_subscribe(frame: &mut Frame, app: &App) {
    let Some(form) = &app.subscribe else {
        return;
    };
    let area = centered_rect_sized(60, 8, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = vec![
        "Subscribe to unlock the full album and the bonus track.".to_string(),
        String::new(),
        format!("Email: {}_", form.email),
    ];
    if let Some(err) = &form.error {
        lines.push(String::new());
        lines.push(err.clone());
    }
    let popup = Paragraph::new(lines.join("\n"))
        .block(padded(" subscribe (enter sends, esc closes) "))
        .wrap(Wrap { trim: false });
    frame.render_widget(popup, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_text_follows_configured_fields() {
        let mut ui = UiSettings::default();
        assert_eq!(
            now_playing_time_text(42.0, Some(204.0), &ui).as_deref(),
            Some("0:42 / 3:24")
        );

        ui.now_playing_time_fields = vec![TimeField::Remaining];
        assert_eq!(
            now_playing_time_text(42.0, Some(204.0), &ui).as_deref(),
            Some("-2:42")
        );
        assert_eq!(now_playing_time_text(42.0, None, &ui), None);
    }

    #[test]
    fn progress_bar_fills_proportionally() {
        assert_eq!(progress_bar(0.0, Some(100.0), 4), "░░░░");
        assert_eq!(progress_bar(50.0, Some(100.0), 4), "██░░");
        assert_eq!(progress_bar(500.0, Some(100.0), 4), "████");
        assert_eq!(progress_bar(10.0, None, 3), "░░░");
    }

    #[test]
    fn controls_include_seek_step() {
        let text = controls_text(&PLAYER_CONTROLS, 5);
        assert!(text.contains("[H/L] seek -/+5s"));
        assert!(text.starts_with("[j/k] up/down"));
    }
}
