use std::cell::Cell;
use std::rc::Rc;

use super::*;
use crate::config::PreviewSettings;
use crate::gate::AccessGate;
use crate::media::MediaEvent;
use crate::player::Outcome;
use crate::storage::{MemoryStore, shared};
use crate::testing::{FakeMedia, track};

fn preview(unlocked: bool) -> (PreviewPlayer<FakeMedia>, AccessGate, Rc<Cell<usize>>) {
    let gate = AccessGate::new(shared(MemoryStore::default()));
    if unlocked {
        gate.unlock();
    }
    let prompts = Rc::new(Cell::new(0));
    let counter = prompts.clone();
    let player = PreviewPlayer::new(
        track(4, false),
        gate.clone(),
        FakeMedia::default(),
        PreviewSettings::default(),
        Box::new(move || counter.set(counter.get() + 1)),
    );
    (player, gate, prompts)
}

fn start(player: &mut PreviewPlayer<FakeMedia>) {
    player.toggle_play();
    let ticket = *player.media().play_requests.last().unwrap();
    player.handle_media(MediaEvent::PlayResolved {
        ticket,
        outcome: Ok(()),
    });
    assert!(player.is_playing());
}

#[test]
fn enforce_allows_below_threshold_or_unlocked() {
    assert!(enforce(29.9, true, 30.0).allow);
    assert_eq!(enforce(29.9, true, 30.0).forced, None);
    assert_eq!(enforce(120.0, false, 30.0).forced, None);
    assert!(enforce(f64::NAN, true, 30.0).allow);
}

#[test]
fn enforce_forces_rewind_at_threshold_when_locked() {
    let decision = enforce(30.0, true, 30.0);
    assert!(!decision.allow);
    assert_eq!(decision.forced, Some(ForcedAction::PauseRewindAndPrompt));
    assert!(!enforce(31.2, true, 30.0).allow);
}

#[test]
fn clamp_seek_caps_only_while_locked() {
    assert_eq!(clamp_seek(90.0, true, 30.0), 30.0);
    assert_eq!(clamp_seek(12.0, true, 30.0), 12.0);
    assert_eq!(clamp_seek(-4.0, true, 30.0), 0.0);
    assert_eq!(clamp_seek(90.0, false, 30.0), 90.0);
}

#[test]
fn loads_track_on_creation() {
    let (p, _, _) = preview(false);
    assert_eq!(p.media().loaded, vec!["audio/track4.mp3".to_string()]);
    assert!(!p.is_playing());
}

#[test]
fn crossing_threshold_rewinds_and_prompts_once() {
    let (mut p, _, prompts) = preview(false);
    start(&mut p);

    let mut gated = 0;
    let mut t = 0.0;
    while t <= 32.0 {
        if p.handle_media(p.media().time_update(t)) == Outcome::Gated {
            gated += 1;
        }
        t += 0.25;
    }

    assert_eq!(gated, 1);
    assert_eq!(prompts.get(), 1);
    assert!(!p.is_playing());
    assert_eq!(p.elapsed(), 0.0);
    assert_eq!(p.media().pauses, 1);
    assert_eq!(p.media().seeks.last(), Some(&0.0));
}

#[test]
fn each_new_crossing_prompts_again() {
    let (mut p, _, prompts) = preview(false);
    for _ in 0..2 {
        start(&mut p);
        p.handle_media(p.media().time_update(15.0));
        p.handle_media(p.media().time_update(30.5));
    }
    assert_eq!(prompts.get(), 2);
}

#[test]
fn unlocked_preview_plays_past_threshold() {
    let (mut p, _, prompts) = preview(true);
    start(&mut p);
    assert_eq!(p.handle_media(p.media().time_update(95.0)), Outcome::Applied);
    assert!(p.is_playing());
    assert_eq!(p.elapsed(), 95.0);
    assert_eq!(prompts.get(), 0);
}

#[test]
fn locked_seek_clamps_to_threshold() {
    let (mut p, _, _) = preview(false);
    assert_eq!(p.seek(0.9), Outcome::Applied);
    assert_eq!(p.elapsed(), 30.0);
    assert_eq!(p.media().seeks, vec![30.0]);
}

#[test]
fn unlocked_seek_is_unconstrained() {
    let (mut p, _, _) = preview(true);
    p.seek(0.5);
    assert_eq!(p.elapsed(), 90.0);
    assert_eq!(p.seek(f64::INFINITY), Outcome::Refused);
}

#[test]
fn scrub_stays_within_track_and_limit() {
    let (mut p, gate, _) = preview(false);
    p.seek(27.0 / 180.0);
    p.dispatch(DetailCommand::ScrubForward);
    assert_eq!(p.elapsed(), 30.0);

    p.dispatch(DetailCommand::ScrubBack);
    assert_eq!(p.elapsed(), 25.0);
    for _ in 0..10 {
        p.dispatch(DetailCommand::ScrubBack);
    }
    assert_eq!(p.elapsed(), 0.0);

    gate.unlock();
    p.seek(1.0);
    p.dispatch(DetailCommand::ScrubForward);
    assert_eq!(p.elapsed(), 180.0);
}

#[test]
fn ended_pauses_and_rewinds() {
    let (mut p, _, _) = preview(true);
    start(&mut p);
    p.handle_media(p.media().time_update(179.0));
    assert_eq!(p.handle_media(p.media().ended()), Outcome::Applied);
    assert!(!p.is_playing());
    assert_eq!(p.elapsed(), 0.0);
}

#[test]
fn time_updates_while_paused_are_ignored() {
    let (mut p, _, prompts) = preview(false);
    assert_eq!(p.handle_media(p.media().time_update(45.0)), Outcome::Ignored);
    assert_eq!(p.elapsed(), 0.0);
    assert_eq!(prompts.get(), 0);
}

#[test]
fn stale_play_result_after_pause_is_ignored() {
    let (mut p, _, _) = preview(false);
    p.toggle_play();
    let ticket = p.media().play_requests[0];
    p.load_track(track(5, false));

    assert_eq!(
        p.handle_media(MediaEvent::PlayResolved {
            ticket,
            outcome: Ok(()),
        }),
        Outcome::Ignored
    );
    assert!(!p.is_playing());
    assert_eq!(p.track().number, 5);
}

#[test]
fn progress_from_replaced_track_is_ignored() {
    let (mut p, _, prompts) = preview(false);
    start(&mut p);
    let late = p.media().time_update(45.0);
    let late_end = p.media().ended();

    p.load_track(track(5, false));
    start(&mut p);

    assert_eq!(p.handle_media(late), Outcome::Ignored);
    assert_eq!(p.handle_media(late_end), Outcome::Ignored);
    assert!(p.is_playing());
    assert_eq!(p.elapsed(), 0.0);
    assert_eq!(prompts.get(), 0);
}

#[test]
fn toggle_while_start_pending_cancels_it() {
    let (mut p, _, _) = preview(false);
    p.toggle_play();
    let ticket = p.media().play_requests[0];

    p.toggle_play();
    assert_eq!(p.media().pauses, 1);
    assert_eq!(
        p.handle_media(MediaEvent::PlayResolved {
            ticket,
            outcome: Ok(()),
        }),
        Outcome::Ignored
    );
    assert!(!p.is_playing());
}

#[test]
fn seek_falls_back_to_element_duration() {
    let gate = AccessGate::new(shared(MemoryStore::default()));
    gate.unlock();
    let mut t = track(4, false);
    t.duration_seconds = None;
    let mut p = PreviewPlayer::new(
        t,
        gate,
        FakeMedia {
            duration: Some(60.0),
            ..FakeMedia::default()
        },
        PreviewSettings::default(),
        Box::new(|| {}),
    );
    p.seek(0.5);
    assert_eq!(p.elapsed(), 30.0);
}

#[test]
fn notice_follows_gate() {
    let (p, gate, _) = preview(false);
    assert!(p.preview_notice_visible());
    gate.unlock();
    assert!(!p.preview_notice_visible());
}

#[test]
fn metadata_duration_drives_seek() {
    let (mut p, _, _) = preview(true);
    p.handle_media(p.media().metadata_ready(100.0));
    p.dispatch(DetailCommand::Seek(0.5));
    assert_eq!(p.elapsed(), 50.0);
}
