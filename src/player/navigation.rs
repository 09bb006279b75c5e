//! Track stepping with bonus skipping.
//!
//! Both directions wrap around and scan at most one full lap, so a playlist
//! made only of locked bonus tracks yields `None` instead of looping.

use crate::playlist::TrackDescriptor;

fn playable(track: &TrackDescriptor, unlocked: bool) -> bool {
    unlocked || !track.is_bonus
}

/// Next playable index after `from`. From no selection, scanning starts at 0.
///
/// `from` itself is the last candidate, so a lone playable track restarts.
pub(crate) fn next_playable(
    tracks: &[TrackDescriptor],
    from: Option<usize>,
    unlocked: bool,
) -> Option<usize> {
    let len = tracks.len();
    if len == 0 {
        return None;
    }
    let origin = from.map(|i| i % len).unwrap_or(len - 1);
    (1..=len)
        .map(|k| (origin + k) % len)
        .find(|&i| playable(&tracks[i], unlocked))
}

/// Previous playable index before `from`. From no selection, scanning starts
/// at the last track.
pub(crate) fn previous_playable(
    tracks: &[TrackDescriptor],
    from: Option<usize>,
    unlocked: bool,
) -> Option<usize> {
    let len = tracks.len();
    if len == 0 {
        return None;
    }
    let origin = from.map(|i| i % len).unwrap_or(0);
    (1..=len)
        .map(|k| (origin + len - k) % len)
        .find(|&i| playable(&tracks[i], unlocked))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::track;

    fn tracks(bonus: &[bool]) -> Vec<TrackDescriptor> {
        bonus
            .iter()
            .enumerate()
            .map(|(i, &b)| track(i as u32 + 1, b))
            .collect()
    }

    #[test]
    fn next_wraps_and_skips_locked_bonus() {
        let t = tracks(&[false, true, false]);
        assert_eq!(next_playable(&t, Some(0), false), Some(2));
        assert_eq!(next_playable(&t, Some(2), false), Some(0));
        assert_eq!(next_playable(&t, Some(0), true), Some(1));
    }

    #[test]
    fn next_skips_runs_of_bonus_tracks() {
        let t = tracks(&[false, true, true, true, false]);
        assert_eq!(next_playable(&t, Some(0), false), Some(4));
        assert_eq!(previous_playable(&t, Some(4), false), Some(0));
    }

    #[test]
    fn previous_wraps_from_start() {
        let t = tracks(&[false, false, false, true]);
        assert_eq!(previous_playable(&t, Some(0), true), Some(3));
        assert_eq!(previous_playable(&t, Some(0), false), Some(2));
    }

    #[test]
    fn no_selection_starts_at_the_edges() {
        let t = tracks(&[true, false, false]);
        assert_eq!(next_playable(&t, None, false), Some(1));
        assert_eq!(previous_playable(&t, None, false), Some(2));
        assert_eq!(next_playable(&t, None, true), Some(0));
    }

    #[test]
    fn all_bonus_while_locked_finds_nothing() {
        let t = tracks(&[true, true]);
        assert_eq!(next_playable(&t, Some(0), false), None);
        assert_eq!(previous_playable(&t, Some(1), false), None);
        assert_eq!(next_playable(&[], None, true), None);
    }

    #[test]
    fn single_playable_track_restarts_itself() {
        let t = tracks(&[true, false, true]);
        assert_eq!(next_playable(&t, Some(1), false), Some(1));
        assert_eq!(previous_playable(&t, Some(1), false), Some(1));
    }
}
