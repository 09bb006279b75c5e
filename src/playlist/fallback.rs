use super::model::TrackDescriptor;

const BUILT_IN: [(u32, &str, &str, u32, bool); 8] = [
    (1, "NAH!", "audio/track1.mp3", 204, false),
    (2, "PUNGUZA STRESS", "audio/track2.mp3", 178, false),
    (3, "NIKO FRESH", "audio/track3.mp3", 192, false),
    (4, "FASHION", "audio/track4.mp3", 165, false),
    (5, "FASTER,", "audio/track5.mp3", 181, false),
    (6, "LOVE", "audio/track6.mp3", 210, false),
    (7, "BOSSY", "audio/track7.mp3", 172, false),
    (8, "???", "audio/bonus.mp3", 225, true),
];

/// The album track list shipped with the player, used when the endpoint fails.
pub fn built_in_tracks() -> Vec<TrackDescriptor> {
    BUILT_IN
        .iter()
        .map(|&(number, title, audio, secs, is_bonus)| TrackDescriptor {
            number,
            title: title.to_string(),
            audio_location: audio.to_string(),
            duration_seconds: Some(secs as f64),
            is_bonus,
        })
        .collect()
}
