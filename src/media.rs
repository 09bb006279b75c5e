//! Media playback primitive.
//!
//! The player and the preview view drive audio only through the
//! [`MediaElement`] trait. `RodioMedia` is the production implementation;
//! playback start is asynchronous and answered with a
//! [`MediaEvent::PlayResolved`] carrying the request's ticket.

mod player;
mod source;
mod thread;
mod types;

pub use player::RodioMedia;
pub use source::resolve_location;
pub use types::{LoadId, MediaEvent, PlayTicket};

pub trait MediaElement {
    /// Replace the current media with `uri`, paused at zero. Later progress
    /// notifications are stamped with `load`.
    fn load(&mut self, uri: &str, load: LoadId);
    /// Request playback; the outcome arrives later as `PlayResolved { ticket, .. }`.
    fn play(&mut self, ticket: PlayTicket);
    fn pause(&mut self);
    fn current_time(&self) -> f64;
    fn set_current_time(&mut self, secs: f64);
    fn duration(&self) -> Option<f64>;
    fn set_volume(&mut self, level: f32);
}
