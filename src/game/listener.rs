//! Outbound collaborator interface.
//!
//! The controller never renders anything itself. It reports activations and
//! text updates to a `GameListener`, which may drive lights, sounds, a
//! terminal, or a test log.

use serde::{Deserialize, Serialize};

use crate::core::Signal;

/// Receiver of everything the controller wants shown or played.
pub trait GameListener {
    /// Show/play one signal: a playback step or an accepted input echo.
    fn on_activate(&mut self, signal: Signal);

    /// End of a playback step's visible duration.
    fn on_deactivate(&mut self, _signal: Signal) {}

    /// Human-readable status line.
    fn on_status_changed(&mut self, message: &str);

    /// Banner text (round counter, title).
    fn on_heading_changed(&mut self, _message: &str) {}

    /// A game finished. Fired exactly once per game.
    fn on_game_ended(&mut self, won: bool, message: &str);
}

impl<L: GameListener + ?Sized> GameListener for &mut L {
    fn on_activate(&mut self, signal: Signal) {
        (**self).on_activate(signal);
    }

    fn on_deactivate(&mut self, signal: Signal) {
        (**self).on_deactivate(signal);
    }

    fn on_status_changed(&mut self, message: &str) {
        (**self).on_status_changed(message);
    }

    fn on_heading_changed(&mut self, message: &str) {
        (**self).on_heading_changed(message);
    }

    fn on_game_ended(&mut self, won: bool, message: &str) {
        (**self).on_game_ended(won, message);
    }
}

impl<L: GameListener + ?Sized> GameListener for Box<L> {
    fn on_activate(&mut self, signal: Signal) {
        (**self).on_activate(signal);
    }

    fn on_deactivate(&mut self, signal: Signal) {
        (**self).on_deactivate(signal);
    }

    fn on_status_changed(&mut self, message: &str) {
        (**self).on_status_changed(message);
    }

    fn on_heading_changed(&mut self, message: &str) {
        (**self).on_heading_changed(message);
    }

    fn on_game_ended(&mut self, won: bool, message: &str) {
        (**self).on_game_ended(won, message);
    }
}

/// Listener that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullListener;

impl GameListener for NullListener {
    fn on_activate(&mut self, _signal: Signal) {}
    fn on_status_changed(&mut self, _message: &str) {}
    fn on_game_ended(&mut self, _won: bool, _message: &str) {}
}

/// One outbound notification, as recorded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListenerEvent {
    Activate(Signal),
    Deactivate(Signal),
    Status(String),
    Heading(String),
    GameEnded { won: bool, message: String },
}

/// Listener that keeps every notification in order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordingListener {
    pub events: Vec<ListenerEvent>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signals activated so far, in order.
    #[must_use]
    pub fn activations(&self) -> Vec<Signal> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ListenerEvent::Activate(s) => Some(*s),
                _ => None,
            })
            .collect()
    }

    /// Most recent status line.
    #[must_use]
    pub fn last_status(&self) -> Option<&str> {
        self.events.iter().rev().find_map(|e| match e {
            ListenerEvent::Status(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Most recent heading.
    #[must_use]
    pub fn last_heading(&self) -> Option<&str> {
        self.events.iter().rev().find_map(|e| match e {
            ListenerEvent::Heading(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Every game-ended notification.
    #[must_use]
    pub fn endings(&self) -> Vec<(bool, &str)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ListenerEvent::GameEnded { won, message } => Some((*won, message.as_str())),
                _ => None,
            })
            .collect()
    }

    /// Forget recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl GameListener for RecordingListener {
    fn on_activate(&mut self, signal: Signal) {
        self.events.push(ListenerEvent::Activate(signal));
    }

    fn on_deactivate(&mut self, signal: Signal) {
        self.events.push(ListenerEvent::Deactivate(signal));
    }

    fn on_status_changed(&mut self, message: &str) {
        self.events.push(ListenerEvent::Status(message.to_string()));
    }

    fn on_heading_changed(&mut self, message: &str) {
        self.events.push(ListenerEvent::Heading(message.to_string()));
    }

    fn on_game_ended(&mut self, won: bool, message: &str) {
        self.events.push(ListenerEvent::GameEnded {
            won,
            message: message.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_listener() {
        let mut listener = RecordingListener::new();
        listener.on_heading_changed("Round 1 of 8");
        listener.on_activate(Signal::new(2));
        listener.on_deactivate(Signal::new(2));
        listener.on_status_changed("first");
        listener.on_status_changed("second");
        listener.on_game_ended(false, "over");

        assert_eq!(listener.activations(), vec![Signal::new(2)]);
        assert_eq!(listener.last_status(), Some("second"));
        assert_eq!(listener.last_heading(), Some("Round 1 of 8"));
        assert_eq!(listener.endings(), vec![(false, "over")]);

        listener.clear();
        assert!(listener.events.is_empty());
    }

    #[test]
    fn test_forwarding_through_mut_ref() {
        fn drive<L: GameListener>(mut listener: L) {
            listener.on_activate(Signal::new(1));
            listener.on_heading_changed("Simon Says");
        }

        let mut listener = RecordingListener::new();
        drive(&mut listener);
        assert_eq!(
            listener.events,
            vec![
                ListenerEvent::Activate(Signal::new(1)),
                ListenerEvent::Heading("Simon Says".to_string()),
            ]
        );
    }

    #[test]
    fn test_default_methods_are_noops() {
        let mut null = NullListener;
        null.on_deactivate(Signal::new(0));
        null.on_heading_changed("ignored");
    }
}
