//! Notification message text for sensor alert events.
//!
//! Pure formatting glue: given an event and the device's configured name,
//! produce the subject line and body text for an outgoing notification.
//! The device name is passed in explicitly so this module carries no
//! configuration state of its own.

use core::fmt::Write;

use heapless::String;

/// Alert category a notification is raised for.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// A reading crossed the configured maximum.
    ExceedsMax,
    /// A reading crossed the configured minimum.
    ExceedsMin,
    /// The device stopped reporting.
    WentOffline,
    /// The device resumed reporting.
    CameOnline,
    /// The sensor itself is no longer responding.
    Disconnected,
}

/// Subject line and body text for one notification.
#[derive(Debug, PartialEq, Eq)]
pub struct Notification {
    pub subject: String<64>,
    pub body: String<96>,
}

/// Builds the notification text for `event` on the device named
/// `device_name`.
///
/// Overlong device names are truncated at the buffer capacity.
pub fn message(event: Event, device_name: &str) -> Notification {
    let (subject_text, body_text) = match event {
        Event::ExceedsMax => (
            " MAX Temp Warning",
            "  has triggered the maximum temperature range.",
        ),
        Event::ExceedsMin => (
            " MIN Temp Warning",
            "  has triggered the minimum temperature range.",
        ),
        Event::WentOffline => (" Offline Warning", " is now offline."),
        Event::CameOnline => (" Online", " is now online."),
        Event::Disconnected => (" Disconnected Warning", " sensor is disconnected."),
    };

    let mut subject = String::new();
    let mut body = String::new();
    let _ = write!(subject, "{device_name}{subject_text}");
    let _ = write!(body, "{device_name}{body_text}");

    Notification { subject, body }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_range_message() {
        let n = message(Event::ExceedsMax, "Greenhouse");
        assert_eq!(n.subject.as_str(), "Greenhouse MAX Temp Warning");
        assert_eq!(
            n.body.as_str(),
            "Greenhouse  has triggered the maximum temperature range."
        );
    }

    #[test]
    fn test_min_range_message() {
        let n = message(Event::ExceedsMin, "Cellar");
        assert_eq!(n.subject.as_str(), "Cellar MIN Temp Warning");
        assert_eq!(
            n.body.as_str(),
            "Cellar  has triggered the minimum temperature range."
        );
    }

    #[test]
    fn test_presence_messages() {
        let offline = message(Event::WentOffline, "Attic");
        assert_eq!(offline.subject.as_str(), "Attic Offline Warning");
        assert_eq!(offline.body.as_str(), "Attic is now offline.");

        let online = message(Event::CameOnline, "Attic");
        assert_eq!(online.subject.as_str(), "Attic Online");
        assert_eq!(online.body.as_str(), "Attic is now online.");

        let gone = message(Event::Disconnected, "Attic");
        assert_eq!(gone.subject.as_str(), "Attic Disconnected Warning");
        assert_eq!(gone.body.as_str(), "Attic sensor is disconnected.");
    }
}
