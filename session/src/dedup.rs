use std::collections::HashSet;

use corelib::{Notification, NotificationSink};
use tracing::{debug, warn};

/// Suppresses re-emission of a message already sent this session.
///
/// Matching is on the exact message string. The set only grows; its size
/// is bounded by the alert vocabulary.
#[derive(Debug, Default, Clone)]
pub struct NotificationDeduper {
    sent: HashSet<String>,
}

impl NotificationDeduper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits through `sink` unless the message was offered before.
    /// Returns whether emission happened.
    ///
    /// A sink failure is logged; the message stays recorded.
    pub fn offer(&mut self, notification: &Notification, sink: &dyn NotificationSink) -> bool {
        if !self.sent.insert(notification.message.clone()) {
            debug!(message = %notification.message, "duplicate notification suppressed");
            return false;
        }

        if let Err(e) = sink.notify(notification) {
            warn!(error = ?e, message = %notification.message, "notification sink failed");
        }

        true
    }

    pub fn has_sent(&self, message: &str) -> bool {
        self.sent.contains(message)
    }

    pub fn len(&self) -> usize {
        self.sent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sent.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use corelib::AlertIcon;

    use super::*;

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<String>>,
        fail: bool,
    }

    impl NotificationSink for Recorder {
        fn notify(&self, n: &Notification) -> anyhow::Result<()> {
            self.seen.lock().unwrap().push(n.message.clone());
            if self.fail {
                anyhow::bail!("display unavailable");
            }
            Ok(())
        }
    }

    fn note(message: &str) -> Notification {
        Notification {
            title: "Findicate".into(),
            message: message.into(),
            icon: AlertIcon::Neutral,
            display_seconds: 20,
        }
    }

    #[test]
    fn same_message_is_emitted_once() {
        let sink = Recorder::default();
        let mut dedup = NotificationDeduper::new();

        assert!(dedup.offer(&note("ALERT: GOLDEN CROSS"), &sink));
        assert!(!dedup.offer(&note("ALERT: GOLDEN CROSS"), &sink));

        assert_eq!(*sink.seen.lock().unwrap(), vec!["ALERT: GOLDEN CROSS"]);
        assert_eq!(dedup.len(), 1);
    }

    #[test]
    fn distinct_messages_both_emit() {
        let sink = Recorder::default();
        let mut dedup = NotificationDeduper::new();

        assert!(dedup.offer(&note("+10% INTRADAY MOVE"), &sink));
        assert!(dedup.offer(&note("-10% INTRADAY MOVE"), &sink));

        assert_eq!(sink.seen.lock().unwrap().len(), 2);
    }

    #[test]
    fn equality_is_exact_string_match() {
        let sink = Recorder::default();
        let mut dedup = NotificationDeduper::new();

        assert!(dedup.offer(&note("+10% INTRADAY MOVE"), &sink));
        assert!(dedup.offer(&note("+10.0% INTRADAY MOVE"), &sink));
        assert!(dedup.offer(&note("+10% intraday move"), &sink));

        assert_eq!(dedup.len(), 3);
    }

    #[test]
    fn failed_delivery_still_counts_as_sent() {
        let sink = Recorder {
            fail: true,
            ..Recorder::default()
        };
        let mut dedup = NotificationDeduper::new();

        assert!(dedup.offer(&note("HIGHER THAN AVERAGE DAILY VOLUME"), &sink));
        assert!(dedup.has_sent("HIGHER THAN AVERAGE DAILY VOLUME"));
        assert!(!dedup.offer(&note("HIGHER THAN AVERAGE DAILY VOLUME"), &sink));
        assert_eq!(sink.seen.lock().unwrap().len(), 1);
    }
}
