use crate::booking::{BookingService, Notifier};
use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

/// Shared state handed to every request handler.
pub(crate) struct AppState<N> {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) mailbox: ScoreMailbox,
    pub(crate) bookings: Arc<BookingService<N>>,
    pub(crate) counsellor_email: String,
}

impl<N> Clone for AppState<N> {
    fn clone(&self) -> Self {
        Self {
            readiness: self.readiness.clone(),
            metrics: self.metrics.clone(),
            mailbox: self.mailbox.clone(),
            bookings: self.bookings.clone(),
            counsellor_email: self.counsellor_email.clone(),
        }
    }
}

impl<N> AppState<N>
where
    N: Notifier + 'static,
{
    pub(crate) fn new(
        metrics: PrometheusHandle,
        notifier: Arc<N>,
        counsellor_email: String,
    ) -> Self {
        Self {
            readiness: Arc::new(AtomicBool::new(false)),
            metrics: Arc::new(metrics),
            mailbox: ScoreMailbox::default(),
            bookings: Arc::new(BookingService::new(notifier)),
            counsellor_email,
        }
    }
}

/// Single-slot hand-off for the latest assessment score, replacing the
/// browser-local storage the dashboard previously read. Publishing
/// overwrites; the first reader takes the value and clears the slot.
#[derive(Default, Clone)]
pub(crate) struct ScoreMailbox {
    slot: Arc<Mutex<Option<u8>>>,
}

impl ScoreMailbox {
    pub(crate) fn publish(&self, score: u8) {
        let mut guard = self.slot.lock().expect("mailbox mutex poisoned");
        *guard = Some(score);
    }

    pub(crate) fn take(&self) -> Option<u8> {
        let mut guard = self.slot.lock().expect("mailbox mutex poisoned");
        guard.take()
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

#[cfg(test)]
pub(crate) mod testing {
    use crate::booking::{EmailMessage, Notifier, NotifyError};
    use std::sync::Mutex;

    /// Captures outbound messages so route tests can assert on them.
    #[derive(Default)]
    pub(crate) struct RecordingNotifier {
        sent: Mutex<Vec<EmailMessage>>,
    }

    impl RecordingNotifier {
        pub(crate) fn sent(&self) -> Vec<EmailMessage> {
            self.sent.lock().expect("notifier mutex poisoned").clone()
        }
    }

    impl Notifier for RecordingNotifier {
        fn send(&self, message: &EmailMessage) -> Result<(), NotifyError> {
            self.sent
                .lock()
                .expect("notifier mutex poisoned")
                .push(message.clone());
            Ok(())
        }
    }
}
