use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::sync::Arc;
use tracing::info;

/// A consultation booking as submitted by the dashboard. Constructed once
/// per submission, handed to the notifier, then discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub user_email: String,
    pub user_name: String,
    pub date: NaiveDate,
    pub time: String,
    #[serde(default)]
    pub notes: String,
    pub counsellor_email: String,
}

/// One outbound message: recipient, subject, and HTML body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

/// Email dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

/// Outbound delivery seam. The production implementation would hand the
/// message to a transactional-email provider; the mock only logs intent.
pub trait Notifier: Send + Sync {
    fn send(&self, message: &EmailMessage) -> Result<(), NotifyError>;
}

/// Mock transport: logs each message instead of delivering it.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn send(&self, message: &EmailMessage) -> Result<(), NotifyError> {
        info!(to = %message.to, subject = %message.subject, "sending email");
        info!(body = %message.html_body, "email content");
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("notification failed: {0}")]
    Notify(#[from] NotifyError),
}

/// Composes the two booking notifications and dispatches them through the
/// configured notifier. Success is declared once both sends resolve; there
/// is no delivery confirmation or retry.
pub struct BookingService<N> {
    notifier: Arc<N>,
}

impl<N> BookingService<N>
where
    N: Notifier + 'static,
{
    pub fn new(notifier: Arc<N>) -> Self {
        Self { notifier }
    }

    pub fn confirm(&self, request: &BookingRequest) -> Result<(), BookingError> {
        self.notifier.send(&confirmation_email(request))?;
        self.notifier.send(&counsellor_alert(request))?;
        Ok(())
    }
}

/// Long-form appointment date, e.g. "Monday, March 2, 2026".
fn format_appointment_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

fn notes_paragraph(label: &str, notes: &str) -> String {
    if notes.is_empty() {
        String::new()
    } else {
        format!("<p><strong>{label}:</strong> {notes}</p>")
    }
}

/// Confirmation message sent to the person who booked.
pub fn confirmation_email(request: &BookingRequest) -> EmailMessage {
    let appointment_date = format_appointment_date(request.date);
    let mut body = String::new();
    let _ = write!(
        body,
        "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">\
         <h2 style=\"color: #4f46e5;\">Consultation Confirmed</h2>\
         <p>Dear {},</p>\
         <p>Your mental health consultation has been successfully booked.</p>\
         <div style=\"background-color: #f3f4f6; padding: 16px; border-radius: 8px; margin: 16px 0;\">\
         <p><strong>Date:</strong> {}</p>\
         <p><strong>Time:</strong> {}</p>\
         {}\
         </div>\
         <p>You will receive a reminder before your appointment.</p>\
         <p>If you need to reschedule or cancel, please contact us at least 24 hours in advance.</p>\
         <br />\
         <p>Best regards,<br />Mental Health Support Team</p>\
         </div>",
        request.user_name,
        appointment_date,
        request.time,
        notes_paragraph("Your notes", &request.notes),
    );

    EmailMessage {
        to: request.user_email.clone(),
        subject: "Your Consultation Booking Confirmation".to_string(),
        html_body: body,
    }
}

/// Alert message sent to the counsellor handling the slot.
pub fn counsellor_alert(request: &BookingRequest) -> EmailMessage {
    let appointment_date = format_appointment_date(request.date);
    let mut body = String::new();
    let _ = write!(
        body,
        "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">\
         <h2 style=\"color: #4f46e5;\">New Booking Notification</h2>\
         <p>You have a new consultation booking:</p>\
         <div style=\"background-color: #f3f4f6; padding: 16px; border-radius: 8px; margin: 16px 0;\">\
         <p><strong>Client:</strong> {} ({})</p>\
         <p><strong>Date:</strong> {}</p>\
         <p><strong>Time:</strong> {}</p>\
         {}\
         </div>\
         <p>Please confirm your availability for this timeslot.</p>\
         <br />\
         <p>Best regards,<br />Mental Health Support Team</p>\
         </div>",
        request.user_name,
        request.user_email,
        appointment_date,
        request.time,
        notes_paragraph("Client notes", &request.notes),
    );

    EmailMessage {
        to: request.counsellor_email.clone(),
        subject: "New Consultation Booking".to_string(),
        html_body: body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<EmailMessage>>,
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

    struct FailingNotifier;

    impl Notifier for FailingNotifier {
        fn send(&self, _message: &EmailMessage) -> Result<(), NotifyError> {
            Err(NotifyError::Transport("smtp socket closed".to_string()))
        }
    }

    fn sample_request(notes: &str) -> BookingRequest {
        BookingRequest {
            user_email: "student@example.com".to_string(),
            user_name: "Asha Rao".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date"),
            time: "10:00 - 11:00".to_string(),
            notes: notes.to_string(),
            counsellor_email: "counsellor@example.com".to_string(),
        }
    }

    #[test]
    fn confirm_sends_requester_then_counsellor() {
        let notifier = Arc::new(RecordingNotifier::default());
        let service = BookingService::new(notifier.clone());

        service.confirm(&sample_request("")).expect("booking succeeds");

        let sent = notifier.sent.lock().expect("notifier mutex poisoned");
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].to, "student@example.com");
        assert_eq!(sent[0].subject, "Your Consultation Booking Confirmation");
        assert_eq!(sent[1].to, "counsellor@example.com");
        assert_eq!(sent[1].subject, "New Consultation Booking");
    }

    #[test]
    fn bodies_carry_the_long_form_date_and_time() {
        let message = confirmation_email(&sample_request(""));
        assert!(message.html_body.contains("Monday, March 2, 2026"));
        assert!(message.html_body.contains("10:00 - 11:00"));
        assert!(message.html_body.contains("Dear Asha Rao"));
    }

    #[test]
    fn notes_section_only_renders_when_present() {
        let without = counsellor_alert(&sample_request(""));
        assert!(!without.html_body.contains("Client notes"));

        let with = counsellor_alert(&sample_request("exam stress"));
        assert!(with
            .html_body
            .contains("<p><strong>Client notes:</strong> exam stress</p>"));
    }

    #[test]
    fn transport_failure_surfaces_as_booking_error() {
        let service = BookingService::new(Arc::new(FailingNotifier));
        let err = service
            .confirm(&sample_request(""))
            .expect_err("transport down");
        assert!(matches!(err, BookingError::Notify(_)));
    }

    #[test]
    fn wire_format_uses_camel_case_and_iso_dates() {
        let raw = r#"{
            "userEmail": "student@example.com",
            "userName": "Asha Rao",
            "date": "2026-03-02",
            "time": "10:00 - 11:00",
            "counsellorEmail": "counsellor@example.com"
        }"#;
        let request: BookingRequest = serde_json::from_str(raw).expect("valid payload");
        assert_eq!(request.user_name, "Asha Rao");
        assert_eq!(request.notes, "", "missing notes default to empty");
        assert_eq!(
            request.date,
            NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date")
        );
    }
}
