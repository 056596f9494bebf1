use chrono::NaiveDate;
use mindwell::assessment::{
    score_answers, wellness_score, AssessmentProgress, AssessmentSession, Questionnaire,
    Recommendation,
};
use mindwell::booking::{BookingRequest, BookingService, EmailMessage, Notifier, NotifyError};
use mindwell::scheduling::{availability_grid, group_by_date, SeededAvailability};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct RecordingNotifier {
    sent: Mutex<Vec<EmailMessage>>,
}

impl RecordingNotifier {
    fn sent(&self) -> Vec<EmailMessage> {
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

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date")
}

#[test]
fn high_scoring_assessment_leads_to_a_confirmed_booking() {
    // The user works through the questionnaire, backtracking once.
    let mut session = AssessmentSession::new(Questionnaire::standard());
    session.record(0, 3).expect("answer recorded");
    session.record(1, 2).expect("answer recorded");
    session.previous();
    session.record(1, 3).expect("revised answer recorded");
    session.record(2, 3).expect("answer recorded");
    session.record(3, 2).expect("answer recorded");
    let progress = session.record(4, 1).expect("final answer recorded");

    let outcome = match progress {
        AssessmentProgress::Complete(outcome) => outcome,
        other => panic!("expected a completed assessment, got {other:?}"),
    };
    assert_eq!(outcome.score, 12);
    assert_eq!(outcome.recommendation, Recommendation::ProfessionalSupport);
    assert_eq!(wellness_score(outcome.score), 76);

    // They pick the first open slot from the weekly grid.
    let mut sampler = SeededAvailability::new(99, 0.7);
    let grid = availability_grid(monday(), &mut sampler);
    let days = group_by_date(&grid);
    assert_eq!(days.len(), 5, "Monday anchor yields a Mon-Fri week");

    let slot = grid
        .iter()
        .find(|slot| slot.available)
        .expect("seeded grid offers at least one open slot");

    // Booking triggers confirmation and counsellor alert, then succeeds.
    let notifier = Arc::new(RecordingNotifier::default());
    let bookings = BookingService::new(notifier.clone());
    let request = BookingRequest {
        user_email: "student@example.com".to_string(),
        user_name: "Asha Rao".to_string(),
        date: slot.date,
        time: slot.time_label(),
        notes: "Scored high on the wellness check".to_string(),
        counsellor_email: "counsellor@example.com".to_string(),
    };

    bookings.confirm(&request).expect("well-formed booking succeeds");

    let sent = notifier.sent();
    assert_eq!(sent.len(), 2, "requester confirmation plus counsellor alert");
    assert_eq!(sent[0].to, "student@example.com");
    assert_eq!(sent[1].to, "counsellor@example.com");
    assert!(sent[0].html_body.contains(&slot.time_label()));
    assert!(sent[1]
        .html_body
        .contains("Asha Rao (student@example.com)"));
}

#[test]
fn low_scoring_assessment_stays_on_the_doing_well_path() {
    let outcome =
        score_answers(&Questionnaire::standard(), &[1, 0, 2, 1, 0]).expect("valid answers");
    assert_eq!(outcome.score, 4);
    assert_eq!(outcome.recommendation, Recommendation::DoingWell);
    assert_eq!(wellness_score(outcome.score), 92);
}

#[test]
fn every_completed_answer_set_scores_within_bounds() {
    let questionnaire = Questionnaire::standard();
    for pattern in [[0u8; 5], [3u8; 5], [2, 1, 3, 0, 2]] {
        let outcome = score_answers(&questionnaire, &pattern).expect("valid answers");
        let expected: u8 = pattern.iter().sum();
        assert_eq!(outcome.score, expected);
        assert!(outcome.score <= questionnaire.max_score());
        assert_eq!(
            outcome.recommendation == Recommendation::ProfessionalSupport,
            outcome.score >= 10,
            "recommendation iff score reaches the threshold"
        );
    }
}
