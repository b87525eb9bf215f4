//! Appointment cancellation email.

use crate::config::CANCELLATION_SUBJECT;
use crate::domain::{AppointmentKind, CancellationNotice};
use crate::jobs::EmailJob;

/// Rendered cancellation email for one notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancellationEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl CancellationEmail {
    pub fn render(notice: &CancellationNotice) -> Self {
        let kind = match notice.appointment_kind {
            AppointmentKind::InPerson => "in-person",
            AppointmentKind::Remote => "remote",
        };

        let body = format!(
            "Hello {name},\n\n\
             Your {kind} appointment scheduled for {date} at {time} (UTC) has been canceled.\n\
             Reason: {reason}.\n\n\
             If you have any questions, please contact the clinic. \
             We apologize for the inconvenience.\n",
            name = notice.recipient.name,
            kind = kind,
            date = notice.scheduled_at.format("%d/%m/%Y"),
            time = notice.scheduled_at.format("%H:%M"),
            reason = notice.reason,
        );

        Self {
            to: notice.recipient.email.clone(),
            subject: CANCELLATION_SUBJECT.to_string(),
            body,
        }
    }

    pub fn into_job(self) -> EmailJob {
        EmailJob::new(self.to, self.subject, self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CanceledBy, Recipient};
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    #[test]
    fn test_render_includes_date_time_and_reason() {
        let notice = CancellationNotice {
            recipient: Recipient {
                account_id: Uuid::new_v4(),
                email: "ana@example.com".to_string(),
                name: "Ana".to_string(),
            },
            appointment_id: Uuid::new_v4(),
            scheduled_at: Utc.with_ymd_and_hms(2026, 11, 3, 9, 30, 0).unwrap(),
            appointment_kind: AppointmentKind::Remote,
            reason: "the specialist has been offboarded".to_string(),
            canceled_by: CanceledBy::Specialist,
        };

        let email = CancellationEmail::render(&notice);

        assert_eq!(email.to, "ana@example.com");
        assert_eq!(email.subject, "Appointment canceled");
        assert!(email.body.starts_with("Hello Ana,"));
        assert!(email.body.contains("remote appointment scheduled for 03/11/2026 at 09:30"));
        assert!(email.body.contains("Reason: the specialist has been offboarded."));

        let job = email.into_job();
        assert_eq!(job.to, "ana@example.com");
        assert_eq!(job.subject, "Appointment canceled");
    }
}
