//! Outbound notifications.

mod cancellation;
mod dispatcher;

pub use cancellation::CancellationEmail;
pub use dispatcher::{MailQueueDispatcher, NotificationDispatcher};

#[cfg(any(test, feature = "test-utils"))]
pub use dispatcher::MockNotificationDispatcher;
