use console::{style, Term};

use crate::markup::text_content;
use crate::viewer::{NotificationKind, Notifier};

/// Prints notifications as styled lines on stderr.
pub struct ConsoleNotifier {
    term: Term,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }
}

impl Default for ConsoleNotifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Terminal line for a notification.
///
/// Messages arrive escaped for HTML hosts, so entities are decoded first.
fn notification_line(kind: NotificationKind, message: &str) -> String {
    let message = text_content(message);
    match kind {
        NotificationKind::Success => format!("{} {}", style("✓").green(), message),
        NotificationKind::Error => format!("{} {}", style("✗").red(), style(message).red()),
        NotificationKind::Info => format!("{} {}", style("i").cyan(), message),
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, kind: NotificationKind, message: &str) {
        let _ = self.term.write_line(&notification_line(kind, message));
    }
}
