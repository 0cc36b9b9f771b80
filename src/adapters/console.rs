use crate::core::presentation::render_progress;
use crate::domain::model::{Notification, ProcessingProgress, WorkflowState};
use crate::domain::ports::Notifier;

/// Prints notifications and processing steps to the terminal.
#[derive(Debug, Clone, Default)]
pub struct ConsoleNotifier {
    show_steps: bool,
}

impl ConsoleNotifier {
    pub fn new(show_steps: bool) -> Self {
        Self { show_steps }
    }

    pub fn format(notification: &Notification) -> String {
        let icon = if notification.is_failure() { "❌" } else { "✅" };
        format!("{} {}: {}", icon, notification.title, notification.description)
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: &Notification) {
        let line = Self::format(notification);
        if notification.is_failure() {
            tracing::warn!("{}", line);
            eprintln!("{}", line);
        } else {
            tracing::info!("{}", line);
            println!("{}", line);
        }
    }

    fn progress(&self, progress: &ProcessingProgress) {
        if self.show_steps {
            println!("\n{}", render_progress(progress));
        } else {
            println!(
                "⏳ {} ({}) - {}",
                progress.step_name(),
                progress.position(),
                progress.step_description()
            );
        }
    }

    fn transition(&self, from: WorkflowState, to: WorkflowState) {
        tracing::debug!("Screen changed from {} to {}", from, to);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_marks_failures() {
        let failure = Notification::failure("Files Required", "Please upload both files.");
        let success = Notification::info("Analysis Complete", "Done.");

        assert_eq!(
            ConsoleNotifier::format(&failure),
            "❌ Files Required: Please upload both files."
        );
        assert_eq!(ConsoleNotifier::format(&success), "✅ Analysis Complete: Done.");
    }
}
