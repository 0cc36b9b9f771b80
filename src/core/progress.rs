use crate::domain::model::ProcessingProgress;
use crate::domain::ports::{Notifier, StepPacer};
use std::time::Duration;

/// Sleeps on the tokio timer between steps.
#[derive(Debug, Clone, Copy)]
pub struct TokioPacer {
    delay: Duration,
}

impl TokioPacer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for TokioPacer {
    fn default() -> Self {
        Self::new(Duration::from_millis(2000))
    }
}

impl StepPacer for TokioPacer {
    async fn pause(&self, step_index: usize) {
        tracing::trace!("Pausing {:?} after step {}", self.delay, step_index);
        tokio::time::sleep(self.delay).await;
    }
}

/// Plays the step animation from the current index to the last step.
///
/// Runs purely on the pacer; it knows nothing about the analysis request it
/// is displayed alongside.
pub async fn run_steps<P: StepPacer, N: Notifier>(
    pacer: &P,
    notifier: &N,
    progress: &mut ProcessingProgress,
) {
    notifier.progress(progress);

    while !progress.is_last() {
        pacer.pause(progress.step_index).await;
        progress.advance();
        tracing::debug!("⏳ Step {}: {}", progress.position(), progress.step_name());
        notifier.progress(progress);
    }
}
