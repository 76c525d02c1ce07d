use super::step::Step;
use super::FlowError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepperStatus {
    Running,
    Completed,
    Cancelled,
}

/// Walks a step list forward, one step at a time.
#[derive(Debug, Clone)]
pub struct Stepper {
    steps: Vec<Step>,
    index: usize,
    status: StepperStatus,
}

impl Stepper {
    pub fn new(steps: Vec<Step>) -> Self {
        let status = if steps.is_empty() {
            StepperStatus::Completed
        } else {
            StepperStatus::Running
        };
        Self {
            steps,
            index: 0,
            status,
        }
    }

    pub fn status(&self) -> StepperStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == StepperStatus::Running
    }

    /// Active step, if the run is still going.
    pub fn current(&self) -> Option<&Step> {
        if self.is_running() {
            self.steps.get(self.index)
        } else {
            None
        }
    }

    /// 1-based position of the active step and the step count.
    pub fn position(&self) -> (usize, usize) {
        ((self.index + 1).min(self.steps.len()), self.steps.len())
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.steps.len()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Move to the next step. Advancing past the last step completes the run.
    pub fn advance(&mut self) -> Result<Option<&Step>, FlowError> {
        if !self.is_running() {
            return Err(FlowError::NotRunning);
        }
        if self.is_last() {
            self.status = StepperStatus::Completed;
            tracing::debug!("stepper completed");
            return Ok(None);
        }
        self.index += 1;
        Ok(self.steps.get(self.index))
    }

    pub fn cancel(&mut self) {
        if self.is_running() {
            tracing::debug!(step = self.index, "stepper cancelled");
            self.status = StepperStatus::Cancelled;
        }
    }
}
