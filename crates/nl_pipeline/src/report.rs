use nl_core::{Error, Result};

/// Per-url outcomes of a batch operation, in store order.
#[derive(Debug, Default)]
pub struct BatchReport {
    outcomes: Vec<(String, Result<()>)>,
}

impl BatchReport {
    pub fn push(&mut self, url: impl Into<String>, outcome: Result<()>) {
        self.outcomes.push((url.into(), outcome));
    }

    pub fn urls(&self) -> Vec<&str> {
        self.outcomes.iter().map(|(url, _)| url.as_str()).collect()
    }

    pub fn outcomes(&self) -> &[(String, Result<()>)] {
        &self.outcomes
    }

    pub fn outcome(&self, url: &str) -> Option<&Result<()>> {
        self.outcomes
            .iter()
            .find(|(candidate, _)| candidate == url)
            .map(|(_, outcome)| outcome)
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &Error)> {
        self.outcomes
            .iter()
            .filter_map(|(url, outcome)| outcome.as_ref().err().map(|e| (url.as_str(), e)))
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|(_, outcome)| outcome.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}
