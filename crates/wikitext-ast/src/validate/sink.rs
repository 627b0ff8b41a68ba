//! Sinks receiving findings while a tree is validated.

use super::Finding;

/// Trait used by the validator to stream findings as they are produced.
pub trait FindingSink {
    /// Receive one finding.
    fn emit(&mut self, finding: &Finding);
}

/// A no-op sink used when the caller only needs the returned result.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl FindingSink for NullSink {
    fn emit(&mut self, _: &Finding) {}
}

/// Sink that stores findings for later inspection.
#[derive(Debug, Default, Clone)]
pub struct VecSink {
    findings: Vec<Finding>,
}

impl VecSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Findings received so far.
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Consume the sink, returning the stored findings.
    pub fn into_inner(self) -> Vec<Finding> {
        self.findings
    }
}

impl FindingSink for VecSink {
    fn emit(&mut self, finding: &Finding) {
        self.findings.push(finding.clone());
    }
}
