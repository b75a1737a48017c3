//! Engine types
//!
//! Run statistics and per-service output.

/// Statistics for one generation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenStats {
    /// Services processed
    pub services: usize,
    /// Services whose processing failed entirely
    pub services_failed: usize,
    /// Endpoints excluded by configuration
    pub endpoints_skipped: usize,
    /// Actions processed
    pub actions: usize,
    /// Actions whose response generation failed
    pub actions_failed: usize,
    /// Files written to the output directory
    pub files_written: usize,
}

impl GenStats {
    /// Fold a service result into the run totals
    pub fn add_service(&mut self, service: &ServiceModule) {
        self.services += 1;
        self.actions += service.actions;
        self.actions_failed += service.actions_failed;
    }
}

/// The generated module for one endpoint
#[derive(Debug, Clone)]
pub struct ServiceModule {
    /// Endpoint key
    pub endpoint: String,
    /// File name under the output directory
    pub file_name: String,
    /// Rendered module source
    pub content: String,
    /// Actions processed
    pub actions: usize,
    /// Actions whose response generation failed
    pub actions_failed: usize,
}
