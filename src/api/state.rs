//! Application state for the payroll API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::processor::PayrollProcessor;
use crate::store::PayrollStore;

/// Shared application state.
///
/// Holds the payroll processor, shared by every request handler.
pub struct AppState<S> {
    processor: Arc<PayrollProcessor<S>>,
}

impl<S: PayrollStore> AppState<S> {
    /// Creates a new application state around a processor.
    pub fn new(processor: PayrollProcessor<S>) -> Self {
        Self {
            processor: Arc::new(processor),
        }
    }

    /// Returns the shared processor.
    pub fn processor(&self) -> &Arc<PayrollProcessor<S>> {
        &self.processor
    }
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            processor: Arc::clone(&self.processor),
        }
    }
}
