//! Parse configuration.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::{Error, Result};

/// Cooperative cancellation signal shared between a caller and a parse.
///
/// Branches check it every time they consume a token.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        CancellationToken::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub(crate) fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(Error::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Options for a single top-level parse.
#[derive(Clone, Debug)]
pub struct ParseOptions {
    /// Discard survivors that stopped before the end of input.
    pub require_end_of_input: bool,
    /// Fan sibling attempts out on the rayon pool.
    pub parallel: bool,
    pub cancellation: Option<CancellationToken>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            require_end_of_input: true,
            parallel: true,
            cancellation: None,
        }
    }
}

impl ParseOptions {
    /// Keep survivors that matched a prefix of the input.
    #[must_use]
    pub fn allow_partial(mut self) -> Self {
        self.require_end_of_input = false;
        self
    }

    /// Run every sibling attempt on the calling thread.
    #[must_use]
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub(crate) fn check_cancelled(&self) -> Result<()> {
        match &self.cancellation {
            Some(token) => token.check(),
            None => Ok(()),
        }
    }
}
