//! Blocking bridge for pending pipes

use crate::core::error::Error;
use std::future::Future;
use tokio::runtime::{Builder, Handle, RuntimeFlavor};
use tracing::debug;

/// Drive `future` to completion on the calling thread.
///
/// Outside a tokio runtime a private current-thread runtime is started for
/// the duration of the call. Inside a multi-thread runtime the worker is
/// handed over with `block_in_place`. A current-thread runtime cannot be
/// blocked without deadlocking, so that case is an error.
pub(crate) fn block_on<F: Future>(future: F) -> Result<F::Output, Error> {
    match Handle::try_current() {
        Ok(handle) => match handle.runtime_flavor() {
            RuntimeFlavor::CurrentThread => Err(Error::BlockingInCurrentThread),
            _ => {
                debug!("Blocking on pending pipe inside multi-thread runtime");
                Ok(tokio::task::block_in_place(|| handle.block_on(future)))
            }
        },
        Err(_) => {
            debug!("Starting current-thread runtime for pending pipe");
            let runtime = Builder::new_current_thread().enable_all().build()?;
            Ok(runtime.block_on(future))
        }
    }
}
