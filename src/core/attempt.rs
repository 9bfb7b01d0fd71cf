//! Protected invocation of fallible step code
//!
//! [`attempt`] and [`attempt_async`] run a call and turn every way it can fail
//! into an ordinary [`StepError`] value:
//!
//! - a returned `Err(e)` keeps `e` as the original error, its short type name
//!   as the kind and the step's registration site as the location;
//! - a panic (including a failed `assert!`) is caught, its message kept, and
//!   the location of the panic itself recorded.
//!
//! Panic locations are collected by a process panic hook that is installed
//! once and only remembers the last location per thread. Panics raised while
//! a step is being run are captured silently; any other panic is forwarded to
//! the previously installed hook.

use crate::core::error::{Inconclusive, SourceLocation, StepError};
use futures::FutureExt;
use std::any::Any;
use std::cell::{Cell, RefCell};
use std::future::Future;
use std::panic::{self, AssertUnwindSafe, Location};
use std::pin::pin;
use std::sync::Once;

/// Outcome of one protected call
pub type Attempt<T> = Result<T, StepError>;

thread_local! {
    static LAST_PANIC: RefCell<Option<SourceLocation>> = const { RefCell::new(None) };
    static CAPTURING: Cell<usize> = const { Cell::new(0) };
}

static HOOK: Once = Once::new();

fn install_panic_hook() {
    HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let location = info.location().map(SourceLocation::from_location);
            LAST_PANIC.with(|last| *last.borrow_mut() = location);
            if !is_capturing() {
                previous(info);
            }
        }));
    });
}

/// Marks the current thread as running step code while alive
struct CaptureGuard;

impl CaptureGuard {
    fn enter() -> Self {
        CAPTURING.with(|depth| depth.set(depth.get() + 1));
        CaptureGuard
    }
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        CAPTURING.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

fn is_capturing() -> bool {
    CAPTURING.with(|depth| depth.get() > 0)
}

fn take_panic_location() -> Option<SourceLocation> {
    LAST_PANIC.with(|last| last.borrow_mut().take())
}

/// Run `f`, capturing a returned error or a panic as a [`StepError`]
pub fn attempt<R, E, F>(f: F, site: &'static Location<'static>) -> Attempt<R>
where
    F: FnOnce() -> Result<R, E>,
    E: Into<anyhow::Error>,
{
    install_panic_hook();
    take_panic_location();
    let caught = {
        let _guard = CaptureGuard::enter();
        panic::catch_unwind(AssertUnwindSafe(f))
    };
    match caught {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(error)) => Err(capture_error::<E>(error.into(), site)),
        Err(payload) => Err(capture_panic(payload, site)),
    }
}

/// Run the future produced by `f`, capturing a returned error or a panic
/// raised while creating or polling it
pub async fn attempt_async<R, E, F, Fut>(f: F, site: &'static Location<'static>) -> Attempt<R>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<R, E>>,
    E: Into<anyhow::Error>,
{
    install_panic_hook();
    take_panic_location();
    let created = {
        let _guard = CaptureGuard::enter();
        panic::catch_unwind(AssertUnwindSafe(f))
    };
    let future = match created {
        Ok(future) => future,
        Err(payload) => return Err(capture_panic(payload, site)),
    };

    // Only the step's own polls are marked; other tasks sharing the thread
    // between polls keep the regular hook.
    let mut guarded = pin!(AssertUnwindSafe(future).catch_unwind());
    let polled = futures::future::poll_fn(|cx| {
        let _guard = CaptureGuard::enter();
        guarded.as_mut().poll(cx)
    })
    .await;

    match polled {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(error)) => Err(capture_error::<E>(error.into(), site)),
        Err(payload) => Err(capture_panic(payload, site)),
    }
}

fn capture_error<E>(error: anyhow::Error, site: &'static Location<'static>) -> StepError {
    let kind = if error.is::<Inconclusive>() {
        "Inconclusive".to_string()
    } else {
        short_type_name(std::any::type_name::<E>()).to_string()
    };

    StepError::new(kind, error.to_string())
        .with_location(SourceLocation::from_location(site))
        .with_source(error)
}

fn capture_panic(payload: Box<dyn Any + Send>, site: &'static Location<'static>) -> StepError {
    let location = take_panic_location().unwrap_or_else(|| SourceLocation::from_location(site));

    let payload = match payload.downcast::<Inconclusive>() {
        Ok(marker) => {
            let marker = *marker;
            return StepError::new("Inconclusive", marker.reason())
                .with_location(location)
                .with_source(anyhow::Error::new(marker));
        }
        Err(payload) => payload,
    };

    let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Box<dyn Any>".to_string()
    };

    StepError::new("panic", message).with_location(location)
}

/// `alloc::string::String` -> `String`, `my::Wrapper<u8>` -> `Wrapper`
pub(crate) fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
