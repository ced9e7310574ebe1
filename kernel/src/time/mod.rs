// SPDX-License-Identifier: MPL-2.0

//! Time keeping for fiber accounting.

use crate::prelude::*;

/// A trait that can abstract clocks which have the ability to read time.
pub trait Clock: Send + Sync {
    /// Read the current time of this clock.
    fn read_time(&self) -> Duration;
}

static CLOCK: Once<Arc<dyn Clock>> = Once::new();

/// Registers the system clock source.
///
/// Called once by [`crate::init`]; later calls are ignored. Fiber running-time
/// accounting is expressed in this clock's domain and reported in
/// milliseconds at the observation boundary.
pub fn init(clock: Arc<dyn Clock>) {
    CLOCK.call_once(|| clock);
}

/// Reads the current time of the registered clock source.
pub(crate) fn read_time() -> Duration {
    CLOCK
        .get()
        .expect("the clock source is not registered")
        .read_time()
}
