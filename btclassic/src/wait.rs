// Copyright 2023 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Blocking wait over a native event queue.
//!
//! [`wait_until`] suspends the caller while pumping the queue, so that
//! callbacks which are only delivered on queue turns (inquiry completion,
//! socket readiness) can still run. A waiter is never polled: producers
//! call [`interrupt`] after changing state, which posts a reserved wake
//! event, and only that event triggers a predicate check.

use std::time::{Duration, Instant};

use tracing::trace;

use crate::api::EventQueue;
use crate::common::BluetoothError;

/// Reserved subtype identifier of the wake event.
pub const WAKE_EVENT_ID: i16 = 5444;

/// Upper bound on one queue pump. Keeps the loop responsive to external
/// interruption (e.g. Ctrl-C) even with a long or absent overall timeout.
const WAIT_SLICE: Duration = Duration::from_secs(3);

// Stand-in for "wait forever" so the bounded-slice loop stays uniform.
const WAIT_FOREVER: Duration = Duration::from_secs(60 * 60 * 24 * 365);

/// Convert a caller-supplied float second count into a [`Duration`],
/// rejecting NaN, negative and infinite values with
/// [`BluetoothError::InvalidTimeout`]. Runs before any blocking.
pub fn timeout_from_secs(secs: f64) -> Result<Duration, BluetoothError> {
    Duration::try_from_secs_f64(secs)
        .map_err(|err| BluetoothError::InvalidTimeout(format!("{secs}: {err}")))
}

/// Block until `predicate` is observed true on receipt of a wake event,
/// or `timeout` elapses. Returns `Ok(true)` in the first case, `Ok(false)`
/// in the second. `None` waits indefinitely.
///
/// The deadline is computed once at entry from the wall clock. Events that
/// are not wake events are re-posted at the front of the queue so other
/// consumers of the loop do not lose them.
///
/// A producer must call [`interrupt`] whenever it changes state the
/// predicate depends on; the predicate is never checked otherwise.
pub fn wait_until<Q, P>(
    queue: &Q,
    mut predicate: P,
    timeout: Option<Duration>,
) -> Result<bool, BluetoothError>
where
    Q: EventQueue + ?Sized,
    P: FnMut() -> bool,
{
    let timeout = timeout.unwrap_or(WAIT_FOREVER);
    let deadline = Instant::now() + timeout;

    loop {
        let now = Instant::now();
        if now >= deadline {
            return Ok(false);
        }

        let slice = (deadline - now).min(WAIT_SLICE);
        let Some(event) = queue.next_event(slice)? else {
            continue;
        };

        if queue.wake_id(&event) == Some(WAKE_EVENT_ID) {
            if predicate() {
                return Ok(true);
            }
        } else {
            trace!("re-posting unrelated event picked up while waiting");
            queue.post(event, true)?;
        }
    }
}

/// Post the wake event, causing a blocked [`wait_until`] on the same queue
/// to re-check its predicate.
pub fn interrupt<Q>(queue: &Q) -> Result<(), BluetoothError>
where
    Q: EventQueue + ?Sized,
{
    let event = queue.wake_event(WAKE_EVENT_ID)?;
    queue.post(event, true)
}
