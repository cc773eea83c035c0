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

//! Synchronous adapter over the asynchronous inquiry API.
//!
//! The native discovery object reports progress through delegate callbacks
//! delivered on event-queue turns. [`SyncInquiry::run`] turns that into a
//! single blocking call: it starts discovery, then parks in
//! [`wait_until`](crate::wait::wait_until) until the completion callback
//! flips the shared flag and interrupts the wait.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{debug, error, info, warn};

use crate::api::{DeviceInquiry, EventQueue, InquiryDelegate};
use crate::common::{
    BluetoothError, DiscoveredDevice, InquiryConfig, INQUIRY_STATUS_NO_DEVICES,
    IO_RETURN_SUCCESS,
};
use crate::wait;

/// State shared between the blocked waiter and the completion callback.
///
/// The callback may arrive on another thread, so the flag is atomic and
/// the status slot is locked; the waiter only ever reads them.
struct InquiryState {
    inquiring: AtomicBool,
    status: Mutex<Option<i32>>,
}

impl InquiryState {
    fn new() -> Self {
        Self {
            inquiring: AtomicBool::new(false),
            status: Mutex::new(None),
        }
    }
}

/// Delegate installed by [`SyncInquiry`]: records the completion status,
/// clears the running flag and wakes the blocked waiter.
struct CompletionSignal<Q> {
    state: Arc<InquiryState>,
    queue: Arc<Q>,
}

impl<Q> InquiryDelegate for CompletionSignal<Q>
where
    Q: EventQueue + Send + Sync,
{
    fn inquiry_started(&self) {
        debug!("inquiry started");
    }

    fn device_found(&self, device: &DiscoveredDevice) {
        debug!(address = %device.address, "inquiry found a device");
    }

    fn inquiry_complete(&self, status: i32, aborted: bool) {
        debug!(status, aborted, "inquiry complete");
        if status != IO_RETURN_SUCCESS && status != INQUIRY_STATUS_NO_DEVICES {
            *self.state.status.lock().unwrap() = Some(status);
        }
        // Publish the flag before waking: the waiter re-checks it only on
        // wake receipt.
        self.state.inquiring.store(false, Ordering::SeqCst);
        if let Err(err) = wait::interrupt(&*self.queue) {
            error!("failed to wake the inquiry waiter: {err}");
        }
    }
}

/// Blocking front-end over one injected [`DeviceInquiry`] and the event
/// queue that delivers its callbacks. At most one inquiry is active per
/// adapter instance.
pub struct SyncInquiry<I, Q>
where
    I: DeviceInquiry,
    Q: EventQueue + Send + Sync + 'static,
{
    inquiry: I,
    queue: Arc<Q>,
    state: Arc<InquiryState>,
}

impl<I, Q> SyncInquiry<I, Q>
where
    I: DeviceInquiry,
    Q: EventQueue + Send + Sync + 'static,
{
    /// Wire the adapter to its collaborators. The completion delegate is
    /// installed here and stays for the adapter's lifetime.
    pub fn new(mut inquiry: I, queue: Q) -> Self {
        let queue = Arc::new(queue);
        let state = Arc::new(InquiryState::new());
        inquiry.set_delegate(Arc::new(CompletionSignal {
            state: Arc::clone(&state),
            queue: Arc::clone(&queue),
        }));
        Self {
            inquiry,
            queue,
            state,
        }
    }

    /// Run one inquiry to completion, blocking the calling thread while
    /// the event queue is pumped.
    ///
    /// Fails with [`BluetoothError::InquiryInProgress`] if an inquiry is
    /// already active, [`BluetoothError::InquiryStart`] if the native
    /// start call is rejected, and [`BluetoothError::InquiryFailed`] if
    /// completion reported an error status. An inquiry that sees no
    /// devices completes successfully with an empty result list.
    pub fn run(&mut self, config: &InquiryConfig) -> Result<(), BluetoothError> {
        if self.state.inquiring.load(Ordering::SeqCst) {
            return Err(BluetoothError::InquiryInProgress);
        }

        self.inquiry.configure(config)?;

        // Arm the shared state before starting: completion can race the
        // return of `start` on callback-threaded platforms.
        *self.state.status.lock().unwrap() = None;
        self.state.inquiring.store(true, Ordering::SeqCst);

        if let Err(err) = self.inquiry.start() {
            self.state.inquiring.store(false, Ordering::SeqCst);
            return Err(err);
        }
        info!(
            duration_secs = config.duration_for_radio(),
            collect_names = config.collect_names,
            "inquiry running",
        );

        let completed = wait::wait_until(
            &*self.queue,
            || !self.state.inquiring.load(Ordering::SeqCst),
            Some(config.wait_timeout()),
        )?;
        if !completed {
            // The native inquiry is still live; the flag stays set so a
            // second `run` keeps failing until `stop` forces completion.
            warn!(
                timeout = ?config.wait_timeout(),
                "inquiry did not signal completion in time",
            );
            return Ok(());
        }

        match *self.state.status.lock().unwrap() {
            Some(code) => Err(BluetoothError::InquiryFailed(code)),
            None => Ok(()),
        }
    }

    /// Devices discovered by the last run, in discovery order.
    pub fn found_devices(&self) -> Result<Vec<DiscoveredDevice>, BluetoothError> {
        self.inquiry.found_devices()
    }

    /// Abort the underlying inquiry. Not wired into the blocking path;
    /// completion (with its `aborted` flag) still arrives through the
    /// delegate on the next queue pump.
    pub fn stop(&mut self) -> Result<(), BluetoothError> {
        self.inquiry.stop()
    }

    /// Whether an inquiry is currently active.
    pub fn is_inquiring(&self) -> bool {
        self.state.inquiring.load(Ordering::SeqCst)
    }
}
