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

//! Blocking Bluetooth Classic device discovery.
//!
//! The platform inquiry API is asynchronous: a discovery object reports
//! progress through delegate callbacks that only fire while the native
//! event queue is serviced. This crate wraps that machinery behind
//! [`SyncInquiry`], a blocking adapter built on a wait primitive that
//! pumps the queue until a completion wake-up or a deadline, and exposes
//! [`find_devices`] as the one-call entry point.

use std::time::Duration;

pub mod api;
mod common;
mod inquiry;
mod wait;

pub use common::{
    BluetoothError, ClassicAddress, DiscoveredDevice, InquiryConfig,
    INQUIRY_STATUS_NO_DEVICES, IO_RETURN_SUCCESS,
};
pub use inquiry::SyncInquiry;
pub use wait::{interrupt, timeout_from_secs, wait_until, WAKE_EVENT_ID};

cfg_if::cfg_if! {
    if #[cfg(target_os = "macos")] {
        mod macos;
        use self::macos as platform;
    } else {
        mod unsupported;
        use unsupported as platform;
    }
}

pub struct Platform;

impl Platform {
    /// Resolve the platform's device-inquiry service. On anything but
    /// macOS this reports `NotSupported`.
    pub fn device_inquiry(
    ) -> Result<impl api::DeviceInquiry, BluetoothError> {
        platform::DeviceInquiry::new()
    }

    /// Resolve the native event queue the inquiry callbacks ride on. Must
    /// be called on the thread that owns the queue.
    pub fn event_queue(
    ) -> Result<impl api::EventQueue + Send + Sync + 'static, BluetoothError>
    {
        platform::EventQueue::new()
    }
}

/// Run one inquiry against the platform services and return every device
/// it saw. Blocks the calling thread for up to `duration` plus a small
/// completion grace period.
pub fn find_devices(
    collect_names: bool,
    duration: Duration,
) -> Result<Vec<DiscoveredDevice>, BluetoothError> {
    let config = InquiryConfig {
        duration,
        collect_names,
        ..InquiryConfig::default()
    };

    let mut session =
        SyncInquiry::new(Platform::device_inquiry()?, Platform::event_queue()?);
    session.run(&config)?;
    session.found_devices()
}
