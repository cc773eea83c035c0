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

use std::sync::Arc;

use crate::common::{BluetoothError, DiscoveredDevice, InquiryConfig};

/// Callbacks fired by a [`DeviceInquiry`] while discovery runs. The native
/// layer may invoke these from its own run-loop turn, so implementations
/// are treated as logically concurrent with the thread that started the
/// inquiry.
pub trait InquiryDelegate: Send + Sync {
    /// The inquiry began scanning.
    fn inquiry_started(&self) {}

    /// A device answered the inquiry. The same device may be reported more
    /// than once if it answers repeatedly.
    fn device_found(&self, _device: &DiscoveredDevice) {}

    /// The inquiry finished. `status` is the native completion code;
    /// `aborted` is set when the inquiry was stopped rather than running
    /// its full duration.
    fn inquiry_complete(&self, status: i32, aborted: bool);
}

/// Concrete types implementing this trait drive one platform device
/// inquiry. They provide methods for configuring, starting and stopping
/// discovery and for retrieving its results.
pub trait DeviceInquiry {
    /// Install the delegate that receives discovery callbacks. Replaces
    /// any previously installed delegate.
    fn set_delegate(&mut self, delegate: Arc<dyn InquiryDelegate>);

    /// Apply the inquiry duration and name-collection flag.
    fn configure(&mut self, config: &InquiryConfig) -> Result<(), BluetoothError>;

    /// Begin discovery. A non-success native status is surfaced as
    /// [`BluetoothError::InquiryStart`].
    fn start(&mut self) -> Result<(), BluetoothError>;

    /// Abort a running discovery. Completion is still reported through the
    /// delegate, with its `aborted` flag set.
    fn stop(&mut self) -> Result<(), BluetoothError>;

    /// Snapshot every device seen so far, in discovery order.
    fn found_devices(&self) -> Result<Vec<DiscoveredDevice>, BluetoothError>;
}
