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

mod event_queue;
mod inquiry;

pub use event_queue::EventQueue;
pub use inquiry::DeviceInquiry;

use crate::common::BluetoothError;

/// IOBluetooth delivers inquiry callbacks on the main run loop, and AppKit
/// only hands out its event queue there.
fn off_main_thread() -> BluetoothError {
    BluetoothError::System(String::from(
        "bluetooth inquiry must be driven from the main thread",
    ))
}
