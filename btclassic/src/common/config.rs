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

use std::time::Duration;

use crate::common::BluetoothError;
use crate::wait;

/// Configuration for one inquiry run.
#[derive(Debug, Clone)]
pub struct InquiryConfig {
    /// How long the radio scans. The native API counts whole seconds, so
    /// sub-second precision is truncated and the value is capped at 255.
    pub duration: Duration,
    /// Whether to issue remote name requests for discovered devices.
    pub collect_names: bool,
    /// Extra time granted past `duration` for the completion callback to
    /// arrive before the blocking wait gives up.
    pub completion_grace: Duration,
}

impl Default for InquiryConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(10),
            collect_names: true,
            completion_grace: Duration::from_secs(3),
        }
    }
}

impl InquiryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the inquiry duration from a float second count, validating it
    /// the same way the wait primitive validates timeouts.
    pub fn duration_secs(mut self, secs: f64) -> Result<Self, BluetoothError> {
        self.duration = wait::timeout_from_secs(secs)?;
        Ok(self)
    }

    /// Whole seconds handed to the native inquiry object.
    pub fn duration_for_radio(&self) -> u8 {
        self.duration.as_secs().min(u64::from(u8::MAX)) as u8
    }

    /// Deadline for the blocking wait in `run`: the scan duration plus the
    /// grace period for the completion callback.
    pub fn wait_timeout(&self) -> Duration {
        self.duration + self.completion_grace
    }
}
