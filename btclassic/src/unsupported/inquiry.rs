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

use super::unsupported;
use crate::api;
use crate::common::{BluetoothError, DiscoveredDevice, InquiryConfig};

/// Concrete type implementing `api::DeviceInquiry` for platforms without
/// an inquiry backend. Construction always fails, so the trait methods
/// are unreachable; they still answer with a typed error.
pub struct DeviceInquiry;

impl DeviceInquiry {
    pub fn new() -> Result<Self, BluetoothError> {
        Err(unsupported())
    }
}

impl api::DeviceInquiry for DeviceInquiry {
    fn set_delegate(&mut self, _delegate: Arc<dyn api::InquiryDelegate>) {}

    fn configure(
        &mut self,
        _config: &InquiryConfig,
    ) -> Result<(), BluetoothError> {
        Err(unsupported())
    }

    fn start(&mut self) -> Result<(), BluetoothError> {
        Err(unsupported())
    }

    fn stop(&mut self) -> Result<(), BluetoothError> {
        Err(unsupported())
    }

    fn found_devices(&self) -> Result<Vec<DiscoveredDevice>, BluetoothError> {
        Err(unsupported())
    }
}
