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

use super::ClassicAddress;

/// Snapshot of one device seen during an inquiry. Produced from the native
/// result list once the inquiry has completed; immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredDevice {
    /// 48-bit device address.
    pub address: ClassicAddress,
    /// Remote name, present only if the inquiry collected names and the
    /// device answered the name request.
    pub name: Option<String>,
    /// 24-bit packed major/minor class-of-device category.
    pub class_of_device: u32,
    /// Received signal strength indicator at discovery time.
    pub rssi: i8,
}
