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

use super::unsupported;
use crate::api;
use crate::common::BluetoothError;

/// Concrete type implementing `api::EventQueue` for platforms without a
/// native event queue. Construction always fails.
pub struct EventQueue;

impl EventQueue {
    pub fn new() -> Result<Self, BluetoothError> {
        Err(unsupported())
    }
}

impl api::EventQueue for EventQueue {
    type Event = ();

    fn post(
        &self,
        _event: Self::Event,
        _at_front: bool,
    ) -> Result<(), BluetoothError> {
        Err(unsupported())
    }

    fn next_event(
        &self,
        _max_wait: Duration,
    ) -> Result<Option<Self::Event>, BluetoothError> {
        Err(unsupported())
    }

    fn wake_event(&self, _id: i16) -> Result<Self::Event, BluetoothError> {
        Err(unsupported())
    }

    fn wake_id(&self, _event: &Self::Event) -> Option<i16> {
        None
    }
}
