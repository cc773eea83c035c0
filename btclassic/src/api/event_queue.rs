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

/// Concrete types implementing this trait expose the host's native event
/// queue. Inquiry callbacks are only delivered while this queue is being
/// pumped, so the blocking wait primitive services it in bounded slices.
///
/// The queue must be driven by the thread that owns it; implementations
/// fail with [`BluetoothError::System`] when called from any other thread.
pub trait EventQueue {
    /// Native event representation.
    type Event;

    /// Put an event (back) onto the queue. `at_front` preserves ordering
    /// for events that were dequeued but not consumed.
    fn post(&self, event: Self::Event, at_front: bool) -> Result<(), BluetoothError>;

    /// Dequeue the next pending event, blocking up to `max_wait`. Returns
    /// `None` if the queue stayed empty for the whole slice.
    fn next_event(
        &self,
        max_wait: Duration,
    ) -> Result<Option<Self::Event>, BluetoothError>;

    /// Build the application-defined wake event carrying `id`. The event
    /// transports no data; it exists only to nudge a blocked waiter.
    fn wake_event(&self, id: i16) -> Result<Self::Event, BluetoothError>;

    /// If `event` is a wake event, its identifier.
    fn wake_id(&self, event: &Self::Event) -> Option<i16>;
}
