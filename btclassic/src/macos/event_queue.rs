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

use objc2::rc::Retained;
use objc2::MainThreadMarker;
use objc2_app_kit::{
    // Owner of the per-process event queue that IOBluetooth callbacks ride
    // on. https://developer.apple.com/documentation/appkit/nsapplication
    NSApplication,

    // One queue entry; application-defined events carry our wake id in
    // their subtype. https://developer.apple.com/documentation/appkit/nsevent
    NSEvent,
    NSEventMask,
    NSEventModifierFlags,
    NSEventType,
};
use objc2_foundation::{NSDate, NSDefaultRunLoopMode, NSPoint};

use super::off_main_thread;
use crate::api;
use crate::common::BluetoothError;

/// Concrete type implementing `api::EventQueue` over the shared AppKit
/// application event queue. Holds no state of its own; the queue is
/// process-global and owned by the main thread.
pub struct EventQueue;

impl EventQueue {
    /// Fails unless called on the thread that owns the AppKit queue.
    pub fn new() -> Result<Self, BluetoothError> {
        MainThreadMarker::new()
            .map(|_| EventQueue)
            .ok_or_else(off_main_thread)
    }

    fn app(&self) -> Result<Retained<NSApplication>, BluetoothError> {
        let mtm = MainThreadMarker::new().ok_or_else(off_main_thread)?;
        Ok(NSApplication::sharedApplication(mtm))
    }
}

impl api::EventQueue for EventQueue {
    type Event = Retained<NSEvent>;

    fn post(
        &self,
        event: Self::Event,
        at_front: bool,
    ) -> Result<(), BluetoothError> {
        let app = self.app()?;
        unsafe { app.postEvent_atStart(&event, at_front) };
        Ok(())
    }

    fn next_event(
        &self,
        max_wait: Duration,
    ) -> Result<Option<Self::Event>, BluetoothError> {
        let app = self.app()?;
        let deadline = unsafe {
            NSDate::dateWithTimeIntervalSinceNow(max_wait.as_secs_f64())
        };
        let event = unsafe {
            app.nextEventMatchingMask_untilDate_inMode_dequeue(
                NSEventMask::Any,
                Some(&deadline),
                NSDefaultRunLoopMode,
                true,
            )
        };
        Ok(event)
    }

    fn wake_event(&self, id: i16) -> Result<Self::Event, BluetoothError> {
        // The event carries no data; location, window and context are
        // placeholders AppKit accepts for application-defined events.
        MainThreadMarker::new().ok_or_else(off_main_thread)?;
        unsafe {
            NSEvent::otherEventWithType_location_modifierFlags_timestamp_windowNumber_context_subtype_data1_data2(
                NSEventType::ApplicationDefined,
                NSPoint::new(0.0, 0.0),
                NSEventModifierFlags::empty(),
                0.0,
                0,
                None,
                id,
                0,
                0,
            )
        }
        .ok_or_else(|| {
            BluetoothError::Internal(String::from(
                "AppKit refused to create the wake event",
            ))
        })
    }

    fn wake_id(&self, event: &Self::Event) -> Option<i16> {
        if unsafe { event.r#type() } == NSEventType::ApplicationDefined {
            Some(unsafe { event.subtype() }.0)
        } else {
            None
        }
    }
}
