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

//! End-to-end tests for the blocking inquiry adapter against mocked
//! platform collaborators.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use btclassic::api::{DeviceInquiry, EventQueue, InquiryDelegate};
use btclassic::{
    BluetoothError, DiscoveredDevice, InquiryConfig, SyncInquiry,
    INQUIRY_STATUS_NO_DEVICES, IO_RETURN_SUCCESS,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum MockEvent {
    Wake(i16),
}

/// Stand-in for the native event queue: a deque under a mutex with a
/// condvar so `next_event` blocks like the real queue pump does.
#[derive(Default)]
struct MockQueue {
    events: Mutex<VecDeque<MockEvent>>,
    ready: Condvar,
}

impl EventQueue for MockQueue {
    type Event = MockEvent;

    fn post(
        &self,
        event: MockEvent,
        at_front: bool,
    ) -> Result<(), BluetoothError> {
        let mut events = self.events.lock().unwrap();
        if at_front {
            events.push_front(event);
        } else {
            events.push_back(event);
        }
        self.ready.notify_all();
        Ok(())
    }

    fn next_event(
        &self,
        max_wait: Duration,
    ) -> Result<Option<MockEvent>, BluetoothError> {
        let deadline = Instant::now() + max_wait;
        let mut events = self.events.lock().unwrap();
        loop {
            if let Some(event) = events.pop_front() {
                return Ok(Some(event));
            }
            let now = Instant::now();
            if now >= deadline {
                return Ok(None);
            }
            let (guard, _) =
                self.ready.wait_timeout(events, deadline - now).unwrap();
            events = guard;
        }
    }

    fn wake_event(&self, id: i16) -> Result<MockEvent, BluetoothError> {
        Ok(MockEvent::Wake(id))
    }

    fn wake_id(&self, event: &MockEvent) -> Option<i16> {
        let MockEvent::Wake(id) = event;
        Some(*id)
    }
}

/// Scripted inquiry service: `start` plays back the configured discovery
/// sequence from a helper thread, the way the native layer reports from
/// its own run-loop turn.
struct MockInquiry {
    devices: Vec<DiscoveredDevice>,
    /// Completion `(status, aborted)`; `None` never completes, modeling a
    /// native inquiry that hangs past its duration.
    completion: Option<(i32, bool)>,
    start_status: i32,
    start_calls: Arc<AtomicUsize>,
    stop_calls: Arc<AtomicUsize>,
    configured: Arc<Mutex<Option<(u8, bool)>>>,
    delegate: Option<Arc<dyn InquiryDelegate>>,
}

impl MockInquiry {
    fn completing(devices: Vec<DiscoveredDevice>, status: i32) -> Self {
        Self {
            devices,
            completion: Some((status, false)),
            start_status: IO_RETURN_SUCCESS,
            start_calls: Arc::new(AtomicUsize::new(0)),
            stop_calls: Arc::new(AtomicUsize::new(0)),
            configured: Arc::new(Mutex::new(None)),
            delegate: None,
        }
    }

    fn hanging() -> Self {
        let mut mock = Self::completing(Vec::new(), IO_RETURN_SUCCESS);
        mock.completion = None;
        mock
    }

    fn failing_to_start(status: i32) -> Self {
        let mut mock = Self::completing(Vec::new(), IO_RETURN_SUCCESS);
        mock.start_status = status;
        mock
    }
}

impl DeviceInquiry for MockInquiry {
    fn set_delegate(&mut self, delegate: Arc<dyn InquiryDelegate>) {
        self.delegate = Some(delegate);
    }

    fn configure(
        &mut self,
        config: &InquiryConfig,
    ) -> Result<(), BluetoothError> {
        *self.configured.lock().unwrap() =
            Some((config.duration_for_radio(), config.collect_names));
        Ok(())
    }

    fn start(&mut self) -> Result<(), BluetoothError> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        if self.start_status != IO_RETURN_SUCCESS {
            return Err(BluetoothError::InquiryStart(self.start_status));
        }

        if let Some((status, aborted)) = self.completion {
            let delegate = self
                .delegate
                .clone()
                .expect("the adapter installs its delegate on construction");
            let devices = self.devices.clone();
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(20));
                delegate.inquiry_started();
                for device in &devices {
                    delegate.device_found(device);
                }
                delegate.inquiry_complete(status, aborted);
            });
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<(), BluetoothError> {
        self.stop_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn found_devices(&self) -> Result<Vec<DiscoveredDevice>, BluetoothError> {
        Ok(self.devices.clone())
    }
}

fn sample_devices() -> Vec<DiscoveredDevice> {
    vec![
        DiscoveredDevice {
            address: "AA-BB-CC-DD-EE-01".parse().unwrap(),
            name: Some(String::from("Phone")),
            class_of_device: 0x1F00,
            rssi: -40,
        },
        DiscoveredDevice {
            address: "AA-BB-CC-DD-EE-02".parse().unwrap(),
            name: None,
            class_of_device: 0x0408,
            rssi: -70,
        },
    ]
}

/// Short deadlines so the timeout paths stay fast.
fn quick_config() -> InquiryConfig {
    InquiryConfig {
        duration: Duration::from_millis(100),
        collect_names: true,
        completion_grace: Duration::from_millis(100),
    }
}

#[test]
fn inquiry_returns_devices_in_discovery_order() {
    let devices = sample_devices();
    let mock = MockInquiry::completing(
        devices.clone(),
        // The no-devices completion code is not an error even when
        // devices were in fact reported.
        INQUIRY_STATUS_NO_DEVICES,
    );
    let configured = Arc::clone(&mock.configured);

    let mut session = SyncInquiry::new(mock, MockQueue::default());
    session.run(&InquiryConfig::default()).unwrap();

    let found = session.found_devices().unwrap();
    assert_eq!(found, devices);
    assert_eq!(found[0].address.to_string(), "AA:BB:CC:DD:EE:01");
    assert_eq!(*configured.lock().unwrap(), Some((10, true)));
    assert!(!session.is_inquiring());
}

#[test]
fn completion_error_status_is_surfaced() {
    let mock = MockInquiry::completing(Vec::new(), 5);
    let mut session = SyncInquiry::new(mock, MockQueue::default());

    let result = session.run(&InquiryConfig::default());
    assert_eq!(result, Err(BluetoothError::InquiryFailed(5)));
}

#[test]
fn aborted_completion_with_success_status_is_ok() {
    let mut mock = MockInquiry::completing(Vec::new(), IO_RETURN_SUCCESS);
    mock.completion = Some((IO_RETURN_SUCCESS, true));
    let mut session = SyncInquiry::new(mock, MockQueue::default());

    session.run(&InquiryConfig::default()).unwrap();
    assert_eq!(session.found_devices().unwrap(), Vec::new());
}

#[test]
fn second_run_is_rejected_while_inquiry_is_live() {
    let mock = MockInquiry::hanging();
    let start_calls = Arc::clone(&mock.start_calls);
    let mut session = SyncInquiry::new(mock, MockQueue::default());

    // The native inquiry never completes, so the first run times out with
    // the running flag still set.
    session.run(&quick_config()).unwrap();
    assert!(session.is_inquiring());

    let result = session.run(&quick_config());
    assert_eq!(result, Err(BluetoothError::InquiryInProgress));
    // The second call must not have reached the native start.
    assert_eq!(start_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn start_failure_is_typed_and_leaves_the_adapter_usable() {
    let mock = MockInquiry::failing_to_start(7);
    let start_calls = Arc::clone(&mock.start_calls);
    let mut session = SyncInquiry::new(mock, MockQueue::default());

    assert_eq!(
        session.run(&quick_config()),
        Err(BluetoothError::InquiryStart(7)),
    );
    assert!(!session.is_inquiring());

    // A failed start does not wedge the adapter: the next run reaches the
    // native start again.
    assert_eq!(
        session.run(&quick_config()),
        Err(BluetoothError::InquiryStart(7)),
    );
    assert_eq!(start_calls.load(Ordering::SeqCst), 2);
}

#[test]
fn stop_is_passed_through() {
    let mock = MockInquiry::completing(Vec::new(), IO_RETURN_SUCCESS);
    let stop_calls = Arc::clone(&mock.stop_calls);
    let mut session = SyncInquiry::new(mock, MockQueue::default());

    session.stop().unwrap();
    assert_eq!(stop_calls.load(Ordering::SeqCst), 1);
}
