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

use std::cell::RefCell;
use std::sync::Arc;

use objc2::rc::Retained;
use objc2::runtime::AnyObject;
use objc2::{define_class, msg_send, DefinedClass, MainThreadMarker, MainThreadOnly};
use objc2_foundation::NSObject;
use objc2_io_bluetooth::{
    // A discovered remote device; exposes its address string, cached name,
    // class of device and the RSSI sampled during the inquiry.
    // https://developer.apple.com/documentation/iobluetooth/iobluetoothdevice
    IOBluetoothDevice,

    // The asynchronous inquiry object. Progress arrives through delegate
    // callbacks on the main run loop.
    // https://developer.apple.com/documentation/iobluetooth/iobluetoothdeviceinquiry
    IOBluetoothDeviceInquiry,
};
use tracing::warn;

use super::off_main_thread;
use crate::api;
use crate::common::{
    BluetoothError, ClassicAddress, DiscoveredDevice, InquiryConfig,
    IO_RETURN_SUCCESS,
};

/// Delegate target handed to `IOBluetoothDeviceInquiry`. Forwards the
/// Objective-C callbacks to whatever [`api::InquiryDelegate`] is installed
/// at the time.
#[derive(Default)]
struct RelayIvars {
    handler: RefCell<Option<Arc<dyn api::InquiryDelegate>>>,
}

define_class!(
    #[unsafe(super(NSObject))]
    #[thread_kind = MainThreadOnly]
    #[name = "BtclassicInquiryRelay"]
    #[ivars = RelayIvars]
    struct InquiryRelay;

    impl InquiryRelay {
        #[unsafe(method(deviceInquiryStarted:))]
        fn device_inquiry_started(&self, _sender: &IOBluetoothDeviceInquiry) {
            if let Some(handler) = self.handler() {
                handler.inquiry_started();
            }
        }

        #[unsafe(method(deviceInquiryDeviceFound:device:))]
        fn device_inquiry_device_found(
            &self,
            _sender: &IOBluetoothDeviceInquiry,
            device: &IOBluetoothDevice,
        ) {
            let Some(handler) = self.handler() else {
                return;
            };
            match record_from_device(device) {
                Ok(record) => handler.device_found(&record),
                Err(err) => warn!("ignoring unreadable inquiry result: {err}"),
            }
        }

        #[unsafe(method(deviceInquiryComplete:error:aborted:))]
        fn device_inquiry_complete(
            &self,
            _sender: &IOBluetoothDeviceInquiry,
            error: i32,
            aborted: bool,
        ) {
            if let Some(handler) = self.handler() {
                handler.inquiry_complete(error, aborted);
            }
        }
    }
);

impl InquiryRelay {
    fn new(mtm: MainThreadMarker) -> Retained<Self> {
        let this = Self::alloc(mtm).set_ivars(RelayIvars::default());
        unsafe { msg_send![super(this), init] }
    }

    fn handler(&self) -> Option<Arc<dyn api::InquiryDelegate>> {
        self.ivars().handler.borrow().clone()
    }
}

/// Concrete type implementing `api::DeviceInquiry` over IOBluetooth.
pub struct DeviceInquiry {
    inner: Retained<IOBluetoothDeviceInquiry>,
    relay: Retained<InquiryRelay>,
}

impl DeviceInquiry {
    /// Create the native inquiry object with its relay delegate.
    /// Fails with `NotSupported` when IOBluetooth cannot provide an
    /// inquiry (e.g. no Bluetooth controller) and `System` when called
    /// off the main thread.
    pub fn new() -> Result<Self, BluetoothError> {
        let mtm = MainThreadMarker::new().ok_or_else(off_main_thread)?;
        let relay = InquiryRelay::new(mtm);
        let delegate: &AnyObject = &relay;
        let inner =
            unsafe { IOBluetoothDeviceInquiry::inquiryWithDelegate(Some(delegate)) }
                .ok_or_else(|| {
                    BluetoothError::NotSupported(String::from(
                        "IOBluetooth did not provide a device inquiry object",
                    ))
                })?;
        Ok(DeviceInquiry { inner, relay })
    }
}

impl api::DeviceInquiry for DeviceInquiry {
    fn set_delegate(&mut self, delegate: Arc<dyn api::InquiryDelegate>) {
        *self.relay.ivars().handler.borrow_mut() = Some(delegate);
    }

    fn configure(
        &mut self,
        config: &InquiryConfig,
    ) -> Result<(), BluetoothError> {
        unsafe {
            self.inner.setInquiryLength(config.duration_for_radio());
            self.inner.setUpdateNewDeviceNames(config.collect_names);
        }
        Ok(())
    }

    fn start(&mut self) -> Result<(), BluetoothError> {
        let status = unsafe { self.inner.start() };
        if status == IO_RETURN_SUCCESS {
            Ok(())
        } else {
            Err(BluetoothError::InquiryStart(status))
        }
    }

    fn stop(&mut self) -> Result<(), BluetoothError> {
        let status = unsafe { self.inner.stop() };
        if status == IO_RETURN_SUCCESS {
            Ok(())
        } else {
            Err(BluetoothError::System(format!(
                "failed to stop inquiry, status {status}",
            )))
        }
    }

    fn found_devices(&self) -> Result<Vec<DiscoveredDevice>, BluetoothError> {
        let Some(devices) = (unsafe { self.inner.foundDevices() }) else {
            return Ok(Vec::new());
        };

        let mut records = Vec::with_capacity(devices.count());
        for device in devices.iter() {
            match device.downcast_ref::<IOBluetoothDevice>() {
                Some(device) => match record_from_device(device) {
                    Ok(record) => records.push(record),
                    Err(err) => {
                        warn!("skipping unreadable inquiry result: {err}")
                    }
                },
                None => warn!("unexpected object in the inquiry result list"),
            }
        }
        Ok(records)
    }
}

/// Read one result row out of an `IOBluetoothDevice`. IOBluetooth formats
/// addresses with dashes; `ClassicAddress` normalizes that on parse.
fn record_from_device(
    device: &IOBluetoothDevice,
) -> Result<DiscoveredDevice, BluetoothError> {
    let address: ClassicAddress = unsafe { device.addressString() }
        .ok_or_else(|| {
            BluetoothError::Internal(String::from(
                "discovered device carries no address string",
            ))
        })?
        .to_string()
        .parse()?;
    let name = unsafe { device.name() }.map(|name| name.to_string());
    let class_of_device = unsafe { device.classOfDevice() };
    let rssi = unsafe { device.rawRSSI() };

    Ok(DiscoveredDevice {
        address,
        name,
        class_of_device,
        rssi,
    })
}
