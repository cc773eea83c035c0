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

use thiserror::Error;

/// Native status code reported for an operation that succeeded.
pub const IO_RETURN_SUCCESS: i32 = 0;

/// Completion status reported when an inquiry finished without seeing any
/// device. Not an error: the result set is simply empty.
pub const INQUIRY_STATUS_NO_DEVICES: i32 = 188;

/// Library error type.
#[non_exhaustive]
#[derive(Error, Debug, PartialEq)]
pub enum BluetoothError {
    /// Reported when the running platform has no usable Bluetooth Classic
    /// inquiry service. Aborts construction of the platform objects.
    #[error("bluetooth inquiry not supported by system: {0}")]
    NotSupported(String),
    /// Reported when a caller-supplied wait timeout in seconds is not a
    /// valid non-negative finite number. Raised before any blocking occurs.
    #[error("invalid wait timeout: {0}")]
    InvalidTimeout(String),
    /// Reported when `run` is called while an inquiry is already active on
    /// the same adapter. The native inquiry is left untouched.
    #[error("another inquiry is already in progress")]
    InquiryInProgress,
    /// Reported when the native start call returned a non-success status.
    #[error("failed to start inquiry, status {0}")]
    InquiryStart(i32),
    /// Reported when inquiry completion carried an error status other than
    /// the no-devices code.
    #[error("inquiry finished with error status {0}")]
    InquiryFailed(i32),
    /// Reported when a device address string from the platform cannot be
    /// parsed into a `ClassicAddress`.
    #[error("malformed bluetooth address: {0}")]
    BadAddress(String),
    /// Wrapper around OS-level errors, e.g. calling into the AppKit event
    /// queue from a thread that does not own it.
    #[error("bluetooth system-level error: {0}")]
    System(String),
    /// Reported when a bug occurs inside the library. Whenever a seemingly
    /// impossible error condition arises where you could call `expect()`,
    /// return this error instead.
    #[error("internal error: {0}")]
    Internal(String),
}
