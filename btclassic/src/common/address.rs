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

use std::fmt;
use std::str::FromStr;

use super::BluetoothError;

/// Struct representing a 48-bit BT Classic address.
///
/// Stored least-significant byte first, matching the on-air order used by
/// the `u64` conversions.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub struct ClassicAddress([u8; 6]);

/// Function for converting the six LSB of a u64 into a 6-byte array.
#[inline]
fn u64_to_6lsb(num: u64) -> [u8; 6] {
    num.to_le_bytes()[..6]
        .try_into()
        .expect("Sanity check, slice length matches array length")
}

impl From<u64> for ClassicAddress {
    fn from(addr: u64) -> Self {
        let addr = u64_to_6lsb(addr);

        ClassicAddress(addr)
    }
}

impl From<ClassicAddress> for u64 {
    fn from(addr: ClassicAddress) -> Self {
        let mut bytes = [0u8; 8];
        bytes[..6].copy_from_slice(&addr.0);

        u64::from_le_bytes(bytes)
    }
}

impl FromStr for ClassicAddress {
    type Err = BluetoothError;

    /// Parses the textual address forms returned by platform APIs:
    /// `aa-bb-cc-dd-ee-ff` (IOBluetooth) or `aa:bb:cc:dd:ee:ff`, any case.
    /// The leftmost pair is the most significant byte.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut val = [0u8; 6];
        let mut pairs = 0usize;

        for pair in s.split(|c| c == ':' || c == '-') {
            if pairs == 6 {
                return Err(BluetoothError::BadAddress(s.to_string()));
            }
            if pair.len() != 2 || !pair.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(BluetoothError::BadAddress(s.to_string()));
            }
            let byte = u8::from_str_radix(pair, 16)
                .map_err(|_| BluetoothError::BadAddress(s.to_string()))?;
            val[5 - pairs] = byte;
            pairs += 1;
        }

        if pairs != 6 {
            return Err(BluetoothError::BadAddress(s.to_string()));
        }

        Ok(ClassicAddress(val))
    }
}

impl fmt::Display for ClassicAddress {
    /// Formats as uppercase colon-separated hex pairs, most significant
    /// byte first, e.g. `AA:BB:CC:DD:EE:FF`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            self.0[5], self.0[4], self.0[3], self.0[2], self.0[1], self.0[0],
        )
    }
}
