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

//! Scan for nearby Bluetooth Classic devices and print what was found.

use std::time::Duration;

use tracing::{info, metadata::LevelFilter};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    info!("starting inquiry");
    let devices = btclassic::find_devices(true, Duration::from_secs(10))?;
    info!("inquiry finished, {} device(s)", devices.len());

    for device in &devices {
        println!(
            "Address: {}, Name: {}, Class of Device: {}, RSSI: {}",
            device.address,
            device.name.as_deref().unwrap_or("(unknown)"),
            device.class_of_device,
            device.rssi,
        );
    }

    Ok(())
}
