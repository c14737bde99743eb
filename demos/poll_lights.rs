// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Demo program: list GifKid lights and print every state change.
//!
//! # Usage
//!
//! ```bash
//! RUST_LOG=gifkid=debug cargo run --example poll_lights -- <client_id> [api_domain]
//! ```

use std::env;

use gifkid::{ConfigEntry, Integration};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <client_id> [api_domain]", args[0]);
        std::process::exit(1);
    }

    let mut entry = ConfigEntry::new(&args[1]);
    if let Some(domain) = args.get(2) {
        entry = entry.with_api_domain(domain);
    }

    println!("Connecting to {}...", entry.api_domain);
    let integration = Integration::setup(&entry).await?;

    let print_lights = |integration: &Integration| {
        for light in integration.lights() {
            let state = light.state();
            println!(
                "  {:<24} on={:<5} brightness={:<6} available={}",
                light.name(),
                state.is_on,
                state
                    .brightness
                    .map_or_else(|| "-".to_string(), |b| b.value().to_string()),
                state.available
            );
        }
    };

    println!("Found {} light(s):", integration.lights().len());
    print_lights(&integration);

    let mut changes = integration.coordinator().subscribe();
    loop {
        tokio::select! {
            changed = changes.changed() => {
                if changed.is_err() {
                    break;
                }
                let healthy = changes.borrow_and_update().last_update_success();
                println!("Refreshed (healthy: {healthy}):");
                print_lights(&integration);
            }
            _ = tokio::signal::ctrl_c() => {
                println!("Stopping...");
                break;
            }
        }
    }

    integration.unload();
    Ok(())
}
