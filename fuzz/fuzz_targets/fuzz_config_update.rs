//! Fuzz target: threshold reload from environment variables
//!
//! Feeds arbitrary values for every threshold key of a two-sensor monitor
//! and verifies:
//! - No panics on any input string
//! - A dry run reports the same changes and errors as the real run
//! - Reapplying the same variables reports no changes
//!
//! cargo fuzz run fuzz_config_update

#![no_main]

use std::collections::HashMap;
use std::sync::Arc;

use alertwatch::env::EnvironmentUpdate;
use alertwatch::measurement::Measurement;
use alertwatch::monitor::Monitor;
use libfuzzer_sys::fuzz_target;

const KEYS: [&str; 8] = [
    "temp_normal_low",
    "temp_normal_high",
    "temp_warning_low",
    "temp_warning_high",
    "humidity_normal_low",
    "humidity_normal_high",
    "humidity_warning_low",
    "humidity_warning_high",
];

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let vars: HashMap<String, String> = KEYS
        .iter()
        .zip(text.split('\n'))
        .map(|(k, v)| ((*k).to_owned(), v.to_owned()))
        .collect();

    let mut monitor = Monitor::new();
    monitor.add_sensor(Arc::new(Measurement::with_value("temp", None, 21.0))).unwrap();
    monitor.add_sensor(Arc::new(Measurement::new("humidity", None))).unwrap();

    let mut dry = EnvironmentUpdate::new(vars.clone());
    monitor.apply_config_update(&mut dry, true);
    let mut real = EnvironmentUpdate::new(vars.clone());
    monitor.apply_config_update(&mut real, false);
    assert_eq!(dry.changes(), real.changes());
    assert_eq!(dry.errors(), real.errors());

    let mut again = EnvironmentUpdate::new(vars);
    monitor.apply_config_update(&mut again, false);
    assert!(!again.has_changes());

    let _ = monitor.check_readings();
    let _ = again.to_body();
});
