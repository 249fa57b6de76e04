//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! against mock adapters.  All tests run on the host with no gateway or
//! sensors attached.

mod mock_sink;
mod report_events_tests;
mod service_tests;
