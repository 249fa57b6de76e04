//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements   | Connects to        |
//! |----------------|--------------|--------------------|
//! | `log_sink`     | EventSink    | `log` output       |

pub mod log_sink;
