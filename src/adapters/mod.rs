//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements   | Connects to            |
//! |----------------|--------------|------------------------|
//! | `config_file`  | ConfigPort   | JSON file on disk      |
//! | `log_sink`     | EventSink    | `log` facade           |
//! | `http`         |:            | axum HTTP gateway      |

pub mod config_file;
#[cfg(feature = "gateway")]
pub mod http;
pub mod log_sink;
