// Allow panic/unwrap/expect in tests (denied globally via Cargo.toml lints)
#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        clippy::indexing_slicing,
        clippy::float_cmp
    )
)]

pub mod cors;
pub mod grpc_logging;
pub mod laptop;
pub mod logging;
pub mod metrics;
pub mod pb;
pub mod server;
pub mod user_config;

// Re-export commonly used types
pub use laptop::{is_qualified, to_bit, InMemoryLaptopStore, LaptopStore, StoreError};
pub use server::LaptopDaemonService;
pub use user_config::{load_user_config, SearchConfig, UserConfig};
