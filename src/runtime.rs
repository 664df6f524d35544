//! Blocking bridge for the CLI.
//!
//! The library API is async. `getbody` commands run their fetches here, and a
//! `latest` run with several targets shares one runtime across them.

use once_cell::sync::Lazy;
use tokio::runtime::{Builder, Runtime};

/// Built on first use, lives for the rest of the process.
static RUNTIME: Lazy<Runtime> = Lazy::new(|| {
    Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("failed to build getbody runtime")
});

/// Drive `future` to completion from synchronous CLI code.
///
/// Must not be called from inside another Tokio runtime.
pub fn block_on<F>(future: F) -> F::Output
where
    F: std::future::Future,
{
    RUNTIME.block_on(future)
}
