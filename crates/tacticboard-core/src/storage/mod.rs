//! Persistence backends for roster files.

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

use crate::roster::{MemoryRoster, RosterFile};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Key under which the main roster is stored.
pub const DEFAULT_ROSTER_KEY: &str = "roster";

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Roster not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for async operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Backend that reads and writes whole roster files.
///
/// Rosters are always written wholesale; there are no partial updates.
pub trait Storage: Send + Sync {
    fn save(&self, id: &str, roster: &RosterFile) -> BoxFuture<'_, StorageResult<()>>;

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<RosterFile>>;

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// All stored roster ids.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>>;
}

/// Load the roster stored under `id`. Nothing stored yet means an empty roster.
pub async fn load_roster(storage: &dyn Storage, id: &str) -> StorageResult<MemoryRoster> {
    match storage.load(id).await {
        Ok(file) => Ok(file.into_roster()),
        Err(StorageError::NotFound(_)) => {
            log::info!("No saved roster under {}", id);
            Ok(MemoryRoster::new())
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
pub(crate) fn block_on<F: Future>(f: F) -> F::Output {
    // Simple blocking executor for tests
    use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

    fn dummy_raw_waker() -> RawWaker {
        fn no_op(_: *const ()) {}
        fn clone(_: *const ()) -> RawWaker {
            dummy_raw_waker()
        }
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
        RawWaker::new(std::ptr::null(), &VTABLE)
    }

    let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
    let mut cx = Context::from_waker(&waker);
    let mut f = std::pin::pin!(f);

    loop {
        if let Poll::Ready(result) = f.as_mut().poll(&mut cx) {
            return result;
        }
    }
}
