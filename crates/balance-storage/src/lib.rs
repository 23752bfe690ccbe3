//! File-backed implementations of the `KvStore` contract.
//! Values are written atomically; sealing with AES-GCM is opt-in, with the
//! data key held in the OS keyring (or a test double).

pub mod codec;
pub mod file_store;
pub mod key_provider;

pub use codec::{Codec, CodecError, PlainCodec, SealedCodec};
pub use file_store::FileStore;
