//! Word Scripting Binding
//!
//! Exposes [`word_core::FixedBuffer`] to JavaScript via QuickJS.
//!
//! ## Surface
//!
//! - `new Word()` creates an empty buffer
//! - `w.setBytes(src)` copies an `ArrayBuffer` or any `ArrayBufferView` in,
//!   truncated to 64 bytes
//! - `w.getBytes()` returns a fresh `Uint8Array`
//! - `w.length` is the number of bytes in use
//! - `Word.capacity()` is always 64
//!
//! Non-byte sources throw a `TypeError`. Instances are owned by the QuickJS
//! garbage collector; there is no explicit free.

pub mod error;
pub mod runtime;
pub mod word;

pub use error::ScriptError;
pub use runtime::ScriptRuntime;
pub use word::Word;

pub use rquickjs;
