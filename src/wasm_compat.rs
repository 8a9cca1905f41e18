//! Send/Sync bounds that relax on wasm32
//!
//! JS handles held by the browser bridges are neither `Send` nor `Sync`, and
//! wasm32 is single-threaded anyway. Traits in this crate require these
//! markers instead of `Send + Sync` directly so the same trait objects work
//! on both targets.

#[cfg(not(target_arch = "wasm32"))]
pub trait WasmCompatSend: Send {}
#[cfg(not(target_arch = "wasm32"))]
impl<T: Send + ?Sized> WasmCompatSend for T {}

#[cfg(target_arch = "wasm32")]
pub trait WasmCompatSend {}
#[cfg(target_arch = "wasm32")]
impl<T: ?Sized> WasmCompatSend for T {}

#[cfg(not(target_arch = "wasm32"))]
pub trait WasmCompatSync: Sync {}
#[cfg(not(target_arch = "wasm32"))]
impl<T: Sync + ?Sized> WasmCompatSync for T {}

#[cfg(target_arch = "wasm32")]
pub trait WasmCompatSync {}
#[cfg(target_arch = "wasm32")]
impl<T: ?Sized> WasmCompatSync for T {}
