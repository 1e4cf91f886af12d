//! `circ-sim` — components, circuits and the registry tick loop.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`component`] | `Component`, `Behavior`, `CompKind`, `InputKind`             |
//! | [`catalog`]   | `ComponentCatalog` — schemas + factory map, standard set     |
//! | [`circuit`]   | `Circuit` — member lists and the five-step circuit tick      |
//! | [`context`]   | `TickContext` — previous-tick power snapshot                 |
//! | [`registry`]  | `CircuitRegistry` — membership, migration, tick, throttling  |
//! | [`live`]      | `LiveObject`, `LiveHandle`, live binding reconciler          |
//! | [`observer`]  | `TickObserver`, `NoopObserver`, `TickReport`, chaining       |
//! | [`error`]     | `CircuitError`, `CircuitResult<T>`                           |
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                    |
//! |-----------|-----------------------------------------------------------|
//! | `fx-hash` | FxHash for the per-tick circuit power snapshot.           |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use circ_core::CircuitConfig;
//! use circ_schema::{FieldKey, FieldMap};
//! use circ_sim::{CircuitRegistry, ComponentCatalog, NoopObserver};
//!
//! let mut registry = CircuitRegistry::new(ComponentCatalog::standard()?, &CircuitConfig::default());
//! let mut on_a = FieldMap::new();
//! on_a.set(FieldKey::CircuitId, "A");
//! let button = registry.create_component("Circuit_Button", "SU", &on_a)?;
//! let light = registry.create_component("Circuit_Light", "SU", &on_a)?;
//! registry.set_raw_activation(button, true)?;
//! registry.tick(&mut NoopObserver)?;
//! assert!(registry.component(light).unwrap().activated());
//! ```

pub mod catalog;
pub mod circuit;
pub mod component;
pub mod context;
pub mod error;
pub mod live;
pub mod observer;
pub mod registry;

#[cfg(test)]
mod tests;

pub use catalog::{ComponentCatalog, Factory};
pub use circuit::{Circuit, ComponentMap};
pub use component::{Behavior, CompKind, Component, InputKind};
pub use context::TickContext;
pub use error::{CircuitError, CircuitResult};
pub use live::{LiveHandle, LiveObject};
pub use observer::{ChainedObserver, NoopObserver, SaveOutcome, TickObserver, TickObserverExt, TickReport};
pub use registry::CircuitRegistry;
