//! `circ-persist` — save files for the circuit registry.
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`codec`]    | `~`-separated save lines, escaping, `SaveRecord`          |
//! | [`store`]    | `RegionStore` (one file per region), `load_str`           |
//! | [`observer`] | `SaveObserver` — saves on the registry's throttled ticks  |
//! | [`error`]    | `PersistError`, `RecordError`                             |
//!
//! # Usage
//!
//! ```rust,ignore
//! use circ_persist::{RegionStore, SaveObserver};
//!
//! let store = RegionStore::open("./saves")?;
//! store.load_region(&mut registry, "SU")?;
//! let mut saver = SaveObserver::new(store);
//! registry.run_ticks(400, &mut saver)?;
//! ```

pub mod codec;
pub mod error;
pub mod observer;
pub mod store;


pub use codec::{decode_line, encode_line, escape, split_line, SaveRecord, SEPARATOR};
pub use error::{PersistError, PersistResult, RecordError};
pub use observer::SaveObserver;
pub use store::{load_str, LoadReport, RegionStore};
