//! Strongly typed identifier wrappers.
//!
//! Circuits are addressed by their string id (that is what save files and
//! gate inputs carry); components get a registry-assigned integer handle so
//! circuits can list their members without holding references.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        $vis struct $name(pub $inner);

        impl $name {
            /// The ID following `self`; used by allocators handing out
            /// monotonically increasing handles.
            #[inline]
            pub fn next(self) -> $name {
                $name(self.0 + 1)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Registry handle of one persistent component.  Handles are never
    /// reused within a registry's lifetime.
    pub struct ComponentId(u32);
}
