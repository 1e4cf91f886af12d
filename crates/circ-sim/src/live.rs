//! Live objects and the reconciler that binds them to persistent components.
//!
//! A live object is the in-scene representation of a component.  It comes
//! and goes as the host loads and unloads regions, while the persistent
//! component keeps simulating.  When a live object appears, the reconciler
//! looks for a persistent component with the same configuration and binds
//! to it instead of creating a duplicate, so circuit state survives a
//! region reload.

use std::cell::RefCell;
use std::rc::Rc;

use circ_core::ComponentId;
use circ_schema::{FieldKey, FieldMap};
use tracing::debug;

use crate::{CircuitError, CircuitRegistry, CircuitResult};

/// The host's view of one materialised component.
#[derive(Clone, Debug, PartialEq)]
pub struct LiveObject {
    pub object_type: String,
    pub region:      String,
    /// Configured fields.  The host may write `activated` here directly;
    /// the bound component reads it through the binding.
    pub fields:      FieldMap,
    /// Set by the host when the object is about to be destroyed.
    pub slated_for_deletion: bool,
}

/// Shared handle to a live object.  Components hold a `Weak` to it.
pub type LiveHandle = Rc<RefCell<LiveObject>>;

impl LiveObject {
    pub fn new(object_type: impl Into<String>, region: impl Into<String>, fields: FieldMap) -> Self {
        Self {
            object_type: object_type.into(),
            region: region.into(),
            fields,
            slated_for_deletion: false,
        }
    }

    /// Wrap in a [`LiveHandle`].
    pub fn into_handle(self) -> LiveHandle {
        Rc::new(RefCell::new(self))
    }
}

impl CircuitRegistry {
    /// Bind a freshly materialised live object to its persistent component,
    /// creating and registering one if none matches.
    ///
    /// A component matches when its object type, region and every
    /// non-runtime field equal the live object's, and it is not already bound
    /// to another live object.  On a match the component's `activated` value
    /// is pushed into the live object so the scene shows the preserved state.
    pub fn bind_live(&mut self, live: &LiveHandle) -> CircuitResult<ComponentId> {
        let (object_type, region, fields) = {
            let obj = live.borrow();
            (obj.object_type.clone(), obj.region.clone(), obj.fields.clone())
        };
        let runtime = self
            .catalog
            .get_schema(&object_type)
            .ok_or_else(|| CircuitError::UnknownObjectType(object_type.clone()))?
            .runtime_keys();

        let matched = self.components.iter_mut().find(|(_, c)| {
            c.object_type() == object_type
                && c.region() == region
                && !c.is_bound()
                && c.fields().matches_except(&fields, &runtime)
        });

        if let Some((&id, component)) = matched {
            let activated = component.activated();
            component.bind(Rc::downgrade(live));
            live.borrow_mut().fields.set(FieldKey::Activated, activated);
            debug!(%id, %object_type, %region, "bound live object to existing component");
            return Ok(id);
        }

        let mut component = self.catalog.create(&object_type, &region, &fields)?;
        component.bind(Rc::downgrade(live));
        let circuit_id = component.current_circuit_id().to_owned();
        let id = self.add_component(&circuit_id, component);
        debug!(%id, %object_type, %region, %circuit_id, "created component for live object");
        Ok(id)
    }

    /// Drop a component's live binding; the component keeps simulating.
    /// Returns whether it was bound.
    pub fn destroy_live_binding(&mut self, id: ComponentId) -> bool {
        self.components.get_mut(&id).is_some_and(|c| c.unbind())
    }
}
