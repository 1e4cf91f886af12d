//! `Circuit` — a named group of components sharing one power value.

use std::collections::BTreeMap;

use circ_core::ComponentId;

use crate::{CircuitResult, CompKind, Component, TickContext};

/// Every component a registry owns, keyed by handle.
pub type ComponentMap = BTreeMap<ComponentId, Component>;

/// Members are held by handle, in insertion order.
#[derive(Clone, Debug, Default)]
pub struct Circuit {
    id:          String,
    inputs:      Vec<ComponentId>,
    outputs:     Vec<ComponentId>,
    has_power:   bool,
    had_power_prev_tick: bool,
}

impl Circuit {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), ..Self::default() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn inputs(&self) -> &[ComponentId] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[ComponentId] {
        &self.outputs
    }

    pub fn has_power(&self) -> bool {
        self.has_power
    }

    pub fn len(&self) -> usize {
        self.inputs.len() + self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty() && self.outputs.is_empty()
    }

    pub fn contains(&self, id: ComponentId) -> bool {
        self.inputs.contains(&id) || self.outputs.contains(&id)
    }

    pub(crate) fn insert(&mut self, id: ComponentId, kind: CompKind) {
        match kind {
            CompKind::Input  => self.inputs.push(id),
            CompKind::Output => self.outputs.push(id),
        }
    }

    pub(crate) fn remove(&mut self, id: ComponentId, kind: CompKind) -> bool {
        let list = match kind {
            CompKind::Input  => &mut self.inputs,
            CompKind::Output => &mut self.outputs,
        };
        match list.iter().position(|&m| m == id) {
            Some(pos) => {
                list.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Evaluate one tick.
    ///
    /// 1. Clear `has_power`.
    /// 2. Latch previous-tick power into every gate.
    /// 3. Step every flip-flop (delay, inputs, clock edge).
    /// 4. Power the circuit if any input is on.
    /// 5. Write `activated` to the outputs only when power changed.
    ///
    /// Returns whether the outputs were written.
    pub(crate) fn tick(
        &mut self,
        components: &mut ComponentMap,
        ctx:        &TickContext<'_>,
    ) -> CircuitResult<bool> {
        self.has_power = false;

        for id in &self.inputs {
            if let Some(component) = components.get_mut(id) {
                component.refresh(ctx)?;
            }
        }

        self.has_power = self
            .inputs
            .iter()
            .filter_map(|id| components.get(id))
            .any(Component::powers_circuit);

        if self.has_power == self.had_power_prev_tick {
            return Ok(false);
        }
        for id in &self.outputs {
            if let Some(component) = components.get_mut(id) {
                component.set_activated(self.has_power);
            }
        }
        self.had_power_prev_tick = self.has_power;
        Ok(true)
    }
}
