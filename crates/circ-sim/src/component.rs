//! `Component` — one persistent circuit element.
//!
//! A component is a schema-backed field bag plus the logic sub-state its
//! behavior needs.  Every kind shares one struct; the [`Behavior`] tag picks
//! what the component does each tick and how its circuit reads it.

use std::cell::RefCell;
use std::rc::Weak;

use circ_logic::{BinaryGate, ClockGen, FlipFlop, FlipFlopKind, LogicGate, LogicResult, Pin, PinMap, UnaryGate};
use circ_schema::{FieldKey, FieldMap};

use crate::{LiveObject, TickContext};

/// Whether a component feeds its circuit or is driven by it.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum CompKind {
    Input,
    Output,
}

/// Input flavour; outputs carry `NotAnInput`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum InputKind {
    NotAnInput,
    Button,
    Switch,
    LogicGate,
    Clock,
    FlipFlop,
}

/// What a component does, with the logic state that behavior owns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Behavior {
    Button,
    Switch,
    Output,
    Gate2(BinaryGate),
    Gate1(UnaryGate),
    FlipFlop(FlipFlop),
    Clock(ClockGen),
}

impl Behavior {
    pub fn comp_kind(&self) -> CompKind {
        match self {
            Behavior::Output => CompKind::Output,
            _ => CompKind::Input,
        }
    }

    pub fn input_kind(&self) -> InputKind {
        match self {
            Behavior::Button      => InputKind::Button,
            Behavior::Switch      => InputKind::Switch,
            Behavior::Output      => InputKind::NotAnInput,
            Behavior::Gate2(_)    |
            Behavior::Gate1(_)    => InputKind::LogicGate,
            Behavior::FlipFlop(_) => InputKind::FlipFlop,
            Behavior::Clock(_)    => InputKind::Clock,
        }
    }

    /// Field naming the circuit this behavior belongs to.
    pub fn membership_key(&self) -> FieldKey {
        match self.input_kind() {
            InputKind::LogicGate | InputKind::FlipFlop => FieldKey::Output,
            _ => FieldKey::CircuitId,
        }
    }
}

// ── Component ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Component {
    type_name:   String,
    object_type: String,
    region:      String,
    fields:      FieldMap,
    behavior:    Behavior,
    pub(crate) last_circuit_id: Option<String>,
    live:        Option<Weak<RefCell<LiveObject>>>,
    /// Number of `activated` writes made by the simulation.
    activation_writes: u64,
}

impl Component {
    pub fn new(
        type_name:   impl Into<String>,
        object_type: impl Into<String>,
        region:      impl Into<String>,
        fields:      FieldMap,
        behavior:    Behavior,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            object_type: object_type.into(),
            region: region.into(),
            fields,
            behavior,
            last_circuit_id: None,
            live: None,
            activation_writes: 0,
        }
    }

    // ── Identity ──────────────────────────────────────────────────────────

    /// Registered type name (selects the factory).
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Placed object type (selects the schema).
    pub fn object_type(&self) -> &str {
        &self.object_type
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn behavior(&self) -> &Behavior {
        &self.behavior
    }

    pub fn comp_kind(&self) -> CompKind {
        self.behavior.comp_kind()
    }

    pub fn input_kind(&self) -> InputKind {
        self.behavior.input_kind()
    }

    // ── Fields ────────────────────────────────────────────────────────────

    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    /// Fields as they should be persisted: `activated` read through the live
    /// binding when one exists.
    pub fn persisted_fields(&self) -> FieldMap {
        let mut fields = self.fields.clone();
        fields.set(FieldKey::Activated, self.activated());
        fields
    }

    /// Overwrite one configured field.  A change to the membership field
    /// is picked up by the next registry tick's migration scan.
    pub fn set_field(&mut self, key: FieldKey, value: impl Into<circ_schema::FieldValue>) {
        let value = value.into();
        if let Some(live) = self.live_object() {
            live.borrow_mut().fields.set(key, value.clone());
        }
        self.fields.set(key, value);
    }

    /// Circuit this component belongs to according to its fields.
    pub fn current_circuit_id(&self) -> &str {
        self.fields.text(self.behavior.membership_key()).unwrap_or_default()
    }

    /// Circuit this component was last added to.
    pub fn last_circuit_id(&self) -> Option<&str> {
        self.last_circuit_id.as_deref()
    }

    pub fn needs_migration(&self) -> bool {
        self.last_circuit_id.as_deref() != Some(self.current_circuit_id())
    }

    // ── Activation ────────────────────────────────────────────────────────

    /// The live object's value while bound, otherwise the stored field.
    pub fn activated(&self) -> bool {
        if let Some(live) = self.live_object() {
            if let Some(value) = live.borrow().fields.flag(FieldKey::Activated) {
                return value;
            }
        }
        self.fields.flag(FieldKey::Activated).unwrap_or(false)
    }

    /// Write `activated` to the fields and, if bound, to the live object.
    pub fn set_activated(&mut self, value: bool) {
        if let Some(live) = self.live_object() {
            live.borrow_mut().fields.set(FieldKey::Activated, value);
        }
        self.fields.set(FieldKey::Activated, value);
        self.activation_writes += 1;
    }

    pub fn activation_writes(&self) -> u64 {
        self.activation_writes
    }

    // ── Live binding ──────────────────────────────────────────────────────

    pub fn is_bound(&self) -> bool {
        self.live_object().is_some()
    }

    /// Holds a live reference, possibly to an object that has since died.
    pub(crate) fn has_live_ref(&self) -> bool {
        self.live.is_some()
    }

    pub(crate) fn bind(&mut self, live: Weak<RefCell<LiveObject>>) {
        self.live = Some(live);
    }

    /// Drop the live reference.  Returns whether one was held.
    pub(crate) fn unbind(&mut self) -> bool {
        self.live.take().is_some()
    }

    pub(crate) fn live_object(&self) -> Option<std::rc::Rc<RefCell<LiveObject>>> {
        self.live.as_ref().and_then(Weak::upgrade)
    }

    /// Pull configured fields from the live object.  Unbinds (and returns
    /// `false`) when the live object is gone or slated for deletion.
    pub(crate) fn sync_from_live(&mut self) -> bool {
        let Some(live) = self.live_object() else {
            self.live = None;
            return false;
        };
        let live = live.borrow();
        if live.slated_for_deletion {
            drop(live);
            self.live = None;
            return false;
        }
        self.fields.extend(live.fields.iter().map(|(k, v)| (k, v.clone())));
        true
    }

    // ── Per-tick logic ────────────────────────────────────────────────────

    /// Feed previous-tick circuit power into a gate or flip-flop.  Other
    /// behaviors ignore the call.
    pub(crate) fn refresh(&mut self, ctx: &TickContext<'_>) -> LogicResult<()> {
        let power = |key: FieldKey| ctx.circuit_power(self.fields.text(key).unwrap_or_default());
        match &mut self.behavior {
            Behavior::Gate2(gate) => {
                let a = power(FieldKey::InputA);
                let b = power(FieldKey::InputB);
                gate.set_inputs(&[a, b])
            }
            Behavior::Gate1(gate) => gate.set_inputs(&[power(FieldKey::InputA)]),
            Behavior::FlipFlop(ff) => {
                let mut pins = PinMap::new();
                match ff.kind() {
                    FlipFlopKind::D => {
                        pins.insert(Pin::D, power(FieldKey::InputA));
                    }
                    FlipFlopKind::T => {
                        pins.insert(Pin::T, power(FieldKey::InputA));
                    }
                    FlipFlopKind::JK => {
                        pins.insert(Pin::J, power(FieldKey::InputA));
                        pins.insert(Pin::K, power(FieldKey::InputB));
                    }
                }
                pins.insert(Pin::Clock, power(FieldKey::InputClock));
                ff.step(pins)
            }
            _ => Ok(()),
        }
    }

    /// Whether this input powers its circuit this tick.
    pub(crate) fn powers_circuit(&self) -> bool {
        match &self.behavior {
            Behavior::Gate2(gate) => {
                gate.output(self.fields.binary_op(FieldKey::LogicOp).unwrap_or_default())
            }
            Behavior::Gate1(gate) => {
                gate.output(self.fields.unary_op(FieldKey::LogicOp).unwrap_or_default())
            }
            Behavior::FlipFlop(ff) => ff.output(),
            Behavior::Output => false,
            _ => self.activated(),
        }
    }

    /// Advance a clock generator; no-op for every other behavior.
    pub(crate) fn tick_clock(&mut self) {
        let on_max = self.fields.int(FieldKey::ClockOnMax).unwrap_or_default();
        let off_max = self.fields.int(FieldKey::ClockOffMax).unwrap_or_default();
        let Behavior::Clock(clock) = &mut self.behavior else {
            return;
        };
        if let Some(level) = clock.tick(on_max, off_max) {
            self.set_activated(level);
        }
    }

    /// Power-off reset applied when the component changes circuit.
    pub(crate) fn reset_on_migration(&mut self) {
        if let Behavior::FlipFlop(ff) = &mut self.behavior {
            ff.clear();
        }
        if self.comp_kind() == CompKind::Output {
            self.set_activated(false);
        }
    }
}
