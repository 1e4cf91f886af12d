//! `ComponentCatalog` — schemas plus the factory map that builds components.
//!
//! Two names identify a component type:
//!
//! | Name            | Example               | Selects                      |
//! |-----------------|-----------------------|------------------------------|
//! | object type     | `Circuit_LogicGate_2` | the field schema             |
//! | type name       | `LogicGate2`          | the factory (the behavior)   |
//!
//! Save records carry both.  Hosts creating a component from a placed object
//! only know the object type; the catalog maps it to its type name.

use std::collections::HashMap;

use circ_logic::{BinaryGate, ClockGen, FlipFlop, FlipFlopKind, UnaryGate};
use circ_schema::{BinaryOp, FieldKey, FieldMap, FieldSpec, Schema, SchemaError, SchemaRegistry, UnaryOp};
use tracing::debug;

use crate::{Behavior, CircuitError, CircuitResult, Component};

/// Builds a behavior from a component's initial fields.
pub type Factory = fn(&FieldMap) -> Behavior;

#[derive(Clone, Copy)]
struct FactoryEntry {
    build:    Factory,
    /// Keys the behavior reads; every schema it is paired with must have them.
    required: &'static [FieldKey],
}

#[derive(Default)]
pub struct ComponentCatalog {
    schemas:      SchemaRegistry,
    factories:    HashMap<String, FactoryEntry>,
    object_types: HashMap<String, String>,
}

impl ComponentCatalog {
    /// An empty catalog.  See [`standard`][Self::standard] for the built-in
    /// component set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under `type_name`.
    pub fn register_factory(
        &mut self,
        type_name: &str,
        required:  &'static [FieldKey],
        build:     Factory,
    ) -> CircuitResult<()> {
        if self.factories.contains_key(type_name) {
            return Err(CircuitError::DuplicateFactory { type_name: type_name.to_owned() });
        }
        self.factories.insert(type_name.to_owned(), FactoryEntry { build, required });
        Ok(())
    }

    /// Register the schema of `object_type` and pair it with the factory
    /// registered under `type_name`.
    pub fn register_component(
        &mut self,
        object_type: &str,
        type_name:   &str,
        fields:      Vec<FieldSpec>,
    ) -> CircuitResult<()> {
        let entry = self
            .factories
            .get(type_name)
            .ok_or_else(|| CircuitError::UnknownType(type_name.to_owned()))?;
        if let Some(&key) = entry
            .required
            .iter()
            .find(|&&key| !fields.iter().any(|f| f.key == key))
        {
            return Err(CircuitError::MissingField { type_name: type_name.to_owned(), key });
        }
        self.schemas.register(object_type, fields)?;
        self.object_types.insert(object_type.to_owned(), type_name.to_owned());
        debug!(object_type, type_name, "registered component type");
        Ok(())
    }

    pub fn schemas(&self) -> &SchemaRegistry {
        &self.schemas
    }

    pub fn get_schema(&self, object_type: &str) -> Option<&Schema> {
        self.schemas.get_schema(object_type)
    }

    /// Type name paired with `object_type`.
    pub fn type_name_of(&self, object_type: &str) -> Option<&str> {
        self.object_types.get(object_type).map(String::as_str)
    }

    pub fn has_factory(&self, type_name: &str) -> bool {
        self.factories.contains_key(type_name)
    }

    /// Build a component from a complete field map (e.g. a decoded save
    /// record).
    pub fn instantiate(
        &self,
        type_name:   &str,
        object_type: &str,
        region:      &str,
        fields:      FieldMap,
    ) -> CircuitResult<Component> {
        let entry = self
            .factories
            .get(type_name)
            .ok_or_else(|| CircuitError::UnknownType(type_name.to_owned()))?;
        if !self.schemas.contains(object_type) {
            return Err(CircuitError::UnknownObjectType(object_type.to_owned()));
        }
        if let Some(&key) = entry.required.iter().find(|&&key| !fields.contains(key)) {
            return Err(CircuitError::MissingField { type_name: type_name.to_owned(), key });
        }
        let behavior = (entry.build)(&fields);
        Ok(Component::new(type_name, object_type, region, fields, behavior))
    }

    /// Build a component of `object_type` from schema defaults overlaid with
    /// `overrides`.
    ///
    /// # Errors
    /// - [`CircuitError::UnknownObjectType`] for an unregistered object type.
    /// - [`CircuitError::UnknownField`] for an override the schema lacks.
    /// - [`SchemaError::KindMismatch`] for an override of the wrong kind.
    pub fn create(
        &self,
        object_type: &str,
        region:      &str,
        overrides:   &FieldMap,
    ) -> CircuitResult<Component> {
        let schema = self
            .schemas
            .get_schema(object_type)
            .ok_or_else(|| CircuitError::UnknownObjectType(object_type.to_owned()))?;
        let type_name = self
            .type_name_of(object_type)
            .ok_or_else(|| CircuitError::UnknownObjectType(object_type.to_owned()))?;

        let mut fields = schema.defaults();
        for (key, value) in overrides.iter() {
            let spec = schema.spec(key).ok_or_else(|| CircuitError::UnknownField {
                object_type: object_type.to_owned(),
                key,
            })?;
            if value.kind() != spec.kind() {
                return Err(SchemaError::KindMismatch {
                    key,
                    expected: spec.kind().name(),
                    got:      value.kind().name(),
                }
                .into());
            }
            fields.set(key, value.clone());
        }
        self.instantiate(type_name, object_type, region, fields)
    }

    // ── Standard component set ────────────────────────────────────────────

    /// The built-in buttons, switches, lights, gates, clocks and flip-flops.
    pub fn standard() -> CircuitResult<Self> {
        use FieldKey::*;

        let mut catalog = Self::new();
        catalog.register_factory("Button", &[CircuitId, Activated], |_| Behavior::Button)?;
        catalog.register_factory("Switch", &[CircuitId, Activated], |_| Behavior::Switch)?;
        catalog.register_factory("GenericOutput", &[CircuitId, Activated], |_| Behavior::Output)?;
        catalog.register_factory(
            "LogicGate2",
            &[InputA, InputB, LogicOp, Output, Activated],
            |_| Behavior::Gate2(BinaryGate::new()),
        )?;
        catalog.register_factory(
            "LogicGate1",
            &[InputA, LogicOp, Output, Activated],
            |_| Behavior::Gate1(UnaryGate::new()),
        )?;
        catalog.register_factory(
            "Clock",
            &[CircuitId, Activated, ClockOnMax, ClockOffMax],
            |_| Behavior::Clock(ClockGen::new()),
        )?;
        catalog.register_factory(
            "DFlipFlop",
            &[InputA, InputClock, Output, Activated],
            |_| Behavior::FlipFlop(FlipFlop::new(FlipFlopKind::D)),
        )?;
        catalog.register_factory(
            "TFlipFlop",
            &[InputA, InputClock, Output, Activated],
            |_| Behavior::FlipFlop(FlipFlop::new(FlipFlopKind::T)),
        )?;
        catalog.register_factory(
            "JKFlipFlop",
            &[InputA, InputB, InputClock, Output, Activated],
            |_| Behavior::FlipFlop(FlipFlop::new(FlipFlopKind::JK)),
        )?;

        let plain = || vec![FieldSpec::text(CircuitId, "default"), FieldSpec::activity()];
        catalog.register_component("Circuit_Button", "Button", plain())?;
        catalog.register_component("Circuit_Switch", "Switch", plain())?;
        catalog.register_component(
            "Circuit_Light",
            "GenericOutput",
            vec![
                FieldSpec::text(CircuitId, "default"),
                FieldSpec::activity(),
                FieldSpec::float(Sine, 0.4),
                FieldSpec::float(Flicker, 0.2),
                FieldSpec::float(Strength, 0.7),
                FieldSpec::int(Red, 80),
                FieldSpec::int(Green, 200),
                FieldSpec::int(Blue, 200),
            ],
        )?;
        catalog.register_component(
            "Circuit_LogicGate_2",
            "LogicGate2",
            vec![
                FieldSpec::text(InputA, "defaultA"),
                FieldSpec::text(InputB, "defaultB"),
                FieldSpec::binary_op(LogicOp, BinaryOp::And),
                FieldSpec::text(Output, "defaultOUT"),
                FieldSpec::activity(),
            ],
        )?;
        catalog.register_component(
            "Circuit_LogicGate_1",
            "LogicGate1",
            vec![
                FieldSpec::text(InputA, "default"),
                FieldSpec::unary_op(LogicOp, UnaryOp::Not),
                FieldSpec::text(Output, "defaultOUT"),
                FieldSpec::activity(),
            ],
        )?;
        catalog.register_component(
            "Circuit_Clock",
            "Clock",
            vec![
                FieldSpec::text(CircuitId, "clock"),
                FieldSpec::activity(),
                FieldSpec::int(ClockOnMax, 60),
                FieldSpec::int(ClockOffMax, 60),
            ],
        )?;
        let flip_flop = |inputs: &[(FieldKey, &str)]| {
            let mut fields: Vec<FieldSpec> =
                inputs.iter().map(|&(key, default)| FieldSpec::text(key, default)).collect();
            fields.push(FieldSpec::text(InputClock, "clock"));
            fields.push(FieldSpec::text(Output, "defaultQ"));
            fields.push(FieldSpec::activity());
            fields
        };
        catalog.register_component(
            "Circuit_D_FlipFlop",
            "DFlipFlop",
            flip_flop(&[(InputA, "defaultD")]),
        )?;
        catalog.register_component(
            "Circuit_T_FlipFlop",
            "TFlipFlop",
            flip_flop(&[(InputA, "defaultT")]),
        )?;
        catalog.register_component(
            "Circuit_JK_FlipFlop",
            "JKFlipFlop",
            flip_flop(&[(InputA, "defaultJ"), (InputB, "defaultK")]),
        )?;

        Ok(catalog)
    }
}
