//! Unit tests for circ-sim.

use circ_core::{CircuitConfig, ComponentId, Tick};
use circ_schema::{BinaryOp, FieldKey, FieldMap, UnaryOp};

use crate::{
    CircuitRegistry, ComponentCatalog, NoopObserver, SaveOutcome, TickObserver, TickReport,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn registry() -> CircuitRegistry {
    registry_with_interval(40)
}

fn registry_with_interval(save_interval_ticks: u64) -> CircuitRegistry {
    let config = CircuitConfig { save_interval_ticks, ..CircuitConfig::default() };
    CircuitRegistry::new(ComponentCatalog::standard().unwrap(), &config)
}

fn fields(pairs: &[(FieldKey, &str)]) -> FieldMap {
    let mut map = FieldMap::new();
    for &(key, value) in pairs {
        map.set(key, value);
    }
    map
}

fn in_circuit(circuit: &str) -> FieldMap {
    fields(&[(FieldKey::CircuitId, circuit)])
}

fn add(reg: &mut CircuitRegistry, object_type: &str, overrides: FieldMap) -> ComponentId {
    reg.create_component(object_type, "SU", &overrides).unwrap()
}

fn activated(reg: &CircuitRegistry, id: ComponentId) -> bool {
    reg.component(id).unwrap().activated()
}

fn tick(reg: &mut CircuitRegistry) -> TickReport {
    reg.tick(&mut NoopObserver).unwrap()
}

/// Records every hook call; answers save requests with a fixed outcome.
struct Recorder {
    powers:  Vec<(Tick, String, bool)>,
    saves:   Vec<Tick>,
    reports: Vec<TickReport>,
    outcome: SaveOutcome,
}

impl Recorder {
    fn new(outcome: SaveOutcome) -> Self {
        Self { powers: vec![], saves: vec![], reports: vec![], outcome }
    }
}

impl TickObserver for Recorder {
    fn on_circuit_power(&mut self, tick: Tick, circuit_id: &str, has_power: bool) {
        self.powers.push((tick, circuit_id.to_owned(), has_power));
    }

    fn on_save_due(&mut self, tick: Tick, _registry: &CircuitRegistry) -> SaveOutcome {
        self.saves.push(tick);
        self.outcome.clone()
    }

    fn on_tick_end(&mut self, report: &TickReport) {
        self.reports.push(report.clone());
    }
}

// ── Catalog ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod catalog {
    use circ_schema::FieldSpec;

    use super::*;
    use crate::{Behavior, CircuitError, CompKind, InputKind};

    #[test]
    fn standard_set_registered() {
        let catalog = ComponentCatalog::standard().unwrap();
        assert_eq!(catalog.schemas().len(), 9);
        assert_eq!(catalog.type_name_of("Circuit_Light"), Some("GenericOutput"));
        assert_eq!(catalog.type_name_of("Circuit_JK_FlipFlop"), Some("JKFlipFlop"));
        assert_eq!(catalog.get_schema("Circuit_Light").unwrap().len(), 8);
    }

    #[test]
    fn standard_schemas_round_trip_defaults() {
        let catalog = ComponentCatalog::standard().unwrap();
        for object_type in catalog.schemas().type_names() {
            let schema = catalog.get_schema(object_type).unwrap();
            let defaults = schema.defaults();
            let encoded = schema.encode_record(&defaults).unwrap();
            assert_eq!(schema.decode_record(&encoded).unwrap(), defaults, "{object_type}");
        }
    }

    #[test]
    fn kinds_follow_behavior() {
        let catalog = ComponentCatalog::standard().unwrap();
        let gate = catalog.create("Circuit_LogicGate_2", "SU", &FieldMap::new()).unwrap();
        assert_eq!(gate.comp_kind(), CompKind::Input);
        assert_eq!(gate.input_kind(), InputKind::LogicGate);
        assert_eq!(gate.current_circuit_id(), "defaultOUT");

        let light = catalog.create("Circuit_Light", "SU", &FieldMap::new()).unwrap();
        assert_eq!(light.comp_kind(), CompKind::Output);
        assert_eq!(light.input_kind(), InputKind::NotAnInput);
        assert_eq!(light.current_circuit_id(), "default");

        let ff = catalog.create("Circuit_T_FlipFlop", "SU", &FieldMap::new()).unwrap();
        assert_eq!(ff.input_kind(), InputKind::FlipFlop);
        assert_eq!(ff.current_circuit_id(), "defaultQ");
        assert!(matches!(ff.behavior(), Behavior::FlipFlop(_)));
    }

    #[test]
    fn overrides_are_checked() {
        let catalog = ComponentCatalog::standard().unwrap();
        assert!(matches!(
            catalog.create("Circuit_Lamp", "SU", &FieldMap::new()),
            Err(CircuitError::UnknownObjectType(_))
        ));
        assert!(matches!(
            catalog.create("Circuit_Button", "SU", &fields(&[(FieldKey::InputA, "X")])),
            Err(CircuitError::UnknownField { key: FieldKey::InputA, .. })
        ));
        let mut wrong_kind = FieldMap::new();
        wrong_kind.set(FieldKey::LogicOp, UnaryOp::Not);
        assert!(matches!(
            catalog.create("Circuit_LogicGate_2", "SU", &wrong_kind),
            Err(CircuitError::Schema(_))
        ));
    }

    #[test]
    fn registration_validates_required_fields() {
        let mut catalog = ComponentCatalog::standard().unwrap();
        let err = catalog
            .register_component(
                "Circuit_HalfGate",
                "LogicGate2",
                vec![FieldSpec::text(FieldKey::InputA, "a"), FieldSpec::activity()],
            )
            .unwrap_err();
        assert!(matches!(err, CircuitError::MissingField { key: FieldKey::InputB, .. }));
        assert!(catalog.get_schema("Circuit_HalfGate").is_none());

        assert!(matches!(
            catalog.register_component("Circuit_X", "Lamp", vec![]),
            Err(CircuitError::UnknownType(_))
        ));
        assert!(matches!(
            catalog.register_factory("Button", &[], |_| Behavior::Button),
            Err(CircuitError::DuplicateFactory { .. })
        ));
    }

    #[test]
    fn custom_type_reuses_factory() {
        let mut catalog = ComponentCatalog::standard().unwrap();
        catalog
            .register_component(
                "Circuit_PressurePlate",
                "Button",
                vec![FieldSpec::text(FieldKey::CircuitId, "plate"), FieldSpec::activity()],
            )
            .unwrap();
        let plate = catalog.create("Circuit_PressurePlate", "SU", &FieldMap::new()).unwrap();
        assert_eq!(plate.type_name(), "Button");
        assert_eq!(plate.current_circuit_id(), "plate");
    }
}

// ── Circuit evaluation ────────────────────────────────────────────────────────

#[cfg(test)]
mod evaluation {
    use super::*;

    #[test]
    fn button_drives_light() {
        let mut reg = registry();
        let button = add(&mut reg, "Circuit_Button", in_circuit("A"));
        let light = add(&mut reg, "Circuit_Light", in_circuit("A"));

        tick(&mut reg);
        assert!(!activated(&reg, light));

        reg.set_raw_activation(button, true).unwrap();
        tick(&mut reg);
        assert!(activated(&reg, light));
        assert!(reg.query_circuit_power("A"));

        reg.set_raw_activation(button, false).unwrap();
        tick(&mut reg);
        assert!(!activated(&reg, light));
        assert!(!reg.query_circuit_power("A"));
    }

    #[test]
    fn outputs_written_only_on_power_change() {
        let mut reg = registry();
        let button = add(&mut reg, "Circuit_Button", in_circuit("A"));
        let light = add(&mut reg, "Circuit_Light", in_circuit("A"));
        let writes = |reg: &CircuitRegistry| reg.component(light).unwrap().activation_writes();

        for _ in 0..5 {
            tick(&mut reg);
        }
        assert_eq!(writes(&reg), 0);

        reg.set_raw_activation(button, true).unwrap();
        for _ in 0..5 {
            tick(&mut reg);
        }
        assert_eq!(writes(&reg), 1);

        reg.set_raw_activation(button, false).unwrap();
        tick(&mut reg);
        tick(&mut reg);
        assert_eq!(writes(&reg), 2);
    }

    #[test]
    fn any_input_powers_circuit() {
        let mut reg = registry();
        add(&mut reg, "Circuit_Switch", in_circuit("A"));
        let second = add(&mut reg, "Circuit_Switch", in_circuit("A"));
        let light = add(&mut reg, "Circuit_Light", in_circuit("A"));
        reg.set_raw_activation(second, true).unwrap();
        tick(&mut reg);
        assert!(activated(&reg, light));
    }

    #[test]
    fn and_gate_reads_previous_tick() {
        let mut reg = registry();
        let x = add(&mut reg, "Circuit_Switch", in_circuit("X"));
        let y = add(&mut reg, "Circuit_Switch", in_circuit("Y"));
        add(
            &mut reg,
            "Circuit_LogicGate_2",
            fields(&[(FieldKey::InputA, "X"), (FieldKey::InputB, "Y"), (FieldKey::Output, "OUT")]),
        );
        let light = add(&mut reg, "Circuit_Light", in_circuit("OUT"));

        // X powered, Y unpowered at T0 → AND(true, false) at T1.
        reg.set_raw_activation(x, true).unwrap();
        tick(&mut reg);
        tick(&mut reg);
        assert!(!reg.query_circuit_power("OUT"));

        // Y powered at T2 → the gate sees it at T3, not T2.
        reg.set_raw_activation(y, true).unwrap();
        tick(&mut reg);
        assert!(reg.query_circuit_power("Y"));
        assert!(!reg.query_circuit_power("OUT"));
        tick(&mut reg);
        assert!(reg.query_circuit_power("OUT"));
        assert!(activated(&reg, light));
    }

    #[test]
    fn chained_gates_settle_one_hop_per_tick() {
        let mut reg = registry();
        let x = add(&mut reg, "Circuit_Switch", in_circuit("X"));
        let buffer = |input: &str, output: &str| {
            let mut f = fields(&[(FieldKey::InputA, input), (FieldKey::Output, output)]);
            f.set(FieldKey::LogicOp, UnaryOp::Buffer);
            f
        };
        let first = buffer("X", "M");
        let second = buffer("M", "N");
        add(&mut reg, "Circuit_LogicGate_1", first);
        add(&mut reg, "Circuit_LogicGate_1", second);
        reg.set_raw_activation(x, true).unwrap();

        let mut trace = Vec::new();
        for _ in 0..3 {
            tick(&mut reg);
            trace.push((reg.query_circuit_power("M"), reg.query_circuit_power("N")));
        }
        assert_eq!(trace, [(false, false), (true, false), (true, true)]);
    }

    #[test]
    fn operator_edit_applies_without_relatching() {
        let mut reg = registry();
        add(
            &mut reg,
            "Circuit_LogicGate_2",
            fields(&[(FieldKey::InputA, "X"), (FieldKey::InputB, "Y"), (FieldKey::Output, "OUT")]),
        );
        let mut nor = FieldMap::new();
        nor.set(FieldKey::LogicOp, BinaryOp::Nor);
        nor.set(FieldKey::InputA, "P");
        nor.set(FieldKey::InputB, "Q");
        nor.set(FieldKey::Output, "OUT2");
        let gate = reg.create_component("Circuit_LogicGate_2", "SU", &nor).unwrap();

        tick(&mut reg);
        assert!(!reg.query_circuit_power("OUT"));
        assert!(reg.query_circuit_power("OUT2"));

        reg.component_mut(gate).unwrap().set_field(FieldKey::LogicOp, BinaryOp::Or);
        tick(&mut reg);
        assert!(!reg.query_circuit_power("OUT2"));
    }

    #[test]
    fn d_flip_flop_in_circuit() {
        let mut reg = registry();
        let d = add(&mut reg, "Circuit_Switch", in_circuit("D"));
        let clk = add(&mut reg, "Circuit_Switch", in_circuit("CLK"));
        add(
            &mut reg,
            "Circuit_D_FlipFlop",
            fields(&[(FieldKey::InputA, "D"), (FieldKey::InputClock, "CLK"), (FieldKey::Output, "Q")]),
        );
        let light = add(&mut reg, "Circuit_Light", in_circuit("Q"));

        reg.set_raw_activation(d, true).unwrap();
        tick(&mut reg);
        tick(&mut reg);
        assert!(!reg.query_circuit_power("Q"));

        // CLK powers at T2; the flip-flop samples the edge at T3 and commits
        // one tick later.
        reg.set_raw_activation(clk, true).unwrap();
        tick(&mut reg);
        tick(&mut reg);
        assert!(!reg.query_circuit_power("Q"));
        tick(&mut reg);
        assert!(reg.query_circuit_power("Q"));
        assert!(activated(&reg, light));

        // D drops with the clock held high: no edge, Q holds.
        reg.set_raw_activation(d, false).unwrap();
        for _ in 0..4 {
            tick(&mut reg);
        }
        assert!(reg.query_circuit_power("Q"));
    }

    #[test]
    fn clock_drives_circuit_independently() {
        let mut reg = registry();
        let mut clock_fields = in_circuit("tick");
        clock_fields.set(FieldKey::ClockOnMax, 2);
        clock_fields.set(FieldKey::ClockOffMax, 2);
        add(&mut reg, "Circuit_Clock", clock_fields);
        let light = add(&mut reg, "Circuit_Light", in_circuit("tick"));

        let wave: Vec<bool> = (0..10)
            .map(|_| {
                tick(&mut reg);
                activated(&reg, light)
            })
            .collect();
        assert_eq!(
            wave,
            [false, false, true, true, false, false, false, true, true, false]
        );
    }

    #[test]
    fn missing_input_circuit_is_unpowered() {
        let mut reg = registry();
        let mut not = fields(&[(FieldKey::InputA, "nowhere"), (FieldKey::Output, "OUT")]);
        not.set(FieldKey::LogicOp, UnaryOp::Not);
        add(&mut reg, "Circuit_LogicGate_1", not);
        tick(&mut reg);
        assert!(reg.query_circuit_power("OUT"));
        assert!(reg.try_get_circuit("nowhere").is_none());
    }
}

// ── Membership ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod membership {
    use super::*;

    #[test]
    fn add_and_remove() {
        let mut reg = registry();
        let button = add(&mut reg, "Circuit_Button", in_circuit("A"));
        let light = add(&mut reg, "Circuit_Light", in_circuit("A"));

        let circuit = reg.try_get_circuit("A").unwrap();
        assert_eq!(circuit.inputs(), &[button]);
        assert_eq!(circuit.outputs(), &[light]);
        assert_eq!(reg.component(button).unwrap().last_circuit_id(), Some("A"));

        assert!(reg.remove_component("A", light));
        assert!(!reg.remove_component("A", light));
        assert!(!reg.remove_component("B", button));
        assert_eq!(reg.member_count(), 1);
    }

    #[test]
    fn empty_circuit_pruned_on_next_tick() {
        let mut reg = registry();
        let button = add(&mut reg, "Circuit_Button", in_circuit("A"));
        add(&mut reg, "Circuit_Button", in_circuit("B"));
        assert!(reg.remove(button).is_some());
        assert!(reg.try_get_circuit("A").is_some());

        let report = tick(&mut reg);
        assert_eq!(report.pruned, 1);
        assert_eq!(report.circuits, 1);
        assert!(reg.try_get_circuit("A").is_none());
        assert!(reg.try_get_circuit("B").is_some());
    }

    #[test]
    fn migration_resets_output() {
        let mut reg = registry();
        let button = add(&mut reg, "Circuit_Button", in_circuit("A"));
        let light = add(&mut reg, "Circuit_Light", in_circuit("A"));
        add(&mut reg, "Circuit_Switch", in_circuit("B"));
        reg.set_raw_activation(button, true).unwrap();
        tick(&mut reg);
        assert!(activated(&reg, light));

        reg.component_mut(light).unwrap().set_field(FieldKey::CircuitId, "B");
        let report = tick(&mut reg);
        assert_eq!(report.migrations, 1);
        assert!(!activated(&reg, light));
        assert_eq!(reg.try_get_circuit("B").unwrap().outputs(), &[light]);
        assert!(reg.try_get_circuit("A").unwrap().outputs().is_empty());

        tick(&mut reg);
        assert!(!activated(&reg, light));
    }

    #[test]
    fn migration_clears_flip_flop_pending_state() {
        let mut reg = registry();
        let d = add(&mut reg, "Circuit_Switch", in_circuit("D"));
        let clk = add(&mut reg, "Circuit_Switch", in_circuit("CLK"));
        let ff = add(
            &mut reg,
            "Circuit_D_FlipFlop",
            fields(&[(FieldKey::InputA, "D"), (FieldKey::InputClock, "CLK"), (FieldKey::Output, "Q")]),
        );
        reg.set_raw_activation(d, true).unwrap();
        reg.set_raw_activation(clk, true).unwrap();
        tick(&mut reg);
        // The edge is sampled at T1 and would commit at T2, but the
        // migration at the end of T1 clears the pending state.
        reg.component_mut(ff).unwrap().set_field(FieldKey::Output, "Q2");
        for _ in 0..3 {
            tick(&mut reg);
        }
        assert!(!reg.query_circuit_power("Q2"));
        assert!(reg.try_get_circuit("Q").is_none());
    }

    #[test]
    fn host_remove_drops_component() {
        let mut reg = registry();
        let light = add(&mut reg, "Circuit_Light", in_circuit("A"));
        let removed = reg.remove(light).unwrap();
        assert_eq!(removed.object_type(), "Circuit_Light");
        assert!(reg.component(light).is_none());
        assert!(reg.remove(light).is_none());
        assert!(reg.set_raw_activation(light, true).is_err());
    }
}

// ── Live binding ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod live {
    use super::*;
    use crate::LiveObject;

    fn light_object(circuit: &str) -> crate::LiveHandle {
        let catalog = ComponentCatalog::standard().unwrap();
        let mut fields = catalog.get_schema("Circuit_Light").unwrap().defaults();
        fields.set(FieldKey::CircuitId, circuit);
        LiveObject::new("Circuit_Light", "SU", fields).into_handle()
    }

    #[test]
    fn new_live_object_creates_component() {
        let mut reg = registry();
        let live = light_object("A");
        let id = reg.bind_live(&live).unwrap();
        assert_eq!(reg.component_count(), 1);
        assert!(reg.component(id).unwrap().is_bound());
        assert_eq!(reg.try_get_circuit("A").unwrap().outputs(), &[id]);
    }

    #[test]
    fn reload_binds_existing_component_and_keeps_state() {
        let mut reg = registry();
        let button = add(&mut reg, "Circuit_Button", in_circuit("A"));
        let first = light_object("A");
        let light = reg.bind_live(&first).unwrap();
        reg.set_raw_activation(button, true).unwrap();
        tick(&mut reg);
        assert!(first.borrow().fields.flag(FieldKey::Activated).unwrap());

        // Region unloads; the component keeps simulating abstractly.
        drop(first);
        tick(&mut reg);
        assert!(!reg.component(light).unwrap().is_bound());
        assert!(activated(&reg, light));

        // Region reloads with a fresh, unpowered live object.
        let second = light_object("A");
        assert_eq!(reg.bind_live(&second).unwrap(), light);
        assert_eq!(reg.component_count(), 2);
        assert!(second.borrow().fields.flag(FieldKey::Activated).unwrap());
    }

    #[test]
    fn different_configuration_is_a_new_component() {
        let mut reg = registry();
        let a = reg.bind_live(&light_object("A")).unwrap();
        let b = reg.bind_live(&light_object("B")).unwrap();
        assert_ne!(a, b);
        assert_eq!(reg.component_count(), 2);
    }

    #[test]
    fn bound_component_is_not_matched_twice() {
        let mut reg = registry();
        let first = light_object("A");
        let second = light_object("A");
        let a = reg.bind_live(&first).unwrap();
        let b = reg.bind_live(&second).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn live_edit_triggers_migration() {
        let mut reg = registry();
        let live = light_object("A");
        let id = reg.bind_live(&live).unwrap();
        live.borrow_mut().fields.set(FieldKey::CircuitId, "B");
        let report = tick(&mut reg);
        assert_eq!(report.migrations, 1);
        assert_eq!(reg.component(id).unwrap().current_circuit_id(), "B");
        assert!(reg.try_get_circuit("B").unwrap().contains(id));
    }

    #[test]
    fn live_activation_is_source_of_truth() {
        let mut reg = registry();
        let catalog = ComponentCatalog::standard().unwrap();
        let mut fields = catalog.get_schema("Circuit_Switch").unwrap().defaults();
        fields.set(FieldKey::CircuitId, "A");
        let live = LiveObject::new("Circuit_Switch", "SU", fields).into_handle();
        let switch = reg.bind_live(&live).unwrap();
        let light = add(&mut reg, "Circuit_Light", in_circuit("A"));

        live.borrow_mut().fields.set(FieldKey::Activated, true);
        assert!(activated(&reg, switch));
        tick(&mut reg);
        assert!(activated(&reg, light));
    }

    #[test]
    fn slated_object_unbinds() {
        let mut reg = registry();
        let live = light_object("A");
        let id = reg.bind_live(&live).unwrap();
        live.borrow_mut().slated_for_deletion = true;
        tick(&mut reg);
        assert!(!reg.component(id).unwrap().is_bound());
    }

    #[test]
    fn destroy_live_binding() {
        let mut reg = registry();
        let live = light_object("A");
        let id = reg.bind_live(&live).unwrap();
        assert!(reg.destroy_live_binding(id));
        assert!(!reg.destroy_live_binding(id));
        assert!(!reg.component(id).unwrap().is_bound());
        assert!(reg.component(id).is_some());
    }
}

// ── Observer and save throttling ──────────────────────────────────────────────

#[cfg(test)]
mod observer {
    use super::*;
    use crate::TickObserverExt;

    #[test]
    fn power_reported_per_circuit() {
        let mut reg = registry();
        let button = add(&mut reg, "Circuit_Button", in_circuit("A"));
        add(&mut reg, "Circuit_Light", in_circuit("B"));
        reg.set_raw_activation(button, true).unwrap();

        let mut rec = Recorder::new(SaveOutcome::NotHandled);
        reg.tick(&mut rec).unwrap();
        assert_eq!(
            rec.powers,
            [(Tick(0), "A".to_owned(), true), (Tick(0), "B".to_owned(), false)]
        );
        assert_eq!(rec.reports.len(), 1);
        assert_eq!(rec.reports[0].circuits, 2);
    }

    #[test]
    fn save_throttled_and_gated_on_changes() {
        let mut reg = registry_with_interval(2);
        add(&mut reg, "Circuit_Button", in_circuit("A"));
        let mut rec = Recorder::new(SaveOutcome::Saved);

        reg.run_ticks(6, &mut rec).unwrap();
        // Due at T1, T3, T5; only the first sees a change.
        assert_eq!(rec.saves, [Tick(1)]);
        assert!(rec.reports[1].saved);
        assert!(!reg.needs_save());

        add(&mut reg, "Circuit_Light", in_circuit("A"));
        reg.run_ticks(2, &mut rec).unwrap();
        assert_eq!(rec.saves, [Tick(1), Tick(7)]);
    }

    #[test]
    fn migration_marks_dirty() {
        let mut reg = registry_with_interval(2);
        let light = add(&mut reg, "Circuit_Light", in_circuit("A"));
        let mut rec = Recorder::new(SaveOutcome::Saved);
        reg.run_ticks(2, &mut rec).unwrap();
        assert_eq!(rec.saves.len(), 1);

        reg.component_mut(light).unwrap().set_field(FieldKey::CircuitId, "B");
        reg.run_ticks(2, &mut rec).unwrap();
        assert_eq!(rec.saves.len(), 2);
    }

    #[test]
    fn failed_save_retried_next_interval() {
        let mut reg = registry_with_interval(2);
        add(&mut reg, "Circuit_Button", in_circuit("A"));
        let mut rec = Recorder::new(SaveOutcome::Failed("disk full".to_owned()));
        reg.run_ticks(4, &mut rec).unwrap();
        assert_eq!(rec.saves, [Tick(1), Tick(3)]);
        assert!(rec.reports.iter().all(|r| !r.saved));
        assert!(reg.needs_save());
    }

    #[test]
    fn unhandled_save_keeps_dirty() {
        let mut reg = registry_with_interval(1);
        add(&mut reg, "Circuit_Button", in_circuit("A"));
        let report = tick(&mut reg);
        assert!(!report.saved);
        assert!(reg.needs_save());
    }

    #[test]
    fn chained_observers_both_called() {
        let mut reg = registry_with_interval(1);
        add(&mut reg, "Circuit_Button", in_circuit("A"));
        let mut chain = Recorder::new(SaveOutcome::NotHandled)
            .then(Recorder::new(SaveOutcome::Saved));
        let report = reg.tick(&mut chain).unwrap();
        assert!(report.saved);
        assert_eq!(chain.first.powers.len(), 1);
        assert_eq!(chain.second.powers.len(), 1);
        assert_eq!(chain.first.saves, chain.second.saves);
    }

    #[test]
    fn outcome_merge() {
        use SaveOutcome::*;
        assert_eq!(NotHandled.merge(Saved), Saved);
        assert_eq!(Saved.merge(Failed("x".into())), Failed("x".into()));
        assert_eq!(NotHandled.merge(NotHandled), NotHandled);
        assert_eq!(Failed("a".into()).merge(Failed("b".into())), Failed("a; b".into()));
    }
}
