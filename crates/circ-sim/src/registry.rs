//! `CircuitRegistry` — owns circuits and components and drives the tick.

use std::collections::{BTreeMap, BTreeSet};

use circ_core::{CircuitConfig, ComponentId, Tick};
use circ_schema::FieldMap;
use tracing::{debug, info, warn};

use crate::circuit::ComponentMap;
use crate::context::PowerMap;
use crate::{
    Circuit, CircuitError, CircuitResult, Component, ComponentCatalog, SaveOutcome, TickContext,
    TickObserver, TickReport,
};

/// The circuit controller.
///
/// # Tick order
///
/// ```text
/// ① Live sync   — bound components pull fields from their live objects;
///                  dead or deleted live objects are unbound.
/// ② Clocks      — every clock generator counts down.
/// ③ Snapshot    — each circuit's power from the previous tick is captured.
/// ④ Circuits    — empty circuits are marked, the rest evaluated.
/// ⑤ Prune       — marked circuits are removed.
/// ⑥ Migrate     — components whose circuit field changed are collected,
///                  then moved (with their power-off reset).
/// ⑦ Throttle    — every `save_interval_ticks` ticks, if the topology changed
///                  since the last successful save, the observer saves.
/// ```
///
/// One registry is confined to one thread; the live binding holds `Rc`s.
pub struct CircuitRegistry {
    pub(crate) catalog:    ComponentCatalog,
    pub(crate) components: ComponentMap,
    circuits:        BTreeMap<String, Circuit>,
    next_id:         ComponentId,
    now:             Tick,
    save_interval:   u64,
    loaded_regions:  BTreeSet<String>,
    /// A migration happened since the last successful save.
    dirty:           bool,
    members_at_save: usize,
}

impl CircuitRegistry {
    pub fn new(catalog: ComponentCatalog, config: &CircuitConfig) -> Self {
        Self {
            catalog,
            components: ComponentMap::new(),
            circuits: BTreeMap::new(),
            next_id: ComponentId(0),
            now: Tick::ZERO,
            save_interval: config.save_interval_ticks,
            loaded_regions: BTreeSet::new(),
            dirty: false,
            members_at_save: 0,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn catalog(&self) -> &ComponentCatalog {
        &self.catalog
    }

    /// The next tick to be evaluated.
    pub fn now(&self) -> Tick {
        self.now
    }

    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.components.get(&id)
    }

    pub fn component_mut(&mut self, id: ComponentId) -> Option<&mut Component> {
        self.components.get_mut(&id)
    }

    pub fn components(&self) -> impl Iterator<Item = (ComponentId, &Component)> {
        self.components.iter().map(|(id, c)| (*id, c))
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn circuits(&self) -> impl Iterator<Item = &Circuit> {
        self.circuits.values()
    }

    pub fn circuit_count(&self) -> usize {
        self.circuits.len()
    }

    /// Total circuit memberships.
    pub fn member_count(&self) -> usize {
        self.circuits.values().map(Circuit::len).sum()
    }

    /// Read-only circuit lookup; `None` when absent.
    pub fn try_get_circuit(&self, id: &str) -> Option<&Circuit> {
        self.circuits.get(id)
    }

    /// Current power of a circuit; an absent circuit is unpowered.
    pub fn query_circuit_power(&self, circuit_id: &str) -> bool {
        self.try_get_circuit(circuit_id).is_some_and(Circuit::has_power)
    }

    // ── Regions ───────────────────────────────────────────────────────────

    pub fn mark_region_loaded(&mut self, region: &str) {
        self.loaded_regions.insert(region.to_owned());
    }

    pub fn is_region_loaded(&self, region: &str) -> bool {
        self.loaded_regions.contains(region)
    }

    pub fn loaded_regions(&self) -> impl Iterator<Item = &str> {
        self.loaded_regions.iter().map(String::as_str)
    }

    /// Handles of every component saved under `region`.
    pub fn region_components(&self, region: &str) -> Vec<ComponentId> {
        self.components
            .iter()
            .filter(|(_, c)| c.region() == region)
            .map(|(id, _)| *id)
            .collect()
    }

    // ── Membership ────────────────────────────────────────────────────────

    /// Take ownership of `component` and add it to `circuit_id`, creating the
    /// circuit if needed.
    pub fn add_component(&mut self, circuit_id: &str, component: Component) -> ComponentId {
        let id = self.next_id;
        self.next_id = id.next();
        self.components.insert(id, component);
        self.attach(circuit_id, id);
        id
    }

    /// Remove `id` from `circuit_id`'s member list.  Returns `false` when the
    /// circuit or the membership does not exist.
    pub fn remove_component(&mut self, circuit_id: &str, id: ComponentId) -> bool {
        let Some(component) = self.components.get(&id) else {
            return false;
        };
        let kind = component.comp_kind();
        let removed = self
            .circuits
            .get_mut(circuit_id)
            .is_some_and(|circuit| circuit.remove(id, kind));
        if removed {
            debug!(%id, circuit_id, "removed component");
        }
        removed
    }

    /// Move `id` from its last circuit to its current one, resetting its
    /// logic state to power-off defaults on the way.
    pub fn migrate_component(&mut self, id: ComponentId) -> CircuitResult<()> {
        let component = self
            .components
            .get_mut(&id)
            .ok_or(CircuitError::UnknownComponent(id))?;
        let last = component.last_circuit_id.take();
        component.reset_on_migration();
        let current = component.current_circuit_id().to_owned();

        if let Some(last) = &last {
            self.remove_component(last, id);
        }
        self.attach(&current, id);
        debug!(%id, from = last.as_deref().unwrap_or("-"), to = %current, "migrated component");
        Ok(())
    }

    fn attach(&mut self, circuit_id: &str, id: ComponentId) {
        let Some(component) = self.components.get_mut(&id) else {
            return;
        };
        let kind = component.comp_kind();
        component.last_circuit_id = Some(circuit_id.to_owned());
        self.circuits
            .entry(circuit_id.to_owned())
            .or_insert_with(|| Circuit::new(circuit_id))
            .insert(id, kind);
        debug!(%id, circuit_id, "added component");
    }

    // ── Host entry points ─────────────────────────────────────────────────

    /// Create a component of `object_type` from schema defaults and
    /// `overrides`, and add it to its circuit.
    pub fn create_component(
        &mut self,
        object_type: &str,
        region:      &str,
        overrides:   &FieldMap,
    ) -> CircuitResult<ComponentId> {
        let component = self.catalog.create(object_type, region, overrides)?;
        let circuit_id = component.current_circuit_id().to_owned();
        Ok(self.add_component(&circuit_id, component))
    }

    /// Set `activated` on an externally driven input (button, switch).
    pub fn set_raw_activation(&mut self, id: ComponentId, value: bool) -> CircuitResult<()> {
        self.components
            .get_mut(&id)
            .ok_or(CircuitError::UnknownComponent(id))?
            .set_activated(value);
        Ok(())
    }

    /// Remove a component from its circuit and from the registry.
    pub fn remove(&mut self, id: ComponentId) -> Option<Component> {
        let last = self.components.get(&id)?.last_circuit_id.clone();
        if let Some(last) = last {
            self.remove_component(&last, id);
        }
        self.components.remove(&id)
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Run one registry tick.
    ///
    /// # Errors
    /// Only a gate or flip-flop wiring error, which indicates a bug in a
    /// registered factory.
    pub fn tick<O: TickObserver>(&mut self, observer: &mut O) -> CircuitResult<TickReport> {
        let now = self.now;
        observer.on_tick_start(now);

        // ── ① Live sync ───────────────────────────────────────────────────
        for (id, component) in self.components.iter_mut() {
            if component.has_live_ref() && !component.sync_from_live() {
                debug!(%id, "live object gone; component continues abstractly");
            }
        }

        // ── ② Clocks ──────────────────────────────────────────────────────
        for component in self.components.values_mut() {
            component.tick_clock();
        }

        // ── ③ Snapshot ────────────────────────────────────────────────────
        let power: PowerMap = self
            .circuits
            .iter()
            .map(|(id, c)| (id.clone(), c.has_power()))
            .collect();
        let ctx = TickContext::new(now, &power);

        // ── ④ Circuits ────────────────────────────────────────────────────
        let mut purge = Vec::new();
        let mut evaluated = 0;
        for (id, circuit) in self.circuits.iter_mut() {
            if circuit.is_empty() {
                purge.push(id.clone());
                continue;
            }
            circuit.tick(&mut self.components, &ctx)?;
            evaluated += 1;
            observer.on_circuit_power(now, id, circuit.has_power());
        }

        // ── ⑤ Prune ───────────────────────────────────────────────────────
        for id in &purge {
            self.circuits.remove(id);
            debug!(circuit_id = %id, "pruned empty circuit");
        }

        // ── ⑥ Migrate ─────────────────────────────────────────────────────
        let migrating: Vec<ComponentId> = self
            .components
            .iter()
            .filter(|(_, c)| c.needs_migration())
            .map(|(id, _)| *id)
            .collect();
        for &id in &migrating {
            self.migrate_component(id)?;
        }
        if !migrating.is_empty() {
            self.dirty = true;
        }

        // ── ⑦ Throttled save ──────────────────────────────────────────────
        let saved = self.save_if_due(now, observer);

        let report = TickReport {
            tick:       now,
            circuits:   evaluated,
            pruned:     purge.len(),
            migrations: migrating.len(),
            saved,
        };
        observer.on_tick_end(&report);
        self.now = now + 1;
        Ok(report)
    }

    /// Run `n` ticks, stopping at the first error.
    pub fn run_ticks<O: TickObserver>(&mut self, n: u64, observer: &mut O) -> CircuitResult<()> {
        for _ in 0..n {
            self.tick(observer)?;
        }
        Ok(())
    }

    /// Whether the topology changed since the last successful save.
    pub fn needs_save(&self) -> bool {
        self.dirty || self.member_count() != self.members_at_save
    }

    /// Record a successful save made outside the tick loop.
    pub fn mark_saved(&mut self) {
        self.dirty = false;
        self.members_at_save = self.member_count();
    }

    fn save_if_due<O: TickObserver>(&mut self, now: Tick, observer: &mut O) -> bool {
        if !(now + 1).is_on_interval(self.save_interval) || !self.needs_save() {
            return false;
        }
        match observer.on_save_due(now, self) {
            SaveOutcome::Saved => {
                self.mark_saved();
                info!(tick = %now, components = self.components.len(), "circuit state saved");
                true
            }
            SaveOutcome::Failed(reason) => {
                warn!(tick = %now, %reason, "circuit save failed; retrying next interval");
                false
            }
            SaveOutcome::NotHandled => false,
        }
    }
}
