//! `RegionStore` — one save file per region.

use std::collections::BTreeSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use circ_core::ComponentId;
use circ_sim::CircuitRegistry;
use tempfile::NamedTempFile;
use tracing::{debug, error, info, warn};

use crate::codec::{decode_line, encode_line, SaveRecord};
use crate::{PersistError, PersistResult, RecordError};

const EXTENSION: &str = "txt";

/// What a region load did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Existing components matched by a record and left untouched.
    pub kept:    usize,
    /// Components created from records nothing matched.
    pub created: usize,
    /// Region components the file no longer lists.
    pub removed: usize,
    /// Malformed or unusable lines.
    pub dropped: usize,
}

/// Save directory holding `<region>.txt` files.
#[derive(Clone, Debug)]
pub struct RegionStore {
    dir: PathBuf,
}

impl RegionStore {
    /// Open `dir`, creating it if absent.
    pub fn open(dir: impl Into<PathBuf>) -> PersistResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        debug!(dir = %dir.display(), "opened circuit save directory");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Save file of `region`.
    pub fn path_for(&self, region: &str) -> PersistResult<PathBuf> {
        if region.is_empty()
            || region.starts_with('.')
            || region.contains(['/', '\\'])
        {
            return Err(PersistError::InvalidRegion(region.to_owned()));
        }
        Ok(self.dir.join(region).with_extension(EXTENSION))
    }

    // ── Saving ────────────────────────────────────────────────────────────

    /// Render `region`'s components as save text, one line per component.
    ///
    /// A component whose schema cannot be found or whose fields do not
    /// encode is logged and left out; the rest of the region still saves.
    pub fn render_region(registry: &CircuitRegistry, region: &str) -> String {
        let mut text = String::new();
        for (id, component) in registry.components().filter(|(_, c)| c.region() == region) {
            let Some(schema) = registry.catalog().get_schema(component.object_type()) else {
                error!(%id, object_type = component.object_type(), "no schema at save time; component omitted");
                continue;
            };
            match encode_line(schema, component.type_name(), region, &component.persisted_fields()) {
                Ok(line) => {
                    text.push_str(&line);
                    text.push('\n');
                }
                Err(e) => error!(%id, error = %e, "cannot encode component; omitted"),
            }
        }
        text
    }

    /// Regenerate `region`'s save file from the registry.  The file is
    /// replaced atomically.  Returns the number of bytes written.
    pub fn save_region(&self, registry: &CircuitRegistry, region: &str) -> PersistResult<usize> {
        let path = self.path_for(region)?;
        let text = Self::render_region(registry, region);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(text.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| e.error)?;
        debug!(region, path = %path.display(), bytes = text.len(), "saved region");
        Ok(text.len())
    }

    /// Save every loaded region and every region that owns a component.
    /// Returns the number of regions written.
    ///
    /// A region that fails is logged and skipped; the others are still
    /// written, and the failures come back together as
    /// [`PersistError::PartialSave`].
    pub fn save_all(&self, registry: &CircuitRegistry) -> PersistResult<usize> {
        let regions: BTreeSet<&str> = registry
            .loaded_regions()
            .chain(registry.components().map(|(_, c)| c.region()))
            .collect();
        let mut failed = Vec::new();
        for region in &regions {
            if let Err(e) = self.save_region(registry, region) {
                error!(region, error = %e, "cannot save region");
                failed.push((*region).to_owned());
            }
        }
        let saved = regions.len() - failed.len();
        info!(regions = saved, components = registry.component_count(), "saved circuits");
        if failed.is_empty() {
            Ok(saved)
        } else {
            Err(PersistError::PartialSave { failed, saved })
        }
    }

    // ── Loading ───────────────────────────────────────────────────────────

    /// Mark `region` loaded and reconcile it with its save file.  A missing
    /// file counts as empty.
    pub fn load_region(&self, registry: &mut CircuitRegistry, region: &str) -> PersistResult<LoadReport> {
        let path = self.path_for(region)?;
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e.into()),
        };
        let report = load_str(registry, region, &text);
        info!(
            region,
            kept = report.kept,
            created = report.created,
            removed = report.removed,
            dropped = report.dropped,
            "loaded region"
        );
        Ok(report)
    }
}

/// Mark `region` loaded and reconcile the registry with `text`.
///
/// - A malformed line, or one naming a region that is not loaded, is dropped
///   with a warning.
/// - A record matching an existing component (same types, region and
///   configuration) keeps that component and its logic state.
/// - Other records create new components.
/// - Components of `region` that no record matched are removed.
pub fn load_str(registry: &mut CircuitRegistry, region: &str, text: &str) -> LoadReport {
    registry.mark_region_loaded(region);
    let mut report = LoadReport::default();
    let mut claimed: BTreeSet<ComponentId> = BTreeSet::new();

    for (n, line) in text.lines().enumerate().filter(|(_, l)| !l.trim().is_empty()) {
        let record = decode_line(registry.catalog(), line).and_then(|record| {
            if registry.is_region_loaded(&record.region) {
                Ok(record)
            } else {
                Err(RecordError::UnloadedRegion(record.region))
            }
        });
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                warn!(region, line = n + 1, error = %e, "dropped save record");
                report.dropped += 1;
                continue;
            }
        };

        if let Some(id) = find_match(registry, &record, &claimed) {
            claimed.insert(id);
            report.kept += 1;
            continue;
        }

        match create(registry, record) {
            Ok(id) => {
                claimed.insert(id);
                report.created += 1;
            }
            Err(e) => {
                warn!(region, line = n + 1, error = %e, "dropped save record");
                report.dropped += 1;
            }
        }
    }

    for id in registry.region_components(region) {
        if !claimed.contains(&id) && registry.remove(id).is_some() {
            report.removed += 1;
        }
    }
    report
}

fn find_match(
    registry: &CircuitRegistry,
    record:   &SaveRecord,
    claimed:  &BTreeSet<ComponentId>,
) -> Option<ComponentId> {
    let runtime = registry.catalog().get_schema(&record.object_type)?.runtime_keys();
    registry
        .components()
        .find(|(id, c)| {
            !claimed.contains(id)
                && c.type_name() == record.type_name
                && c.object_type() == record.object_type
                && c.region() == record.region
                && c.fields().matches_except(&record.fields, &runtime)
        })
        .map(|(id, _)| id)
}

fn create(registry: &mut CircuitRegistry, record: SaveRecord) -> Result<ComponentId, RecordError> {
    let component = registry.catalog().instantiate(
        &record.type_name,
        &record.object_type,
        &record.region,
        record.fields,
    )?;
    let circuit_id = component.current_circuit_id().to_owned();
    Ok(registry.add_component(&circuit_id, component))
}
