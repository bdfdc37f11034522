use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use vaultspec_core::{
    ClassificationModel, ColumnCatalog, EntityType, TargetLoadDocument, ValidationStatus,
};

use crate::assembler::DocumentAssembler;
use crate::builders::{
    build_entity, BuildContext, EntityPolicy, HubPolicy, LinkPolicy, LinkSatellitePolicy,
    SatellitePolicy,
};
use crate::cache::{HubMetadataCache, LinkMetadataCache};
use crate::config::BuildConfig;
use crate::keys::BusinessKeyValidator;
use crate::resolver::DataTypeResolver;

/// Per-entity outcome status in the run summary.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Success,
    Warnings,
    Error,
}

/// Outcome of one entity within a phase.
#[derive(Debug, Clone, Serialize)]
pub struct EntityOutcome {
    pub entity_name: String,
    pub entity_type: EntityType,
    pub status: OutcomeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Counters per entity kind.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct EntityTotals {
    pub total: u32,
    pub successful: u32,
    pub warnings: u32,
    pub errors: u32,
}

/// Aggregate result of a run; the single source of truth for partial
/// failure. "No panic" never implies "fully valid".
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: String,
    pub processed_at: DateTime<Utc>,
    pub totals: BTreeMap<String, EntityTotals>,
    pub details: Vec<EntityOutcome>,
}

impl RunSummary {
    pub fn error_count(&self) -> u32 {
        self.totals.values().map(|totals| totals.errors).sum()
    }
}

/// Documents plus summary produced by one run.
#[derive(Debug)]
pub struct RunOutput {
    pub documents: Vec<TargetLoadDocument>,
    pub summary: RunSummary,
}

/// Drives the four builder phases in dependency order:
/// Hub → Link → Satellite → Link-Satellite.
///
/// The hub and link caches are populated from the declared model before
/// any dependent phase runs, so a hub that fails to build still
/// contributes its declared keys to link validation.
#[derive(Debug, Clone)]
pub struct BatchOrchestrator {
    config: BuildConfig,
}

impl BatchOrchestrator {
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    pub fn run(&self, model: &ClassificationModel, catalog: &ColumnCatalog) -> RunOutput {
        let run_id = uuid::Uuid::new_v4().to_string();
        info!(
            run_id = %run_id,
            hubs = model.hubs.len(),
            links = model.links.len(),
            satellites = model.satellites.len(),
            link_satellites = model.link_satellites.len(),
            "build run started"
        );

        let index = catalog.index();
        let resolver = DataTypeResolver::new(&index, self.config.default_string_length);
        let assembler = DocumentAssembler::new(self.config.clone());
        let validator = BusinessKeyValidator::new(self.config.auto_reconcile_keys);
        let hubs = HubMetadataCache::from_model(model);
        let links = LinkMetadataCache::from_model(model);
        let ctx = BuildContext {
            assembler: &assembler,
            catalog: &index,
            resolver: &resolver,
            validator: &validator,
            hubs: &hubs,
            links: &links,
        };

        let mut documents = Vec::new();
        let mut details = Vec::new();
        let mut totals = BTreeMap::new();

        run_phase::<HubPolicy>(&model.hubs, &ctx, &mut documents, &mut details, &mut totals);
        run_phase::<LinkPolicy>(&model.links, &ctx, &mut documents, &mut details, &mut totals);
        run_phase::<SatellitePolicy>(
            &model.satellites,
            &ctx,
            &mut documents,
            &mut details,
            &mut totals,
        );
        run_phase::<LinkSatellitePolicy>(
            &model.link_satellites,
            &ctx,
            &mut documents,
            &mut details,
            &mut totals,
        );

        let summary = RunSummary {
            run_id: run_id.clone(),
            processed_at: Utc::now(),
            totals,
            details,
        };

        info!(
            run_id = %run_id,
            documents = documents.len(),
            errors = summary.error_count(),
            "build run finished"
        );

        RunOutput { documents, summary }
    }
}

/// Build every entity of one phase, isolating per-entity failures.
fn run_phase<P: EntityPolicy>(
    entities: &[P::Entity],
    ctx: &BuildContext<'_>,
    documents: &mut Vec<TargetLoadDocument>,
    details: &mut Vec<EntityOutcome>,
    totals: &mut BTreeMap<String, EntityTotals>,
) {
    let totals = totals.entry(P::KIND.as_str().to_string()).or_default();
    for entity in entities {
        let name = P::name(entity).to_string();
        totals.total += 1;
        info!(entity = %name, kind = %P::KIND, "building entity");

        match build_entity::<P>(entity, ctx) {
            Ok(document) => {
                totals.successful += 1;
                let status = match document.metadata.validation_status {
                    ValidationStatus::Valid => OutcomeStatus::Success,
                    ValidationStatus::Warnings => {
                        totals.warnings += 1;
                        OutcomeStatus::Warnings
                    }
                };
                details.push(EntityOutcome {
                    entity_name: name,
                    entity_type: P::KIND,
                    status,
                    warnings: document.metadata.validation_warnings.clone(),
                    error: None,
                });
                documents.push(document);
            }
            Err(err) => {
                warn!(entity = %name, kind = %P::KIND, error = %err, "entity build failed");
                totals.errors += 1;
                details.push(EntityOutcome {
                    entity_name: name,
                    entity_type: P::KIND,
                    status: OutcomeStatus::Error,
                    warnings: None,
                    error: Some(err.to_string()),
                });
            }
        }
    }
}
