//! Per-kind entity builders behind a shared policy trait.
//!
//! The four Data Vault kinds share one build pipeline (contract check,
//! naming check, source resolution, column planning, assembly); each kind
//! contributes its required-field rules and column layout through
//! [`EntityPolicy`].

mod hub;
mod link;
mod link_satellite;
mod satellite;

use std::collections::BTreeMap;

use vaultspec_core::{
    CatalogIndex, ColumnSource, ColumnSpec, EntityType, SourceColumn, TargetLoadDocument,
};

use crate::assembler::DocumentAssembler;
use crate::cache::{HubMetadataCache, LinkMetadataCache};
use crate::errors::BuildError;
use crate::keys::BusinessKeyValidator;
use crate::resolver::DataTypeResolver;
use crate::warnings::Warning;

pub use hub::HubPolicy;
pub use link::LinkPolicy;
pub use link_satellite::LinkSatellitePolicy;
pub use satellite::SatellitePolicy;

/// Dtype recorded for hash columns computed at load time.
pub(crate) const HASH_DTYPE: &str = "raw";

/// Read-only dependencies shared by every builder within a run.
pub struct BuildContext<'a> {
    pub assembler: &'a DocumentAssembler,
    pub catalog: &'a CatalogIndex<'a>,
    pub resolver: &'a DataTypeResolver<'a>,
    pub validator: &'a BusinessKeyValidator,
    pub hubs: &'a HubMetadataCache,
    pub links: &'a LinkMetadataCache,
}

/// Per-kind build policy: contract rules and column assembly.
pub trait EntityPolicy {
    type Entity;
    const KIND: EntityType;

    fn name(entity: &Self::Entity) -> &str;
    fn description(entity: &Self::Entity) -> String;
    fn source_tables(entity: &Self::Entity) -> Vec<String>;
    fn parent_table(entity: &Self::Entity) -> Option<String>;
    /// Caller-contract validation; violations are fatal for the entity.
    fn check_contract(entity: &Self::Entity) -> Result<(), BuildError>;
    /// Produce the ordered target column list for this kind.
    fn plan_columns(
        entity: &Self::Entity,
        ctx: &BuildContext<'_>,
        warnings: &mut Vec<Warning>,
    ) -> Result<Vec<ColumnSpec>, BuildError>;
}

/// Build one entity into its target load document.
pub fn build_entity<P: EntityPolicy>(
    entity: &P::Entity,
    ctx: &BuildContext<'_>,
) -> Result<TargetLoadDocument, BuildError> {
    P::check_contract(entity)?;

    let name = P::name(entity);
    let mut warnings = Vec::new();
    if let Some(warning) = DocumentAssembler::check_name_prefix(P::KIND, name) {
        warnings.push(warning);
    }

    let source_tables = P::source_tables(entity);
    let source = ctx
        .assembler
        .resolve_source(name, &source_tables, ctx.catalog)?;
    let columns = P::plan_columns(entity, ctx, &mut warnings)?;

    Ok(ctx.assembler.assemble(
        P::KIND,
        name,
        source,
        P::parent_table(entity),
        P::description(entity),
        &warnings,
        columns,
    ))
}

/// Ordered composite source over the given keys with their resolved types.
pub(crate) fn composite_source(
    keys: &[String],
    types: &BTreeMap<String, String>,
) -> ColumnSource {
    ColumnSource::Composite(
        keys.iter()
            .map(|key| SourceColumn {
                name: key.clone(),
                dtype: types.get(key).cloned().unwrap_or_default(),
            })
            .collect(),
    )
}
