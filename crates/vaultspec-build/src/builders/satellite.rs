use std::collections::BTreeSet;

use vaultspec_core::{ColumnSource, ColumnSpec, EntityType, KeyType, Satellite, SourceColumn};

use crate::assembler::{DocumentAssembler, HASH_DIFF_COLUMN};
use crate::errors::BuildError;
use crate::warnings::Warning;

use super::{composite_source, BuildContext, EntityPolicy, HASH_DTYPE};

/// Satellite layout: satellite hash key (derived at load time), parent hub
/// hash key over the business keys, hash diff, then descriptive columns.
pub struct SatellitePolicy;

impl EntityPolicy for SatellitePolicy {
    type Entity = Satellite;
    const KIND: EntityType = EntityType::Sat;

    fn name(entity: &Satellite) -> &str {
        &entity.name
    }

    fn description(entity: &Satellite) -> String {
        entity.description.clone().unwrap_or_default()
    }

    fn source_tables(entity: &Satellite) -> Vec<String> {
        vec![entity.source_table.clone()]
    }

    fn parent_table(entity: &Satellite) -> Option<String> {
        Some(entity.hub.clone())
    }

    fn check_contract(entity: &Satellite) -> Result<(), BuildError> {
        if entity.business_keys.is_empty() {
            return Err(BuildError::EmptyBusinessKeys {
                entity: entity.name.clone(),
            });
        }
        if entity.source_table.trim().is_empty() {
            return Err(BuildError::EmptySourceTables {
                entity: entity.name.clone(),
            });
        }
        Ok(())
    }

    fn plan_columns(
        entity: &Satellite,
        ctx: &BuildContext<'_>,
        warnings: &mut Vec<Warning>,
    ) -> Result<Vec<ColumnSpec>, BuildError> {
        let hub = ctx
            .hubs
            .get(&entity.hub)
            .ok_or_else(|| BuildError::UnknownHub {
                entity: entity.name.clone(),
                hub: entity.hub.clone(),
            })?;

        let check = ctx.validator.validate_dependent(
            &entity.name,
            &entity.business_keys,
            &entity.hub,
            &hub.business_keys,
        );
        warnings.extend(check.warnings);
        let keys = check.effective_keys;

        let attrs = disjoint_attrs(&entity.name, &keys, &entity.descriptive_attrs, warnings);

        let all_columns: Vec<String> = keys.iter().chain(attrs.iter()).cloned().collect();
        let tables = vec![entity.source_table.clone()];
        let (types, type_warnings) = ctx.resolver.resolve_all(&tables, &all_columns);
        warnings.extend(type_warnings);

        let mut columns = Vec::with_capacity(attrs.len() + 3);
        columns.push(ColumnSpec {
            target: DocumentAssembler::hash_key_name(&entity.name),
            dtype: HASH_DTYPE.to_string(),
            key_type: KeyType::HashKeySat,
            parent: None,
            source: None,
        });
        columns.push(ColumnSpec {
            target: DocumentAssembler::hash_key_name(&entity.hub),
            dtype: HASH_DTYPE.to_string(),
            key_type: KeyType::HashKeyHub,
            parent: Some(entity.hub.clone()),
            source: Some(composite_source(&keys, &types)),
        });
        columns.push(ColumnSpec {
            target: HASH_DIFF_COLUMN.to_string(),
            dtype: HASH_DTYPE.to_string(),
            key_type: KeyType::HashDiff,
            parent: None,
            source: None,
        });

        for attr in &attrs {
            let dtype = types.get(attr).cloned().unwrap_or_default();
            columns.push(ColumnSpec {
                target: attr.to_uppercase(),
                dtype: dtype.clone(),
                key_type: KeyType::Descriptive,
                parent: None,
                source: Some(ColumnSource::Single(SourceColumn {
                    name: attr.clone(),
                    dtype,
                })),
            });
        }

        Ok(columns)
    }
}

/// Exclude descriptive attributes that repeat business keys, warning once
/// with the overlapping columns. Keeps built documents disjoint without
/// loading any source column twice.
pub(super) fn disjoint_attrs(
    entity: &str,
    keys: &[String],
    descriptive_attrs: &[String],
    warnings: &mut Vec<Warning>,
) -> Vec<String> {
    let key_set: BTreeSet<&str> = keys.iter().map(String::as_str).collect();
    let (overlap, attrs): (Vec<String>, Vec<String>) = descriptive_attrs
        .iter()
        .cloned()
        .partition(|attr| key_set.contains(attr.as_str()));
    if !overlap.is_empty() {
        warnings.push(Warning::DescriptiveKeyOverlap {
            entity: entity.to_string(),
            columns: overlap,
        });
    }
    attrs
}
