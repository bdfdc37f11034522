use vaultspec_core::{ColumnSource, ColumnSpec, EntityType, KeyType, LinkSatellite, SourceColumn};

use crate::assembler::{DocumentAssembler, HASH_DIFF_COLUMN};
use crate::errors::BuildError;
use crate::warnings::Warning;

use super::satellite::disjoint_attrs;
use super::{composite_source, BuildContext, EntityPolicy, HASH_DTYPE};

/// Link-satellite layout: structurally a satellite parented to a link,
/// emitting `hash_key_lsat` and the parent `hash_key_lnk`.
pub struct LinkSatellitePolicy;

impl EntityPolicy for LinkSatellitePolicy {
    type Entity = LinkSatellite;
    const KIND: EntityType = EntityType::Lsat;

    fn name(entity: &LinkSatellite) -> &str {
        &entity.name
    }

    fn description(entity: &LinkSatellite) -> String {
        entity.description.clone().unwrap_or_default()
    }

    fn source_tables(entity: &LinkSatellite) -> Vec<String> {
        vec![entity.source_table.clone()]
    }

    fn parent_table(entity: &LinkSatellite) -> Option<String> {
        Some(entity.link.clone())
    }

    fn check_contract(entity: &LinkSatellite) -> Result<(), BuildError> {
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
        entity: &LinkSatellite,
        ctx: &BuildContext<'_>,
        warnings: &mut Vec<Warning>,
    ) -> Result<Vec<ColumnSpec>, BuildError> {
        let link = ctx
            .links
            .get(&entity.link)
            .ok_or_else(|| BuildError::UnknownLink {
                entity: entity.name.clone(),
                link: entity.link.clone(),
            })?;

        let check = ctx.validator.validate_dependent(
            &entity.name,
            &entity.business_keys,
            &entity.link,
            &link.business_keys,
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
            key_type: KeyType::HashKeyLsat,
            parent: None,
            source: None,
        });
        columns.push(ColumnSpec {
            target: DocumentAssembler::hash_key_name(&entity.link),
            dtype: HASH_DTYPE.to_string(),
            key_type: KeyType::HashKeyLnk,
            parent: Some(entity.link.clone()),
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
