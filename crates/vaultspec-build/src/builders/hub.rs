use vaultspec_core::{ColumnSource, ColumnSpec, EntityType, Hub, KeyType, SourceColumn};

use crate::assembler::DocumentAssembler;
use crate::errors::BuildError;
use crate::warnings::Warning;

use super::{composite_source, BuildContext, EntityPolicy, HASH_DTYPE};

/// Hub layout: one composite hash key over all business keys, then one
/// business-key column per declared key.
pub struct HubPolicy;

impl EntityPolicy for HubPolicy {
    type Entity = Hub;
    const KIND: EntityType = EntityType::Hub;

    fn name(entity: &Hub) -> &str {
        &entity.name
    }

    fn description(entity: &Hub) -> String {
        entity.description.clone()
    }

    fn source_tables(entity: &Hub) -> Vec<String> {
        entity.source_tables.clone()
    }

    fn parent_table(_entity: &Hub) -> Option<String> {
        None
    }

    fn check_contract(entity: &Hub) -> Result<(), BuildError> {
        if entity.business_keys.is_empty() {
            return Err(BuildError::EmptyBusinessKeys {
                entity: entity.name.clone(),
            });
        }
        if entity.source_tables.is_empty() {
            return Err(BuildError::EmptySourceTables {
                entity: entity.name.clone(),
            });
        }
        Ok(())
    }

    fn plan_columns(
        entity: &Hub,
        ctx: &BuildContext<'_>,
        warnings: &mut Vec<Warning>,
    ) -> Result<Vec<ColumnSpec>, BuildError> {
        let (types, type_warnings) = ctx
            .resolver
            .resolve_all(&entity.source_tables, &entity.business_keys);
        warnings.extend(type_warnings);

        let mut columns = Vec::with_capacity(entity.business_keys.len() + 1);
        columns.push(ColumnSpec {
            target: DocumentAssembler::hash_key_name(&entity.name),
            dtype: HASH_DTYPE.to_string(),
            key_type: KeyType::HashKeyHub,
            parent: None,
            source: Some(composite_source(&entity.business_keys, &types)),
        });

        for key in &entity.business_keys {
            let dtype = types.get(key).cloned().unwrap_or_default();
            columns.push(ColumnSpec {
                target: key.to_uppercase(),
                dtype: dtype.clone(),
                key_type: KeyType::BizKey,
                parent: None,
                source: Some(ColumnSource::Single(SourceColumn {
                    name: key.clone(),
                    dtype,
                })),
            });
        }

        Ok(columns)
    }
}
