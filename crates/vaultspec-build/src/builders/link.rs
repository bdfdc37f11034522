use vaultspec_core::{ColumnSpec, EntityType, KeyType, Link};

use crate::assembler::DocumentAssembler;
use crate::errors::BuildError;
use crate::warnings::Warning;

use super::{composite_source, BuildContext, EntityPolicy, HASH_DTYPE};

/// Link layout: one composite link hash key over the full business-key
/// list, then one hub hash key per related hub so a downstream loader can
/// recompute each parent key from columns already on the link record.
pub struct LinkPolicy;

impl EntityPolicy for LinkPolicy {
    type Entity = Link;
    const KIND: EntityType = EntityType::Lnk;

    fn name(entity: &Link) -> &str {
        &entity.name
    }

    fn description(entity: &Link) -> String {
        entity.description.clone()
    }

    fn source_tables(entity: &Link) -> Vec<String> {
        entity.source_tables.clone()
    }

    fn parent_table(_entity: &Link) -> Option<String> {
        None
    }

    fn check_contract(entity: &Link) -> Result<(), BuildError> {
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
        if entity.related_hubs.len() < 2 {
            return Err(BuildError::TooFewRelatedHubs {
                entity: entity.name.clone(),
            });
        }
        Ok(())
    }

    fn plan_columns(
        entity: &Link,
        ctx: &BuildContext<'_>,
        warnings: &mut Vec<Warning>,
    ) -> Result<Vec<ColumnSpec>, BuildError> {
        warnings.extend(ctx.validator.validate_link(entity, ctx.hubs)?);

        let (types, type_warnings) = ctx
            .resolver
            .resolve_all(&entity.source_tables, &entity.business_keys);
        warnings.extend(type_warnings);

        let mut columns = Vec::with_capacity(entity.related_hubs.len() + 1);
        columns.push(ColumnSpec {
            target: DocumentAssembler::hash_key_name(&entity.name),
            dtype: HASH_DTYPE.to_string(),
            key_type: KeyType::HashKeyLnk,
            parent: None,
            source: Some(composite_source(&entity.business_keys, &types)),
        });

        for hub_name in &entity.related_hubs {
            let hub = ctx
                .hubs
                .get(hub_name)
                .ok_or_else(|| BuildError::UnknownHub {
                    entity: entity.name.clone(),
                    hub: hub_name.clone(),
                })?;
            // Subset of the link's keys owned by this hub, in link order.
            let hub_keys: Vec<String> = entity
                .business_keys
                .iter()
                .filter(|key| hub.business_keys.contains(key))
                .cloned()
                .collect();
            columns.push(ColumnSpec {
                target: DocumentAssembler::hash_key_name(hub_name),
                dtype: HASH_DTYPE.to_string(),
                key_type: KeyType::HashKeyHub,
                parent: Some(hub_name.clone()),
                source: Some(composite_source(&hub_keys, &types)),
            });
        }

        Ok(columns)
    }
}
