use std::collections::BTreeSet;

use vaultspec_core::Link;

use crate::cache::HubMetadataCache;
use crate::errors::BuildError;
use crate::warnings::Warning;

/// Result of checking a dependent entity's keys against its parent's.
#[derive(Debug, Clone)]
pub struct DependentKeyCheck {
    /// Keys the builder should load with; equals the declared keys unless
    /// `auto_reconcile_keys` replaced them with the parent's.
    pub effective_keys: Vec<String>,
    pub warnings: Vec<Warning>,
}

/// Set-algebra over business-key lists.
///
/// Key mismatches on dependents are warnings; a link carrying keys that
/// belong to no related hub is a modeling error and fatal for that link.
#[derive(Debug, Clone, Copy)]
pub struct BusinessKeyValidator {
    auto_reconcile_keys: bool,
}

impl BusinessKeyValidator {
    pub fn new(auto_reconcile_keys: bool) -> Self {
        Self {
            auto_reconcile_keys,
        }
    }

    /// Check a link's keys against every related hub.
    pub fn validate_link(
        &self,
        link: &Link,
        hubs: &HubMetadataCache,
    ) -> Result<Vec<Warning>, BuildError> {
        let mut warnings = Vec::new();
        let link_keys: BTreeSet<&str> = link.business_keys.iter().map(String::as_str).collect();
        let mut all_hub_keys: BTreeSet<&str> = BTreeSet::new();

        for hub_name in &link.related_hubs {
            let hub = hubs.get(hub_name).ok_or_else(|| BuildError::UnknownHub {
                entity: link.name.clone(),
                hub: hub_name.clone(),
            })?;
            let hub_keys: BTreeSet<&str> = hub.business_keys.iter().map(String::as_str).collect();
            all_hub_keys.extend(hub_keys.iter().copied());

            let missing: Vec<String> = hub_keys
                .difference(&link_keys)
                .map(|key| key.to_string())
                .collect();
            if !missing.is_empty() {
                warnings.push(Warning::MissingHubKeys {
                    link: link.name.clone(),
                    hub: hub_name.clone(),
                    keys: missing,
                });
            }

            if link_keys.intersection(&hub_keys).next().is_none() {
                warnings.push(Warning::NoKeysFromHub {
                    link: link.name.clone(),
                    hub: hub_name.clone(),
                });
            }
        }

        let extra: Vec<String> = link_keys
            .difference(&all_hub_keys)
            .map(|key| key.to_string())
            .collect();
        if !extra.is_empty() {
            return Err(BuildError::ExtraLinkKeys {
                entity: link.name.clone(),
                keys: extra,
            });
        }

        Ok(warnings)
    }

    /// Check a satellite/link-satellite's keys against its parent's.
    /// Never fatal; descriptive data is still loadable against the
    /// supplied keys.
    pub fn validate_dependent(
        &self,
        entity: &str,
        entity_keys: &[String],
        parent: &str,
        parent_keys: &[String],
    ) -> DependentKeyCheck {
        let mut warnings = Vec::new();
        let own: BTreeSet<&str> = entity_keys.iter().map(String::as_str).collect();
        let parents: BTreeSet<&str> = parent_keys.iter().map(String::as_str).collect();

        let missing: Vec<String> = parents
            .difference(&own)
            .map(|key| key.to_string())
            .collect();
        if !missing.is_empty() {
            warnings.push(Warning::MissingParentKeys {
                entity: entity.to_string(),
                parent: parent.to_string(),
                keys: missing,
            });
        }

        let extra: Vec<String> = own
            .difference(&parents)
            .map(|key| key.to_string())
            .collect();
        if !extra.is_empty() {
            warnings.push(Warning::ExtraParentKeys {
                entity: entity.to_string(),
                parent: parent.to_string(),
                keys: extra,
            });
        }

        let mismatch = !warnings.is_empty();
        let effective_keys = if self.auto_reconcile_keys && mismatch {
            warnings.push(Warning::ReconciledKeys {
                entity: entity.to_string(),
                parent: parent.to_string(),
            });
            parent_keys.to_vec()
        } else {
            entity_keys.to_vec()
        };

        DependentKeyCheck {
            effective_keys,
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vaultspec_core::{ClassificationModel, Hub};

    fn hub(name: &str, keys: &[&str]) -> Hub {
        Hub {
            name: name.to_string(),
            business_keys: keys.iter().map(|key| key.to_string()).collect(),
            source_tables: vec!["T".to_string()],
            description: String::new(),
        }
    }

    fn link(name: &str, hubs: &[&str], keys: &[&str]) -> Link {
        Link {
            name: name.to_string(),
            related_hubs: hubs.iter().map(|hub| hub.to_string()).collect(),
            business_keys: keys.iter().map(|key| key.to_string()).collect(),
            source_tables: vec!["T".to_string()],
            description: String::new(),
        }
    }

    fn hub_cache(hubs: Vec<Hub>) -> HubMetadataCache {
        HubMetadataCache::from_model(&ClassificationModel {
            hubs,
            ..Default::default()
        })
    }

    #[test]
    fn link_matching_hub_union_is_clean() {
        let cache = hub_cache(vec![
            hub("HUB_ORDER", &["ORDER_ID"]),
            hub("HUB_CUSTOMER", &["CUSTOMER_ID"]),
        ]);
        let validator = BusinessKeyValidator::new(false);
        let link = link(
            "LNK_ORDER_CUSTOMER",
            &["HUB_ORDER", "HUB_CUSTOMER"],
            &["ORDER_ID", "CUSTOMER_ID"],
        );
        let warnings = validator.validate_link(&link, &cache).expect("valid link");
        assert!(warnings.is_empty());
    }

    #[test]
    fn link_with_extra_keys_is_fatal() {
        let cache = hub_cache(vec![
            hub("HUB_ORDER", &["ORDER_ID"]),
            hub("HUB_CUSTOMER", &["CUSTOMER_ID"]),
        ]);
        let validator = BusinessKeyValidator::new(false);
        let link = link(
            "LNK_ORDER_CUSTOMER",
            &["HUB_ORDER", "HUB_CUSTOMER"],
            &["ORDER_ID", "CUSTOMER_ID", "EXTRA_COL"],
        );
        let result = validator.validate_link(&link, &cache);
        assert!(
            matches!(result, Err(BuildError::ExtraLinkKeys { keys, .. }) if keys == vec!["EXTRA_COL".to_string()])
        );
    }

    #[test]
    fn link_missing_hub_keys_warns_without_failing() {
        let cache = hub_cache(vec![
            hub("HUB_ORDER", &["ORDER_ID", "ORDER_LINE"]),
            hub("HUB_CUSTOMER", &["CUSTOMER_ID"]),
        ]);
        let validator = BusinessKeyValidator::new(false);
        let link = link(
            "LNK_ORDER_CUSTOMER",
            &["HUB_ORDER", "HUB_CUSTOMER"],
            &["ORDER_ID", "CUSTOMER_ID"],
        );
        let warnings = validator.validate_link(&link, &cache).expect("not fatal");
        assert_eq!(warnings.len(), 1);
        assert!(matches!(
            &warnings[0],
            Warning::MissingHubKeys { hub, keys, .. }
                if hub == "HUB_ORDER" && keys == &vec!["ORDER_LINE".to_string()]
        ));
    }

    #[test]
    fn link_carrying_no_keys_of_a_hub_warns_without_failing() {
        let cache = hub_cache(vec![
            hub("HUB_ORDER", &["ORDER_ID"]),
            hub("HUB_CUSTOMER", &["CUSTOMER_ID"]),
        ]);
        let validator = BusinessKeyValidator::new(false);
        let link = link(
            "LNK_ORDER_CUSTOMER",
            &["HUB_ORDER", "HUB_CUSTOMER"],
            &["ORDER_ID"],
        );
        let warnings = validator.validate_link(&link, &cache).expect("not fatal");
        assert_eq!(warnings.len(), 2);
        assert!(matches!(
            &warnings[0],
            Warning::MissingHubKeys { hub, keys, .. }
                if hub == "HUB_CUSTOMER" && keys == &vec!["CUSTOMER_ID".to_string()]
        ));
        assert!(matches!(
            &warnings[1],
            Warning::NoKeysFromHub { hub, .. } if hub == "HUB_CUSTOMER"
        ));
    }

    #[test]
    fn link_with_unrelated_hub_reference_is_fatal() {
        let cache = hub_cache(vec![hub("HUB_ORDER", &["ORDER_ID"])]);
        let validator = BusinessKeyValidator::new(false);
        let link = link(
            "LNK_ORDER_CUSTOMER",
            &["HUB_ORDER", "HUB_CUSTOMER"],
            &["ORDER_ID"],
        );
        let result = validator.validate_link(&link, &cache);
        assert!(matches!(result, Err(BuildError::UnknownHub { hub, .. }) if hub == "HUB_CUSTOMER"));
    }

    #[test]
    fn dependent_mismatch_yields_both_warning_classes() {
        let validator = BusinessKeyValidator::new(false);
        let check = validator.validate_dependent(
            "SAT_CUSTOMER_PROFILE",
            &["CUST_ID".to_string()],
            "HUB_CUSTOMER",
            &["CUSTOMER_ID".to_string()],
        );
        assert_eq!(check.effective_keys, vec!["CUST_ID".to_string()]);
        assert_eq!(check.warnings.len(), 2);
        assert!(matches!(&check.warnings[0], Warning::MissingParentKeys { .. }));
        assert!(matches!(&check.warnings[1], Warning::ExtraParentKeys { .. }));
    }

    #[test]
    fn auto_reconcile_replaces_keys_and_records_it() {
        let validator = BusinessKeyValidator::new(true);
        let check = validator.validate_dependent(
            "SAT_CUSTOMER_PROFILE",
            &["CUST_ID".to_string()],
            "HUB_CUSTOMER",
            &["CUSTOMER_ID".to_string()],
        );
        assert_eq!(check.effective_keys, vec!["CUSTOMER_ID".to_string()]);
        assert!(check
            .warnings
            .iter()
            .any(|warning| matches!(warning, Warning::ReconciledKeys { .. })));
    }
}
