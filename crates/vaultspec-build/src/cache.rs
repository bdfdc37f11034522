use std::collections::BTreeMap;

use vaultspec_core::ClassificationModel;

/// Declared hub metadata the dependent phases validate against.
#[derive(Debug, Clone)]
pub struct HubMeta {
    pub business_keys: Vec<String>,
    pub source_tables: Vec<String>,
}

/// Hub name → declared metadata; populated from *all* declared hubs before
/// the link and satellite phases run, independent of hub build outcomes.
#[derive(Debug, Default)]
pub struct HubMetadataCache {
    hubs: BTreeMap<String, HubMeta>,
}

impl HubMetadataCache {
    pub fn from_model(model: &ClassificationModel) -> Self {
        let hubs = model
            .hubs
            .iter()
            .map(|hub| {
                (
                    hub.name.clone(),
                    HubMeta {
                        business_keys: hub.business_keys.clone(),
                        source_tables: hub.source_tables.clone(),
                    },
                )
            })
            .collect();
        Self { hubs }
    }

    pub fn get(&self, name: &str) -> Option<&HubMeta> {
        self.hubs.get(name)
    }
}

/// Declared link metadata for the link-satellite phase.
#[derive(Debug, Clone)]
pub struct LinkMeta {
    pub business_keys: Vec<String>,
    pub related_hubs: Vec<String>,
}

/// Link name → declared metadata; populated from all declared links before
/// any link satellite is built.
#[derive(Debug, Default)]
pub struct LinkMetadataCache {
    links: BTreeMap<String, LinkMeta>,
}

impl LinkMetadataCache {
    pub fn from_model(model: &ClassificationModel) -> Self {
        let links = model
            .links
            .iter()
            .map(|link| {
                (
                    link.name.clone(),
                    LinkMeta {
                        business_keys: link.business_keys.clone(),
                        related_hubs: link.related_hubs.clone(),
                    },
                )
            })
            .collect();
        Self { links }
    }

    pub fn get(&self, name: &str) -> Option<&LinkMeta> {
        self.links.get(name)
    }
}
