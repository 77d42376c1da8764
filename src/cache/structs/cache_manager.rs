use std::collections::{BTreeMap, BTreeSet};
use parking_lot::RwLock;
use crate::cache::enums::frontend::Frontend;
use crate::cache::structs::cache_factory::CacheFactory;
use crate::config::structs::cache_config::CacheConfig;

#[derive(Debug)]
pub struct CacheManager {
    pub(crate) factory: CacheFactory,
    pub(crate) configurations: BTreeMap<String, CacheConfig>,
    pub(crate) caches: RwLock<BTreeMap<String, Frontend>>,
    pub(crate) persistent: RwLock<BTreeSet<String>>,
}
