use std::sync::Arc;
use parking_lot::Mutex;
use crate::adapters::structs::cache_item::CacheItem;
use crate::cache::structs::variable_frontend::VariableFrontend;

#[derive(Debug)]
pub struct CachePool<T> {
    pub(crate) frontend: Arc<VariableFrontend>,
    pub(crate) deferred: Mutex<Vec<CacheItem<T>>>,
}
