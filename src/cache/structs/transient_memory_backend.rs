use std::collections::BTreeSet;
use ahash::AHashMap;
use parking_lot::RwLock;

#[derive(Debug, Clone)]
pub struct MemoryEntry {
    pub data: Vec<u8>,
    pub tags: BTreeSet<String>,
    pub expiry: u64,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    pub entries: AHashMap<String, MemoryEntry>,
    pub tags: AHashMap<String, BTreeSet<String>>,
    pub frozen: bool,
}

#[derive(Debug)]
pub struct TransientMemoryBackend {
    pub(crate) store: RwLock<MemoryStore>,
    pub(crate) default_lifetime: u32,
    pub(crate) cache_identifier: Option<String>,
}
