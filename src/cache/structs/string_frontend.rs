use crate::cache::traits::cache_backend::CacheBackend;

pub struct StringFrontend {
    pub(crate) identifier: String,
    pub(crate) backend: Box<dyn CacheBackend>,
}
