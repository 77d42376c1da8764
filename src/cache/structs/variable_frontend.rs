use crate::cache::enums::serializer_kind::SerializerKind;
use crate::cache::traits::cache_backend::CacheBackend;

pub struct VariableFrontend {
    pub(crate) identifier: String,
    pub(crate) backend: Box<dyn CacheBackend>,
    pub(crate) serializer: SerializerKind,
}
