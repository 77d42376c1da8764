use crate::cache::enums::frontend_kind::FrontendKind;

/// What a backend may know about the frontend owning it.
///
/// Handed over once through `CacheBackend::set_cache`; backends keep a copy
/// and never call back into the frontend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheContext {
    pub identifier: String,
    pub frontend: FrontendKind,
}
