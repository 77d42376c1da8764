#[derive(Debug, Clone, Default)]
pub struct NullBackend {
    pub(crate) cache_identifier: Option<String>,
}
