use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentConfiguration {
    pub(crate) application_identifier: String,
    pub(crate) file_cache_base_path: PathBuf,
    pub(crate) maximum_path_length: usize,
}
