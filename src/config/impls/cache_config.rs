use crate::config::structs::cache_config::CacheConfig;

impl CacheConfig {
    /// Fills unset keys from `fallback`.
    ///
    /// Backend options are only inherited when the backend is inherited too,
    /// options of one backend are meaningless to another.
    pub fn merged_with(&self, fallback: &CacheConfig) -> CacheConfig {
        let backend_options = match (&self.backend_options, &self.backend) {
            (Some(options), _) => Some(options.clone()),
            (None, None) => fallback.backend_options.clone(),
            (None, Some(_)) => None,
        };
        CacheConfig {
            frontend: self.frontend.or(fallback.frontend),
            backend: self.backend.or(fallback.backend),
            serializer: self.serializer.or(fallback.serializer),
            persistent: self.persistent.or(fallback.persistent),
            backend_options,
        }
    }

    /// Replaces every unset key with its built-in default.
    pub fn resolved(&self) -> CacheConfig {
        CacheConfig {
            frontend: Some(self.frontend.unwrap_or_default()),
            backend: Some(self.backend.unwrap_or_default()),
            serializer: Some(self.serializer.unwrap_or_default()),
            persistent: Some(self.persistent.unwrap_or(false)),
            backend_options: Some(self.backend_options.clone().unwrap_or_default()),
        }
    }
}
