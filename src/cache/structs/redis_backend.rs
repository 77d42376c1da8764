use parking_lot::Mutex;
use crate::cache::structs::environment_configuration::EnvironmentConfiguration;

pub struct RedisBackend {
    pub(crate) connection: Mutex<redis::Connection>,
    pub(crate) environment: EnvironmentConfiguration,
    pub(crate) default_lifetime: u32,
    /// zstd level applied to stored values; 0 stores them verbatim.
    pub(crate) compression_level: i32,
    pub(crate) cache_identifier: Option<String>,
    pub(crate) prefix: String,
    /// Last known state of the `frozen` key; `None` until first asked.
    pub(crate) frozen: Mutex<Option<bool>>,
}
