use std::fmt;
use std::str::FromStr;
use crate::cache::enums::backend_kind::BackendKind;
use crate::cache::enums::frontend_kind::FrontendKind;
use crate::cache::enums::serializer_kind::SerializerKind;
use crate::cache::errors::CacheError;

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::file => "file",
            BackendKind::transient_memory => "transient_memory",
            BackendKind::null => "null",
            BackendKind::memcache => "memcache",
            BackendKind::redis => "redis",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "file" => Ok(BackendKind::file),
            "transient_memory" | "memory" => Ok(BackendKind::transient_memory),
            "null" => Ok(BackendKind::null),
            "memcache" | "memcached" => Ok(BackendKind::memcache),
            "redis" => Ok(BackendKind::redis),
            _ => Err(CacheError::InvalidBackend(format!("unknown backend \"{}\"", s))),
        }
    }
}

impl FrontendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FrontendKind::variable => "variable",
            FrontendKind::string => "string",
        }
    }
}

impl fmt::Display for FrontendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FrontendKind {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "variable" => Ok(FrontendKind::variable),
            "string" => Ok(FrontendKind::string),
            _ => Err(CacheError::InvalidBackendOption(format!("unknown frontend \"{}\"", s))),
        }
    }
}

impl fmt::Display for SerializerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerializerKind::json => f.write_str("json"),
            SerializerKind::msgpack => f.write_str("msgpack"),
        }
    }
}
