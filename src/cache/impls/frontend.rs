use std::sync::Arc;
use crate::cache::enums::backend_kind::BackendKind;
use crate::cache::enums::frontend::Frontend;
use crate::cache::enums::frontend_kind::FrontendKind;
use crate::cache::errors::CacheError;
use crate::cache::structs::string_frontend::StringFrontend;
use crate::cache::structs::variable_frontend::VariableFrontend;
use crate::cache::traits::cache_backend::CacheBackend;
use crate::cache::traits::cache_frontend::CacheFrontend;

impl Frontend {
    pub fn kind(&self) -> FrontendKind {
        match self {
            Frontend::Variable(_) => FrontendKind::variable,
            Frontend::String(_) => FrontendKind::string,
        }
    }

    pub fn backend_kind(&self) -> BackendKind {
        self.backend().kind()
    }

    pub fn as_variable(&self) -> Result<Arc<VariableFrontend>, CacheError> {
        match self {
            Frontend::Variable(frontend) => Ok(frontend.clone()),
            Frontend::String(frontend) => Err(CacheError::IncompatibleFrontend(frontend.identifier().to_string())),
        }
    }

    pub fn as_string(&self) -> Result<Arc<StringFrontend>, CacheError> {
        match self {
            Frontend::String(frontend) => Ok(frontend.clone()),
            Frontend::Variable(frontend) => Err(CacheError::IncompatibleFrontend(frontend.identifier().to_string())),
        }
    }
}

impl CacheFrontend for Frontend {
    fn identifier(&self) -> &str {
        match self {
            Frontend::Variable(frontend) => frontend.identifier(),
            Frontend::String(frontend) => frontend.identifier(),
        }
    }

    fn backend(&self) -> &dyn CacheBackend {
        match self {
            Frontend::Variable(frontend) => frontend.backend(),
            Frontend::String(frontend) => frontend.backend(),
        }
    }
}

impl From<VariableFrontend> for Frontend {
    fn from(frontend: VariableFrontend) -> Self {
        Frontend::Variable(Arc::new(frontend))
    }
}

impl From<StringFrontend> for Frontend {
    fn from(frontend: StringFrontend) -> Self {
        Frontend::String(Arc::new(frontend))
    }
}

impl From<Arc<VariableFrontend>> for Frontend {
    fn from(frontend: Arc<VariableFrontend>) -> Self {
        Frontend::Variable(frontend)
    }
}
