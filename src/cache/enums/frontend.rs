use std::sync::Arc;
use crate::cache::structs::string_frontend::StringFrontend;
use crate::cache::structs::variable_frontend::VariableFrontend;

/// A constructed cache, whichever frontend variant it uses.
#[derive(Debug, Clone)]
pub enum Frontend {
    Variable(Arc<VariableFrontend>),
    String(Arc<StringFrontend>),
}
