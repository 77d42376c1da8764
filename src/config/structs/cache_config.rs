use serde::{Deserialize, Serialize};
use crate::cache::enums::backend_kind::BackendKind;
use crate::cache::enums::frontend_kind::FrontendKind;
use crate::cache::enums::serializer_kind::SerializerKind;
use crate::cache::structs::backend_options::BackendOptions;

/// Every key is optional; missing ones come from the `Default` section.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct CacheConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frontend: Option<FrontendKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<BackendKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serializer: Option<SerializerKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persistent: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend_options: Option<BackendOptions>,
}
