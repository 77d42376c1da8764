use std::collections::BTreeMap;
use std::fmt;
use crate::cache::enums::frontend_kind::FrontendKind;
use crate::cache::errors::CacheError;
use crate::cache::structs::cache_context::CacheContext;
use crate::cache::structs::string_frontend::StringFrontend;
use crate::cache::traits::cache_backend::CacheBackend;
use crate::cache::traits::cache_frontend::CacheFrontend;
use crate::cache::validator;

impl StringFrontend {
    pub fn new(identifier: &str, mut backend: Box<dyn CacheBackend>) -> Result<StringFrontend, CacheError> {
        validator::validate_entry_identifier(identifier)?;
        backend.set_cache(&CacheContext {
            identifier: identifier.to_string(),
            frontend: FrontendKind::string,
        })?;
        Ok(StringFrontend {
            identifier: identifier.to_string(),
            backend,
        })
    }

    pub fn set(&self, entry_identifier: &str, value: &str, tags: &[String], lifetime: Option<u32>) -> Result<(), CacheError> {
        validator::validate_entry_identifier(entry_identifier)?;
        validator::validate_tags(tags)?;
        self.backend.set(entry_identifier, value.as_bytes(), tags, lifetime)
    }

    pub fn get(&self, entry_identifier: &str) -> Result<Option<String>, CacheError> {
        validator::validate_entry_identifier(entry_identifier)?;
        self.backend.get(entry_identifier)?.map(Self::decode).transpose()
    }

    pub fn get_by_tag(&self, tag: &str) -> Result<BTreeMap<String, String>, CacheError> {
        validator::validate_tag(tag)?;
        let mut entries = BTreeMap::new();
        for entry_identifier in self.backend.find_identifiers_by_tag(tag)? {
            if let Some(data) = self.backend.get(&entry_identifier)? {
                entries.insert(entry_identifier, Self::decode(data)?);
            }
        }
        Ok(entries)
    }

    pub fn entries(&self) -> Result<impl Iterator<Item = Result<(String, String), CacheError>> + '_, CacheError> {
        Ok(self.raw_entries()?.map(|entry| -> Result<(String, String), CacheError> {
            let (entry_identifier, data) = entry?;
            Ok((entry_identifier, Self::decode(data)?))
        }))
    }

    fn decode(data: Vec<u8>) -> Result<String, CacheError> {
        String::from_utf8(data).map_err(|e| CacheError::SerializationError(format!("stored value is not UTF-8: {}", e)))
    }
}

impl CacheFrontend for StringFrontend {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn backend(&self) -> &dyn CacheBackend {
        self.backend.as_ref()
    }
}

impl fmt::Debug for StringFrontend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringFrontend")
            .field("identifier", &self.identifier)
            .field("backend", &self.backend.kind())
            .finish()
    }
}
