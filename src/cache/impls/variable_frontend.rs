use std::collections::BTreeMap;
use std::fmt;
use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;
use crate::cache::enums::frontend_kind::FrontendKind;
use crate::cache::enums::serializer_kind::SerializerKind;
use crate::cache::errors::CacheError;
use crate::cache::structs::cache_context::CacheContext;
use crate::cache::structs::variable_frontend::VariableFrontend;
use crate::cache::traits::cache_backend::CacheBackend;
use crate::cache::traits::cache_frontend::CacheFrontend;
use crate::cache::traits::value_serializer::ValueSerializer;
use crate::cache::validator;

impl VariableFrontend {
    /// Takes ownership of `backend` and binds it to this cache.
    pub fn new(identifier: &str, mut backend: Box<dyn CacheBackend>, serializer: SerializerKind) -> Result<VariableFrontend, CacheError> {
        validator::validate_entry_identifier(identifier)?;
        backend.set_cache(&CacheContext {
            identifier: identifier.to_string(),
            frontend: FrontendKind::variable,
        })?;
        Ok(VariableFrontend {
            identifier: identifier.to_string(),
            backend,
            serializer,
        })
    }

    pub fn serializer(&self) -> SerializerKind {
        self.serializer
    }

    #[tracing::instrument(level = "debug", skip_all)]
    pub fn set<T: Serialize + ?Sized>(&self, entry_identifier: &str, value: &T, tags: &[String], lifetime: Option<u32>) -> Result<(), CacheError> {
        validator::validate_entry_identifier(entry_identifier)?;
        validator::validate_tags(tags)?;
        let data = self.serializer.encode(value)?;
        self.backend.set(entry_identifier, &data, tags, lifetime)
    }

    #[tracing::instrument(level = "debug", skip_all)]
    pub fn get<T: DeserializeOwned>(&self, entry_identifier: &str) -> Result<Option<T>, CacheError> {
        validator::validate_entry_identifier(entry_identifier)?;
        match self.backend.get(entry_identifier)? {
            Some(data) => Ok(Some(self.serializer.decode(&data)?)),
            None => Ok(None),
        }
    }

    /// Every live entry tagged with `tag`, keyed by entry identifier.
    pub fn get_by_tag<T: DeserializeOwned>(&self, tag: &str) -> Result<BTreeMap<String, T>, CacheError> {
        validator::validate_tag(tag)?;
        let mut entries = BTreeMap::new();
        for entry_identifier in self.backend.find_identifiers_by_tag(tag)? {
            // entries can expire between lookup and read
            if let Some(data) = self.backend.get(&entry_identifier)? {
                entries.insert(entry_identifier, self.serializer.decode(&data)?);
            }
        }
        debug!("[VariableFrontend] {} entries tagged \"{}\" in \"{}\"", entries.len(), tag, self.identifier);
        Ok(entries)
    }

    /// Every live entry, decoded lazily.
    pub fn entries<T: DeserializeOwned>(&self) -> Result<impl Iterator<Item = Result<(String, T), CacheError>> + '_, CacheError> {
        Ok(self.raw_entries()?.map(move |entry| -> Result<(String, T), CacheError> {
            let (entry_identifier, data) = entry?;
            Ok((entry_identifier, self.serializer.decode(&data)?))
        }))
    }
}

impl CacheFrontend for VariableFrontend {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn backend(&self) -> &dyn CacheBackend {
        self.backend.as_ref()
    }
}

impl fmt::Debug for VariableFrontend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariableFrontend")
            .field("identifier", &self.identifier)
            .field("backend", &self.backend.kind())
            .field("serializer", &self.serializer)
            .finish()
    }
}
