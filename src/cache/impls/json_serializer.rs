use serde::Serialize;
use serde::de::DeserializeOwned;
use crate::cache::errors::CacheError;
use crate::cache::structs::json_serializer::JsonSerializer;
use crate::cache::traits::value_serializer::ValueSerializer;

impl ValueSerializer for JsonSerializer {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CacheError> {
        serde_json::to_vec(value).map_err(|e| CacheError::SerializationError(format!("JSON encode failed: {}", e)))
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, CacheError> {
        serde_json::from_slice(data).map_err(|e| CacheError::SerializationError(format!("JSON decode failed: {}", e)))
    }
}
