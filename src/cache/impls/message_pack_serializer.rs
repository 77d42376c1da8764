use serde::Serialize;
use serde::de::DeserializeOwned;
use crate::cache::errors::CacheError;
use crate::cache::structs::message_pack_serializer::MessagePackSerializer;
use crate::cache::traits::value_serializer::ValueSerializer;

impl ValueSerializer for MessagePackSerializer {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CacheError> {
        rmp_serde::to_vec_named(value).map_err(|e| CacheError::SerializationError(format!("MessagePack encode failed: {}", e)))
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, CacheError> {
        rmp_serde::from_slice(data).map_err(|e| CacheError::SerializationError(format!("MessagePack decode failed: {}", e)))
    }
}
