use serde::Serialize;
use serde::de::DeserializeOwned;
use crate::cache::enums::serializer_kind::SerializerKind;
use crate::cache::errors::CacheError;
use crate::cache::structs::json_serializer::JsonSerializer;
use crate::cache::structs::message_pack_serializer::MessagePackSerializer;
use crate::cache::traits::value_serializer::ValueSerializer;

impl ValueSerializer for SerializerKind {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CacheError> {
        match self {
            SerializerKind::json => JsonSerializer.encode(value),
            SerializerKind::msgpack => MessagePackSerializer.encode(value),
        }
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, CacheError> {
        match self {
            SerializerKind::json => JsonSerializer.decode(data),
            SerializerKind::msgpack => MessagePackSerializer.decode(data),
        }
    }
}
