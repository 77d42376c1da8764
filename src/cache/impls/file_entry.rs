use crate::cache::structs::file_entry::FileEntry;

pub const EXPIRY_WIDTH: usize = 14;
pub const DATA_SIZE_WIDTH: usize = 10;
pub const TRAILER_LENGTH: usize = EXPIRY_WIDTH + DATA_SIZE_WIDTH;

impl FileEntry {
    pub fn new(tags: &[String], expiry: u64, data_size: u64) -> FileEntry {
        FileEntry {
            tags: tags.to_vec(),
            expiry,
            data_size,
        }
    }

    /// Serializes payload and metadata into the on-disk representation.
    pub fn encode(data: &[u8], tags: &[String], expiry: u64) -> Vec<u8> {
        let joined = tags.join(" ");
        let mut buffer = Vec::with_capacity(data.len() + joined.len() + TRAILER_LENGTH);
        buffer.extend_from_slice(data);
        buffer.extend_from_slice(joined.as_bytes());
        buffer.extend_from_slice(format!("{:<width$}", expiry, width = EXPIRY_WIDTH).as_bytes());
        buffer.extend_from_slice(format!("{:<width$}", data.len(), width = DATA_SIZE_WIDTH).as_bytes());
        buffer
    }

    /// Parses the last `TRAILER_LENGTH` bytes of an entry file.
    pub fn decode_trailer(trailer: &[u8]) -> Option<(u64, u64)> {
        if trailer.len() != TRAILER_LENGTH {
            return None;
        }
        let expiry = std::str::from_utf8(&trailer[..EXPIRY_WIDTH]).ok()?.trim().parse::<u64>().ok()?;
        let data_size = std::str::from_utf8(&trailer[EXPIRY_WIDTH..]).ok()?.trim().parse::<u64>().ok()?;
        Some((expiry, data_size))
    }

    /// Splits a complete entry file into its payload and metadata.
    ///
    /// Returns `None` for truncated or foreign files.
    pub fn decode(content: &[u8]) -> Option<(&[u8], FileEntry)> {
        if content.len() < TRAILER_LENGTH {
            return None;
        }
        let trailer_start = content.len() - TRAILER_LENGTH;
        let (expiry, data_size) = Self::decode_trailer(&content[trailer_start..])?;
        let data_end = usize::try_from(data_size).ok()?;
        if data_end > trailer_start {
            return None;
        }
        let tags = std::str::from_utf8(&content[data_end..trailer_start])
            .ok()?
            .split(' ')
            .filter(|tag| !tag.is_empty())
            .map(String::from)
            .collect();
        Some((&content[..data_end], FileEntry { tags, expiry, data_size }))
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
