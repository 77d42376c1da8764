use std::collections::BTreeSet;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use log::{debug, info, warn};
use parking_lot::RwLock;
use crate::cache::enums::backend_kind::BackendKind;
use crate::cache::errors::CacheError;
use crate::cache::impls::file_entry::TRAILER_LENGTH;
use crate::cache::structs::backend_options::BackendOptions;
use crate::cache::structs::cache_context::CacheContext;
use crate::cache::structs::environment_configuration::EnvironmentConfiguration;
use crate::cache::structs::file_backend::FileBackend;
use crate::cache::structs::file_entry::FileEntry;
use crate::cache::traits::cache_backend::CacheBackend;
use crate::cache::validator;
use crate::common::common::{current_timestamp, is_expired, resolve_expiry, sha1_hex};
use crate::lock::structs::lock::Lock;
use crate::lock::structs::lock_manager::LockManager;

pub const DEFAULT_LIFETIME: u32 = 3600;
pub const ALLOWED_OPTIONS: &[&str] = &["default_lifetime", "cache_directory"];
const ENTRIES_DIRECTORY: &str = "entries";
const TAGS_DIRECTORY: &str = "tags";
const FROZEN_INDEX_FILE: &str = "frozen.index";
const TEMP_SUFFIX: &str = ".tmp";
// NAME_MAX of the common Linux and macOS file systems
const MAXIMUM_NAME_LENGTH: usize = 255;
// "." + identifier + "." + hyphenated uuid + ".tmp"
const TEMP_NAME_OVERHEAD: usize = 1 + 1 + 36 + TEMP_SUFFIX.len();
const LOG_PREFIX: &str = "[FileBackend]";

impl FileBackend {
    pub fn new(environment: &EnvironmentConfiguration, options: &BackendOptions, locks: &LockManager) -> Result<FileBackend, CacheError> {
        options.reject_unknown("file", ALLOWED_OPTIONS)?;
        Ok(FileBackend {
            environment: environment.clone(),
            locks: locks.clone(),
            default_lifetime: options.default_lifetime(DEFAULT_LIFETIME)?,
            configured_directory: options.get_path("cache_directory")?,
            cache_identifier: None,
            cache_directory: None,
            frozen: RwLock::new(None),
        })
    }

    pub fn build(environment: &EnvironmentConfiguration, options: &BackendOptions, locks: &LockManager) -> Result<Box<dyn CacheBackend>, CacheError> {
        Ok(Box::new(Self::new(environment, options, locks)?))
    }

    pub fn default_lifetime(&self) -> u32 {
        self.default_lifetime
    }

    /// Storage root of the bound cache.
    pub fn cache_directory(&self) -> Result<&Path, CacheError> {
        self.cache_directory.as_deref().ok_or_else(|| {
            CacheError::BackendError("file backend has not been bound to a cache yet".to_string())
        })
    }

    pub fn entry_path(&self, entry_identifier: &str) -> Result<PathBuf, CacheError> {
        check_name_length(entry_identifier, TEMP_NAME_OVERHEAD)?;
        let hash = sha1_hex(entry_identifier);
        let path = self.cache_directory()?
            .join(ENTRIES_DIRECTORY)
            .join(&hash[0..2])
            .join(&hash[2..4])
            .join(entry_identifier);
        self.check_path_length(&path, TEMP_NAME_OVERHEAD)?;
        Ok(path)
    }

    fn tag_directory(&self, tag: &str) -> Result<PathBuf, CacheError> {
        check_name_length(tag, 0)?;
        Ok(self.cache_directory()?.join(TAGS_DIRECTORY).join(tag))
    }

    fn tag_marker_path(&self, tag: &str, entry_identifier: &str) -> Result<PathBuf, CacheError> {
        let path = self.tag_directory(tag)?.join(entry_identifier);
        self.check_path_length(&path, 0)?;
        Ok(path)
    }

    /// Marker paths for `tags`, checked before anything on disk changes.
    fn tag_marker_paths(&self, tags: &[String], entry_identifier: &str) -> Result<Vec<PathBuf>, CacheError> {
        tags.iter().map(|tag| self.tag_marker_path(tag, entry_identifier)).collect()
    }

    fn check_path_length(&self, path: &Path, reserved: usize) -> Result<(), CacheError> {
        let maximum = self.environment.maximum_path_length();
        if path.as_os_str().len() + reserved > maximum {
            return Err(CacheError::PathTooLong { path: path.to_path_buf(), maximum });
        }
        Ok(())
    }

    fn namespace_subject(&self) -> Result<String, CacheError> {
        Ok(self.cache_directory()?.display().to_string())
    }

    /// Writers share the namespace lock and hold the entry lock exclusively;
    /// flush and garbage collection take the namespace lock exclusively.
    fn lock_entry(&self, entry_identifier: &str) -> Result<(Lock, Lock), CacheError> {
        let namespace = self.namespace_subject()?;
        let namespace_lock = self.locks.acquire(&namespace, false)?;
        let entry_lock = self.locks.acquire(&format!("{}#{}", namespace, entry_identifier), true)?;
        Ok((namespace_lock, entry_lock))
    }

    fn lock_namespace(&self) -> Result<Lock, CacheError> {
        Ok(self.locks.acquire(&self.namespace_subject()?, true)?)
    }

    fn read_file(path: &Path) -> Result<Option<Vec<u8>>, CacheError> {
        match fs::read(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CacheError::io(path, e)),
        }
    }

    fn read_trailer(path: &Path) -> Result<Option<(u64, u64)>, CacheError> {
        let mut file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(CacheError::io(path, e)),
        };
        let length = file.metadata().map_err(|e| CacheError::io(path, e))?.len();
        if length < TRAILER_LENGTH as u64 {
            return Ok(None);
        }
        let mut trailer = [0u8; TRAILER_LENGTH];
        file.seek(SeekFrom::End(-(TRAILER_LENGTH as i64))).map_err(|e| CacheError::io(path, e))?;
        file.read_exact(&mut trailer).map_err(|e| CacheError::io(path, e))?;
        Ok(FileEntry::decode_trailer(&trailer))
    }

    /// Reads the entry metadata regardless of expiry.
    fn read_entry(&self, entry_identifier: &str) -> Result<Option<(Vec<u8>, FileEntry)>, CacheError> {
        let path = self.entry_path(entry_identifier)?;
        let Some(content) = Self::read_file(&path)? else {
            return Ok(None);
        };
        match FileEntry::decode(&content) {
            Some((data, entry)) => Ok(Some((data.to_vec(), entry))),
            None => {
                warn!("{} Ignoring malformed entry file {}", LOG_PREFIX, path.display());
                Ok(None)
            }
        }
    }

    /// Writes to a temporary sibling first so readers never observe a partial file.
    fn write_atomically(path: &Path, content: &[u8]) -> Result<(), CacheError> {
        let directory = path.parent().ok_or_else(|| CacheError::BackendError(format!("{} has no parent directory", path.display())))?;
        fs::create_dir_all(directory).map_err(|e| CacheError::io(directory, e))?;
        let file_name = path.file_name().map(|name| name.to_string_lossy().to_string()).unwrap_or_default();
        let temp_path = directory.join(format!(".{}.{}{}", file_name, uuid::Uuid::new_v4(), TEMP_SUFFIX));

        let written = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_path)
            .and_then(|mut file| {
                file.write_all(content)?;
                file.flush()
            });
        if let Err(e) = written {
            let _ = fs::remove_file(&temp_path);
            return Err(CacheError::io(&temp_path, e));
        }
        if let Err(e) = fs::rename(&temp_path, path) {
            let _ = fs::remove_file(&temp_path);
            return Err(CacheError::io(path, e));
        }
        Ok(())
    }

    fn remove_file_if_exists(path: &Path) -> Result<bool, CacheError> {
        match fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(CacheError::io(path, e)),
        }
    }

    fn remove_dir_if_exists(path: &Path) -> Result<(), CacheError> {
        match fs::remove_dir_all(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CacheError::io(path, e)),
        }
    }

    fn remove_tag_markers(&self, tags: &[String], entry_identifier: &str) -> Result<(), CacheError> {
        for tag in tags {
            Self::remove_file_if_exists(&self.tag_marker_path(tag, entry_identifier)?)?;
        }
        Ok(())
    }

    fn write_tag_markers(markers: &[PathBuf]) -> Result<(), CacheError> {
        for marker in markers {
            if let Some(directory) = marker.parent() {
                fs::create_dir_all(directory).map_err(|e| CacheError::io(directory, e))?;
            }
            File::create(marker).map_err(|e| CacheError::io(marker, e))?;
        }
        Ok(())
    }

    /// Undoes a failed `set`: drops the markers the previous entry did not carry.
    fn discard_new_markers(&self, tags: &[String], previous_tags: &[String], entry_identifier: &str) {
        for tag in tags.iter().filter(|tag| !previous_tags.contains(tag)) {
            let removed = self.tag_marker_path(tag, entry_identifier).and_then(|marker| Self::remove_file_if_exists(&marker));
            if let Err(e) = removed {
                warn!("{} Could not roll back tag marker \"{}\" of \"{}\": {}", LOG_PREFIX, tag, entry_identifier, e);
            }
        }
    }

    /// Removes an entry and its markers. Callers hold the entry lock.
    fn remove_unlocked(&self, entry_identifier: &str) -> Result<bool, CacheError> {
        if let Some((_, entry)) = self.read_entry(entry_identifier)? {
            self.remove_tag_markers(&entry.tags, entry_identifier)?;
        }
        Self::remove_file_if_exists(&self.entry_path(entry_identifier)?)
    }

    fn list_directory(path: &Path) -> Result<Vec<PathBuf>, CacheError> {
        let reader = match fs::read_dir(path) {
            Ok(reader) => reader,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(CacheError::io(path, e)),
        };
        let mut paths = Vec::new();
        for item in reader {
            paths.push(item.map_err(|e| CacheError::io(path, e))?.path());
        }
        Ok(paths)
    }

    fn file_name_of(path: &Path) -> String {
        path.file_name().map(|name| name.to_string_lossy().to_string()).unwrap_or_default()
    }

    /// Every file below `entries/`, two levels of shard directories deep.
    fn entry_files(&self) -> Result<Vec<PathBuf>, CacheError> {
        let mut files = Vec::new();
        for first in Self::list_directory(&self.cache_directory()?.join(ENTRIES_DIRECTORY))? {
            for second in Self::list_directory(&first)? {
                files.extend(Self::list_directory(&second)?.into_iter().filter(|p| p.is_file()));
            }
        }
        Ok(files)
    }

    fn prune_empty_directory(path: &Path) {
        // remove_dir only succeeds on empty directories
        let _ = fs::remove_dir(path);
    }

    fn is_temp_file(name: &str) -> bool {
        name.starts_with('.') && name.ends_with(TEMP_SUFFIX)
    }

    fn ensure_writable(&self) -> Result<(), CacheError> {
        if self.frozen.read().is_some() {
            return Err(CacheError::Frozen(self.cache_identifier.clone().unwrap_or_default()));
        }
        Ok(())
    }

    /// `Some(true|false)` answers membership while frozen, `None` when writable.
    fn frozen_member(&self, entry_identifier: &str) -> Option<bool> {
        self.frozen.read().as_ref().map(|identifiers| identifiers.contains(entry_identifier))
    }

    fn load_frozen_index(directory: &Path) -> Result<Option<BTreeSet<String>>, CacheError> {
        let Some(content) = Self::read_file(&directory.join(FROZEN_INDEX_FILE))? else {
            return Ok(None);
        };
        let content = String::from_utf8_lossy(&content);
        Ok(Some(content.lines().filter(|line| !line.is_empty()).map(str::to_string).collect()))
    }
}

fn check_name_length(name: &str, reserved: usize) -> Result<(), CacheError> {
    if name.len() + reserved > MAXIMUM_NAME_LENGTH {
        return Err(CacheError::NameTooLong { name: name.to_string(), maximum: MAXIMUM_NAME_LENGTH - reserved });
    }
    Ok(())
}

impl CacheBackend for FileBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::file
    }

    fn set_cache(&mut self, cache: &CacheContext) -> Result<(), CacheError> {
        validator::validate_entry_identifier(&cache.identifier)?;
        let directory = match &self.configured_directory {
            Some(directory) => directory.clone(),
            None => self.environment.file_cache_base_path()
                .join(self.environment.application_identifier())
                .join(&cache.identifier),
        };
        self.check_path_length(&directory, 0)?;
        fs::create_dir_all(&directory).map_err(|e| CacheError::io(&directory, e))?;
        let frozen = Self::load_frozen_index(&directory)?;
        if frozen.is_some() {
            info!("{} Cache \"{}\" is frozen", LOG_PREFIX, cache.identifier);
        }
        *self.frozen.get_mut() = frozen;
        debug!("{} Cache \"{}\" stores entries in {}", LOG_PREFIX, cache.identifier, directory.display());
        self.cache_identifier = Some(cache.identifier.clone());
        self.cache_directory = Some(directory);
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip_all)]
    fn set(&self, entry_identifier: &str, data: &[u8], tags: &[String], lifetime: Option<u32>) -> Result<(), CacheError> {
        self.ensure_writable()?;
        let path = self.entry_path(entry_identifier)?;
        let markers = self.tag_marker_paths(tags, entry_identifier)?;
        let expiry = resolve_expiry(lifetime, self.default_lifetime, current_timestamp());
        let content = FileEntry::encode(data, tags, expiry);

        let _locks = self.lock_entry(entry_identifier)?;
        let previous_tags = self.read_entry(entry_identifier)?.map(|(_, previous)| previous.tags).unwrap_or_default();
        // markers go first: an entry must never be live without its markers
        let written = Self::write_tag_markers(&markers).and_then(|_| Self::write_atomically(&path, &content));
        if let Err(e) = written {
            self.discard_new_markers(tags, &previous_tags, entry_identifier);
            return Err(e);
        }
        let stale: Vec<String> = previous_tags.into_iter().filter(|tag| !tags.contains(tag)).collect();
        self.remove_tag_markers(&stale, entry_identifier)?;
        debug!("{} Stored \"{}\" ({} bytes, {} tag(s), expiry {})", LOG_PREFIX, entry_identifier, data.len(), tags.len(), expiry);
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip_all)]
    fn get(&self, entry_identifier: &str) -> Result<Option<Vec<u8>>, CacheError> {
        match self.frozen_member(entry_identifier) {
            Some(false) => return Ok(None),
            Some(true) => return Ok(self.read_entry(entry_identifier)?.map(|(data, _)| data)),
            None => {}
        }
        match self.read_entry(entry_identifier)? {
            Some((data, entry)) if !is_expired(entry.expiry, current_timestamp()) => Ok(Some(data)),
            _ => Ok(None),
        }
    }

    fn has(&self, entry_identifier: &str) -> Result<bool, CacheError> {
        if let Some(member) = self.frozen_member(entry_identifier) {
            return Ok(member);
        }
        let path = self.entry_path(entry_identifier)?;
        match Self::read_trailer(&path)? {
            Some((expiry, _)) => Ok(!is_expired(expiry, current_timestamp())),
            None => Ok(false),
        }
    }

    fn remove(&self, entry_identifier: &str) -> Result<bool, CacheError> {
        self.ensure_writable()?;
        let _locks = self.lock_entry(entry_identifier)?;
        let removed = self.remove_unlocked(entry_identifier)?;
        if removed {
            debug!("{} Removed \"{}\"", LOG_PREFIX, entry_identifier);
        }
        Ok(removed)
    }

    fn find_identifiers_by_tag(&self, tag: &str) -> Result<BTreeSet<String>, CacheError> {
        let tag_directory = match self.tag_directory(tag) {
            Ok(directory) => directory,
            // no marker can exist for a tag that does not fit in a file name
            Err(CacheError::NameTooLong { .. }) => return Ok(BTreeSet::new()),
            Err(e) => return Err(e),
        };
        let frozen = self.frozen.read().is_some();
        let now = current_timestamp();
        let mut identifiers = BTreeSet::new();
        for marker in Self::list_directory(&tag_directory)? {
            let entry_identifier = Self::file_name_of(&marker);
            if !validator::is_valid_entry_identifier(&entry_identifier) {
                continue;
            }
            if let Some((_, entry)) = self.read_entry(&entry_identifier)?
                && entry.has_tag(tag)
                && (frozen || !is_expired(entry.expiry, now))
            {
                identifiers.insert(entry_identifier);
            }
        }
        Ok(identifiers)
    }

    fn flush(&self) -> Result<(), CacheError> {
        let directory = self.cache_directory()?.to_path_buf();
        let _lock = self.lock_namespace()?;
        Self::remove_dir_if_exists(&directory.join(ENTRIES_DIRECTORY))?;
        Self::remove_dir_if_exists(&directory.join(TAGS_DIRECTORY))?;
        Self::remove_file_if_exists(&directory.join(FROZEN_INDEX_FILE))?;
        *self.frozen.write() = None;
        info!("{} Flushed cache \"{}\"", LOG_PREFIX, self.cache_identifier.as_deref().unwrap_or_default());
        Ok(())
    }

    fn flush_by_tag(&self, tag: &str) -> Result<u64, CacheError> {
        let identifiers = self.find_identifiers_by_tag(tag)?;
        if !identifiers.is_empty() {
            self.ensure_writable()?;
        }
        let mut flushed = 0;
        for entry_identifier in identifiers {
            if self.remove(&entry_identifier)? {
                flushed += 1;
            }
        }
        if let Ok(tag_directory) = self.tag_directory(tag) {
            Self::prune_empty_directory(&tag_directory);
        }
        debug!("{} Flushed {} entries tagged \"{}\"", LOG_PREFIX, flushed, tag);
        Ok(flushed)
    }

    fn collect_garbage(&self) -> Result<(), CacheError> {
        let directory = self.cache_directory()?.to_path_buf();
        let _lock = self.lock_namespace()?;
        if self.frozen.read().is_some() {
            debug!("{} Skipping garbage collection of frozen cache \"{}\"", LOG_PREFIX, self.cache_identifier.as_deref().unwrap_or_default());
            return Ok(());
        }
        let now = current_timestamp();
        let mut expired = 0u64;
        let mut orphans = 0u64;

        for path in self.entry_files()? {
            let name = Self::file_name_of(&path);
            // Writers hold the namespace lock shared, so no temp file is in flight here.
            if Self::is_temp_file(&name) {
                if Self::remove_file_if_exists(&path)? {
                    orphans += 1;
                }
                continue;
            }
            let Some((expiry, _)) = Self::read_trailer(&path)? else {
                continue;
            };
            if is_expired(expiry, now) {
                if let Some((_, entry)) = self.read_entry(&name)? {
                    self.remove_tag_markers(&entry.tags, &name)?;
                }
                if Self::remove_file_if_exists(&path)? {
                    expired += 1;
                }
            }
        }

        let mut stale_markers = 0u64;
        for tag_directory in Self::list_directory(&directory.join(TAGS_DIRECTORY))? {
            let tag = Self::file_name_of(&tag_directory);
            for marker in Self::list_directory(&tag_directory)? {
                let entry_identifier = Self::file_name_of(&marker);
                let live = validator::is_valid_entry_identifier(&entry_identifier)
                    && self.read_entry(&entry_identifier)?
                        .is_some_and(|(_, entry)| entry.has_tag(&tag) && !is_expired(entry.expiry, now));
                if !live && Self::remove_file_if_exists(&marker)? {
                    stale_markers += 1;
                }
            }
            Self::prune_empty_directory(&tag_directory);
        }

        for first in Self::list_directory(&directory.join(ENTRIES_DIRECTORY))? {
            for second in Self::list_directory(&first)? {
                Self::prune_empty_directory(&second);
            }
            Self::prune_empty_directory(&first);
        }

        info!(
            "{} Garbage collection of \"{}\" removed {} expired entries, {} stale tag markers, {} orphaned temp files",
            LOG_PREFIX,
            self.cache_identifier.as_deref().unwrap_or_default(),
            expired,
            stale_markers,
            orphans
        );
        Ok(())
    }

    fn entry_identifiers(&self) -> Result<Vec<String>, CacheError> {
        if let Some(identifiers) = self.frozen.read().as_ref() {
            return Ok(identifiers.iter().cloned().collect());
        }
        let now = current_timestamp();
        let mut identifiers = Vec::new();
        for path in self.entry_files()? {
            let name = Self::file_name_of(&path);
            if Self::is_temp_file(&name) || !validator::is_valid_entry_identifier(&name) {
                continue;
            }
            if let Some((expiry, _)) = Self::read_trailer(&path)?
                && !is_expired(expiry, now)
            {
                identifiers.push(name);
            }
        }
        identifiers.sort();
        Ok(identifiers)
    }

    /// Drops expired entries, pins the rest to never expire and records them
    /// in the frozen index.
    fn freeze(&self) -> Result<(), CacheError> {
        let directory = self.cache_directory()?.to_path_buf();
        let _lock = self.lock_namespace()?;
        self.ensure_writable()?;
        let now = current_timestamp();
        let mut identifiers = BTreeSet::new();
        for path in self.entry_files()? {
            let name = Self::file_name_of(&path);
            if Self::is_temp_file(&name) || !validator::is_valid_entry_identifier(&name) {
                continue;
            }
            let Some((data, entry)) = self.read_entry(&name)? else {
                continue;
            };
            if is_expired(entry.expiry, now) {
                self.remove_tag_markers(&entry.tags, &name)?;
                Self::remove_file_if_exists(&path)?;
                continue;
            }
            if entry.expiry != 0 {
                Self::write_atomically(&path, &FileEntry::encode(&data, &entry.tags, 0))?;
            }
            identifiers.insert(name);
        }
        let index = identifiers.iter().map(String::as_str).collect::<Vec<_>>().join("\n");
        Self::write_atomically(&directory.join(FROZEN_INDEX_FILE), index.as_bytes())?;
        info!("{} Froze cache \"{}\" with {} entries", LOG_PREFIX, self.cache_identifier.as_deref().unwrap_or_default(), identifiers.len());
        *self.frozen.write() = Some(identifiers);
        Ok(())
    }

    fn is_frozen(&self) -> Result<bool, CacheError> {
        Ok(self.frozen.read().is_some())
    }
}
