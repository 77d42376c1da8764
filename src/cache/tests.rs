#[cfg(test)]
mod cache_tests {
    mod validator_tests {
        use proptest::prelude::*;
        use crate::cache::errors::CacheError;
        use crate::cache::validator::{is_valid_entry_identifier, is_valid_tag, validate_entry_identifier, validate_tag, validate_tags};

        #[test]
        fn test_valid_identifiers() {
            for identifier in ["a", "Pages", "entry_1", "100%", "a-b", "x&y", "UPPER_lower-09"] {
                assert!(is_valid_entry_identifier(identifier), "{} should be valid", identifier);
            }
        }

        #[test]
        fn test_invalid_identifiers() {
            for identifier in ["", " ", "a b", "a/b", "a.b", "ä", "a\n", "a:b", "../etc"] {
                assert!(!is_valid_entry_identifier(identifier), "{:?} should be invalid", identifier);
            }
        }

        #[test]
        fn test_validation_errors_carry_input() {
            match validate_entry_identifier("a b") {
                Err(CacheError::InvalidIdentifier(value)) => assert_eq!(value, "a b"),
                other => panic!("unexpected result: {:?}", other),
            }
            match validate_tag("t/1") {
                Err(CacheError::InvalidTag(value)) => assert_eq!(value, "t/1"),
                other => panic!("unexpected result: {:?}", other),
            }
        }

        #[test]
        fn test_validate_tags_stops_at_first_invalid() {
            assert!(validate_tags(&["a", "b"]).is_ok());
            assert!(validate_tags::<&str>(&[]).is_ok());
            assert!(matches!(validate_tags(&["a", "b c", "d e"]), Err(CacheError::InvalidTag(tag)) if tag == "b c"));
        }

        proptest! {
            #[test]
            fn prop_allowed_charset_is_valid(identifier in "[a-zA-Z0-9_%&-]{1,64}") {
                prop_assert!(is_valid_entry_identifier(&identifier));
                prop_assert!(is_valid_tag(&identifier));
            }

            #[test]
            fn prop_foreign_character_is_invalid(prefix in "[a-z]{0,8}", foreign in "[ ./:;#@!?*]", suffix in "[a-z]{0,8}") {
                let identifier = format!("{}{}{}", prefix, foreign, suffix);
                prop_assert!(!is_valid_entry_identifier(&identifier));
                prop_assert!(!is_valid_tag(&identifier));
            }
        }
    }

    mod kind_tests {
        use std::str::FromStr;
        use crate::cache::enums::backend_kind::BackendKind;
        use crate::cache::enums::frontend_kind::FrontendKind;
        use crate::cache::enums::serializer_kind::SerializerKind;
        use crate::cache::errors::CacheError;

        #[test]
        fn test_backend_kind_from_str() {
            assert_eq!(BackendKind::from_str("file").unwrap(), BackendKind::file);
            assert_eq!(BackendKind::from_str("memcached").unwrap(), BackendKind::memcache);
            assert_eq!(BackendKind::from_str("memory").unwrap(), BackendKind::transient_memory);
            assert!(matches!(BackendKind::from_str("apcu"), Err(CacheError::InvalidBackend(_))));
        }

        #[test]
        fn test_kind_display_matches_serde() {
            for kind in [BackendKind::file, BackendKind::transient_memory, BackendKind::null, BackendKind::memcache, BackendKind::redis] {
                assert_eq!(serde_json::to_string(&kind).unwrap(), format!("\"{}\"", kind));
            }
            assert_eq!(format!("{}", FrontendKind::string), "string");
            assert_eq!(format!("{}", SerializerKind::msgpack), "msgpack");
        }

        #[test]
        fn test_defaults() {
            assert_eq!(BackendKind::default(), BackendKind::file);
            assert_eq!(FrontendKind::default(), FrontendKind::variable);
            assert_eq!(SerializerKind::default(), SerializerKind::json);
        }
    }

    mod backend_options_tests {
        use crate::cache::errors::CacheError;
        use crate::cache::structs::backend_options::BackendOptions;

        #[test]
        fn test_reject_unknown() {
            let options = BackendOptions::new().with("default_lifetime", 10).with("bogus", true);
            assert!(options.reject_unknown("file", &["default_lifetime", "bogus"]).is_ok());
            match options.reject_unknown("file", &["default_lifetime"]) {
                Err(CacheError::InvalidBackendOption(message)) => assert!(message.contains("bogus")),
                other => panic!("unexpected result: {:?}", other),
            }
        }

        #[test]
        fn test_typed_getters() {
            let options = BackendOptions::new()
                .with("default_lifetime", 60)
                .with("cache_directory", "/tmp/pages")
                .with("servers", vec!["a:1", "b:2"]);
            assert_eq!(options.default_lifetime(3600).unwrap(), 60);
            assert_eq!(options.get_str("cache_directory").unwrap(), Some("/tmp/pages"));
            assert_eq!(options.get_str_list("servers").unwrap(), Some(vec!["a:1".to_string(), "b:2".to_string()]));
            assert_eq!(options.get_u64("missing").unwrap(), None);
            assert_eq!(BackendOptions::new().default_lifetime(3600).unwrap(), 3600);
        }

        #[test]
        fn test_comma_separated_list() {
            let options = BackendOptions::new().with("servers", "a:1, b:2,");
            assert_eq!(options.get_str_list("servers").unwrap(), Some(vec!["a:1".to_string(), "b:2".to_string()]));
        }

        #[test]
        fn test_wrong_types_are_rejected() {
            let options = BackendOptions::new()
                .with("default_lifetime", "soon")
                .with("negative", -1)
                .with("huge", u64::MAX)
                .with("cache_directory", "");
            assert!(matches!(options.default_lifetime(0), Err(CacheError::InvalidBackendOption(_))));
            assert!(options.get_u64("negative").is_err());
            assert!(options.get_u32("huge").is_err());
            assert!(options.get_path("cache_directory").is_err());
            assert!(options.get_str_list("default_lifetime").unwrap().is_some());
        }

        #[test]
        fn test_deserializes_from_toml_table() {
            let options: BackendOptions = toml::from_str("default_lifetime = 5\nservers = [\"x:1\"]").unwrap();
            assert_eq!(options.get_u32("default_lifetime").unwrap(), Some(5));
            assert!(options.contains("servers"));
        }
    }

    mod file_entry_tests {
        use crate::cache::impls::file_entry::TRAILER_LENGTH;
        use crate::cache::structs::file_entry::FileEntry;

        #[test]
        fn test_encode_layout() {
            let encoded = FileEntry::encode(b"data", &["t1".to_string(), "t2".to_string()], 1234);
            assert_eq!(encoded, b"datat1 t21234          4         ".to_vec());
            assert_eq!(encoded.len(), 4 + 5 + TRAILER_LENGTH);
        }

        #[test]
        fn test_decode() {
            let encoded = FileEntry::encode(b"payload with spaces ", &["a".to_string()], 0);
            let (data, entry) = FileEntry::decode(&encoded).unwrap();
            assert_eq!(data, b"payload with spaces ");
            assert_eq!(entry, FileEntry::new(&["a".to_string()], 0, 20));
            assert!(entry.has_tag("a"));
            assert!(!entry.has_tag("b"));
        }

        #[test]
        fn test_decode_rejects_malformed_content() {
            assert!(FileEntry::decode(b"short").is_none());
            assert!(FileEntry::decode(&[b'x'; TRAILER_LENGTH]).is_none());
            let mut oversized = FileEntry::encode(b"abc", &[], 0);
            let len = oversized.len();
            oversized[len - 10..].copy_from_slice(b"999       ");
            assert!(FileEntry::decode(&oversized).is_none());
        }
    }

    mod serializer_tests {
        use serde::{Deserialize, Serialize};
        use crate::cache::enums::serializer_kind::SerializerKind;
        use crate::cache::errors::CacheError;
        use crate::cache::structs::json_serializer::JsonSerializer;
        use crate::cache::traits::value_serializer::ValueSerializer;

        #[derive(Serialize, Deserialize, Debug, PartialEq)]
        struct Page {
            title: String,
            views: u64,
            tags: Vec<String>,
        }

        fn page() -> Page {
            Page { title: "Home".to_string(), views: 42, tags: vec!["nav".to_string()] }
        }

        #[test]
        fn test_json_output_is_plain_json() {
            let bytes = JsonSerializer.encode(&page()).unwrap();
            assert_eq!(String::from_utf8(bytes).unwrap(), r#"{"title":"Home","views":42,"tags":["nav"]}"#);
        }

        #[test]
        fn test_both_kinds_restore_the_value() {
            for kind in [SerializerKind::json, SerializerKind::msgpack] {
                let bytes = kind.encode(&page()).unwrap();
                let restored: Page = kind.decode(&bytes).unwrap();
                assert_eq!(restored, page());
            }
        }

        #[test]
        fn test_garbage_input_is_serialization_error() {
            let result: Result<Page, CacheError> = SerializerKind::json.decode(b"{not json");
            assert!(matches!(result, Err(CacheError::SerializationError(_))));
            let result: Result<Page, CacheError> = SerializerKind::msgpack.decode(&[0xc1]);
            assert!(matches!(result, Err(CacheError::SerializationError(_))));
        }
    }

    mod frontend_tests {
        use std::collections::BTreeSet;
        use crate::cache::enums::backend_kind::BackendKind;
        use crate::cache::enums::frontend::Frontend;
        use crate::cache::enums::frontend_kind::FrontendKind;
        use crate::cache::enums::serializer_kind::SerializerKind;
        use crate::cache::errors::CacheError;
        use crate::cache::structs::string_frontend::StringFrontend;
        use crate::cache::structs::variable_frontend::VariableFrontend;
        use crate::cache::traits::cache_backend::MockCacheBackend;
        use crate::cache::traits::cache_frontend::CacheFrontend;

        fn bound_backend() -> MockCacheBackend {
            let mut backend = MockCacheBackend::new();
            backend.expect_set_cache().times(1).returning(|_| Ok(()));
            backend.expect_kind().return_const(BackendKind::null);
            backend
        }

        #[test]
        fn test_construction_binds_backend_once() {
            let mut backend = MockCacheBackend::new();
            backend.expect_set_cache()
                .withf(|context| context.identifier == "Pages" && context.frontend == FrontendKind::variable)
                .times(1)
                .returning(|_| Ok(()));
            let frontend = VariableFrontend::new("Pages", Box::new(backend), SerializerKind::json).unwrap();
            assert_eq!(frontend.identifier(), "Pages");
        }

        #[test]
        fn test_invalid_cache_identifier_is_rejected_before_binding() {
            let mut backend = MockCacheBackend::new();
            backend.expect_set_cache().never();
            let result = StringFrontend::new("not valid", Box::new(backend));
            assert!(matches!(result, Err(CacheError::InvalidIdentifier(_))));
        }

        #[test]
        fn test_invalid_identifier_never_reaches_backend() {
            let mut backend = bound_backend();
            backend.expect_set().never();
            backend.expect_get().never();
            backend.expect_has().never();
            backend.expect_remove().never();
            let frontend = VariableFrontend::new("Pages", Box::new(backend), SerializerKind::json).unwrap();
            assert!(matches!(frontend.set("a b", &1, &[], None), Err(CacheError::InvalidIdentifier(_))));
            assert!(matches!(frontend.get::<i32>("a/b"), Err(CacheError::InvalidIdentifier(_))));
            assert!(matches!(frontend.has(""), Err(CacheError::InvalidIdentifier(_))));
            assert!(matches!(frontend.remove("a:b"), Err(CacheError::InvalidIdentifier(_))));
        }

        #[test]
        fn test_invalid_tag_never_reaches_backend() {
            let mut backend = bound_backend();
            backend.expect_set().never();
            backend.expect_flush_by_tag().never();
            backend.expect_find_identifiers_by_tag().never();
            let frontend = VariableFrontend::new("Pages", Box::new(backend), SerializerKind::json).unwrap();
            let tags = vec!["ok".to_string(), "not ok".to_string()];
            assert!(matches!(frontend.set("a", &1, &tags, None), Err(CacheError::InvalidTag(_))));
            assert!(matches!(frontend.flush_by_tag("t/1"), Err(CacheError::InvalidTag(_))));
            assert!(matches!(frontend.flush_by_tags(&tags), Err(CacheError::InvalidTag(_))));
            assert!(matches!(frontend.get_by_tag::<i32>("a b"), Err(CacheError::InvalidTag(_))));
        }

        #[test]
        fn test_set_serializes_and_delegates() {
            let mut backend = bound_backend();
            backend.expect_set()
                .withf(|id, data, tags, lifetime| {
                    id == "a" && data == b"[1,2,3]" && tags.len() == 1 && tags[0] == "t" && *lifetime == Some(10)
                })
                .times(1)
                .returning(|_, _, _, _| Ok(()));
            let frontend = VariableFrontend::new("Pages", Box::new(backend), SerializerKind::json).unwrap();
            frontend.set("a", &vec![1, 2, 3], &["t".to_string()], Some(10)).unwrap();
        }

        #[test]
        fn test_get_deserializes_hit_and_passes_miss() {
            let mut backend = bound_backend();
            backend.expect_get()
                .returning(|id| Ok(if id == "hit" { Some(b"\"value\"".to_vec()) } else { None }));
            let frontend = VariableFrontend::new("Pages", Box::new(backend), SerializerKind::json).unwrap();
            assert_eq!(frontend.get::<String>("hit").unwrap(), Some("value".to_string()));
            assert_eq!(frontend.get::<String>("miss").unwrap(), None);
        }

        #[test]
        fn test_get_by_tag_skips_entries_expired_since_lookup() {
            let mut backend = bound_backend();
            backend.expect_find_identifiers_by_tag()
                .returning(|_| Ok(BTreeSet::from(["a".to_string(), "gone".to_string()])));
            backend.expect_get()
                .returning(|id| Ok(if id == "a" { Some(b"7".to_vec()) } else { None }));
            let frontend = VariableFrontend::new("Pages", Box::new(backend), SerializerKind::json).unwrap();
            let entries = frontend.get_by_tag::<u32>("t").unwrap();
            assert_eq!(entries.len(), 1);
            assert_eq!(entries.get("a"), Some(&7));
        }

        #[test]
        fn test_flush_by_tags_sums_counts() {
            let mut backend = bound_backend();
            backend.expect_flush_by_tag().times(2).returning(|tag| Ok(if tag == "a" { 2 } else { 3 }));
            let frontend = VariableFrontend::new("Pages", Box::new(backend), SerializerKind::json).unwrap();
            assert_eq!(frontend.flush_by_tags(&["a".to_string(), "b".to_string()]).unwrap(), 5);
        }

        #[test]
        fn test_backend_errors_propagate() {
            let mut backend = bound_backend();
            backend.expect_set().returning(|_, _, _, _| Err(CacheError::BackendError("disk full".to_string())));
            let frontend = StringFrontend::new("Pages", Box::new(backend)).unwrap();
            assert!(matches!(frontend.set("a", "x", &[], None), Err(CacheError::BackendError(_))));
        }

        #[test]
        fn test_string_frontend_rejects_non_utf8() {
            let mut backend = bound_backend();
            backend.expect_get().returning(|_| Ok(Some(vec![0xff, 0xfe])));
            let frontend = StringFrontend::new("Pages", Box::new(backend)).unwrap();
            assert!(matches!(frontend.get("a"), Err(CacheError::SerializationError(_))));
        }

        #[test]
        fn test_frontend_enum_accessors() {
            let cache = Frontend::from(StringFrontend::new("Pages", Box::new(bound_backend())).unwrap());
            assert_eq!(cache.kind(), FrontendKind::string);
            assert_eq!(cache.backend_kind(), BackendKind::null);
            assert_eq!(cache.identifier(), "Pages");
            assert!(cache.as_string().is_ok());
            assert!(matches!(cache.as_variable(), Err(CacheError::IncompatibleFrontend(id)) if id == "Pages"));
        }

        #[test]
        fn test_entries_skip_identifiers_gone_since_listing() {
            let mut backend = bound_backend();
            backend.expect_entry_identifiers()
                .times(1)
                .returning(|| Ok(vec!["a".to_string(), "gone".to_string(), "c".to_string()]));
            backend.expect_get()
                .returning(|id| Ok(match id {
                    "a" => Some(b"1".to_vec()),
                    "c" => Some(b"3".to_vec()),
                    _ => None,
                }));
            let frontend = VariableFrontend::new("Pages", Box::new(backend), SerializerKind::json).unwrap();
            let entries: Vec<(String, u32)> = frontend.entries::<u32>().unwrap().collect::<Result<_, _>>().unwrap();
            assert_eq!(entries, vec![("a".to_string(), 1), ("c".to_string(), 3)]);
        }

        #[test]
        fn test_entries_surface_read_errors() {
            let mut backend = bound_backend();
            backend.expect_entry_identifiers().returning(|| Ok(vec!["a".to_string()]));
            backend.expect_get().returning(|_| Err(CacheError::BackendError("connection lost".to_string())));
            let frontend = StringFrontend::new("Pages", Box::new(backend)).unwrap();
            let mut entries = frontend.entries().unwrap();
            assert!(matches!(entries.next(), Some(Err(CacheError::BackendError(_)))));
            assert!(entries.next().is_none());
        }

        #[test]
        fn test_debug_names_backend_kind_not_internals() {
            let variable = VariableFrontend::new("Pages", Box::new(bound_backend()), SerializerKind::msgpack).unwrap();
            let rendered = format!("{:?}", variable);
            assert!(rendered.contains("VariableFrontend"));
            assert!(rendered.contains("\"Pages\""));
            assert!(rendered.contains("null"));
            assert!(rendered.contains("msgpack"));
            let string = StringFrontend::new("Labels", Box::new(bound_backend())).unwrap();
            assert!(format!("{:?}", string).starts_with("StringFrontend"));
        }

        #[test]
        fn test_freeze_delegates_to_backend() {
            let mut backend = bound_backend();
            backend.expect_freeze().times(1).returning(|| Ok(()));
            backend.expect_is_frozen().returning(|| Ok(true));
            let cache = Frontend::from(StringFrontend::new("Pages", Box::new(backend)).unwrap());
            cache.freeze().unwrap();
            assert!(cache.is_frozen().unwrap());
        }
    }

    mod transient_memory_backend_tests {
        use crate::cache::enums::frontend_kind::FrontendKind;
        use crate::cache::errors::CacheError;
        use crate::cache::structs::backend_options::BackendOptions;
        use crate::cache::structs::cache_context::CacheContext;
        use crate::cache::structs::transient_memory_backend::TransientMemoryBackend;
        use crate::cache::traits::cache_backend::CacheBackend;

        fn backend() -> TransientMemoryBackend {
            let mut backend = TransientMemoryBackend::new(&BackendOptions::new()).unwrap();
            backend.set_cache(&CacheContext { identifier: "Memory".to_string(), frontend: FrontendKind::variable }).unwrap();
            backend
        }

        fn tags(values: &[&str]) -> Vec<String> {
            values.iter().map(|value| value.to_string()).collect()
        }

        #[test]
        fn test_set_get_remove() {
            let backend = backend();
            backend.set("a", b"1", &[], None).unwrap();
            assert_eq!(backend.get("a").unwrap(), Some(b"1".to_vec()));
            assert!(backend.has("a").unwrap());
            assert!(backend.remove("a").unwrap());
            assert!(!backend.remove("a").unwrap());
            assert_eq!(backend.get("a").unwrap(), None);
        }

        #[test]
        fn test_overwrite_replaces_tags() {
            let backend = backend();
            backend.set("a", b"1", &tags(&["t1"]), None).unwrap();
            backend.set("a", b"2", &tags(&["t2"]), None).unwrap();
            assert!(backend.find_identifiers_by_tag("t1").unwrap().is_empty());
            assert!(backend.find_identifiers_by_tag("t2").unwrap().contains("a"));
            assert!(!backend.store.read().tags.contains_key("t1"));
        }

        #[test]
        fn test_expired_entries_are_invisible_and_collected() {
            let backend = backend();
            backend.set("old", b"1", &tags(&["t"]), None).unwrap();
            backend.store.write().entries.get_mut("old").unwrap().expiry = 1;
            assert!(!backend.has("old").unwrap());
            assert_eq!(backend.get("old").unwrap(), None);
            assert!(backend.find_identifiers_by_tag("t").unwrap().is_empty());
            assert_eq!(backend.len(), 1);
            backend.collect_garbage().unwrap();
            assert!(backend.is_empty());
            assert!(backend.store.read().tags.is_empty());
        }

        #[test]
        fn test_flush_by_tag_counts() {
            let backend = backend();
            backend.set("a", b"1", &tags(&["t"]), None).unwrap();
            backend.set("b", b"2", &tags(&["t", "u"]), None).unwrap();
            backend.set("c", b"3", &tags(&["u"]), None).unwrap();
            assert_eq!(backend.flush_by_tag("t").unwrap(), 2);
            assert!(backend.has("c").unwrap());
            assert_eq!(backend.find_identifiers_by_tag("u").unwrap().len(), 1);
            backend.flush().unwrap();
            assert!(backend.is_empty());
        }

        #[test]
        fn test_unknown_option_is_rejected() {
            assert!(TransientMemoryBackend::new(&BackendOptions::new().with("servers", "x")).is_err());
        }

        #[test]
        fn test_freeze_drops_expired_and_pins_the_rest() {
            let backend = backend();
            backend.set("a", b"1", &tags(&["t"]), Some(100)).unwrap();
            backend.set("old", b"1", &[], None).unwrap();
            backend.store.write().entries.get_mut("old").unwrap().expiry = 1;
            backend.freeze().unwrap();
            assert!(backend.is_frozen().unwrap());
            assert!(matches!(backend.freeze(), Err(CacheError::Frozen(_))));
            assert_eq!(backend.len(), 1);
            assert_eq!(backend.store.read().entries.get("a").unwrap().expiry, 0);
            assert!(matches!(backend.set("b", b"2", &[], None), Err(CacheError::Frozen(_))));
            assert!(matches!(backend.remove("a"), Err(CacheError::Frozen(_))));
            assert!(matches!(backend.flush_by_tag("t"), Err(CacheError::Frozen(_))));
            assert_eq!(backend.flush_by_tag("unused").unwrap(), 0);
            assert_eq!(backend.get("a").unwrap(), Some(b"1".to_vec()));
            backend.flush().unwrap();
            assert!(!backend.is_frozen().unwrap());
            backend.set("b", b"2", &[], None).unwrap();
        }

        #[test]
        fn test_entry_identifiers_skip_expired() {
            let backend = backend();
            backend.set("b", b"1", &[], None).unwrap();
            backend.set("a", b"1", &[], None).unwrap();
            backend.set("old", b"1", &[], None).unwrap();
            backend.store.write().entries.get_mut("old").unwrap().expiry = 1;
            assert_eq!(backend.entry_identifiers().unwrap(), tags(&["a", "b"]));
        }
    }

    mod null_backend_tests {
        use crate::cache::errors::CacheError;
        use crate::cache::structs::backend_options::BackendOptions;
        use crate::cache::structs::null_backend::NullBackend;
        use crate::cache::traits::cache_backend::CacheBackend;

        #[test]
        fn test_everything_misses() {
            let backend = NullBackend::new(&BackendOptions::new()).unwrap();
            backend.set("a", b"1", &["t".to_string()], None).unwrap();
            assert_eq!(backend.get("a").unwrap(), None);
            assert!(!backend.has("a").unwrap());
            assert!(!backend.remove("a").unwrap());
            assert!(backend.find_identifiers_by_tag("t").unwrap().is_empty());
            assert_eq!(backend.flush_by_tag("t").unwrap(), 0);
            backend.flush().unwrap();
            backend.collect_garbage().unwrap();
            assert!(backend.entry_identifiers().unwrap().is_empty());
        }

        #[test]
        fn test_freeze_is_unsupported() {
            let backend = NullBackend::new(&BackendOptions::new()).unwrap();
            assert!(matches!(backend.freeze(), Err(CacheError::Unsupported { .. })));
            assert!(!backend.is_frozen().unwrap());
        }

        #[test]
        fn test_accepts_no_options() {
            let result = NullBackend::new(&BackendOptions::new().with("default_lifetime", 1));
            assert!(matches!(result, Err(CacheError::InvalidBackendOption(_))));
        }
    }

    mod file_backend_tests {
        use std::fs;
        use crate::cache::enums::frontend_kind::FrontendKind;
        use crate::cache::errors::CacheError;
        use crate::cache::structs::backend_options::BackendOptions;
        use crate::cache::structs::cache_context::CacheContext;
        use crate::cache::structs::environment_configuration::EnvironmentConfiguration;
        use crate::cache::structs::file_backend::FileBackend;
        use crate::cache::structs::file_entry::FileEntry;
        use crate::cache::traits::cache_backend::CacheBackend;
        use crate::lock::structs::lock_manager::LockManager;

        fn backend(base: &std::path::Path, options: &BackendOptions) -> FileBackend {
            let environment = EnvironmentConfiguration::new("app", base);
            let locks = LockManager::new(environment.lock_directory());
            let mut backend = FileBackend::new(&environment, options, &locks).unwrap();
            backend.set_cache(&CacheContext { identifier: "Pages".to_string(), frontend: FrontendKind::variable }).unwrap();
            backend
        }

        #[test]
        fn test_storage_root_is_namespaced() {
            let dir = tempfile::tempdir().unwrap();
            let backend = backend(dir.path(), &BackendOptions::new());
            assert_eq!(backend.cache_directory().unwrap(), dir.path().join("app").join("Pages"));
            let path = backend.entry_path("home").unwrap();
            assert!(path.starts_with(dir.path().join("app").join("Pages").join("entries")));
            assert!(path.ends_with("home"));
            // two levels of two hex characters between entries/ and the file
            let relative = path.strip_prefix(backend.cache_directory().unwrap().join("entries")).unwrap();
            assert_eq!(relative.components().count(), 3);
        }

        #[test]
        fn test_cache_directory_option_overrides_root() {
            let dir = tempfile::tempdir().unwrap();
            let custom = dir.path().join("custom");
            let options = BackendOptions::new().with("cache_directory", custom.to_string_lossy().to_string());
            let backend = backend(dir.path(), &options);
            assert_eq!(backend.cache_directory().unwrap(), custom);
            assert!(custom.is_dir());
        }

        #[test]
        fn test_unbound_backend_fails() {
            let dir = tempfile::tempdir().unwrap();
            let environment = EnvironmentConfiguration::new("app", dir.path());
            let locks = LockManager::new(environment.lock_directory());
            let backend = FileBackend::new(&environment, &BackendOptions::new(), &locks).unwrap();
            assert!(matches!(backend.get("a"), Err(CacheError::BackendError(_))));
        }

        #[test]
        fn test_options_are_validated() {
            let dir = tempfile::tempdir().unwrap();
            let environment = EnvironmentConfiguration::new("app", dir.path());
            let locks = LockManager::new(environment.lock_directory());
            let unknown = BackendOptions::new().with("servers", "x");
            assert!(matches!(FileBackend::new(&environment, &unknown, &locks), Err(CacheError::InvalidBackendOption(_))));
            let typed = BackendOptions::new().with("default_lifetime", "never");
            assert!(matches!(FileBackend::new(&environment, &typed, &locks), Err(CacheError::InvalidBackendOption(_))));
            let backend = FileBackend::new(&environment, &BackendOptions::new().with("default_lifetime", 0), &locks).unwrap();
            assert_eq!(backend.default_lifetime(), 0);
        }

        #[test]
        fn test_path_too_long() {
            let dir = tempfile::tempdir().unwrap();
            let environment = EnvironmentConfiguration::with_maximum_path_length("app", dir.path(), dir.path().as_os_str().len() + 120);
            let locks = LockManager::new(environment.lock_directory());
            let mut backend = FileBackend::new(&environment, &BackendOptions::new(), &locks).unwrap();
            backend.set_cache(&CacheContext { identifier: "Pages".to_string(), frontend: FrontendKind::variable }).unwrap();
            let identifier = "x".repeat(60);
            assert!(matches!(backend.set(&identifier, b"1", &[], None), Err(CacheError::PathTooLong { .. })));
            assert!(backend.set("short", b"1", &[], None).is_ok());
        }

        #[test]
        fn test_entry_file_layout() {
            let dir = tempfile::tempdir().unwrap();
            let backend = backend(dir.path(), &BackendOptions::new());
            backend.set("a", b"payload", &["t1".to_string()], None).unwrap();
            let content = fs::read(backend.entry_path("a").unwrap()).unwrap();
            let (data, entry) = FileEntry::decode(&content).unwrap();
            assert_eq!(data, b"payload");
            assert_eq!(entry.tags, vec!["t1".to_string()]);
            assert_eq!(entry.expiry, 0);
            assert!(backend.cache_directory().unwrap().join("tags").join("t1").join("a").is_file());
        }

        #[test]
        fn test_malformed_file_reads_as_miss() {
            let dir = tempfile::tempdir().unwrap();
            let backend = backend(dir.path(), &BackendOptions::new());
            let path = backend.entry_path("broken").unwrap();
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, b"garbage").unwrap();
            assert_eq!(backend.get("broken").unwrap(), None);
            assert!(!backend.has("broken").unwrap());
        }

        #[test]
        fn test_garbage_collection_removes_expired_entries_and_markers() {
            let dir = tempfile::tempdir().unwrap();
            let backend = backend(dir.path(), &BackendOptions::new());
            backend.set("fresh", b"1", &["t".to_string()], None).unwrap();
            backend.set("old", b"1", &["t".to_string()], None).unwrap();
            let old_path = backend.entry_path("old").unwrap();
            fs::write(&old_path, FileEntry::encode(b"1", &["t".to_string()], 1)).unwrap();
            assert!(!backend.has("old").unwrap());

            backend.collect_garbage().unwrap();
            assert!(!old_path.exists());
            let tag_directory = backend.cache_directory().unwrap().join("tags").join("t");
            assert!(!tag_directory.join("old").exists());
            assert!(tag_directory.join("fresh").exists());
            assert!(backend.has("fresh").unwrap());
        }

        #[test]
        fn test_garbage_collection_prunes_stale_markers_and_temp_files() {
            let dir = tempfile::tempdir().unwrap();
            let backend = backend(dir.path(), &BackendOptions::new());
            backend.set("a", b"1", &[], None).unwrap();
            let entry = backend.entry_path("a").unwrap();
            let temp = entry.parent().unwrap().join(".a.0000.tmp");
            fs::write(&temp, b"partial").unwrap();
            let stale_directory = backend.cache_directory().unwrap().join("tags").join("stale");
            fs::create_dir_all(&stale_directory).unwrap();
            fs::write(stale_directory.join("a"), b"").unwrap();

            backend.collect_garbage().unwrap();
            assert!(!temp.exists());
            assert!(!stale_directory.exists());
            assert!(entry.exists());
        }

        #[test]
        fn test_flush_removes_everything() {
            let dir = tempfile::tempdir().unwrap();
            let backend = backend(dir.path(), &BackendOptions::new());
            backend.set("a", b"1", &["t".to_string()], None).unwrap();
            backend.set("b", b"2", &[], Some(100)).unwrap();
            backend.flush().unwrap();
            assert!(!backend.has("a").unwrap());
            assert!(!backend.has("b").unwrap());
            assert!(backend.find_identifiers_by_tag("t").unwrap().is_empty());
            backend.set("c", b"3", &[], None).unwrap();
            assert!(backend.has("c").unwrap());
        }

        #[test]
        fn test_tag_longer_than_a_file_name_is_rejected_before_writing() {
            let dir = tempfile::tempdir().unwrap();
            let backend = backend(dir.path(), &BackendOptions::new());
            let long_tag = "t".repeat(300);
            let result = backend.set("a", b"1", &["short".to_string(), long_tag.clone()], None);
            assert!(matches!(result, Err(CacheError::NameTooLong { .. })));
            assert!(!backend.has("a").unwrap());
            assert!(!backend.entry_path("a").unwrap().exists());
            assert!(!backend.cache_directory().unwrap().join("tags").join("short").join("a").exists());
            assert!(backend.find_identifiers_by_tag(&long_tag).unwrap().is_empty());
        }

        #[test]
        fn test_failed_overwrite_keeps_previous_entry_flushable() {
            let dir = tempfile::tempdir().unwrap();
            let backend = backend(dir.path(), &BackendOptions::new());
            backend.set("a", b"old", &["keep".to_string()], None).unwrap();
            let long_tag = "t".repeat(300);
            assert!(backend.set("a", b"new", &[long_tag], None).is_err());
            assert_eq!(backend.get("a").unwrap(), Some(b"old".to_vec()));
            assert_eq!(backend.flush_by_tag("keep").unwrap(), 1);
            assert!(!backend.has("a").unwrap());
        }

        #[test]
        fn test_identifier_longer_than_a_file_name_is_rejected() {
            let dir = tempfile::tempdir().unwrap();
            let backend = backend(dir.path(), &BackendOptions::new());
            let identifier = "x".repeat(250);
            assert!(matches!(backend.set(&identifier, b"1", &[], None), Err(CacheError::NameTooLong { .. })));
        }

        #[test]
        fn test_overwrite_moves_tag_markers() {
            let dir = tempfile::tempdir().unwrap();
            let backend = backend(dir.path(), &BackendOptions::new());
            backend.set("a", b"1", &["first".to_string(), "both".to_string()], None).unwrap();
            backend.set("a", b"2", &["both".to_string(), "second".to_string()], None).unwrap();
            let tags = backend.cache_directory().unwrap().join("tags");
            assert!(!tags.join("first").join("a").exists());
            assert!(tags.join("both").join("a").is_file());
            assert!(tags.join("second").join("a").is_file());
        }

        #[test]
        fn test_entry_identifiers_lists_live_entries() {
            let dir = tempfile::tempdir().unwrap();
            let backend = backend(dir.path(), &BackendOptions::new());
            backend.set("b", b"1", &[], None).unwrap();
            backend.set("a", b"1", &[], None).unwrap();
            backend.set("old", b"1", &[], None).unwrap();
            fs::write(backend.entry_path("old").unwrap(), FileEntry::encode(b"1", &[], 1)).unwrap();
            assert_eq!(backend.entry_identifiers().unwrap(), vec!["a".to_string(), "b".to_string()]);
        }

        #[test]
        fn test_freeze_pins_entries_and_rejects_writes() {
            let dir = tempfile::tempdir().unwrap();
            let backend = backend(dir.path(), &BackendOptions::new());
            backend.set("a", b"1", &["t".to_string()], Some(100)).unwrap();
            backend.set("old", b"1", &[], None).unwrap();
            fs::write(backend.entry_path("old").unwrap(), FileEntry::encode(b"1", &[], 1)).unwrap();

            assert!(!backend.is_frozen().unwrap());
            backend.freeze().unwrap();
            assert!(backend.is_frozen().unwrap());
            assert!(matches!(backend.freeze(), Err(CacheError::Frozen(_))));

            let content = fs::read(backend.entry_path("a").unwrap()).unwrap();
            let (_, entry) = FileEntry::decode(&content).unwrap();
            assert_eq!(entry.expiry, 0);
            assert!(!backend.entry_path("old").unwrap().exists());
            assert_eq!(backend.get("a").unwrap(), Some(b"1".to_vec()));
            assert!(!backend.has("old").unwrap());
            assert_eq!(backend.entry_identifiers().unwrap(), vec!["a".to_string()]);
            assert!(matches!(backend.set("b", b"2", &[], None), Err(CacheError::Frozen(_))));
            assert!(matches!(backend.remove("a"), Err(CacheError::Frozen(_))));
            assert!(matches!(backend.flush_by_tag("t"), Err(CacheError::Frozen(_))));
            assert_eq!(backend.flush_by_tag("unused").unwrap(), 0);
            backend.collect_garbage().unwrap();
            assert!(backend.has("a").unwrap());

            backend.flush().unwrap();
            assert!(!backend.is_frozen().unwrap());
            assert!(!backend.has("a").unwrap());
            backend.set("b", b"2", &[], None).unwrap();
        }

        #[test]
        fn test_frozen_state_survives_rebinding() {
            let dir = tempfile::tempdir().unwrap();
            backend(dir.path(), &BackendOptions::new()).set("a", b"1", &[], None).unwrap();
            backend(dir.path(), &BackendOptions::new()).freeze().unwrap();
            let reopened = backend(dir.path(), &BackendOptions::new());
            assert!(reopened.is_frozen().unwrap());
            assert!(reopened.has("a").unwrap());
            assert!(!reopened.has("b").unwrap());
        }
    }

    mod memcache_backend_tests {
        use crate::cache::errors::CacheError;
        use crate::cache::impls::memcache_backend::{assemble_payload, memcache_expiration, normalize_server};
        use crate::cache::structs::backend_options::BackendOptions;
        use crate::cache::structs::environment_configuration::EnvironmentConfiguration;
        use crate::cache::structs::memcache_backend::MemcacheBackend;
        use crate::lock::structs::lock_manager::LockManager;

        #[test]
        fn test_normalize_server() {
            assert_eq!(normalize_server("127.0.0.1:11211"), "memcache://127.0.0.1:11211");
            assert_eq!(normalize_server("tcp://host:1"), "memcache://host:1");
            assert_eq!(normalize_server("memcache://host:1"), "memcache://host:1");
        }

        #[test]
        fn test_expiration_translation() {
            assert_eq!(memcache_expiration(None, 3600, 1000), 0);
            assert_eq!(memcache_expiration(Some(0), 3600, 1000), 3600);
            assert_eq!(memcache_expiration(Some(60), 3600, 1000), 60);
            assert_eq!(memcache_expiration(Some(2_592_000), 0, 1000), 2_592_000);
            assert_eq!(memcache_expiration(Some(2_592_001), 0, 1000), 2_593_001);
        }

        #[test]
        fn test_servers_are_required() {
            let environment = EnvironmentConfiguration::new("app", "/tmp/unused");
            let locks = LockManager::new(environment.lock_directory());
            let result = MemcacheBackend::new(&environment, &BackendOptions::new(), &locks);
            assert!(matches!(result, Err(CacheError::InvalidBackendOption(_))));
            let result = MemcacheBackend::new(&environment, &BackendOptions::new().with("hostname", "x"), &locks);
            assert!(matches!(result, Err(CacheError::InvalidBackendOption(_))));
        }

        fn chunk_marker(chunks: usize) -> Vec<u8> {
            let mut marker = vec![1u8];
            marker.extend_from_slice(format!("chunked:{}", chunks).as_bytes());
            marker
        }

        #[test]
        fn test_inline_payload_is_assembled_without_chunks() {
            let payload = assemble_payload(&[0, b'h', b'i'], |_| panic!("inline payloads have no chunks")).unwrap();
            assert_eq!(payload, Some(b"hi".to_vec()));
            assert_eq!(assemble_payload(&[7, b'x'], |_| Ok(None)).unwrap(), None);
        }

        #[test]
        fn test_chunked_payload_is_concatenated_in_order() {
            let payload = assemble_payload(&chunk_marker(3), |number| Ok(Some(vec![b'0' + number as u8]))).unwrap();
            assert_eq!(payload, Some(b"123".to_vec()));
        }

        #[test]
        fn test_evicted_chunk_makes_entry_absent() {
            // `has` and `get` both answer from this result, so neither sees the entry
            let mut requested = Vec::new();
            let payload = assemble_payload(&chunk_marker(3), |number| {
                requested.push(number);
                Ok(if number == 2 { None } else { Some(vec![0u8; 4]) })
            }).unwrap();
            assert_eq!(payload, None);
            assert_eq!(requested, vec![1, 2]);
        }
    }

    mod redis_backend_tests {
        use crate::cache::errors::CacheError;
        use crate::cache::impls::redis_backend::{compress_value, compression_level, decompress_value, redis_url};
        use crate::cache::structs::backend_options::BackendOptions;
        use crate::cache::structs::environment_configuration::EnvironmentConfiguration;
        use crate::cache::structs::redis_backend::RedisBackend;

        #[test]
        fn test_redis_url() {
            assert_eq!(redis_url(&BackendOptions::new()).unwrap(), "redis://127.0.0.1:6379/0");
            let options = BackendOptions::new()
                .with("hostname", "cache")
                .with("port", 6380)
                .with("database", 2)
                .with("password", "secret");
            assert_eq!(redis_url(&options).unwrap(), "redis://:secret@cache:6380/2");
            assert!(redis_url(&BackendOptions::new().with("port", 70000)).is_err());
        }

        #[test]
        fn test_unknown_option_fails_before_connecting() {
            let environment = EnvironmentConfiguration::new("app", "/tmp/unused");
            let result = RedisBackend::new(&environment, &BackendOptions::new().with("servers", "x"));
            assert!(matches!(result, Err(CacheError::InvalidBackendOption(_))));
        }

        #[test]
        fn test_compression_level_option() {
            assert_eq!(compression_level(&BackendOptions::new()).unwrap(), 0);
            assert_eq!(compression_level(&BackendOptions::new().with("compression_level", 3)).unwrap(), 3);
            assert!(matches!(
                compression_level(&BackendOptions::new().with("compression_level", 23)),
                Err(CacheError::InvalidBackendOption(_))
            ));
            let environment = EnvironmentConfiguration::new("app", "/tmp/unused");
            let result = RedisBackend::new(&environment, &BackendOptions::new().with("compression_level", "fast"));
            assert!(matches!(result, Err(CacheError::InvalidBackendOption(_))));
        }

        #[test]
        fn test_compressed_values_shrink_and_restore() {
            let data = "tagged cache ".repeat(200).into_bytes();
            let stored = compress_value(&data, 3).unwrap();
            assert!(stored.len() < data.len());
            assert_eq!(decompress_value(stored, 3).unwrap(), data);
        }

        #[test]
        fn test_uncompressed_and_empty_values_pass_through() {
            assert_eq!(compress_value(b"plain", 0).unwrap(), b"plain".to_vec());
            assert_eq!(decompress_value(b"plain".to_vec(), 0).unwrap(), b"plain".to_vec());
            assert_eq!(decompress_value(Vec::new(), 3).unwrap(), Vec::<u8>::new());
            assert!(matches!(decompress_value(b"not zstd".to_vec(), 3), Err(CacheError::CompressionError(_))));
        }
    }

    mod cache_factory_tests {
        use crate::cache::enums::backend_kind::BackendKind;
        use crate::cache::enums::frontend_kind::FrontendKind;
        use crate::cache::errors::CacheError;
        use crate::cache::structs::backend_options::BackendOptions;
        use crate::cache::structs::cache_factory::CacheFactory;
        use crate::cache::structs::environment_configuration::EnvironmentConfiguration;
        use crate::cache::structs::null_backend::NullBackend;
        use crate::cache::traits::cache_frontend::CacheFrontend;
        use crate::lock::structs::lock_manager::LockManager;

        fn factory(empty: bool) -> CacheFactory {
            let environment = EnvironmentConfiguration::new("app", "/tmp/unused");
            let locks = LockManager::new(environment.lock_directory());
            if empty { CacheFactory::empty(environment, locks) } else { CacheFactory::new(environment, locks) }
        }

        #[test]
        fn test_unregistered_backend_is_invalid() {
            let result = factory(true).create("Pages", FrontendKind::variable, BackendKind::null, &BackendOptions::new());
            assert!(matches!(result, Err(CacheError::InvalidBackend(_))));
        }

        #[test]
        fn test_registered_constructor_is_used() {
            let mut factory = factory(true);
            factory.register(BackendKind::transient_memory, NullBackend::build);
            let cache = factory.create("Pages", FrontendKind::string, BackendKind::transient_memory, &BackendOptions::new()).unwrap();
            assert_eq!(cache.backend_kind(), BackendKind::null);
        }

        #[test]
        fn test_create_memory_cache() {
            let cache = factory(false)
                .create("Pages", FrontendKind::variable, BackendKind::transient_memory, &BackendOptions::new())
                .unwrap();
            let pages = cache.as_variable().unwrap();
            pages.set("a", &vec!["x".to_string()], &[], None).unwrap();
            assert_eq!(pages.get::<Vec<String>>("a").unwrap(), Some(vec!["x".to_string()]));
            assert_eq!(cache.identifier(), "Pages");
        }

        #[test]
        fn test_option_errors_surface() {
            let options = BackendOptions::new().with("unknown", 1);
            let result = factory(false).create("Pages", FrontendKind::variable, BackendKind::transient_memory, &options);
            assert!(matches!(result, Err(CacheError::InvalidBackendOption(_))));
        }
    }
}
