use i18n_export::output::{FileMetadata, content_digest, resolve_output_path};
use i18n_export::{ExportEntry, plan};
use proptest::prelude::*;
use std::path::{Path, PathBuf};

fn file_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z]{1,8}(/[a-z]{1,8}){0,2}\\.(json|yml)")
        .expect("valid file regex")
}

fn entry_strategy() -> impl Strategy<Value = ExportEntry> {
    (
        proptest::string::string_regex("[a-z]{1,8}\\.tera").expect("valid template regex"),
        proptest::string::string_regex("[a-z%{}_/\\.]{0,24}").expect("valid output regex"),
    )
        .prop_map(|(template, output)| ExportEntry {
            template: PathBuf::from(template),
            output,
        })
}

proptest! {
    #[test]
    fn prop_plan_is_full_cross_product(
        files in prop::collection::vec(file_strategy(), 0..6),
        entries in prop::collection::vec(entry_strategy(), 0..6),
    ) {
        let tasks = plan(&files, &entries);
        prop_assert_eq!(tasks.len(), files.len() * entries.len());

        for (index, task) in tasks.iter().enumerate() {
            prop_assert_eq!(task.file, Path::new(&files[index / entries.len()]));
            prop_assert_eq!(task.entry, &entries[index % entries.len()]);
        }
    }

    #[test]
    fn prop_literal_patterns_resolve_to_themselves(
        file in file_strategy(),
        pattern in proptest::string::string_regex("[A-Za-z0-9_/\\.\\-]{1,40}").expect("valid pattern regex"),
    ) {
        let metadata = FileMetadata::from_path(Path::new(&file));
        let resolved = resolve_output_path(&pattern, &metadata, "digest").unwrap();
        prop_assert_eq!(resolved, PathBuf::from(&pattern));
    }

    #[test]
    fn prop_name_is_base_name_plus_extension(file in file_strategy()) {
        let metadata = FileMetadata::from_path(Path::new(&file));
        prop_assert_eq!(
            format!("{}{}", metadata.base_name, metadata.extension),
            metadata.name.clone()
        );
        let joined = resolve_output_path("%{dir}/%{name}", &metadata, "d").unwrap();
        let expected = if file.contains('/') { file.clone() } else { format!("./{}", file) };
        prop_assert_eq!(joined, PathBuf::from(expected));
    }

    #[test]
    fn prop_digest_is_stable_hex(contents in ".{0,200}") {
        let digest = content_digest(&contents);
        prop_assert_eq!(digest.len(), 32);
        prop_assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        prop_assert_eq!(digest, content_digest(&contents));
    }
}
