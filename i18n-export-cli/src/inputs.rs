use std::collections::HashSet;
use std::path::PathBuf;

fn has_glob_meta(s: &str) -> bool {
    s.bytes().any(|b| matches!(b, b'*' | b'?' | b'['))
}

/// Expand glob patterns in the file arguments into concrete paths.
///
/// Arguments keep their command-line order; the matches of one pattern are
/// sorted. Literal paths pass through exactly as given, repeats included, so
/// a missing file surfaces when it is read. Glob matches skip paths that an
/// earlier argument already produced.
pub fn expand_inputs(inputs: &[String]) -> Result<Vec<PathBuf>, String> {
    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut results: Vec<PathBuf> = Vec::with_capacity(inputs.len());

    for input in inputs {
        if !has_glob_meta(input) {
            let path = PathBuf::from(input);
            seen.insert(path.clone());
            results.push(path);
            continue;
        }

        let paths = glob::glob(input)
            .map_err(|e| format!("Invalid glob pattern '{}': {}", input, e))?;

        let mut matched = 0usize;
        for entry in paths {
            let path = entry.map_err(|e| format!("Cannot read {}: {}", e.path().display(), e))?;
            if !path.is_file() {
                continue;
            }
            matched += 1;
            if seen.insert(path.clone()) {
                results.push(path);
            }
        }

        if matched == 0 {
            return Err(format!("No files matched pattern '{}'", input));
        }
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_literal_paths_pass_through() {
        let inputs = vec!["b.json".to_string(), "a.json".to_string()];
        let expanded = expand_inputs(&inputs).unwrap();
        assert_eq!(expanded, vec![PathBuf::from("b.json"), PathBuf::from("a.json")]);
    }

    #[test]
    fn test_repeated_literal_paths_are_kept() {
        let inputs = vec![
            "en.json".to_string(),
            "fr.json".to_string(),
            "en.json".to_string(),
        ];
        let expanded = expand_inputs(&inputs).unwrap();
        assert_eq!(
            expanded,
            vec![
                PathBuf::from("en.json"),
                PathBuf::from("fr.json"),
                PathBuf::from("en.json"),
            ]
        );
    }

    #[test]
    fn test_glob_matches_sorted_and_deduplicated() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["fr.json", "en.json", "notes.txt"] {
            fs::write(temp_dir.path().join(name), "{}").unwrap();
        }
        fs::create_dir(temp_dir.path().join("dir.json")).unwrap();

        let pattern = format!("{}/*.json", temp_dir.path().display());
        let literal = temp_dir.path().join("fr.json").display().to_string();
        let expanded = expand_inputs(&[literal, pattern]).unwrap();

        assert_eq!(
            expanded,
            vec![
                temp_dir.path().join("fr.json"),
                temp_dir.path().join("en.json"),
            ]
        );
    }

    #[test]
    fn test_glob_without_matches_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let pattern = format!("{}/*.json", temp_dir.path().display());
        let err = expand_inputs(&[pattern]).unwrap_err();
        assert!(err.contains("No files matched pattern"));
    }

    #[test]
    fn test_invalid_glob_is_error() {
        let err = expand_inputs(&["[".to_string()]).unwrap_err();
        assert!(err.contains("Invalid glob pattern"));
    }
}
