use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Parse `KEY=value` lines. Blank lines and `#` comments are skipped, one layer
/// of matching quotes is removed from values.
pub fn parse_env_content(content: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for (idx, line) in content.lines().enumerate() {
        let s = line.trim();
        if s.is_empty() || s.starts_with('#') {
            continue;
        }
        let Some((key, val)) = s.split_once('=') else {
            log::warn!("Ignoring env line {} without '=': {}", idx + 1, line);
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            log::warn!("Ignoring env line {} with empty key", idx + 1);
            continue;
        }
        let mut val = val.trim();
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = &val[1..val.len() - 1];
        }
        map.insert(key.to_string(), val.to_string());
    }
    map
}

fn apply_non_destructive(map: &HashMap<String, String>) {
    for (k, v) in map {
        if std::env::var_os(k).is_none() {
            unsafe {
                std::env::set_var(k, v);
            }
        }
    }
}

/// Load a specific env file into the process environment and return the parsed
/// map. Variables already set are NOT overridden. A missing file yields an
/// empty map.
pub fn load_env_file_from(path: &Path) -> Result<HashMap<String, String>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read env file {}", path.display()))?;
    let map = parse_env_content(&content);
    apply_non_destructive(&map);
    log::debug!("Loaded {} entries from {}", map.len(), path.display());
    Ok(map)
}

/// Load `.env` from the current working directory, if present.
pub fn load_dotenv_if_present() -> Result<()> {
    load_env_file_from(Path::new(".env")).map(|_| ())
}

/// Write a commented `.env` template listing every setting the binary reads.
pub fn write_env_template(path: &Path) -> Result<()> {
    let mut f = fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let template = r#"# name_resolver environment configuration template
# Copy this file to .env and adjust. Command-line flags take precedence, and
# variables already present in the environment are never overridden.

# Reference datasets (CSV with header row, UTF-8, BOM allowed). At least one.
NAME_RESOLVER_MALE_CSV=malesf.csv
NAME_RESOLVER_FEMALE_CSV=fdata.csv

# Search tuning (optional)
#NAME_RESOLVER_MIN_SCORE=60
#NAME_RESOLVER_TOP_N=3
#NAME_RESOLVER_MERGED_LIMIT=5
#NAME_RESOLVER_FALLBACK=false
#NAME_RESOLVER_PHONETIC_LEN=6
#NAME_RESOLVER_GENDER=unknown

# Dataset column names (optional)
#NAME_RESOLVER_COL_ID=person_id
#NAME_RESOLVER_COL_NAME=name_english
#NAME_RESOLVER_COL_NATIVE=name_hindi
#NAME_RESOLVER_COL_ALIASES=aliases
#NAME_RESOLVER_COL_GENDER=gender

# Output (optional)
#NAME_RESOLVER_FORMAT=table
#NAME_RESOLVER_OUT=results.csv

# Logging
#RUST_LOG=info
"#;
    f.write_all(template.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_quotes_comments_and_bad_lines() {
        let map = parse_env_content(
            "# comment\n\nA=1\n B = \"two words\" \nC='x'\nnot a pair\n=orphan\nD=\"\nE=a=b\n",
        );
        assert_eq!(map.get("A").map(String::as_str), Some("1"));
        assert_eq!(map.get("B").map(String::as_str), Some("two words"));
        assert_eq!(map.get("C").map(String::as_str), Some("x"));
        assert_eq!(map.get("D").map(String::as_str), Some("\""));
        assert_eq!(map.get("E").map(String::as_str), Some("a=b"));
        assert_eq!(map.len(), 5);
    }

    #[test]
    fn load_does_not_override_existing_vars() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("name_resolver_env_{}.env", std::process::id()));
        fs::write(
            &path,
            "NAME_RESOLVER_TEST_NEW=from_file\nNAME_RESOLVER_TEST_KEEP=from_file\n",
        )
        .unwrap();
        unsafe {
            std::env::set_var("NAME_RESOLVER_TEST_KEEP", "preset");
        }
        let map = load_env_file_from(&path).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(std::env::var("NAME_RESOLVER_TEST_NEW").unwrap(), "from_file");
        assert_eq!(std::env::var("NAME_RESOLVER_TEST_KEEP").unwrap(), "preset");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn missing_file_is_empty() {
        let path = std::env::temp_dir().join("name_resolver_definitely_missing.env");
        assert!(load_env_file_from(&path).unwrap().is_empty());
    }

    #[test]
    fn template_round_trips_through_parser() {
        let path = std::env::temp_dir().join(format!(
            "name_resolver_template_{}.env",
            std::process::id()
        ));
        write_env_template(&path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        let map = parse_env_content(&content);
        assert_eq!(
            map.get("NAME_RESOLVER_MALE_CSV").map(String::as_str),
            Some("malesf.csv")
        );
        assert!(!map.contains_key("NAME_RESOLVER_TOP_N"));
        let _ = fs::remove_file(&path);
    }
}
