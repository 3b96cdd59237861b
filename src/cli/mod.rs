//! Command-line surface: clap argument parsing and the env-file pre-scan.

mod clap_parser;

pub use clap_parser::{Cli, FormatOpt, GenderOpt};

use std::path::PathBuf;

/// Find `--env-file PATH` (or `--env-file=PATH`) before clap runs, so the file
/// can feed the `env = ...` defaults of the other arguments.
pub fn env_file_from_args(args: &[String]) -> Option<PathBuf> {
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--" {
            break;
        }
        if arg == "--env-file" {
            return iter.next().map(PathBuf::from);
        }
        if let Some(path) = arg.strip_prefix("--env-file=") {
            return Some(PathBuf::from(path));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn finds_separate_and_inline_forms() {
        assert_eq!(
            env_file_from_args(&args(&["bin", "Priya", "--env-file", "conf/a.env"])),
            Some(PathBuf::from("conf/a.env"))
        );
        assert_eq!(
            env_file_from_args(&args(&["bin", "--env-file=b.env", "Priya"])),
            Some(PathBuf::from("b.env"))
        );
    }

    #[test]
    fn absent_or_after_separator() {
        assert_eq!(env_file_from_args(&args(&["bin", "Priya"])), None);
        assert_eq!(
            env_file_from_args(&args(&["bin", "--", "--env-file", "x"])),
            None
        );
        assert_eq!(env_file_from_args(&args(&["bin", "--env-file"])), None);
    }
}
