//! Interactive prompts using dialoguer.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::io;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use colored::Colorize;
use dialoguer::{Completion, Input};

/// Tab completion over filesystem paths.
#[derive(Debug, Default)]
pub struct PathCompletion;

impl Completion for PathCompletion {
    fn get(&self, input: &str) -> Option<String> {
        complete_path(input)
    }
}

/// Expand a leading `~` to the user's home directory.
#[must_use]
pub fn expand_tilde(input: &str) -> PathBuf {
    if input == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = input.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }

    PathBuf::from(input)
}

/// Complete `input` against the filesystem.
///
/// A directory gets a trailing separator. With several candidates the
/// longest common prefix is returned when it extends the input, otherwise
/// the first candidate in sorted order.
#[must_use]
pub fn complete_path(input: &str) -> Option<String> {
    let mut text = expand_tilde(input).to_string_lossy().into_owned();
    if !text.is_empty() && !text.ends_with(MAIN_SEPARATOR) && Path::new(&text).is_dir() {
        text.push(MAIN_SEPARATOR);
    }

    let pattern = format!("{}*", glob::Pattern::escape(&text));
    let mut candidates: Vec<String> = glob::glob(&pattern)
        .ok()?
        .filter_map(Result::ok)
        .map(|path| {
            let mut candidate = path.to_string_lossy().into_owned();
            if path.is_dir() {
                candidate.push(MAIN_SEPARATOR);
            }
            candidate
        })
        .collect();
    candidates.sort();

    match candidates.as_slice() {
        [] => (text != input).then_some(text),
        [only] => Some(only.clone()),
        [first, rest @ ..] => {
            let prefix = rest.iter().fold(first.as_str(), |prefix, candidate| {
                common_prefix(prefix, candidate)
            });
            if prefix.len() > text.len() {
                Some(prefix.to_string())
            } else {
                Some(first.clone())
            }
        }
    }
}

fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let end = a
        .char_indices()
        .zip(b.chars())
        .find(|((_, x), y)| x != y)
        .map_or_else(|| a.len().min(b.len()), |((i, _), _)| i);
    &a[..end]
}

/// Prompt for the destination folder until an existing directory is given.
///
/// # Errors
///
/// * If the user cancels the input or the terminal is unavailable
pub fn prompt_destination() -> io::Result<PathBuf> {
    let completion = PathCompletion;

    let destination: String = Input::new()
        .with_prompt(format!("{} ENTER DESTINATION FOLDER", "[INPUT]".green().bold()))
        .completion_with(&completion)
        .validate_with(|input: &String| -> Result<(), String> {
            if expand_tilde(input.trim()).is_dir() {
                Ok(())
            } else {
                Err(format!("INVALID INPUT: {input}"))
            }
        })
        .interact_text()?;

    Ok(expand_tilde(destination.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn display(path: &Path) -> String {
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_expand_tilde_passthrough() {
        assert_eq!(expand_tilde("/tmp/x"), PathBuf::from("/tmp/x"));
        assert_eq!(expand_tilde("rel/~x"), PathBuf::from("rel/~x"));
    }

    #[test]
    fn test_expand_tilde_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~"), home);
            assert_eq!(expand_tilde("~/docs"), home.join("docs"));
        }
    }

    #[test]
    fn test_complete_unique_directory() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("photos")).unwrap();

        let input = display(&dir.path().join("pho"));
        let expected = format!("{}{MAIN_SEPARATOR}", display(&dir.path().join("photos")));

        assert_eq!(complete_path(&input), Some(expected));
    }

    #[test]
    fn test_complete_common_prefix() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("report-2023.txt"), "").unwrap();
        fs::write(dir.path().join("report-2024.txt"), "").unwrap();

        let input = display(&dir.path().join("rep"));

        assert_eq!(
            complete_path(&input),
            Some(display(&dir.path().join("report-202")))
        );
    }

    #[test]
    fn test_complete_inside_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("only.txt"), "").unwrap();

        let input = display(dir.path());

        assert_eq!(
            complete_path(&input),
            Some(display(&dir.path().join("only.txt")))
        );
    }

    #[test]
    fn test_complete_no_match() {
        let dir = TempDir::new().unwrap();
        let input = display(&dir.path().join("nothing-here"));

        assert_eq!(complete_path(&input), None);
    }

    #[test]
    fn test_common_prefix() {
        assert_eq!(common_prefix("abcd", "abxy"), "ab");
        assert_eq!(common_prefix("abc", "abcdef"), "abc");
        assert_eq!(common_prefix("x", "y"), "");
    }
}
