use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::io;

/// Reads a text file and returns its whitespace-delimited words.
///
/// - Reads the entire file into memory
/// - Splits on any Unicode whitespace (spaces, tabs, newlines)
pub(crate) fn read_tokens<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(split_tokens(&contents))
}

/// Splits raw text into owned tokens, preserving order and repetitions.
pub(crate) fn split_tokens(text: &str) -> Vec<String> {
	text.split_whitespace().map(str::to_owned).collect()
}

/// Path of a biography corpus deposited by the scraper.
///
/// Example:
/// `bio_files` + `"Simon"` → `bio_files/Simon_Biographies.txt`
pub(crate) fn biography_path<P: AsRef<Path>>(dir: P, name: &str) -> PathBuf {
	dir.as_ref().join(format!("{name}_Biographies.txt"))
}

/// Builds an output path based on an input path and a new extension.
///
/// Example:
/// `data/input.txt` + `"json"` → `data/input.json`
pub fn build_output_path<P: AsRef<Path>>(
	input_path: P,
	output_extension: &str,
) -> io::Result<PathBuf> {
	let input_path = input_path.as_ref();

	let parent = input_path.parent().unwrap_or_else(|| Path::new("."));
	let file_stem = input_path
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Input path has no filename"))?;

	let mut output = PathBuf::from(parent);
	output.push(file_stem);
	output.set_extension(output_extension);

	Ok(output)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn split_tokens_handles_mixed_whitespace() {
		let tokens = split_tokens("  the cat\tsat\n\non  the\r\nmat ");
		assert_eq!(tokens, vec!["the", "cat", "sat", "on", "the", "mat"]);
	}

	#[test]
	fn biography_path_follows_scraper_layout() {
		let path = biography_path("bio_files", "Simon");
		assert_eq!(path, Path::new("bio_files").join("Simon_Biographies.txt"));
	}

	#[test]
	fn build_output_path_swaps_extension() {
		let out = build_output_path("data/input.txt", "json").unwrap();
		assert_eq!(out, Path::new("data").join("input.json"));
	}

	#[test]
	fn build_output_path_rejects_empty() {
		assert!(build_output_path("", "json").is_err());
	}
}
