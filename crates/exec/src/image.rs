//! Parsing of LS-8 program images.
//!
//! A program image is a text file with one byte per line, written in binary. Anything after a
//! `#` is a comment. Lines that don't hold a byte (blank lines, comment-only lines, garbage) are
//! skipped.
//!
//! ```text
//! # print8.ls8
//! 10000010 # LDI R0,8
//! 00000000
//! 00001000
//! ```

use std::fs;
use std::path::Path;

use anyhow::Context;

/// Parses a program image, returning the bytes to load at address `0`.
pub fn parse(text: &str) -> Vec<u8> {
    text.lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let code = line.split('#').next().unwrap_or_default().trim();
            match u8::from_str_radix(code, 2) {
                Ok(byte) => Some(byte),
                Err(_) => {
                    if !code.is_empty() {
                        log::debug!("skipping line {}: {code:?}", index + 1);
                    }
                    None
                }
            }
        })
        .collect()
}

/// Reads and parses the program image at `path`.
pub fn load(path: &Path) -> anyhow::Result<Vec<u8>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("couldn't find file {}", path.display()))?;
    let image = parse(&text);
    log::info!("loaded {} bytes from {}", image.len(), path.display());
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print8() {
        let text = "\
# print8.ls8

10000010 # LDI R0,8
00000000
00001000
01000111 # PRN R0
00000000
00000001 # HLT
";
        assert_eq!(parse(text), [0b10000010, 0, 8, 0b01000111, 0, 1]);
    }

    #[test]
    fn lenient_about_garbage() {
        let text = "hello\n  101  \n#only a comment\n2\n111111111\n\n11# tight comment\n";
        assert_eq!(parse(text), [0b101, 0b11]);
    }

    #[test]
    fn empty_image() {
        assert!(parse("").is_empty());
        assert!(parse("# nothing here\n\n").is_empty());
    }

    #[test]
    fn missing_file() {
        let err = load(Path::new("/definitely/not/here.ls8")).unwrap_err();
        assert!(err.to_string().contains("couldn't find file"));
    }
}
