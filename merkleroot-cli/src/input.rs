use std::{
    fs,
    io::{self, Read},
    path::Path,
};

use anyhow::Context;

/// The four transaction ids of the documented walkthrough.
pub const REFERENCE_LEAVES: [&str; 4] = [
    "75dd9121f42c14e4ce80e6bcb595519b493e370eafc1c7f2ab7337e483d153ea",
    "53d3260bab208080c43de4b5b12f0a4bfe9f72ce5425fac985ae154659bb8bd9",
    "90ffb5696bcaab70eee7fc53f3e8ed23972adfadaad1b291c1bbf78bd253798c",
    "ba6673df7938b93da81579eb6e0412a9120b64fe6861421d4775a22be7eb9f08",
];

/// Read one hex leaf per line from `path`, or from stdin when `path` is `-`.
pub fn read_leaf_file(path: &Path) -> anyhow::Result<Vec<String>> {
    let text = if path == Path::new("-") {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("reading leaves from stdin")?;
        text
    } else {
        fs::read_to_string(path).with_context(|| format!("reading leaves from {}", path.display()))?
    };
    Ok(parse_leaf_lines(&text))
}

/// Blank lines and `#` comments are skipped; everything else is a leaf,
/// cleaned with [`normalize_leaf`] and validated later by the tree builder.
pub fn parse_leaf_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.split('#').next().unwrap_or_default())
        .map(normalize_leaf)
        .filter(|leaf| !leaf.is_empty())
        .collect()
}

/// Trim surrounding whitespace and one `0x`/`0X` prefix, the way
/// transaction ids are usually pasted. The library itself only takes bare
/// hex digits.
pub fn normalize_leaf(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed)
        .to_string()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_parse_leaf_lines() {
        let text = "# block 100\n\n  aa00  \nbb11 # coinbase\n   \n#cc22\n";
        assert_eq!(parse_leaf_lines(text), ["aa00", "bb11"]);
    }

    #[test]
    fn test_normalize_leaf() {
        let leaf = REFERENCE_LEAVES[0];
        assert_eq!(normalize_leaf(&format!("  0x{leaf}\n")), leaf);
        assert_eq!(normalize_leaf(&format!("0X{leaf}")), leaf);
        assert_eq!(normalize_leaf(&format!("\t{leaf}")), leaf);
        assert_eq!(parse_leaf_lines(&format!("0x{leaf} # first\n")), [leaf]);
    }

    #[test]
    fn test_read_leaf_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        for leaf in REFERENCE_LEAVES {
            writeln!(file, "{leaf}").expect("write leaf");
        }
        let leaves = read_leaf_file(file.path()).expect("read");
        assert_eq!(leaves, REFERENCE_LEAVES);
    }

    #[test]
    fn test_missing_file_names_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nope.txt");
        let err = read_leaf_file(&path).expect_err("missing");
        assert!(err.to_string().contains("nope.txt"));
    }
}
