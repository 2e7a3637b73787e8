use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct RcConfig {
    pub rows: usize,
    pub cols: usize,
    pub tab_width: usize,
    pub word_boundaries: Vec<char>,
    pub max_undo_levels: usize,
}

impl Default for RcConfig {
    fn default() -> Self {
        Self {
            rows: 25,
            cols: 80,
            tab_width: 4,
            word_boundaries: vec![' ', '.', ','],
            max_undo_levels: 1000,
        }
    }
}

pub struct RcLoader;

impl RcLoader {
    /// Get the path to the RC file
    /// Looks for .noterrc in:
    /// 1. Current directory
    /// 2. Home directory (~/.noterrc)
    pub fn get_rc_path() -> Option<PathBuf> {
        let current_rc = Path::new(".noterrc");
        if current_rc.exists() {
            return Some(current_rc.to_path_buf());
        }

        if let Ok(home) = env::var("HOME") {
            let home_rc = Path::new(&home).join(".noterrc");
            if home_rc.exists() {
                return Some(home_rc);
            }
        }

        None
    }

    /// Load and parse the RC file, falling back to defaults
    pub fn load_config() -> RcConfig {
        match Self::get_rc_path() {
            Some(rc_path) => Self::load_config_from(&rc_path),
            None => RcConfig::default(),
        }
    }

    pub fn load_config_from(path: &Path) -> RcConfig {
        let mut config = RcConfig::default();
        match fs::read_to_string(path) {
            Ok(content) => {
                debug!(path = %path.display(), "loading rc file");
                Self::parse_config_content(&content, &mut config);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not read rc file");
            }
        }
        config
    }

    /// Parse the content of an RC file
    pub fn parse_config_content(content: &str, config: &mut RcConfig) {
        for line in content.lines() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') || line.starts_with('"') {
                continue;
            }

            Self::parse_config_line(line, config);
        }
    }

    /// Parse a single configuration line
    fn parse_config_line(line: &str, config: &mut RcConfig) {
        let line = Self::strip_inline_comment(line).trim();
        let setting = line.strip_prefix("set ").map(str::trim).unwrap_or(line);

        let Some((key, value)) = setting.split_once('=') else {
            warn!(setting, "ignoring rc line without a value");
            return;
        };
        let key = key.trim();
        let value = Self::unquote(value.trim());

        match key {
            "rows" | "lines" => {
                if let Some(rows) = Self::parse_bounded(key, value, 1, 1000) {
                    config.rows = rows;
                }
            }
            "cols" | "columns" => {
                if let Some(cols) = Self::parse_bounded(key, value, 1, 1000) {
                    config.cols = cols;
                }
            }
            "tabwidth" | "tab_width" | "tabstop" => {
                if let Some(width) = Self::parse_bounded(key, value, 1, 16) {
                    config.tab_width = width;
                }
            }
            "undolevels" | "max_undo_levels" => {
                if let Some(levels) = Self::parse_bounded(key, value, 1, 1_000_000) {
                    config.max_undo_levels = levels;
                }
            }
            "wordchars" | "word_boundaries" => {
                if value.is_empty() {
                    warn!(key, "ignoring empty boundary set");
                } else {
                    let mut boundaries: Vec<char> = Vec::new();
                    for ch in value.chars() {
                        if !boundaries.contains(&ch) {
                            boundaries.push(ch);
                        }
                    }
                    config.word_boundaries = boundaries;
                }
            }
            _ => warn!(key, "unknown rc setting"),
        }
    }

    // A '#' inside quotes belongs to the value.
    fn strip_inline_comment(line: &str) -> &str {
        let mut quoted = false;
        for (i, ch) in line.char_indices() {
            match ch {
                '"' => quoted = !quoted,
                '#' if !quoted => return &line[..i],
                _ => {}
            }
        }
        line
    }

    fn unquote(value: &str) -> &str {
        value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .unwrap_or(value)
    }

    fn parse_bounded(key: &str, value: &str, min: usize, max: usize) -> Option<usize> {
        match value.parse::<usize>() {
            Ok(n) if (min..=max).contains(&n) => Some(n),
            _ => {
                warn!(key, value, "ignoring out of range rc value");
                None
            }
        }
    }

    /// Generate a sample RC file content
    pub fn generate_sample_rc() -> String {
        r#"# noter configuration file (.noterrc)
# Lines starting with # or " are comments

# Viewport used for paging until the host reports its size
set rows=25
set cols=80

# Spaces inserted by Tab
set tabwidth=4

# Characters that separate words for word-left/word-right
set wordchars=" .,"

# Oldest undo entries are dropped beyond this
set undolevels=1000

# Alternative key=value syntax:
# tab_width=4
# word_boundaries=" .,"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_vim_style_config() {
        let mut config = RcConfig::default();
        let content = r#"
            set rows=40
            set cols=120
            set tabwidth=2
            set wordchars=" .,;"
            set undolevels=50
        "#;

        RcLoader::parse_config_content(content, &mut config);

        assert_eq!(config.rows, 40);
        assert_eq!(config.cols, 120);
        assert_eq!(config.tab_width, 2);
        assert_eq!(config.word_boundaries, vec![' ', '.', ',', ';']);
        assert_eq!(config.max_undo_levels, 50);
    }

    #[test]
    fn test_parse_key_value_config_with_comments() {
        let mut config = RcConfig::default();
        let content = r##"
            # This is a comment
            " This is also a comment
            tab_width=8            # trailing comment
            word_boundaries="#-"   # quoted hash is kept
        "##;

        RcLoader::parse_config_content(content, &mut config);

        assert_eq!(config.tab_width, 8);
        assert_eq!(config.word_boundaries, vec!['#', '-']);
        assert_eq!(config.rows, 25);
    }

    #[test]
    fn test_repeated_boundaries_kept_once_in_order() {
        let mut config = RcConfig::default();
        RcLoader::parse_config_content("set wordchars=\".,.;,\"\n", &mut config);
        assert_eq!(config.word_boundaries, vec!['.', ',', ';']);
    }

    #[test]
    fn test_invalid_values_ignored() {
        let mut config = RcConfig::default();
        let content = r#"
            set tabwidth=0
            set tabwidth=20
            rows=invalid
            wordchars=""
            unknown_setting=value
            set nonsense
        "#;

        RcLoader::parse_config_content(content, &mut config);

        assert_eq!(config, RcConfig::default());
    }

    #[test]
    fn test_sample_rc_parses_to_defaults() {
        let mut config = RcConfig::default();
        RcLoader::parse_config_content(&RcLoader::generate_sample_rc(), &mut config);
        assert_eq!(config, RcConfig::default());
    }

    #[test]
    fn test_load_config_from_file() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), "set rows=10\n").unwrap();
        let config = RcLoader::load_config_from(file.path());
        assert_eq!(config.rows, 10);
    }
}
