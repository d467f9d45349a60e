//! Extension → color palette
//!
//! An enumerated mapping with an explicit default arm, so "unknown
//! extension" is a visible branch rather than a silent fallback.

/// Fill color for directory nodes
pub const DIRECTORY_COLOR: &str = "#79b8ff";

/// Fill color for files whose extension has no palette entry
pub const DEFAULT_FILE_COLOR: &str = "#8b949e";

/// Accent stroke used for hover-highlighted nodes
pub const ACCENT_COLOR: &str = "#f78166";

/// Look up the fill color for a file extension (lowercase, without the dot).
/// Unknown extensions, including the empty string, get the default color.
pub fn file_color(extension: &str) -> &'static str {
    match extension {
        "rs" => "#dea584",
        "ts" | "tsx" => "#3178c6",
        "js" | "jsx" | "mjs" | "cjs" => "#f1e05a",
        "py" => "#3572a5",
        "go" => "#00add8",
        "java" => "#b07219",
        "kt" | "kts" => "#a97bff",
        "rb" => "#701516",
        "c" | "h" => "#555555",
        "cpp" | "cc" | "cxx" | "hpp" => "#f34b7d",
        "cs" => "#178600",
        "php" => "#4f5d95",
        "swift" => "#f05138",
        "html" | "htm" => "#e34c26",
        "css" => "#563d7c",
        "scss" | "sass" | "less" => "#c6538c",
        "vue" => "#41b883",
        "svelte" => "#ff3e00",
        "sh" | "bash" | "zsh" => "#89e051",
        "md" | "markdown" | "rst" => "#083fa1",
        "json" => "#cbcb41",
        "yaml" | "yml" => "#cb171e",
        "toml" => "#9c4221",
        "xml" => "#0060ac",
        "sql" => "#e38c00",
        "lock" => "#6e7681",
        "svg" => "#ff9900",
        "png" | "jpg" | "jpeg" | "gif" | "ico" | "webp" => "#a074c4",
        _ => DEFAULT_FILE_COLOR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions_resolve() {
        assert_eq!(file_color("rs"), "#dea584");
        assert_eq!(file_color("ts"), "#3178c6");
        assert_eq!(file_color("yml"), file_color("yaml"));
    }

    #[test]
    fn unknown_and_empty_extensions_fall_back() {
        assert_eq!(file_color("xyz"), DEFAULT_FILE_COLOR);
        assert_eq!(file_color(""), DEFAULT_FILE_COLOR);
    }
}
