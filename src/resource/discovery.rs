//! Platform font discovery: finding font files on disk.
//!
//! Pure discovery: no font loading, rasterizing, or caching.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::FontConfig;

/// Proportional UI fonts to try when the config names none, in priority order.
pub const FONT_PREFERENCES: &[&str] = &[
    "DejaVuSans.ttf",
    "LiberationSans-Regular.ttf",
    "NotoSans-Regular.ttf",
    "Ubuntu-R.ttf",
    "Cantarell-Regular.otf",
    "segoeui.ttf",
    "arial.ttf",
    "Arial.ttf",
    "Helvetica.ttc",
    "DejaVuSansMono.ttf",
];

/// Directories scanned for font files on this platform.
pub fn font_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    #[cfg(target_os = "windows")]
    {
        if let Some(windir) = std::env::var_os("WINDIR") {
            dirs.push(PathBuf::from(windir).join("Fonts"));
        } else {
            dirs.push(PathBuf::from(r"C:\Windows\Fonts"));
        }
        if let Some(local) = std::env::var_os("LOCALAPPDATA") {
            dirs.push(PathBuf::from(local).join(r"Microsoft\Windows\Fonts"));
        }
    }
    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            dirs.push(PathBuf::from(home).join("Library/Fonts"));
        }
        dirs.push(PathBuf::from("/Library/Fonts"));
        dirs.push(PathBuf::from("/System/Library/Fonts"));
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home = PathBuf::from(home);
            dirs.push(home.join(".local/share/fonts"));
            dirs.push(home.join(".fonts"));
        }
        dirs.push(PathBuf::from("/usr/share/fonts"));
        dirs.push(PathBuf::from("/usr/local/share/fonts"));
    }
    dirs
}

/// Build a filename → full path index by scanning all font directories once.
pub fn build_font_index() -> HashMap<String, PathBuf> {
    let mut index = HashMap::new();
    for dir in font_dirs() {
        index_font_dir(&dir, &mut index);
    }
    log::debug!("font: indexed {} font files", index.len());
    index
}

fn index_font_dir(dir: &Path, index: &mut HashMap<String, PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(_) => return,
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            index_font_dir(&path, index);
        } else if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if is_font_file(name) {
                index.entry(name.to_owned()).or_insert(path);
            }
        } else {
            // Non-UTF-8 filename, skip.
        }
    }
}

fn is_font_file(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| matches!(e.to_ascii_lowercase().as_str(), "ttf" | "otf" | "ttc"))
}

/// Pick the font file for `config`.
///
/// An explicit `path` wins without checking that it exists (the loader
/// reports that). Otherwise `family` is looked up in `index`, then the
/// built-in preference list.
pub fn resolve_font(config: &FontConfig, index: &HashMap<String, PathBuf>) -> Option<PathBuf> {
    if let Some(path) = &config.path {
        return Some(path.clone());
    }

    if let Some(name) = &config.family {
        if let Some(path) = index.get(name) {
            return Some(path.clone());
        }
        log::warn!("font: family {name:?} not found, using platform default");
    }

    FONT_PREFERENCES
        .iter()
        .find_map(|name| index.get(*name).cloned())
}
