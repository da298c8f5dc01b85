// File: ./src/fonts/search.rs
// Font file discovery across the prioritized font directories.
use directories::{BaseDirs, UserDirs};
use std::path::{Path, PathBuf};
use strum::EnumIter;
use walkdir::WalkDir;

const FONT_EXTENSIONS: [&str; 2] = ["ttf", "ttc"];
const MAX_SCAN_DEPTH: usize = 6;

/// Resolution strategies, tried in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum ResolveStrategy {
    Builtin,
    DirectPath,
    ExactFile,
    CaseInsensitiveFile,
}

/// Ordered list of directories searched for font files; earlier entries win.
#[derive(Debug, Clone, Default)]
pub struct FontSearchPath {
    dirs: Vec<PathBuf>,
}

impl FontSearchPath {
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }

    /// User dirs, system dirs, platform dirs, configured extras, then the bundled directory.
    pub fn standard(extra: &[PathBuf], bundled: Option<&Path>) -> Self {
        let mut dirs = Vec::new();

        if let Some(base) = BaseDirs::new() {
            dirs.push(base.home_dir().join(".fonts"));
        }
        if let Some(user) = UserDirs::new()
            && let Some(font_dir) = user.font_dir()
        {
            dirs.push(font_dir.to_path_buf());
        }

        if cfg!(all(unix, not(target_os = "macos"))) {
            dirs.push(PathBuf::from("/usr/share/fonts"));
            dirs.push(PathBuf::from("/usr/local/share/fonts"));
        }

        if cfg!(target_os = "macos") {
            dirs.push(PathBuf::from("/Library/Fonts"));
            dirs.push(PathBuf::from("/System/Library/Fonts"));
        }
        if cfg!(target_os = "windows") {
            let windir = std::env::var("WINDIR").unwrap_or_else(|_| "C:\\Windows".to_string());
            dirs.push(PathBuf::from(windir).join("Fonts"));
        }

        dirs.extend(extra.iter().cloned());
        if let Some(bundled) = bundled {
            dirs.push(bundled.to_path_buf());
        }

        let mut seen = std::collections::HashSet::new();
        dirs.retain(|d| seen.insert(d.clone()));
        Self { dirs }
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Every font file under the search directories, in priority order.
    /// Missing or unreadable directories are skipped.
    pub fn scan(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();
        for dir in &self.dirs {
            if !dir.is_dir() {
                continue;
            }
            let mut found: Vec<PathBuf> = WalkDir::new(dir)
                .max_depth(MAX_SCAN_DEPTH)
                .follow_links(true)
                .into_iter()
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_type().is_file() && is_font_file(entry.path()))
                .map(|entry| entry.into_path())
                .collect();
            // Deterministic order inside one directory tree.
            found.sort();
            log::debug!("Found {} font files in {}", found.len(), dir.display());
            files.extend(found);
        }
        files
    }
}

pub fn is_font_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| FONT_EXTENSIONS.iter().any(|f| f.eq_ignore_ascii_case(ext)))
}

/// Strips a trailing `.ttf`/`.ttc` from a logical name.
pub fn strip_font_extension(name: &str) -> &str {
    for ext in FONT_EXTENSIONS {
        if let Some((stem, found)) = name.rsplit_once('.')
            && found.eq_ignore_ascii_case(ext)
        {
            return stem;
        }
    }
    name
}

pub fn file_stem(path: &Path) -> Option<&str> {
    path.file_stem().and_then(|s| s.to_str())
}

/// Finds `name` among `files` using one filename strategy.
pub fn match_file<'a>(
    strategy: ResolveStrategy,
    name: &str,
    files: &'a [PathBuf],
) -> Option<&'a PathBuf> {
    let stem = strip_font_extension(name);
    match strategy {
        ResolveStrategy::ExactFile => files.iter().find(|path| {
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                return false;
            };
            file_name == name || file_stem(path) == Some(stem)
        }),
        ResolveStrategy::CaseInsensitiveFile => {
            let wanted = stem.to_lowercase();
            files
                .iter()
                .find(|path| file_stem(path).is_some_and(|s| s.to_lowercase() == wanted))
        }
        ResolveStrategy::Builtin | ResolveStrategy::DirectPath => None,
    }
}

/// Style tokens that may trail a family name (`NotoSans-Regular`, `Lato-Bold`).
/// Longer tokens come first so `ExtraBold` is not cut as `Bold`.
const STYLE_TOKENS: [&str; 10] = [
    "ExtraBold", "SemiBold", "Regular", "Medium", "Normal", "Roman", "Light", "Black", "Book",
    "Bold",
];

/// Family part of a font file stem with any trailing style token removed.
pub fn family_of(stem: &str) -> &str {
    if let Some((family, style)) = stem.rsplit_once('-')
        && STYLE_TOKENS.iter().any(|t| t.eq_ignore_ascii_case(style))
    {
        return family;
    }
    // Without a hyphen the token must start a new CamelCase word (`OpenSansBold`, not `Facebook`).
    for token in STYLE_TOKENS {
        if stem.len() > token.len() {
            let split = stem.len() - token.len();
            if !stem.is_char_boundary(split) || !stem[split..].eq_ignore_ascii_case(token) {
                continue;
            }
            let starts_word = stem[split..].starts_with(|c: char| c.is_ascii_uppercase());
            let after_lower = stem[..split]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_lowercase());
            if starts_word && after_lower {
                return &stem[..split];
            }
        }
    }
    stem
}

/// Candidate stems for the italic sibling of `stem`, most likely first.
pub fn italic_candidates(stem: &str) -> Vec<String> {
    let family = family_of(stem);
    vec![
        format!("{}-Italic", family),
        format!("{}Italic", family),
        format!("{}-Oblique", family),
    ]
}
