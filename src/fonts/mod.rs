// File: ./src/fonts/mod.rs
/*! Font resolution for one render run.

A [`FontRegistry`] owns every font decision of a single `render_calendar`
call: logical name → [`ResolvedFont`] (cached), resolved font → loaded bytes
(read once per distinct path), italic derivation and the Unicode fallback
face. Nothing here is global; two registries never share state.
*/

pub mod builtin;
pub mod search;

pub use builtin::BuiltinFace;
pub use search::{FontSearchPath, ResolveStrategy};

use crate::error::{CalendarError, CalendarResult};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use strum::IntoEnumIterator;

const PT_TO_MM: f32 = 25.4 / 72.0;

/// Faces tried, in order, when the selected fonts cannot draw a string (Cyrillic, Greek, ...).
pub const DEFAULT_FALLBACK_FONTS: [&str; 4] = [
    "NotoSans-Regular",
    "DejaVuSans",
    "LiberationSans-Regular",
    "FreeSans",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Builtin,
    FileSystem,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FontSource {
    Builtin(BuiltinFace),
    File { path: PathBuf, index: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFont {
    pub logical_name: String,
    pub source: FontSource,
}

impl ResolvedFont {
    pub fn source_kind(&self) -> SourceKind {
        match self.source {
            FontSource::Builtin(_) => SourceKind::Builtin,
            FontSource::File { .. } => SourceKind::FileSystem,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            FontSource::Builtin(_) => None,
            FontSource::File { path, .. } => Some(path),
        }
    }
}

impl fmt::Display for ResolvedFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            FontSource::Builtin(face) => write!(f, "{} (builtin {})", self.logical_name, face),
            FontSource::File { path, .. } => {
                write!(f, "{} ({})", self.logical_name, path.display())
            }
        }
    }
}

/// A resolved font plus its file bytes, ready for metrics and backend registration.
#[derive(Debug, Clone)]
pub struct LoadedFont {
    pub resolved: ResolvedFont,
    data: Option<Arc<Vec<u8>>>,
}

impl LoadedFont {
    fn builtin(resolved: ResolvedFont) -> Self {
        Self {
            resolved,
            data: None,
        }
    }

    pub fn key(&self) -> &FontSource {
        &self.resolved.source
    }

    pub fn bytes(&self) -> Option<&[u8]> {
        self.data.as_deref().map(Vec::as_slice)
    }

    fn with_face<T>(&self, f: impl FnOnce(&ttf_parser::Face<'_>) -> T) -> Option<T> {
        let FontSource::File { index, .. } = self.resolved.source else {
            return None;
        };
        let data = self.data.as_deref()?;
        ttf_parser::Face::parse(data, index).ok().map(|face| f(&face))
    }

    /// Whether every character of `text` has a glyph in this face.
    pub fn covers(&self, text: &str) -> bool {
        match &self.resolved.source {
            FontSource::Builtin(face) => text.chars().all(|c| face.covers(c)),
            FontSource::File { .. } => self
                .with_face(|face| {
                    text.chars()
                        .all(|c| c.is_whitespace() || face.glyph_index(c).is_some())
                })
                .unwrap_or(false),
        }
    }

    /// Horizontal extent of `text` set at `size_pt`, in millimeters.
    pub fn text_width_mm(&self, text: &str, size_pt: f32) -> f32 {
        let em = match &self.resolved.source {
            FontSource::Builtin(face) => text.chars().count() as f32 * face.average_advance(),
            FontSource::File { .. } => self
                .with_face(|face| {
                    let upem = f32::from(face.units_per_em().max(1));
                    text.chars()
                        .map(|c| {
                            face.glyph_index(c)
                                .and_then(|g| face.glyph_hor_advance(g))
                                .map_or(0.5, |adv| f32::from(adv) / upem)
                        })
                        .sum::<f32>()
                })
                .unwrap_or(text.chars().count() as f32 * 0.5),
        };
        em * size_pt * PT_TO_MM
    }
}

/// The logical fonts requested for one calendar.
#[derive(Debug, Clone)]
pub struct FontSelection {
    pub regular: String,
    pub bold: String,
    /// Defaults to `bold` when unset.
    pub title: Option<String>,
    pub fallback: Vec<String>,
}

impl Default for FontSelection {
    fn default() -> Self {
        Self {
            regular: "Helvetica".to_string(),
            bold: "Helvetica-Bold".to_string(),
            title: None,
            fallback: DEFAULT_FALLBACK_FONTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl FontSelection {
    pub fn title_name(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.bold)
    }
}

#[derive(Debug, Clone)]
pub struct FontSet {
    pub regular: LoadedFont,
    pub bold: LoadedFont,
    pub title: LoadedFont,
    pub italic: LoadedFont,
    pub fallback: Option<LoadedFont>,
    /// Faces already reported as unable to draw some text.
    uncovered_logged: RefCell<HashSet<FontSource>>,
}

impl FontSet {
    /// `primary` when it can draw `text`, otherwise the fallback face if that one can.
    pub fn face_for<'a>(&'a self, primary: &'a LoadedFont, text: &str) -> &'a LoadedFont {
        if primary.covers(text) {
            return primary;
        }
        match &self.fallback {
            Some(fallback) if fallback.covers(text) => fallback,
            _ => {
                if self
                    .uncovered_logged
                    .borrow_mut()
                    .insert(primary.key().clone())
                {
                    log::warn!(
                        "No available font covers '{}'; drawing with {} (further misses not reported)",
                        text,
                        primary.resolved
                    );
                }
                primary
            }
        }
    }

    /// Whether drawing `text` with `primary` would switch to the fallback face.
    pub fn uses_fallback(&self, primary: &LoadedFont, text: &str) -> bool {
        self.fallback.is_some() && self.face_for(primary, text).key() != primary.key()
    }

    /// Each distinct primary face once, in a stable order. The fallback face is not included.
    pub fn distinct(&self) -> Vec<&LoadedFont> {
        let mut out: Vec<&LoadedFont> = Vec::new();
        let all = [&self.regular, &self.bold, &self.title, &self.italic];
        for font in all {
            if !out.iter().any(|f| f.key() == font.key()) {
                out.push(font);
            }
        }
        out
    }
}

/// Per-run font resolver and loader.
#[derive(Debug)]
pub struct FontRegistry {
    search: FontSearchPath,
    index: Option<Vec<PathBuf>>,
    resolved: HashMap<String, ResolvedFont>,
    loaded: HashMap<FontSource, LoadedFont>,
}

impl FontRegistry {
    pub fn new(search: FontSearchPath) -> Self {
        Self {
            search,
            index: None,
            resolved: HashMap::new(),
            loaded: HashMap::new(),
        }
    }

    pub fn search_path(&self) -> &FontSearchPath {
        &self.search
    }

    /// Whether the font directories have been scanned during this run.
    pub fn has_scanned(&self) -> bool {
        self.index.is_some()
    }

    fn font_files(&mut self) -> &[PathBuf] {
        let search = &self.search;
        self.index.get_or_insert_with(|| search.scan())
    }

    fn try_strategy(&mut self, strategy: ResolveStrategy, name: &str) -> Option<FontSource> {
        match strategy {
            ResolveStrategy::Builtin => BuiltinFace::from_name(name).map(FontSource::Builtin),
            ResolveStrategy::DirectPath => {
                let path = Path::new(name);
                let looks_like_path = path.is_absolute() || path.components().count() > 1;
                (looks_like_path && path.is_file() && search::is_font_file(path)).then(|| {
                    FontSource::File {
                        path: path.to_path_buf(),
                        index: 0,
                    }
                })
            }
            ResolveStrategy::ExactFile | ResolveStrategy::CaseInsensitiveFile => {
                search::match_file(strategy, name, self.font_files()).map(|path| {
                    FontSource::File {
                        path: path.clone(),
                        index: 0,
                    }
                })
            }
        }
    }

    /// Resolves a logical font name. The result is cached for the rest of the run.
    pub fn resolve(&mut self, logical_name: &str) -> CalendarResult<ResolvedFont> {
        if let Some(hit) = self.resolved.get(logical_name) {
            return Ok(hit.clone());
        }

        for strategy in ResolveStrategy::iter() {
            if let Some(source) = self.try_strategy(strategy, logical_name) {
                let resolved = ResolvedFont {
                    logical_name: logical_name.to_string(),
                    source,
                };
                log::debug!("Resolved font {} via {:?}", resolved, strategy);
                self.resolved
                    .insert(logical_name.to_string(), resolved.clone());
                return Ok(resolved);
            }
        }

        Err(CalendarError::FontNotFound {
            name: logical_name.to_string(),
            searched: self.search.dirs().len(),
        })
    }

    /// Finds the italic sibling of `base`. Falls back to `base` itself when none exists.
    pub fn resolve_italic(&mut self, base: &ResolvedFont) -> ResolvedFont {
        let path = match &base.source {
            FontSource::Builtin(face) => {
                let italic = face.italic();
                return ResolvedFont {
                    logical_name: italic.to_string(),
                    source: FontSource::Builtin(italic),
                };
            }
            FontSource::File { path, .. } => path.clone(),
        };

        let Some(stem) = search::file_stem(&path) else {
            return base.clone();
        };
        let candidates = search::italic_candidates(stem);

        // Siblings in the same directory take precedence over the search path.
        if let Some(dir) = path.parent()
            && let Ok(entries) = fs::read_dir(dir)
        {
            let siblings: Vec<PathBuf> = entries
                .filter_map(|e| e.ok().map(|e| e.path()))
                .filter(|p| search::is_font_file(p))
                .collect();
            for candidate in &candidates {
                if let Some(found) =
                    search::match_file(ResolveStrategy::CaseInsensitiveFile, candidate, &siblings)
                {
                    return ResolvedFont {
                        logical_name: candidate.clone(),
                        source: FontSource::File {
                            path: found.clone(),
                            index: 0,
                        },
                    };
                }
            }
        }

        for candidate in &candidates {
            if let Ok(found) = self.resolve(candidate)
                && found.source_kind() == SourceKind::FileSystem
            {
                return found;
            }
        }

        log::warn!(
            "No italic variant found for {}; event text will not be slanted",
            base
        );
        base.clone()
    }

    /// Reads and validates the font file once per distinct source.
    pub fn load(&mut self, resolved: &ResolvedFont) -> CalendarResult<LoadedFont> {
        if let Some(hit) = self.loaded.get(&resolved.source) {
            return Ok(LoadedFont {
                resolved: resolved.clone(),
                data: hit.data.clone(),
            });
        }

        let loaded = match &resolved.source {
            FontSource::Builtin(_) => LoadedFont::builtin(resolved.clone()),
            FontSource::File { path, index } => {
                let bytes = fs::read(path).map_err(|e| CalendarError::FontLoad {
                    path: path.clone(),
                    reason: e.to_string(),
                })?;
                ttf_parser::Face::parse(&bytes, *index).map_err(|e| CalendarError::FontLoad {
                    path: path.clone(),
                    reason: e.to_string(),
                })?;
                log::debug!("Loaded {} ({} bytes)", path.display(), bytes.len());
                LoadedFont {
                    resolved: resolved.clone(),
                    data: Some(Arc::new(bytes)),
                }
            }
        };
        self.loaded.insert(resolved.source.clone(), loaded.clone());
        Ok(loaded)
    }

    fn resolve_and_load(&mut self, logical_name: &str) -> CalendarResult<LoadedFont> {
        let resolved = self.resolve(logical_name)?;
        self.load(&resolved)
    }

    /// Resolves and loads everything a calendar needs.
    /// Regular, bold and title are required; italic and fallback degrade silently.
    pub fn load_font_set(&mut self, selection: &FontSelection) -> CalendarResult<FontSet> {
        let regular = self.resolve_and_load(&selection.regular)?;
        let bold = self.resolve_and_load(&selection.bold)?;
        let title = self.resolve_and_load(selection.title_name())?;

        let italic_resolved = self.resolve_italic(&regular.resolved);
        let italic = match self.load(&italic_resolved) {
            Ok(font) => font,
            Err(e) => {
                log::warn!("Italic font unusable ({}); using regular", e);
                regular.clone()
            }
        };

        let mut fallback = None;
        for name in &selection.fallback {
            let Ok(resolved) = self.resolve(name) else {
                continue;
            };
            if resolved.source_kind() != SourceKind::FileSystem {
                continue;
            }
            match self.load(&resolved) {
                Ok(font) => {
                    fallback = Some(font);
                    break;
                }
                Err(e) => log::warn!("Skipping fallback font {}: {}", resolved, e),
            }
        }
        if fallback.is_none() {
            log::debug!("No Unicode fallback font available");
        }

        Ok(FontSet {
            regular,
            bold,
            title,
            italic,
            fallback,
            uncovered_logged: RefCell::new(HashSet::new()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_resolution_skips_filesystem() {
        let mut registry =
            FontRegistry::new(FontSearchPath::new(vec![PathBuf::from("/nonexistent")]));
        let resolved = registry.resolve("Helvetica").unwrap();
        assert_eq!(resolved.source_kind(), SourceKind::Builtin);
        assert!(resolved.path().is_none());
        assert!(!registry.has_scanned());
    }

    #[test]
    fn test_unknown_font_fails() {
        let mut registry = FontRegistry::new(FontSearchPath::new(Vec::new()));
        let err = registry.resolve("NoSuchFont-Bold").unwrap_err();
        assert!(matches!(err, CalendarError::FontNotFound { ref name, .. } if name == "NoSuchFont-Bold"));
    }

    #[test]
    fn test_builtin_italic() {
        let mut registry = FontRegistry::new(FontSearchPath::new(Vec::new()));
        let regular = registry.resolve("Times-Roman").unwrap();
        let italic = registry.resolve_italic(&regular);
        assert_eq!(italic.source, FontSource::Builtin(BuiltinFace::TimesItalic));
    }

    #[test]
    fn test_builtin_font_set_has_no_fallback() {
        let mut registry = FontRegistry::new(FontSearchPath::new(Vec::new()));
        let set = registry.load_font_set(&FontSelection::default()).unwrap();
        assert_eq!(set.title.key(), set.bold.key());
        assert!(set.fallback.is_none());
        // regular, bold (shared with title), oblique
        assert_eq!(set.distinct().len(), 3);
    }

    #[test]
    fn test_uncovered_text_reported_once_per_face() {
        let mut registry = FontRegistry::new(FontSearchPath::new(Vec::new()));
        let set = registry.load_font_set(&FontSelection::default()).unwrap();
        for text in ["Рождество", "Новый год", "Масленица"] {
            assert_eq!(set.face_for(&set.italic, text).key(), set.italic.key());
        }
        set.face_for(&set.bold, "Пасха");
        assert_eq!(set.uncovered_logged.borrow().len(), 2);
        assert!(!set.uses_fallback(&set.italic, "Рождество"));
    }

    #[test]
    fn test_builtin_coverage_and_width() {
        let mut registry = FontRegistry::new(FontSearchPath::new(Vec::new()));
        let resolved = registry.resolve("Courier").unwrap();
        let font = registry.load(&resolved).unwrap();
        assert!(font.covers("Christmas 2026"));
        assert!(!font.covers("Рождество"));
        // 10 glyphs * 0.6 em * 10 pt = 60 pt
        let width = font.text_width_mm("0123456789", 10.0);
        assert!((width - 60.0 * PT_TO_MM).abs() < 1e-3);
    }
}
