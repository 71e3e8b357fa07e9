//! Caption font resolution.
//!
//! Resolvers are tried in order and the first one that yields a loadable face wins. The chain
//! always ends with the built-in bitmap font, so resolution itself cannot fail.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use walkdir::WalkDir;

/// Conventional location of a bold sans-serif face on Debian-like systems.
pub const SYSTEM_FONT_PATH: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf";

/// Directories scanned for any usable `.ttf`/`.otf` face.
pub const FONT_SCAN_DIRS: [&str; 3] = [
    "/usr/share/fonts/truetype",
    "/usr/share/fonts",
    "/usr/local/share/fonts",
];

/// A loaded outline face, ready for SVG text rendering.
#[derive(Clone)]
pub struct OutlineFont {
    pub(crate) fontdb: Arc<usvg::fontdb::Database>,
    pub(crate) family: String,
    pub(crate) source: PathBuf,
}

impl std::fmt::Debug for OutlineFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutlineFont")
            .field("family", &self.family)
            .field("source", &self.source)
            .finish()
    }
}

impl OutlineFont {
    /// Load the first face of a font file. `None` when the file is unreadable or not a font.
    pub fn load(path: &Path) -> Option<Self> {
        let bytes = std::fs::read(path).ok()?;
        let mut db = usvg::fontdb::Database::new();
        db.load_font_data(bytes);
        let family = db.faces().next()?.families.first()?.0.clone();
        Some(Self {
            fontdb: Arc::new(db),
            family,
            source: path.to_path_buf(),
        })
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn source(&self) -> &Path {
        &self.source
    }
}

/// The font captions are drawn with.
#[derive(Clone, Debug)]
pub enum CaptionFont {
    Outline(OutlineFont),
    Builtin,
}

impl CaptionFont {
    pub fn describe(&self) -> String {
        match self {
            Self::Outline(f) => format!("{} ({})", f.family, f.source.display()),
            Self::Builtin => "built-in 5x7 bitmap".to_string(),
        }
    }
}

/// One strategy for locating a caption font.
pub trait FontResolver {
    fn name(&self) -> &'static str;
    fn resolve(&self) -> Option<CaptionFont>;
}

/// A font file named in the configuration.
pub struct ConfiguredPath(pub PathBuf);

impl FontResolver for ConfiguredPath {
    fn name(&self) -> &'static str {
        "configured"
    }

    fn resolve(&self) -> Option<CaptionFont> {
        OutlineFont::load(&self.0).map(CaptionFont::Outline)
    }
}

/// A fixed well-known system path.
pub struct SystemPath(pub PathBuf);

impl Default for SystemPath {
    fn default() -> Self {
        Self(PathBuf::from(SYSTEM_FONT_PATH))
    }
}

impl FontResolver for SystemPath {
    fn name(&self) -> &'static str {
        "system"
    }

    fn resolve(&self) -> Option<CaptionFont> {
        OutlineFont::load(&self.0).map(CaptionFont::Outline)
    }
}

/// Recursive scan of font directories; candidates are tried in sorted path order.
pub struct DirectoryScan(pub Vec<PathBuf>);

impl Default for DirectoryScan {
    fn default() -> Self {
        Self(FONT_SCAN_DIRS.iter().map(PathBuf::from).collect())
    }
}

impl FontResolver for DirectoryScan {
    fn name(&self) -> &'static str {
        "scan"
    }

    fn resolve(&self) -> Option<CaptionFont> {
        self.0.iter().find_map(|dir| {
            font_files_in(dir)
                .into_iter()
                .find_map(|p| OutlineFont::load(&p))
                .map(CaptionFont::Outline)
        })
    }
}

fn font_files_in(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| {
            p.extension()
                .and_then(|s| s.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("ttf") || ext.eq_ignore_ascii_case("otf"))
                .unwrap_or(false)
        })
        .collect();
    files.sort();
    files
}

/// The compiled-in bitmap font.
pub struct BuiltinFallback;

impl FontResolver for BuiltinFallback {
    fn name(&self) -> &'static str {
        "builtin"
    }

    fn resolve(&self) -> Option<CaptionFont> {
        Some(CaptionFont::Builtin)
    }
}

/// Ordered resolver list.
pub struct FontChain {
    resolvers: Vec<Box<dyn FontResolver>>,
}

impl FontChain {
    /// Configured path (if any), system path, directory scan, built-in font.
    pub fn standard(configured: Option<&Path>) -> Self {
        let mut resolvers: Vec<Box<dyn FontResolver>> = Vec::new();
        if let Some(p) = configured {
            resolvers.push(Box::new(ConfiguredPath(p.to_path_buf())));
        }
        resolvers.push(Box::new(SystemPath::default()));
        resolvers.push(Box::new(DirectoryScan::default()));
        resolvers.push(Box::new(BuiltinFallback));
        Self { resolvers }
    }

    pub fn with_resolvers(resolvers: Vec<Box<dyn FontResolver>>) -> Self {
        Self { resolvers }
    }

    /// First font any resolver yields; the built-in font if none does.
    pub fn resolve(&self) -> CaptionFont {
        for r in &self.resolvers {
            if let Some(font) = r.resolve() {
                match &font {
                    CaptionFont::Builtin => tracing::warn!(
                        resolver = r.name(),
                        "no outline font found; captions use the built-in bitmap font"
                    ),
                    CaptionFont::Outline(_) => tracing::debug!(
                        resolver = r.name(),
                        font = %font.describe(),
                        "caption font resolved"
                    ),
                }
                return font;
            }
            tracing::debug!(resolver = r.name(), "no usable font");
        }
        tracing::warn!("no caption font found; using built-in bitmap font");
        CaptionFont::Builtin
    }
}

/// Resolver handed to usvg: the caption database holds exactly one face, so any request maps to
/// it when the family query misses.
pub(crate) fn single_face_resolver() -> usvg::FontResolver<'static> {
    usvg::FontResolver {
        select_font: Box::new(|font, fontdb| {
            let mut families = Vec::<usvg::fontdb::Family<'_>>::new();
            for family in font.families() {
                if let usvg::FontFamily::Named(s) = family {
                    families.push(usvg::fontdb::Family::Name(s));
                }
            }
            families.push(usvg::fontdb::Family::SansSerif);

            let query = usvg::fontdb::Query {
                families: &families,
                weight: usvg::fontdb::Weight(font.weight()),
                stretch: usvg::fontdb::Stretch::Normal,
                style: usvg::fontdb::Style::Normal,
            };
            if let Some(id) = fontdb.query(&query) {
                return Some(id);
            }
            fontdb.faces().next().map(|f| f.id)
        }),
        select_fallback: usvg::FontResolver::default_fallback_selector(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/fonts.rs"]
mod tests;
