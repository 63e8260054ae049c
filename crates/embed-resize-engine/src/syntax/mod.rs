//! Recognition and rewriting of image-embed markup.
//!
//! Two dialects are recognized, each anchored to the whole line (exactly one
//! embed per line):
//!
//! - **Canonical**: `![[photo.png]]`, `![[photo.png | 200]]`,
//!   `![[photo.png | 200x100]]`, `![[photo.png | 200 10 10 5]]`. Everything
//!   after the leading width number (`x<height>`, extra numerics) is an
//!   opaque suffix that width rewrites carry through byte-for-byte.
//! - **Legacy**: `![alt text](photo.png)`. Carries no width; it is converted
//!   to canonical form (discarding the alt text) before a width can be
//!   attached.
//!
//! Validation before a gesture starts is strict ([`ImageEmbed::parse`],
//! [`is_embed_line`]); [`rewrite_width`] is deliberately best-effort and
//! returns unmatched input unchanged rather than risking user text.

use std::sync::OnceLock;

use regex::Regex;

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("not an image embed: {0:?}")]
    NotAnEmbed(String),
    #[error("not legacy embed syntax: {0:?}")]
    NotLegacy(String),
    #[error("embed width out of range: {0:?}")]
    WidthOutOfRange(String),
}

/// One occurrence of a canonical image embed, parsed from a single line.
///
/// Transient: derived on demand, consumed immediately to produce a rewritten
/// line via [`ImageEmbed::to_markup`]. `trailing` is only ever present
/// alongside `width`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageEmbed {
    /// Asset path or URL referenced by the embed.
    pub target: String,
    /// Declared display width in layout pixels, if any.
    pub width: Option<u32>,
    /// Verbatim suffix after the width number (`x<height>` and/or
    /// space-separated numerics), preserved across rewrites.
    pub trailing: Option<String>,
}

fn canonical_re() -> &'static Regex {
    static CANONICAL: OnceLock<Regex> = OnceLock::new();
    CANONICAL.get_or_init(|| {
        Regex::new(
            r"^!\[\[(?P<target>[^\]]+?)(?: *\| *(?P<width>\d+)(?P<trailing>(?:x\d+)?(?: +\d+)*))?\]\]$",
        )
        .expect("Invalid canonical embed regex")
    })
}

fn legacy_re() -> &'static Regex {
    static LEGACY: OnceLock<Regex> = OnceLock::new();
    LEGACY.get_or_init(|| {
        Regex::new(r"^!\[(?P<alt>[^\]]*)\]\((?P<path>[^)]+)\)$")
            .expect("Invalid legacy embed regex")
    })
}

impl ImageEmbed {
    /// Strictly parse one line of canonical embed markup.
    pub fn parse(markup: &str) -> Result<Self, FormatError> {
        let caps = canonical_re()
            .captures(markup)
            .ok_or_else(|| FormatError::NotAnEmbed(markup.to_string()))?;

        let width = match caps.name("width") {
            Some(digits) => Some(
                digits
                    .as_str()
                    .parse::<u32>()
                    .map_err(|_| FormatError::WidthOutOfRange(markup.to_string()))?,
            ),
            None => None,
        };
        let trailing = caps
            .name("trailing")
            .map(|m| m.as_str())
            .filter(|s| !s.is_empty())
            .map(String::from);

        Ok(Self {
            target: caps["target"].to_string(),
            width,
            trailing,
        })
    }

    /// Render back to canonical markup with the ` | ` delimiter.
    pub fn to_markup(&self) -> String {
        match self.width {
            Some(width) => match &self.trailing {
                Some(trailing) => format!("![[{} | {}{}]]", self.target, width, trailing),
                None => format!("![[{} | {}]]", self.target, width),
            },
            None => format!("![[{}]]", self.target),
        }
    }
}

/// Whether the entire line is a single image embed in either dialect.
pub fn is_embed_line(line: &str) -> bool {
    canonical_re().is_match(line) || legacy_re().is_match(line)
}

/// Convert a legacy `![alt](path)` line to canonical `![[path]]` form.
///
/// The alt text is discarded; only the asset reference is carried through.
pub fn normalize_to_canonical(line: &str) -> Result<String, FormatError> {
    let caps = legacy_re()
        .captures(line)
        .ok_or_else(|| FormatError::NotLegacy(line.to_string()))?;
    Ok(format!("![[{}]]", &caps["path"]))
}

/// The declared width of a canonical embed, if present.
pub fn extract_width(markup: &str) -> Option<u32> {
    ImageEmbed::parse(markup).ok().and_then(|embed| embed.width)
}

/// Rewrite the width of a canonical embed, inserting the parameter if absent
/// and replacing it in place if present. Any suffix after the width number is
/// preserved verbatim.
///
/// Best-effort: input that does not match the canonical grammar is returned
/// unchanged, so a mistaken call can never corrupt user text. A width of 0 is
/// legal and produces a zero-width declaration.
pub fn rewrite_width(markup: &str, width: u32) -> String {
    match ImageEmbed::parse(markup) {
        Ok(mut embed) => {
            embed.width = Some(width);
            embed.to_markup()
        }
        Err(_) => markup.to_string(),
    }
}
