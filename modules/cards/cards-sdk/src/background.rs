//! Card background as a tagged variant.
//!
//! Persistence stores the background as a `(background_type, background_value)`
//! column pair; this module is the only place that pair is interpreted, so the
//! value is never read without its type.

use std::fmt;
use std::str::FromStr;

/// Gradient applied to new cards and restored when an image upload fails.
pub const DEFAULT_GRADIENT: &str = "from-blue-500 to-purple-600";

/// Discriminant of a [`Background`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BackgroundType {
    #[default]
    Gradient,
    Color,
    Image,
}

impl BackgroundType {
    pub const ALL: [Self; 3] = [Self::Gradient, Self::Color, Self::Image];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gradient => "gradient",
            Self::Color => "color",
            Self::Image => "image",
        }
    }
}

impl fmt::Display for BackgroundType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown background type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown background type '{0}'")]
pub struct UnknownBackgroundType(pub String);

impl FromStr for BackgroundType {
    type Err = UnknownBackgroundType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gradient" => Ok(Self::Gradient),
            "color" => Ok(Self::Color),
            "image" => Ok(Self::Image),
            other => Err(UnknownBackgroundType(other.to_owned())),
        }
    }
}

/// Non-empty, trimmed background payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BackgroundValue(String);

impl BackgroundValue {
    /// Returns `None` when the value is empty after trimming.
    #[must_use]
    pub fn new(value: impl AsRef<str>) -> Option<Self> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_owned()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// One of three mutually exclusive background representations.
///
/// - `Gradient`: a gradient token (utility classes such as `from-x to-y`)
/// - `Color`: a literal color string, usually `#RRGGBB`; not validated
/// - `Image`: public URL of an uploaded image
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Background {
    Gradient(BackgroundValue),
    Color(BackgroundValue),
    Image(BackgroundValue),
}

impl Default for Background {
    fn default() -> Self {
        Self::Gradient(BackgroundValue(DEFAULT_GRADIENT.to_owned()))
    }
}

impl Background {
    #[must_use]
    pub fn gradient(token: impl AsRef<str>) -> Option<Self> {
        BackgroundValue::new(token).map(Self::Gradient)
    }

    #[must_use]
    pub fn color(value: impl AsRef<str>) -> Option<Self> {
        BackgroundValue::new(value).map(Self::Color)
    }

    #[must_use]
    pub fn image(url: impl AsRef<str>) -> Option<Self> {
        BackgroundValue::new(url).map(Self::Image)
    }

    /// Builds a background of the given kind; `None` when `value` is blank.
    #[must_use]
    pub fn of_kind(kind: BackgroundType, value: impl AsRef<str>) -> Option<Self> {
        match kind {
            BackgroundType::Gradient => Self::gradient(value),
            BackgroundType::Color => Self::color(value),
            BackgroundType::Image => Self::image(value),
        }
    }

    /// Lenient decode of the persisted column pair.
    ///
    /// A missing or unknown type, or a blank value, yields the default gradient.
    #[must_use]
    pub fn from_parts(kind: Option<&str>, value: Option<&str>) -> Self {
        kind.and_then(|k| k.parse::<BackgroundType>().ok())
            .zip(value)
            .and_then(|(k, v)| Self::of_kind(k, v))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn kind(&self) -> BackgroundType {
        match self {
            Self::Gradient(_) => BackgroundType::Gradient,
            Self::Color(_) => BackgroundType::Color,
            Self::Image(_) => BackgroundType::Image,
        }
    }

    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Gradient(v) | Self::Color(v) | Self::Image(v) => v.as_str(),
        }
    }

    #[must_use]
    pub fn into_parts(self) -> (BackgroundType, String) {
        let kind = self.kind();
        let value = match self {
            Self::Gradient(v) | Self::Color(v) | Self::Image(v) => v.into_inner(),
        };
        (kind, value)
    }
}
