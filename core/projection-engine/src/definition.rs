//! FILENAME: core/projection-engine/src/definition.rs
//! Projection Definition - Which columns a report row carries.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// DETAIL LEVEL
// ============================================================================

/// How much of a record a report row shows.
///
/// - `Simple`: the base columns only
/// - `Detailed`: base and detail columns, plus the sections asked for
/// - `Combined`: base and detail columns, plus every section the kind has
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailLevel {
    #[default]
    Simple,
    Detailed,
    Combined,
}

/// Optional block of columns drawn from a linked reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    ProviderDetails,
    ProductDetails,
}

// ============================================================================
// DATE LOCALE
// ============================================================================

/// Short date style used when rendering dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DateLocale {
    /// `dd/mm/yyyy`
    #[default]
    EsEs,
    /// `mm/dd/yyyy`
    EnUs,
    /// `dd/mm/yyyy`
    EnGb,
    /// `dd.mm.yyyy`
    DeDe,
    /// `yyyy-mm-dd`
    Iso,
}

impl DateLocale {
    pub fn tag(self) -> &'static str {
        match self {
            DateLocale::EsEs => "es-ES",
            DateLocale::EnUs => "en-US",
            DateLocale::EnGb => "en-GB",
            DateLocale::DeDe => "de-DE",
            DateLocale::Iso => "iso",
        }
    }

    /// chrono format string for a short date.
    pub fn short_date_pattern(self) -> &'static str {
        match self {
            DateLocale::EsEs | DateLocale::EnGb => "%d/%m/%Y",
            DateLocale::EnUs => "%m/%d/%Y",
            DateLocale::DeDe => "%d.%m.%Y",
            DateLocale::Iso => "%Y-%m-%d",
        }
    }
}

impl FromStr for DateLocale {
    type Err = String;

    /// Accepts BCP-47 style tags (`es`, `es-MX`, `en_US`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase().replace('_', "-");
        let language = tag.split('-').next().unwrap_or("");
        match (language, tag.as_str()) {
            ("iso", _) => Ok(DateLocale::Iso),
            ("en", "en") | ("en", "en-us") => Ok(DateLocale::EnUs),
            ("en", _) => Ok(DateLocale::EnGb),
            ("es", _) => Ok(DateLocale::EsEs),
            ("de", _) => Ok(DateLocale::DeDe),
            _ => Err(format!("unsupported locale '{}'", s)),
        }
    }
}

impl TryFrom<String> for DateLocale {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DateLocale> for String {
    fn from(value: DateLocale) -> Self {
        value.tag().to_string()
    }
}

impl fmt::Display for DateLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

// ============================================================================
// PROJECTION SPEC
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSpec {
    pub detail_level: DetailLevel,
    #[serde(default)]
    pub sections: BTreeSet<Section>,
    #[serde(default)]
    pub locale: DateLocale,
}

impl ProjectionSpec {
    pub fn new(detail_level: DetailLevel) -> Self {
        ProjectionSpec {
            detail_level,
            ..Default::default()
        }
    }

    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.insert(section);
        self
    }

    pub fn with_locale(mut self, locale: DateLocale) -> Self {
        self.locale = locale;
        self
    }

    /// Whether columns of `section` belong in the projection.
    pub fn includes(&self, section: Section) -> bool {
        match self.detail_level {
            DetailLevel::Simple => false,
            DetailLevel::Detailed => self.sections.contains(&section),
            DetailLevel::Combined => true,
        }
    }

    pub fn includes_detail(&self) -> bool {
        self.detail_level != DetailLevel::Simple
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_tags() {
        assert_eq!("es-MX".parse::<DateLocale>().unwrap(), DateLocale::EsEs);
        assert_eq!("en_US".parse::<DateLocale>().unwrap(), DateLocale::EnUs);
        assert_eq!("en".parse::<DateLocale>().unwrap(), DateLocale::EnUs);
        assert_eq!("en-AU".parse::<DateLocale>().unwrap(), DateLocale::EnGb);
        assert_eq!("DE".parse::<DateLocale>().unwrap(), DateLocale::DeDe);
        assert!("fr-FR".parse::<DateLocale>().is_err());
    }

    #[test]
    fn test_section_inclusion_by_level() {
        let simple = ProjectionSpec::new(DetailLevel::Simple).with_section(Section::ProviderDetails);
        assert!(!simple.includes(Section::ProviderDetails));

        let detailed = ProjectionSpec::new(DetailLevel::Detailed).with_section(Section::ProviderDetails);
        assert!(detailed.includes(Section::ProviderDetails));
        assert!(!detailed.includes(Section::ProductDetails));

        let combined = ProjectionSpec::new(DetailLevel::Combined);
        assert!(combined.includes(Section::ProductDetails));
    }

    #[test]
    fn test_spec_from_json() {
        let spec: ProjectionSpec = serde_json::from_str(
            r#"{"detailLevel": "detailed", "sections": ["productDetails"], "locale": "en-US"}"#,
        )
        .unwrap();
        assert_eq!(spec.detail_level, DetailLevel::Detailed);
        assert!(spec.sections.contains(&Section::ProductDetails));
        assert_eq!(spec.locale, DateLocale::EnUs);
    }
}
