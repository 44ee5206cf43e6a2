use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Namespace prefix shared by every release from 2007-06 onwards
pub const OME_NAMESPACE_BASE: &str = "http://www.openmicroscopy.org/Schemas/OME/";

/// File marker closing the namespace of the original 2003 release
pub const LEGACY_NAMESPACE_MARKER: &str = "ome.xsd";

const LEGACY_NAMESPACE: &str = "http://www.openmicroscopy.org/XMLschemas/OME/FC/ome.xsd";

/// A released version of the OME metadata schema, ordered by release date
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum SchemaVersion {
    /// Original 2003 "FC" release
    #[serde(rename = "2003-FC")]
    V2003Fc,
    /// 2007-06
    #[serde(rename = "2007-06")]
    V2007_06,
    /// 2008-02
    #[serde(rename = "2008-02")]
    V2008_02,
    /// 2008-09
    #[serde(rename = "2008-09")]
    V2008_09,
    /// 2009-09
    #[serde(rename = "2009-09")]
    V2009_09,
    /// 2010-04
    #[serde(rename = "2010-04")]
    V2010_04,
    /// 2010-06
    #[serde(rename = "2010-06")]
    V2010_06,
    /// 2011-06
    #[serde(rename = "2011-06")]
    V2011_06,
    /// 2012-06
    #[serde(rename = "2012-06")]
    V2012_06,
    /// 2013-06
    #[serde(rename = "2013-06")]
    V2013_06,
    /// 2015-01
    #[serde(rename = "2015-01")]
    V2015_01,
    /// 2016-06, the current release
    #[serde(rename = "2016-06")]
    V2016_06,
}

impl SchemaVersion {
    /// Every known release, oldest first
    pub const ALL: [SchemaVersion; 12] = [
        SchemaVersion::V2003Fc,
        SchemaVersion::V2007_06,
        SchemaVersion::V2008_02,
        SchemaVersion::V2008_09,
        SchemaVersion::V2009_09,
        SchemaVersion::V2010_04,
        SchemaVersion::V2010_06,
        SchemaVersion::V2011_06,
        SchemaVersion::V2012_06,
        SchemaVersion::V2013_06,
        SchemaVersion::V2015_01,
        SchemaVersion::V2016_06,
    ];

    /// The release every document is migrated to
    pub const LATEST: SchemaVersion = SchemaVersion::V2016_06;

    /// Version token as it appears in namespaces
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaVersion::V2003Fc => "2003-FC",
            SchemaVersion::V2007_06 => "2007-06",
            SchemaVersion::V2008_02 => "2008-02",
            SchemaVersion::V2008_09 => "2008-09",
            SchemaVersion::V2009_09 => "2009-09",
            SchemaVersion::V2010_04 => "2010-04",
            SchemaVersion::V2010_06 => "2010-06",
            SchemaVersion::V2011_06 => "2011-06",
            SchemaVersion::V2012_06 => "2012-06",
            SchemaVersion::V2013_06 => "2013-06",
            SchemaVersion::V2015_01 => "2015-01",
            SchemaVersion::V2016_06 => "2016-06",
        }
    }

    /// Namespace URI of the release
    pub fn namespace(&self) -> String {
        match self {
            SchemaVersion::V2003Fc => LEGACY_NAMESPACE.to_string(),
            other => format!("{}{}", OME_NAMESPACE_BASE, other.as_str()),
        }
    }

    /// Value for `xsi:schemaLocation` pointing at the release's XSD
    pub fn schema_location(&self) -> String {
        match self {
            SchemaVersion::V2003Fc => format!("{} {}", LEGACY_NAMESPACE, LEGACY_NAMESPACE),
            other => format!("{} {}/ome.xsd", other.namespace(), other.namespace()),
        }
    }

    /// True for the current release
    pub fn is_latest(&self) -> bool {
        *self == Self::LATEST
    }

    /// Map a namespace URI to a release.
    ///
    /// Returns the token that was derived alongside the result so callers can
    /// report unknown releases precisely.
    pub fn from_namespace(namespace: &str) -> Result<Self, String> {
        if namespace.ends_with(LEGACY_NAMESPACE_MARKER) {
            return Ok(SchemaVersion::V2003Fc);
        }
        let token = namespace
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default();
        token.parse().map_err(|_| token.to_string())
    }
}

impl FromStr for SchemaVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SchemaVersion::ALL
            .iter()
            .copied()
            .find(|v| v.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown schema version: {}", s))
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
