use std::sync::OnceLock;

use log::debug;

/// A file type the registry can recognize
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatInfo {
    /// Human-readable format name
    pub name: &'static str,
    /// Extensions without the leading dot, lowercase
    pub extensions: &'static [&'static str],
}

const STANDARD_FORMATS: [FormatInfo; 7] = [
    FormatInfo {
        name: "Simulated data",
        extensions: &["fake"],
    },
    FormatInfo {
        name: "OME-XML",
        extensions: &["ome.xml", "ome"],
    },
    FormatInfo {
        name: "OME-TIFF",
        extensions: &["ome.tif", "ome.tiff", "ome.tf2", "ome.tf8", "ome.btf"],
    },
    FormatInfo {
        name: "Image Cytometry Standard",
        extensions: &["ics", "ids"],
    },
    FormatInfo {
        name: "DICOM",
        extensions: &["dcm", "dicom"],
    },
    FormatInfo {
        name: "Windows Bitmap",
        extensions: &["bmp"],
    },
    FormatInfo {
        name: "Tagged Image File Format",
        extensions: &["tif", "tiff", "tf2", "tf8", "btf"],
    },
];

/// File-type identification and default naming
#[derive(Debug, Clone)]
pub struct FormatRegistry {
    formats: Vec<FormatInfo>,
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new(STANDARD_FORMATS.to_vec())
    }
}

impl FormatRegistry {
    /// A registry over the given formats
    pub fn new(formats: Vec<FormatInfo>) -> Self {
        Self { formats }
    }

    /// Process-wide registry of the built-in formats
    pub fn standard() -> &'static FormatRegistry {
        static STANDARD: OnceLock<FormatRegistry> = OnceLock::new();
        STANDARD.get_or_init(FormatRegistry::default)
    }

    /// Every registered format
    pub fn formats(&self) -> &[FormatInfo] {
        &self.formats
    }

    /// Format and matched extension for a file name; the longest matching
    /// extension wins, so `a.ome.tif` is OME-TIFF rather than TIFF.
    fn lookup(&self, name: &str) -> Option<(&FormatInfo, &'static str)> {
        let lower = name.to_ascii_lowercase();
        self.formats
            .iter()
            .flat_map(|f| f.extensions.iter().map(move |ext| (f, *ext)))
            .filter(|(_, ext)| {
                lower.len() > ext.len() + 1
                    && lower.ends_with(ext)
                    && lower.as_bytes()[lower.len() - ext.len() - 1] == b'.'
            })
            .max_by_key(|(_, ext)| ext.len())
    }

    /// Identify a file by name
    pub fn identify(&self, name: &str) -> Option<&FormatInfo> {
        let found = self.lookup(name).map(|(format, _)| format);
        debug!("Identified '{}' as {:?}", name, found.map(|f| f.name));
        found
    }

    /// File name without directories and without its recognized extension
    pub fn base_name<'a>(&self, source: &'a str) -> &'a str {
        let file = source
            .rsplit(|c| c == '/' || c == '\\')
            .next()
            .unwrap_or(source);
        match self.lookup(file) {
            Some((_, ext)) => &file[..file.len() - ext.len() - 1],
            None => file.rsplit_once('.').map_or(file, |(stem, _)| stem),
        }
    }

    /// Name given to a series that carries none.
    ///
    /// The base name of the source, with ` #n` (1-based) appended when the
    /// source holds more than one series.
    pub fn default_image_name(&self, source: &str, series: usize, series_count: usize) -> String {
        let base = self.base_name(source);
        if series_count > 1 {
            format!("{} #{}", base, series + 1)
        } else {
            base.to_string()
        }
    }
}
