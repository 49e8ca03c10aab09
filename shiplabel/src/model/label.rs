//! Shipping labels and their persisted attachments.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ids::{LabelId, PackageId, ShipmentId};

/// File format of a label document.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    #[default]
    Pdf,
    Gif,
    Epl,
    Zpl,
    Spl,
}

/// Formats every carrier can produce.
const BASE_FILE_TYPES: &[FileType] = &[FileType::Pdf];

/// Formats offered by UPS.
pub const UPS_FILE_TYPES: &[FileType] = &[FileType::Gif, FileType::Epl, FileType::Zpl, FileType::Spl];

impl FileType {
    /// Lowercase key, also used as the file extension.
    pub fn key(&self) -> &'static str {
        match self {
            FileType::Pdf => "pdf",
            FileType::Gif => "gif",
            FileType::Epl => "epl",
            FileType::Zpl => "zpl",
            FileType::Spl => "spl",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FileType::Pdf => "PDF",
            FileType::Gif => "GIF",
            FileType::Epl => "EPL",
            FileType::Zpl => "ZPL",
            FileType::Spl => "SPL",
        }
    }

    /// All selectable formats as `(key, label)`, unique and sorted by key.
    pub fn selection() -> Vec<(&'static str, &'static str)> {
        let mut types: Vec<FileType> = BASE_FILE_TYPES
            .iter()
            .chain(UPS_FILE_TYPES)
            .copied()
            .collect();
        types.sort_by_key(|t| t.key());
        types.dedup();
        types.into_iter().map(|t| (t.key(), t.label())).collect()
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.key())
    }
}

impl FromStr for FileType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(FileType::Pdf),
            "gif" => Ok(FileType::Gif),
            "epl" => Ok(FileType::Epl),
            "zpl" => Ok(FileType::Zpl),
            "spl" => Ok(FileType::Spl),
            _ => Err(format!("unknown label file type '{}'", s)),
        }
    }
}

/// A generated label, before it is persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    /// Attachment file name.
    pub name: String,
    pub file: Vec<u8>,
    pub file_type: FileType,
    /// Set when the label belongs to one parcel of a multi-parcel shipment.
    pub package_id: Option<PackageId>,
}

impl Label {
    pub fn new(name: impl Into<String>, file: Vec<u8>, file_type: FileType) -> Self {
        Self {
            name: name.into(),
            file,
            file_type,
            package_id: None,
        }
    }

    /// A copy of this label bound to one package.
    pub fn for_package(&self, package_id: PackageId) -> Self {
        Self {
            package_id: Some(package_id),
            ..self.clone()
        }
    }
}

/// How the store keeps an attachment's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentType {
    #[default]
    Binary,
    Url,
}

impl FromStr for AttachmentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "binary" => Ok(AttachmentType::Binary),
            "url" => Ok(AttachmentType::Url),
            _ => Err(format!("unknown attachment type '{}'", s)),
        }
    }
}

/// A label stored against a shipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelAttachment {
    pub id: LabelId,
    pub shipment_id: ShipmentId,
    #[serde(default)]
    pub package_id: Option<PackageId>,
    pub name: String,
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
    pub file_type: FileType,
    #[serde(default)]
    pub attachment_type: AttachmentType,
}

mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_type_display_honours_width() {
        assert_eq!(format!("{:<4}|", FileType::Pdf), "pdf |");
        assert_eq!(format!("{:>4}", FileType::Zpl), " zpl");
    }

    #[test]
    fn test_selection_sorted_and_unique() {
        let keys: Vec<_> = FileType::selection().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["epl", "gif", "pdf", "spl", "zpl"]);
    }

    #[test]
    fn test_file_type_parse() {
        assert_eq!("PDF".parse::<FileType>(), Ok(FileType::Pdf));
        assert_eq!("zpl".parse::<FileType>(), Ok(FileType::Zpl));
        assert!("png".parse::<FileType>().is_err());
    }

    #[test]
    fn test_for_package_keeps_content() {
        let label = Label::new("label.pdf", vec![1, 2, 3], FileType::Pdf);
        let copy = label.for_package(PackageId(8));

        assert_eq!(copy.package_id, Some(PackageId(8)));
        assert_eq!(copy.file, label.file);
        assert_eq!(copy.name, label.name);
        assert!(label.package_id.is_none());
    }

    #[test]
    fn test_attachment_data_is_base64_in_json() {
        let attachment = LabelAttachment {
            id: LabelId(1),
            shipment_id: ShipmentId(2),
            package_id: None,
            name: "x.pdf".to_string(),
            data: b"hello".to_vec(),
            file_type: FileType::Pdf,
            attachment_type: AttachmentType::Binary,
        };

        let json = serde_json::to_value(&attachment).unwrap();
        assert_eq!(json["data"], "aGVsbG8=");

        let back: LabelAttachment = serde_json::from_value(json).unwrap();
        assert_eq!(back.data, b"hello");
    }
}
