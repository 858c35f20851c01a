use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MAX_ATTACHMENT_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub filename: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct InquiryDraft {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    pub id: String,
    #[serde(flatten)]
    pub details: InquiryDraft,
    pub status: InquiryStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InquiryStatus {
    New,
    Responded,
    Closed,
}

impl InquiryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InquiryStatus::New => "new",
            InquiryStatus::Responded => "responded",
            InquiryStatus::Closed => "closed",
        }
    }
}

/// Human-readable size in the same units the upload widget shows.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let units = ["Bytes", "KB", "MB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < units.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded} {}", units[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(2 * 1024 * 1024), "2 MB");
    }

    #[test]
    fn test_inquiry_serializes_flat() {
        let inquiry = Inquiry {
            id: "abc".into(),
            details: InquiryDraft {
                name: "Sam".into(),
                email: "sam@example.com".into(),
                phone: None,
                message: "Do you do boats?".into(),
                attachments: vec![],
            },
            status: InquiryStatus::New,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let value = serde_json::to_value(&inquiry).unwrap();
        assert_eq!(value["name"], "Sam");
        assert_eq!(value["status"], "new");
        assert!(value.get("details").is_none());
    }

    #[test]
    fn test_status_str_matches_wire_name() {
        for status in [InquiryStatus::New, InquiryStatus::Responded, InquiryStatus::Closed] {
            assert_eq!(serde_json::to_value(status).unwrap(), status.as_str());
        }
    }
}
