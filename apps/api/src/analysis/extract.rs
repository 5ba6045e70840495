//! Resume upload text extraction (PDF and plain text).

use bytes::Bytes;
use tracing::debug;

use crate::errors::AppError;

/// Uploads above this size are rejected before parsing.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

const PDF_MAGIC: &[u8] = b"%PDF";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Pdf,
    PlainText,
}

/// Decides how to read an upload from its content type, falling back to the
/// file's magic bytes.
pub fn detect_kind(content_type: Option<&str>, data: &[u8]) -> Result<UploadKind, AppError> {
    match content_type.map(|c| c.split(';').next().unwrap_or(c).trim()) {
        Some("application/pdf") => Ok(UploadKind::Pdf),
        Some("text/plain") | Some("text/markdown") => Ok(UploadKind::PlainText),
        _ if data.starts_with(PDF_MAGIC) => Ok(UploadKind::Pdf),
        Some(other) => Err(AppError::Validation(format!(
            "Unsupported file type '{other}'. Upload a PDF or plain text resume."
        ))),
        None if std::str::from_utf8(data).is_ok() => Ok(UploadKind::PlainText),
        None => Err(AppError::Validation(
            "Unsupported file. Upload a PDF or plain text resume.".to_string(),
        )),
    }
}

/// Extracts resume text from an uploaded file.
pub async fn extract_resume_text(data: Bytes, content_type: Option<&str>) -> Result<String, AppError> {
    if data.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }
    if data.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::Validation(format!(
            "Uploaded file is too large ({} bytes, max {MAX_UPLOAD_BYTES})",
            data.len()
        )));
    }

    let text = match detect_kind(content_type, &data)? {
        UploadKind::PlainText => String::from_utf8(data.to_vec())
            .map_err(|_| AppError::Validation("Text file is not valid UTF-8".to_string()))?,
        UploadKind::Pdf => tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF extraction task failed: {e}")))?
            .map_err(|e| AppError::Validation(format!("Could not read PDF: {e}")))?,
    };

    let text = normalize_extracted(&text);
    if text.is_empty() {
        return Err(AppError::Validation(
            "No text could be extracted. Scanned (image-only) PDFs are not supported.".to_string(),
        ));
    }
    debug!("Extracted {} chars of resume text", text.len());
    Ok(text)
}

/// Trims each line and collapses runs of blank lines.
fn normalize_extracted(text: &str) -> String {
    let mut out = Vec::new();
    let mut blank_run = 0;
    for line in text.lines().map(str::trim_end) {
        if line.trim().is_empty() {
            blank_run += 1;
            if blank_run == 1 && !out.is_empty() {
                out.push(String::new());
            }
        } else {
            blank_run = 0;
            out.push(line.trim_start().to_string());
        }
    }
    while out.last().is_some_and(|l| l.is_empty()) {
        out.pop();
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_kind_by_content_type() {
        assert_eq!(detect_kind(Some("application/pdf"), b"").unwrap(), UploadKind::Pdf);
        assert_eq!(
            detect_kind(Some("text/plain; charset=utf-8"), b"hi").unwrap(),
            UploadKind::PlainText
        );
    }

    #[test]
    fn test_detect_kind_by_magic_bytes() {
        assert_eq!(
            detect_kind(Some("application/octet-stream"), b"%PDF-1.7 ...").unwrap(),
            UploadKind::Pdf
        );
        assert_eq!(detect_kind(None, b"plain resume").unwrap(), UploadKind::PlainText);
    }

    #[test]
    fn test_detect_kind_rejects_unknown() {
        assert!(detect_kind(Some("image/png"), &[0x89, 0x50, 0x4e, 0x47]).is_err());
        assert!(detect_kind(None, &[0xff, 0xfe, 0x00]).is_err());
    }

    #[test]
    fn test_normalize_collapses_blank_runs() {
        let text = "\n\n  Jane Doe  \n\n\n\nExperience\n   Engineer\n\n";
        assert_eq!(normalize_extracted(text), "Jane Doe\n\nExperience\nEngineer");
    }

    #[tokio::test]
    async fn test_plain_text_upload() {
        let text = extract_resume_text(Bytes::from_static(b"Jane Doe\nEngineer"), Some("text/plain"))
            .await
            .unwrap();
        assert_eq!(text, "Jane Doe\nEngineer");
    }

    #[tokio::test]
    async fn test_empty_upload_rejected() {
        assert!(extract_resume_text(Bytes::new(), Some("application/pdf")).await.is_err());
    }
}
