use infer::Infer;

use crate::constants::MIME_OCTET_STREAM;

/// Content type for an upload part: the file name's extension first, the
/// magic bytes second, `application/octet-stream` last.
pub fn detect_mime_type(file_name: &str, content: &[u8]) -> String {
    if let Some(mime) = mime_guess::from_path(file_name).first_raw() {
        return mime.to_string();
    }

    let info = Infer::new();
    if let Some(kind) = info.get(content) {
        log::debug!("## Mime sniffed for {}: {}", file_name, kind);
        return kind.mime_type().to_string();
    }

    log::debug!("## Mime: NONE for {}", file_name);
    MIME_OCTET_STREAM.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_wins() {
        assert_eq!(detect_mime_type("report.pdf", b"anything"), "application/pdf");
        assert_eq!(detect_mime_type("cat.png", b""), "image/png");
    }

    #[test]
    fn test_sniffs_without_extension() {
        let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
        assert_eq!(detect_mime_type("cat", &png), "image/png");
    }

    #[test]
    fn test_unknown_falls_back() {
        assert_eq!(detect_mime_type("notes", b"plain words"), MIME_OCTET_STREAM);
    }
}
