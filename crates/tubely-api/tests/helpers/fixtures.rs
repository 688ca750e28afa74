use axum_test::multipart::{MultipartForm, Part};
use bytes::Bytes;

/// Bytes standing in for an MP4 file. The fake prober never parses them.
pub fn sample_mp4() -> Bytes {
    let mut data = Vec::with_capacity(4096);
    data.extend_from_slice(&[0, 0, 0, 0x18]);
    data.extend_from_slice(b"ftypmp42");
    data.resize(4096, 0xAB);
    Bytes::from(data)
}

/// Minimal PNG signature plus padding.
pub fn sample_png() -> Bytes {
    let mut data = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    data.resize(512, 0);
    Bytes::from(data)
}

/// Form with a single file part.
pub fn file_form(part_name: &str, data: Bytes, mime_type: &str) -> MultipartForm {
    MultipartForm::new().add_part(
        part_name.to_string(),
        Part::bytes(data)
            .file_name("upload.bin")
            .mime_type(mime_type),
    )
}

pub fn video_form(data: Bytes) -> MultipartForm {
    file_form("video", data, "video/mp4")
}
