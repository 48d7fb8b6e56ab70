//! Photos are stored inline as `data:` URIs.

use std::path::Path;

use anyhow::{Context as _, bail};
use base64::{Engine as _, engine::general_purpose::STANDARD as B64};

/// Largest photo accepted, before encoding.
pub const MAX_IMAGE_BYTES: usize = 2 * 1024 * 1024;

fn media_type(path: &Path) -> Option<&'static str> {
  let ext = path.extension()?.to_str()?.to_ascii_lowercase();
  Some(match ext.as_str() {
    "png" => "image/png",
    "jpg" | "jpeg" => "image/jpeg",
    "gif" => "image/gif",
    "webp" => "image/webp",
    "svg" => "image/svg+xml",
    _ => return None,
  })
}

/// Encode raw image bytes as a `data:` URI.
pub fn encode(media_type: &str, bytes: &[u8]) -> String {
  format!("data:{media_type};base64,{}", B64.encode(bytes))
}

/// Read the image at `path` and encode it as a `data:` URI.
pub fn data_uri(path: &Path) -> anyhow::Result<String> {
  let Some(media_type) = media_type(path) else {
    bail!("{} is not a png, jpeg, gif, webp or svg image", path.display());
  };
  let bytes =
    std::fs::read(path).with_context(|| format!("reading image {}", path.display()))?;
  if bytes.len() > MAX_IMAGE_BYTES {
    bail!("{} is larger than {} bytes", path.display(), MAX_IMAGE_BYTES);
  }
  Ok(encode(media_type, &bytes))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn encodes_with_media_type() {
    assert_eq!(encode("image/png", b"hi"), "data:image/png;base64,aGk=");
  }

  #[test]
  fn media_type_from_extension() {
    assert_eq!(media_type(Path::new("a/photo.JPG")), Some("image/jpeg"));
    assert_eq!(media_type(Path::new("photo.webp")), Some("image/webp"));
    assert_eq!(media_type(Path::new("notes.txt")), None);
    assert_eq!(media_type(Path::new("noext")), None);
  }

  #[test]
  fn unknown_extension_is_rejected_before_reading() {
    let err = data_uri(Path::new("/definitely/missing.txt")).unwrap_err();
    assert!(err.to_string().contains("not a png"));
  }
}
