use crate::command::OutputFormat;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// `data:image/<subtype>;base64,<payload>`
pub fn data_url(format: OutputFormat, bytes: &[u8]) -> String {
    format!(
        "data:image/{};base64,{}",
        format.mime_subtype(),
        STANDARD.encode(bytes)
    )
}

/// Markdown image reference using `filename` as alt text.
pub fn image_markup(filename: &str, url: &str) -> String {
    format!("![{filename}]({url})")
}
