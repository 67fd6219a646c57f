pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Command not supported: {command}")]
    UnsupportedCommand { command: String },

    #[error("Unsupported output format: {format} (expected svg or png)")]
    UnsupportedFormat { format: String },

    #[error("Failed to launch renderer `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Renderer exited with {}: {stderr}", status_label(.status))]
    RendererFailed { status: Option<i32>, stderr: String },

    #[error("Renderer produced invalid UTF-8 SVG: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

fn status_label(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}
