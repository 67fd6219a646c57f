use crate::Error;
use std::fmt;
use std::str::FromStr;

/// Graphviz layout engines a block may name.
///
/// The block's command word is used as an executable name, so only these values are ever handed
/// to process spawning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutCommand {
    Dot,
    Neato,
    Fdp,
    Sfdp,
    Twopi,
    Circo,
}

impl LayoutCommand {
    pub const ALL: [LayoutCommand; 6] = [
        LayoutCommand::Dot,
        LayoutCommand::Neato,
        LayoutCommand::Fdp,
        LayoutCommand::Sfdp,
        LayoutCommand::Twopi,
        LayoutCommand::Circo,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LayoutCommand::Dot => "dot",
            LayoutCommand::Neato => "neato",
            LayoutCommand::Fdp => "fdp",
            LayoutCommand::Sfdp => "sfdp",
            LayoutCommand::Twopi => "twopi",
            LayoutCommand::Circo => "circo",
        }
    }
}

impl FromStr for LayoutCommand {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LayoutCommand::ALL
            .into_iter()
            .find(|cmd| cmd.as_str() == s)
            .ok_or_else(|| Error::UnsupportedCommand {
                command: s.to_string(),
            })
    }
}

impl fmt::Display for LayoutCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Image formats that can be inlined as a data URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Svg,
    Png,
}

impl OutputFormat {
    /// Subtype used in the `data:image/<subtype>` prefix.
    pub fn mime_subtype(self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg+xml",
            OutputFormat::Png => "png",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            other => Err(Error::UnsupportedFormat {
                format: other.to_string(),
            }),
        }
    }
}

/// Returns the part of `filename` after its last `.`, or the whole name when there is none.
pub fn file_type(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(idx) => &filename[idx + 1..],
        None => filename,
    }
}
