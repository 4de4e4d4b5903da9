use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FormatError {
    #[error("Unsupported format: {0} (supported: json, csv, txt)")]
    Unsupported(String),

    #[error("Format {format} is not available for {kind} exports")]
    NotAllowed { format: String, kind: &'static str },
}
