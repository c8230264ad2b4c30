use thiserror::Error;

#[derive(Debug, Error)]
pub enum SoxError {
    #[error("{exe} command not found or not invokable: {source}")]
    NotInvokable {
        exe: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{exe} -h exited with {status}")]
    ExitStatus {
        exe: String,
        status: std::process::ExitStatus,
    },

    #[error("{0} did not report its supported audio file formats")]
    NoFormatList(String),

    #[error("Destination format '{format}' is not supported by {exe}")]
    UnsupportedFormat { format: String, exe: String },
}

pub type SoxResult<T> = Result<T, SoxError>;
