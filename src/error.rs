//! Error types for tonesplit.

/// Result type alias for tonesplit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for tonesplit.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Failed to open the input recording.
    #[error("failed to open recording '{path}'")]
    AudioOpen {
        /// Path to the recording.
        path: std::path::PathBuf,
        /// Underlying error.
        #[source]
        source: hound::Error,
    },

    /// Recording has the wrong sample rate.
    #[error("recording '{path}' has sample rate {actual} Hz, expected {expected} Hz")]
    UnexpectedSampleRate {
        /// Path to the recording.
        path: std::path::PathBuf,
        /// Expected sample rate in Hz.
        expected: u32,
        /// Actual sample rate in Hz.
        actual: u32,
    },

    /// Recording is not single-channel.
    #[error("recording '{path}' has {channels} channels, expected mono")]
    UnexpectedChannels {
        /// Path to the recording.
        path: std::path::PathBuf,
        /// Actual channel count.
        channels: u16,
    },

    /// Recording is not 16-bit integer PCM.
    #[error("recording '{path}' is not 16-bit integer PCM")]
    UnsupportedSampleFormat {
        /// Path to the recording.
        path: std::path::PathBuf,
    },

    /// Failed to read a sample from the recording.
    #[error("failed to read samples from '{path}'")]
    AudioRead {
        /// Path to the recording.
        path: std::path::PathBuf,
        /// Underlying error.
        #[source]
        source: hound::Error,
    },

    /// Failed to read a label source file.
    #[error("failed to read label file '{path}'")]
    LabelRead {
        /// Path to the label file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Fewer labels than segments in strict mode.
    #[error("{segments} segments detected but only {labels} labels supplied")]
    InsufficientLabels {
        /// Number of segments produced by the resolver.
        segments: usize,
        /// Number of labels available.
        labels: usize,
    },

    /// Failed to create output directory.
    #[error("failed to create output directory '{path}'")]
    OutputDirCreate {
        /// Path to the output directory.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a segment WAV file.
    #[error("failed to write WAV file '{path}'")]
    WavWrite {
        /// Path to the WAV file.
        path: std::path::PathBuf,
        /// Underlying error.
        #[source]
        source: hound::Error,
    },

    /// Source directory for organizing does not exist.
    #[error("source directory not found: {path}")]
    SourceDirNotFound {
        /// Path to the missing directory.
        path: std::path::PathBuf,
    },
}
