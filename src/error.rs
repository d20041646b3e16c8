// SPDX-License-Identifier: MPL-2.0
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Config Error: {0}")]
    Config(String),

    #[error("Transition Error: {0}")]
    Transition(#[from] TransitionError),
}

/// Caller precondition violations on presentation transitions.
///
/// These are defects rather than runtime conditions: a correct viewer
/// lifecycle never produces them. They are still returned as values so a
/// release build degrades to a no-op instead of corrupting surface state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// `enter_zoomable` while the zoomable surface is already active.
    #[error("zoomable surface is already installed")]
    AlreadyZoomable,

    /// `exit_zoomable` while the flat surface is active.
    #[error("no zoomable surface is installed")]
    NotZoomable,

    /// `enter_zoomable` before any image has been displayed.
    #[error("no displayable image to load into the zoomable surface")]
    NoDisplayableImage,
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn transition_error_converts_into_error() {
        let err: Error = TransitionError::AlreadyZoomable.into();
        assert!(matches!(
            err,
            Error::Transition(TransitionError::AlreadyZoomable)
        ));
        assert!(format!("{}", err).contains("already installed"));
    }

    #[test]
    fn toml_parse_error_becomes_config_error() {
        let parse: std::result::Result<toml::Value, _> = toml::from_str("not = valid = toml");
        let err: Error = parse.unwrap_err().into();
        assert!(matches!(err, Error::Config(_)));
    }
}
