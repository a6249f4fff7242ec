/*!
    Error types for the frame crate ecosystem.
*/

use std::fmt;

/**
    Error type for the frame crate ecosystem.
*/
#[derive(Debug)]
pub enum Error {
    /// I/O error (settings file missing, write failure, etc.)
    Io(std::io::Error),
    /// Codec error (decode/encode failure)
    Codec { message: String },
    /// Invalid data (malformed input)
    InvalidData { message: String },
    /// Unsupported format (valid but not handled)
    UnsupportedFormat { message: String },
    /// A dimension that must be positive was zero
    InvalidDimension { width: u32, height: u32 },
    /// An encoded frame exceeded the transport payload budget
    FrameTooLarge { len: usize, max: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Codec { message } => write!(f, "codec error: {message}"),
            Self::InvalidData { message } => write!(f, "invalid data: {message}"),
            Self::UnsupportedFormat { message } => write!(f, "unsupported format: {message}"),
            Self::InvalidDimension { width, height } => {
                write!(f, "invalid dimensions: {width}x{height}")
            }
            Self::FrameTooLarge { len, max } => {
                write!(f, "encoded frame too large: {len} bytes (max {max})")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl Error {
    /**
        Create a codec error with the given message.
    */
    pub fn codec(message: impl Into<String>) -> Self {
        Self::Codec {
            message: message.into(),
        }
    }

    /**
        Create an invalid data error with the given message.
    */
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }

    /**
        Create an unsupported format error with the given message.
    */
    pub fn unsupported_format(message: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            message: message.into(),
        }
    }

    /**
        Create an invalid dimension error for the given size.
    */
    pub fn invalid_dimension(width: u32, height: u32) -> Self {
        Self::InvalidDimension { width, height }
    }
}

/**
    Result type alias for the frame crate ecosystem.
*/
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn error_display() {
        let e = Error::codec("decode failed");
        assert_eq!(format!("{e}"), "codec error: decode failed");

        let e = Error::invalid_data("corrupted header");
        assert_eq!(format!("{e}"), "invalid data: corrupted header");

        let e = Error::unsupported_format("unknown pixel format");
        assert_eq!(format!("{e}"), "unsupported format: unknown pixel format");

        let e = Error::invalid_dimension(0, 480);
        assert_eq!(format!("{e}"), "invalid dimensions: 0x480");

        let e = Error::FrameTooLarge {
            len: 40000,
            max: 32768,
        };
        assert_eq!(
            format!("{e}"),
            "encoded frame too large: 40000 bytes (max 32768)"
        );
    }

    #[test]
    fn error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let e: Error = io_err.into();
        assert!(matches!(e, Error::Io(_)));
        assert!(format!("{e}").contains("file not found"));
    }

    #[test]
    fn error_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let e = Error::Io(io_err);
        assert!(StdError::source(&e).is_some());

        let e = Error::invalid_dimension(0, 0);
        assert!(StdError::source(&e).is_none());
    }
}
