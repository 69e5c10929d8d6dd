use std::io;

/// Startup failures; each one aborts the program
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("failed to enable raw terminal input: {0}")]
    RawMode(#[source] io::Error),

    #[error("terminal size is unavailable")]
    SurfaceSize,

    #[error("failed to set up the terminal surface: {0}")]
    Surface(#[source] io::Error),

    #[error("cannot create a {width}x{height} framebuffer")]
    Renderer { width: usize, height: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_error_display() {
        let err = InitError::Renderer { width: 0, height: 48 };
        assert_eq!(err.to_string(), "cannot create a 0x48 framebuffer");
        assert_eq!(InitError::SurfaceSize.to_string(), "terminal size is unavailable");
    }

    #[test]
    fn io_errors_are_kept_as_source() {
        let err = InitError::RawMode(io::Error::new(io::ErrorKind::Other, "not a tty"));
        assert_eq!(err.to_string(), "failed to enable raw terminal input: not a tty");
        assert!(std::error::Error::source(&err).is_some());
    }
}
