use reqwest::StatusCode;

/// Failure of one remote-service call. Carries the operation name so the
/// console can surface "which action failed" without threading context
/// through every caller.
#[derive(Debug)]
pub struct ApiError {
    op: &'static str,
    kind: ErrorKind,
}

#[derive(Debug)]
enum ErrorKind {
    Status(StatusCode),
    Transport(reqwest::Error),
    Decode(String),
}

impl ApiError {
    pub fn status(op: &'static str, status: StatusCode) -> Self {
        Self {
            op,
            kind: ErrorKind::Status(status),
        }
    }

    pub fn transport(op: &'static str, err: reqwest::Error) -> Self {
        Self {
            op,
            kind: ErrorKind::Transport(err),
        }
    }

    pub fn decode(op: &'static str, err: impl std::fmt::Display) -> Self {
        Self {
            op,
            kind: ErrorKind::Decode(err.to_string()),
        }
    }

    pub fn op(&self) -> &'static str {
        self.op
    }

    /// HTTP status for non-success responses; `None` for transport and
    /// decode failures.
    pub fn http_status(&self) -> Option<StatusCode> {
        match &self.kind {
            ErrorKind::Status(status) => Some(*status),
            _ => None,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ErrorKind::Status(status) => write!(f, "{} failed with status {}", self.op, status),
            ErrorKind::Transport(err) => write!(f, "{} failed: {}", self.op, err),
            ErrorKind::Decode(detail) => {
                write!(f, "{} returned an unreadable response: {}", self.op, detail)
            }
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ErrorKind::Transport(err) => Some(err),
            _ => None,
        }
    }
}
