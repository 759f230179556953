use formats::BrainCsvError;

/// Why a prediction request produced no usable answer.
///
/// Callers of [`crate::PredictionClient`] never see this; it is logged and
/// folded into "no prediction".
#[derive(Debug)]
pub enum PredictError {
    Transport(String),
    Status(u16),
    Body(String),
}

impl std::fmt::Display for PredictError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PredictError::Transport(msg) => write!(f, "prediction request failed: {msg}"),
            PredictError::Status(code) => write!(f, "prediction HTTP error! status: {code}"),
            PredictError::Body(msg) => write!(f, "prediction response malformed: {msg}"),
        }
    }
}

impl std::error::Error for PredictError {}

impl From<reqwest::Error> for PredictError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            PredictError::Body(err.to_string())
        } else {
            PredictError::Transport(err.to_string())
        }
    }
}

/// Brain-data load failure.
#[derive(Debug)]
pub enum LoadError {
    Transport(String),
    Status(u16),
    Io(std::io::Error),
    Csv(BrainCsvError),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Transport(msg) => write!(f, "brain-data request failed: {msg}"),
            LoadError::Status(code) => write!(f, "brain-data HTTP error! status: {code}"),
            LoadError::Io(err) => write!(f, "brain-data read failed: {err}"),
            LoadError::Csv(err) => write!(f, "brain-data parse failed: {err}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(err) => Some(err),
            LoadError::Csv(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for LoadError {
    fn from(err: reqwest::Error) -> Self {
        LoadError::Transport(err.to_string())
    }
}

impl From<std::io::Error> for LoadError {
    fn from(err: std::io::Error) -> Self {
        LoadError::Io(err)
    }
}

impl From<BrainCsvError> for LoadError {
    fn from(err: BrainCsvError) -> Self {
        LoadError::Csv(err)
    }
}
