use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnvError {
    #[error("invalid action: expected 2 values (throttle, steer), got {len}")]
    InvalidAction { len: usize },
    #[error("invalid action: values must be finite")]
    NonFiniteAction,
    #[error("episode has terminated; call reset() before stepping again")]
    EpisodeTerminated,
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
