pub type ThumbResult<T> = Result<T, ThumbError>;

#[derive(thiserror::Error, Debug)]
pub enum ThumbError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("resource load error: {0}")]
    ResourceLoad(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("encode error: {0}")]
    Encode(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ThumbError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn resource_load(msg: impl Into<String>) -> Self {
        Self::ResourceLoad(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}
