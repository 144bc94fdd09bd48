use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Query already resolved: only pending outcomes can be chained")]
    ChainResolved,

    #[error("Unknown query verb: {0}")]
    UnknownVerb(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
