use cozo::{DbInstance, NamedRows};
pub mod q;

/// Opens the configured storage engine and makes sure every relation exists.
pub fn start_db(engine: &str, path: &str) -> Result<DbInstance> {
    let db = DbInstance::new(engine, path, Default::default()).map_err(Error::EngineError)?;
    init(&db)?;
    Ok(db)
}

#[tracing::instrument(name = "Initialize database", skip_all)]
pub fn init(db: &DbInstance) -> OpResult {
    if q::ensure_articles_table(db).is_err() {
        q::create_articles_table(db)?;
        tracing::info!("Created articles relation");
    }

    if q::ensure_sequences_table(db).is_err() {
        q::create_sequences_table(db)?;
        tracing::info!("Created sequences relation");
    }

    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    // most likely query syntax error
    #[error("Engine error: {0}")]
    EngineError(miette::ErrReport),
    // returned results don't cover expected cases
    #[error("Result error")]
    ResultError(NamedRows),
    #[error("Sequence {0} is exhausted")]
    SequenceExhausted(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;

pub type OpResult = Result<()>;
