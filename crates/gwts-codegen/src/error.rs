use gwts_core::GatewayError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("error analysing proto files")]
    Analysis(#[source] GatewayError),

    #[error("error compiling templates")]
    Template(#[source] tera::Error),

    #[error("error generating ts file for {file}")]
    Render {
        file: String,
        #[source]
        source: tera::Error,
    },

    #[error("error generating fetch module at {path}")]
    SharedModule {
        path: String,
        #[source]
        source: tera::Error,
    },
}

pub type Result<T> = std::result::Result<T, GenerateError>;
