use crate::fock::BasisLabel;
use miette::Diagnostic;

#[derive(thiserror::Error, Debug, Diagnostic)]
/// Errors raised while assembling operators, sectors and matrices, before any evaluation
pub enum BuildError {
    #[error(transparent)]
    Lattice(#[from] vca_lattice::LatticeError),
    #[error("basis label {0} is not in the basis table")]
    MissingLabel(BasisLabel),
    #[error("{what}: expected dimension {expected}, found {found}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("{0}")]
    Model(String),
}

#[derive(thiserror::Error, Debug, Diagnostic)]
/// Error for IO events
pub enum IOError {
    #[error("IO failure: {0}")]
    IO(#[from] std::io::Error),
}
