/// Context encoding errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EncodeError {
    #[error("attribute '{attribute}' cannot be encoded from a {found} value")]
    InvalidAttribute { attribute: String, found: String },
}
