use ckb_rosetta_error::{Error, ErrorKind};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// The error body of every failed request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorObject {
    pub code: i32,
    pub message: String,
    pub retriable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl From<ErrorKind> for ErrorObject {
    fn from(kind: ErrorKind) -> Self {
        ErrorObject {
            code: kind.code(),
            message: kind.message().to_owned(),
            retriable: kind.retriable(),
            details: None,
        }
    }
}

impl From<&Error> for ErrorObject {
    fn from(err: &Error) -> Self {
        let mut object = ErrorObject::from(err.kind());
        object.details = err.details().map(|details| json!({ "error": details }));
        object
    }
}

impl ErrorObject {
    /// All error kinds, as listed by `/network/options`.
    pub fn all() -> Vec<ErrorObject> {
        ErrorKind::ALL.iter().copied().map(Into::into).collect()
    }
}
