use axum::{
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ckb_rosetta_client::Error as ClientError;
use ckb_rosetta_error::{Error, ErrorKind};
use ckb_rosetta_logger::warn;
use ckb_rosetta_types::ErrorObject;
use serde::de::DeserializeOwned;

/// A failed request, answered with HTTP 500 and the Rosetta error object.
#[derive(Debug)]
pub struct RpcError(pub Error);

impl From<Error> for RpcError {
    fn from(err: Error) -> Self {
        RpcError(err)
    }
}

impl From<ErrorKind> for RpcError {
    fn from(kind: ErrorKind) -> Self {
        RpcError(kind.into())
    }
}

impl IntoResponse for RpcError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorObject::from(&self.0)),
        )
            .into_response()
    }
}

/// Maps a failed node call to `RpcError`.
pub(crate) fn node_error(method: &str, err: ClientError) -> Error {
    warn!("node call {method} failed: {err}");
    ErrorKind::RpcError.reason(err)
}

/// The JSON body extractor, a body which does not decode fails with `DataParseError`.
pub struct RosettaJson<T>(pub T);

impl<T, S> FromRequest<S> for RosettaJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = RpcError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(RosettaJson(value)),
            Err(rejection) => Err(ErrorKind::DataParseError
                .reason(rejection.body_text())
                .into()),
        }
    }
}
