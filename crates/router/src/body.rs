use crate::error::{BodyError, BoxError};
use crate::parser::{BodyParser, DefaultParser, IdentityParser, JsonAs};
use bytes::{Bytes, BytesMut};
use http_body::Body as HttpBody;
use http_body::{Frame, SizeHint};
use http_body_util::combinators::UnsyncBoxBody;
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::convert::Infallible;
use std::fmt;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::Mutex;

type ReqBody = UnsyncBoxBody<Bytes, BoxError>;

/// Request-bound capability that drains and parses the request body.
///
/// Clones share the same underlying body, which can be consumed once: every read after the
/// first fails with [`BodyError::Consumed`]. The drained size is capped by the router's
/// `max_body_size`.
#[derive(Clone)]
pub struct BodyReader {
    inner: Arc<Mutex<Option<ReqBody>>>,
    max_size: usize,
    default_parser: Arc<DefaultParser>,
}

impl BodyReader {
    pub(crate) fn new<B>(body: B, max_size: usize, default_parser: Arc<DefaultParser>) -> Self
    where
        B: HttpBody<Data = Bytes> + Send + 'static,
        B::Error: Into<BoxError>,
    {
        let body = UnsyncBoxBody::new(body.map_err(Into::into));
        Self { inner: Arc::new(Mutex::new(Some(body))), max_size, default_parser }
    }

    pub async fn can_consume(&self) -> bool {
        let guard = self.inner.lock().await;
        guard.is_some()
    }

    async fn take(&self) -> Result<ReqBody, BodyError> {
        let mut guard = self.inner.lock().await;
        guard.take().ok_or(BodyError::Consumed)
    }

    async fn read_text(&self) -> Result<String, BodyError> {
        let mut body = self.take().await?;
        let mut buf = BytesMut::new();

        while let Some(frame) = body.frame().await {
            let frame = frame.map_err(|source| BodyError::Read { source })?;
            let Ok(data) = frame.into_data() else {
                continue;
            };

            if buf.len() + data.len() > self.max_size {
                return Err(BodyError::too_large(self.max_size));
            }
            buf.extend_from_slice(&data);
        }

        match String::from_utf8(buf.to_vec()) {
            Ok(s) => Ok(s),
            Err(_) => Err(BodyError::NotUtf8),
        }
    }

    /// Drains the body and parses it with the router's default parser (json unless overridden)
    pub async fn parse(&self) -> Result<Value, BodyError> {
        let text = self.read_text().await?;
        self.default_parser.parse(text)
    }

    /// Drains the body and parses it with `parser`
    pub async fn parse_with<P: BodyParser>(&self, parser: P) -> Result<P::Output, BodyError> {
        let text = self.read_text().await?;
        parser.parse(text)
    }

    /// Drains the body as raw text; a body that is not valid UTF-8 fails with [`BodyError::NotUtf8`]
    pub async fn text(&self) -> Result<String, BodyError> {
        self.parse_with(IdentityParser).await
    }

    /// Drains the body and deserializes it as json into `T`
    pub async fn json<T: DeserializeOwned>(&self) -> Result<T, BodyError> {
        self.parse_with(JsonAs::<T>::new()).await
    }
}

impl fmt::Debug for BodyReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BodyReader").field("max_size", &self.max_size).finish_non_exhaustive()
    }
}

/// The body of a finished response, sent in one frame
#[derive(Debug, Default)]
pub struct ResponseBody {
    inner: Option<Bytes>,
}

impl ResponseBody {
    pub fn empty() -> Self {
        Self { inner: None }
    }

    pub fn once(bytes: Bytes) -> Self {
        if bytes.is_empty() { Self::empty() } else { Self { inner: Some(bytes) } }
    }
}

impl From<String> for ResponseBody {
    fn from(value: String) -> Self {
        Self::once(Bytes::from(value))
    }
}

impl From<&'static str> for ResponseBody {
    fn from(value: &'static str) -> Self {
        Self::once(Bytes::from_static(value.as_bytes()))
    }
}

impl From<()> for ResponseBody {
    fn from((): ()) -> Self {
        Self::empty()
    }
}

impl HttpBody for ResponseBody {
    type Data = Bytes;
    type Error = Infallible;

    fn poll_frame(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        Poll::Ready(self.get_mut().inner.take().map(|bytes| Ok(Frame::data(bytes))))
    }

    fn is_end_stream(&self) -> bool {
        self.inner.is_none()
    }

    fn size_hint(&self) -> SizeHint {
        match &self.inner {
            None => SizeHint::with_exact(0),
            Some(bytes) => SizeHint::with_exact(bytes.len() as u64),
        }
    }
}
