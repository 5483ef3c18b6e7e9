//! The client surface: method shortcuts over a shared request routine.

use serde::Serialize;

use crate::encode::{self, Method, RequestDescriptor};
use crate::error::DavenportError;
use crate::interpret::{self, Completion};
use crate::transport::{ReqwestTransport, Transport};

/// CouchDB-style HTTP helper.
///
/// The client is generic over a [`Transport`] implementation so tests can
/// substitute a double for the real HTTP stack. It holds no per-request
/// state: every call builds its own descriptor and resolves to exactly one
/// [`Completion`] or [`DavenportError`].
#[derive(Debug, Clone)]
pub struct Client<T: Transport> {
    transport: T,
}

impl Client<ReqwestTransport> {
    /// Creates a client backed by the production reqwest transport.
    ///
    /// # Panics
    ///
    /// Panics if the reqwest client cannot be built.
    #[must_use]
    pub fn new() -> Self {
        Self::with_transport(ReqwestTransport::new())
    }
}

impl<T: Transport + Default> Default for Client<T> {
    fn default() -> Self {
        Self::with_transport(T::default())
    }
}

impl<T: Transport> Client<T> {
    /// Creates a client over the given transport.
    #[must_use]
    pub const fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    /// Returns a reference to the underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Issues a request with an optional structured payload.
    ///
    /// GET and HEAD payloads become stringified query parameters; all other
    /// payloads become JSON bodies. See [`encode::build_request`].
    ///
    /// # Errors
    ///
    /// [`DavenportError::Encode`] if the payload cannot be serialized (no
    /// request is issued), [`DavenportError::Transport`] if the transport
    /// fails, or a classification error from [`interpret::interpret`].
    pub async fn request<D: Serialize + Sync + ?Sized>(
        &self,
        method: Method,
        url: &str,
        data: Option<&D>,
    ) -> Result<Completion, DavenportError> {
        let request = encode::build_request(method, url, data)?;
        self.issue(request).await
    }

    /// Escape hatch: executes a pre-built descriptor, skipping encoding and
    /// applying only response interpretation.
    ///
    /// # Errors
    ///
    /// [`DavenportError::Transport`] if the transport fails, or a
    /// classification error from [`interpret::interpret`].
    pub async fn issue(&self, request: RequestDescriptor) -> Result<Completion, DavenportError> {
        tracing::debug!(method = %request.method, url = %request.url, "issuing request");
        let response = self.transport.execute(request).await?;
        tracing::debug!(status = response.status(), "interpreting response");
        interpret::interpret(response)
    }

    /// GET without a payload.
    ///
    /// # Errors
    ///
    /// See [`Client::request`].
    pub async fn get(&self, url: &str) -> Result<Completion, DavenportError> {
        self.request::<()>(Method::Get, url, None).await
    }

    /// GET with query parameters.
    ///
    /// # Errors
    ///
    /// See [`Client::request`].
    pub async fn get_with_query<Q: Serialize + Sync + ?Sized>(
        &self,
        url: &str,
        query: &Q,
    ) -> Result<Completion, DavenportError> {
        self.request(Method::Get, url, Some(query)).await
    }

    /// HEAD without a payload.
    ///
    /// # Errors
    ///
    /// See [`Client::request`].
    pub async fn head(&self, url: &str) -> Result<Completion, DavenportError> {
        self.request::<()>(Method::Head, url, None).await
    }

    /// HEAD with query parameters.
    ///
    /// # Errors
    ///
    /// See [`Client::request`].
    pub async fn head_with_query<Q: Serialize + Sync + ?Sized>(
        &self,
        url: &str,
        query: &Q,
    ) -> Result<Completion, DavenportError> {
        self.request(Method::Head, url, Some(query)).await
    }

    /// POST with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`Client::request`].
    pub async fn post<B: Serialize + Sync + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<Completion, DavenportError> {
        self.request(Method::Post, url, Some(body)).await
    }

    /// PUT with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`Client::request`].
    pub async fn put<B: Serialize + Sync + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<Completion, DavenportError> {
        self.request(Method::Put, url, Some(body)).await
    }

    /// DELETE without a payload. Use [`Client::request`] for a DELETE that
    /// carries a body.
    ///
    /// # Errors
    ///
    /// See [`Client::request`].
    pub async fn delete(&self, url: &str) -> Result<Completion, DavenportError> {
        self.request::<()>(Method::Delete, url, None).await
    }
}
