use tonic::{Request, Status};

/// Metadata key carrying the correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Server-side interceptor that guarantees every call carries an `x-request-id`.
///
/// A caller-supplied id is kept as-is; otherwise a UUID v4 is generated and
/// written into the request metadata so handlers can log it.
///
/// # Example
/// ```ignore
/// use grpc_server::RequestIdInterceptor;
/// use tonic::service::interceptor::InterceptedService;
///
/// let svc = InterceptedService::new(VectorStoreServiceServer::new(imp), RequestIdInterceptor::new());
/// ```
#[derive(Clone, Debug, Default)]
pub struct RequestIdInterceptor;

impl RequestIdInterceptor {
    pub fn new() -> Self {
        Self
    }

    /// Read the correlation id from a request, if present and printable.
    pub fn request_id<T>(request: &Request<T>) -> Option<&str> {
        request
            .metadata()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
    }
}

impl tonic::service::Interceptor for RequestIdInterceptor {
    fn call(&mut self, mut request: Request<()>) -> Result<Request<()>, Status> {
        if let Some(existing) = Self::request_id(&request) {
            tracing::debug!(request_id = %existing, "Incoming gRPC request");
            return Ok(request);
        }

        let request_id = uuid::Uuid::new_v4().to_string();
        request.metadata_mut().insert(
            REQUEST_ID_HEADER,
            request_id
                .parse()
                .map_err(|_| Status::internal("Failed to create request ID"))?,
        );

        tracing::debug!(request_id = %request_id, "Incoming gRPC request");

        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonic::service::Interceptor;

    #[test]
    fn test_generates_request_id_when_missing() {
        let mut interceptor = RequestIdInterceptor::new();
        let req = interceptor.call(Request::new(())).unwrap();

        let id = RequestIdInterceptor::request_id(&req).unwrap();
        assert!(uuid::Uuid::parse_str(id).is_ok());
    }

    #[test]
    fn test_keeps_caller_request_id() {
        let mut interceptor = RequestIdInterceptor::new();
        let mut request = Request::new(());
        request
            .metadata_mut()
            .insert(REQUEST_ID_HEADER, "caller-123".parse().unwrap());

        let req = interceptor.call(request).unwrap();
        assert_eq!(RequestIdInterceptor::request_id(&req), Some("caller-123"));
    }
}
