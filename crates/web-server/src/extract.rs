use axum::{
    async_trait,
    extract::{FromRequestParts, Path, Request},
    http::{request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// A primary key taken from the route's single `:id` segment.
///
/// Only plain decimal digits that fit in an `i64` are accepted. Anything else
/// (`abc`, `-1`, `+1`, `1.0`) is rejected with a bare 404, the same response
/// the router gives for a path it does not know, rather than a JSON error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| StatusCode::NOT_FOUND)?;
        parse_id(&raw).map(EntityId).ok_or(StatusCode::NOT_FOUND)
    }
}

/// Route middleware that keeps non-integer ids from matching for any method.
///
/// `EntityId` only runs for methods a route serves, so `POST /speakers/abc`
/// would otherwise answer 405. A bad id answers the same bare 404 as an
/// unknown path; requests without an `:id` segment pass through untouched.
pub async fn reject_non_integer_ids(request: Request, next: Next) -> Response {
    let (mut parts, body) = request.into_parts();
    let bad_id = match Path::<String>::from_request_parts(&mut parts, &()).await {
        Ok(Path(raw)) => parse_id(&raw).is_none(),
        Err(_) => false,
    };
    if bad_id {
        return StatusCode::NOT_FOUND.into_response();
    }
    next.run(Request::from_parts(parts, body)).await
}

pub fn parse_id(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::parse_id;

    #[test]
    fn accepts_unsigned_decimal_ids() {
        assert_eq!(parse_id("1"), Some(1));
        assert_eq!(parse_id("0"), Some(0));
        assert_eq!(parse_id("007"), Some(7));
        assert_eq!(parse_id("9223372036854775807"), Some(i64::MAX));
    }

    #[test]
    fn rejects_everything_else() {
        for raw in ["", "abc", "-1", "+1", "1.0", " 1", "1e3", "9223372036854775808"] {
            assert_eq!(parse_id(raw), None, "{raw:?} should not match");
        }
    }
}
