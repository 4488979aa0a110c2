//! API request helpers

use axum::extract::FromRequest;
use axum::extract::FromRequestParts;
use axum::extract::Json;
use axum::extract::Path;
use axum::extract::Query;
use axum::extract::Request;
use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::PathRejection;
use axum::extract::rejection::QueryRejection;
use axum::http::request::Parts;
use percent_encoding::percent_decode_str;
use serde::de::DeserializeOwned;
use unicode_normalization::UnicodeNormalization;

use super::Error;

/// Parse and normalize a slug
///
/// Surrounding slashes are removed and the slug is normalized to NFC, the way the CMS stores
/// them.
///
/// ```rust
/// let slug = "/some-slug";
/// assert_eq!(parse_slug(slug).unwrap(), "some-slug".to_string())
/// ```
pub fn parse_slug(slug: &str) -> Result<String, Error> {
    let slug = slug.trim().trim_matches('/');

    for ch in slug.chars() {
        if ch == '?' {
            return Err(Error::bad_request(r#"Slug can not contain "?""#));
        }

        if ch == '#' {
            return Err(Error::bad_request(r##"Slug can not contain "#""##));
        }
    }

    Ok(slug.nfc().collect())
}

/// Decode the raw path of a request URI
///
/// Invalid UTF-8 sequences are replaced, a path is only used to look things up
pub fn decode_path(path: &str) -> String {
    percent_decode_str(path).decode_utf8_lossy().into_owned()
}

fn parse_json<J>(json: Result<Json<J>, JsonRejection>) -> Result<J, Error> {
    match json {
        Ok(Json(json)) => Ok(json),
        Err(err) => match err {
            JsonRejection::JsonDataError(err) => {
                Err(Error::bad_request("Data error").with_description(err.body_text()))
            }
            JsonRejection::JsonSyntaxError(err) => {
                Err(Error::bad_request("JSON syntax error").with_description(err.body_text()))
            }
            JsonRejection::MissingJsonContentType(_err) => Err(Error::bad_request(
                "Missing `application/json` content type",
            )),
            JsonRejection::BytesRejection(err) => {
                Err(Error::bad_request("Invalid characters in JSON").with_description(err))
            }
            err => Err(Error::bad_request("Unknown JSON error").with_description(err)),
        },
    }
}

/// Wrapper for the JSON extractor
pub struct Form<F>(pub F);

impl<S, F> FromRequest<S> for Form<F>
where
    S: Send + Sync,
    F: DeserializeOwned,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        parse_json(Json::<F>::from_request(req, state).await).map(Form)
    }
}

fn parse_path<P>(path: Result<Path<P>, PathRejection>) -> Result<P, Error> {
    match path {
        Ok(Path(path)) => Ok(path),
        Err(err) => match err {
            PathRejection::FailedToDeserializePathParams(err) => {
                Err(Error::bad_request("Invalid path parameter").with_description(err))
            }
            PathRejection::MissingPathParams(err) => {
                Err(Error::bad_request("Missing path parameter").with_description(err))
            }
            err => Err(Error::bad_request("Unknown path error").with_description(err)),
        },
    }
}

/// Wrapper for the path extractor
pub struct PathParameters<P>(pub P);

impl<S, P> FromRequestParts<S> for PathParameters<P>
where
    S: Send + Sync,
    P: DeserializeOwned + Send,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        parse_path(Path::<P>::from_request_parts(parts, state).await).map(PathParameters)
    }
}

fn parse_query<Q>(query: Result<Query<Q>, QueryRejection>) -> Result<Q, Error> {
    match query {
        Ok(Query(query)) => Ok(query),
        Err(err) => match err {
            QueryRejection::FailedToDeserializeQueryString(err) => {
                Err(Error::bad_request("Invalid query parameter").with_description(err))
            }
            err => Err(Error::bad_request("Unknown query error").with_description(err)),
        },
    }
}

/// Wrapper for the query string extractor
pub struct QueryParameters<Q>(pub Q);

impl<S, Q> FromRequestParts<S> for QueryParameters<Q>
where
    S: Send + Sync,
    Q: DeserializeOwned,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        parse_query(Query::<Q>::from_request_parts(parts, state).await).map(QueryParameters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_slug() {
        let slug = "/some-slug";
        assert_eq!(parse_slug(slug).unwrap(), "some-slug".to_string());

        let slug = "some-slug/";
        assert_eq!(parse_slug(slug).unwrap(), "some-slug".to_string());

        let slug = "some-slug";
        assert_eq!(parse_slug(slug).unwrap(), slug.to_string());

        assert!(parse_slug("krakow?x=1").is_err());
        assert!(parse_slug("krakow#top").is_err());
    }

    #[test]
    fn test_parse_slug_normalizes() {
        // "ł" is not decomposable, "ó" is
        let decomposed = "wroc\u{142}aw-kr\u{6f}\u{301}l";
        assert_eq!("wroc\u{142}aw-kr\u{f3}l", parse_slug(decomposed).unwrap());
    }

    #[test]
    fn test_decode_path() {
        assert_eq!("/krak\u{f3}w", decode_path("/krak%C3%B3w"));
        assert_eq!("/seo-preview/gda%sk", decode_path("/seo-preview/gda%sk"));
    }
}
