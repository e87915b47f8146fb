mod error;
mod flat;
mod http;
mod models;
mod tree;

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};

use crate::config::TokenProvider;

pub use error::{DownloadError, Result};
pub use flat::FlatDataDownloader;
pub use http::{HttpClient, HttpResponse, ReqwestClient};
pub use tree::{TreeDownloader, WILDCARD_LABEL};

/// Headers sent with every request.
///
/// `Authorization` is always present: `token <value>` when a token is
/// configured, empty otherwise.
pub fn request_headers(tokens: &dyn TokenProvider) -> Result<HeaderMap> {
    let authorization = match tokens.token() {
        Some(token) => HeaderValue::from_str(&format!("token {token}"))?,
        None => HeaderValue::from_static(""),
    };

    let mut headers = HeaderMap::with_capacity(2);
    headers.insert(AUTHORIZATION, authorization);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(headers)
}

/// Issue one GET and hand back the body of a 200 response.
pub(crate) async fn fetch_ok(client: &dyn HttpClient, url: &str, tokens: &dyn TokenProvider) -> Result<String> {
    let headers = request_headers(tokens)?;
    let response = client.get(url, headers).await?;
    ensure_ok(response.status())?;
    Ok(response.body().to_string())
}

/// Anything but 200 aborts the fetch.
pub fn ensure_ok(status: StatusCode) -> Result<()> {
    if status == StatusCode::OK {
        Ok(())
    } else {
        Err(DownloadError::Status(status))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StaticToken;

    #[test]
    fn authorization_is_empty_without_token() {
        let headers = request_headers(&StaticToken::none()).unwrap();
        assert_eq!(headers[AUTHORIZATION], "");
        assert_eq!(headers[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn authorization_carries_token() {
        let headers = request_headers(&StaticToken::new("ghp_secret")).unwrap();
        assert_eq!(headers[AUTHORIZATION], "token ghp_secret");
        assert_eq!(headers[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn token_is_sent_untrimmed() {
        let headers = request_headers(&StaticToken::new(" abc ")).unwrap();
        assert_eq!(headers[AUTHORIZATION], "token  abc ");
    }

    #[test]
    fn token_with_newline_is_rejected() {
        let err = request_headers(&StaticToken::new("abc\ndef")).unwrap_err();
        assert!(matches!(err, DownloadError::InvalidHeader(_)));
    }

    #[test]
    fn only_200_passes() {
        assert!(ensure_ok(StatusCode::OK).is_ok());
        for status in [StatusCode::NO_CONTENT, StatusCode::NOT_MODIFIED, StatusCode::UNAUTHORIZED] {
            assert!(matches!(ensure_ok(status), Err(DownloadError::Status(s)) if s == status));
        }
    }
}
