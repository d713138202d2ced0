//! Where timetable data is loaded from.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use tracing::info;

use super::error::TimetableError;
use super::store::TimetableStore;

/// Request timeout for remote timetable sources.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// A timetable location: a local file or an HTTP(S) URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimetableSource {
    File(PathBuf),
    Url(String),
}

impl TimetableSource {
    /// Interpret a configured location.
    ///
    /// Anything starting with `http://` or `https://` is a URL; everything
    /// else is a file path.
    ///
    /// # Examples
    ///
    /// ```
    /// use rush_runner::stations::TimetableSource;
    ///
    /// assert!(matches!(TimetableSource::parse("stations.json"), TimetableSource::File(_)));
    /// assert!(matches!(
    ///     TimetableSource::parse("https://example.com/stations.json"),
    ///     TimetableSource::Url(_)
    /// ));
    /// ```
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            Self::Url(location.to_string())
        } else {
            Self::File(PathBuf::from(location))
        }
    }

    /// Load and parse the timetable data.
    pub async fn load(&self) -> Result<TimetableStore, TimetableError> {
        let json = match self {
            Self::File(path) => std::fs::read_to_string(path).map_err(|source| {
                TimetableError::Io {
                    path: path.display().to_string(),
                    source,
                }
            })?,
            Self::Url(url) => fetch(url).await?,
        };

        let store = TimetableStore::from_json_str(&json)?;
        info!(source = %self, stations = store.len(), "loaded timetable data");
        Ok(store)
    }
}

async fn fetch(url: &str) -> Result<String, TimetableError> {
    let http = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
    let response = http.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(TimetableError::Status {
            status: status.as_u16(),
        });
    }

    Ok(response.text().await?)
}

impl fmt::Display for TimetableSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StationId;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn parse_locations() {
        assert_eq!(
            TimetableSource::parse("data/stations.json"),
            TimetableSource::File(PathBuf::from("data/stations.json"))
        );
        assert_eq!(
            TimetableSource::parse("http://localhost/s.json"),
            TimetableSource::Url("http://localhost/s.json".to_string())
        );
    }

    #[tokio::test]
    async fn load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"ueno": {{"stationName": "Ueno", "lineName": "Keihin-Tohoku Line",
                "latitude": 35.7138, "longitude": 139.7770}}}}"#
        )
        .unwrap();

        let source = TimetableSource::File(file.path().to_path_buf());
        let store = source.load().await.unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.get(&StationId::parse("ueno").unwrap()).is_some());
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let source = TimetableSource::parse("/nonexistent/stations.json");
        let err = source.load().await.unwrap_err();
        assert!(matches!(err, TimetableError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/stations.json"));
    }

    #[tokio::test]
    async fn invalid_file_is_json_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let source = TimetableSource::File(file.path().to_path_buf());
        assert!(matches!(
            source.load().await,
            Err(TimetableError::Json(_))
        ));
    }

    const UENO_JSON: &str = r#"{"ueno": {"stationName": "Ueno", "lineName": "Yamanote Line",
        "latitude": 35.7138, "longitude": 139.7770}}"#;

    /// Serve `stations.json` on an ephemeral local port; other paths are 404.
    async fn serve_stations() -> String {
        let app = axum::Router::new()
            .route("/stations.json", axum::routing::get(|| async { UENO_JSON }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn load_from_url() {
        let base = serve_stations().await;
        let source = TimetableSource::parse(&format!("{base}/stations.json"));
        assert!(matches!(source, TimetableSource::Url(_)));

        let store = source.load().await.unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.first().unwrap().name, "Ueno");
    }

    #[tokio::test]
    async fn url_not_found_is_status_error() {
        let base = serve_stations().await;
        let source = TimetableSource::parse(&format!("{base}/missing.json"));

        let err = source.load().await.unwrap_err();
        assert!(matches!(err, TimetableError::Status { status: 404 }));
    }
}
