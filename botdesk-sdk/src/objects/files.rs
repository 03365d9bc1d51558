//! Remote file resolution and upload responses.

use serde::{Deserialize, Serialize};
use url::Url;

/// Response for `GET /bots/{bot_id}/files/{file_id}`.
///
/// The URL is time-limited; treat it as display-only and re-resolve rather
/// than persisting it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileUrlResponse {
    pub url: Url,
}

/// Response for `POST /bots/{bot_id}/upload`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub url: Url,
}
