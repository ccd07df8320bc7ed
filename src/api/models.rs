use serde::Deserialize;

/// Body of `POST /call/{provider}`.
///
/// Both fields default to empty: a missing `input` simply yields an empty
/// generation, and an unrecognized `setting` degrades to the bare preamble
/// downstream rather than failing the request.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub input: String,
    #[serde(default)]
    pub setting: String,
}
