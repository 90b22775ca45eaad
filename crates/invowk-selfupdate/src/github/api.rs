//! Wire types for the GitHub Releases API.
//!
//! Carries the fields the update flow needs (`html_url`, `created_at`,
//! asset `content_type`) beyond the bare minimum of tag and asset list.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    pub tag_name: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub prerelease: bool,
    #[serde(default)]
    pub draft: bool,
    #[serde(default)]
    pub assets: Vec<Asset>,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Asset {
    pub name: String,
    #[serde(default)]
    pub browser_download_url: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub content_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_release_with_assets() {
        let json = r#"{
            "tag_name": "v1.2.3",
            "name": "Release 1.2.3",
            "prerelease": false,
            "draft": false,
            "html_url": "https://github.com/acme/invowk/releases/v1.2.3",
            "created_at": "2026-01-01T00:00:00Z",
            "assets": [
                {"name": "invowk_1.2.3_linux_x86_64.tar.gz", "browser_download_url": "https://example.com/a.tar.gz", "size": 1234, "content_type": "application/gzip"}
            ]
        }"#;
        let release: Release = serde_json::from_str(json).unwrap();
        assert_eq!(release.tag_name, "v1.2.3");
        assert_eq!(release.assets.len(), 1);
        assert_eq!(release.assets[0].size, 1234);
    }
}
