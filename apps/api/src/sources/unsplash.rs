//! Unsplash photo search and download tracking.
//!
//! Unsplash's API terms require a `GET /photos/:id/download` each time a photo
//! is actually used, and visible photographer attribution next to the photo.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::blog::models::ImageData;
use crate::sources::{ensure_success, PhotoSource, SourceError};

const UNSPLASH_API_URL: &str = "https://api.unsplash.com";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    id: String,
    urls: PhotoUrls,
    alt_description: Option<String>,
    description: Option<String>,
    user: PhotoUser,
    links: PhotoLinks,
}

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    regular: String,
}

#[derive(Debug, Deserialize)]
struct PhotoUser {
    name: String,
    username: String,
}

#[derive(Debug, Deserialize)]
struct PhotoLinks {
    download: String,
}

impl From<Photo> for ImageData {
    fn from(photo: Photo) -> Self {
        Self {
            id: photo.id,
            url: photo.urls.regular,
            alt: photo
                .alt_description
                .or(photo.description)
                .unwrap_or_default(),
            photographer: photo.user.name,
            photographer_username: photo.user.username,
            download_url: photo.links.download,
            relevance_score: None,
        }
    }
}

#[derive(Clone)]
pub struct UnsplashClient {
    client: Client,
    access_key: Option<String>,
}

impl UnsplashClient {
    pub fn new(client: Client, access_key: Option<String>) -> Self {
        Self { client, access_key }
    }

    fn auth_header(&self) -> Result<String, SourceError> {
        self.access_key
            .as_deref()
            .map(|key| format!("Client-ID {key}"))
            .ok_or(SourceError::NotConfigured("Unsplash"))
    }
}

#[async_trait]
impl PhotoSource for UnsplashClient {
    async fn search_photos(
        &self,
        query: &str,
        per_page: u32,
    ) -> Result<Vec<ImageData>, SourceError> {
        let auth = self.auth_header()?;
        let per_page = per_page.to_string();

        let response = self
            .client
            .get(format!("{UNSPLASH_API_URL}/search/photos"))
            .query(&[
                ("query", query),
                ("page", "1"),
                ("per_page", per_page.as_str()),
                ("orientation", "landscape"),
            ])
            .header("Authorization", auth)
            .header("Accept-Version", "v1")
            .send()
            .await?;

        let body: SearchResponse = ensure_success(response).await?.json().await?;

        Ok(body.results.into_iter().map(ImageData::from).collect())
    }

    async fn track_download(&self, photo_id: &str) -> Result<(), SourceError> {
        let auth = self.auth_header()?;

        let response = self
            .client
            .get(format!("{UNSPLASH_API_URL}/photos/{photo_id}/download"))
            .header("Authorization", auth)
            .header("Accept-Version", "v1")
            .send()
            .await?;

        ensure_success(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_FIXTURE: &str = r#"{
        "total": 2,
        "total_pages": 1,
        "results": [
            {
                "id": "abc123",
                "alt_description": "solar panels on a red roof",
                "description": null,
                "urls": {"regular": "https://images.unsplash.com/photo-abc123?w=1080"},
                "user": {"name": "Jane Doe", "username": "janedoe"},
                "links": {"download": "https://unsplash.com/photos/abc123/download"}
            },
            {
                "id": "def456",
                "alt_description": null,
                "description": "Wind farm at dusk",
                "urls": {"regular": "https://images.unsplash.com/photo-def456?w=1080"},
                "user": {"name": "John Roe", "username": "jroe"},
                "links": {"download": "https://unsplash.com/photos/def456/download"}
            }
        ]
    }"#;

    #[test]
    fn test_photo_maps_to_image_data() {
        let body: SearchResponse = serde_json::from_str(SEARCH_FIXTURE).unwrap();
        let images: Vec<ImageData> = body.results.into_iter().map(ImageData::from).collect();

        assert_eq!(images.len(), 2);
        assert_eq!(images[0].id, "abc123");
        assert_eq!(images[0].alt, "solar panels on a red roof");
        assert_eq!(images[0].photographer_username, "janedoe");
        assert_eq!(
            images[0].download_url,
            "https://unsplash.com/photos/abc123/download"
        );
        assert!(images[0].relevance_score.is_none());
    }

    #[test]
    fn test_alt_falls_back_to_description() {
        let body: SearchResponse = serde_json::from_str(SEARCH_FIXTURE).unwrap();
        let images: Vec<ImageData> = body.results.into_iter().map(ImageData::from).collect();
        assert_eq!(images[1].alt, "Wind farm at dusk");
    }

    #[tokio::test]
    async fn test_missing_key_is_not_configured() {
        let client = UnsplashClient::new(Client::new(), None);
        let err = client.search_photos("solar", 5).await.unwrap_err();
        assert!(matches!(err, SourceError::NotConfigured("Unsplash")));
        let err = client.track_download("abc123").await.unwrap_err();
        assert!(matches!(err, SourceError::NotConfigured("Unsplash")));
    }
}
