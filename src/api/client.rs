//! HTTP client for the course service

use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;

use super::CourseService;
use super::error::CourseApiError;
use super::models::{
    AddQuestionRequest, AddReviewRequest, ContentResponse, CourseContentItem,
    CurrentUserResponse, ProgressResponse, SignedVideoResponse, User, VideoSource,
};
use crate::config::Config;
use crate::config::credentials::CredentialStore;
use crate::progress::CourseProgress;

/// Course service client
pub struct CourseClient {
    /// HTTP client
    client: Client,
    /// Base URL of the course service
    server_url: String,
    /// Base URL of the media host
    video_url: String,
    /// Token source, read on every request
    credentials: Box<dyn CredentialStore>,
}

impl CourseClient {
    /// Header carrying the access token
    const ACCESS_HEADER: &'static str = "access-token";
    /// Header carrying the refresh token
    const REFRESH_HEADER: &'static str = "refresh-token";

    /// Create a client for the configured service
    pub fn new(
        config: &Config,
        credentials: Box<dyn CredentialStore>,
    ) -> Result<Self, CourseApiError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| CourseApiError::ClientBuild(e.to_string()))?;

        Ok(Self {
            client,
            server_url: config.server_url.trim_end_matches('/').to_string(),
            video_url: config.video_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    /// Course service URL for the given path segments
    fn endpoint(&self, segments: &[&str]) -> Result<Url, CourseApiError> {
        join_segments(&self.server_url, segments)
    }

    /// Attach both token headers. Empty tokens are sent as-is.
    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        let tokens = self.credentials.tokens();
        builder
            .header(Self::ACCESS_HEADER, tokens.access)
            .header(Self::REFRESH_HEADER, tokens.refresh)
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, CourseApiError> {
        let response = self.authorized(builder).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(CourseApiError::ApiError {
                status: 401,
                message: "Invalid or expired tokens".to_string(),
            });
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CourseApiError::ApiError { status: status.as_u16(), message });
        }

        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, CourseApiError> {
        tracing::debug!("GET {}", url);
        let response = self.send(self.client.get(url)).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl CourseService for CourseClient {
    async fn fetch_progress(&self) -> Result<Vec<CourseProgress>, CourseApiError> {
        let url = self.endpoint(&["user", "progress"])?;
        let response: ProgressResponse = self.get_json(url).await?;
        Ok(response.into_records())
    }

    async fn fetch_course_content(
        &self,
        course_id: &str,
    ) -> Result<Vec<CourseContentItem>, CourseApiError> {
        let url = self.endpoint(&["get-course-content", course_id])?;
        let response: ContentResponse = self.get_json(url).await?;
        Ok(response.content)
    }

    async fn add_question(&self, request: &AddQuestionRequest) -> Result<(), CourseApiError> {
        let url = self.endpoint(&["add-question"])?;
        tracing::debug!("PUT {}", url);
        self.send(self.client.put(url).json(request)).await?;
        Ok(())
    }

    async fn add_review(
        &self,
        course_id: &str,
        request: &AddReviewRequest,
    ) -> Result<(), CourseApiError> {
        let url = self.endpoint(&["add-review", course_id])?;
        tracing::debug!("PUT {}", url);
        self.send(self.client.put(url).json(request)).await?;
        Ok(())
    }

    async fn mark_chapter(&self, course_id: &str, chapter_id: &str) -> Result<(), CourseApiError> {
        let url = self.endpoint(&["user", "mark-chapter"])?;
        tracing::debug!("PUT {} course={} chapter={}", url, course_id, chapter_id);
        let builder = self
            .client
            .put(url)
            .query(&[("courseId", course_id), ("chapterId", chapter_id)])
            .json(&serde_json::json!({}));
        self.send(builder).await?;
        Ok(())
    }

    async fn fetch_video_source(&self, video_ref: &str) -> Result<VideoSource, CourseApiError> {
        // Nested media paths keep their separators; each part is still escaped
        let mut segments = vec!["api", "files"];
        segments.extend(video_ref.split('/').filter(|s| !s.is_empty()));
        let url = join_segments(&self.video_url, &segments)?;
        let response: SignedVideoResponse = self.get_json(url).await?;
        if response.url.is_empty() {
            return Err(CourseApiError::UnexpectedResponse("empty video url".to_string()));
        }

        let tokens = self.credentials.tokens();
        Ok(VideoSource {
            uri: resolve_video_uri(&self.video_url, &response.url),
            access_token: tokens.access,
            refresh_token: tokens.refresh,
        })
    }

    async fn fetch_current_user(&self) -> Result<User, CourseApiError> {
        let response: CurrentUserResponse = self.get_json(self.endpoint(&["me"])?).await?;
        Ok(response.user)
    }
}

/// Append path segments to a base URL, percent-encoding each one
fn join_segments(base: &str, segments: &[&str]) -> Result<Url, CourseApiError> {
    let mut url =
        Url::parse(base).map_err(|e| CourseApiError::InvalidUrl(format!("{}: {}", base, e)))?;
    url.path_segments_mut()
        .map_err(|_| CourseApiError::InvalidUrl(format!("{}: cannot be a base", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Absolute URLs are kept, anything else is served from the media host
pub fn resolve_video_uri(video_host: &str, url: &str) -> String {
    if url.starts_with("http") {
        url.to_string()
    } else {
        format!("{}{}", video_host.trim_end_matches('/'), url)
    }
}
