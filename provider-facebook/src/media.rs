//! Albums, photos and videos

use async_trait::async_trait;
use bridge_traits::http::{FilePart, MultipartForm};
use bytes::Bytes;
use tracing::{info, instrument};

use crate::error::Result;
use crate::graph::GraphApi;
use crate::types::{Album, ImageType, Photo, Video};

/// Media operations of the Graph API.
///
/// Every operation requires an authorized client and fails with
/// [`FacebookError::AuthorizationRequired`](crate::FacebookError::AuthorizationRequired)
/// before any request is made otherwise. Methods without an explicit owner act
/// on the authenticated user (`me`).
#[async_trait]
pub trait MediaOperations: Send + Sync {
    async fn get_albums(&self) -> Result<Vec<Album>> {
        self.get_albums_for("me").await
    }

    async fn get_albums_for(&self, user_id: &str) -> Result<Vec<Album>>;

    async fn get_album(&self, album_id: &str) -> Result<Album>;

    /// Returns the id of the new album.
    async fn create_album(&self, name: &str, description: &str) -> Result<String> {
        self.create_album_for("me", name, description).await
    }

    async fn create_album_for(&self, owner_id: &str, name: &str, description: &str) -> Result<String>;

    async fn get_album_image(&self, album_id: &str) -> Result<Bytes> {
        self.get_album_image_with_type(album_id, ImageType::Normal).await
    }

    async fn get_album_image_with_type(&self, album_id: &str, image_type: ImageType) -> Result<Bytes>;

    async fn get_photos(&self, album_id: &str) -> Result<Vec<Photo>>;

    async fn get_photo(&self, photo_id: &str) -> Result<Photo>;

    async fn get_photo_image(&self, photo_id: &str) -> Result<Bytes> {
        self.get_photo_image_with_type(photo_id, ImageType::Normal).await
    }

    async fn get_photo_image_with_type(&self, photo_id: &str, image_type: ImageType) -> Result<Bytes>;

    /// Uploads to the application's default album. Returns the photo id.
    async fn post_photo(&self, photo: FilePart) -> Result<String>;

    async fn post_photo_with_caption(&self, photo: FilePart, caption: &str) -> Result<String>;

    async fn post_photo_to_album(&self, album_id: &str, photo: FilePart) -> Result<String>;

    async fn post_photo_to_album_with_caption(
        &self,
        album_id: &str,
        photo: FilePart,
        caption: &str,
    ) -> Result<String>;

    async fn get_videos(&self) -> Result<Vec<Video>> {
        self.get_videos_for("me").await
    }

    async fn get_videos_for(&self, user_id: &str) -> Result<Vec<Video>>;

    async fn get_video(&self, video_id: &str) -> Result<Video>;

    async fn get_video_image(&self, video_id: &str) -> Result<Bytes> {
        self.get_video_image_with_type(video_id, ImageType::Normal).await
    }

    async fn get_video_image_with_type(&self, video_id: &str, image_type: ImageType) -> Result<Bytes>;

    /// Uploads through the dedicated video host. Returns the video id.
    async fn post_video(&self, video: FilePart) -> Result<String>;

    async fn post_video_with_details(
        &self,
        video: FilePart,
        title: &str,
        description: &str,
    ) -> Result<String>;
}

/// [`MediaOperations`] backed by [`GraphApi`].
#[derive(Clone)]
pub struct MediaApi {
    graph: GraphApi,
}

impl MediaApi {
    pub fn new(graph: GraphApi) -> Self {
        Self { graph }
    }

    fn require_authorization(&self) -> Result<()> {
        self.graph.client().require_authorization()?;
        Ok(())
    }

    async fn upload_photo(&self, target_id: &str, form: MultipartForm) -> Result<String> {
        self.require_authorization()?;
        let id = self.graph.publish(target_id, "photos", form).await?;
        info!(photo_id = %id, owner_id = target_id, "Posted photo");
        Ok(id)
    }

    async fn upload_video(&self, form: MultipartForm) -> Result<String> {
        self.require_authorization()?;
        let id = self
            .graph
            .publish_to_url(self.graph.video_upload_url(), form)
            .await?;
        info!(video_id = %id, "Posted video");
        Ok(id)
    }
}

#[async_trait]
impl MediaOperations for MediaApi {
    #[instrument(skip(self))]
    async fn get_albums_for(&self, user_id: &str) -> Result<Vec<Album>> {
        self.require_authorization()?;
        let albums = self.graph.fetch_connections(user_id, "albums").await?;
        info!("Fetched {} albums", albums.len());
        Ok(albums)
    }

    #[instrument(skip(self))]
    async fn get_album(&self, album_id: &str) -> Result<Album> {
        self.require_authorization()?;
        self.graph.fetch_object(album_id).await
    }

    #[instrument(skip(self, description))]
    async fn create_album_for(&self, owner_id: &str, name: &str, description: &str) -> Result<String> {
        self.require_authorization()?;
        let form = MultipartForm::new()
            .text("name", name)
            .text("message", description);
        let id = self.graph.publish(owner_id, "albums", form).await?;
        info!(album_id = %id, "Created album");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn get_album_image_with_type(&self, album_id: &str, image_type: ImageType) -> Result<Bytes> {
        self.require_authorization()?;
        self.graph.fetch_image(album_id, "picture", image_type).await
    }

    #[instrument(skip(self))]
    async fn get_photos(&self, album_id: &str) -> Result<Vec<Photo>> {
        self.require_authorization()?;
        let photos = self.graph.fetch_connections(album_id, "photos").await?;
        info!("Fetched {} photos", photos.len());
        Ok(photos)
    }

    #[instrument(skip(self))]
    async fn get_photo(&self, photo_id: &str) -> Result<Photo> {
        self.require_authorization()?;
        self.graph.fetch_object(photo_id).await
    }

    #[instrument(skip(self))]
    async fn get_photo_image_with_type(&self, photo_id: &str, image_type: ImageType) -> Result<Bytes> {
        self.require_authorization()?;
        self.graph.fetch_image(photo_id, "picture", image_type).await
    }

    #[instrument(skip(self, photo), fields(file_name = %photo.file_name))]
    async fn post_photo(&self, photo: FilePart) -> Result<String> {
        self.upload_photo("me", MultipartForm::new().file("source", photo))
            .await
    }

    #[instrument(skip(self, photo, caption), fields(file_name = %photo.file_name))]
    async fn post_photo_with_caption(&self, photo: FilePart, caption: &str) -> Result<String> {
        let form = MultipartForm::new()
            .file("source", photo)
            .text("message", caption);
        self.upload_photo("me", form).await
    }

    #[instrument(skip(self, photo), fields(file_name = %photo.file_name))]
    async fn post_photo_to_album(&self, album_id: &str, photo: FilePart) -> Result<String> {
        self.upload_photo(album_id, MultipartForm::new().file("source", photo))
            .await
    }

    #[instrument(skip(self, photo, caption), fields(file_name = %photo.file_name))]
    async fn post_photo_to_album_with_caption(
        &self,
        album_id: &str,
        photo: FilePart,
        caption: &str,
    ) -> Result<String> {
        let form = MultipartForm::new()
            .file("source", photo)
            .text("message", caption);
        self.upload_photo(album_id, form).await
    }

    #[instrument(skip(self))]
    async fn get_videos_for(&self, user_id: &str) -> Result<Vec<Video>> {
        self.require_authorization()?;
        let videos = self.graph.fetch_connections(user_id, "videos").await?;
        info!("Fetched {} videos", videos.len());
        Ok(videos)
    }

    #[instrument(skip(self))]
    async fn get_video(&self, video_id: &str) -> Result<Video> {
        self.require_authorization()?;
        self.graph.fetch_object(video_id).await
    }

    #[instrument(skip(self))]
    async fn get_video_image_with_type(&self, video_id: &str, image_type: ImageType) -> Result<Bytes> {
        self.require_authorization()?;
        self.graph.fetch_image(video_id, "picture", image_type).await
    }

    #[instrument(skip(self, video), fields(file_name = %video.file_name))]
    async fn post_video(&self, video: FilePart) -> Result<String> {
        self.upload_video(MultipartForm::new().file("file", video))
            .await
    }

    #[instrument(skip(self, video, description), fields(file_name = %video.file_name))]
    async fn post_video_with_details(
        &self,
        video: FilePart,
        title: &str,
        description: &str,
    ) -> Result<String> {
        let form = MultipartForm::new()
            .file("file", video)
            .text("title", title)
            .text("description", description);
        self.upload_video(form).await
    }
}
