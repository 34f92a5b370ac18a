mod content;
mod readiness;
mod upload;

#[rustfmt::skip]
pub use {
    content::ContentService,
    readiness::ReadinessService,
    upload::UploadService,
};
