mod client;
mod listing;

pub use client::{ApiError, ThreadApiClient};
pub use listing::{ApiComment, ApiPost, ApiThread, Listing, Preview, PreviewImage, Thing};
