pub mod artifact_download;
pub mod artifact_info;
pub mod generate_family;
pub mod generate_image;
pub mod status;
