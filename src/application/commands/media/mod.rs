mod path;
mod service;
mod upload;

pub use path::{sanitize_file_name, sanitize_object_path};
pub use service::MediaCommandService;
pub use upload::UploadImageCommand;
