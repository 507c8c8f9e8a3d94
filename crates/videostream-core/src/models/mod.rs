pub mod session;
pub mod upload;
pub mod video;

pub use session::{CookieMutation, Session, SessionCookies};
pub use upload::UploadPhase;
pub use video::{NewVideoRecord, VideoRecord};
