pub mod archive;
pub mod create;
pub mod edit;
pub mod list;
pub mod modify;
pub mod show;

pub use archive::{archive, clone};
pub use create::create;
pub use edit::edit;
pub use list::list;
pub use modify::{delete, description, fork};
pub use show::{content, files, info};
