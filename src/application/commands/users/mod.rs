mod bootstrap;
mod login;
mod logout;
mod password;
mod service;

pub use bootstrap::BootstrapAdminCommand;
pub use login::{LoginCommand, LoginResult};
pub use service::UserCommandService;
