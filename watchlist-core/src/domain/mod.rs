pub mod catalog;
pub mod data_stores;
pub mod email;
pub mod error;
pub mod forms;
pub mod movie;
pub mod password;
pub mod user;

pub use catalog::*;
pub use data_stores::*;
pub use email::*;
pub use error::*;
pub use forms::*;
pub use movie::*;
pub use password::*;
pub use user::*;
