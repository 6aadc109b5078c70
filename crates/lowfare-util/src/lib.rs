pub mod client_ext;
pub mod fs;

pub use crate::client_ext::util::{build_client, ClientUtilExt as Util};
pub use crate::fs::{write_csv, write_xlsx, Cell, Tabular};
