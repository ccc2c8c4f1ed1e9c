mod init;
mod spans;

pub use init::{LogStyle, init_logger, init_logger_with};
pub use spans::{annotate_revision, child_span, root_span, warn_if_slow};
